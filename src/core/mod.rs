//! Core domain model: entities, inputs, search specifications, pagination,
//! errors and the backend service contract

pub mod criteria;
pub mod entity;
pub mod error;
pub mod input;
pub mod page;
pub mod service;

pub use criteria::{
    DepartmentSortedType, DepartmentSpecification, EmployeeCriteria, EmployeeSortedType,
    EmployeeSpecification,
};
pub use entity::{Department, DepartmentRecord, Employee, EmployeeRecord, Gender, NamedEntity};
pub use error::{
    BusinessError, DocumentError, OrgqlError, ResponseError, ServiceError, ValidationError,
};
pub use input::{DepartmentInput, EmployeeInput};
pub use page::{DEFAULT_LIST_PAGE_SIZE, Page, PageRequest, ResolvedPage};
pub use service::OrgService;
