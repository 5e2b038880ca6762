//! Service trait for backends serving the directory contract

use crate::core::criteria::{DepartmentSortedType, EmployeeCriteria, EmployeeSortedType};
use crate::core::entity::{DepartmentRecord, EmployeeRecord};
use crate::core::error::ServiceError;
use crate::core::input::{DepartmentInput, EmployeeInput};
use async_trait::async_trait;

/// Server-side contract of the department/employee directory
///
/// The in-process GraphQL executor resolves every root field and every
/// association through this trait, so any implementation (the bundled
/// in-memory store or a real persistence layer) serves the same API.
///
/// Listing methods apply filter, then sort, then the limit/offset window.
#[async_trait]
pub trait OrgService: Send + Sync {
    // === Departments ===

    /// Count departments whose name contains `name` (case-insensitive)
    async fn department_count(&self, name: Option<&str>) -> Result<u64, ServiceError>;

    async fn departments(
        &self,
        name: Option<&str>,
        sorted_type: DepartmentSortedType,
        descending: bool,
        limit: Option<u64>,
        offset: Option<u64>,
    ) -> Result<Vec<DepartmentRecord>, ServiceError>;

    async fn department(&self, id: i64) -> Result<Option<DepartmentRecord>, ServiceError>;

    /// Average salary of the department's employees; `None` when it has none
    async fn average_salary(&self, department_id: i64) -> Result<Option<f64>, ServiceError>;

    /// Employees of a department, ordered by id
    async fn employees_of_department(
        &self,
        department_id: i64,
    ) -> Result<Vec<EmployeeRecord>, ServiceError>;

    /// Returns the id of the created department
    async fn create_department(&self, input: DepartmentInput) -> Result<i64, ServiceError>;

    /// Returns `false` when no department has the given id
    async fn modify_department(
        &self,
        id: i64,
        input: DepartmentInput,
    ) -> Result<bool, ServiceError>;

    /// Returns `false` when no department has the given id
    ///
    /// Fails with [`BusinessError::CannotDeleteDepartmentWithEmployees`]
    /// when the department still has employees.
    ///
    /// [`BusinessError::CannotDeleteDepartmentWithEmployees`]: crate::core::error::BusinessError
    async fn delete_department(&self, id: i64) -> Result<bool, ServiceError>;

    // === Employees ===

    async fn employee_count(
        &self,
        criteria: Option<&EmployeeCriteria>,
    ) -> Result<u64, ServiceError>;

    async fn employees(
        &self,
        criteria: Option<&EmployeeCriteria>,
        sorted_type: EmployeeSortedType,
        descending: bool,
        limit: Option<u64>,
        offset: Option<u64>,
    ) -> Result<Vec<EmployeeRecord>, ServiceError>;

    async fn employee(&self, id: i64) -> Result<Option<EmployeeRecord>, ServiceError>;

    /// Direct subordinates of an employee, ordered by id
    async fn subordinates_of(&self, employee_id: i64) -> Result<Vec<EmployeeRecord>, ServiceError>;

    /// Returns the id of the created employee
    ///
    /// Fails with `ILLEGAL_DEPARTMENT_ID` / `ILLEGAL_SUPERVISOR_ID` when a
    /// referenced entity does not exist.
    async fn create_employee(&self, input: EmployeeInput) -> Result<i64, ServiceError>;

    /// Returns `false` when no employee has the given id
    ///
    /// Beyond the referential checks of [`create_employee`], fails with
    /// `SUPERVISOR_CYCLE` when the new supervisor chain leads back to the
    /// employee being modified.
    ///
    /// [`create_employee`]: OrgService::create_employee
    async fn modify_employee(&self, id: i64, input: EmployeeInput) -> Result<bool, ServiceError>;

    /// Returns `false` when no employee has the given id
    ///
    /// Fails with `CANNOT_DELETE_EMPLOYEE_WITH_SUBORDINATES` when other
    /// employees still report to this one.
    async fn delete_employee(&self, id: i64) -> Result<bool, ServiceError>;
}
