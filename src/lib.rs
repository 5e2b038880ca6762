//! # orgql
//!
//! A client-side toolkit for a department/employee directory served over
//! GraphQL, built around dynamic field selection.
//!
//! ## Features
//!
//! - **Selection-Set Compiler**: fold flat dot-delimited field paths into a
//!   nested GraphQL selection set, merging shared prefixes and preserving
//!   first-seen order
//! - **Document Builder**: assemble complete query/mutation texts with
//!   variable declarations and a validated selection body
//! - **Paged Queries**: drive the count+list query pair and assemble
//!   `Page<T>` results with clamped page numbers
//! - **Typed Business Errors**: decode the directory API's rule violations
//!   (illegal references, reporting cycles, blocked deletions) out of the
//!   GraphQL `errors` array
//! - **Transport-Agnostic**: one async [`GraphQLExecutor`] seam; bring your
//!   own HTTP client
//! - **In-Process Reference Backend** (feature `in-memory`, default): an
//!   in-memory store plus GraphQL executor serving the same contract, for
//!   tests and demos
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use orgql::prelude::*;
//! use std::sync::Arc;
//!
//! let store = InMemoryOrgStore::sample();
//! let client = OrgClient::new(InProcessExecutor::new(Arc::new(store)));
//!
//! // Page through departments, selecting fields dynamically
//! let specification = DepartmentSpecification {
//!     graphql_paths: vec![
//!         "id".into(),
//!         "name".into(),
//!         "employees.name".into(),
//!         "employees.supervisor.name".into(),
//!     ],
//!     ..Default::default()
//! };
//! let page = client.find_departments(&specification, 1).await?;
//!
//! // Business rules surface as typed errors
//! match client.delete_department(1).await {
//!     Err(OrgqlError::Business(BusinessError::CannotDeleteDepartmentWithEmployees {
//!         employees, ..
//!     })) => println!("blocked by {} employees", employees.len()),
//!     other => println!("{:?}", other),
//! }
//! ```
//!
//! [`GraphQLExecutor`]: crate::client::GraphQLExecutor

pub mod client;
pub mod config;
pub mod core;
pub mod graphql;
#[cfg(feature = "in-memory")]
pub mod server;
#[cfg(feature = "in-memory")]
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Types ===
    pub use crate::core::{
        BusinessError, Department, DepartmentInput, DepartmentRecord, DepartmentSortedType,
        DepartmentSpecification, Employee, EmployeeCriteria, EmployeeInput, EmployeeRecord,
        EmployeeSortedType, EmployeeSpecification, Gender, NamedEntity, OrgService, OrgqlError,
        Page, PageRequest, ServiceError,
    };

    // === GraphQL Layer ===
    pub use crate::graphql::{
        GraphQLRequest, GraphQLResponse, OperationBuilder, build_selection_set,
        extract_business_error, unwrap_root,
    };

    // === Client ===
    pub use crate::client::{GraphQLExecutor, OrgClient};

    // === Config ===
    pub use crate::config::ClientConfig;

    // === Reference Backend ===
    #[cfg(feature = "in-memory")]
    pub use crate::server::InProcessExecutor;
    #[cfg(feature = "in-memory")]
    pub use crate::storage::InMemoryOrgStore;

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use serde::{Deserialize, Serialize};
    pub use serde_json::{Value, json};
}
