//! Typed error handling for the orgql toolkit
//!
//! Three audiences share this module:
//!
//! - [`OrgqlError`] is what client operations return. It separates document
//!   construction problems, transport failures, business errors reported by
//!   the server, and malformed responses, so callers can match on the case
//!   they care about instead of string-matching messages.
//! - [`BusinessError`] is the taxonomy of domain rule violations the
//!   directory API reports through the GraphQL `errors` array. It is both
//!   decoded by the client and produced by the in-process reference backend.
//! - [`ServiceError`] is what backend service implementations return.
//!
//! # Example
//!
//! ```rust,ignore
//! match client.delete_department(id).await {
//!     Ok(true) => println!("deleted"),
//!     Err(OrgqlError::Business(BusinessError::CannotDeleteDepartmentWithEmployees {
//!         employees, ..
//!     })) => {
//!         println!("blocked by {} employees", employees.len());
//!     }
//!     Err(e) => eprintln!("other error: {}", e),
//!     _ => {}
//! }
//! ```

use crate::core::entity::NamedEntity;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A domain rule violation reported by the directory API
///
/// On the wire a business error is a GraphQL error whose `errorType` is
/// `BUSINESS:<code>` (or whose `extensions.code` is `<code>`), with the
/// payload fields carried in `extensions`. The serde representation below
/// matches that payload exactly, so encoding and decoding are symmetric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum BusinessError {
    /// The caller is not authenticated or the token was rejected
    #[serde(rename = "UNAUTHORIZED")]
    Unauthorized,

    /// An employee references a department id that does not exist
    #[serde(rename = "ILLEGAL_DEPARTMENT_ID", rename_all = "camelCase")]
    IllegalDepartment { department_id: i64 },

    /// An employee references a supervisor id that does not exist
    #[serde(rename = "ILLEGAL_SUPERVISOR_ID", rename_all = "camelCase")]
    IllegalSupervisor { supervisor_id: i64 },

    /// The department still has employees and cannot be deleted
    #[serde(
        rename = "CANNOT_DELETE_DEPARTMENT_WITH_EMPLOYEES",
        rename_all = "camelCase"
    )]
    CannotDeleteDepartmentWithEmployees {
        department_id: i64,
        employees: Vec<NamedEntity>,
    },

    /// The employee still has subordinates and cannot be deleted
    #[serde(
        rename = "CANNOT_DELETE_EMPLOYEE_WITH_SUBORDINATES",
        rename_all = "camelCase"
    )]
    CannotDeleteEmployeeWithSubordinates {
        employee_id: i64,
        subordinates: Vec<NamedEntity>,
    },

    /// The requested supervisor assignment would close a reporting cycle
    #[serde(rename = "SUPERVISOR_CYCLE", rename_all = "camelCase")]
    SupervisorCycle {
        employee_id: i64,
        /// The supervisor chain walked before the cycle closed
        supervisors: Vec<NamedEntity>,
    },
}

impl BusinessError {
    /// The stable wire code of this error
    pub fn code(&self) -> &'static str {
        match self {
            BusinessError::Unauthorized => "UNAUTHORIZED",
            BusinessError::IllegalDepartment { .. } => "ILLEGAL_DEPARTMENT_ID",
            BusinessError::IllegalSupervisor { .. } => "ILLEGAL_SUPERVISOR_ID",
            BusinessError::CannotDeleteDepartmentWithEmployees { .. } => {
                "CANNOT_DELETE_DEPARTMENT_WITH_EMPLOYEES"
            }
            BusinessError::CannotDeleteEmployeeWithSubordinates { .. } => {
                "CANNOT_DELETE_EMPLOYEE_WITH_SUBORDINATES"
            }
            BusinessError::SupervisorCycle { .. } => "SUPERVISOR_CYCLE",
        }
    }
}

impl fmt::Display for BusinessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BusinessError::Unauthorized => write!(f, "Unauthorized"),
            BusinessError::IllegalDepartment { department_id } => {
                write!(f, "Illegal department id: {}", department_id)
            }
            BusinessError::IllegalSupervisor { supervisor_id } => {
                write!(f, "Illegal supervisor id: {}", supervisor_id)
            }
            BusinessError::CannotDeleteDepartmentWithEmployees {
                department_id,
                employees,
            } => write!(
                f,
                "Cannot delete department {} because it has {} employee(s)",
                department_id,
                employees.len()
            ),
            BusinessError::CannotDeleteEmployeeWithSubordinates {
                employee_id,
                subordinates,
            } => write!(
                f,
                "Cannot delete employee {} because it has {} subordinate(s)",
                employee_id,
                subordinates.len()
            ),
            BusinessError::SupervisorCycle {
                employee_id,
                supervisors,
            } => write!(
                f,
                "Assigning this supervisor to employee {} would create a cycle through {} employee(s)",
                employee_id,
                supervisors.len()
            ),
        }
    }
}

impl std::error::Error for BusinessError {}

/// Errors raised while constructing a GraphQL document
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentError {
    /// A selection path contains a segment that is not a legal GraphQL name
    ///
    /// Empty segments (from a leading, trailing or doubled dot) fall in this
    /// category as well. The core selection-set compiler accepts such paths;
    /// the document layer rejects them before they reach a server.
    InvalidSegment { path: String, segment: String },
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentError::InvalidSegment { path, segment } => {
                if segment.is_empty() {
                    write!(f, "Selection path {:?} contains an empty segment", path)
                } else {
                    write!(
                        f,
                        "Selection path {:?} contains illegal field name {:?}",
                        path, segment
                    )
                }
            }
        }
    }
}

impl std::error::Error for DocumentError {}

/// Errors raised while decoding a GraphQL response envelope
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseError {
    /// The response carried neither `data` nor any error
    MissingData,

    /// The `data` object did not have exactly one field to unwrap
    AmbiguousRoot { field_count: usize },

    /// The unwrapped value did not deserialize into the expected type
    Decode(String),
}

impl fmt::Display for ResponseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseError::MissingData => write!(f, "Response contains no data"),
            ResponseError::AmbiguousRoot { field_count } => write!(
                f,
                "Response data must be an object with exactly one field, found {}",
                field_count
            ),
            ResponseError::Decode(message) => write!(f, "Failed to decode response: {}", message),
        }
    }
}

impl std::error::Error for ResponseError {}

/// The main error type returned by client operations
#[derive(Debug)]
pub enum OrgqlError {
    /// Document construction failed before anything was sent
    Document(DocumentError),

    /// The executor could not reach the server or the exchange failed
    ///
    /// Produced by transport-owning [`GraphQLExecutor`] implementations;
    /// the in-process reference executor never returns it.
    ///
    /// [`GraphQLExecutor`]: crate::client::GraphQLExecutor
    Transport(String),

    /// The server reported a domain rule violation
    Business(BusinessError),

    /// The server reported GraphQL errors that carry no business code
    GraphQL(Vec<crate::graphql::GraphQLResponseError>),

    /// The response envelope was malformed or did not decode
    Response(ResponseError),
}

impl fmt::Display for OrgqlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrgqlError::Document(e) => write!(f, "{}", e),
            OrgqlError::Transport(message) => write!(f, "Transport error: {}", message),
            OrgqlError::Business(e) => write!(f, "{}", e),
            OrgqlError::GraphQL(errors) => match errors.first() {
                Some(first) if errors.len() == 1 => write!(f, "GraphQL error: {}", first.message),
                Some(first) => write!(
                    f,
                    "GraphQL errors ({}), first: {}",
                    errors.len(),
                    first.message
                ),
                None => write!(f, "GraphQL error"),
            },
            OrgqlError::Response(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for OrgqlError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OrgqlError::Document(e) => Some(e),
            OrgqlError::Business(e) => Some(e),
            OrgqlError::Response(e) => Some(e),
            OrgqlError::Transport(_) | OrgqlError::GraphQL(_) => None,
        }
    }
}

impl From<DocumentError> for OrgqlError {
    fn from(error: DocumentError) -> Self {
        OrgqlError::Document(error)
    }
}

impl From<BusinessError> for OrgqlError {
    fn from(error: BusinessError) -> Self {
        OrgqlError::Business(error)
    }
}

impl From<ResponseError> for OrgqlError {
    fn from(error: ResponseError) -> Self {
        OrgqlError::Response(error)
    }
}

/// Input validation failure, reported field by field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ValidationError {
    FieldError { field: &'static str, message: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::FieldError { field, message } => {
                write!(f, "Validation failed for field '{}': {}", field, message)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Errors returned by [`OrgService`] implementations
///
/// [`OrgService`]: crate::core::service::OrgService
#[derive(Debug)]
pub enum ServiceError {
    /// A domain rule rejected the operation
    Business(BusinessError),

    /// The input failed validation
    Validation(ValidationError),

    /// A backend-internal failure (storage, connectivity, ...)
    Internal(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::Business(e) => write!(f, "{}", e),
            ServiceError::Validation(e) => write!(f, "{}", e),
            ServiceError::Internal(message) => write!(f, "Internal error: {}", message),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ServiceError::Business(e) => Some(e),
            ServiceError::Validation(e) => Some(e),
            ServiceError::Internal(_) => None,
        }
    }
}

impl From<BusinessError> for ServiceError {
    fn from(error: BusinessError) -> Self {
        ServiceError::Business(error)
    }
}

impl From<ValidationError> for ServiceError {
    fn from(error: ValidationError) -> Self {
        ServiceError::Validation(error)
    }
}
