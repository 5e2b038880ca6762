//! Input payloads for create/modify mutations

use crate::core::entity::Gender;
use crate::core::error::ValidationError;
use serde::{Deserialize, Serialize};

const MAX_NAME_LENGTH: usize = 50;

/// Payload of `createDepartment` / `modifyDepartment`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentInput {
    pub name: String,
}

impl DepartmentInput {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Check the invariants a backend enforces before persisting
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name("name", &self.name)
    }
}

/// Payload of `createEmployee` / `modifyEmployee`
///
/// `department_id` and `supervisor_id` are foreign keys; referential checks
/// happen in the service layer because they need store access.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeInput {
    pub name: String,
    pub gender: Gender,
    pub salary: i64,
    pub department_id: i64,
    #[serde(default)]
    pub supervisor_id: Option<i64>,
}

impl EmployeeInput {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name("name", &self.name)?;
        if self.salary < 0 {
            return Err(ValidationError::FieldError {
                field: "salary",
                message: format!("must not be negative, got {}", self.salary),
            });
        }
        Ok(())
    }
}

fn validate_name(field: &'static str, name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::FieldError {
            field,
            message: "must not be blank".to_string(),
        });
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::FieldError {
            field,
            message: format!("must not exceed {} characters", MAX_NAME_LENGTH),
        });
    }
    Ok(())
}
