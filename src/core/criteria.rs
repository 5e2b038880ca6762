//! Search specifications for paged department/employee listings
//!
//! A specification bundles everything one listing request needs: the filter
//! criteria, the sort order, and the selection paths chosen for the result
//! entities. The selection paths feed the dynamic document builder; the rest
//! becomes query variables.

use crate::core::entity::Gender;
use serde::{Deserialize, Serialize};

/// Sort orders the `departments` query accepts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DepartmentSortedType {
    #[default]
    Id,
    Name,
}

impl DepartmentSortedType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DepartmentSortedType::Id => "ID",
            DepartmentSortedType::Name => "NAME",
        }
    }
}

/// Sort orders the `employees` query accepts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmployeeSortedType {
    #[default]
    Id,
    Name,
    Salary,
    Department,
    DepartmentName,
}

impl EmployeeSortedType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmployeeSortedType::Id => "ID",
            EmployeeSortedType::Name => "NAME",
            EmployeeSortedType::Salary => "SALARY",
            EmployeeSortedType::Department => "DEPARTMENT",
            EmployeeSortedType::DepartmentName => "DEPARTMENT_NAME",
        }
    }
}

/// Filter criteria of the `employees` / `employeeCount` queries
///
/// All fields are optional; an empty criteria matches every employee.
/// Salary bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmployeeCriteria {
    pub name: Option<String>,
    pub gender: Option<Gender>,
    pub min_salary: Option<i64>,
    pub max_salary: Option<i64>,
}

impl EmployeeCriteria {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.gender.is_none()
            && self.min_salary.is_none()
            && self.max_salary.is_none()
    }
}

/// Everything a paged department listing needs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DepartmentSpecification {
    /// Case-insensitive substring filter on the department name
    pub name: Option<String>,
    pub sorted_type: DepartmentSortedType,
    pub descending: bool,
    /// Dot-delimited selection paths for the result entities
    pub graphql_paths: Vec<String>,
}

/// Everything a paged employee listing needs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmployeeSpecification {
    pub criteria: Option<EmployeeCriteria>,
    pub sorted_type: EmployeeSortedType,
    pub descending: bool,
    pub graphql_paths: Vec<String>,
}
