//! Entity types for the department/employee directory
//!
//! Two families live here. The `*Record` structs are the canonical rows a
//! backend stores and serves. The `Department`/`Employee` structs are the
//! partial views a client decodes from a GraphQL response: every field is
//! optional because a dynamic selection set only fetches what was asked for,
//! and an association may legitimately come back as `null`.

use serde::{Deserialize, Serialize};

/// Employee gender, transported as a GraphQL enum (`MALE` / `FEMALE`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// The wire name of this value
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "MALE",
            Gender::Female => "FEMALE",
        }
    }
}

/// Minimal id/name projection of an entity
///
/// Business errors use this shape to report the entities blocking an
/// operation (e.g. the employees of a department that cannot be deleted).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedEntity {
    pub id: i64,
    pub name: String,
}

/// A department row as stored by a backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentRecord {
    pub id: i64,
    pub name: String,
}

/// An employee row as stored by a backend
///
/// Associations are foreign keys here; the client-facing views expand them
/// into nested objects according to the selection set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRecord {
    pub id: i64,
    pub name: String,
    pub gender: Gender,
    pub salary: i64,
    pub department_id: i64,
    pub supervisor_id: Option<i64>,
}

impl From<&DepartmentRecord> for NamedEntity {
    fn from(record: &DepartmentRecord) -> Self {
        Self {
            id: record.id,
            name: record.name.clone(),
        }
    }
}

impl From<&EmployeeRecord> for NamedEntity {
    fn from(record: &EmployeeRecord) -> Self {
        Self {
            id: record.id,
            name: record.name.clone(),
        }
    }
}

/// Client-side view of a department
///
/// `None` means the field was not selected, or the server returned `null`
/// for it (an unselected field and a null aggregation are indistinguishable
/// once decoded).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Department {
    pub id: Option<i64>,
    pub name: Option<String>,
    /// Aggregation over the department's employees; `null` when it has none
    pub avg_salary: Option<f64>,
    pub employees: Option<Vec<Employee>>,
}

/// Client-side view of an employee
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Employee {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub gender: Option<Gender>,
    pub salary: Option<i64>,
    pub department: Option<Box<Department>>,
    pub supervisor: Option<Box<Employee>>,
    pub subordinates: Option<Vec<Employee>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_gender_wire_names() {
        assert_eq!(serde_json::to_value(Gender::Male).unwrap(), json!("MALE"));
        assert_eq!(serde_json::to_value(Gender::Female).unwrap(), json!("FEMALE"));
        assert_eq!(Gender::Male.as_str(), "MALE");
    }

    #[test]
    fn test_partial_employee_decodes_missing_fields_as_none() {
        let employee: Employee = serde_json::from_value(json!({
            "id": 7,
            "name": "Jim",
        }))
        .unwrap();

        assert_eq!(employee.id, Some(7));
        assert_eq!(employee.name.as_deref(), Some("Jim"));
        assert_eq!(employee.gender, None);
        assert_eq!(employee.supervisor, None);
    }

    #[test]
    fn test_nested_view_decodes_according_to_selection() {
        let department: Department = serde_json::from_value(json!({
            "id": 1,
            "employees": [
                { "id": 2, "supervisor": { "name": "Kate" } },
                { "id": 3, "supervisor": null },
            ],
        }))
        .unwrap();

        let employees = department.employees.unwrap();
        assert_eq!(employees.len(), 2);
        assert_eq!(
            employees[0].supervisor.as_ref().unwrap().name.as_deref(),
            Some("Kate")
        );
        assert_eq!(employees[1].supervisor, None);
    }

    #[test]
    fn test_record_uses_camel_case_on_the_wire() {
        let record = EmployeeRecord {
            id: 1,
            name: "Linda".to_string(),
            gender: Gender::Female,
            salary: 1000,
            department_id: 4,
            supervisor_id: None,
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["departmentId"], json!(4));
        assert_eq!(value["supervisorId"], json!(null));
    }
}
