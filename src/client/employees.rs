//! Employee operations

use crate::client::paging::fetch_page;
use crate::client::{GraphQLExecutor, OrgClient, execute_and_decode};
use crate::core::criteria::EmployeeSpecification;
use crate::core::entity::Employee;
use crate::core::error::OrgqlError;
use crate::core::input::EmployeeInput;
use crate::core::page::{Page, PageRequest};
use crate::graphql::OperationBuilder;
use serde_json::json;

/// Paths loaded when an employee is fetched for editing: every field an
/// [`EmployeeInput`] needs to be prefilled
const EDIT_PATHS: [&str; 6] = [
    "id",
    "name",
    "gender",
    "salary",
    "department.id",
    "supervisor.id",
];

impl<X: GraphQLExecutor> OrgClient<X> {
    /// Fetch one page of employees matching the specification
    ///
    /// Runs the `employeeCount` and `employees` query pair; the result
    /// entities carry exactly the fields selected by
    /// `specification.graphql_paths`.
    pub async fn find_employees(
        &self,
        specification: &EmployeeSpecification,
        page_no: u64,
    ) -> Result<Page<Employee>, OrgqlError> {
        let count_request = OperationBuilder::query("employeeCount")
            .variable("criteria", "EmployeeCriteriaInput", json!(specification.criteria))
            .build();
        let page = PageRequest::new(page_no, self.config.page_size);
        fetch_page(&self.executor, count_request, page, |limit, offset| {
            Ok(OperationBuilder::query("employees")
                .variable(
                    "criteria",
                    "EmployeeCriteriaInput",
                    json!(specification.criteria),
                )
                .variable(
                    "sortedType",
                    "EmployeeSortedType",
                    json!(specification.sorted_type),
                )
                .variable("descending", "Boolean", json!(specification.descending))
                .variable(self.config.limit_argument.clone(), "Int", json!(limit))
                .variable(self.config.offset_argument.clone(), "Int", json!(offset))
                .placeholder(self.config.placeholder_field.clone())
                .selection_paths(&specification.graphql_paths)?
                .build())
        })
        .await
    }

    /// Fetch a single employee by id with the fields an edit form needs,
    /// `None` when it does not exist
    pub async fn find_employee(&self, id: i64) -> Result<Option<Employee>, OrgqlError> {
        let request = OperationBuilder::query("employee")
            .variable("id", "Long!", json!(id))
            .selection_paths(EDIT_PATHS)?
            .build();
        execute_and_decode(&self.executor, request).await
    }

    /// Create an employee and return its new id
    ///
    /// Referential problems (unknown department or supervisor) surface as
    /// [`OrgqlError::Business`].
    pub async fn create_employee(&self, input: &EmployeeInput) -> Result<i64, OrgqlError> {
        let request = OperationBuilder::mutation("createEmployee")
            .variable("input", "EmployeeInput!", json!(input))
            .build();
        execute_and_decode(&self.executor, request).await
    }

    /// Overwrite an employee, `false` when the id is unknown
    ///
    /// A supervisor assignment that closes a reporting cycle is rejected
    /// with [`OrgqlError::Business`].
    pub async fn modify_employee(
        &self,
        id: i64,
        input: &EmployeeInput,
    ) -> Result<bool, OrgqlError> {
        let request = OperationBuilder::mutation("modifyEmployee")
            .variable("id", "Long!", json!(id))
            .variable("input", "EmployeeInput!", json!(input))
            .build();
        execute_and_decode(&self.executor, request).await
    }

    /// Delete an employee, `false` when the id is unknown
    ///
    /// An employee that still has subordinates is rejected with
    /// [`OrgqlError::Business`].
    pub async fn delete_employee(&self, id: i64) -> Result<bool, OrgqlError> {
        tracing::debug!(id, "deleting employee");
        let request = OperationBuilder::mutation("deleteEmployee")
            .variable("id", "Long!", json!(id))
            .build();
        execute_and_decode(&self.executor, request).await
    }
}
