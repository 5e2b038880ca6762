//! Department operations

use crate::client::paging::fetch_page;
use crate::client::{GraphQLExecutor, OrgClient, execute_and_decode};
use crate::core::criteria::DepartmentSpecification;
use crate::core::entity::Department;
use crate::core::error::OrgqlError;
use crate::core::input::DepartmentInput;
use crate::core::page::{Page, PageRequest};
use crate::graphql::OperationBuilder;
use serde_json::json;

impl<X: GraphQLExecutor> OrgClient<X> {
    /// Fetch one page of departments matching the specification
    ///
    /// Runs the `departmentCount` and `departments` query pair; the result
    /// entities carry exactly the fields selected by
    /// `specification.graphql_paths`.
    pub async fn find_departments(
        &self,
        specification: &DepartmentSpecification,
        page_no: u64,
    ) -> Result<Page<Department>, OrgqlError> {
        let count_request = OperationBuilder::query("departmentCount")
            .variable("name", "String", json!(specification.name))
            .build();
        let page = PageRequest::new(page_no, self.config.page_size);
        fetch_page(&self.executor, count_request, page, |limit, offset| {
            Ok(OperationBuilder::query("departments")
                .variable("name", "String", json!(specification.name))
                .variable(
                    "sortedType",
                    "DepartmentSortedType",
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

    /// Fetch a single department by id, `None` when it does not exist
    pub async fn find_department(&self, id: i64) -> Result<Option<Department>, OrgqlError> {
        let request = OperationBuilder::query("department")
            .variable("id", "Long!", json!(id))
            .selection_paths(["id", "name"])?
            .build();
        execute_and_decode(&self.executor, request).await
    }

    /// Create a department and return its new id
    pub async fn create_department(&self, input: &DepartmentInput) -> Result<i64, OrgqlError> {
        let request = OperationBuilder::mutation("createDepartment")
            .variable("input", "DepartmentInput!", json!(input))
            .build();
        execute_and_decode(&self.executor, request).await
    }

    /// Overwrite a department, `false` when the id is unknown
    pub async fn modify_department(
        &self,
        id: i64,
        input: &DepartmentInput,
    ) -> Result<bool, OrgqlError> {
        let request = OperationBuilder::mutation("modifyDepartment")
            .variable("id", "Long!", json!(id))
            .variable("input", "DepartmentInput!", json!(input))
            .build();
        execute_and_decode(&self.executor, request).await
    }

    /// Delete a department, `false` when the id is unknown
    ///
    /// A department that still has employees is rejected with
    /// [`OrgqlError::Business`].
    pub async fn delete_department(&self, id: i64) -> Result<bool, OrgqlError> {
        tracing::debug!(id, "deleting department");
        let request = OperationBuilder::mutation("deleteDepartment")
            .variable("id", "Long!", json!(id))
            .build();
        execute_and_decode(&self.executor, request).await
    }
}
