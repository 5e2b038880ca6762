//! In-process GraphQL executor over an [`OrgService`]
//!
//! Parses incoming documents with `graphql-parser`, dispatches the root
//! fields of the directory schema to the service, and projects the returned
//! records through the request's selection set, so a response carries
//! exactly the fields the document asked for, associations included.
//!
//! Business errors from the service become wire-level GraphQL errors in the
//! same encoding a remote server uses, which makes this executor a drop-in
//! stand-in for one in tests and demos.

use crate::client::GraphQLExecutor;
use crate::core::criteria::{DepartmentSortedType, EmployeeCriteria, EmployeeSortedType};
use crate::core::entity::{DepartmentRecord, EmployeeRecord};
use crate::core::error::{OrgqlError, ServiceError};
use crate::core::input::{DepartmentInput, EmployeeInput};
use crate::core::service::OrgService;
use crate::graphql::{GraphQLRequest, GraphQLResponse, GraphQLResponseError};
use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt};
use graphql_parser::query::{
    Definition, Document, Field, OperationDefinition, Selection, Value as GqlValue, parse_query,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use std::sync::Arc;

/// GraphQL executor serving the directory contract from a service
pub struct InProcessExecutor {
    service: Arc<dyn OrgService>,
}

impl InProcessExecutor {
    pub fn new(service: Arc<dyn OrgService>) -> Self {
        Self { service }
    }
}

/// Internal failure of one execution: either the document asked for
/// something the schema does not have, or the service rejected the call
enum ExecError {
    Query(String),
    Service(ServiceError),
}

impl From<ServiceError> for ExecError {
    fn from(error: ServiceError) -> Self {
        ExecError::Service(error)
    }
}

fn query_error(message: impl Into<String>) -> ExecError {
    ExecError::Query(message.into())
}

#[async_trait]
impl GraphQLExecutor for InProcessExecutor {
    async fn execute(&self, request: GraphQLRequest) -> Result<GraphQLResponse, OrgqlError> {
        tracing::debug!(query = %request.query, "executing in-process GraphQL request");
        let document = match parse_query::<String>(&request.query) {
            Ok(document) => document,
            Err(e) => {
                return Ok(GraphQLResponse::error(GraphQLResponseError::message(
                    format!("Failed to parse query: {}", e),
                )));
            }
        };
        match self.execute_document(&document, &request.variables).await {
            Ok(data) => Ok(GraphQLResponse::data(data)),
            Err(ExecError::Service(ServiceError::Business(error))) => Ok(GraphQLResponse::error(
                GraphQLResponseError::business(&error),
            )),
            Err(ExecError::Service(error)) => Ok(GraphQLResponse::error(
                GraphQLResponseError::message(error.to_string()),
            )),
            Err(ExecError::Query(message)) => Ok(GraphQLResponse::error(
                GraphQLResponseError::message(message),
            )),
        }
    }
}

impl InProcessExecutor {
    /// Execute the first operation of a parsed document
    async fn execute_document<'a>(
        &'a self,
        document: &'a Document<'a, String>,
        variables: &Map<String, Value>,
    ) -> Result<Value, ExecError> {
        let operation = document
            .definitions
            .iter()
            .find_map(|definition| match definition {
                Definition::Operation(operation) => Some(operation),
                Definition::Fragment(_) => None,
            })
            .ok_or_else(|| query_error("No operation found in query"))?;

        match operation {
            OperationDefinition::Query(query) => {
                self.execute_query(&query.selection_set.items, variables)
                    .await
            }
            OperationDefinition::SelectionSet(selection_set) => {
                self.execute_query(&selection_set.items, variables).await
            }
            OperationDefinition::Mutation(mutation) => {
                self.execute_mutation(&mutation.selection_set.items, variables)
                    .await
            }
            OperationDefinition::Subscription(_) => {
                Err(query_error("Subscriptions are not supported"))
            }
        }
    }

    async fn execute_query<'a>(
        &'a self,
        selections: &'a [Selection<'a, String>],
        variables: &Map<String, Value>,
    ) -> Result<Value, ExecError> {
        let mut result = Map::new();
        for selection in selections {
            if let Selection::Field(field) = selection {
                let key = field.alias.clone().unwrap_or_else(|| field.name.clone());
                let value = self.resolve_query_field(field, variables).await?;
                result.insert(key, value);
            }
        }
        Ok(Value::Object(result))
    }

    async fn execute_mutation(
        &self,
        selections: &[Selection<'_, String>],
        variables: &Map<String, Value>,
    ) -> Result<Value, ExecError> {
        let mut result = Map::new();
        for selection in selections {
            if let Selection::Field(field) = selection {
                let key = field.alias.clone().unwrap_or_else(|| field.name.clone());
                let value = self.resolve_mutation_field(field, variables).await?;
                result.insert(key, value);
            }
        }
        Ok(Value::Object(result))
    }

    async fn resolve_query_field<'a>(
        &'a self,
        field: &'a Field<'a, String>,
        variables: &Map<String, Value>,
    ) -> Result<Value, ExecError> {
        match field.name.as_str() {
            "__typename" => Ok(json!("Query")),
            "departmentCount" => {
                let name = string_argument(field, "name", variables)?;
                let count = self.service.department_count(name.as_deref()).await?;
                Ok(json!(count))
            }
            "departments" => {
                let name = string_argument(field, "name", variables)?;
                let sorted_type = decode_argument::<DepartmentSortedType>(
                    field,
                    "sortedType",
                    variables,
                )?
                .unwrap_or_default();
                let descending = bool_argument(field, "descending", variables)?.unwrap_or(false);
                let limit = u64_argument(field, "limit", variables)?;
                let offset = u64_argument(field, "offset", variables)?;
                let records = self
                    .service
                    .departments(name.as_deref(), sorted_type, descending, limit, offset)
                    .await?;
                self.project_department_list(records, &field.selection_set.items)
                    .await
            }
            "department" => {
                let id = require_i64(field, "id", variables)?;
                match self.service.department(id).await? {
                    Some(record) => {
                        self.project_department(record, &field.selection_set.items)
                            .await
                    }
                    None => Ok(Value::Null),
                }
            }
            "employeeCount" => {
                let criteria =
                    decode_argument::<EmployeeCriteria>(field, "criteria", variables)?;
                let count = self.service.employee_count(criteria.as_ref()).await?;
                Ok(json!(count))
            }
            "employees" => {
                let criteria =
                    decode_argument::<EmployeeCriteria>(field, "criteria", variables)?;
                let sorted_type =
                    decode_argument::<EmployeeSortedType>(field, "sortedType", variables)?
                        .unwrap_or_default();
                let descending = bool_argument(field, "descending", variables)?.unwrap_or(false);
                let limit = u64_argument(field, "limit", variables)?;
                let offset = u64_argument(field, "offset", variables)?;
                let records = self
                    .service
                    .employees(criteria.as_ref(), sorted_type, descending, limit, offset)
                    .await?;
                self.project_employee_list(records, &field.selection_set.items)
                    .await
            }
            "employee" => {
                let id = require_i64(field, "id", variables)?;
                match self.service.employee(id).await? {
                    Some(record) => {
                        self.project_employee(record, &field.selection_set.items)
                            .await
                    }
                    None => Ok(Value::Null),
                }
            }
            other => Err(query_error(format!("Unknown query field: {}", other))),
        }
    }

    async fn resolve_mutation_field(
        &self,
        field: &Field<'_, String>,
        variables: &Map<String, Value>,
    ) -> Result<Value, ExecError> {
        match field.name.as_str() {
            "createDepartment" => {
                let input = require_input::<DepartmentInput>(field, variables)?;
                let id = self.service.create_department(input).await?;
                Ok(json!(id))
            }
            "modifyDepartment" => {
                let id = require_i64(field, "id", variables)?;
                let input = require_input::<DepartmentInput>(field, variables)?;
                let modified = self.service.modify_department(id, input).await?;
                Ok(json!(modified))
            }
            "deleteDepartment" => {
                let id = require_i64(field, "id", variables)?;
                let deleted = self.service.delete_department(id).await?;
                Ok(json!(deleted))
            }
            "createEmployee" => {
                let input = require_input::<EmployeeInput>(field, variables)?;
                let id = self.service.create_employee(input).await?;
                Ok(json!(id))
            }
            "modifyEmployee" => {
                let id = require_i64(field, "id", variables)?;
                let input = require_input::<EmployeeInput>(field, variables)?;
                let modified = self.service.modify_employee(id, input).await?;
                Ok(json!(modified))
            }
            "deleteEmployee" => {
                let id = require_i64(field, "id", variables)?;
                let deleted = self.service.delete_employee(id).await?;
                Ok(json!(deleted))
            }
            other => Err(query_error(format!("Unknown mutation field: {}", other))),
        }
    }

    async fn project_department_list<'a>(
        &'a self,
        records: Vec<DepartmentRecord>,
        selections: &'a [Selection<'a, String>],
    ) -> Result<Value, ExecError> {
        let mut projected = Vec::with_capacity(records.len());
        for record in records {
            projected.push(self.project_department(record, selections).await?);
        }
        Ok(Value::Array(projected))
    }

    async fn project_employee_list<'a>(
        &'a self,
        records: Vec<EmployeeRecord>,
        selections: &'a [Selection<'a, String>],
    ) -> Result<Value, ExecError> {
        let mut projected = Vec::with_capacity(records.len());
        for record in records {
            projected.push(self.project_employee(record, selections).await?);
        }
        Ok(Value::Array(projected))
    }

    /// Project a department record through a selection set
    ///
    /// Boxed because projections recurse through associations.
    fn project_department<'a>(
        &'a self,
        record: DepartmentRecord,
        selections: &'a [Selection<'a, String>],
    ) -> BoxFuture<'a, Result<Value, ExecError>> {
        async move {
            if selections.is_empty() {
                return Err(query_error(
                    "Field of type 'Department' must have a selection of subfields",
                ));
            }
            let mut result = Map::new();
            for selection in selections {
                let Selection::Field(field) = selection else {
                    continue;
                };
                let key = field.alias.clone().unwrap_or_else(|| field.name.clone());
                let value = match field.name.as_str() {
                    "__typename" => json!("Department"),
                    "id" => json!(record.id),
                    "name" => json!(record.name),
                    "avgSalary" => json!(self.service.average_salary(record.id).await?),
                    "employees" => {
                        let employees = self.service.employees_of_department(record.id).await?;
                        let mut projected = Vec::with_capacity(employees.len());
                        for employee in employees {
                            projected.push(
                                self.project_employee(employee, &field.selection_set.items)
                                    .await?,
                            );
                        }
                        Value::Array(projected)
                    }
                    other => {
                        return Err(query_error(format!(
                            "Cannot query field '{}' on type 'Department'",
                            other
                        )));
                    }
                };
                result.insert(key, value);
            }
            Ok(Value::Object(result))
        }
        .boxed()
    }

    /// Project an employee record through a selection set
    fn project_employee<'a>(
        &'a self,
        record: EmployeeRecord,
        selections: &'a [Selection<'a, String>],
    ) -> BoxFuture<'a, Result<Value, ExecError>> {
        async move {
            if selections.is_empty() {
                return Err(query_error(
                    "Field of type 'Employee' must have a selection of subfields",
                ));
            }
            let mut result = Map::new();
            for selection in selections {
                let Selection::Field(field) = selection else {
                    continue;
                };
                let key = field.alias.clone().unwrap_or_else(|| field.name.clone());
                let value = match field.name.as_str() {
                    "__typename" => json!("Employee"),
                    "id" => json!(record.id),
                    "name" => json!(record.name),
                    "gender" => json!(record.gender),
                    "salary" => json!(record.salary),
                    "department" => match self.service.department(record.department_id).await? {
                        Some(department) => {
                            self.project_department(department, &field.selection_set.items)
                                .await?
                        }
                        None => Value::Null,
                    },
                    "supervisor" => match record.supervisor_id {
                        Some(supervisor_id) => match self.service.employee(supervisor_id).await? {
                            Some(supervisor) => {
                                self.project_employee(supervisor, &field.selection_set.items)
                                    .await?
                            }
                            None => Value::Null,
                        },
                        None => Value::Null,
                    },
                    "subordinates" => {
                        let subordinates = self.service.subordinates_of(record.id).await?;
                        let mut projected = Vec::with_capacity(subordinates.len());
                        for subordinate in subordinates {
                            projected.push(
                                self.project_employee(subordinate, &field.selection_set.items)
                                    .await?,
                            );
                        }
                        Value::Array(projected)
                    }
                    other => {
                        return Err(query_error(format!(
                            "Cannot query field '{}' on type 'Employee'",
                            other
                        )));
                    }
                };
                result.insert(key, value);
            }
            Ok(Value::Object(result))
        }
        .boxed()
    }
}

/// Resolve an inline or variable-bound argument value to JSON
fn resolve_value(
    value: &GqlValue<'_, String>,
    variables: &Map<String, Value>,
) -> Result<Value, ExecError> {
    Ok(match value {
        GqlValue::Variable(name) => variables.get(name).cloned().unwrap_or(Value::Null),
        GqlValue::Int(number) => match number.as_i64() {
            Some(number) => json!(number),
            None => return Err(query_error("Integer argument out of range")),
        },
        GqlValue::Float(number) => json!(number),
        GqlValue::String(string) => json!(string),
        GqlValue::Boolean(boolean) => json!(boolean),
        GqlValue::Null => Value::Null,
        GqlValue::Enum(name) => Value::String(name.clone()),
        GqlValue::List(items) => {
            let mut resolved = Vec::with_capacity(items.len());
            for item in items {
                resolved.push(resolve_value(item, variables)?);
            }
            Value::Array(resolved)
        }
        GqlValue::Object(map) => {
            let mut resolved = Map::new();
            for (key, item) in map {
                resolved.insert(key.clone(), resolve_value(item, variables)?);
            }
            Value::Object(resolved)
        }
    })
}

/// Look up an argument by name; a missing argument and an explicit `null`
/// both come back as `None`
fn argument(
    field: &Field<'_, String>,
    name: &str,
    variables: &Map<String, Value>,
) -> Result<Option<Value>, ExecError> {
    for (argument_name, value) in &field.arguments {
        if argument_name == name {
            let resolved = resolve_value(value, variables)?;
            return Ok(if resolved.is_null() { None } else { Some(resolved) });
        }
    }
    Ok(None)
}

fn string_argument(
    field: &Field<'_, String>,
    name: &str,
    variables: &Map<String, Value>,
) -> Result<Option<String>, ExecError> {
    match argument(field, name, variables)? {
        None => Ok(None),
        Some(Value::String(string)) => Ok(Some(string)),
        Some(other) => Err(query_error(format!(
            "Argument '{}' must be a string, got {}",
            name, other
        ))),
    }
}

fn bool_argument(
    field: &Field<'_, String>,
    name: &str,
    variables: &Map<String, Value>,
) -> Result<Option<bool>, ExecError> {
    match argument(field, name, variables)? {
        None => Ok(None),
        Some(Value::Bool(boolean)) => Ok(Some(boolean)),
        Some(other) => Err(query_error(format!(
            "Argument '{}' must be a boolean, got {}",
            name, other
        ))),
    }
}

fn i64_argument(
    field: &Field<'_, String>,
    name: &str,
    variables: &Map<String, Value>,
) -> Result<Option<i64>, ExecError> {
    match argument(field, name, variables)? {
        None => Ok(None),
        Some(value) => value.as_i64().map(Some).ok_or_else(|| {
            query_error(format!("Argument '{}' must be an integer, got {}", name, value))
        }),
    }
}

fn u64_argument(
    field: &Field<'_, String>,
    name: &str,
    variables: &Map<String, Value>,
) -> Result<Option<u64>, ExecError> {
    match argument(field, name, variables)? {
        None => Ok(None),
        Some(value) => value.as_u64().map(Some).ok_or_else(|| {
            query_error(format!(
                "Argument '{}' must be a non-negative integer, got {}",
                name, value
            ))
        }),
    }
}

fn require_i64(
    field: &Field<'_, String>,
    name: &str,
    variables: &Map<String, Value>,
) -> Result<i64, ExecError> {
    i64_argument(field, name, variables)?
        .ok_or_else(|| query_error(format!("Missing required argument '{}'", name)))
}

fn decode_argument<T: DeserializeOwned>(
    field: &Field<'_, String>,
    name: &str,
    variables: &Map<String, Value>,
) -> Result<Option<T>, ExecError> {
    match argument(field, name, variables)? {
        None => Ok(None),
        Some(value) => serde_json::from_value(value)
            .map(Some)
            .map_err(|e| query_error(format!("Invalid value for argument '{}': {}", name, e))),
    }
}

fn require_input<T: DeserializeOwned>(
    field: &Field<'_, String>,
    variables: &Map<String, Value>,
) -> Result<T, ExecError> {
    decode_argument(field, "input", variables)?
        .ok_or_else(|| query_error("Missing required argument 'input'"))
}
