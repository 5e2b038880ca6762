//! Client operations over the directory API
//!
//! [`OrgClient`] wraps a [`GraphQLExecutor`] and exposes the CRUD and paged
//! listing operations of the department/employee API. Documents are built
//! per call from the given specification, so the selection paths chosen by
//! the caller decide exactly what each response carries.

pub mod departments;
pub mod employees;
pub mod executor;
pub mod paging;

pub use executor::GraphQLExecutor;

use crate::config::ClientConfig;
use crate::core::error::{OrgqlError, ResponseError};
use crate::graphql::{GraphQLRequest, extract_business_error, unwrap_root};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Client facade over a [`GraphQLExecutor`]
///
/// # Example
///
/// ```rust,ignore
/// let store = InMemoryOrgStore::new();
/// let client = OrgClient::new(InProcessExecutor::new(Arc::new(store)));
///
/// let specification = DepartmentSpecification {
///     graphql_paths: vec!["id".into(), "name".into(), "employees.name".into()],
///     ..Default::default()
/// };
/// let page = client.find_departments(&specification, 1).await?;
/// ```
pub struct OrgClient<X> {
    executor: X,
    config: ClientConfig,
}

impl<X: GraphQLExecutor> OrgClient<X> {
    pub fn new(executor: X) -> Self {
        Self::with_config(executor, ClientConfig::default())
    }

    pub fn with_config(executor: X, config: ClientConfig) -> Self {
        Self { executor, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn executor(&self) -> &X {
        &self.executor
    }
}

/// Execute a request and decode the unwrapped root value
///
/// Business errors take precedence over generic GraphQL errors; a response
/// without data or errors is malformed.
pub(crate) async fn execute_and_decode<T, X>(
    executor: &X,
    request: GraphQLRequest,
) -> Result<T, OrgqlError>
where
    T: DeserializeOwned,
    X: GraphQLExecutor + ?Sized,
{
    let response = executor.execute(request).await?;
    if !response.errors.is_empty() {
        if let Some(business) = extract_business_error(&response.errors) {
            return Err(OrgqlError::Business(business));
        }
        return Err(OrgqlError::GraphQL(response.errors));
    }
    let data = response
        .data
        .ok_or(OrgqlError::Response(ResponseError::MissingData))?;
    let root = unwrap_root(&data)?;
    decode(root)
}

fn decode<T: DeserializeOwned>(value: &Value) -> Result<T, OrgqlError> {
    serde_json::from_value(value.clone())
        .map_err(|e| OrgqlError::Response(ResponseError::Decode(e.to_string())))
}
