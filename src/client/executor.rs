//! Transport seam of the client

use crate::core::error::OrgqlError;
use crate::graphql::{GraphQLRequest, GraphQLResponse};
use async_trait::async_trait;

/// Executes GraphQL requests against some server
///
/// This is the only seam between the client operations and the outside
/// world. An HTTP implementation posts the request body to an endpoint and
/// maps I/O failures to [`OrgqlError::Transport`]; the bundled in-process
/// executor serves the contract from an in-memory store. GraphQL-level
/// errors are NOT a failure of this method; they travel inside the
/// returned [`GraphQLResponse`] and are classified by the caller.
#[async_trait]
pub trait GraphQLExecutor: Send + Sync {
    async fn execute(&self, request: GraphQLRequest) -> Result<GraphQLResponse, OrgqlError>;
}
