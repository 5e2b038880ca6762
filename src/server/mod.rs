//! In-process serving of the directory GraphQL contract
//!
//! No transport lives here; the executor implements the client's
//! [`GraphQLExecutor`](crate::client::GraphQLExecutor) seam directly, so a
//! client wired to it exercises the full document/response round trip
//! without a network.

pub mod executor;

pub use executor::InProcessExecutor;
