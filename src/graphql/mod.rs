//! GraphQL document construction and response decoding
//!
//! The client side of the wire protocol: compiling selection paths into
//! selection sets, assembling operation documents, and taking responses
//! apart again. Nothing here performs I/O.

pub mod document;
pub mod response;
pub mod selection;
pub mod tree;

pub use document::{GraphQLRequest, OperationBuilder, OperationKind};
pub use response::{
    BUSINESS_ERROR_PREFIX, GraphQLResponse, GraphQLResponseError, extract_business_error,
    unwrap_root,
};
pub use selection::{NO_SELECTION_PLACEHOLDER, SelectionTree, build_selection_set};
pub use tree::{
    FieldTreeNode, department_base_nodes, department_field_tree, employee_base_nodes,
    employee_field_tree, with_key_prefix,
};
