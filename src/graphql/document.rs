//! Operation document construction
//!
//! Builds the complete query/mutation texts the directory API consumes:
//! operation keyword, variable declarations, one root field whose argument
//! names mirror the variable names, and a selection body compiled from
//! dot-delimited paths.
//!
//! Unlike the selection-set compiler, this layer is a validation boundary:
//! paths coming from user selections are checked segment by segment against
//! the GraphQL name grammar, and malformed ones are rejected with a typed
//! error instead of being spliced into an outgoing document.

use crate::core::error::DocumentError;
use crate::graphql::selection::{NO_SELECTION_PLACEHOLDER, SelectionTree};
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::OnceLock;

/// A ready-to-send GraphQL request: the standard POST body shape
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphQLRequest {
    pub query: String,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub variables: Map<String, Value>,
    #[serde(rename = "operationName", skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Query,
    Mutation,
}

impl OperationKind {
    fn keyword(&self) -> &'static str {
        match self {
            OperationKind::Query => "query",
            OperationKind::Mutation => "mutation",
        }
    }
}

#[derive(Debug, Clone)]
struct VariableBinding {
    name: String,
    graphql_type: String,
    value: Value,
}

/// Builder for single-field operations
///
/// # Example
///
/// ```
/// use orgql::graphql::OperationBuilder;
/// use serde_json::json;
///
/// let request = OperationBuilder::query("department")
///     .variable("id", "Long!", json!(1))
///     .selection_paths(["id", "name"])
///     .unwrap()
///     .build();
///
/// assert_eq!(
///     request.query,
///     "query($id: Long!) {\n\tdepartment(id: $id) {\n\t\tid\n\t\tname\n\t}\n}"
/// );
/// assert_eq!(request.variables["id"], json!(1));
/// ```
#[derive(Debug, Clone)]
pub struct OperationBuilder {
    kind: OperationKind,
    field: String,
    variables: Vec<VariableBinding>,
    selection: Option<String>,
    placeholder: String,
}

impl OperationBuilder {
    pub fn query(field: impl Into<String>) -> Self {
        Self::new(OperationKind::Query, field)
    }

    pub fn mutation(field: impl Into<String>) -> Self {
        Self::new(OperationKind::Mutation, field)
    }

    fn new(kind: OperationKind, field: impl Into<String>) -> Self {
        Self {
            kind,
            field: field.into(),
            variables: Vec::new(),
            selection: None,
            placeholder: NO_SELECTION_PLACEHOLDER.to_string(),
        }
    }

    /// Declare a variable and pass it as the root field's argument of the
    /// same name
    pub fn variable(
        mut self,
        name: impl Into<String>,
        graphql_type: impl Into<String>,
        value: Value,
    ) -> Self {
        self.variables.push(VariableBinding {
            name: name.into(),
            graphql_type: graphql_type.into(),
            value,
        });
        self
    }

    /// Override the field emitted when no path was selected
    pub fn placeholder(mut self, field: impl Into<String>) -> Self {
        self.placeholder = field.into();
        self
    }

    /// Compile the given paths into the root field's selection body
    ///
    /// Every segment must match the GraphQL name grammar
    /// (`[_A-Za-z][_0-9A-Za-z]*`); an empty path list falls back to the
    /// placeholder field. Without a call to this method the root field is
    /// emitted as a scalar, with no braces.
    pub fn selection_paths<I, S>(mut self, paths: I) -> Result<Self, DocumentError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tree = SelectionTree::new();
        for path in paths {
            let path = path.as_ref();
            for segment in path.split('.') {
                if !field_name_pattern().is_match(segment) {
                    return Err(DocumentError::InvalidSegment {
                        path: path.to_string(),
                        segment: segment.to_string(),
                    });
                }
            }
            tree.insert_path(path);
        }
        self.selection = Some(if tree.is_empty() {
            self.placeholder.clone()
        } else {
            tree.render()
        });
        Ok(self)
    }

    pub fn build(self) -> GraphQLRequest {
        let mut query = String::new();
        query.push_str(self.kind.keyword());
        if !self.variables.is_empty() {
            query.push('(');
            for (index, binding) in self.variables.iter().enumerate() {
                if index > 0 {
                    query.push_str(", ");
                }
                query.push('$');
                query.push_str(&binding.name);
                query.push_str(": ");
                query.push_str(&binding.graphql_type);
            }
            query.push(')');
        }
        query.push_str(" {\n\t");
        query.push_str(&self.field);
        if !self.variables.is_empty() {
            query.push('(');
            for (index, binding) in self.variables.iter().enumerate() {
                if index > 0 {
                    query.push_str(", ");
                }
                query.push_str(&binding.name);
                query.push_str(": $");
                query.push_str(&binding.name);
            }
            query.push(')');
        }
        match &self.selection {
            None => query.push('\n'),
            Some(body) => {
                query.push_str(" {\n");
                for line in body.lines() {
                    query.push_str("\t\t");
                    query.push_str(line);
                    query.push('\n');
                }
                query.push_str("\t}\n");
            }
        }
        query.push('}');

        let mut variables = Map::new();
        for binding in self.variables {
            variables.insert(binding.name, binding.value);
        }
        GraphQLRequest {
            query,
            variables,
            operation_name: None,
        }
    }
}

fn field_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new("^[_A-Za-z][_0-9A-Za-z]*$").expect("field name pattern must compile")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalar_query_has_no_selection_braces() {
        let request = OperationBuilder::query("departmentCount")
            .variable("name", "String", json!("mark"))
            .build();
        assert_eq!(
            request.query,
            "query($name: String) {\n\tdepartmentCount(name: $name)\n}"
        );
        assert_eq!(request.variables["name"], json!("mark"));
    }

    #[test]
    fn test_list_query_splices_nested_selection() {
        let request = OperationBuilder::query("departments")
            .variable("limit", "Int", json!(5))
            .variable("offset", "Int", json!(10))
            .selection_paths(["id", "employees.name"])
            .unwrap()
            .build();
        assert_eq!(
            request.query,
            "query($limit: Int, $offset: Int) {\n\
             \tdepartments(limit: $limit, offset: $offset) {\n\
             \t\tid\n\
             \t\temployees {\n\
             \t\t\tname\n\
             \t\t}\n\
             \t}\n\
             }"
        );
    }

    #[test]
    fn test_mutation_keyword_and_variable_order() {
        let request = OperationBuilder::mutation("modifyEmployee")
            .variable("id", "Long!", json!(3))
            .variable("input", "EmployeeInput!", json!({ "name": "Jim" }))
            .build();
        assert!(request.query.starts_with("mutation($id: Long!, $input: EmployeeInput!)"));
        assert!(request.query.contains("modifyEmployee(id: $id, input: $input)"));
    }

    #[test]
    fn test_empty_paths_fall_back_to_placeholder() {
        let paths: [&str; 0] = [];
        let request = OperationBuilder::query("departments")
            .selection_paths(paths)
            .unwrap()
            .build();
        assert_eq!(request.query, "query {\n\tdepartments {\n\t\t__typename\n\t}\n}");
    }

    #[test]
    fn test_placeholder_can_be_overridden() {
        let paths: [&str; 0] = [];
        let request = OperationBuilder::query("departments")
            .placeholder("id")
            .selection_paths(paths)
            .unwrap()
            .build();
        assert!(request.query.contains("\t\tid\n"));
    }

    #[test]
    fn test_empty_segment_is_rejected() {
        let result = OperationBuilder::query("departments").selection_paths([".id"]);
        assert!(matches!(
            result,
            Err(DocumentError::InvalidSegment { ref segment, .. }) if segment.is_empty()
        ));
    }

    #[test]
    fn test_illegal_character_is_rejected() {
        let result = OperationBuilder::query("departments").selection_paths(["emp loyees"]);
        assert!(matches!(result, Err(DocumentError::InvalidSegment { .. })));
    }

    #[test]
    fn test_variables_absent_when_none_declared() {
        let request = OperationBuilder::query("departments")
            .selection_paths(["id"])
            .unwrap()
            .build();
        assert!(request.variables.is_empty());
        assert_eq!(request.query, "query {\n\tdepartments {\n\t\tid\n\t}\n}");
    }
}
