//! Selectable-field catalogs for the directory entities
//!
//! A selection UI needs to know which paths exist before anyone can check
//! them. These catalogs describe the selectable structure of the two entity
//! types, association subtrees included, with keys that are valid inputs to
//! the selection-set compiler.

/// One selectable field, keyed by its full dotted path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldTreeNode {
    /// Dot-delimited path from the query root, e.g. `employees.supervisor.name`
    pub key: String,
    /// Human-readable label
    pub title: String,
    pub children: Vec<FieldTreeNode>,
}

impl FieldTreeNode {
    pub fn leaf(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            children: Vec::new(),
        }
    }

    pub fn branch(
        key: impl Into<String>,
        title: impl Into<String>,
        children: Vec<FieldTreeNode>,
    ) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            children,
        }
    }

    /// Collect the keys of all leaves under this node
    pub fn leaf_keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        collect_leaf_keys(self, &mut keys);
        keys
    }
}

fn collect_leaf_keys(node: &FieldTreeNode, keys: &mut Vec<String>) {
    if node.children.is_empty() {
        keys.push(node.key.clone());
        return;
    }
    for child in &node.children {
        collect_leaf_keys(child, keys);
    }
}

/// Re-key a set of nodes under a parent path
pub fn with_key_prefix(prefix: &str, nodes: &[FieldTreeNode]) -> Vec<FieldTreeNode> {
    nodes
        .iter()
        .map(|node| FieldTreeNode {
            key: format!("{}.{}", prefix, node.key),
            title: node.title.clone(),
            children: with_key_prefix(prefix, &node.children),
        })
        .collect()
}

/// Scalar fields of a department
pub fn department_base_nodes() -> Vec<FieldTreeNode> {
    vec![
        FieldTreeNode::leaf("id", "Id"),
        FieldTreeNode::leaf("name", "Name"),
    ]
}

/// Scalar fields of an employee
pub fn employee_base_nodes() -> Vec<FieldTreeNode> {
    vec![
        FieldTreeNode::leaf("id", "Id"),
        FieldTreeNode::leaf("name", "Name"),
        FieldTreeNode::leaf("gender", "Gender"),
        FieldTreeNode::leaf("salary", "Salary"),
    ]
}

/// Full selectable tree for department listings
pub fn department_field_tree() -> Vec<FieldTreeNode> {
    let mut nodes = department_base_nodes();
    nodes.push(FieldTreeNode::leaf(
        "avgSalary",
        "Average salary (aggregation value)",
    ));
    let mut employees = with_key_prefix("employees", &employee_base_nodes());
    employees.push(FieldTreeNode::branch(
        "employees.supervisor",
        "Supervisor (many-to-one association)",
        with_key_prefix("employees.supervisor", &employee_base_nodes()),
    ));
    employees.push(FieldTreeNode::branch(
        "employees.subordinates",
        "Subordinates (one-to-many association)",
        with_key_prefix("employees.subordinates", &employee_base_nodes()),
    ));
    nodes.push(FieldTreeNode::branch(
        "employees",
        "Employees (one-to-many association)",
        employees,
    ));
    nodes
}

/// Full selectable tree for employee listings
pub fn employee_field_tree() -> Vec<FieldTreeNode> {
    let mut nodes = employee_base_nodes();

    let mut department_nodes = department_base_nodes();
    department_nodes.push(FieldTreeNode::leaf(
        "avgSalary",
        "Average salary (aggregation value)",
    ));
    nodes.push(FieldTreeNode::branch(
        "department",
        "Department (many-to-one association)",
        with_key_prefix("department", &department_nodes),
    ));
    nodes.push(FieldTreeNode::branch(
        "supervisor",
        "Supervisor (many-to-one association)",
        with_key_prefix("supervisor", &employee_base_nodes()),
    ));
    nodes.push(FieldTreeNode::branch(
        "subordinates",
        "Subordinates (one-to-many association)",
        with_key_prefix("subordinates", &employee_base_nodes()),
    ));
    nodes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphql::selection::build_selection_set;

    #[test]
    fn test_prefixing_rewrites_keys_recursively() {
        let nodes = vec![FieldTreeNode::branch(
            "supervisor",
            "Supervisor",
            vec![FieldTreeNode::leaf("supervisor.id", "Id")],
        )];
        let prefixed = with_key_prefix("employees", &nodes);
        assert_eq!(prefixed[0].key, "employees.supervisor");
        assert_eq!(prefixed[0].children[0].key, "employees.supervisor.id");
    }

    #[test]
    fn test_department_tree_contains_association_paths() {
        let keys: Vec<String> = department_field_tree()
            .iter()
            .flat_map(|node| node.leaf_keys())
            .collect();
        assert!(keys.contains(&"id".to_string()));
        assert!(keys.contains(&"avgSalary".to_string()));
        assert!(keys.contains(&"employees.supervisor.name".to_string()));
        assert!(keys.contains(&"employees.subordinates.salary".to_string()));
    }

    #[test]
    fn test_catalog_keys_compile_to_a_selection_set() {
        // Checking the whole employee tree must produce one block per
        // association, not duplicated siblings
        let keys: Vec<String> = employee_field_tree()
            .iter()
            .flat_map(|node| node.leaf_keys())
            .collect();
        let body = build_selection_set(&keys);
        assert_eq!(body.matches("department {").count(), 1);
        assert_eq!(body.matches("supervisor {").count(), 1);
        assert_eq!(body.matches("subordinates {").count(), 1);
    }
}
