//! Dynamic selection-set construction from flat field paths
//!
//! A selection UI hands over the checked fields as dot-delimited paths such
//! as `employees.supervisor.name`. This module folds those paths into a
//! tree, merging shared prefixes and keeping first-seen order, and prints
//! it as the body of a GraphQL operation.
//!
//! The transformation is pure and total: any sequence of strings produces a
//! string, with no shared state between invocations.

use indexmap::IndexMap;

/// Field emitted when nothing was selected
///
/// A query still needs a non-empty selection set to be executable, so an
/// empty path list compiles to this single meta field.
pub const NO_SELECTION_PLACEHOLDER: &str = "__typename";

/// Compile dot-delimited field paths into a GraphQL selection-set body
///
/// Paths sharing a prefix are merged into one nested block; duplicates are
/// ignored; sibling order is the order segments were first seen. Top-level
/// fields start at indent zero without wrapping braces, so the result can
/// be spliced verbatim into a larger operation. Every line, including the
/// last, ends with a newline. Nesting is indented with tabs.
///
/// An empty input compiles to [`NO_SELECTION_PLACEHOLDER`] (exactly, no
/// trailing newline).
///
/// # Example
///
/// ```
/// use orgql::graphql::build_selection_set;
///
/// let body = build_selection_set(["id", "employees.id", "employees.name"]);
/// assert_eq!(body, "id\nemployees {\n\tid\n\tname\n}\n");
/// ```
pub fn build_selection_set<I, S>(paths: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut tree = SelectionTree::new();
    for path in paths {
        tree.insert_path(path.as_ref());
    }
    if tree.is_empty() {
        return NO_SELECTION_PLACEHOLDER.to_string();
    }
    tree.render()
}

/// Order-preserving tree of selected fields
///
/// The root is anonymous and never printed; only its children are emitted.
/// Children are unique by name at each level, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct SelectionTree {
    children: IndexMap<String, SelectionNode>,
}

#[derive(Debug, Clone)]
struct SelectionNode {
    name: String,
    children: IndexMap<String, SelectionNode>,
}

impl SelectionNode {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            children: IndexMap::new(),
        }
    }

    fn write(&self, depth: usize, out: &mut String) {
        for _ in 0..depth {
            out.push('\t');
        }
        out.push_str(&self.name);
        if self.children.is_empty() {
            out.push('\n');
        } else {
            out.push_str(" {\n");
            for child in self.children.values() {
                child.write(depth + 1, out);
            }
            for _ in 0..depth {
                out.push('\t');
            }
            out.push_str("}\n");
        }
    }
}

impl SelectionTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Walk the path from the root, reusing nodes whose name already exists
    /// at that level and appending new ones in encounter order
    pub fn insert_path(&mut self, path: &str) {
        let mut children = &mut self.children;
        for segment in path.split('.') {
            let node = children
                .entry(segment.to_string())
                .or_insert_with(|| SelectionNode::new(segment));
            children = &mut node.children;
        }
    }

    /// Print the root's children at indent zero, nested levels one tab deeper
    pub fn render(&self) -> String {
        let mut out = String::new();
        for node in self.children.values() {
            node.write(0, &mut out);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_compiles_to_placeholder() {
        let paths: [&str; 0] = [];
        assert_eq!(build_selection_set(paths), "__typename");
    }

    #[test]
    fn test_single_segment_paths_have_no_braces() {
        assert_eq!(build_selection_set(["id"]), "id\n");
        assert_eq!(build_selection_set(["id", "name"]), "id\nname\n");
    }

    #[test]
    fn test_shared_prefix_is_merged_into_one_block() {
        let body = build_selection_set(["id", "employees.id", "employees.name"]);
        assert_eq!(body, "id\nemployees {\n\tid\n\tname\n}\n");
        assert_eq!(body.matches("employees").count(), 1);
    }

    #[test]
    fn test_sibling_order_is_first_seen_not_sorted() {
        let body = build_selection_set(["zeta", "alpha"]);
        assert_eq!(body, "zeta\nalpha\n");
    }

    #[test]
    fn test_duplicate_paths_are_idempotent() {
        let once = build_selection_set(["a.b", "c"]);
        let twice = build_selection_set(["a.b", "c", "a.b"]);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_prefix_and_exact_path_coexist() {
        // "a" adds no children on its own; "a.b" nests underneath it
        let body = build_selection_set(["a", "a.b"]);
        assert_eq!(body, "a {\n\tb\n}\n");
    }

    #[test]
    fn test_deep_nesting_preserves_subtree_order() {
        let body = build_selection_set([
            "employees.supervisor.id",
            "employees.supervisor.name",
            "employees.name",
        ]);
        assert_eq!(
            body,
            "employees {\n\tsupervisor {\n\t\tid\n\t\tname\n\t}\n\tname\n}\n"
        );
    }

    #[test]
    fn test_empty_segments_do_not_crash() {
        // Undefined but total: a doubled dot yields an empty-named node
        let body = build_selection_set(["a..b"]);
        assert!(body.starts_with("a {"));
    }

    #[test]
    fn test_owned_strings_are_accepted() {
        let paths = vec!["id".to_string(), "name".to_string()];
        assert_eq!(build_selection_set(paths), "id\nname\n");
    }
}
