//! Tree helpers shared by the pipeline stages.

use tree_sitter::Node;

// ============ Threshold Constants ============

/// Longest token snippet quoted in a syntax error message.
pub const MAX_TOKEN_SNIPPET_LEN: usize = 24;

// ============ Text Utilities ============

/// Get text content of a tree-sitter node
pub fn get_node_text<'a>(node: Node, source: &'a [u8]) -> &'a str {
    let start = node.start_byte();
    let end = node.end_byte();
    let slice = source.get(start..end).unwrap_or(&[]);
    std::str::from_utf8(slice).unwrap_or("")
}

/// Truncate a line to a maximum length, adding "..." if truncated
pub fn truncate_line(line: &str, max_len: usize) -> String {
    let mut out = String::new();
    let mut truncated = false;
    for (count, ch) in line.chars().enumerate() {
        if count >= max_len {
            truncated = true;
            break;
        }
        out.push(ch);
    }
    if truncated {
        out.push_str("...");
    }
    out
}

// ============ Node Navigation ============

pub fn is_comment(node: Node) -> bool {
    node.kind() == "comment"
}

/// Named children without comments.
pub fn named_children<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    let children = node
        .named_children(&mut cursor)
        .filter(|child| !is_comment(*child))
        .collect();
    children
}

/// All children (named and anonymous tokens) without comments.
pub fn all_children<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    let children = node
        .children(&mut cursor)
        .filter(|child| !is_comment(*child))
        .collect();
    children
}

/// Every named child stored under `field`, in source order.
///
/// A field may span a comma-separated list (`const a, b`), so the separators are
/// dropped here.
pub fn field_children<'t>(node: Node<'t>, field: &str) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    let children = node
        .children_by_field_name(field, &mut cursor)
        .filter(|child| child.is_named() && !is_comment(*child))
        .collect();
    children
}

/// Statements of a block or case clause. Grammar versions differ in whether the
/// statements sit in a `statement_list` wrapper, so both shapes are accepted.
pub fn statements<'t>(nodes: impl IntoIterator<Item = Node<'t>>) -> Vec<Node<'t>> {
    let mut out = Vec::new();
    for node in nodes {
        match node.kind() {
            "statement_list" => out.extend(statements(named_children(node))),
            "empty_statement" => {}
            _ => out.push(node),
        }
    }
    out
}

/// Whether `node` has an anonymous child token equal to `token`.
pub fn has_token(node: Node, token: &str) -> bool {
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .any(|child| !child.is_named() && child.kind() == token);
    found
}

/// 0-based row where the node starts.
pub fn start_row(node: Node) -> usize {
    node.start_position().row
}

/// 0-based row where the node ends.
pub fn end_row(node: Node) -> usize {
    node.end_position().row
}

/// The first leaf token of a node, used to describe it in error messages.
pub fn first_token<'a>(node: Node, source: &'a [u8]) -> &'a str {
    let mut current = node;
    while let Some(child) = current.child(0) {
        current = child;
    }
    get_node_text(current, source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_line() {
        assert_eq!(truncate_line("short", 10), "short");
        assert_eq!(truncate_line("abcdefghij", 4), "abcd...");
    }
}
