//! Go source parsing.
//!
//! Wraps tree-sitter and rejects everything the Go parser itself would reject at the
//! file level, so that later stages only ever see a well-formed declaration list.

use tree_sitter::{Node, Parser, Tree};

use crate::decls::common::{first_token, named_children, truncate_line, MAX_TOKEN_SNIPPET_LEN};
use crate::error::Error;

const BYTE_ORDER_MARK: &str = "\u{feff}";

/// Kinds allowed at the top level after the package clause.
const DECLARATION_KINDS: &[&str] = &[
    "import_declaration",
    "const_declaration",
    "var_declaration",
    "type_declaration",
    "function_declaration",
    "method_declaration",
];

const GO_KEYWORDS: &[&str] = &[
    "break", "case", "chan", "const", "continue", "default", "defer", "else", "fallthrough",
    "for", "func", "go", "goto", "if", "import", "interface", "map", "package", "range",
    "return", "select", "struct", "switch", "type", "var",
];

/// One parsed source unit.
pub struct SyntaxTree {
    name: String,
    source: String,
    tree: Tree,
}

impl SyntaxTree {
    /// Identifier of the source unit this tree came from.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &[u8] {
        self.source.as_bytes()
    }

    /// Top-level declaration nodes in source order (package clause and comments excluded).
    pub fn top_level(&self) -> Vec<Node<'_>> {
        named_children(self.tree.root_node())
            .into_iter()
            .filter(|node| node.kind() != "package_clause")
            .collect()
    }
}

/// Parse raw bytes of one source unit.
pub fn parse(name: &str, bytes: &[u8]) -> Result<SyntaxTree, Error> {
    let text = match std::str::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => {
            let (line, column) = position_of(bytes, err.valid_up_to());
            return Err(syntax_error(name, line, column, "illegal UTF-8 encoding".to_string()));
        }
    };
    // Keep byte offsets intact by blanking the mark instead of removing it.
    let source = match text.strip_prefix(BYTE_ORDER_MARK) {
        Some(rest) => format!("{}{}", " ".repeat(BYTE_ORDER_MARK.len()), rest),
        None => text.to_string(),
    };

    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_go::LANGUAGE.into())
        .map_err(|e| syntax_error(name, 1, 1, format!("failed to load Go grammar: {}", e)))?;
    let tree = parser
        .parse(&source, None)
        .ok_or_else(|| syntax_error(name, 1, 1, "parser produced no tree".to_string()))?;

    let syntax = SyntaxTree {
        name: name.to_string(),
        source,
        tree,
    };
    check_structure(&syntax)?;
    Ok(syntax)
}

// ============ Structure Checks ============

fn check_structure(syntax: &SyntaxTree) -> Result<(), Error> {
    let root = syntax.tree.root_node();
    let source = syntax.source();

    if root.has_error() {
        if let Some(bad) = first_error_node(root) {
            let message = if bad.is_missing() {
                format!("syntax error: missing {}", quote_token(bad.kind()))
            } else {
                let found = first_token(bad, source);
                format!("syntax error: unexpected {}", quote_token(found))
            };
            return Err(error_at(syntax, bad, message));
        }
    }

    let children = named_children(root);
    let Some(first) = children.first() else {
        return Err(syntax_error(
            &syntax.name,
            1,
            1,
            "expected 'package', found 'EOF'".to_string(),
        ));
    };
    if first.kind() != "package_clause" {
        let found = quote_token(first_token(*first, source));
        return Err(error_at(syntax, *first, format!("expected 'package', found {}", found)));
    }

    let mut previous_was_import = true;
    for node in &children[1..] {
        let kind = node.kind();
        if !DECLARATION_KINDS.contains(&kind) {
            let found = quote_token(first_token(*node, source));
            return Err(error_at(syntax, *node, format!("expected declaration, found {}", found)));
        }
        let is_import = kind == "import_declaration";
        if is_import && !previous_was_import {
            return Err(error_at(
                syntax,
                *node,
                "imports must appear before other declarations".to_string(),
            ));
        }
        previous_was_import = is_import;
    }
    Ok(())
}

/// First ERROR or MISSING node in document order.
fn first_error_node(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let children: Vec<Node> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_error_node)
}

/// Render a token the way Go's parser quotes it: names and literals bare, keywords and
/// punctuation in single quotes.
fn quote_token(token: &str) -> String {
    let snippet = truncate_line(token.lines().next().unwrap_or(""), MAX_TOKEN_SNIPPET_LEN);
    if snippet.is_empty() {
        return "'EOF'".to_string();
    }
    let starts_literal = snippet
        .chars()
        .next()
        .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '"' || c == '`' || c == '\'');
    if starts_literal && !GO_KEYWORDS.contains(&snippet.as_str()) {
        snippet
    } else {
        format!("'{}'", snippet)
    }
}

fn error_at(syntax: &SyntaxTree, node: Node, message: String) -> Error {
    let point = node.start_position();
    syntax_error(&syntax.name, point.row + 1, point.column + 1, message)
}

fn syntax_error(name: &str, line: usize, column: usize, message: String) -> Error {
    Error::Syntax {
        name: name.to_string(),
        line,
        column,
        message,
    }
}

/// 1-based line and byte column of `offset` in `bytes`.
fn position_of(bytes: &[u8], offset: usize) -> (usize, usize) {
    let before = &bytes[..offset.min(bytes.len())];
    let line = before.iter().filter(|&&b| b == b'\n').count() + 1;
    let line_start = before.iter().rposition(|&b| b == b'\n').map_or(0, |i| i + 1);
    (line, offset - line_start + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn syntax_message(code: &str) -> String {
        match parse("test.go", code.as_bytes()) {
            Ok(_) => panic!("expected a syntax error for {:?}", code),
            Err(err) => err.to_string(),
        }
    }

    #[test]
    fn test_parse_valid_file() {
        let code = "package main\n\nimport \"fmt\"\n\nvar x = 1\n\nfunc main() {\n\tfmt.Println(x)\n}\n";
        let syntax = parse("main.go", code.as_bytes()).unwrap();
        assert_eq!(syntax.name(), "main.go");
        let kinds: Vec<&str> = syntax.top_level().iter().map(|n| n.kind()).collect();
        assert_eq!(kinds, vec!["import_declaration", "var_declaration", "function_declaration"]);
    }

    #[test]
    fn test_empty_input_needs_package() {
        assert_eq!(syntax_message(""), "test.go:1:1: expected 'package', found 'EOF'");
    }

    #[test]
    fn test_missing_package_clause() {
        let message = syntax_message("var x = 1\n");
        assert_eq!(message, "test.go:1:1: expected 'package', found 'var'");
    }

    #[test]
    fn test_top_level_statement_rejected() {
        let message = syntax_message("package main\n\nx := 1\n");
        assert_eq!(message, "test.go:3:1: expected declaration, found x");
    }

    #[test]
    fn test_late_import_rejected() {
        let message = syntax_message("package main\n\nvar x = 1\n\nimport \"fmt\"\n");
        assert_eq!(message, "test.go:5:1: imports must appear before other declarations");
    }

    #[test]
    fn test_malformed_function_reports_position() {
        let message = syntax_message("package main\n\nfunc main( {\n}\n");
        assert!(message.starts_with("test.go:3:"), "got {}", message);
        assert!(message.contains("syntax error"), "got {}", message);
    }

    #[test]
    fn test_invalid_utf8() {
        let bytes = b"package main\nvar s = \"\xff\"\n";
        let err = parse("bad.go", bytes).err().unwrap();
        assert_eq!(err.to_string(), "bad.go:2:10: illegal UTF-8 encoding");
    }

    #[test]
    fn test_byte_order_mark_ignored() {
        let code = "\u{feff}package main\nvar x = 1\n";
        let syntax = parse("bom.go", code.as_bytes()).unwrap();
        assert_eq!(syntax.top_level().len(), 1);
    }

    #[test]
    fn test_quote_token() {
        assert_eq!(quote_token("foo"), "foo");
        assert_eq!(quote_token("func"), "'func'");
        assert_eq!(quote_token("}"), "'}'");
        assert_eq!(quote_token(""), "'EOF'");
    }
}
