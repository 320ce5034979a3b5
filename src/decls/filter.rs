//! Declaration filtering: top-level declarations to renderable items.
//!
//! Import groups are dropped, grouped specs are flattened in source order, and every
//! item remembers the keyword of the group it came from.

use tree_sitter::Node;

use crate::decls::common::named_children;
use crate::decls::parse::SyntaxTree;

/// Keyword introducing a declaration group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Var,
    Const,
    Type,
}

impl Keyword {
    /// Text printed in front of a spec taken out of its group.
    pub fn prefix(self) -> &'static str {
        match self {
            Keyword::Var => "var ",
            Keyword::Const => "const ",
            Keyword::Type => "type ",
        }
    }
}

/// A top-level declaration.
#[derive(Debug, Clone)]
pub enum Declaration<'t> {
    Variables(Vec<Node<'t>>),
    Constants(Vec<Node<'t>>),
    Types(Vec<Node<'t>>),
    Imports,
    /// A function or method declaration.
    Function(Node<'t>),
}

/// The unit that gets rendered into one summary line.
#[derive(Debug, Clone, Copy)]
pub enum DeclarationItem<'t> {
    Spec { keyword: Keyword, node: Node<'t> },
    Function(Node<'t>),
}

impl<'t> DeclarationItem<'t> {
    pub fn node(&self) -> Node<'t> {
        match self {
            DeclarationItem::Spec { node, .. } | DeclarationItem::Function(node) => *node,
        }
    }
}

/// Classify the top-level nodes of a parsed unit.
pub fn declarations(tree: &SyntaxTree) -> Vec<Declaration<'_>> {
    tree.top_level()
        .into_iter()
        .filter_map(classify)
        .collect()
}

fn classify(node: Node) -> Option<Declaration> {
    match node.kind() {
        "import_declaration" => Some(Declaration::Imports),
        "var_declaration" => Some(Declaration::Variables(specs(node, &["var_spec"]))),
        "const_declaration" => Some(Declaration::Constants(specs(node, &["const_spec"]))),
        "type_declaration" => Some(Declaration::Types(specs(node, &["type_spec", "type_alias"]))),
        "function_declaration" | "method_declaration" => Some(Declaration::Function(node)),
        _ => None,
    }
}

/// Specs of a declaration, looking through an optional parenthesized list wrapper.
fn specs<'t>(node: Node<'t>, kinds: &[&str]) -> Vec<Node<'t>> {
    let mut out = Vec::new();
    for child in named_children(node) {
        if kinds.contains(&child.kind()) {
            out.push(child);
        } else if child.kind().ends_with("_list") {
            out.extend(
                named_children(child)
                    .into_iter()
                    .filter(|spec| kinds.contains(&spec.kind())),
            );
        }
    }
    out
}

/// Flatten declarations into items, preserving source order across and within groups.
pub fn items<'t>(declarations: &[Declaration<'t>]) -> Vec<DeclarationItem<'t>> {
    let mut out = Vec::new();
    for declaration in declarations {
        let (keyword, specs) = match declaration {
            Declaration::Imports => continue,
            Declaration::Function(node) => {
                out.push(DeclarationItem::Function(*node));
                continue;
            }
            Declaration::Variables(specs) => (Keyword::Var, specs),
            Declaration::Constants(specs) => (Keyword::Const, specs),
            Declaration::Types(specs) => (Keyword::Type, specs),
        };
        out.extend(specs.iter().map(|node| DeclarationItem::Spec {
            keyword,
            node: *node,
        }));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decls::parse::parse;

    fn item_kinds(code: &str) -> Vec<(Option<Keyword>, String)> {
        let tree = parse("test.go", code.as_bytes()).unwrap();
        let decls = declarations(&tree);
        items(&decls)
            .iter()
            .map(|item| match item {
                DeclarationItem::Spec { keyword, node } => (Some(*keyword), node.kind().to_string()),
                DeclarationItem::Function(node) => (None, node.kind().to_string()),
            })
            .collect()
    }

    #[test]
    fn test_imports_are_dropped() {
        let code = "package main\n\nimport \"fmt\"\nimport (\n\t\"os\"\n\t\"io\"\n)\n";
        assert!(item_kinds(code).is_empty());
    }

    #[test]
    fn test_groups_are_flattened_in_order() {
        let code = r#"package main

var (
	a = 1
	b = 2
)

const c = 3

type (
	T struct{}
	U = T
)

func f() {}

func (t T) m() {}
"#;
        let kinds = item_kinds(code);
        assert_eq!(
            kinds,
            vec![
                (Some(Keyword::Var), "var_spec".to_string()),
                (Some(Keyword::Var), "var_spec".to_string()),
                (Some(Keyword::Const), "const_spec".to_string()),
                (Some(Keyword::Type), "type_spec".to_string()),
                (Some(Keyword::Type), "type_alias".to_string()),
                (None, "function_declaration".to_string()),
                (None, "method_declaration".to_string()),
            ]
        );
    }

    #[test]
    fn test_empty_group_yields_nothing() {
        let code = "package main\n\nvar ()\n\nconst ()\n";
        assert!(item_kinds(code).is_empty());
    }

    #[test]
    fn test_keyword_prefix() {
        assert_eq!(Keyword::Var.prefix(), "var ");
        assert_eq!(Keyword::Const.prefix(), "const ");
        assert_eq!(Keyword::Type.prefix(), "type ");
    }
}
