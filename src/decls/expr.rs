//! Expression and type layout.
//!
//! Binary expressions follow gofmt's precedence-sensitive spacing: blanks around an
//! operator are dropped when tighter-binding operators are mixed with looser ones
//! (`a + b*c`), and nesting depth inside argument lists tightens the layout further.

use tree_sitter::Node;

use crate::decls::common::{end_row, has_token, named_children, start_row};
use crate::decls::render::{constraint_terms, is_literal_kind, Printer, RenderResult};

pub(crate) const LOWEST_PREC: u8 = 0;
pub(crate) const UNARY_PREC: u8 = 6;
pub(crate) const HIGHEST_PREC: u8 = 7;

/// Binding strength of a binary operator.
fn precedence(op: &str) -> u8 {
    match op {
        "||" => 1,
        "&&" => 2,
        "==" | "!=" | "<" | "<=" | ">" | ">=" => 3,
        "+" | "-" | "|" | "^" => 4,
        "*" | "/" | "%" | "<<" | ">>" | "&" | "&^" => 5,
        _ => LOWEST_PREC,
    }
}

fn reduce_depth(depth: usize) -> usize {
    if depth > 1 {
        depth - 1
    } else {
        depth
    }
}

impl<'s> Printer<'s> {
    pub(crate) fn expr(&mut self, node: Node) -> RenderResult {
        self.expr1(node, LOWEST_PREC, 1)
    }

    pub(crate) fn expr0(&mut self, node: Node, depth: usize) -> RenderResult {
        self.expr1(node, LOWEST_PREC, depth)
    }

    pub(crate) fn expr1(&mut self, node: Node, prec1: u8, depth: usize) -> RenderResult {
        match node.kind() {
            "binary_expression" => {
                let depth = depth.max(1);
                let cutoff = self.cutoff(node, depth);
                self.binary_expr(node, prec1, cutoff, depth)
            }
            "unary_expression" => {
                let operator = self.required(node, "operator")?;
                let operand = self.required(node, "operand")?;
                self.text(operator);
                self.expr1(operand, UNARY_PREC, depth)
            }
            "parenthesized_expression" | "parenthesized_type" => {
                let inner = self.inner(node)?;
                self.push("(");
                self.expr0(inner, reduce_depth(depth))?;
                self.push(")");
                Ok(())
            }
            "call_expression" => self.call_expr(node, depth),
            "selector_expression" => {
                self.expr1(self.required(node, "operand")?, HIGHEST_PREC, depth)?;
                self.push(".");
                self.text(self.required(node, "field")?);
                Ok(())
            }
            "index_expression" => {
                self.expr1(self.required(node, "operand")?, HIGHEST_PREC, 1)?;
                self.push("[");
                self.expr0(self.required(node, "index")?, depth + 1)?;
                self.push("]");
                Ok(())
            }
            "slice_expression" => self.slice_expr(node, depth),
            "type_assertion_expression" => {
                self.expr1(self.required(node, "operand")?, HIGHEST_PREC, depth)?;
                self.push(".(");
                self.expr(self.required(node, "type")?)?;
                self.push(")");
                Ok(())
            }
            "type_conversion_expression" => {
                self.expr1(self.required(node, "type")?, HIGHEST_PREC, depth)?;
                self.push("(");
                self.expr0(self.required(node, "operand")?, depth)?;
                self.push(")");
                Ok(())
            }
            "type_instantiation_expression" | "generic_type" => {
                let base = self.required(node, "type")?;
                self.expr1(base, HIGHEST_PREC, depth)?;
                match node.child_by_field_name("type_arguments") {
                    Some(arguments) => self.type_arguments(arguments),
                    None => {
                        let arguments: Vec<Node> = named_children(node)
                            .into_iter()
                            .filter(|child| child.id() != base.id())
                            .collect();
                        self.push("[");
                        self.list(None, &arguments, None, |p, arg| p.expr(arg))?;
                        self.push("]");
                        Ok(())
                    }
                }
            }
            "type_arguments" => self.type_arguments(node),
            "composite_literal" => {
                if let Some(ty) = node.child_by_field_name("type") {
                    self.expr1(ty, HIGHEST_PREC, depth)?;
                }
                self.literal_value(self.required(node, "body")?)
            }
            "literal_value" => self.literal_value(node),
            "literal_element" => {
                let inner = self.inner(node)?;
                self.expr0(inner, depth)
            }
            "keyed_element" => {
                let parts = named_children(node);
                let [key, value] = parts.as_slice() else {
                    return Err(self.unsupported(node, "key and value"));
                };
                self.expr(*key)?;
                self.push(": ");
                self.expr(*value)
            }
            "variadic_argument" => {
                let inner = self.inner(node)?;
                self.expr0(inner, depth)?;
                self.push("...");
                Ok(())
            }
            "func_literal" => {
                self.push("func");
                self.signature(node)?;
                self.push(" ");
                self.block(self.required(node, "body")?)
            }
            "int_literal" | "float_literal" | "imaginary_literal" => {
                let normalized = normalize_number(self.node_text(node));
                self.push(&normalized);
                Ok(())
            }

            // Types
            "pointer_type" => {
                self.push("*");
                let inner = self.inner(node)?;
                self.expr(inner)
            }
            "slice_type" => {
                self.push("[]");
                self.expr(self.required(node, "element")?)
            }
            "array_type" => {
                self.push("[");
                self.expr(self.required(node, "length")?)?;
                self.push("]");
                self.expr(self.required(node, "element")?)
            }
            "implicit_length_array_type" => {
                self.push("[...]");
                self.expr(self.required(node, "element")?)
            }
            "map_type" => {
                self.push("map[");
                self.expr(self.required(node, "key")?)?;
                self.push("]");
                self.expr(self.required(node, "value")?)
            }
            "channel_type" => self.channel_type(node),
            "function_type" => {
                self.push("func");
                self.signature(node)
            }
            "struct_type" => self.struct_type(node),
            "interface_type" => self.interface_type(node),
            "qualified_type" => {
                self.text(self.required(node, "package")?);
                self.push(".");
                self.text(self.required(node, "name")?);
                Ok(())
            }
            "negated_type" => {
                self.push("~");
                let inner = self.inner(node)?;
                self.expr(inner)
            }
            "type_elem" | "type_constraint" | "constraint_elem" => {
                for (i, term) in constraint_terms(node).into_iter().enumerate() {
                    if i > 0 {
                        self.push(" | ");
                    }
                    self.expr(term)?;
                }
                Ok(())
            }

            kind if is_literal_kind(kind) || node.named_child_count() == 0 => {
                self.text(node);
                Ok(())
            }
            _ => self.tokens(node),
        }
    }

    /// The single named child of a wrapper node.
    fn inner<'t>(&self, node: Node<'t>) -> Result<Node<'t>, crate::error::Error> {
        named_children(node)
            .into_iter()
            .next()
            .ok_or_else(|| self.unsupported(node, "operand"))
    }

    // ============ Binary Expressions ============

    fn binary_parts<'t>(
        &self,
        node: Node<'t>,
    ) -> Result<(Node<'t>, &'s str, Node<'t>), crate::error::Error> {
        let left = self.required(node, "left")?;
        let operator = self.required(node, "operator")?;
        let right = self.required(node, "right")?;
        Ok((left, self.node_text(operator), right))
    }

    fn binary_expr(&mut self, node: Node, _prec1: u8, cutoff: u8, depth: usize) -> RenderResult {
        let (left, op, right) = self.binary_parts(node)?;
        let prec = precedence(op);
        let print_blank = prec < cutoff;

        self.expr1(left, prec, depth + self.diff_prec(left, prec))?;
        if print_blank {
            self.push(" ");
        }
        self.push(op);
        let op_row = self
            .required(node, "operator")
            .map(start_row)
            .unwrap_or_else(|_| end_row(left));
        if op_row < start_row(right) {
            self.indent += 1;
            self.newline();
            self.expr1(right, prec + 1, depth + 1)?;
            self.indent -= 1;
            return Ok(());
        }
        if print_blank {
            self.push(" ");
        }
        self.expr1(right, prec + 1, depth + 1)
    }

    fn diff_prec(&self, node: Node, prec: u8) -> usize {
        if node.kind() != "binary_expression" {
            return 1;
        }
        match self.binary_parts(node) {
            Ok((_, op, _)) if precedence(op) == prec => 0,
            _ => 1,
        }
    }

    /// Precedence level at or above which operators are printed without blanks.
    fn cutoff(&self, node: Node, depth: usize) -> u8 {
        let (has4, has5, max_problem) = self.walk_binary(node);
        if max_problem > 0 {
            return max_problem + 1;
        }
        if has4 && has5 {
            if depth == 1 {
                return 5;
            }
            return 4;
        }
        if depth == 1 {
            return 6;
        }
        4
    }

    /// Which precedence levels occur in a binary chain, and whether dropping blanks
    /// would glue two operators into a different token (`a / *p`, `x - -y`).
    fn walk_binary(&self, node: Node) -> (bool, bool, u8) {
        let Ok((left, op, right)) = self.binary_parts(node) else {
            return (false, false, 0);
        };
        let prec = precedence(op);
        let mut has4 = prec == 4;
        let mut has5 = prec == 5;
        let mut max_problem = 0;

        if left.kind() == "binary_expression" {
            if let Ok((_, left_op, _)) = self.binary_parts(left) {
                if precedence(left_op) >= prec {
                    let (h4, h5, mp) = self.walk_binary(left);
                    has4 |= h4;
                    has5 |= h5;
                    max_problem = max_problem.max(mp);
                }
            }
        }

        match right.kind() {
            "binary_expression" => {
                if let Ok((_, right_op, _)) = self.binary_parts(right) {
                    if precedence(right_op) > prec {
                        let (h4, h5, mp) = self.walk_binary(right);
                        has4 |= h4;
                        has5 |= h5;
                        max_problem = max_problem.max(mp);
                    }
                }
            }
            "unary_expression" => {
                let right_op = right
                    .child_by_field_name("operator")
                    .map(|n| self.node_text(n))
                    .unwrap_or("");
                if right_op == "*" {
                    if op == "/" {
                        max_problem = 5;
                    }
                } else {
                    match (op, right_op) {
                        ("&", "&") | ("&", "^") => max_problem = 5,
                        ("+", "+") | ("-", "-") => max_problem = max_problem.max(4),
                        _ => {}
                    }
                }
            }
            _ => {}
        }
        (has4, has5, max_problem)
    }

    // ============ Calls, Slices, Literals ============

    fn call_expr(&mut self, node: Node, depth: usize) -> RenderResult {
        let function = self.required(node, "function")?;
        let arguments = self.required(node, "arguments")?;
        let args = named_children(arguments);
        let depth = if args.len() > 1 { depth + 1 } else { depth };

        if function.kind() == "function_type" {
            self.push("(");
            self.expr1(function, HIGHEST_PREC, depth)?;
            self.push(")");
        } else {
            self.expr1(function, HIGHEST_PREC, depth)?;
        }
        if let Some(type_arguments) = node.child_by_field_name("type_arguments") {
            self.type_arguments(type_arguments)?;
        }
        self.push("(");
        self.list(
            Some(start_row(arguments)),
            &args,
            Some(end_row(arguments)),
            |p, arg| p.expr0(arg, depth),
        )?;
        // Older grammars attach the spread to the argument list instead of the argument.
        if has_token(arguments, "...") {
            self.push("...");
        }
        self.push(")");
        Ok(())
    }

    fn type_arguments(&mut self, node: Node) -> RenderResult {
        let args = named_children(node);
        self.push("[");
        self.list(Some(start_row(node)), &args, Some(end_row(node)), |p, arg| p.expr(arg))?;
        self.push("]");
        Ok(())
    }

    fn slice_expr(&mut self, node: Node, depth: usize) -> RenderResult {
        self.expr1(self.required(node, "operand")?, HIGHEST_PREC, 1)?;
        self.push("[");
        let mut indices = vec![
            node.child_by_field_name("start"),
            node.child_by_field_name("end"),
        ];
        if let Some(capacity) = node.child_by_field_name("capacity") {
            indices.push(Some(capacity));
        }
        let present = indices.iter().flatten().count();
        let has_binaries = indices
            .iter()
            .flatten()
            .any(|index| index.kind() == "binary_expression");
        let needs_blanks = depth <= 1 && present > 1 && has_binaries;

        for (i, index) in indices.iter().enumerate() {
            if i > 0 {
                if indices[i - 1].is_some() && needs_blanks {
                    self.push(" ");
                }
                self.push(":");
                if index.is_some() && needs_blanks {
                    self.push(" ");
                }
            }
            if let Some(index) = index {
                self.expr0(*index, depth + 1)?;
            }
        }
        self.push("]");
        Ok(())
    }

    fn literal_value(&mut self, node: Node) -> RenderResult {
        let elements = named_children(node);
        self.push("{");
        self.list(
            Some(start_row(node)),
            &elements,
            Some(end_row(node)),
            |p, element| p.expr0(element, 1),
        )?;
        self.push("}");
        Ok(())
    }

    fn channel_type(&mut self, node: Node) -> RenderResult {
        let receive_only = node.child(0).is_some_and(|first| first.kind() == "<-");
        if receive_only {
            self.push("<-chan ");
        } else if has_token(node, "<-") {
            self.push("chan<- ");
        } else {
            self.push("chan ");
        }
        self.expr(self.required(node, "value")?)
    }
}

/// Normalize number literal prefixes and exponents the way gofmt does.
pub fn normalize_number(literal: &str) -> String {
    if literal.len() < 2 {
        return literal.to_string();
    }
    let (prefix, rest) = literal.split_at(2);
    match prefix {
        "0X" => {
            let hex = format!("0x{}", rest);
            match hex.rfind('P') {
                Some(i) => format!("{}p{}", &hex[..i], &hex[i + 1..]),
                None => hex,
            }
        }
        "0x" => match literal.rfind('P') {
            Some(i) => format!("{}p{}", &literal[..i], &literal[i + 1..]),
            None => literal.to_string(),
        },
        "0O" => format!("0o{}", rest),
        "0B" => format!("0b{}", rest),
        "0o" | "0b" => literal.to_string(),
        _ => {
            if let Some(i) = literal.rfind('E') {
                return format!("{}e{}", &literal[..i], &literal[i + 1..]);
            }
            if literal.ends_with('i') && !literal.contains(['.', 'e']) {
                let trimmed = literal.trim_start_matches(['0', '_']);
                if trimmed == "i" {
                    return "0i".to_string();
                }
                return trimmed.to_string();
            }
            literal.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decls::filter::{declarations, items};
    use crate::decls::parse::parse;
    use crate::decls::render::render;

    /// Render the value of `var x = <expr>`.
    fn render_value(expr: &str) -> String {
        let code = format!("package p\n\nvar x = {}\n", expr);
        let tree = parse("test.go", code.as_bytes()).unwrap();
        let decls = declarations(&tree);
        let items = items(&decls);
        let rendered = render(&tree, &items[0]).unwrap();
        rendered
            .strip_prefix("var x = ")
            .unwrap_or_else(|| panic!("unexpected rendering {:?}", rendered))
            .to_string()
    }

    #[test]
    fn test_binary_spacing_follows_precedence() {
        assert_eq!(render_value("a+b"), "a + b");
        assert_eq!(render_value("a + b * c"), "a + b*c");
        assert_eq!(render_value("(a+b)*c"), "(a + b) * c");
        assert_eq!(render_value("1<<10"), "1 << 10");
        assert_eq!(render_value("x<<8 | y"), "x<<8 | y");
        assert_eq!(render_value("a&&b || c"), "a && b || c");
    }

    #[test]
    fn test_binary_spacing_inside_calls() {
        assert_eq!(render_value("f(a+b)"), "f(a + b)");
        assert_eq!(render_value("f(a+b, c)"), "f(a+b, c)");
        assert_eq!(render_value("xs[i+1]"), "xs[i+1]");
    }

    #[test]
    fn test_operator_gluing_is_avoided() {
        assert_eq!(render_value("a - -b"), "a - -b");
        assert_eq!(render_value("a / *p"), "a / *p");
    }

    #[test]
    fn test_unary_selector_call() {
        assert_eq!(render_value("&Config{Name: \"x\"}"), "&Config{Name: \"x\"}");
        assert_eq!(render_value("fmt.Sprintf(\"%d\",  n)"), "fmt.Sprintf(\"%d\", n)");
        assert_eq!(render_value("append(xs, ys...)"), "append(xs, ys...)");
        assert_eq!(render_value("v.(fmt.Stringer)"), "v.(fmt.Stringer)");
    }

    #[test]
    fn test_slice_expressions() {
        assert_eq!(render_value("s[1:n]"), "s[1:n]");
        assert_eq!(render_value("s[a+1 : b]"), "s[a+1 : b]");
        assert_eq!(render_value("s[:]"), "s[:]");
    }

    #[test]
    fn test_composite_literals() {
        assert_eq!(render_value("[]int{1,2,3}"), "[]int{1, 2, 3}");
        assert_eq!(render_value("map[string]int{\"a\":1}"), "map[string]int{\"a\": 1}");
        assert_eq!(
            render_value("[]string{\n\"a\",\n\"b\",\n}"),
            "[]string{\n\t\"a\",\n\t\"b\",\n}"
        );
    }

    #[test]
    fn test_number_normalization() {
        assert_eq!(normalize_number("0X1F"), "0x1F");
        assert_eq!(normalize_number("0x1P-2"), "0x1p-2");
        assert_eq!(normalize_number("0B101"), "0b101");
        assert_eq!(normalize_number("0O17"), "0o17");
        assert_eq!(normalize_number("1E6"), "1e6");
        assert_eq!(normalize_number("007i"), "7i");
        assert_eq!(normalize_number("00i"), "0i");
        assert_eq!(normalize_number("1.5i"), "1.5i");
        assert_eq!(normalize_number("42"), "42");
        assert_eq!(render_value("0XFF"), "0xFF");
    }
}
