//! Canonical rendering of declaration items.
//!
//! Re-prints tree-sitter nodes the way gofmt prints the equivalent `go/ast` node in
//! isolation: single blanks between tokens, tabs for indentation, block bodies always
//! opened on their own line. Expression layout lives in [`crate::decls::expr`].

use tree_sitter::Node;

use crate::decls::common::{
    all_children, end_row, field_children, get_node_text, has_token, named_children, start_row,
    statements,
};
use crate::decls::filter::{DeclarationItem, Keyword};
use crate::decls::parse::SyntaxTree;
use crate::error::Error;

pub(crate) type RenderResult = Result<(), Error>;

/// Largest element gofmt keeps on the same line as the braces of a struct or interface.
const MAX_ONE_LINE_FIELD_SIZE: usize = 30;

// ============ Main Entry Point ============

/// Render one declaration item, keyword prefix included.
pub fn render(tree: &SyntaxTree, item: &DeclarationItem) -> Result<String, Error> {
    let mut printer = Printer::new(tree.name(), tree.source());
    match *item {
        DeclarationItem::Spec { keyword, node } => {
            printer.push(keyword.prefix());
            match keyword {
                Keyword::Var | Keyword::Const => printer.value_spec(node)?,
                Keyword::Type => printer.type_spec(node)?,
            }
        }
        DeclarationItem::Function(node) => printer.func_decl(node)?,
    }
    tracing::trace!(kind = item.node().kind(), rendered = %printer.out, "rendered declaration");
    Ok(printer.out)
}

// ============ Printer ============

pub(crate) struct Printer<'s> {
    name: &'s str,
    source: &'s [u8],
    pub(crate) out: String,
    pub(crate) indent: usize,
}

impl<'s> Printer<'s> {
    pub(crate) fn new(name: &'s str, source: &'s [u8]) -> Self {
        Self {
            name,
            source,
            out: String::new(),
            indent: 0,
        }
    }

    /// A fresh printer over the same source, for measuring a node's one-line size.
    pub(crate) fn scratch(&self) -> Printer<'s> {
        Printer::new(self.name, self.source)
    }

    pub(crate) fn push(&mut self, text: &str) {
        self.out.push_str(text);
    }

    pub(crate) fn text(&mut self, node: Node) {
        let text = get_node_text(node, self.source);
        self.out.push_str(text);
    }

    pub(crate) fn node_text(&self, node: Node) -> &'s str {
        get_node_text(node, self.source)
    }

    pub(crate) fn newline(&mut self) {
        self.out.push('\n');
        for _ in 0..self.indent {
            self.out.push('\t');
        }
    }

    pub(crate) fn unsupported(&self, node: Node, reason: &'static str) -> Error {
        let point = node.start_position();
        Error::Render {
            name: self.name.to_string(),
            line: point.row + 1,
            column: point.column + 1,
            kind: node.kind(),
            reason,
        }
    }

    pub(crate) fn required<'t>(&self, node: Node<'t>, field: &'static str) -> Result<Node<'t>, Error> {
        node.child_by_field_name(field)
            .ok_or_else(|| self.unsupported(node, field))
    }

    /// Print a delimited list, keeping source line breaks the way gofmt's exprList does:
    /// an element that starts on a later line than the previous one ended goes on a new,
    /// indented line, and a closing token on a later line gets a trailing comma.
    pub(crate) fn list<'t, F>(
        &mut self,
        open_row: Option<usize>,
        items: &[Node<'t>],
        close_row: Option<usize>,
        mut each: F,
    ) -> RenderResult
    where
        F: FnMut(&mut Self, Node<'t>) -> RenderResult,
    {
        let mut prev_row = open_row;
        let mut indented = false;
        for (i, item) in items.iter().enumerate() {
            let needs_break = prev_row.is_some_and(|prev| prev < start_row(*item));
            if i > 0 {
                self.push(",");
            }
            if needs_break {
                if !indented {
                    self.indent += 1;
                    indented = true;
                }
                self.newline();
            } else if i > 0 {
                self.push(" ");
            }
            each(self, *item)?;
            prev_row = Some(end_row(*item));
        }
        if indented {
            self.indent -= 1;
        }
        if let (Some(prev), Some(close)) = (prev_row, close_row) {
            if !items.is_empty() && prev < close {
                self.push(",");
                self.newline();
            }
        }
        Ok(())
    }

    fn ident_list(&mut self, names: &[Node]) {
        for (i, name) in names.iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            self.text(*name);
        }
    }

    // ============ Specs ============

    pub(crate) fn value_spec(&mut self, node: Node) -> RenderResult {
        let names = field_children(node, "name");
        if names.is_empty() {
            return Err(self.unsupported(node, "name"));
        }
        self.ident_list(&names);
        if let Some(ty) = node.child_by_field_name("type") {
            self.push(" ");
            self.expr(ty)?;
        }
        if let Some(values) = node.child_by_field_name("value") {
            self.push(" = ");
            let values = named_children(values);
            self.list(None, &values, None, |p, value| p.expr(value))?;
        }
        Ok(())
    }

    pub(crate) fn type_spec(&mut self, node: Node) -> RenderResult {
        let name = self.required(node, "name")?;
        self.text(name);
        if let Some(params) = node.child_by_field_name("type_parameters") {
            self.type_parameters(params, true)?;
        }
        self.push(" ");
        if node.kind() == "type_alias" {
            self.push("= ");
        }
        let ty = self.required(node, "type")?;
        self.expr(ty)
    }

    // ============ Functions ============

    pub(crate) fn func_decl(&mut self, node: Node) -> RenderResult {
        self.push("func ");
        if let Some(receiver) = node.child_by_field_name("receiver") {
            self.parameters(receiver)?;
            self.push(" ");
        }
        let name = self.required(node, "name")?;
        self.text(name);
        self.signature(node)?;
        if let Some(body) = node.child_by_field_name("body") {
            self.push(" ");
            self.block(body)?;
        }
        Ok(())
    }

    /// Type parameters, parameters and results of a function, method, literal or type.
    pub(crate) fn signature(&mut self, node: Node) -> RenderResult {
        if let Some(params) = node.child_by_field_name("type_parameters") {
            self.type_parameters(params, false)?;
        }
        match node.child_by_field_name("parameters") {
            Some(params) => self.parameters(params)?,
            None => self.push("()"),
        }
        if let Some(result) = node.child_by_field_name("result") {
            self.result(result)?;
        }
        Ok(())
    }

    fn result(&mut self, result: Node) -> RenderResult {
        if result.kind() != "parameter_list" {
            self.push(" ");
            return self.expr(strip_parens(result));
        }
        let params = named_children(result);
        match params.as_slice() {
            [] => Ok(()),
            [single]
                if single.kind() == "parameter_declaration"
                    && field_children(*single, "name").is_empty() =>
            {
                let ty = self.required(*single, "type")?;
                self.push(" ");
                self.expr(strip_parens(ty))
            }
            _ => {
                self.push(" ");
                self.parameters(result)
            }
        }
    }

    pub(crate) fn parameters(&mut self, list: Node) -> RenderResult {
        let params = named_children(list);
        self.push("(");
        self.list(
            Some(start_row(list)),
            &params,
            Some(end_row(list)),
            |p, param| p.parameter(param),
        )?;
        self.push(")");
        Ok(())
    }

    fn parameter(&mut self, param: Node) -> RenderResult {
        let names = field_children(param, "name");
        self.ident_list(&names);
        if param.kind() == "variadic_parameter_declaration" {
            if !names.is_empty() {
                self.push(" ");
            }
            self.push("...");
        } else if !names.is_empty() {
            self.push(" ");
        }
        let ty = self.required(param, "type")?;
        self.expr(strip_parens(ty))
    }

    /// `in_type_decl` marks the list of a type declaration, the only place where
    /// `[P *C]` could be read as an array length.
    fn type_parameters(&mut self, list: Node, in_type_decl: bool) -> RenderResult {
        let params = named_children(list);
        self.push("[");
        self.list(
            Some(start_row(list)),
            &params,
            Some(end_row(list)),
            |p, param| {
                let names = field_children(param, "name");
                p.ident_list(&names);
                p.push(" ");
                let constraint = p.required(param, "type")?;
                p.expr(constraint)
            },
        )?;
        if in_type_decl && needs_type_parameter_comma(&params) && !self.out.ends_with(",\n") {
            self.push(",");
        }
        self.push("]");
        Ok(())
    }

    // ============ Composite Types ============

    pub(crate) fn struct_type(&mut self, node: Node) -> RenderResult {
        let Some(list) = named_children(node)
            .into_iter()
            .find(|child| child.kind() == "field_declaration_list")
        else {
            return Err(self.unsupported(node, "field list"));
        };
        let fields = named_children(list);
        let one_line = start_row(list) == end_row(list);
        self.push("struct");

        if one_line && fields.is_empty() {
            self.push("{}");
            return Ok(());
        }
        if let [field] = fields.as_slice() {
            if one_line && field.child_by_field_name("tag").is_none() && self.fits_one_line(*field)? {
                self.push("{ ");
                self.field(*field)?;
                self.push(" }");
                return Ok(());
            }
        }
        self.push(" {");
        self.indent += 1;
        for field in &fields {
            self.newline();
            self.field(*field)?;
        }
        self.indent -= 1;
        self.newline();
        self.push("}");
        Ok(())
    }

    fn field(&mut self, field: Node) -> RenderResult {
        let names = field_children(field, "name");
        let ty = self.required(field, "type")?;
        if names.is_empty() {
            if has_token(field, "*") {
                self.push("*");
            }
        } else {
            self.ident_list(&names);
            self.push(" ");
        }
        self.expr(ty)?;
        if let Some(tag) = field.child_by_field_name("tag") {
            self.push(" ");
            self.text(tag);
        }
        Ok(())
    }

    pub(crate) fn interface_type(&mut self, node: Node) -> RenderResult {
        let elems = named_children(node);
        let tokens = all_children(node);
        let open = tokens.iter().find(|t| !t.is_named() && t.kind() == "{");
        let close = tokens.iter().rev().find(|t| !t.is_named() && t.kind() == "}");
        let one_line = match (open, close) {
            (Some(open), Some(close)) => start_row(*open) == start_row(*close),
            _ => true,
        };
        self.push("interface");

        if one_line && elems.is_empty() {
            self.push("{}");
            return Ok(());
        }
        if let [elem] = elems.as_slice() {
            if one_line && self.fits_one_line(*elem)? {
                self.push("{ ");
                self.interface_elem(*elem)?;
                self.push(" }");
                return Ok(());
            }
        }
        self.push(" {");
        self.indent += 1;
        for elem in &elems {
            self.newline();
            self.interface_elem(*elem)?;
        }
        self.indent -= 1;
        self.newline();
        self.push("}");
        Ok(())
    }

    fn interface_elem(&mut self, elem: Node) -> RenderResult {
        match elem.kind() {
            "method_elem" | "method_spec" => {
                let name = self.required(elem, "name")?;
                self.text(name);
                self.signature(elem)
            }
            _ => self.expr(elem),
        }
    }

    /// gofmt's isOneLineFieldList size check: the element's type (a method counts as its
    /// `func` type) plus one blank for names must stay within the limit.
    fn fits_one_line(&self, elem: Node) -> Result<bool, Error> {
        let mut scratch = self.scratch();
        let names_size = match elem.kind() {
            "field_declaration" => {
                if has_token(elem, "*") && field_children(elem, "name").is_empty() {
                    scratch.push("*");
                }
                scratch.expr(self.required(elem, "type")?)?;
                usize::from(!field_children(elem, "name").is_empty())
            }
            "method_elem" | "method_spec" => {
                scratch.push("func");
                scratch.signature(elem)?;
                1
            }
            _ => {
                scratch.expr(elem)?;
                0
            }
        };
        if scratch.out.contains('\n') {
            return Ok(false);
        }
        Ok(names_size + scratch.out.len() <= MAX_ONE_LINE_FIELD_SIZE)
    }

    // ============ Statements ============

    /// A block body; always printed across lines, even when empty.
    pub(crate) fn block(&mut self, block: Node) -> RenderResult {
        self.push("{");
        self.statement_lines(statements(named_children(block)))?;
        self.newline();
        self.push("}");
        Ok(())
    }

    fn statement_lines(&mut self, stmts: Vec<Node>) -> RenderResult {
        self.indent += 1;
        for stmt in stmts {
            self.newline();
            self.stmt(stmt)?;
        }
        self.indent -= 1;
        Ok(())
    }

    fn stmt(&mut self, node: Node) -> RenderResult {
        match node.kind() {
            "expression_statement" => {
                let inner = self.first_named(node)?;
                self.expr(inner)
            }
            "short_var_declaration" | "assignment_statement" => self.assignment(node),
            "inc_statement" | "dec_statement" => {
                let inner = self.first_named(node)?;
                self.expr(inner)?;
                self.push(if node.kind() == "inc_statement" { "++" } else { "--" });
                Ok(())
            }
            "send_statement" => {
                self.expr(self.required(node, "channel")?)?;
                self.push(" <- ");
                self.expr(self.required(node, "value")?)
            }
            "receive_statement" => {
                if let Some(left) = node.child_by_field_name("left") {
                    self.expr_list(left, 1)?;
                    self.push(if has_token(node, ":=") { " := " } else { " = " });
                }
                self.expr(self.required(node, "right")?)
            }
            "return_statement" => {
                self.push("return");
                if let Some(values) = named_children(node).into_iter().next() {
                    self.push(" ");
                    self.expr_list(values, 1)?;
                }
                Ok(())
            }
            "go_statement" | "defer_statement" => {
                self.push(if node.kind() == "go_statement" { "go " } else { "defer " });
                let call = self.first_named(node)?;
                self.expr(call)
            }
            "if_statement" => self.if_stmt(node),
            "for_statement" => self.for_stmt(node),
            "expression_switch_statement" | "type_switch_statement" | "select_statement" => {
                self.switch_stmt(node)
            }
            "block" => self.block(node),
            "labeled_statement" => {
                let label = self.required(node, "label")?;
                self.text(label);
                self.push(":");
                let body: Vec<Node> = named_children(node)
                    .into_iter()
                    .filter(|child| child.id() != label.id())
                    .collect();
                for stmt in statements(body) {
                    self.newline();
                    self.stmt(stmt)?;
                }
                Ok(())
            }
            "break_statement" | "continue_statement" | "goto_statement" => {
                let keyword = match node.kind() {
                    "break_statement" => "break",
                    "continue_statement" => "continue",
                    _ => "goto",
                };
                self.push(keyword);
                if let Some(label) = named_children(node).into_iter().next() {
                    self.push(" ");
                    self.text(label);
                }
                Ok(())
            }
            "fallthrough_statement" => {
                self.push("fallthrough");
                Ok(())
            }
            "var_declaration" | "const_declaration" | "type_declaration" => self.decl_stmt(node),
            _ => self.tokens(node),
        }
    }

    fn first_named<'t>(&self, node: Node<'t>) -> Result<Node<'t>, Error> {
        named_children(node)
            .into_iter()
            .next()
            .ok_or_else(|| self.unsupported(node, "operand"))
    }

    fn expr_list(&mut self, list: Node, depth: usize) -> RenderResult {
        if list.kind() != "expression_list" {
            return self.expr0(list, depth);
        }
        let items = named_children(list);
        self.list(None, &items, None, |p, item| p.expr0(item, depth))
    }

    fn assignment(&mut self, node: Node) -> RenderResult {
        let left = self.required(node, "left")?;
        let right = self.required(node, "right")?;
        let multi = |list: Node| list.kind() == "expression_list" && named_children(list).len() > 1;
        let depth = if multi(left) && multi(right) { 2 } else { 1 };
        self.expr_list(left, depth)?;
        let operator = match node.child_by_field_name("operator") {
            Some(op) => self.node_text(op),
            None if node.kind() == "short_var_declaration" => ":=",
            None => "=",
        };
        self.push(" ");
        self.push(operator);
        self.push(" ");
        self.expr_list(right, depth)
    }

    fn if_stmt(&mut self, node: Node) -> RenderResult {
        self.push("if ");
        if let Some(init) = node.child_by_field_name("initializer") {
            self.stmt(init)?;
            self.push("; ");
        }
        self.expr(self.required(node, "condition")?)?;
        self.push(" ");
        self.block(self.required(node, "consequence")?)?;
        if let Some(alternative) = node.child_by_field_name("alternative") {
            self.push(" else ");
            if alternative.kind() == "if_statement" {
                self.if_stmt(alternative)?;
            } else {
                self.block(alternative)?;
            }
        }
        Ok(())
    }

    fn for_stmt(&mut self, node: Node) -> RenderResult {
        let body = self.required(node, "body")?;
        self.push("for");
        let header = named_children(node)
            .into_iter()
            .find(|child| child.id() != body.id());
        if let Some(header) = header {
            self.push(" ");
            match header.kind() {
                "for_clause" => self.for_clause(header)?,
                "range_clause" => {
                    if let Some(left) = header.child_by_field_name("left") {
                        self.expr_list(left, 1)?;
                        self.push(if has_token(header, ":=") { " := " } else { " = " });
                    }
                    self.push("range ");
                    self.expr(self.required(header, "right")?)?;
                }
                _ => self.expr(header)?,
            }
        }
        self.push(" ");
        self.block(body)
    }

    fn for_clause(&mut self, clause: Node) -> RenderResult {
        let init = clause.child_by_field_name("initializer");
        let condition = clause.child_by_field_name("condition");
        let update = clause.child_by_field_name("update");
        if init.is_none() && update.is_none() {
            if let Some(condition) = condition {
                return self.expr(condition);
            }
        }
        if let Some(init) = init {
            self.stmt(init)?;
        }
        self.push("; ");
        if let Some(condition) = condition {
            self.expr(condition)?;
        }
        self.push(";");
        if let Some(update) = update {
            self.push(" ");
            self.stmt(update)?;
        }
        Ok(())
    }

    fn switch_stmt(&mut self, node: Node) -> RenderResult {
        let is_select = node.kind() == "select_statement";
        self.push(if is_select { "select" } else { "switch" });
        if let Some(init) = node.child_by_field_name("initializer") {
            self.push(" ");
            self.stmt(init)?;
            self.push(";");
        }
        if node.kind() == "type_switch_statement" {
            self.push(" ");
            if let Some(alias) = node.child_by_field_name("alias") {
                self.expr_list(alias, 1)?;
                self.push(" := ");
            }
            self.expr1(self.required(node, "value")?, crate::decls::expr::HIGHEST_PREC, 1)?;
            self.push(".(type)");
        } else if let Some(value) = node.child_by_field_name("value") {
            self.push(" ");
            self.expr(value)?;
        }
        self.push(" {");
        let cases: Vec<Node> = named_children(node)
            .into_iter()
            .filter(|child| child.kind().ends_with("_case"))
            .collect();
        for case in cases {
            self.newline();
            self.case_clause(case)?;
        }
        self.newline();
        self.push("}");
        Ok(())
    }

    fn case_clause(&mut self, case: Node) -> RenderResult {
        let mut header_ids = Vec::new();
        match case.kind() {
            "default_case" => self.push("default"),
            "communication_case" => {
                self.push("case ");
                let comm = self.required(case, "communication")?;
                header_ids.push(comm.id());
                self.stmt(comm)?;
            }
            "type_case" => {
                self.push("case ");
                let types = field_children(case, "type");
                header_ids.extend(types.iter().map(|t| t.id()));
                self.list(None, &types, None, |p, ty| p.expr(ty))?;
            }
            _ => {
                self.push("case ");
                let value = self.required(case, "value")?;
                header_ids.push(value.id());
                self.expr_list(value, 1)?;
            }
        }
        self.push(":");
        let body: Vec<Node> = named_children(case)
            .into_iter()
            .filter(|child| !header_ids.contains(&child.id()))
            .collect();
        self.statement_lines(statements(body))
    }

    /// `var`, `const` and `type` declarations inside a function body.
    fn decl_stmt(&mut self, node: Node) -> RenderResult {
        let keyword = match node.kind() {
            "var_declaration" => "var",
            "const_declaration" => "const",
            _ => "type",
        };
        let mut grouped = has_token(node, "(");
        let mut specs = Vec::new();
        for child in named_children(node) {
            if child.kind().ends_with("_list") {
                grouped = true;
                specs.extend(named_children(child));
            } else {
                specs.push(child);
            }
        }
        self.push(keyword);
        if !grouped {
            if let Some(spec) = specs.first() {
                self.push(" ");
                self.spec(*spec)?;
            }
            return Ok(());
        }
        self.push(" (");
        self.indent += 1;
        for spec in &specs {
            self.newline();
            self.spec(*spec)?;
        }
        self.indent -= 1;
        self.newline();
        self.push(")");
        Ok(())
    }

    fn spec(&mut self, spec: Node) -> RenderResult {
        match spec.kind() {
            "type_spec" | "type_alias" => self.type_spec(spec),
            _ => self.value_spec(spec),
        }
    }

    // ============ Fallback ============

    /// Deterministic token join for nodes without a dedicated layout.
    pub(crate) fn tokens(&mut self, node: Node) -> RenderResult {
        if node.is_error() || node.is_missing() {
            return Err(self.unsupported(node, "malformed node"));
        }
        if node.child_count() == 0 || is_literal_kind(node.kind()) {
            let text = self.node_text(node);
            self.word(text);
            return Ok(());
        }
        for child in all_children(node) {
            self.tokens(child)?;
        }
        Ok(())
    }

    fn word(&mut self, token: &str) {
        let prev = self.out.chars().last();
        let next = token.chars().next();
        if let (Some(a), Some(b)) = (prev, next) {
            let joined_words = is_word_char(a) && is_word_char(b);
            if joined_words || a == ',' || a == ';' {
                self.push(" ");
            }
        }
        self.push(token);
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '"' || c == '`' || c == '\''
}

pub(crate) fn is_literal_kind(kind: &str) -> bool {
    matches!(
        kind,
        "interpreted_string_literal" | "raw_string_literal" | "rune_literal"
    )
}

/// gofmt drops redundant parentheses around parameter and result types.
pub(crate) fn strip_parens(mut node: Node) -> Node {
    while node.kind() == "parenthesized_type" {
        match named_children(node).into_iter().next() {
            Some(inner) => node = inner,
            None => break,
        }
    }
    node
}

/// `[P *C]` and `[P *C | D]` would read as an array length, so gofmt writes
/// `[P *C,]`. Only a single name with a pointer-led constraint whose terms are not
/// themselves type elements needs the comma.
fn needs_type_parameter_comma(params: &[Node]) -> bool {
    let [single] = params else {
        return false;
    };
    if field_children(*single, "name").len() != 1 {
        return false;
    }
    let Some(constraint) = single.child_by_field_name("type") else {
        return false;
    };
    let terms = constraint_terms(strip_parens(constraint));
    match terms.split_first() {
        Some((first, rest)) => {
            let first = strip_parens(*first);
            first.kind() == "pointer_type"
                && named_children(first)
                    .into_iter()
                    .next()
                    .is_some_and(|pointee| !is_type_elem(pointee))
                && rest.iter().all(|term| !is_type_elem(*term))
        }
        None => false,
    }
}

/// Types that can only appear in type position, never as a value operand.
fn is_type_elem(node: Node) -> bool {
    matches!(
        strip_parens(node).kind(),
        "array_type"
            | "implicit_length_array_type"
            | "slice_type"
            | "struct_type"
            | "function_type"
            | "interface_type"
            | "map_type"
            | "channel_type"
            | "negated_type"
    )
}

/// The `|`-separated terms of a type constraint.
pub(crate) fn constraint_terms(node: Node) -> Vec<Node> {
    match node.kind() {
        "type_constraint" | "type_elem" | "constraint_elem" => named_children(node),
        _ => vec![node],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decls::filter::{declarations, items};
    use crate::decls::parse::parse;

    /// Render every item of a Go snippet (the package clause is added here).
    fn render_all(body: &str) -> Vec<String> {
        let code = format!("package p\n\n{}\n", body);
        let tree = parse("test.go", code.as_bytes()).unwrap();
        let decls = declarations(&tree);
        items(&decls)
            .iter()
            .map(|item| render(&tree, item).unwrap())
            .collect()
    }

    fn render_one(body: &str) -> String {
        let mut all = render_all(body);
        assert_eq!(all.len(), 1, "expected one item, got {:?}", all);
        all.remove(0)
    }

    #[test]
    fn test_value_specs() {
        assert_eq!(render_one("var  foo   =   \"bar\""), "var foo = \"bar\"");
        assert_eq!(render_one("var x, y int = 1, 2"), "var x, y int = 1, 2");
        assert_eq!(render_one("var z  []string"), "var z []string");
        assert_eq!(render_one("const Pi float64 = 3.14"), "const Pi float64 = 3.14");
    }

    #[test]
    fn test_iota_group_specs() {
        let rendered = render_all("const (\n\tA = iota\n\tB\n\tC\n)");
        assert_eq!(rendered, vec!["const A = iota", "const B", "const C"]);
    }

    #[test]
    fn test_function_body_always_breaks() {
        assert_eq!(render_one("func main() {}"), "func main() {\n}");
        assert_eq!(
            render_one("func add(a int, b int) int { return a+b }"),
            "func add(a int, b int) int {\n\treturn a + b\n}"
        );
    }

    #[test]
    fn test_function_without_body() {
        assert_eq!(render_one("func now() int64"), "func now() int64");
    }

    #[test]
    fn test_method_and_results() {
        assert_eq!(
            render_one("func (s *Server) Start(ctx context.Context) (err error) {\n}"),
            "func (s *Server) Start(ctx context.Context) (err error) {\n}"
        );
        assert_eq!(render_one("func f() (int) {\n}"), "func f() int {\n}");
        assert_eq!(render_one("func f() (int, error)"), "func f() (int, error)");
        assert_eq!(render_one("func f(xs ...string)"), "func f(xs ...string)");
    }

    #[test]
    fn test_generic_function() {
        assert_eq!(
            render_one("func Map[K comparable, V any](m map[K]V) []V {\n}"),
            "func Map[K comparable, V any](m map[K]V) []V {\n}"
        );
    }

    #[test]
    fn test_pointer_constraint_comma() {
        // Function type parameters are never ambiguous.
        assert_eq!(render_one("func F[T *int]() {\n}"), "func F[T *int]() {\n}");
        assert_eq!(render_one("type P[T *C,] struct{}"), "type P[T *C,] struct{}");
        assert_eq!(render_one("type P[T *C | D,] struct{}"), "type P[T *C | D,] struct{}");
        assert_eq!(render_one("type P[T *C, U any] struct{}"), "type P[T *C, U any] struct{}");
        assert_eq!(render_one("type P[T *[]int] struct{}"), "type P[T *[]int] struct{}");
    }

    #[test]
    fn test_ambiguous_type_parameters_stay_array_length() {
        // Without the comma Go reads `[T *C]` as an array length expression.
        assert_eq!(render_one("type P[T *C] struct{}"), "type P [T * C]struct{}");
        assert_eq!(render_one("type P[T *C | D] struct{}"), "type P [T*C | D]struct{}");
    }

    #[test]
    fn test_multiline_parameters_keep_breaks() {
        let rendered = render_one("func f(\n\ta int,\n\tb string,\n) {\n}");
        assert_eq!(rendered, "func f(\n\ta int,\n\tb string,\n) {\n}");
    }

    #[test]
    fn test_type_specs() {
        assert_eq!(render_one("type ID int"), "type ID int");
        assert_eq!(render_one("type Alias = ID"), "type Alias = ID");
        assert_eq!(render_one("type Empty struct{}"), "type Empty struct{}");
        assert_eq!(render_one("type Any interface{}"), "type Any interface{}");
        assert_eq!(render_one("type Small struct{ A int }"), "type Small struct{ A int }");
        assert_eq!(
            render_one("type Point struct {\n\tX, Y int\n}"),
            "type Point struct {\n\tX, Y int\n}"
        );
        assert_eq!(
            render_one("type List[T any] struct {\n\thead *T\n}"),
            "type List[T any] struct {\n\thead *T\n}"
        );
    }

    #[test]
    fn test_interface_types() {
        assert_eq!(
            render_one("type Reader interface {\n\tRead(p []byte) (n int, err error)\n}"),
            "type Reader interface {\n\tRead(p []byte) (n int, err error)\n}"
        );
        assert_eq!(
            render_one("type Number interface {\n\t~int | ~float64\n}"),
            "type Number interface {\n\t~int | ~float64\n}"
        );
    }

    #[test]
    fn test_channel_and_func_types() {
        assert_eq!(render_one("var c chan<- int"), "var c chan<- int");
        assert_eq!(render_one("var c <-chan int"), "var c <-chan int");
        assert_eq!(render_one("var f func(int) (string, error)"), "var f func(int) (string, error)");
        assert_eq!(render_one("var m map[string][]int"), "var m map[string][]int");
    }

    #[test]
    fn test_func_literal_value() {
        assert_eq!(
            render_one("var f = func(a string) (b string, c error) {\n}"),
            "var f = func(a string) (b string, c error) {\n}"
        );
    }

    #[test]
    fn test_statements_render_deterministically() {
        let code = "func run(xs []int) {\n\tfor i, x := range xs {\n\t\tif x > 0 {\n\t\t\tcontinue\n\t\t}\n\t\t_ = i\n\t}\n}";
        let first = render_one(code);
        let second = render_one(code);
        assert_eq!(first, second);
        assert!(first.starts_with("func run(xs []int) {\n"));
        assert!(first.contains("for i, x := range xs {"));
    }
}
