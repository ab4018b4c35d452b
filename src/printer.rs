//! Text rendering of the syntax tree
//!
//! Formatting decisions live here and nowhere else: four-space indentation,
//! `\n` line endings, double-quoted strings and parentheses inserted only
//! where TypeScript precedence requires them.

use crate::ast::*;

const INDENT: &str = "    ";

/// Render a whole file
pub fn print_file(file: &SourceFile) -> String {
    let mut printer = Printer::new();
    for stmt in &file.statements {
        printer.stmt(stmt);
    }
    printer.finish()
}

/// Render a single type expression on one indentation level
pub fn print_type(ty: &TypeNode) -> String {
    let mut printer = Printer::new();
    printer.type_node(ty);
    printer.finish()
}

#[derive(Debug, Default)]
pub struct Printer {
    output: String,
    indent: usize,
}

impl Printer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finish(self) -> String {
        self.output
    }

    fn write(&mut self, text: &str) {
        self.output.push_str(text);
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent {
            self.output.push_str(INDENT);
        }
    }

    fn write_string_literal(&mut self, value: &str) {
        self.output.push('"');
        for ch in value.chars() {
            match ch {
                '"' => self.output.push_str("\\\""),
                '\\' => self.output.push_str("\\\\"),
                '\n' => self.output.push_str("\\n"),
                _ => self.output.push(ch),
            }
        }
        self.output.push('"');
    }

    fn export(&mut self, export: bool) {
        if export {
            self.write("export ");
        }
    }

    // Statements

    pub fn stmt(&mut self, stmt: &Stmt) {
        self.write_indent();
        self.stmt_body(stmt);
        self.write("\n");
    }

    fn stmt_body(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Import { names, source } => {
                self.write("import { ");
                self.write(&names.join(", "));
                self.write(" } from ");
                self.write_string_literal(source);
                self.write(";");
            }
            Stmt::TypeAlias { export, name, params, ty } => {
                self.export(*export);
                self.write("type ");
                self.write(name);
                self.type_params(params);
                self.write(" = ");
                self.type_node(ty);
                self.write(";");
            }
            Stmt::Interface { export, name, members } => {
                self.export(*export);
                self.write("interface ");
                self.write(name);
                self.write(" ");
                self.members_block(members);
            }
            Stmt::Enum { export, name, members } => {
                self.export(*export);
                self.write("enum ");
                self.write(name);
                self.write(" {\n");
                self.indent += 1;
                for (index, (member, value)) in members.iter().enumerate() {
                    self.write_indent();
                    self.write(member);
                    self.write(" = ");
                    self.write_string_literal(value);
                    if index + 1 < members.len() {
                        self.write(",");
                    }
                    self.write("\n");
                }
                self.indent -= 1;
                self.write_indent();
                self.write("}");
            }
            Stmt::Const { export, name, ty, init } => {
                self.export(*export);
                self.write("const ");
                self.write(name);
                if let Some(ty) = ty {
                    self.write(": ");
                    self.type_node(ty);
                }
                self.write(" = ");
                self.expr(init);
                self.write(";");
            }
            Stmt::Assign { target, value } => {
                self.expr(target);
                self.write(" = ");
                self.expr(value);
                self.write(";");
            }
            Stmt::Return(expr) => {
                self.write("return ");
                self.expr(expr);
                self.write(";");
            }
            Stmt::DeclareGlobal(body) => {
                self.write("declare global ");
                self.block(body);
            }
            Stmt::Namespace { name, body } => {
                self.write("namespace ");
                self.write(name);
                self.write(" ");
                self.block(body);
            }
            Stmt::Commented { comment, stmt } => {
                self.write("/*");
                self.write(comment);
                self.write("*/ ");
                self.stmt_body(stmt);
            }
        }
    }

    fn block(&mut self, body: &[Stmt]) {
        self.write("{\n");
        self.indent += 1;
        for stmt in body {
            self.stmt(stmt);
        }
        self.indent -= 1;
        self.write_indent();
        self.write("}");
    }

    fn members_block(&mut self, members: &[PropertySignature]) {
        if members.is_empty() {
            self.write("{}");
            return;
        }
        self.write("{\n");
        self.indent += 1;
        for member in members {
            self.write_indent();
            match &member.name {
                PropertyName::Identifier(name) => self.write(name),
                PropertyName::Computed(name) => {
                    self.write("[");
                    self.write_string_literal(name);
                    self.write("]");
                }
            }
            if member.optional {
                self.write("?");
            }
            self.write(": ");
            self.type_node(&member.ty);
            self.write(";\n");
        }
        self.indent -= 1;
        self.write_indent();
        self.write("}");
    }

    fn type_params(&mut self, params: &[TypeParameter]) {
        if params.is_empty() {
            return;
        }
        self.write("<");
        for (index, param) in params.iter().enumerate() {
            if index > 0 {
                self.write(", ");
            }
            self.write(&param.name);
            if let Some(constraint) = &param.constraint {
                self.write(" extends ");
                self.type_node(constraint);
            }
        }
        self.write(">");
    }

    fn parameters(&mut self, params: &[Parameter]) {
        self.write("(");
        for (index, param) in params.iter().enumerate() {
            if index > 0 {
                self.write(", ");
            }
            self.write(&param.name);
            if let Some(ty) = &param.ty {
                self.write(": ");
                self.type_node(ty);
            }
        }
        self.write(")");
    }

    // Types

    pub fn type_node(&mut self, ty: &TypeNode) {
        match ty {
            TypeNode::Keyword(keyword) => self.write(keyword.as_str()),
            TypeNode::Null => self.write("null"),
            TypeNode::Reference { name, args } => {
                self.write(name);
                if !args.is_empty() {
                    self.write("<");
                    for (index, arg) in args.iter().enumerate() {
                        if index > 0 {
                            self.write(", ");
                        }
                        self.type_node(arg);
                    }
                    self.write(">");
                }
            }
            TypeNode::Query(name) => {
                self.write("typeof ");
                self.write(name);
            }
            TypeNode::Array(item) => {
                self.type_wrapped(item, needs_parens_in_array(item));
                self.write("[]");
            }
            TypeNode::Union(items) => self.type_list(items, " | "),
            TypeNode::Intersection(items) => self.type_list(items, " & "),
            TypeNode::Function { params, ret } => {
                self.parameters(params);
                self.write(" => ");
                self.type_node(ret);
            }
            TypeNode::Literal(members) => self.members_block(members),
            TypeNode::Conditional {
                check,
                extends,
                true_type,
                false_type,
            } => {
                self.type_wrapped(check, matches!(**check, TypeNode::Function { .. } | TypeNode::Conditional { .. }));
                self.write(" extends ");
                self.type_wrapped(extends, matches!(**extends, TypeNode::Conditional { .. }));
                self.write(" ? ");
                self.type_node(true_type);
                self.write(" : ");
                self.type_node(false_type);
            }
            TypeNode::Infer(name) => {
                self.write("infer ");
                self.write(name);
            }
        }
    }

    fn type_list(&mut self, items: &[TypeNode], separator: &str) {
        for (index, item) in items.iter().enumerate() {
            if index > 0 {
                self.write(separator);
            }
            self.type_wrapped(item, needs_parens_in_list(item));
        }
    }

    fn type_wrapped(&mut self, ty: &TypeNode, parens: bool) {
        if parens {
            self.write("(");
            self.type_node(ty);
            self.write(")");
        } else {
            self.type_node(ty);
        }
    }

    // Expressions

    pub fn expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Identifier(name) => self.write(name),
            Expr::Member { object, property } => {
                self.expr(object);
                self.write(".");
                self.write(property);
            }
            Expr::As { expr, ty } => {
                self.expr(expr);
                self.write(" as ");
                self.type_node(ty);
            }
            Expr::Arrow { params, ret, body } => {
                self.parameters(params);
                if let Some(ret) = ret {
                    self.write(": ");
                    self.type_node(ret);
                }
                self.write(" => ");
                self.block(body);
            }
            Expr::Jsx(element) => self.jsx(element),
        }
    }

    fn jsx(&mut self, element: &JsxElement) {
        let tag = format!("{}:{}", element.namespace, element.name);
        self.write("<");
        self.write(&tag);
        for attribute in &element.attributes {
            self.write(" ");
            self.write(&attribute.name);
            self.write("={");
            self.expr(&attribute.value);
            self.write("}");
        }
        self.write(">");
        for child in &element.children {
            self.write("{");
            self.expr(child);
            self.write("}");
        }
        self.write("</");
        self.write(&tag);
        self.write(">");
    }
}

/// Constituents of a union or intersection
fn needs_parens_in_list(ty: &TypeNode) -> bool {
    matches!(
        ty,
        TypeNode::Union(_) | TypeNode::Intersection(_) | TypeNode::Function { .. } | TypeNode::Conditional { .. }
    )
}

fn needs_parens_in_array(ty: &TypeNode) -> bool {
    matches!(
        ty,
        TypeNode::Union(_)
            | TypeNode::Intersection(_)
            | TypeNode::Function { .. }
            | TypeNode::Conditional { .. }
            | TypeNode::Query(_)
            | TypeNode::Infer(_)
    )
}
