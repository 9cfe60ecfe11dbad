//! Import extraction from a parsed AST
//!
//! Walks the whole tree, so imports nested in functions, classes, and
//! conditional branches are found as well as top-level ones. Records are
//! emitted in source order; duplicate statements produce duplicate records.

use crate::models::record::{ImportKind, ImportRecord};
use oxc_ast::ast::*;
use oxc_ast_visit::{walk, Visit};
use oxc_span::Span;

/// Extract every outbound module reference from a parsed program
pub fn extract_imports(program: &Program<'_>, source_text: &str) -> Vec<ImportRecord> {
    let mut collector = ImportCollector::new(source_text);
    collector.visit_program(program);
    collector.finish()
}

/// Visitor collecting import records with their source offsets
struct ImportCollector {
    /// Byte offset of each line start, for 1-indexed line lookup
    line_starts: Vec<usize>,
    records: Vec<(u32, ImportRecord)>,
}

impl ImportCollector {
    fn new(source_text: &str) -> Self {
        let mut line_starts = vec![0usize];
        for (idx, byte) in source_text.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(idx + 1);
            }
        }
        Self {
            line_starts,
            records: Vec::new(),
        }
    }

    fn line_of(&self, span: Span) -> usize {
        let offset = span.start as usize;
        self.line_starts.partition_point(|&start| start <= offset)
    }

    fn push(&mut self, kind: ImportKind, source: &str, specifiers: Vec<String>, span: Span) {
        // Records with an empty specifier are dropped silently
        if source.is_empty() {
            return;
        }
        let record = ImportRecord {
            source: source.to_string(),
            kind,
            specifiers,
            line: self.line_of(span),
        };
        self.records.push((span.start, record));
    }

    fn finish(mut self) -> Vec<ImportRecord> {
        self.records.sort_by_key(|(offset, _)| *offset);
        self.records.into_iter().map(|(_, record)| record).collect()
    }
}

impl<'a> Visit<'a> for ImportCollector {
    fn visit_import_declaration(&mut self, decl: &ImportDeclaration<'a>) {
        let mut specifiers = Vec::new();
        if let Some(import_specifiers) = &decl.specifiers {
            for specifier in import_specifiers {
                match specifier {
                    ImportDeclarationSpecifier::ImportSpecifier(spec) => {
                        specifiers.push(spec.local.name.to_string());
                    }
                    ImportDeclarationSpecifier::ImportDefaultSpecifier(spec) => {
                        specifiers.push(spec.local.name.to_string());
                    }
                    ImportDeclarationSpecifier::ImportNamespaceSpecifier(spec) => {
                        specifiers.push(format!("* as {}", spec.local.name));
                    }
                }
            }
        }
        // A side-effect import has no clause but still yields a record
        self.push(
            ImportKind::StaticEsm,
            decl.source.value.as_str(),
            specifiers,
            decl.span,
        );
        walk::walk_import_declaration(self, decl);
    }

    fn visit_import_expression(&mut self, expr: &ImportExpression<'a>) {
        // Interpolated template arguments cannot be resolved and are skipped
        if let Some(source) = string_argument(&expr.source) {
            self.push(ImportKind::DynamicEsm, &source, Vec::new(), expr.span);
        }
        walk::walk_import_expression(self, expr);
    }

    fn visit_variable_declarator(&mut self, decl: &VariableDeclarator<'a>) {
        if let Some(Expression::CallExpression(call)) = &decl.init {
            if let Some(source) = require_source(call) {
                let specifiers = binding_names(&decl.id.kind);
                self.push(ImportKind::CommonjsRequire, &source, specifiers, call.span);
                return;
            }
        }
        walk::walk_variable_declarator(self, decl);
    }

    fn visit_call_expression(&mut self, call: &CallExpression<'a>) {
        // A require outside a declarator introduces no bindings
        if let Some(source) = require_source(call) {
            self.push(ImportKind::CommonjsRequire, &source, Vec::new(), call.span);
        }
        walk::walk_call_expression(self, call);
    }

    fn visit_export_named_declaration(&mut self, decl: &ExportNamedDeclaration<'a>) {
        if let Some(source) = &decl.source {
            let specifiers = decl
                .specifiers
                .iter()
                .map(|specifier| specifier.exported.name().to_string())
                .collect();
            self.push(
                ImportKind::Reexport,
                source.value.as_str(),
                specifiers,
                decl.span,
            );
        }
        walk::walk_export_named_declaration(self, decl);
    }

    fn visit_export_all_declaration(&mut self, decl: &ExportAllDeclaration<'a>) {
        let mut specifiers = Vec::new();
        if let Some(exported) = &decl.exported {
            specifiers.push(exported.name().to_string());
        }
        specifiers.push("*".to_string());
        self.push(
            ImportKind::Reexport,
            decl.source.value.as_str(),
            specifiers,
            decl.span,
        );
        walk::walk_export_all_declaration(self, decl);
    }
}

/// The specifier of a `require(..)` call, if the callee and argument qualify
fn require_source(call: &CallExpression<'_>) -> Option<String> {
    let is_require = matches!(
        &call.callee,
        Expression::Identifier(ident) if ident.name == "require"
    );
    if !is_require {
        return None;
    }
    match call.arguments.first()? {
        Argument::StringLiteral(lit) => Some(lit.value.to_string()),
        Argument::TemplateLiteral(tpl) => template_value(tpl),
        _ => None,
    }
}

/// Plain string value of an expression, accepting interpolation-free templates
fn string_argument(expr: &Expression<'_>) -> Option<String> {
    match expr {
        Expression::StringLiteral(lit) => Some(lit.value.to_string()),
        Expression::TemplateLiteral(tpl) => template_value(tpl),
        _ => None,
    }
}

fn template_value(tpl: &TemplateLiteral<'_>) -> Option<String> {
    if !tpl.expressions.is_empty() || tpl.quasis.len() != 1 {
        return None;
    }
    tpl.quasis
        .first()
        .and_then(|quasi| quasi.value.cooked.as_ref())
        .map(|cooked| cooked.to_string())
}

/// Names bound by a declarator pattern: `x`, `{ a, b: c }`, `[d]`
fn binding_names(kind: &BindingPatternKind<'_>) -> Vec<String> {
    let mut names = Vec::new();
    collect_binding_names(kind, &mut names);
    names
}

fn collect_binding_names(kind: &BindingPatternKind<'_>, names: &mut Vec<String>) {
    match kind {
        BindingPatternKind::BindingIdentifier(ident) => {
            names.push(ident.name.to_string());
        }
        BindingPatternKind::ObjectPattern(pattern) => {
            // For renamed pairs `{ b: c }` the bound target `c` is recorded
            for property in &pattern.properties {
                collect_binding_names(&property.value.kind, names);
            }
        }
        BindingPatternKind::ArrayPattern(pattern) => {
            for element in pattern.elements.iter().flatten() {
                collect_binding_names(&element.kind, names);
            }
        }
        BindingPatternKind::AssignmentPattern(pattern) => {
            collect_binding_names(&pattern.left.kind, names);
        }
    }
}
