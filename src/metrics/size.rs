//! File and function length checks.
//!
//! File length is the number of non-blank lines. Function length is the span
//! from the `fn` keyword to the closing brace of the body, so attributes and
//! doc comments above a function are not counted.

use serde::{Deserialize, Serialize};
use syn::visit::{self, Visit};
use syn::{ImplItemFn, ItemFn, ItemImpl, TraitItemFn};

use crate::config::SizeThresholds;
use crate::core::SizeViolation;

pub const RULE_NAME: &str = "size";

/// Line span of one function or method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionSpan {
    /// `name` for free functions, `Type::name` for methods
    pub name: String,
    pub start_line: usize,
    pub end_line: usize,
}

impl FunctionSpan {
    pub fn lines(&self) -> usize {
        self.end_line.saturating_sub(self.start_line) + 1
    }
}

/// Size facts for one source file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSize {
    pub file: String,
    pub line_count: usize,
    pub functions: Vec<FunctionSpan>,
}

pub fn count_non_empty_lines(source: &str) -> usize {
    source.lines().filter(|line| !line.trim().is_empty()).count()
}

#[derive(Default)]
struct FunctionSpanVisitor {
    impl_stack: Vec<Option<String>>,
    spans: Vec<FunctionSpan>,
}

impl FunctionSpanVisitor {
    fn record(&mut self, name: String, fn_token: &syn::token::Fn, block: &syn::Block) {
        let start_line = fn_token.span.start().line;
        let end_line = block.brace_token.span.close().end().line;
        self.spans.push(FunctionSpan {
            name,
            start_line,
            end_line,
        });
    }

    fn qualified(&self, name: String) -> String {
        match self.impl_stack.last() {
            Some(Some(owner)) => format!("{}::{}", owner, name),
            _ => name,
        }
    }
}

fn type_name(ty: &syn::Type) -> Option<String> {
    match ty {
        syn::Type::Path(type_path) => type_path
            .path
            .segments
            .last()
            .map(|segment| segment.ident.to_string()),
        _ => None,
    }
}

impl<'ast> Visit<'ast> for FunctionSpanVisitor {
    fn visit_item_fn(&mut self, node: &'ast ItemFn) {
        self.record(node.sig.ident.to_string(), &node.sig.fn_token, &node.block);
        visit::visit_item_fn(self, node);
    }

    fn visit_item_impl(&mut self, node: &'ast ItemImpl) {
        self.impl_stack.push(type_name(&node.self_ty));
        visit::visit_item_impl(self, node);
        self.impl_stack.pop();
    }

    fn visit_impl_item_fn(&mut self, node: &'ast ImplItemFn) {
        let name = self.qualified(node.sig.ident.to_string());
        self.record(name, &node.sig.fn_token, &node.block);
        visit::visit_impl_item_fn(self, node);
    }

    fn visit_trait_item_fn(&mut self, node: &'ast TraitItemFn) {
        if let Some(block) = &node.default {
            self.record(node.sig.ident.to_string(), &node.sig.fn_token, block);
        }
        visit::visit_trait_item_fn(self, node);
    }
}

/// Spans of every function with a body, in source order
pub fn collect_function_spans(file: &syn::File) -> Vec<FunctionSpan> {
    let mut visitor = FunctionSpanVisitor::default();
    visitor.visit_file(file);
    visitor.spans
}

pub fn measure_file(node_id: &str, source: &str, file: &syn::File) -> FileSize {
    FileSize {
        file: node_id.to_string(),
        line_count: count_non_empty_lines(source),
        functions: collect_function_spans(file),
    }
}

fn file_violations(size: &FileSize, thresholds: &SizeThresholds) -> Vec<SizeViolation> {
    let whole_file = (size.line_count > thresholds.max_file_lines).then(|| SizeViolation {
        file: size.file.clone(),
        function: None,
        lines: size.line_count,
        threshold: thresholds.max_file_lines,
    });

    let functions = size
        .functions
        .iter()
        .filter(|span| span.lines() > thresholds.max_function_lines)
        .map(|span| SizeViolation {
            file: size.file.clone(),
            function: Some(span.name.clone()),
            lines: span.lines(),
            threshold: thresholds.max_function_lines,
        });

    whole_file.into_iter().chain(functions).collect()
}

/// Flag oversized files and functions, sorted by file then function
pub fn check_sizes(files: &[FileSize], thresholds: &SizeThresholds) -> Vec<SizeViolation> {
    let mut violations: Vec<SizeViolation> = files
        .iter()
        .flat_map(|size| file_violations(size, thresholds))
        .collect();
    violations.sort();
    violations
}
