use std::collections::HashSet;

use swc_common::Span;
use swc_ecma_ast::{
    CallExpr, Callee, ComputedPropName, ExportAll, Expr, ExprStmt, ImportDecl, JSXAttr,
    JSXAttrName, JSXAttrValue, JSXElement, JSXElementName, JSXText, Lit, MemberProp, NamedExport,
    Str, TaggedTpl, Tpl, TsEnumDecl,
};
use swc_ecma_visit::{Visit, VisitWith};

use crate::{
    core::{
        parsers::ParsedSource,
        transform::{Rewrite, Step, TransformContext, TranslatableNode, transform},
    },
    error::{Error, Result},
};

/// Elements whose children are code or styles, never prose.
const RAW_TEXT_ELEMENTS: &[&str] = &["style", "script"];

/// Call sites the traversal never descends into.
pub(super) struct CallFilter<'a> {
    pub ignored_callees: &'a HashSet<String>,
    pub translate_ident: &'a str,
}

impl CallFilter<'_> {
    fn skips(&self, call: &CallExpr) -> bool {
        let expr = match &call.callee {
            Callee::Import(_) => return true,
            Callee::Super(_) => return false,
            Callee::Expr(expr) => expr,
        };
        let Some(name) = callee_name(expr) else {
            return false;
        };
        name == self.translate_ident
            || name == "require"
            || name.starts_with("console.")
            || self.ignored_callees.contains(&name)
    }
}

/// Walks one module and records a [`Rewrite`] for every node a transformer
/// replaced.
pub(super) struct Rewriter<'a> {
    parsed: &'a ParsedSource,
    ctx: TransformContext<'a>,
    calls: CallFilter<'a>,
    ignored_attributes: &'a HashSet<String>,
    rewrites: Vec<Rewrite>,
    error: Option<Error>,
}

impl<'a> Rewriter<'a> {
    pub fn new(
        parsed: &'a ParsedSource,
        ctx: TransformContext<'a>,
        calls: CallFilter<'a>,
        ignored_attributes: &'a HashSet<String>,
    ) -> Self {
        Self {
            parsed,
            ctx,
            calls,
            ignored_attributes,
            rewrites: Vec::new(),
            error: None,
        }
    }

    pub fn collect(mut self) -> Result<Vec<Rewrite>> {
        let parsed = self.parsed;
        self.visit_module(&parsed.module);
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.rewrites),
        }
    }

    /// Run the transformers on `node` and record the outcome.
    /// Returns whether the traversal should descend into the node's children.
    fn apply(&mut self, node: TranslatableNode) -> bool {
        if self.error.is_some() {
            return false;
        }
        match transform(node, &self.ctx) {
            Ok(Step::Continue) => true,
            Ok(Step::SkipSubtree) => false,
            Ok(Step::Replace(rewrite)) => {
                self.rewrites.push(rewrite);
                false
            }
            Err(err) => {
                self.error = Some(err);
                false
            }
        }
    }

    fn skip(&self, what: &str, span: Span) {
        tracing::debug!(line = self.parsed.line_of(span.lo), "skipping {}", what);
    }

    fn literal_node(&self, s: &Str, in_attribute: bool) -> Option<TranslatableNode> {
        let value = s.value.as_str()?;
        Some(TranslatableNode::Literal {
            value: value.to_string(),
            range: self.parsed.range(s.span),
            in_attribute,
        })
    }

    fn template_node(&self, tpl: &Tpl) -> Option<TranslatableNode> {
        let segments = tpl
            .quasis
            .iter()
            .map(|quasi| {
                quasi
                    .cooked
                    .as_ref()
                    .and_then(|cooked| cooked.as_str())
                    .map(str::to_string)
            })
            .collect::<Option<Vec<_>>>()?;
        let placeholders = tpl
            .exprs
            .iter()
            .map(|expr| match &**expr {
                Expr::Ident(ident) => Some(ident.sym.to_string()),
                _ => None,
            })
            .collect();
        Some(TranslatableNode::Template {
            segments,
            placeholders,
            range: self.parsed.range(tpl.span),
        })
    }
}

impl Visit for Rewriter<'_> {
    fn visit_import_decl(&mut self, _: &ImportDecl) {}

    fn visit_export_all(&mut self, _: &ExportAll) {}

    fn visit_named_export(&mut self, _: &NamedExport) {}

    fn visit_ts_enum_decl(&mut self, node: &TsEnumDecl) {
        self.skip("enum", node.span);
    }

    fn visit_computed_prop_name(&mut self, _: &ComputedPropName) {}

    fn visit_expr_stmt(&mut self, node: &ExprStmt) {
        // `"use client";` and other directives
        if matches!(&*node.expr, Expr::Lit(Lit::Str(_))) {
            return;
        }
        node.visit_children_with(self);
    }

    fn visit_call_expr(&mut self, node: &CallExpr) {
        if self.calls.skips(node) {
            self.skip("ignored call", node.span);
            return;
        }
        node.visit_children_with(self);
    }

    fn visit_tagged_tpl(&mut self, node: &TaggedTpl) {
        node.tag.visit_with(self);
    }

    fn visit_expr(&mut self, node: &Expr) {
        let candidate = match node {
            Expr::Lit(Lit::Str(s)) => self.literal_node(s, false),
            Expr::Tpl(tpl) => self.template_node(tpl),
            _ => None,
        };
        let descend = match candidate {
            Some(candidate) => self.apply(candidate),
            None => true,
        };
        if descend {
            node.visit_children_with(self);
        }
    }

    fn visit_jsx_attr(&mut self, node: &JSXAttr) {
        let name = match &node.name {
            JSXAttrName::Ident(ident) => ident.sym.to_string(),
            JSXAttrName::JSXNamespacedName(ns) => format!("{}:{}", ns.ns.sym, ns.name.sym),
        };
        if self.ignored_attributes.contains(&name) {
            self.skip("ignored attribute", node.span);
            return;
        }

        if let Some(JSXAttrValue::Str(s)) = &node.value {
            if let Some(candidate) = self.literal_node(s, true) {
                self.apply(candidate);
            }
            return;
        }
        node.visit_children_with(self);
    }

    fn visit_jsx_element(&mut self, node: &JSXElement) {
        node.opening.visit_with(self);

        let raw_text = match &node.opening.name {
            JSXElementName::Ident(ident) => RAW_TEXT_ELEMENTS.contains(&&*ident.sym),
            _ => false,
        };
        if raw_text {
            self.skip("raw text element", node.span);
            return;
        }

        for child in &node.children {
            child.visit_with(self);
        }
    }

    fn visit_jsx_text(&mut self, node: &JSXText) {
        // The range comes from the raw source, the text from the decoded
        // value (`&amp;` is `&` once rendered).
        let raw = self.parsed.snippet(node.span);
        let trimmed = raw.trim();
        let value = node.value.trim();
        if trimmed.is_empty() || value.is_empty() {
            return;
        }

        let start = self.parsed.offset(node.span.lo) + (raw.len() - raw.trim_start().len());
        self.apply(TranslatableNode::Markup {
            value: collapse_jsx_whitespace(value),
            range: start..start + trimmed.len(),
        });
    }
}

/// Dotted name of a callee made of identifiers and property accesses
/// (`t`, `console.log`, `i18n.t`), `None` for anything else.
fn callee_name(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Ident(ident) => Some(ident.sym.to_string()),
        Expr::This(_) => Some("this".to_string()),
        Expr::Paren(paren) => callee_name(&paren.expr),
        Expr::Member(member) => match &member.prop {
            MemberProp::Ident(prop) => {
                callee_name(&member.obj).map(|obj| format!("{}.{}", obj, prop.sym))
            }
            _ => None,
        },
        _ => None,
    }
}

/// Text as JSX renders it: lines are trimmed, blank lines dropped and the
/// rest joined with single spaces.
fn collapse_jsx_whitespace(text: &str) -> String {
    if !text.contains('\n') {
        return text.to_string();
    }
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
