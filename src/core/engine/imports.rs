//! Detection and injection of the translation function import.

use std::collections::HashSet;

use swc_common::Spanned;
use swc_ecma_ast::{
    Decl, ExportDecl, Expr, ImportDecl, ImportSpecifier, Lit, Module, ModuleDecl,
    ModuleExportName, ModuleItem, Pat, Stmt,
};

use crate::core::{
    formatter::{QuoteStyle, detect_eol},
    parsers::ParsedSource,
    printer::{TextEdit, quote_string},
};

/// How a file currently imports the translation module.
#[derive(Debug)]
pub(super) enum TranslationImport<'a> {
    Missing,
    /// `import t from "<path>"` (or `import { default as t }`), with its local name.
    Default(String),
    /// The module is imported but without a default binding.
    WithoutDefault(&'a ImportDecl),
}

impl TranslationImport<'_> {
    pub(super) fn local_name(&self) -> Option<&str> {
        match self {
            TranslationImport::Default(local) => Some(local),
            _ => None,
        }
    }
}

/// Scan top-level declarations for a value import of `import_path`.
pub(super) fn find_translation_import<'a>(
    module: &'a Module,
    import_path: &str,
) -> TranslationImport<'a> {
    let mut found = TranslationImport::Missing;
    for item in &module.body {
        let ModuleItem::ModuleDecl(ModuleDecl::Import(decl)) = item else {
            continue;
        };
        if decl.type_only || decl.src.value.as_str() != Some(import_path) {
            continue;
        }
        if let Some(local) = default_binding(decl) {
            return TranslationImport::Default(local);
        }
        if matches!(found, TranslationImport::Missing) {
            found = TranslationImport::WithoutDefault(decl);
        }
    }
    found
}

fn default_binding(decl: &ImportDecl) -> Option<String> {
    decl.specifiers.iter().find_map(|spec| match spec {
        ImportSpecifier::Default(default) => Some(default.local.sym.to_string()),
        ImportSpecifier::Named(named) if !named.is_type_only => match &named.imported {
            Some(ModuleExportName::Ident(imported)) if imported.sym == "default" => {
                Some(named.local.sym.to_string())
            }
            _ => None,
        },
        _ => None,
    })
}

/// Names bound at the top level of `module` by imports and declarations.
pub(super) fn top_level_bindings(module: &Module) -> HashSet<String> {
    let mut names = HashSet::new();
    for item in &module.body {
        let decl = match item {
            ModuleItem::ModuleDecl(ModuleDecl::Import(import)) => {
                names.extend(import.specifiers.iter().map(|spec| {
                    match spec {
                        ImportSpecifier::Named(named) => named.local.sym.to_string(),
                        ImportSpecifier::Default(default) => default.local.sym.to_string(),
                        ImportSpecifier::Namespace(ns) => ns.local.sym.to_string(),
                    }
                }));
                continue;
            }
            ModuleItem::ModuleDecl(ModuleDecl::ExportDecl(ExportDecl { decl, .. })) => decl,
            ModuleItem::Stmt(Stmt::Decl(decl)) => decl,
            _ => continue,
        };
        match decl {
            Decl::Fn(f) => {
                names.insert(f.ident.sym.to_string());
            }
            Decl::Class(c) => {
                names.insert(c.ident.sym.to_string());
            }
            Decl::Var(var) => names.extend(var.decls.iter().filter_map(|d| match &d.name {
                Pat::Ident(binding) => Some(binding.id.sym.to_string()),
                _ => None,
            })),
            _ => {}
        }
    }
    names
}

/// `base`, or `base1`, `base2`, ... when `base` is already bound.
pub(super) fn unbound_ident(base: &str, taken: &HashSet<String>) -> String {
    if !taken.contains(base) {
        return base.to_string();
    }
    (1..)
        .map(|n| format!("{}{}", base, n))
        .find(|candidate| !taken.contains(candidate))
        .unwrap_or_else(|| base.to_string())
}

/// Edit that makes `ident` a default binding of `import_path`, if one is needed.
pub(super) fn plan_import_edit(
    import: &TranslationImport,
    parsed: &ParsedSource,
    import_path: &str,
    ident: &str,
    quote: QuoteStyle,
) -> Option<TextEdit> {
    match import {
        TranslationImport::Default(_) => None,
        TranslationImport::Missing => {
            let (at, needs_newline) = insertion_point(parsed);
            let eol = detect_eol(&parsed.source);
            let statement = format!(
                "import {} from {};{}",
                ident,
                quote_string(import_path, quote),
                eol
            );
            let text = if needs_newline {
                format!("{}{}", eol, statement)
            } else {
                statement
            };
            Some(TextEdit::insert(at, text))
        }
        TranslationImport::WithoutDefault(decl) => {
            let Some(first) = decl.specifiers.first() else {
                // `import "<path>";` becomes `import t from "<path>";`
                let at = parsed.offset(decl.src.span.lo);
                return Some(TextEdit::insert(at, format!("{} from ", ident)));
            };
            let decl_start = parsed.offset(decl.span.lo);
            let spec_start = parsed.offset(first.span().lo);
            // Named imports start at `{`, a namespace import at `*`.
            let at = match first {
                ImportSpecifier::Named(_) => parsed.source[decl_start..spec_start]
                    .rfind('{')
                    .map(|i| decl_start + i)
                    .unwrap_or(spec_start),
                _ => spec_start,
            };
            Some(TextEdit::insert(at, format!("{}, ", ident)))
        }
    }
}

/// Offset where a new import goes: after a shebang and any directive
/// prologue (`"use client";`). The flag is set when that position is at the
/// end of a file without a trailing newline.
fn insertion_point(parsed: &ParsedSource) -> (usize, bool) {
    let source = &parsed.source;
    let mut at = 0;
    if source.starts_with("#!") {
        at = line_end(source, 0);
    }
    for item in &parsed.module.body {
        let ModuleItem::Stmt(Stmt::Expr(stmt)) = item else {
            break;
        };
        if !matches!(&*stmt.expr, Expr::Lit(Lit::Str(_))) {
            break;
        }
        at = line_end(source, parsed.offset(stmt.span.hi));
    }
    let needs_newline = at > 0 && at == source.len() && !source.ends_with('\n');
    (at, needs_newline)
}

/// Offset just past the line break following `from`, or the end of `source`.
fn line_end(source: &str, from: usize) -> usize {
    source[from..]
        .find('\n')
        .map(|i| from + i + 1)
        .unwrap_or(source.len())
}
