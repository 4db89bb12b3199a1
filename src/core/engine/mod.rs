//! Transformation engine: one source file in, one rewritten file out.
//!
//! A file goes through these stages:
//!
//! 1. read and parse in the dialect selected by its extension
//! 2. look up the existing import of the translation module
//! 3. traverse the module, dispatching candidate nodes to the transformers
//! 4. print the rewrites and import change into the original text, format
//! 5. write the result back atomically
//!
//! A file that already imports the translation module and has nothing to
//! translate is left untouched.

mod imports;
mod visitor;

use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use imports::{find_translation_import, plan_import_edit, top_level_bindings, unbound_ident};
use visitor::{CallFilter, Rewriter};

use super::{
    formatter::{Formatter, FormatterOptions},
    key::{generate_key, prefix_for_path},
    locale::Locale,
    parsers::{Dialect, parse_source},
    printer::print,
    registry::TranslationRegistry,
    transform::TransformContext,
};
use crate::{
    error::{Error, Result},
    utils::write_atomic,
};

const BOM: char = '\u{feff}';

/// Settings shared by every file of a run.
#[derive(Debug, Clone)]
pub struct EngineOptions {
    pub locale: Locale,
    /// Module the translation function is imported from.
    pub import_path: String,
    /// Local name of the translation function when the file does not
    /// import it yet. A number is appended when the name is already bound.
    pub translate_ident: String,
    /// Fixed key prefix; derived from each file's name when unset.
    pub key_prefix: Option<String>,
    pub ignored_callees: HashSet<String>,
    pub ignored_attributes: HashSet<String>,
    pub ignore_texts: HashSet<String>,
    pub formatter: FormatterOptions,
    /// Write rewritten files back. Off for `--check`.
    pub write: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            import_path: "@/i18n".to_string(),
            translate_ident: "t".to_string(),
            key_prefix: None,
            ignored_callees: HashSet::new(),
            ignored_attributes: HashSet::new(),
            ignore_texts: HashSet::new(),
            formatter: FormatterOptions::default(),
            write: true,
        }
    }
}

/// Result of processing one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    pub path: PathBuf,
    /// Number of nodes replaced by translation calls.
    pub rewrites: usize,
    pub written: bool,
}

/// Rewritten text of a file, `None` when the file needs no change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transformed {
    pub output: Option<String>,
    pub rewrites: usize,
}

pub struct Engine<'a> {
    options: &'a EngineOptions,
    registry: &'a TranslationRegistry,
    formatter: &'a dyn Formatter,
}

impl<'a> Engine<'a> {
    pub fn new(
        options: &'a EngineOptions,
        registry: &'a TranslationRegistry,
        formatter: &'a dyn Formatter,
    ) -> Self {
        Self {
            options,
            registry,
            formatter,
        }
    }

    pub fn process_file(&self, path: &Path) -> Result<FileOutcome> {
        let _span = tracing::debug_span!("file", path = %path.display()).entered();

        let dialect = Dialect::from_path(path)
            .ok_or_else(|| Error::config(format!("unsupported file type: {}", path.display())))?;
        let source = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let transformed = self.transform_source(source, path, dialect)?;

        let written = match &transformed.output {
            Some(output) if self.options.write => {
                write_atomic(path, output)?;
                true
            }
            _ => false,
        };
        tracing::debug!(rewrites = transformed.rewrites, written, "file done");

        Ok(FileOutcome {
            path: path.to_path_buf(),
            rewrites: transformed.rewrites,
            written,
        })
    }

    /// Rewrite `source` without touching the filesystem. Registry entries
    /// are inserted for every rewrite.
    pub fn transform_source(
        &self,
        source: String,
        path: &Path,
        dialect: Dialect,
    ) -> Result<Transformed> {
        let options = self.options;
        let (bom, code) = match source.strip_prefix(BOM) {
            Some(rest) => (true, rest.to_string()),
            None => (false, source),
        };
        let parsed = parse_source(code, path, dialect)?;

        let import = find_translation_import(&parsed.module, &options.import_path);
        let translate_ident = match import.local_name() {
            Some(local) => local.to_string(),
            None => unbound_ident(
                &options.translate_ident,
                &top_level_bindings(&parsed.module),
            ),
        };

        let key_prefix = options
            .key_prefix
            .clone()
            .unwrap_or_else(|| prefix_for_path(path));
        let ctx = TransformContext {
            locale: options.locale,
            registry: self.registry,
            key_prefix: &key_prefix,
            translate_ident: &translate_ident,
            ignore_texts: &options.ignore_texts,
            draw_key: generate_key,
        };
        let calls = CallFilter {
            ignored_callees: &options.ignored_callees,
            translate_ident: &translate_ident,
        };
        let quote = options.formatter.quote;
        let edits: Vec<_> = plan_import_edit(
            &import,
            &parsed,
            &options.import_path,
            &translate_ident,
            quote,
        )
        .into_iter()
        .collect();

        let rewrites = Rewriter::new(&parsed, ctx, calls, &options.ignored_attributes).collect()?;
        if rewrites.is_empty() && edits.is_empty() {
            return Ok(Transformed {
                output: None,
                rewrites: 0,
            });
        }

        let printed = print(&parsed.source, &rewrites, &edits, quote);
        let mut output = self
            .formatter
            .format(printed, path, dialect, &options.formatter)?;
        if bom {
            output.insert(0, BOM);
        }

        Ok(Transformed {
            output: Some(output),
            rewrites: rewrites.len(),
        })
    }
}
