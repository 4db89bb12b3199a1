//! Formatter applied to printed output before it is written back.
//!
//! The built-in [`SourceFormatter`] only touches whitespace the printer could
//! have disturbed (line endings, the final newline) and then re-parses the
//! result in the file's dialect, so a rewrite can never leave a file that no
//! longer compiles. Other formatters plug in through the [`Formatter`] trait;
//! unknown option keys are passed through to them untouched.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::parsers::{Dialect, parse_source};
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStyle {
    #[default]
    Double,
    Single,
}

impl QuoteStyle {
    pub fn as_char(&self) -> char {
        match self {
            QuoteStyle::Double => '"',
            QuoteStyle::Single => '\'',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndOfLine {
    Lf,
    Crlf,
    /// Keep whatever the file already uses.
    #[default]
    Auto,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatterOptions {
    /// Quote style of generated string literals.
    #[serde(default)]
    pub quote: QuoteStyle,
    #[serde(default)]
    pub end_of_line: EndOfLine,
    #[serde(default = "default_final_newline")]
    pub final_newline: bool,
    /// User preferences for other formatters (e.g. `printWidth`).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_final_newline() -> bool {
    true
}

impl Default for FormatterOptions {
    fn default() -> Self {
        Self {
            quote: QuoteStyle::default(),
            end_of_line: EndOfLine::default(),
            final_newline: default_final_newline(),
            extra: Map::new(),
        }
    }
}

pub trait Formatter: Send + Sync {
    fn format(
        &self,
        text: String,
        path: &Path,
        dialect: Dialect,
        options: &FormatterOptions,
    ) -> Result<String>;
}

/// Line ending normalisation plus a validity check in the target dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceFormatter;

impl Formatter for SourceFormatter {
    fn format(
        &self,
        text: String,
        path: &Path,
        dialect: Dialect,
        options: &FormatterOptions,
    ) -> Result<String> {
        let eol = match options.end_of_line {
            EndOfLine::Lf => "\n",
            EndOfLine::Crlf => "\r\n",
            EndOfLine::Auto => detect_eol(&text),
        };

        let mut out = if text.contains('\r') || eol != "\n" {
            let lf = text.replace("\r\n", "\n");
            if eol == "\n" { lf } else { lf.replace('\n', eol) }
        } else {
            text
        };
        if options.final_newline && !out.is_empty() && !out.ends_with('\n') {
            out.push_str(eol);
        }

        parse_source(out.clone(), path, dialect).map_err(|err| Error::Format {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        Ok(out)
    }
}

/// Line ending of the first line break, `\n` when there is none.
pub(crate) fn detect_eol(text: &str) -> &'static str {
    match text.find('\n') {
        Some(i) if i > 0 && text.as_bytes()[i - 1] == b'\r' => "\r\n",
        _ => "\n",
    }
}
