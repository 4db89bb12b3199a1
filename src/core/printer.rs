//! Printer: turns the original source plus recorded rewrites into text.
//!
//! Nodes that were not rewritten are emitted byte-for-byte from the original
//! source, so untouched code keeps its formatting and comments. Rewritten
//! nodes are rendered in place as translate calls carrying the original text
//! as a trailing block comment on the key argument.

use std::ops::Range;

use super::{formatter::QuoteStyle, transform::{Rewrite, TranslateCall}};

/// Raw text edit: replace `range` (empty for an insertion) with `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub range: Range<usize>,
    pub text: String,
}

impl TextEdit {
    pub fn insert(at: usize, text: impl Into<String>) -> Self {
        Self {
            range: at..at,
            text: text.into(),
        }
    }
}

impl From<(&Rewrite, QuoteStyle)> for TextEdit {
    fn from((rewrite, quote): (&Rewrite, QuoteStyle)) -> Self {
        let call = render_call(&rewrite.call, quote);
        let text = if rewrite.in_container {
            format!("{{{}}}", call)
        } else {
            call
        };
        TextEdit {
            range: rewrite.range.clone(),
            text,
        }
    }
}

/// Apply rewrites and extra edits (import changes) to `source`.
///
/// Edits are applied in source order. An edit overlapping an earlier one is
/// dropped; the traversal never produces those because a rewritten node's
/// subtree is not visited.
pub fn print(source: &str, rewrites: &[Rewrite], edits: &[TextEdit], quote: QuoteStyle) -> String {
    let mut all: Vec<TextEdit> = rewrites
        .iter()
        .map(|rewrite| TextEdit::from((rewrite, quote)))
        .chain(edits.iter().cloned())
        .collect();
    // Insertions at the same offset keep their order.
    all.sort_by_key(|edit| (edit.range.start, edit.range.end));

    let extra: usize = all.iter().map(|e| e.text.len()).sum();
    let mut out = String::with_capacity(source.len() + extra);
    let mut cursor = 0;
    for edit in &all {
        if edit.range.start < cursor || edit.range.end > source.len() {
            tracing::debug!(range = ?edit.range, "dropping overlapping edit");
            continue;
        }
        out.push_str(&source[cursor..edit.range.start]);
        out.push_str(&edit.text);
        cursor = edit.range.end;
    }
    out.push_str(&source[cursor..]);
    out
}

/// Render `t("key" /* text */)` or `t("key" /* text */, { a, b })`.
pub fn render_call(call: &TranslateCall, quote: QuoteStyle) -> String {
    let mut out = format!(
        "{}({} /* {} */",
        call.callee,
        quote_string(&call.key, quote),
        comment_safe(&call.text)
    );
    if !call.params.is_empty() {
        out.push_str(", { ");
        out.push_str(&call.params.join(", "));
        out.push_str(" }");
    }
    out.push(')');
    out
}

/// Quote `s` as a JS string literal.
pub fn quote_string(s: &str, quote: QuoteStyle) -> String {
    let q = quote.as_char();
    let mut out = String::with_capacity(s.len() + 2);
    out.push(q);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if c == q => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(q);
    out
}

/// Text safe to place inside `/* ... */`.
fn comment_safe(text: &str) -> String {
    text.replace("*/", "*\\/")
}
