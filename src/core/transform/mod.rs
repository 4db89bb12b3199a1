//! Node transformers.
//!
//! A traversal hands each candidate node to [`transform`] as a
//! [`TranslatableNode`]. The matching transformer either leaves it alone
//! ([`Step::Continue`]) or returns a [`Rewrite`] after inserting exactly one
//! registry entry.
//!
//! ## Module Structure
//!
//! - `literal`: string literals, including JSX attribute values
//! - `template`: template literals with `{{name}}` placeholder tokens
//! - `markup`: JSX text children

mod literal;
mod markup;
mod template;

use std::{collections::HashSet, ops::Range};

use super::{locale::Locale, registry::TranslationRegistry};
use crate::error::Result;

/// Attempts to draw a key that is not yet in the registry.
const MAX_KEY_ATTEMPTS: usize = 8;

/// A node the traversal found that may hold translatable text.
///
/// Ranges are byte offsets into the file's source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslatableNode {
    /// `"text"`; `in_attribute` is set for JSX attribute values (`title="text"`).
    Literal {
        value: String,
        range: Range<usize>,
        in_attribute: bool,
    },
    /// `` `text ${name} text` ``; `segments.len() == placeholders.len() + 1`.
    /// A placeholder is `None` when its expression is not a plain identifier.
    Template {
        segments: Vec<String>,
        placeholders: Vec<Option<String>>,
        range: Range<usize>,
    },
    /// Text between JSX tags, already trimmed; `range` covers the trimmed text.
    Markup { value: String, range: Range<usize> },
}

/// Outcome of visiting one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Leave the node as-is and keep descending.
    Continue,
    /// Leave the node and everything below it untouched.
    SkipSubtree,
    /// Replace the node's source range.
    Replace(Rewrite),
}

/// A call to the translation function replacing a source range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub range: Range<usize>,
    pub call: TranslateCall,
    /// Wrap the call in a JSX expression container `{...}`.
    pub in_container: bool,
}

/// `<callee>("<key>" /* <text> */, { <params> })`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateCall {
    pub callee: String,
    pub key: String,
    pub text: String,
    pub params: Vec<String>,
}

/// Per-file settings and shared state the transformers need.
pub struct TransformContext<'a> {
    pub locale: Locale,
    pub registry: &'a TranslationRegistry,
    pub key_prefix: &'a str,
    pub translate_ident: &'a str,
    pub ignore_texts: &'a HashSet<String>,
    /// Key source, [`generate_key`](super::key::generate_key) outside of tests.
    pub draw_key: fn(&str) -> Result<String>,
}

impl TransformContext<'_> {
    pub fn is_translatable(&self, text: &str) -> bool {
        if self.ignore_texts.contains(text.trim()) {
            return false;
        }
        self.locale.matches(text) && !text.trim().is_empty()
    }

    /// Generate a key and register `text` under it.
    ///
    /// Returns `None` when no free key could be drawn; the node is then left
    /// untranslated.
    fn register(&self, text: &str) -> Result<Option<String>> {
        self.register_with(text, || (self.draw_key)(self.key_prefix))
    }

    fn register_with(
        &self,
        text: &str,
        mut draw: impl FnMut() -> Result<String>,
    ) -> Result<Option<String>> {
        for _ in 0..MAX_KEY_ATTEMPTS {
            let key = draw()?;
            if self.registry.try_insert(key.clone(), text.to_string()) {
                return Ok(Some(key));
            }
            tracing::warn!(key = %key, "translation key collision, drawing a new key");
        }
        tracing::warn!(text, "no free translation key found, leaving text untranslated");
        Ok(None)
    }

    fn call(&self, key: String, text: String, params: Vec<String>) -> TranslateCall {
        TranslateCall {
            callee: self.translate_ident.to_string(),
            key,
            text,
            params,
        }
    }
}

/// Dispatch `node` to its transformer.
pub fn transform(node: TranslatableNode, ctx: &TransformContext) -> Result<Step> {
    match node {
        TranslatableNode::Literal {
            value,
            range,
            in_attribute,
        } => literal::rewrite(value, range, in_attribute, ctx),
        TranslatableNode::Template {
            segments,
            placeholders,
            range,
        } => template::rewrite(segments, placeholders, range, ctx),
        TranslatableNode::Markup { value, range } => markup::rewrite(value, range, ctx),
    }
}
