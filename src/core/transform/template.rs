use std::ops::Range;

use super::{Rewrite, Step, TransformContext};
use crate::error::Result;

/// `` `你好${name}，欢迎` `` becomes
/// `t("key" /* 你好{{name}}，欢迎 */, { name })`.
///
/// Every literal segment has to pass the locale test on its own, including
/// the empty ones around leading, trailing or adjacent placeholders, so
/// `` `${name}你好` `` stays as it is. Placeholders must be plain identifiers.
pub(super) fn rewrite(
    segments: Vec<String>,
    placeholders: Vec<Option<String>>,
    range: Range<usize>,
    ctx: &TransformContext,
) -> Result<Step> {
    if !segments.iter().all(|segment| ctx.is_translatable(segment)) {
        return Ok(Step::Continue);
    }

    let Some(names) = placeholders.into_iter().collect::<Option<Vec<_>>>() else {
        tracing::warn!(
            text = segments.concat(),
            "template placeholder is not a plain identifier, leaving template untranslated"
        );
        return Ok(Step::Continue);
    };

    let text = join_with_tokens(&segments, &names);
    let Some(key) = ctx.register(&text)? else {
        return Ok(Step::Continue);
    };

    let mut params: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        if !params.contains(&name) {
            params.push(name);
        }
    }

    Ok(Step::Replace(Rewrite {
        range,
        call: ctx.call(key, text, params),
        in_container: false,
    }))
}

/// Interleave segments with `{{name}}` tokens.
fn join_with_tokens(segments: &[String], names: &[String]) -> String {
    let mut text = String::new();
    for (i, segment) in segments.iter().enumerate() {
        text.push_str(segment);
        if let Some(name) = names.get(i) {
            text.push_str("{{");
            text.push_str(name);
            text.push_str("}}");
        }
    }
    text
}
