use std::ops::Range;

use super::{Rewrite, Step, TransformContext};
use crate::error::Result;

/// `<p>你好</p>` becomes `<p>{t("key" /* 你好 */)}</p>`.
///
/// The traversal already trimmed the text; whitespace around it stays in place.
pub(super) fn rewrite(value: String, range: Range<usize>, ctx: &TransformContext) -> Result<Step> {
    let value = value.trim();
    if !ctx.is_translatable(value) {
        return Ok(Step::Continue);
    }
    let Some(key) = ctx.register(value)? else {
        return Ok(Step::Continue);
    };
    Ok(Step::Replace(Rewrite {
        range,
        call: ctx.call(key, value.to_string(), Vec::new()),
        in_container: true,
    }))
}
