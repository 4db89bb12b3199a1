use std::ops::Range;

use super::{Rewrite, Step, TransformContext};
use crate::error::Result;

/// `"你好"` becomes `t("key" /* 你好 */)`; as a JSX attribute value
/// (`title="你好"`) the call is wrapped: `title={t("key" /* 你好 */)}`.
pub(super) fn rewrite(
    value: String,
    range: Range<usize>,
    in_attribute: bool,
    ctx: &TransformContext,
) -> Result<Step> {
    if !ctx.is_translatable(&value) {
        return Ok(Step::Continue);
    }
    let Some(key) = ctx.register(&value)? else {
        return Ok(Step::Continue);
    };
    Ok(Step::Replace(Rewrite {
        range,
        call: ctx.call(key, value, Vec::new()),
        in_container: in_attribute,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        key::is_generated_key,
        locale::Locale,
        transform::test_support::{Fixture, expect_rewrite},
    };

    #[test]
    fn test_translatable_literal_is_registered() {
        let fixture = Fixture::new(Locale::Zh);
        let step = rewrite("你好世界".to_string(), 12..20, false, &fixture.ctx()).unwrap();
        let rewrite = expect_rewrite(step);

        assert_eq!(rewrite.range, 12..20);
        assert!(!rewrite.in_container);
        assert_eq!(rewrite.call.callee, "t");
        assert_eq!(rewrite.call.text, "你好世界");
        assert!(rewrite.call.params.is_empty());
        assert!(is_generated_key(&rewrite.call.key, "app"));
        assert_eq!(
            fixture.registry.get(&rewrite.call.key).as_deref(),
            Some("你好世界")
        );
    }

    #[test]
    fn test_attribute_literal_is_wrapped() {
        let fixture = Fixture::new(Locale::Zh);
        let step = rewrite("标题".to_string(), 0..4, true, &fixture.ctx()).unwrap();
        assert!(expect_rewrite(step).in_container);
    }

    #[test]
    fn test_other_script_is_left_alone() {
        let fixture = Fixture::new(Locale::Zh);
        let step = rewrite("hello".to_string(), 0..7, false, &fixture.ctx()).unwrap();
        assert_eq!(step, Step::Continue);
        assert!(fixture.registry.is_empty());
    }
}
