//! `<menu-item>`: one entry of a dropdown menu. The `divider`, `noclick`
//! and `nohover` host attributes are mirrored onto the inner link.

use weft_runtime::{Component, ComponentClass, ComponentContext, Result};

pub const TAG: &str = "menu-item";

#[derive(Debug, Default)]
pub struct MenuItem;

impl MenuItem {
    pub fn class() -> ComponentClass {
        ComponentClass::of::<Self>(TAG)
    }

    fn mirror_flags(cx: &mut ComponentContext<'_>) -> Result<()> {
        let Some(link) = cx.shadow_query("a#link") else {
            return Ok(());
        };
        if cx.has_attribute("divider") {
            return cx.set_attribute(link, "divider", "true");
        }
        for flag in ["noclick", "nohover"] {
            if cx.has_attribute(flag) {
                cx.set_attribute(link, flag, "true")?;
            }
        }
        Ok(())
    }
}

impl Component for MenuItem {
    fn on_load(&mut self, cx: &mut ComponentContext<'_>) {
        if let Err(err) = Self::mirror_flags(cx) {
            tracing::warn!(host = %cx.host(), "<{}>: {}", TAG, err);
        }
    }
}
