//! `<dropdown-menu>`: shows its `[slot="menu"]` child when the
//! `[slot="anchor"]` child is clicked, hides it on the next click or a click
//! on the underlay.

use weft_dom::NodeId;
use weft_runtime::{Component, ComponentClass, ComponentContext, Event, Result};

pub const TAG: &str = "dropdown-menu";

const TOGGLE: &str = "toggle";

#[derive(Debug, Default)]
pub struct DropdownMenu {
    open: bool,
}

impl DropdownMenu {
    pub fn class() -> ComponentClass {
        ComponentClass::of::<Self>(TAG)
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    fn parts(cx: &ComponentContext<'_>) -> (Option<NodeId>, Option<NodeId>) {
        (cx.shadow_query("#underlay"), cx.query(r#"[slot="menu"]"#))
    }

    fn set_open(&mut self, cx: &mut ComponentContext<'_>, open: bool) -> Result<()> {
        let display = if open { "block" } else { "none" };
        let (underlay, menu) = Self::parts(cx);
        for node in [underlay, menu].into_iter().flatten() {
            cx.set_style(node, "display", display)?;
        }
        self.open = open;
        tracing::debug!(host = %cx.host(), open, "Toggled menu");
        Ok(())
    }

    fn listen(cx: &mut ComponentContext<'_>) -> Result<()> {
        let (underlay, _) = Self::parts(cx);
        let anchor = cx.query(r#"[slot="anchor"]"#);
        for node in [anchor, underlay].into_iter().flatten() {
            cx.listen(node, "click", TOGGLE)?;
        }
        Ok(())
    }
}

impl Component for DropdownMenu {
    fn on_load(&mut self, cx: &mut ComponentContext<'_>) {
        if let Err(err) = Self::listen(cx) {
            tracing::warn!(host = %cx.host(), "<{}>: {}", TAG, err);
        }
    }

    fn on_event(&mut self, cx: &mut ComponentContext<'_>, handler: &str, _event: &mut Event) {
        if handler != TOGGLE {
            return;
        }
        let open = !self.open;
        if let Err(err) = self.set_open(cx, open) {
            tracing::warn!(host = %cx.host(), "<{}>: {}", TAG, err);
        }
    }
}
