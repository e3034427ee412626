//! `<icon-button icon="name">`: an image button that shows a loading state
//! until its icon has loaded.

use weft_runtime::{Component, ComponentClass, ComponentContext, Event, Result};

pub const TAG: &str = "icon-button";

pub const LOADING_CLASS: &str = "loading";

#[derive(Debug, Default)]
pub struct IconButton;

impl IconButton {
    pub fn class() -> ComponentClass {
        ComponentClass::of::<Self>(TAG)
    }

    /// Where the image for `icon` is served from
    pub fn icon_src(icon: Option<&str>) -> String {
        format!("/components/icon-button/icons/{}.png", icon.unwrap_or("null"))
    }

    fn start_loading(cx: &mut ComponentContext<'_>) -> Result<()> {
        if let Some(button) = cx.shadow_query("button") {
            cx.add_class(button, LOADING_CLASS)?;
        }
        if let Some(image) = cx.shadow_query("img#icon") {
            cx.listen(image, "load", "image-load")?;
            cx.listen(image, "error", "image-error")?;
            let src = Self::icon_src(cx.attribute("icon").as_deref());
            cx.set_attribute(image, "src", &src)?;
        }
        Ok(())
    }
}

impl Component for IconButton {
    fn on_load(&mut self, cx: &mut ComponentContext<'_>) {
        if let Err(err) = Self::start_loading(cx) {
            tracing::warn!(host = %cx.host(), "<{}>: {}", TAG, err);
        }
    }

    fn observes_slot_changes(&self) -> bool {
        true
    }

    fn on_slot_change(&mut self, cx: &mut ComponentContext<'_>, event: &Event) {
        tracing::debug!(host = %cx.host(), slot = %event.target, "Slot content changed");
    }

    fn on_event(&mut self, cx: &mut ComponentContext<'_>, handler: &str, event: &mut Event) {
        match handler {
            "image-load" => {
                if let Some(button) = cx.shadow_query("button") {
                    if let Err(err) = cx.remove_class(button, LOADING_CLASS) {
                        tracing::warn!(host = %cx.host(), "<{}>: {}", TAG, err);
                    }
                }
            }
            "image-error" => {
                tracing::error!(host = %cx.host(), detail = ?event.detail, "Icon failed to load");
            }
            _ => {}
        }
    }
}
