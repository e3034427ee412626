//! `<app-bar-title>`: title and subtitle links, filled from `{{title}}` and
//! `{{subtitle}}` on the nearest controller.

use weft_runtime::{Component, ComponentClass, ComponentContext, Result};

pub const TAG: &str = "app-bar-title";

#[derive(Debug, Default)]
pub struct AppBarTitle;

impl AppBarTitle {
    pub fn class() -> ComponentClass {
        ComponentClass::of::<Self>(TAG).with_source("components/app-bar/title/title")
    }

    fn apply_attributes(cx: &mut ComponentContext<'_>) -> Result<()> {
        if let (Some(align), Some(container)) = (cx.attribute("align"), cx.shadow_query("div#titleContainer")) {
            cx.set_attribute(container, "align", &align)?;
        }
        if let (Some(href), Some(link)) = (cx.attribute("titlehref"), cx.shadow_query("a#title")) {
            cx.set_attribute(link, "href", &href)?;
        }
        if let (Some(href), Some(link)) = (cx.attribute("subtitlehref"), cx.shadow_query("a#subtitle")) {
            cx.set_attribute(link, "href", &href)?;
        }
        Ok(())
    }
}

impl Component for AppBarTitle {
    fn on_load(&mut self, cx: &mut ComponentContext<'_>) {
        if let Err(err) = Self::apply_attributes(cx) {
            tracing::warn!(host = %cx.host(), "<{}>: {}", TAG, err);
        }
    }
}
