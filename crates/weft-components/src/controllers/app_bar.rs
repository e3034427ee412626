use weft_runtime::{Controller, ControllerClass, Event, Proxy, Value};

use crate::search_bar::SearchBar;

pub const NAME: &str = "AppBarController";

/// Drives the app bar title. Clicking a menu item shows the item as the
/// subtitle and flips the title; typing in the search bar sets the title.
pub struct AppBarController;

impl AppBarController {
    pub fn class() -> ControllerClass {
        ControllerClass::new(NAME, Self::create)
    }

    pub fn create() -> Controller {
        Controller::new(NAME)
            .with_property("title", "MySuperAwesomeApp")
            .with_property("titleFlip", true)
            .with_property("userName", "")
            .with_property("userEmail", "")
            .with_method("onMenuItemClicked", Self::on_menu_item_clicked)
            .with_method("onKeyUp", Self::on_key_up)
    }

    fn on_menu_item_clicked(proxy: &mut Proxy<'_>, event: &mut Event) {
        tracing::info!(item = ?event.related, "App bar caught menu item click");

        if let Some(item) = event.related {
            let label = proxy.tree().text_content(item).trim().to_string();
            proxy.set("subtitle", label);
        }

        let flip = proxy.get("titleFlip").is_some_and(|v| v.is_truthy());
        proxy.set("title", if flip { "Foo" } else { "Bar" });
        proxy.set("titleFlip", !flip);
    }

    fn on_key_up(proxy: &mut Proxy<'_>, event: &mut Event) {
        let title = match &event.detail {
            Some(Value::String(text)) => text.clone(),
            _ => SearchBar::value(proxy.tree(), proxy.listener()),
        };
        proxy.set("title", title);
    }
}
