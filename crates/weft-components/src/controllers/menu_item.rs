use weft_runtime::{Controller, ControllerClass, Event, Proxy};

pub const NAME: &str = "MenuItemController";

/// Event re-dispatched from a clicked menu item
pub const MENU_ITEM_CLICK: &str = "menuitemclick";

/// Turns clicks on menu items into bubbling `menuitemclick` events that
/// carry the item, so an outer controller can react to them.
pub struct MenuItemController;

impl MenuItemController {
    pub fn class() -> ControllerClass {
        ControllerClass::new(NAME, Self::create)
    }

    pub fn create() -> Controller {
        Controller::new(NAME).with_method("onItemClick", Self::on_item_click)
    }

    fn on_item_click(proxy: &mut Proxy<'_>, event: &mut Event) {
        let item = proxy.listener();
        let forwarded = Event::bubbling(MENU_ITEM_CLICK, item)
            .with_related(item)
            .with_detail(event.name.as_str());
        proxy.dispatch_event(forwarded);
    }
}
