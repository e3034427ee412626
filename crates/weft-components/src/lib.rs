//! weft components
//!
//! The stock component set (`app-bar-title`, `dropdown-menu`,
//! `icon-button`, `menu-item`, `search-bar`), the controllers that drive
//! them and their bundled templates.

pub mod app_bar_title;
pub mod controllers;
pub mod dropdown_menu;
pub mod icon_button;
pub mod menu_item;
pub mod search_bar;
mod templates;

pub use app_bar_title::AppBarTitle;
pub use controllers::{AppBarController, MenuItemController};
pub use dropdown_menu::DropdownMenu;
pub use icon_button::IconButton;
pub use menu_item::MenuItem;
pub use search_bar::SearchBar;
pub use templates::bundled_templates;

use weft_runtime::{ComponentRegistry, ControllerRegistry, RegistryError};

/// Define every stock component and controller
pub fn register_all(components: &mut ComponentRegistry, controllers: &mut ControllerRegistry) -> Result<(), RegistryError> {
    for class in [
        AppBarTitle::class(),
        DropdownMenu::class(),
        IconButton::class(),
        MenuItem::class(),
        SearchBar::class(),
    ] {
        components.define(class)?;
    }
    controllers.define(AppBarController::class())?;
    controllers.define(MenuItemController::class())?;
    Ok(())
}
