//! Stock controllers

mod app_bar;
mod menu_item;

pub use app_bar::AppBarController;
pub use menu_item::{MENU_ITEM_CLICK, MenuItemController};
