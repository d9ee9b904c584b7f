pub mod inventory;
pub mod menu;
pub mod orders;
