pub mod inventory_repo;
pub use inventory_repo::InventoryRepository;
pub mod recipe_repo;
pub use recipe_repo::RecipeRepository;
pub mod menu_repo;
pub use menu_repo::MenuRepository;
pub mod order_repo;
pub use order_repo::OrderRepository;
pub mod status_history_repo;
pub use status_history_repo::StatusHistoryRepository;
