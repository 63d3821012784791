pub mod aggregation;
pub mod list;
pub mod quantity;

pub use aggregation::{ShoppingListItem, generate_shopping_list};
pub use list::ShoppingList;
