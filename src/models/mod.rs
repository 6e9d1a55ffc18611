//! Domain stores
//!
//! The stateful pieces of the assistant: the selected recipe, the shopping
//! list, the liked recipes and the current search results.

pub mod likes;
pub mod recipe;
pub mod search;
pub mod shopping_list;

pub use likes::FavoritesStore;
pub use recipe::{RecipeError, RecipeModel, ServingsDirection};
pub use search::{PageInfo, SearchError, SearchResultSet};
pub use shopping_list::{ShoppingList, ShoppingListItem};
