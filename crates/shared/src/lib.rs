mod command;
mod date;
pub mod mealplan;
pub mod pantry;
pub mod recipe;
mod state;

pub use command::*;
pub use date::*;
pub use state::*;
