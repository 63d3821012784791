mod repository;
mod seed;
mod store;

pub use repository::*;
pub use seed::*;
pub use store::*;
