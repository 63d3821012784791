mod generate;
mod slot;

pub use generate::*;
pub use slot::*;
