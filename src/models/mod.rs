pub mod filter;
pub mod product;

pub use filter::*;
pub use product::*;
