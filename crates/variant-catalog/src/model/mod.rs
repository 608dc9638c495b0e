//! Plain catalog data: categories, variant templates, products and stock movements.

pub mod category;
pub mod ids;
pub mod movement;
pub mod product;

pub use category::*;
pub use ids::*;
pub use movement::*;
pub use product::*;
