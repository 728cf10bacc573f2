pub mod category;
pub mod product;

pub use category::{Category, NewCategory};
pub use product::{Product, ProductFilters, ProductPage, Variant};
