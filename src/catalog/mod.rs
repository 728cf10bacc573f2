pub mod query;
pub mod view;

pub use query::{CatalogParams, CatalogQuery};
pub use view::{
    effective_variant_price, CategoryView, ProductDetail, ProductListResponse, ProductSummary, VariantView,
};
