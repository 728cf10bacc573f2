pub mod catalog_service;
pub mod category_service;

pub use catalog_service::CatalogService;
pub use category_service::{CategoryInputError, CategoryService, CreateCategoryRequest};
