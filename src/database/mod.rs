pub mod manager;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod store;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::InMemoryCatalogStore;
pub use postgres::PgCatalogStore;
pub use store::{CatalogStore, CategoryStore, Pagination, ProductStore, StoreError};
