// handlers/mod.rs - thin axum adapters over the catalog and category services
//
// catalog    → GET /catalog, GET /catalog/:code
// categories → GET /categories, POST /categories
// system     → GET /, GET /health
pub mod catalog;
pub mod categories;
pub mod system;
