pub mod categories;
pub mod database;
pub mod products;
