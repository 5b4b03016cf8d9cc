pub mod catalog;
pub mod ingest;
pub mod initdb;
pub mod migrate_and_serve;
pub mod serve;

pub use catalog::{load_assets, seed_projects};
pub use ingest::ingest;
pub use initdb::init_database;
pub use migrate_and_serve::migrate_and_serve;
pub use serve::serve;
