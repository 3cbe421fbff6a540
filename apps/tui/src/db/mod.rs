pub mod migrations;
pub mod models;
pub mod queries;

pub use migrations::{create_database_pool, demo_blips, seed_demo_blips};
pub use models::BlipRecord;
