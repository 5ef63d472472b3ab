//! Data storage layer
//!
//! - `sqlite` - the embedded transactional database (service, schema,
//!   migrations, repositories)
//! - `types` - typed rows shared between repositories and route handlers

pub mod sqlite;
pub mod types;

pub use sqlite::SqliteService;
