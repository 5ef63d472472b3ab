//! SQLite repositories
//!
//! Free functions per resource, taking `&SqlitePool` and returning typed
//! rows from `crate::data::types`. Values are always bound parameters;
//! identifiers (tables, columns) come only from the closed allow-lists
//! defined alongside each repository.

pub mod events;
pub mod giftcards;
pub mod notifications;
pub mod places;
pub mod records;
pub mod restaurants;
pub mod reviews;
pub mod travelpasses;
