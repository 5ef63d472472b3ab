//! API route handlers

pub mod events;
pub mod giftcards;
pub mod health;
pub mod places;
pub mod records;
pub mod restaurants;
pub mod reviews;
pub mod travelpasses;
pub mod users;
