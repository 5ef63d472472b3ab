//! Domain logic

pub mod selection;
