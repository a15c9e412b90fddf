//! # Domain Layer

pub mod context;
pub mod errors;
