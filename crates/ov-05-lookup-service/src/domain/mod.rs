//! # Domain Layer

pub mod config;
pub mod docs;
pub mod entities;
pub mod errors;
pub mod query;
