//! Domain layer for name validation.

pub mod errors;
pub mod names;
pub mod uri;
