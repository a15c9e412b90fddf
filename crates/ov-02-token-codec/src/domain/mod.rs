//! # Domain Layer
//!
//! Script chunking and advertisement field handling. No I/O.

pub mod errors;
pub mod script;
pub mod token;
