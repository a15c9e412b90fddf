//! # Ports Layer
//!
//! - **Outbound (Driven)**: storage backends and clocks the lookup services
//!   depend on

pub mod outbound;
