//! # Ports Layer
//!
//! - **Inbound (Driving)**: [`inbound::LookupService`], called by the overlay
//!   engine
//! - **Outbound (Driven)**: the record store and wallet capability, defined
//!   in `ov-04-record-store` and `overlay-crypto`

pub mod inbound;
