//! # Ports Layer
//!
//! - **Inbound (Driving)**: [`inbound::Advertiser`]
//! - **Outbound (Driven)**: overlay resolver and bundle codec; the wallet
//!   port lives in `overlay-crypto`

pub mod inbound;
pub mod outbound;
