//! # Ports Layer
//!
//! - **Inbound**: the codec API the lookup service and advertiser call

pub mod inbound;
