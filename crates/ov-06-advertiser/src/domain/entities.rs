//! # Advertiser Entities

use overlay_types::Protocol;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One advertisement to publish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvertisementData {
    pub protocol: Protocol,
    /// Topic (SHIP) or service (SLAP) name, with or without its prefix.
    pub topic_or_service_name: String,
}

impl AdvertisementData {
    pub fn new(protocol: Protocol, topic_or_service_name: impl Into<String>) -> Self {
        Self {
            protocol,
            topic_or_service_name: topic_or_service_name.into(),
        }
    }

    pub fn ship(topic: impl Into<String>) -> Self {
        Self::new(Protocol::Ship, topic)
    }

    pub fn slap(service: impl Into<String>) -> Self {
        Self::new(Protocol::Slap, service)
    }
}

/// Advertiser operations that require `init()` first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CreateAdvertisements,
    ParseAdvertisement,
    FindAllAdvertisements,
    RevokeAdvertisements,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::CreateAdvertisements => "create_advertisements",
            Operation::ParseAdvertisement => "parse_advertisement",
            Operation::FindAllAdvertisements => "find_all_advertisements",
            Operation::RevokeAdvertisements => "revoke_advertisements",
        };
        f.write_str(name)
    }
}
