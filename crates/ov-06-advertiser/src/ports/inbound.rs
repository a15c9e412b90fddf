//! # Inbound Ports (Driving Ports / API)

use crate::domain::entities::AdvertisementData;
use crate::domain::errors::AdvertiserError;
use async_trait::async_trait;
use overlay_types::{Advertisement, Protocol, TaggedBundle};

/// Advertisement management for one host identity.
///
/// Every operation except `init` fails with
/// [`AdvertiserError::NotInitialized`] until `init` has succeeded.
#[async_trait]
pub trait Advertiser: Send + Sync {
    /// Validate the advertisable URI and cache the identity key. Once only.
    async fn init(&self) -> Result<(), AdvertiserError>;

    /// Publish `advertisements` in a single transaction.
    async fn create_advertisements(
        &self,
        advertisements: &[AdvertisementData],
    ) -> Result<TaggedBundle, AdvertiserError>;

    /// Decode an advertisement locking script. Linkage is not checked.
    fn parse_advertisement(&self, locking_script: &[u8]) -> Result<Advertisement, AdvertiserError>;

    /// This identity's advertisements currently visible on the overlay.
    async fn find_all_advertisements(
        &self,
        protocol: Protocol,
    ) -> Result<Vec<Advertisement>, AdvertiserError>;

    /// Spend `advertisements`, one transaction each, bundled together.
    async fn revoke_advertisements(
        &self,
        advertisements: &[Advertisement],
    ) -> Result<TaggedBundle, AdvertiserError>;
}
