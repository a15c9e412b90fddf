//! # Inbound Ports (Driving Ports / API)

use crate::domain::errors::LinkageError;
use async_trait::async_trait;

/// Identity linkage checks.
#[async_trait]
pub trait SignatureLinkageApi: Send + Sync {
    /// Check that `fields` were signed by the identity they name and that
    /// the output is locked to `locking_public_key` (compressed hex).
    async fn verify_linkage(
        &self,
        locking_public_key: &str,
        fields: &[Vec<u8>],
    ) -> Result<bool, LinkageError>;
}
