//! # Inbound Ports (Driving Ports / API)

use crate::domain::errors::TokenCodecError;
use crate::domain::token::{PushDropToken, MIN_TOKEN_FIELDS};
use overlay_crypto::PublicKey;

/// Reads and writes data-carrying locking scripts.
///
/// Implementations must be thread-safe (`Send + Sync`).
pub trait LockingScriptCodec: Send + Sync {
    /// Split a locking script into its lock key and data fields.
    fn decode(&self, script: &[u8]) -> Result<PushDropToken, TokenCodecError>;

    /// Build a locking script carrying `fields`, spendable by
    /// `locking_public_key`.
    fn encode(
        &self,
        fields: &[Vec<u8>],
        locking_public_key: &PublicKey,
    ) -> Result<Vec<u8>, TokenCodecError>;

    /// Decode and require at least the four advertisement fields.
    fn decode_token(&self, script: &[u8]) -> Result<PushDropToken, TokenCodecError> {
        let token = self.decode(script)?;
        token.require_fields(MIN_TOKEN_FIELDS)?;
        Ok(token)
    }
}
