//! # Signature Linkage Service
//!
//! Implements [`SignatureLinkageApi`] over an injected wallet capability.

use crate::domain::context::linkage_context;
use crate::domain::errors::LinkageError;
use crate::ports::inbound::SignatureLinkageApi;
use async_trait::async_trait;
use ov_02_token_codec::flatten_for_signing;
use overlay_crypto::{Counterparty, CryptoWallet, ProtoWallet, PublicKey};
use overlay_types::Protocol;
use tracing::debug;

/// Check an advertisement's identity claim.
///
/// Fields are `[protocol tag, identity key, .., signature]`; everything
/// before the signature is signed.
pub async fn verify_linkage<W>(
    wallet: &W,
    locking_public_key: &str,
    fields: &[Vec<u8>],
) -> Result<bool, LinkageError>
where
    W: CryptoWallet + ?Sized,
{
    let Some((signature, signed)) = fields.split_last().filter(|_| fields.len() >= 3) else {
        return Err(LinkageError::InsufficientFields {
            found: fields.len(),
        });
    };

    let protocol = Protocol::from_tag(&fields[0]).ok_or_else(|| {
        LinkageError::UnknownProtocol(String::from_utf8_lossy(&fields[0]).into_owned())
    })?;

    let identity_bytes = &fields[1];
    if identity_bytes.is_empty() {
        return Err(LinkageError::MissingIdentityKey);
    }
    let identity = PublicKey::from_bytes(identity_bytes)
        .map_err(|_| LinkageError::MalformedIdentityKey(hex::encode(identity_bytes)))?;

    let data = flatten_for_signing(signed);
    let ctx = linkage_context(protocol, Counterparty::Other(identity));

    if !wallet.verify_signature(&data, signature, &ctx).await? {
        debug!("[ov-03] Signature does not verify for claimed identity");
        return Ok(false);
    }

    let expected = wallet.get_public_key(&ctx, false).await?;
    let linked = expected.to_hex().eq_ignore_ascii_case(locking_public_key.trim());
    if !linked {
        debug!(
            expected = %expected,
            actual = %locking_public_key,
            "[ov-03] Locking key does not match derived key"
        );
    }
    Ok(linked)
}

/// Linkage checks bound to one wallet capability.
pub struct LinkageVerifier<W: CryptoWallet> {
    wallet: W,
}

impl<W: CryptoWallet> LinkageVerifier<W> {
    /// Verifier over `wallet`.
    pub fn new(wallet: W) -> Self {
        Self { wallet }
    }

    /// The wrapped wallet.
    pub fn wallet(&self) -> &W {
        &self.wallet
    }
}

impl LinkageVerifier<ProtoWallet> {
    /// Verifier over the publicly known *anyone* wallet.
    pub fn anyone() -> Self {
        Self::new(ProtoWallet::anyone())
    }
}

impl Default for LinkageVerifier<ProtoWallet> {
    fn default() -> Self {
        Self::anyone()
    }
}

#[async_trait]
impl<W: CryptoWallet> SignatureLinkageApi for LinkageVerifier<W> {
    async fn verify_linkage(
        &self,
        locking_public_key: &str,
        fields: &[Vec<u8>],
    ) -> Result<bool, LinkageError> {
        verify_linkage(&self.wallet, locking_public_key, fields).await
    }
}
