//! # Wallet Capability
//!
//! The discovery services never hold identity keys themselves. They are
//! handed a capability object and ask it to sign, verify, derive and spend.
//!
//! - [`CryptoWallet`]: signatures and key derivation only.
//! - [`Wallet`]: additionally builds and signs transactions.
//! - [`ProtoWallet`]: the in-process `CryptoWallet` over a root key. The
//!   *anyone* instance ([`ProtoWallet::anyone`]) is what verifiers use.

use crate::derivation::{Counterparty, DerivationContext};
use crate::errors::WalletError;
use crate::keys::{PrivateKey, PublicKey};
use async_trait::async_trait;
use overlay_types::{Outpoint, Txid};

// =============================================================================
// PORTS
// =============================================================================

/// Signing, verification and key derivation.
#[async_trait]
pub trait CryptoWallet: Send + Sync {
    /// The wallet's root identity key.
    async fn identity_key(&self) -> Result<PublicKey, WalletError>;

    /// Derived public key for `ctx`.
    ///
    /// `for_self = true` yields the key this wallet controls; `false` yields
    /// the key the counterparty controls, as seen from this wallet.
    async fn get_public_key(
        &self,
        ctx: &DerivationContext,
        for_self: bool,
    ) -> Result<PublicKey, WalletError>;

    /// DER signature over `data` with the derived key for `ctx`.
    async fn create_signature(
        &self,
        data: &[u8],
        ctx: &DerivationContext,
    ) -> Result<Vec<u8>, WalletError>;

    /// Check a signature made by the counterparty of `ctx`.
    ///
    /// An invalid signature is `Ok(false)`; `Err` is reserved for failures
    /// to perform the check at all.
    async fn verify_signature(
        &self,
        data: &[u8],
        signature: &[u8],
        ctx: &DerivationContext,
    ) -> Result<bool, WalletError>;
}

/// A wallet that can also build and sign transactions.
#[async_trait]
pub trait Wallet: CryptoWallet {
    /// Build, sign and return one transaction.
    async fn create_action(&self, request: ActionRequest) -> Result<ActionResult, WalletError>;
}

/// One transaction to build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRequest {
    /// Human-readable purpose.
    pub description: String,
    /// Outputs to spend.
    pub inputs: Vec<ActionInput>,
    /// Outputs to create.
    pub outputs: Vec<ActionOutput>,
}

/// An output to spend, unlocked with a derived key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionInput {
    /// Location of the output being spent.
    pub outpoint: Outpoint,
    /// Bundle proving the source transaction.
    pub source_beef: Vec<u8>,
    /// Key that unlocks the output.
    pub unlocking: DerivationContext,
    /// Human-readable purpose.
    pub description: String,
}

/// An output to create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutput {
    /// Locking script bytes.
    pub locking_script: Vec<u8>,
    /// Output value.
    pub satoshis: u64,
    /// Human-readable purpose.
    pub description: String,
}

/// A signed transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResult {
    /// Id of the new transaction.
    pub txid: Txid,
    /// Serialized transaction, opaque to the discovery layer.
    pub raw_tx: Vec<u8>,
}

// =============================================================================
// ADAPTER: ProtoWallet
// =============================================================================

/// In-process crypto wallet over a root private key.
#[derive(Debug, Clone)]
pub struct ProtoWallet {
    root: PrivateKey,
}

impl ProtoWallet {
    /// Wallet over `root`.
    pub fn new(root: PrivateKey) -> Self {
        Self { root }
    }

    /// The publicly known wallet (root scalar 1).
    pub fn anyone() -> Self {
        Self::new(PrivateKey::anyone())
    }

    /// Wallet over a fresh random key.
    pub fn random() -> Self {
        Self::new(PrivateKey::random())
    }

    fn counterparty_key(&self, counterparty: &Counterparty) -> PublicKey {
        match counterparty {
            Counterparty::Anyone => PrivateKey::anyone().public_key(),
            Counterparty::Myself => self.root.public_key(),
            Counterparty::Other(key) => key.clone(),
        }
    }

    fn derive_private(&self, ctx: &DerivationContext) -> Result<PrivateKey, WalletError> {
        let invoice = ctx.invoice_number()?;
        let counterparty = self.counterparty_key(&ctx.counterparty);
        Ok(self.root.derive_child(&counterparty, &invoice)?)
    }

    fn derive_public(&self, ctx: &DerivationContext, for_self: bool) -> Result<PublicKey, WalletError> {
        if for_self {
            return Ok(self.derive_private(ctx)?.public_key());
        }
        let invoice = ctx.invoice_number()?;
        let counterparty = self.counterparty_key(&ctx.counterparty);
        Ok(counterparty.derive_child(&self.root, &invoice)?)
    }
}

#[async_trait]
impl CryptoWallet for ProtoWallet {
    async fn identity_key(&self) -> Result<PublicKey, WalletError> {
        Ok(self.root.public_key())
    }

    async fn get_public_key(
        &self,
        ctx: &DerivationContext,
        for_self: bool,
    ) -> Result<PublicKey, WalletError> {
        self.derive_public(ctx, for_self)
    }

    async fn create_signature(
        &self,
        data: &[u8],
        ctx: &DerivationContext,
    ) -> Result<Vec<u8>, WalletError> {
        Ok(self.derive_private(ctx)?.sign(data))
    }

    async fn verify_signature(
        &self,
        data: &[u8],
        signature: &[u8],
        ctx: &DerivationContext,
    ) -> Result<bool, WalletError> {
        let key = self.derive_public(ctx, false)?;
        Ok(key.verify(data, signature))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derivation::{SecurityLevel, WalletProtocol};

    fn ship_ctx(counterparty: Counterparty) -> DerivationContext {
        DerivationContext::new(
            WalletProtocol::new(
                SecurityLevel::EveryAppAndCounterparty,
                "service host interconnect",
            ),
            "1",
            counterparty,
        )
    }

    #[tokio::test]
    async fn test_anyone_verifier_accepts_public_signature() {
        let signer = ProtoWallet::random();
        let identity = signer.identity_key().await.unwrap();
        let data = b"SHIP|identity|https://host.example|payments";

        let signature = signer
            .create_signature(data, &ship_ctx(Counterparty::Anyone))
            .await
            .unwrap();

        let verifier = ProtoWallet::anyone();
        let ok = verifier
            .verify_signature(data, &signature, &ship_ctx(Counterparty::Other(identity)))
            .await
            .unwrap();
        assert!(ok);
    }

    #[tokio::test]
    async fn test_locking_key_matches_on_both_sides() {
        let signer = ProtoWallet::random();
        let identity = signer.identity_key().await.unwrap();

        let locking_key = signer
            .get_public_key(&ship_ctx(Counterparty::Anyone), true)
            .await
            .unwrap();
        let expected = ProtoWallet::anyone()
            .get_public_key(&ship_ctx(Counterparty::Other(identity)), false)
            .await
            .unwrap();

        assert_eq!(locking_key, expected);
    }

    #[tokio::test]
    async fn test_wrong_identity_rejects_signature() {
        let signer = ProtoWallet::random();
        let impostor = ProtoWallet::random().identity_key().await.unwrap();
        let data = b"payload";

        let signature = signer
            .create_signature(data, &ship_ctx(Counterparty::Anyone))
            .await
            .unwrap();
        let ok = ProtoWallet::anyone()
            .verify_signature(data, &signature, &ship_ctx(Counterparty::Other(impostor)))
            .await
            .unwrap();

        assert!(!ok);
    }

    #[tokio::test]
    async fn test_self_signature_roundtrip() {
        let wallet = ProtoWallet::random();
        let ctx = ship_ctx(Counterparty::Myself);

        let signature = wallet.create_signature(b"note", &ctx).await.unwrap();
        assert!(wallet.verify_signature(b"note", &signature, &ctx).await.unwrap());
    }

    #[tokio::test]
    async fn test_invalid_protocol_is_error() {
        let wallet = ProtoWallet::random();
        let ctx = DerivationContext::new(
            WalletProtocol::new(SecurityLevel::EveryAppAndCounterparty, "x"),
            "1",
            Counterparty::Anyone,
        );

        let result = wallet.create_signature(b"data", &ctx).await;
        assert!(matches!(result, Err(WalletError::Crypto(_))));
    }
}
