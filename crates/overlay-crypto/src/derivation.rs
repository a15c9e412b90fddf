//! # Derivation Contexts
//!
//! A derivation context names a child key: who it is shared with
//! (counterparty), which protocol it belongs to, and which key of that
//! protocol. The context is rendered as an *invoice number*
//! `"<level>-<protocol name>-<key id>"` that feeds the HMAC step of
//! child-key derivation.

use crate::errors::CryptoError;
use crate::keys::PublicKey;

const MAX_KEY_ID_LEN: usize = 800;
const MIN_PROTOCOL_NAME_LEN: usize = 5;
const MAX_PROTOCOL_NAME_LEN: usize = 400;

/// How widely a derived key may be reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SecurityLevel {
    /// Same key for every app and counterparty, no user prompt.
    Silent = 0,
    /// Key scoped per app.
    EveryApp = 1,
    /// Key scoped per app and per counterparty.
    EveryAppAndCounterparty = 2,
}

/// A (security level, protocol name) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WalletProtocol {
    /// Reuse scope of keys under this protocol.
    pub security_level: SecurityLevel,
    /// Human-readable protocol name, normalized to lowercase.
    pub name: String,
}

impl WalletProtocol {
    /// Create a protocol id.
    pub fn new(security_level: SecurityLevel, name: impl Into<String>) -> Self {
        Self {
            security_level,
            name: name.into(),
        }
    }

    /// Normalized protocol name, validated against the invoice-number rules.
    fn normalized_name(&self) -> Result<String, CryptoError> {
        let name = self.name.trim().to_lowercase();
        if name.len() < MIN_PROTOCOL_NAME_LEN {
            return Err(CryptoError::InvalidDerivation(format!(
                "protocol name must be at least {MIN_PROTOCOL_NAME_LEN} characters"
            )));
        }
        if name.len() > MAX_PROTOCOL_NAME_LEN {
            return Err(CryptoError::InvalidDerivation(format!(
                "protocol name must be at most {MAX_PROTOCOL_NAME_LEN} characters"
            )));
        }
        if name.contains("  ") {
            return Err(CryptoError::InvalidDerivation(
                "protocol name must not contain consecutive spaces".to_string(),
            ));
        }
        if !name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == ' ')
        {
            return Err(CryptoError::InvalidDerivation(
                "protocol name may only contain letters, numbers and spaces".to_string(),
            ));
        }
        if name.ends_with(" protocol") {
            return Err(CryptoError::InvalidDerivation(
                "protocol name must not end with \" protocol\"".to_string(),
            ));
        }
        Ok(name)
    }
}

/// The other party a derived key is shared with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Counterparty {
    /// The publicly known key whose private scalar is 1.
    Anyone,
    /// The wallet's own identity key.
    Myself,
    /// A specific identity.
    Other(PublicKey),
}

/// Everything needed to name one derived key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivationContext {
    /// Protocol the key belongs to.
    pub protocol: WalletProtocol,
    /// Key within the protocol.
    pub key_id: String,
    /// Party the key is shared with.
    pub counterparty: Counterparty,
}

impl DerivationContext {
    /// Create a context.
    pub fn new(protocol: WalletProtocol, key_id: impl Into<String>, counterparty: Counterparty) -> Self {
        Self {
            protocol,
            key_id: key_id.into(),
            counterparty,
        }
    }

    /// Same protocol and key id, different counterparty.
    pub fn with_counterparty(&self, counterparty: Counterparty) -> Self {
        Self {
            counterparty,
            ..self.clone()
        }
    }

    /// Render the invoice number `"<level>-<protocol>-<key id>"`.
    pub fn invoice_number(&self) -> Result<String, CryptoError> {
        if self.key_id.is_empty() {
            return Err(CryptoError::InvalidDerivation(
                "key id must not be empty".to_string(),
            ));
        }
        if self.key_id.len() > MAX_KEY_ID_LEN {
            return Err(CryptoError::InvalidDerivation(format!(
                "key id must be at most {MAX_KEY_ID_LEN} characters"
            )));
        }
        let name = self.protocol.normalized_name()?;
        Ok(format!(
            "{}-{}-{}",
            self.protocol.security_level as u8,
            name,
            self.key_id
        ))
    }
}
