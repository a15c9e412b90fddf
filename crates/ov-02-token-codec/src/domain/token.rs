//! # Advertisement Token Fields
//!
//! Field order is fixed: `[protocol tag, identity key, domain, bare name,
//! signature]`. The signature covers the first four fields concatenated
//! without delimiters.

use super::errors::TokenCodecError;
use overlay_crypto::PublicKey;
use overlay_types::Protocol;

/// Fields an advertisement needs before its signature.
pub const MIN_TOKEN_FIELDS: usize = 4;

/// Fields of a signed advertisement.
pub const SIGNED_TOKEN_FIELDS: usize = 5;

/// A decoded PushDrop lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushDropToken {
    /// Key the output is locked to.
    pub locking_public_key: PublicKey,
    /// Data fields in push order.
    pub fields: Vec<Vec<u8>>,
}

impl PushDropToken {
    /// Fail unless at least `required` fields are present.
    pub fn require_fields(&self, required: usize) -> Result<(), TokenCodecError> {
        if self.fields.len() < required {
            return Err(TokenCodecError::InsufficientFields {
                found: self.fields.len(),
                required,
            });
        }
        Ok(())
    }
}

/// Signing input: the fields concatenated in order. Never parsed back.
pub fn flatten_for_signing(fields: &[Vec<u8>]) -> Vec<u8> {
    fields.concat()
}

/// The four fields an advertisement signature covers.
pub fn unsigned_token_fields(
    protocol: Protocol,
    identity_key: &PublicKey,
    domain: &str,
    bare_name: &str,
) -> Vec<Vec<u8>> {
    vec![
        protocol.tag().as_bytes().to_vec(),
        identity_key.to_bytes(),
        domain.as_bytes().to_vec(),
        bare_name.as_bytes().to_vec(),
    ]
}

/// Typed view over the leading advertisement fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvertisementFields {
    pub protocol: Protocol,
    /// Identity key field as lowercase hex (not checked to be a curve point).
    pub identity_key: String,
    pub domain: String,
    /// Topic or service name without its `tm_`/`ls_` prefix.
    pub bare_name: String,
}

impl AdvertisementFields {
    /// Read the first four fields.
    pub fn from_fields(fields: &[Vec<u8>]) -> Result<Self, TokenCodecError> {
        let [tag, identity, domain, name, ..] = fields else {
            return Err(TokenCodecError::InsufficientFields {
                found: fields.len(),
                required: MIN_TOKEN_FIELDS,
            });
        };

        let protocol = Protocol::from_tag(tag).ok_or_else(|| {
            TokenCodecError::UnknownProtocol(String::from_utf8_lossy(tag).into_owned())
        })?;
        let domain =
            String::from_utf8(domain.clone()).map_err(|_| TokenCodecError::InvalidUtf8("domain"))?;
        let bare_name = String::from_utf8(name.clone())
            .map_err(|_| TokenCodecError::InvalidUtf8("topicOrService"))?;

        Ok(Self {
            protocol,
            identity_key: hex::encode(identity),
            domain,
            bare_name,
        })
    }

    /// Prefixed `tm_`/`ls_` name.
    pub fn full_name(&self) -> String {
        self.protocol.full_name(&self.bare_name)
    }
}
