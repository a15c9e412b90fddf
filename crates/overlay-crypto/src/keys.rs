//! # secp256k1 Keys
//!
//! Identity keys and their derived children.
//!
//! ## Child-Key Derivation
//!
//! For a root key pair `(a, A)` and a counterparty key `B`:
//!
//! ```text
//! S     = a · B                         (ECDH, compressed encoding)
//! t     = HMAC-SHA256(S, invoice) mod n
//! child = a + t      (private side, PrivateKey::derive_child)
//! CHILD = A + t · G  (public side, PublicKey::derive_child, computed by B)
//! ```
//!
//! Both parties arrive at the same child public key without sharing
//! private material.

use crate::errors::CryptoError;
use hmac::{Hmac, Mac};
use k256::ecdsa::{
    signature::{Signer, Verifier},
    Signature, SigningKey, VerifyingKey,
};
use k256::elliptic_curve::ops::Reduce;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::{FieldBytes, NonZeroScalar, ProjectivePoint, Scalar, SecretKey, U256};
use sha2::Sha256;
use std::fmt;
use zeroize::Zeroizing;

type HmacSha256 = Hmac<Sha256>;

/// A secp256k1 public key, always emitted in compressed (33 byte) form.
#[derive(Clone, PartialEq, Eq)]
pub struct PublicKey(k256::PublicKey);

impl PublicKey {
    /// Parse SEC1 bytes (compressed or uncompressed).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        k256::PublicKey::from_sec1_bytes(bytes)
            .map(Self)
            .map_err(|_| CryptoError::InvalidPublicKey)
    }

    /// Parse hex-encoded SEC1 bytes.
    pub fn from_hex(s: &str) -> Result<Self, CryptoError> {
        let bytes = hex::decode(s).map_err(|e| CryptoError::InvalidHex(e.to_string()))?;
        Self::from_bytes(&bytes)
    }

    /// Compressed SEC1 encoding.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.0.to_encoded_point(true).as_bytes().to_vec()
    }

    /// Compressed SEC1 encoding as lowercase hex.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Derive the child public key the owner of `self` obtains for `private`'s
    /// public key under `invoice`.
    pub fn derive_child(&self, private: &PrivateKey, invoice: &str) -> Result<Self, CryptoError> {
        let secret = private.shared_secret(self);
        let tweak = invoice_tweak(&secret, invoice)?;
        let point = self.0.to_projective() + ProjectivePoint::GENERATOR * tweak;
        k256::PublicKey::from_affine(point.to_affine())
            .map(Self)
            .map_err(|_| CryptoError::DerivationFailed)
    }

    /// Check a DER signature over `data` (SHA-256 digest). Malformed
    /// signatures are simply invalid.
    pub fn verify(&self, data: &[u8], der_signature: &[u8]) -> bool {
        let Ok(signature) = Signature::from_der(der_signature) else {
            return false;
        };
        VerifyingKey::from(&self.0).verify(data, &signature).is_ok()
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.to_hex())
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// A secp256k1 private key. The inner scalar is zeroized on drop.
#[derive(Clone)]
pub struct PrivateKey(SecretKey);

impl PrivateKey {
    /// Generate a random key.
    pub fn random() -> Self {
        Self(SecretKey::random(&mut rand::thread_rng()))
    }

    /// Create from a 32-byte big-endian scalar.
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self, CryptoError> {
        SecretKey::from_bytes(&FieldBytes::from(*bytes))
            .map(Self)
            .map_err(|_| CryptoError::InvalidPrivateKey)
    }

    /// Create from a hex-encoded 32-byte scalar.
    pub fn from_hex(s: &str) -> Result<Self, CryptoError> {
        let bytes = hex::decode(s).map_err(|e| CryptoError::InvalidHex(e.to_string()))?;
        let bytes: [u8; 32] = bytes
            .try_into()
            .map_err(|_| CryptoError::InvalidPrivateKey)?;
        Self::from_bytes(&bytes)
    }

    /// The publicly known key with scalar 1, used for "anyone" derivations.
    pub fn anyone() -> Self {
        let mut one = [0u8; 32];
        one[31] = 1;
        // Scalar 1 is always in range.
        Self(SecretKey::from_bytes(&FieldBytes::from(one)).expect("scalar one is a valid key"))
    }

    /// Matching public key.
    pub fn public_key(&self) -> PublicKey {
        PublicKey(self.0.public_key())
    }

    /// Compressed encoding of `self · other`.
    pub fn shared_secret(&self, other: &PublicKey) -> Zeroizing<Vec<u8>> {
        let point = (other.0.to_projective() * *self.0.to_nonzero_scalar()).to_affine();
        Zeroizing::new(point.to_encoded_point(true).as_bytes().to_vec())
    }

    /// Derive the child private key shared with `counterparty` under `invoice`.
    pub fn derive_child(&self, counterparty: &PublicKey, invoice: &str) -> Result<Self, CryptoError> {
        let secret = self.shared_secret(counterparty);
        let tweak = invoice_tweak(&secret, invoice)?;
        let scalar = *self.0.to_nonzero_scalar() + tweak;
        let scalar = Option::<NonZeroScalar>::from(NonZeroScalar::new(scalar))
            .ok_or(CryptoError::DerivationFailed)?;
        Ok(Self(SecretKey::from(scalar)))
    }

    /// Sign `data` (SHA-256 digest, RFC 6979) and return the DER encoding.
    pub fn sign(&self, data: &[u8]) -> Vec<u8> {
        let signing_key = SigningKey::from(&self.0);
        let signature: Signature = signing_key.sign(data);
        signature.to_der().as_bytes().to_vec()
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrivateKey(<redacted>, public={})", self.public_key().to_hex())
    }
}

/// HMAC the invoice number with the shared secret and reduce it to a scalar.
fn invoice_tweak(shared_secret: &[u8], invoice: &str) -> Result<Scalar, CryptoError> {
    let mut mac =
        HmacSha256::new_from_slice(shared_secret).map_err(|_| CryptoError::DerivationFailed)?;
    mac.update(invoice.as_bytes());
    let digest = mac.finalize().into_bytes();
    Ok(<Scalar as Reduce<U256>>::reduce_bytes(
        &FieldBytes::clone_from_slice(&digest),
    ))
}
