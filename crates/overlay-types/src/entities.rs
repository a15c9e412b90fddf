//! # Core Domain Entities
//!
//! ## Clusters
//!
//! - **Protocols**: [`Protocol`] and the names derived from it
//! - **Ledger references**: [`Txid`], [`Outpoint`] / [`UtxoReference`]
//! - **Advertisements**: [`Advertisement`], [`TaggedBundle`]
//! - **Ledger views**: [`LedgerTransaction`], [`TransactionOutput`]

use crate::errors::TypeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// CLUSTER A: PROTOCOLS
// =============================================================================

/// The two advertisement protocols of the discovery layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Protocol {
    /// Service Host Interconnect: which topics a host tracks.
    Ship,
    /// Service Lookup Availability: which lookup services a host provides.
    Slap,
}

impl Protocol {
    /// Both protocols, SHIP first.
    pub const ALL: [Protocol; 2] = [Protocol::Ship, Protocol::Slap];

    /// ASCII tag carried as the first token field.
    pub fn tag(self) -> &'static str {
        match self {
            Protocol::Ship => "SHIP",
            Protocol::Slap => "SLAP",
        }
    }

    /// Parse the raw protocol field of a token.
    pub fn from_tag(tag: &[u8]) -> Option<Self> {
        match tag {
            b"SHIP" => Some(Protocol::Ship),
            b"SLAP" => Some(Protocol::Slap),
            _ => None,
        }
    }

    /// Lower-cased long form used as the key-derivation protocol string.
    pub fn protocol_name(self) -> &'static str {
        match self {
            Protocol::Ship => "service host interconnect",
            Protocol::Slap => "service lookup availability",
        }
    }

    /// Prefix of the names this protocol advertises.
    pub fn name_prefix(self) -> &'static str {
        match self {
            Protocol::Ship => "tm_",
            Protocol::Slap => "ls_",
        }
    }

    /// Topic under which advertisement outputs are admitted.
    pub fn topic(self) -> &'static str {
        match self {
            Protocol::Ship => "tm_ship",
            Protocol::Slap => "tm_slap",
        }
    }

    /// Lookup service answering queries about this protocol's records.
    pub fn lookup_service(self) -> &'static str {
        match self {
            Protocol::Ship => "ls_ship",
            Protocol::Slap => "ls_slap",
        }
    }

    /// Full prefixed name for a bare topic or service name.
    pub fn full_name(self, bare_name: &str) -> String {
        format!("{}{}", self.name_prefix(), bare_name)
    }

    /// Strip this protocol's prefix if present.
    pub fn bare_name(self, name: &str) -> &str {
        name.strip_prefix(self.name_prefix()).unwrap_or(name)
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Protocol {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Protocol::from_tag(s.as_bytes()).ok_or_else(|| TypeError::UnknownProtocol(s.to_string()))
    }
}

// =============================================================================
// CLUSTER B: LEDGER REFERENCES
// =============================================================================

/// A 32-byte transaction id, displayed and serialized as lowercase hex.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Txid(pub [u8; 32]);

impl Txid {
    /// Wrap raw bytes.
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Raw bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Lowercase hex form.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for Txid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Txid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Txid({})", self.to_hex())
    }
}

impl FromStr for Txid {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s).map_err(|_| TypeError::InvalidTxid(s.to_string()))?;
        let bytes: [u8; 32] = bytes
            .try_into()
            .map_err(|_| TypeError::InvalidTxid(s.to_string()))?;
        Ok(Self(bytes))
    }
}

impl Serialize for Txid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Txid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A transaction output location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outpoint {
    /// Transaction containing the output.
    pub txid: Txid,
    /// Position of the output in that transaction.
    pub output_index: u32,
}

impl Outpoint {
    pub fn new(txid: Txid, output_index: u32) -> Self {
        Self { txid, output_index }
    }
}

impl fmt::Display for Outpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.txid, self.output_index)
    }
}

/// The only datum a lookup returns.
pub type UtxoReference = Outpoint;

// =============================================================================
// CLUSTER C: ADVERTISEMENTS
// =============================================================================

/// A decoded SHIP or SLAP advertisement.
///
/// Never mutated in place: it is re-derived from a locking script, plus the
/// ledger location when it was discovered through a lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Advertisement {
    pub protocol: Protocol,
    /// Compressed identity key, lowercase hex.
    pub identity_key: String,
    /// Advertised URI.
    pub domain: String,
    /// Full prefixed topic (`tm_`) or service (`ls_`) name.
    pub topic_or_service: String,
    /// Bundle carrying the advertisement transaction, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beef: Option<Vec<u8>>,
    /// Output index of the advertisement, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_index: Option<u32>,
}

/// A transaction bundle tagged with the topics it should be submitted to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedBundle {
    pub beef: Vec<u8>,
    pub topics: Vec<String>,
}

// =============================================================================
// CLUSTER D: LEDGER VIEWS
// =============================================================================

/// A single transaction output as seen by the discovery layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionOutput {
    pub satoshis: u64,
    pub locking_script: Vec<u8>,
}

/// The parts of a ledger transaction the discovery layer reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerTransaction {
    pub txid: Txid,
    pub outputs: Vec<TransactionOutput>,
}

impl LedgerTransaction {
    /// Output at `index`, if present.
    pub fn output(&self, index: u32) -> Option<&TransactionOutput> {
        self.outputs.get(index as usize)
    }
}
