//! # Advertiser Errors

use super::entities::Operation;
use crate::ports::outbound::BundleError;
use ov_01_name_validation::NameValidationError;
use ov_02_token_codec::TokenCodecError;
use overlay_crypto::WalletError;
use overlay_types::Txid;
use thiserror::Error;

/// Errors returned by the advertiser.
#[derive(Debug, Error)]
pub enum AdvertiserError {
    #[error("Advertiser not initialized: call init() before {0}")]
    NotInitialized(Operation),

    #[error("Advertiser already initialized")]
    AlreadyInitialized,

    #[error("Advertisable URI {uri:?} rejected: {reason}")]
    InvalidAdvertisableUri {
        uri: String,
        reason: NameValidationError,
    },

    #[error("Invalid advertisement at index {index}: {reason}")]
    InvalidEntry { index: usize, reason: String },

    #[error("Transaction {txid} has no output {output_index}")]
    MissingOutput { txid: Txid, output_index: u32 },

    #[error("No advertisements given")]
    NoAdvertisements,

    #[error("Advertised name {name:?} is invalid: {reason}")]
    InvalidName {
        name: String,
        reason: NameValidationError,
    },

    #[error("Token codec error: {0}")]
    Codec(#[from] TokenCodecError),

    #[error("Wallet error: {0}")]
    Wallet(#[from] WalletError),

    #[error("Bundle error: {0}")]
    Bundle(#[from] BundleError),
}
