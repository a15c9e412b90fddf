//! # PushDrop Codec
//!
//! Lock-before layout on encode:
//!
//! ```text
//! <pubkey> OP_CHECKSIG <field 0> .. <field n-1> OP_2DROP.. [OP_DROP]
//! ```
//!
//! Decode also accepts the lock-after layout, where the fields and drops
//! come first and `<pubkey> OP_CHECKSIG` closes the script.

use crate::domain::errors::TokenCodecError;
use crate::domain::script::{opcodes::OP_CHECKSIG, parse_chunks, push_data, push_drops, Chunk};
use crate::domain::token::PushDropToken;
use crate::ports::inbound::LockingScriptCodec;
use overlay_crypto::PublicKey;

/// The default [`LockingScriptCodec`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PushDropCodec;

impl PushDropCodec {
    pub fn new() -> Self {
        Self
    }
}

impl LockingScriptCodec for PushDropCodec {
    fn decode(&self, script: &[u8]) -> Result<PushDropToken, TokenCodecError> {
        let chunks = parse_chunks(script)?;
        if chunks.len() < 2 {
            return Err(TokenCodecError::NotPushDrop("script too short".to_string()));
        }

        let checksig = Chunk::Op(OP_CHECKSIG);
        let (lock, body) = if chunks[1] == checksig {
            (&chunks[0], &chunks[2..])
        } else if chunks.last() == Some(&checksig) {
            let split = chunks.len() - 2;
            (&chunks[split], &chunks[..split])
        } else {
            return Err(TokenCodecError::NotPushDrop(
                "no <pubkey> OP_CHECKSIG lock".to_string(),
            ));
        };

        let locking_public_key = lock
            .data()
            .and_then(|bytes| PublicKey::from_bytes(bytes).ok())
            .ok_or(TokenCodecError::InvalidLockingKey)?;

        let fields: Vec<Vec<u8>> = body
            .iter()
            .map_while(|chunk| chunk.data().map(<[u8]>::to_vec))
            .collect();
        if fields.is_empty() {
            return Err(TokenCodecError::NoFields);
        }

        let mut dropped = 0;
        for chunk in &body[fields.len()..] {
            dropped += chunk.drop_count().ok_or_else(|| {
                TokenCodecError::NotPushDrop(format!("unexpected chunk after fields: {chunk:?}"))
            })?;
        }
        if dropped != fields.len() {
            return Err(TokenCodecError::DropMismatch {
                pushed: fields.len(),
                dropped,
            });
        }

        Ok(PushDropToken {
            locking_public_key,
            fields,
        })
    }

    fn encode(
        &self,
        fields: &[Vec<u8>],
        locking_public_key: &PublicKey,
    ) -> Result<Vec<u8>, TokenCodecError> {
        if fields.is_empty() {
            return Err(TokenCodecError::NoFields);
        }

        let mut script = Vec::new();
        push_data(&mut script, &locking_public_key.to_bytes())?;
        script.push(OP_CHECKSIG);
        for field in fields {
            push_data(&mut script, field)?;
        }
        push_drops(&mut script, fields.len());
        Ok(script)
    }
}

/// Decode with [`PushDropCodec`] and require the four advertisement fields.
pub fn decode_token_fields(script: &[u8]) -> Result<PushDropToken, TokenCodecError> {
    PushDropCodec.decode_token(script)
}
