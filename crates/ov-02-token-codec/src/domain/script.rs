//! # Script Chunks
//!
//! Just enough of the script language to read and write PushDrop locks:
//! data pushes and the handful of opcodes the lock uses.
//!
//! Pushes are minimal, and the mapping between a byte string and its push
//! is one-to-one:
//!
//! | Data | Push |
//! |------|------|
//! | empty | `OP_0` |
//! | single byte 1..=16 | `OP_1`..`OP_16` |
//! | single byte `0x81` | `OP_1NEGATE` |
//! | 1..=75 bytes | length byte + data |
//! | up to 2^8-1 / 2^16-1 / 2^32-1 bytes | `OP_PUSHDATA1/2/4` + LE length + data |

use super::errors::TokenCodecError;

/// Opcode values.
pub mod opcodes {
    pub const OP_0: u8 = 0x00;
    pub const OP_PUSHDATA1: u8 = 0x4c;
    pub const OP_PUSHDATA2: u8 = 0x4d;
    pub const OP_PUSHDATA4: u8 = 0x4e;
    pub const OP_1NEGATE: u8 = 0x4f;
    pub const OP_1: u8 = 0x51;
    pub const OP_16: u8 = 0x60;
    pub const OP_2DROP: u8 = 0x6d;
    pub const OP_DROP: u8 = 0x75;
    pub const OP_CHECKSIG: u8 = 0xac;

    /// Largest direct push.
    pub const MAX_DIRECT_PUSH: usize = 0x4b;
}

use opcodes::*;

/// One parsed element of a script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Chunk {
    /// Data pushed on the stack (small-number opcodes included).
    Push(Vec<u8>),
    /// Any non-push opcode.
    Op(u8),
}

impl Chunk {
    /// Pushed bytes, if this is a push.
    pub fn data(&self) -> Option<&[u8]> {
        match self {
            Chunk::Push(data) => Some(data),
            Chunk::Op(_) => None,
        }
    }

    /// Fields removed from the stack by this chunk.
    pub fn drop_count(&self) -> Option<usize> {
        match self {
            Chunk::Op(OP_DROP) => Some(1),
            Chunk::Op(OP_2DROP) => Some(2),
            _ => None,
        }
    }
}

/// Split a script into chunks.
pub fn parse_chunks(script: &[u8]) -> Result<Vec<Chunk>, TokenCodecError> {
    let mut chunks = Vec::new();
    let mut pos = 0;

    while pos < script.len() {
        let opcode = script[pos];
        let start = pos;
        pos += 1;

        let len = match opcode {
            OP_0 => {
                chunks.push(Chunk::Push(Vec::new()));
                continue;
            }
            OP_1NEGATE => {
                chunks.push(Chunk::Push(vec![0x81]));
                continue;
            }
            OP_1..=OP_16 => {
                chunks.push(Chunk::Push(vec![opcode - OP_1 + 1]));
                continue;
            }
            0x01..=0x4b => opcode as usize,
            OP_PUSHDATA1 => read_len(script, &mut pos, 1, start)?,
            OP_PUSHDATA2 => read_len(script, &mut pos, 2, start)?,
            OP_PUSHDATA4 => read_len(script, &mut pos, 4, start)?,
            _ => {
                chunks.push(Chunk::Op(opcode));
                continue;
            }
        };

        let end = pos
            .checked_add(len)
            .filter(|end| *end <= script.len())
            .ok_or(TokenCodecError::Truncated { offset: start })?;
        chunks.push(Chunk::Push(script[pos..end].to_vec()));
        pos = end;
    }

    Ok(chunks)
}

fn read_len(
    script: &[u8],
    pos: &mut usize,
    width: usize,
    start: usize,
) -> Result<usize, TokenCodecError> {
    let bytes = script
        .get(*pos..*pos + width)
        .ok_or(TokenCodecError::Truncated { offset: start })?;
    *pos += width;
    let mut buf = [0u8; 4];
    buf[..width].copy_from_slice(bytes);
    Ok(u32::from_le_bytes(buf) as usize)
}

/// Append the minimal push of `data`.
pub fn push_data(script: &mut Vec<u8>, data: &[u8]) -> Result<(), TokenCodecError> {
    match data {
        [] => script.push(OP_0),
        [n @ 1..=16] => script.push(OP_1 + n - 1),
        [0x81] => script.push(OP_1NEGATE),
        _ => {
            let len = data.len();
            if len <= MAX_DIRECT_PUSH {
                script.push(len as u8);
            } else if let Ok(len) = u8::try_from(len) {
                script.push(OP_PUSHDATA1);
                script.push(len);
            } else if let Ok(len) = u16::try_from(len) {
                script.push(OP_PUSHDATA2);
                script.extend_from_slice(&len.to_le_bytes());
            } else if let Ok(len) = u32::try_from(len) {
                script.push(OP_PUSHDATA4);
                script.extend_from_slice(&len.to_le_bytes());
            } else {
                return Err(TokenCodecError::FieldTooLarge(len));
            }
            script.extend_from_slice(data);
        }
    }
    Ok(())
}

/// Append `OP_2DROP`s, then one `OP_DROP` for an odd field count.
pub fn push_drops(script: &mut Vec<u8>, field_count: usize) {
    let mut remaining = field_count;
    while remaining > 1 {
        script.push(OP_2DROP);
        remaining -= 2;
    }
    if remaining == 1 {
        script.push(OP_DROP);
    }
}
