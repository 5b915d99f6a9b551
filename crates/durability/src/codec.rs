//! Snapshot frame codec
//!
//! Frame layout, all integers little-endian:
//!
//! ```text
//! +---------+----------+----------+-----------------+
//! | magic 4 | version 4| crc32 4  | payload ...     |
//! +---------+----------+----------+-----------------+
//! ```
//!
//! The CRC covers the payload only. Decoding is strict: wrong magic, an
//! unknown version, a truncated header, or a checksum mismatch all fail
//! with `SnapshotUnreadable` so that boot can distinguish "corrupt" from
//! "absent".

use lumbung_core::{Error, Result};

const MAGIC: &[u8; 4] = b"LMB1";

/// Current snapshot frame format version
pub const FORMAT_VERSION: u32 = 1;

const HEADER_LEN: usize = 12;

/// Wrap a serialized engine payload in a checksummed frame
pub fn encode_frame(payload: &[u8]) -> Vec<u8> {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(payload);
    let crc = hasher.finalize();

    let mut frame = Vec::with_capacity(HEADER_LEN + payload.len());
    frame.extend_from_slice(MAGIC);
    frame.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
    frame.extend_from_slice(&crc.to_le_bytes());
    frame.extend_from_slice(payload);
    frame
}

/// Unwrap a frame, verifying magic, version, and checksum
pub fn decode_frame(blob: &[u8]) -> Result<&[u8]> {
    if blob.len() < HEADER_LEN {
        return Err(Error::SnapshotUnreadable(format!(
            "frame too short: {} bytes",
            blob.len()
        )));
    }
    if &blob[0..4] != MAGIC {
        return Err(Error::SnapshotUnreadable(
            "bad magic, not a ledger snapshot".to_string(),
        ));
    }

    let version = read_u32_le(blob, 4);
    if version != FORMAT_VERSION {
        return Err(Error::SnapshotUnreadable(format!(
            "unsupported frame version {version}"
        )));
    }

    let expected_crc = read_u32_le(blob, 8);
    let payload = &blob[HEADER_LEN..];
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(payload);
    let actual_crc = hasher.finalize();
    if actual_crc != expected_crc {
        return Err(Error::SnapshotUnreadable(format!(
            "checksum mismatch: expected {expected_crc:#010x}, got {actual_crc:#010x}"
        )));
    }

    Ok(payload)
}

fn read_u32_le(blob: &[u8], at: usize) -> u32 {
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(&blob[at..at + 4]);
    u32::from_le_bytes(bytes)
}
