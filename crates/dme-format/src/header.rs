//! File header handling.
//!
//! | Offset | Length | Field    | Description       |
//! |--------|--------|----------|-------------------|
//! | 0      | 4      | magic    | `"DMNU"`          |
//! | 4      | 2      | version  | u16 big-endian    |
//!
//! The category list follows immediately after the header.

use crate::error::{FormatError, Result};

/// Magic bytes at the start of every menu file.
pub const MAGIC_BYTES: [u8; 4] = *b"DMNU";

/// Current format revision.
///
/// The reader rejects files with a version greater than this.
pub const CURRENT_VERSION: u16 = 1;

/// Size of the fixed header in bytes (magic + version).
pub const HEADER_LEN: usize = 6;

/// Largest count or string length a u16 prefix can describe.
pub const MAX_PREFIXED_LEN: usize = u16::MAX as usize;

/// Build the fixed header.
pub fn build_header() -> [u8; HEADER_LEN] {
    let mut header = [0u8; HEADER_LEN];
    header[..4].copy_from_slice(&MAGIC_BYTES);
    header[4..].copy_from_slice(&CURRENT_VERSION.to_be_bytes());
    header
}

/// Validate the fixed header and return the version it declares.
pub fn parse_header(data: &[u8]) -> Result<u16> {
    if data.len() < 4 || data[..4] != MAGIC_BYTES {
        return Err(FormatError::InvalidMagic);
    }
    if data.len() < HEADER_LEN {
        return Err(FormatError::Truncated {
            context: "header",
        });
    }
    let version = u16::from_be_bytes([data[4], data[5]]);
    if version == 0 || version > CURRENT_VERSION {
        return Err(FormatError::UnsupportedVersion {
            found: version,
            max_supported: CURRENT_VERSION,
        });
    }
    Ok(version)
}
