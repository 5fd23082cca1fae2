//! Decode errors.

use core::fmt;

/// Errors that can occur while decoding configuration space structures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// The structure at `offset` needs `size` bytes but the buffer is only
    /// `len` bytes long.
    BufferTooShort {
        /// Offset the structure starts at.
        offset: usize,
        /// Size of the structure in bytes.
        size: usize,
        /// Length of the buffer.
        len: usize,
    },
    /// A typed capability decoder found a node with a different ID.
    UnexpectedCapability {
        /// Offset of the capability node.
        offset: usize,
        /// ID the decoder understands.
        expected: u16,
        /// ID found in the node header.
        found: u16,
    },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::BufferTooShort { offset, size, len } => write!(
                f,
                "buffer too short: {size} bytes at offset {offset:#x} need {} bytes, have {len}",
                offset.saturating_add(size)
            ),
            Self::UnexpectedCapability {
                offset,
                expected,
                found,
            } => write!(
                f,
                "capability at offset {offset:#x} has ID {found:#x}, expected {expected:#x}"
            ),
        }
    }
}

impl core::error::Error for DecodeError {}
