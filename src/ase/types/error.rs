//! Custom error types for the ase-reader crate.

use thiserror::Error;

/// The primary error type for all operations in this crate.
#[derive(Debug, Error)]
pub enum AseError {
    /// An error originating from I/O operations (only when reading from disk).
    #[error("I/O error: {0:?}")]
    Io(#[from] std::io::Error),

    /// A read needed more bytes than remain in the buffer.
    #[error("Truncated input: needed {needed} bytes at offset {offset:#x}, only {available} available")]
    TruncatedInput { offset: u64, needed: u64, available: u64 },

    /// The file header magic number is not `0xA5E0`.
    #[error("Invalid file header: magic {magic:#06x}, expected 0xa5e0")]
    InvalidHeader { magic: u16 },

    /// A frame header magic number is not `0xF1FA`; the stream is out of sync.
    #[error("Malformed frame {frame} at offset {offset:#x}: magic {magic:#06x}, expected 0xf1fa")]
    MalformedFrame { frame: usize, offset: u64, magic: u16 },

    /// A chunk declares a size too small to hold its own header.
    #[error("Invalid chunk at offset {offset:#x}: declared size {size} is smaller than the chunk header")]
    InvalidChunk { offset: u64, size: u32 },
}

/// A convenience `Result` type alias using the crate's `AseError` type.
pub type Result<T> = std::result::Result<T, AseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_frame_and_offset() {
        let err = AseError::MalformedFrame { frame: 3, offset: 0x1a0, magic: 0xdead };
        assert_eq!(
            err.to_string(),
            "Malformed frame 3 at offset 0x1a0: magic 0xdead, expected 0xf1fa"
        );

        let err = AseError::TruncatedInput { offset: 0x80, needed: 4, available: 1 };
        assert_eq!(
            err.to_string(),
            "Truncated input: needed 4 bytes at offset 0x80, only 1 available"
        );
    }
}
