//! File format parsing layer for Aseprite files.
//!
//! This module provides the mid-level parsing layer that bridges between the
//! raw byte reader and the high-level [`AseFile`](crate::ase::reader::AseFile).
//!
//! # Module Organization
//!
//! - [`header`]: Parses the fixed 128-byte file header
//! - [`frame`]: Parses frame headers and frames their chunks
//! - [`chunks`]: Decodes individual chunk payloads
//!
//! # Architecture
//!
//! ```text
//! File Structure:
//! ┌─────────────────┐
//! │  File Header    │ ← header::parse()
//! ├─────────────────┤
//! │  Frame 0        │ ← frame::parse()
//! │   ├ chunk       │ ← ChunkDecoder::decode_chunk()
//! │   └ chunk ...   │
//! ├─────────────────┤
//! │  Frame 1 ...    │
//! └─────────────────┘
//! ```

pub mod chunks;
pub mod frame;
pub mod header;
