//! # ase-reader
//!
//! A reader for Aseprite animation files (`.ase` / `.aseprite`).
//!
//! Decodes the header, frames and chunk structure of a file and can filter
//! it down to one layer group and a set of frame tags, as an importer
//! needs when a single file holds several characters or effects.
//! Pixel data is kept as stored; decoding images is left to the caller.
pub mod ase;

// Re-export the main types for convenience
pub use ase::{
    AseError,
    AseFile,
    Result,
    filter::reconstruct_hierarchy,
    format::{
        chunks::{ChunkDecoder, DefaultChunkDecoder},
        frame::AseFrame,
    },
    types::{
        chunks::{
            CelChunk,
            CelContent,
            Chunk,
            FrameTagEntry,
            FrameTagsChunk,
            LayerChunk,
            OtherChunk,
            PaletteChunk,
            PaletteEntry,
        },
        models::{
            AseHeader,
            BlendMode,
            ChunkType,
            ColorDepth,
            ImportSelector,
            LayerFlags,
            LayerType,
            LoopDirection,
        },
    },
    utils::AseReader,
    visitor::AseVisitor,
};
