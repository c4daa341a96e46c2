//! # Chunk Payload Decoding
//!
//! A chunk on disk is a 6-byte header (DWORD size, WORD type) followed by
//! its payload. The frame decoder handles the header and hands the payload
//! to a [`ChunkDecoder`] as a reader bounded to exactly the declared length,
//! so a decoder can never desynchronise the frame's cursor.

use log::trace;

use crate::ase::types::chunks::*;
use crate::ase::types::error::Result;
use crate::ase::types::models::{BlendMode, ChunkType, LayerFlags, LayerType, LoopDirection};
use crate::ase::utils::AseReader;

/// Turns one chunk payload into a [`Chunk`].
///
/// Implementations must not fail on unfamiliar chunk types; those are
/// returned as [`Chunk::Other`].
pub trait ChunkDecoder {
    /// `payload` holds exactly the declared payload bytes (chunk size minus
    /// the chunk header).
    fn decode_chunk(&self, chunk_type: ChunkType, payload: &mut AseReader<'_>) -> Result<Chunk>;
}

/// Decoder for the chunk kinds this crate understands.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultChunkDecoder;

impl ChunkDecoder for DefaultChunkDecoder {
    fn decode_chunk(&self, chunk_type: ChunkType, payload: &mut AseReader<'_>) -> Result<Chunk> {
        match chunk_type {
            ChunkType::Layer => parse_layer(payload).map(Chunk::Layer),
            ChunkType::Cel => parse_cel(payload).map(Chunk::Cel),
            ChunkType::FrameTags => parse_frame_tags(payload).map(Chunk::FrameTags),
            ChunkType::Palette => parse_palette(payload).map(Chunk::Palette),
            other => {
                trace!("Keeping {} chunk as passthrough ({} bytes)", other, payload.remaining());
                Ok(Chunk::Other(OtherChunk {
                    chunk_type: other,
                    data: payload.read_to_end()?,
                }))
            }
        }
    }
}

/// Layer chunk (0x2004).
pub fn parse_layer(reader: &mut AseReader) -> Result<LayerChunk> {
    let flags = LayerFlags(reader.read_u16()?);
    let layer_type = LayerType::from(reader.read_u16()?);
    let child_level = reader.read_u16()?;
    // Default width/height, ignored by the format itself.
    reader.skip(4)?;
    let blend_mode = BlendMode::from(reader.read_u16()?);
    let opacity = reader.read_u8()?;
    reader.skip(3)?;
    let name = reader.read_string()?;
    let tileset_index = match layer_type {
        LayerType::Tilemap => Some(reader.read_u32()?),
        _ => None,
    };

    trace!("Layer '{}': type={:?}, child_level={}", name, layer_type, child_level);

    Ok(LayerChunk {
        flags,
        layer_type,
        child_level,
        blend_mode,
        opacity,
        name,
        tileset_index,
        index: None,
        group: None,
        parent: None,
    })
}

/// Cel chunk (0x2005). Image data is kept undecoded.
pub fn parse_cel(reader: &mut AseReader) -> Result<CelChunk> {
    let layer_index = reader.read_u16()?;
    let x = reader.read_i16()?;
    let y = reader.read_i16()?;
    let opacity = reader.read_u8()?;
    let cel_type = reader.read_u16()?;
    let z_index = reader.read_i16()?;
    reader.skip(5)?;

    let content = match cel_type {
        0 => CelContent::RawImage {
            width: reader.read_u16()?,
            height: reader.read_u16()?,
            pixels: reader.read_to_end()?,
        },
        1 => CelContent::Linked {
            frame_position: reader.read_u16()?,
        },
        2 => CelContent::CompressedImage {
            width: reader.read_u16()?,
            height: reader.read_u16()?,
            data: reader.read_to_end()?,
        },
        3 => CelContent::CompressedTilemap {
            data: reader.read_to_end()?,
        },
        other => CelContent::Unknown {
            cel_type: other,
            data: reader.read_to_end()?,
        },
    };

    trace!("Cel for layer {}: type={} at ({}, {})", layer_index, cel_type, x, y);

    Ok(CelChunk {
        layer_index,
        x,
        y,
        opacity,
        z_index,
        content,
    })
}

/// Frame tags chunk (0x2018).
pub fn parse_frame_tags(reader: &mut AseReader) -> Result<FrameTagsChunk> {
    let count = reader.read_u16()?;
    reader.skip(8)?;

    let mut entries = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let from_frame = reader.read_u16()?;
        let to_frame = reader.read_u16()?;
        let loop_direction = LoopDirection::from(reader.read_u8()?);
        let repeat = reader.read_u16()?;
        reader.skip(6)?;
        let color = [reader.read_u8()?, reader.read_u8()?, reader.read_u8()?];
        reader.skip(1)?;
        let name = reader.read_string()?;
        trace!("Tag '{}': frames {}..={}", name, from_frame, to_frame);
        entries.push(FrameTagEntry {
            from_frame,
            to_frame,
            loop_direction,
            repeat,
            color,
            name,
        });
    }

    Ok(FrameTagsChunk { entries })
}

/// Palette chunk (0x2019).
pub fn parse_palette(reader: &mut AseReader) -> Result<PaletteChunk> {
    const HAS_NAME: u16 = 0x0001;

    let palette_size = reader.read_u32()?;
    let first_index = reader.read_u32()?;
    let last_index = reader.read_u32()?;
    reader.skip(8)?;

    let count = last_index
        .checked_sub(first_index)
        .map(|span| span as usize + 1)
        .unwrap_or(0);
    // Each entry is at least 6 bytes; don't trust the header for the allocation.
    let mut entries = Vec::with_capacity(count.min(reader.remaining() / 6));
    for _ in 0..count {
        let flags = reader.read_u16()?;
        let rgba = [reader.read_u8()?, reader.read_u8()?, reader.read_u8()?, reader.read_u8()?];
        let name = if flags & HAS_NAME != 0 {
            Some(reader.read_string()?)
        } else {
            None
        };
        entries.push(PaletteEntry { rgba, name });
    }

    Ok(PaletteChunk {
        palette_size,
        first_index,
        last_index,
        entries,
    })
}
