//! Frame decoding.
//!
//! # Frame Structure
//! ```text
//! [4 bytes] Bytes in this frame
//! [2 bytes] Magic number (0xF1FA)
//! [2 bytes] Old chunk count (0xFFFF means "see the wide count")
//! [2 bytes] Frame duration in milliseconds
//! [2 bytes] Reserved
//! [4 bytes] Wide chunk count (0 in old files)
//! [chunks]  Each: [4 bytes] size incl. header, [2 bytes] type, payload
//! ```

use log::{debug, trace};

use super::chunks::ChunkDecoder;
use crate::ase::types::chunks::{CelChunk, Chunk, LayerChunk};
use crate::ase::types::error::{AseError, Result};
use crate::ase::types::models::{CHUNK_COUNT_SENTINEL, CHUNK_HEADER_SIZE, ChunkType, FRAME_MAGIC};
use crate::ase::utils::AseReader;

/// One animation frame and the chunks it carries.
#[derive(Debug, Clone, PartialEq)]
pub struct AseFrame {
    /// Position of the frame in the file. Never renumbered, even after
    /// other frames are filtered out.
    pub index: usize,
    pub num_bytes: u32,
    pub magic: u16,
    pub num_chunks: u32,
    pub duration_ms: u16,
    pub chunks: Vec<Chunk>,
}

impl AseFrame {
    pub fn layers(&self) -> impl Iterator<Item = &LayerChunk> {
        self.chunks.iter().filter_map(Chunk::as_layer)
    }

    pub fn cels(&self) -> impl Iterator<Item = &CelChunk> {
        self.chunks.iter().filter_map(Chunk::as_cel)
    }
}

/// Decodes the frame starting at the reader's cursor.
///
/// The cursor ends up exactly past the last declared chunk. A frame whose
/// magic number is wrong means the stream is out of sync, and the whole
/// decode fails with [`AseError::MalformedFrame`].
pub fn parse<D: ChunkDecoder + ?Sized>(
    reader: &mut AseReader,
    index: usize,
    decoder: &D,
) -> Result<AseFrame> {
    let frame_offset = reader.position();

    let num_bytes = reader.read_u32()?;
    let magic = reader.read_u16()?;
    if magic != FRAME_MAGIC {
        return Err(AseError::MalformedFrame {
            frame: index,
            offset: frame_offset,
            magic,
        });
    }
    let declared_chunks = reader.read_u16()? as u32;
    let duration_ms = reader.read_u16()?;
    reader.skip(2)?;
    let wide_chunks = reader.read_u32()?;

    let num_chunks = resolve_chunk_count(declared_chunks, wide_chunks);
    debug!(
        "Frame {} at {:#x}: {} bytes, {} chunks, {} ms",
        index, frame_offset, num_bytes, num_chunks, duration_ms
    );

    let mut chunks = Vec::with_capacity((num_chunks as usize).min(reader.remaining() / CHUNK_HEADER_SIZE));
    for _ in 0..num_chunks {
        chunks.push(parse_chunk(reader, decoder)?);
    }

    Ok(AseFrame {
        index,
        num_bytes,
        magic,
        num_chunks,
        duration_ms,
        chunks,
    })
}

/// The old WORD count wins unless it is the sentinel and the wide count is larger.
fn resolve_chunk_count(declared: u32, wide: u32) -> u32 {
    if declared == CHUNK_COUNT_SENTINEL && declared < wide {
        wide
    } else {
        declared
    }
}

fn parse_chunk<D: ChunkDecoder + ?Sized>(reader: &mut AseReader, decoder: &D) -> Result<Chunk> {
    let offset = reader.position();
    let size = reader.read_u32()?;
    if (size as usize) < CHUNK_HEADER_SIZE {
        return Err(AseError::InvalidChunk { offset, size });
    }
    let chunk_type = ChunkType::from(reader.read_u16()?);

    let mut payload = reader.take(size as usize - CHUNK_HEADER_SIZE)?;
    let chunk = decoder.decode_chunk(chunk_type, &mut payload)?;
    if !payload.is_empty() {
        trace!(
            "{} chunk at {:#x}: {} trailing payload bytes ignored",
            chunk_type,
            offset,
            payload.remaining()
        );
    }

    Ok(chunk)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ase::format::chunks::DefaultChunkDecoder;
    use crate::ase::types::chunks::OtherChunk;

    fn frame_bytes(magic: u16, declared: u16, wide: u32, chunks: &[(u16, &[u8])]) -> Vec<u8> {
        let mut body = Vec::new();
        for (chunk_type, payload) in chunks {
            body.extend_from_slice(&((payload.len() + CHUNK_HEADER_SIZE) as u32).to_le_bytes());
            body.extend_from_slice(&chunk_type.to_le_bytes());
            body.extend_from_slice(payload);
        }
        let mut data = Vec::new();
        data.extend_from_slice(&((body.len() + 16) as u32).to_le_bytes());
        data.extend_from_slice(&magic.to_le_bytes());
        data.extend_from_slice(&declared.to_le_bytes());
        data.extend_from_slice(&100u16.to_le_bytes());
        data.extend_from_slice(&[0, 0]);
        data.extend_from_slice(&wide.to_le_bytes());
        data.extend_from_slice(&body);
        data
    }

    #[test]
    fn chunk_count_policy() {
        assert_eq!(resolve_chunk_count(3, 0), 3);
        assert_eq!(resolve_chunk_count(3, 9), 3);
        assert_eq!(resolve_chunk_count(0xFFFF, 0x10000), 0x10000);
        assert_eq!(resolve_chunk_count(0xFFFF, 2), 0xFFFF);
    }

    #[test]
    fn decodes_chunks_and_stops_at_frame_end() {
        let mut data = frame_bytes(FRAME_MAGIC, 2, 2, &[(0x7777, &[1u8, 2][..]), (0x2007, &[0u8; 0][..])]);
        data.push(0xAB);
        let mut reader = AseReader::new(&data);
        let frame = parse(&mut reader, 4, &DefaultChunkDecoder).unwrap();
        assert_eq!(frame.index, 4);
        assert_eq!(frame.duration_ms, 100);
        assert_eq!(frame.num_chunks, 2);
        assert_eq!(
            frame.chunks[0],
            Chunk::Other(OtherChunk { chunk_type: ChunkType::Unknown(0x7777), data: vec![1, 2] })
        );
        assert_eq!(frame.chunks[1].chunk_type(), ChunkType::ColorProfile);
        assert_eq!(reader.remaining(), 1);
    }

    #[test]
    fn bad_magic_is_fatal() {
        let data = frame_bytes(0xBEEF, 0, 0, &[]);
        let mut reader = AseReader::new(&data);
        match parse(&mut reader, 2, &DefaultChunkDecoder) {
            Err(AseError::MalformedFrame { frame, offset, magic }) => {
                assert_eq!((frame, offset, magic), (2, 0, 0xBEEF));
            }
            other => panic!("expected malformed frame, got {:?}", other),
        }
    }

    #[test]
    fn undersized_chunk_is_rejected() {
        let mut data = frame_bytes(FRAME_MAGIC, 1, 0, &[]);
        data.extend_from_slice(&4u32.to_le_bytes());
        data.extend_from_slice(&0x2005u16.to_le_bytes());
        let mut reader = AseReader::new(&data);
        assert!(matches!(
            parse(&mut reader, 0, &DefaultChunkDecoder),
            Err(AseError::InvalidChunk { offset: 16, size: 4 })
        ));
    }

    #[test]
    fn missing_chunks_are_truncated() {
        let data = frame_bytes(FRAME_MAGIC, 3, 0, &[(0x7777, &[1u8][..])]);
        let mut reader = AseReader::new(&data);
        assert!(matches!(
            parse(&mut reader, 0, &DefaultChunkDecoder),
            Err(AseError::TruncatedInput { .. })
        ));
    }
}
