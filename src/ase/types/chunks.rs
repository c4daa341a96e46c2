//! Decoded chunk records.
//!
//! A frame is a sequence of [`Chunk`]s. The set of variants is closed: the
//! records the filter and the visitors care about are decoded, everything
//! else is carried as an opaque [`OtherChunk`].

use super::models::{BlendMode, ChunkType, LayerFlags, LayerType, LoopDirection};

/// One typed record within a frame.
#[derive(Debug, Clone, PartialEq)]
pub enum Chunk {
    Layer(LayerChunk),
    Cel(CelChunk),
    FrameTags(FrameTagsChunk),
    Palette(PaletteChunk),
    Other(OtherChunk),
}

impl Chunk {
    pub fn chunk_type(&self) -> ChunkType {
        match self {
            Chunk::Layer(_) => ChunkType::Layer,
            Chunk::Cel(_) => ChunkType::Cel,
            Chunk::FrameTags(_) => ChunkType::FrameTags,
            Chunk::Palette(_) => ChunkType::Palette,
            Chunk::Other(other) => other.chunk_type,
        }
    }

    pub fn as_layer(&self) -> Option<&LayerChunk> {
        match self {
            Chunk::Layer(layer) => Some(layer),
            _ => None,
        }
    }

    pub fn as_cel(&self) -> Option<&CelChunk> {
        match self {
            Chunk::Cel(cel) => Some(cel),
            _ => None,
        }
    }

    pub fn as_frame_tags(&self) -> Option<&FrameTagsChunk> {
        match self {
            Chunk::FrameTags(tags) => Some(tags),
            _ => None,
        }
    }
}

/// A layer or layer group, as declared in frame 0.
///
/// `child_level` only has meaning relative to the layer before it. The
/// `index`, `group` and `parent` fields are not stored in the file: they are
/// filled in by [`reconstruct_hierarchy`](crate::ase::filter::reconstruct_hierarchy)
/// and refer to positions in the file's full layer list.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerChunk {
    pub flags: LayerFlags,
    pub layer_type: LayerType,
    pub child_level: u16,
    pub blend_mode: BlendMode,
    pub opacity: u8,
    pub name: String,
    /// Only present on tilemap layers.
    pub tileset_index: Option<u32>,

    pub index: Option<usize>,
    pub group: Option<usize>,
    pub parent: Option<usize>,
}

impl LayerChunk {
    pub fn new(name: impl Into<String>, child_level: u16) -> Self {
        Self {
            flags: LayerFlags(LayerFlags::VISIBLE | LayerFlags::EDITABLE),
            layer_type: LayerType::Normal,
            child_level,
            blend_mode: BlendMode::Normal,
            opacity: 255,
            name: name.into(),
            tileset_index: None,
            index: None,
            group: None,
            parent: None,
        }
    }

    pub fn is_group(&self) -> bool {
        self.layer_type == LayerType::Group
    }
}

/// Per-frame content of one layer.
#[derive(Debug, Clone, PartialEq)]
pub struct CelChunk {
    /// Position of the owning layer in the file's layer list.
    pub layer_index: u16,
    pub x: i16,
    pub y: i16,
    pub opacity: u8,
    pub z_index: i16,
    pub content: CelContent,
}

/// Cel payload. Pixel data is kept exactly as stored.
#[derive(Debug, Clone, PartialEq)]
pub enum CelContent {
    RawImage { width: u16, height: u16, pixels: Vec<u8> },
    Linked { frame_position: u16 },
    /// zlib-compressed pixels, not inflated by this crate.
    CompressedImage { width: u16, height: u16, data: Vec<u8> },
    CompressedTilemap { data: Vec<u8> },
    Unknown { cel_type: u16, data: Vec<u8> },
}

impl CelContent {
    pub fn cel_type(&self) -> u16 {
        match self {
            CelContent::RawImage { .. } => 0,
            CelContent::Linked { .. } => 1,
            CelContent::CompressedImage { .. } => 2,
            CelContent::CompressedTilemap { .. } => 3,
            CelContent::Unknown { cel_type, .. } => *cel_type,
        }
    }
}

/// The file's tag table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameTagsChunk {
    pub entries: Vec<FrameTagEntry>,
}

/// A named, inclusive range of frame indices.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameTagEntry {
    pub from_frame: u16,
    pub to_frame: u16,
    pub loop_direction: LoopDirection,
    /// 0 means repeat forever.
    pub repeat: u16,
    pub color: [u8; 3],
    pub name: String,
}

impl FrameTagEntry {
    pub fn new(name: impl Into<String>, from_frame: u16, to_frame: u16) -> Self {
        Self {
            from_frame,
            to_frame,
            loop_direction: LoopDirection::Forward,
            repeat: 0,
            color: [0, 0, 0],
            name: name.into(),
        }
    }

    /// True if `frame_index` lies within `[from_frame, to_frame]`.
    pub fn contains(&self, frame_index: usize) -> bool {
        frame_index >= self.from_frame as usize && frame_index <= self.to_frame as usize
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaletteChunk {
    pub palette_size: u32,
    pub first_index: u32,
    pub last_index: u32,
    pub entries: Vec<PaletteEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaletteEntry {
    pub rgba: [u8; 4],
    pub name: Option<String>,
}

/// Any chunk kept as raw payload bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct OtherChunk {
    pub chunk_type: ChunkType,
    pub data: Vec<u8>,
}
