//! Core data structures for Aseprite format components.
//!
//! This module defines the fixed-layout records and enumerations used
//! throughout the library:
//! - The file header
//! - Chunk type tags
//! - Layer, blend and tag enumerations
//! - The import selector driving group/tag filtering

/// Magic number of the 128-byte file header.
pub const HEADER_MAGIC: u16 = 0xA5E0;

/// Magic number every frame header must carry.
pub const FRAME_MAGIC: u16 = 0xF1FA;

/// Old chunk-count value telling the reader to look at the wide count.
pub const CHUNK_COUNT_SENTINEL: u32 = 0xFFFF;

/// Size of the file header in bytes.
pub const HEADER_SIZE: usize = 128;

/// Size of a frame header in bytes.
pub const FRAME_HEADER_SIZE: usize = 16;

/// Size of a chunk header (DWORD size + WORD type) in bytes.
pub const CHUNK_HEADER_SIZE: usize = 6;

/// Pixel format of the sprite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorDepth {
    Rgba,
    Grayscale,
    Indexed,
    Unknown(u16),
}

impl From<u16> for ColorDepth {
    fn from(bits: u16) -> Self {
        match bits {
            32 => Self::Rgba,
            16 => Self::Grayscale,
            8 => Self::Indexed,
            other => Self::Unknown(other),
        }
    }
}

impl ColorDepth {
    /// Bytes per pixel, if the depth is known.
    pub fn bytes_per_pixel(&self) -> Option<usize> {
        match self {
            ColorDepth::Rgba => Some(4),
            ColorDepth::Grayscale => Some(2),
            ColorDepth::Indexed => Some(1),
            ColorDepth::Unknown(_) => None,
        }
    }
}

/// Parsed 128-byte file header.
#[derive(Debug, Clone)]
pub struct AseHeader {
    pub file_size: u32,
    pub magic: u16,
    pub num_frames: u16,
    pub width: u16,
    pub height: u16,
    pub color_depth: ColorDepth,
    pub flags: u32,
    /// Deprecated global speed; frames carry their own durations.
    pub speed: u16,
    pub transparent_index: u8,
    pub num_colors: u16,
    pub pixel_width: u8,
    pub pixel_height: u8,
    pub grid_x: i16,
    pub grid_y: i16,
    pub grid_width: u16,
    pub grid_height: u16,
}

/// Chunk type tags.
///
/// Tags the reader does not know are kept as `Unknown` so newer files still load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChunkType {
    OldPalette,
    OldPalette2,
    Layer,
    Cel,
    CelExtra,
    ColorProfile,
    ExternalFiles,
    Mask,
    Path,
    FrameTags,
    Palette,
    UserData,
    Slice,
    Tileset,
    Unknown(u16),
}

impl From<u16> for ChunkType {
    fn from(value: u16) -> Self {
        match value {
            0x0004 => Self::OldPalette,
            0x0011 => Self::OldPalette2,
            0x2004 => Self::Layer,
            0x2005 => Self::Cel,
            0x2006 => Self::CelExtra,
            0x2007 => Self::ColorProfile,
            0x2008 => Self::ExternalFiles,
            0x2016 => Self::Mask,
            0x2017 => Self::Path,
            0x2018 => Self::FrameTags,
            0x2019 => Self::Palette,
            0x2020 => Self::UserData,
            0x2022 => Self::Slice,
            0x2023 => Self::Tileset,
            other => Self::Unknown(other),
        }
    }
}

impl From<ChunkType> for u16 {
    fn from(chunk_type: ChunkType) -> Self {
        match chunk_type {
            ChunkType::OldPalette => 0x0004,
            ChunkType::OldPalette2 => 0x0011,
            ChunkType::Layer => 0x2004,
            ChunkType::Cel => 0x2005,
            ChunkType::CelExtra => 0x2006,
            ChunkType::ColorProfile => 0x2007,
            ChunkType::ExternalFiles => 0x2008,
            ChunkType::Mask => 0x2016,
            ChunkType::Path => 0x2017,
            ChunkType::FrameTags => 0x2018,
            ChunkType::Palette => 0x2019,
            ChunkType::UserData => 0x2020,
            ChunkType::Slice => 0x2022,
            ChunkType::Tileset => 0x2023,
            ChunkType::Unknown(other) => other,
        }
    }
}

impl std::fmt::Display for ChunkType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ChunkType::Unknown(tag) => write!(f, "unknown({:#06x})", tag),
            known => write!(f, "{:?}", known),
        }
    }
}

/// Layer flag bitmask.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayerFlags(pub u16);

impl LayerFlags {
    pub const VISIBLE: u16 = 0x0001;
    pub const EDITABLE: u16 = 0x0002;
    pub const LOCK_MOVEMENT: u16 = 0x0004;
    pub const BACKGROUND: u16 = 0x0008;
    pub const PREFER_LINKED_CELS: u16 = 0x0010;
    pub const COLLAPSED: u16 = 0x0020;
    pub const REFERENCE: u16 = 0x0040;

    pub fn contains(&self, flag: u16) -> bool {
        self.0 & flag == flag
    }

    pub fn is_visible(&self) -> bool {
        self.contains(Self::VISIBLE)
    }

    pub fn is_reference(&self) -> bool {
        self.contains(Self::REFERENCE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerType {
    Normal,
    Group,
    Tilemap,
    Unknown(u16),
}

impl From<u16> for LayerType {
    fn from(value: u16) -> Self {
        match value {
            0 => Self::Normal,
            1 => Self::Group,
            2 => Self::Tilemap,
            other => Self::Unknown(other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendMode {
    Normal,
    Multiply,
    Screen,
    Overlay,
    Darken,
    Lighten,
    ColorDodge,
    ColorBurn,
    HardLight,
    SoftLight,
    Difference,
    Exclusion,
    Hue,
    Saturation,
    Color,
    Luminosity,
    Addition,
    Subtract,
    Divide,
    Unknown(u16),
}

impl From<u16> for BlendMode {
    fn from(value: u16) -> Self {
        match value {
            0 => Self::Normal,
            1 => Self::Multiply,
            2 => Self::Screen,
            3 => Self::Overlay,
            4 => Self::Darken,
            5 => Self::Lighten,
            6 => Self::ColorDodge,
            7 => Self::ColorBurn,
            8 => Self::HardLight,
            9 => Self::SoftLight,
            10 => Self::Difference,
            11 => Self::Exclusion,
            12 => Self::Hue,
            13 => Self::Saturation,
            14 => Self::Color,
            15 => Self::Luminosity,
            16 => Self::Addition,
            17 => Self::Subtract,
            18 => Self::Divide,
            other => Self::Unknown(other),
        }
    }
}

/// Playback direction of a frame tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopDirection {
    Forward,
    Reverse,
    PingPong,
    PingPongReverse,
    Unknown(u8),
}

impl From<u8> for LoopDirection {
    fn from(value: u8) -> Self {
        match value {
            0 => Self::Forward,
            1 => Self::Reverse,
            2 => Self::PingPong,
            3 => Self::PingPongReverse,
            other => Self::Unknown(other),
        }
    }
}

/// Selects which layer group and which frame tags survive an import.
///
/// Both prefixes are literal, case-sensitive `starts_with` matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSelector {
    /// Layers whose group name starts with this prefix are imported, and
    /// tags whose name starts with it are kept.
    pub group_prefix: String,
    /// Tags whose name starts with this prefix are kept regardless of group.
    pub tag_also_prefix: String,
}

impl ImportSelector {
    pub fn new(group_prefix: impl Into<String>, tag_also_prefix: impl Into<String>) -> Self {
        Self {
            group_prefix: group_prefix.into(),
            tag_also_prefix: tag_also_prefix.into(),
        }
    }

    /// True if a group with this name is selected.
    pub fn matches_group(&self, group_name: &str) -> bool {
        group_name.starts_with(&self.group_prefix)
    }

    /// True if a tag with this name survives filtering.
    pub fn keeps_tag(&self, tag_name: &str) -> bool {
        tag_name.starts_with(&self.group_prefix) || tag_name.starts_with(&self.tag_also_prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_type_tags_survive_conversion() {
        for tag in [0x0004u16, 0x2004, 0x2005, 0x2018, 0x2019, 0x2023, 0x7777] {
            assert_eq!(u16::from(ChunkType::from(tag)), tag);
        }
        assert_eq!(ChunkType::from(0x7777), ChunkType::Unknown(0x7777));
        assert_eq!(ChunkType::Unknown(0x7777).to_string(), "unknown(0x7777)");
    }

    #[test]
    fn selector_prefixes_are_literal_and_case_sensitive() {
        let selector = ImportSelector::new("Root", "Always");
        assert!(selector.matches_group("Root/Body"));
        assert!(!selector.matches_group("root"));
        assert!(!selector.matches_group("MyRoot"));

        assert!(selector.keeps_tag("Root_Walk"));
        assert!(selector.keeps_tag("Always_Idle"));
        assert!(!selector.keeps_tag("FX_Blast"));
    }

    #[test]
    fn empty_also_prefix_keeps_every_tag() {
        let selector = ImportSelector::new("Root", "");
        assert!(selector.keeps_tag("FX_Blast"));
    }

    #[test]
    fn layer_flags() {
        let flags = LayerFlags(LayerFlags::VISIBLE | LayerFlags::REFERENCE);
        assert!(flags.is_visible());
        assert!(flags.is_reference());
        assert!(!flags.contains(LayerFlags::BACKGROUND));
    }
}
