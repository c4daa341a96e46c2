//! File header parsing.
//!
//! # Header Structure
//! ```text
//! [4 bytes]  File size
//! [2 bytes]  Magic number (0xA5E0)
//! [2 bytes]  Frame count
//! [2 bytes]  Width, [2 bytes] Height
//! [2 bytes]  Color depth (bits per pixel)
//! [4 bytes]  Flags
//! [2 bytes]  Speed (deprecated)
//! [8 bytes]  Reserved
//! [1 byte]   Transparent palette index
//! [3 bytes]  Reserved
//! [2 bytes]  Number of colors
//! [1 byte]   Pixel width, [1 byte] Pixel height
//! [2 bytes]  Grid x, [2 bytes] Grid y (signed)
//! [2 bytes]  Grid width, [2 bytes] Grid height
//! [84 bytes] Reserved
//! ```

use log::{debug, trace};

use crate::ase::types::error::{AseError, Result};
use crate::ase::types::models::{AseHeader, ColorDepth, HEADER_MAGIC};
use crate::ase::utils::AseReader;

/// Parses the 128-byte header at the start of the file.
pub fn parse(reader: &mut AseReader) -> Result<AseHeader> {
    let file_size = reader.read_u32()?;
    let magic = reader.read_u16()?;
    trace!("Header magic: {:#06x}", magic);
    if magic != HEADER_MAGIC {
        return Err(AseError::InvalidHeader { magic });
    }

    let num_frames = reader.read_u16()?;
    let width = reader.read_u16()?;
    let height = reader.read_u16()?;
    let color_depth = ColorDepth::from(reader.read_u16()?);
    let flags = reader.read_u32()?;
    let speed = reader.read_u16()?;
    reader.skip(8)?;
    let transparent_index = reader.read_u8()?;
    reader.skip(3)?;
    let num_colors = reader.read_u16()?;
    let pixel_width = reader.read_u8()?;
    let pixel_height = reader.read_u8()?;
    let grid_x = reader.read_i16()?;
    let grid_y = reader.read_i16()?;
    let grid_width = reader.read_u16()?;
    let grid_height = reader.read_u16()?;
    reader.skip(84)?;

    debug!(
        "Header parsed: {}x{} {:?}, {} frames, file size {} bytes",
        width, height, color_depth, num_frames, file_size
    );

    Ok(AseHeader {
        file_size,
        magic,
        num_frames,
        width,
        height,
        color_depth,
        flags,
        speed,
        transparent_index,
        num_colors,
        pixel_width,
        pixel_height,
        grid_x,
        grid_y,
        grid_width,
        grid_height,
    })
}
