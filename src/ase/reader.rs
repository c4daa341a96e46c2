use std::path::Path;
use log::{debug, info};

use super::filter;
use super::format;
use super::format::chunks::{ChunkDecoder, DefaultChunkDecoder};
use super::format::frame::AseFrame;
use super::types::chunks::{Chunk, FrameTagsChunk, LayerChunk};
use super::types::error::Result;
use super::types::models::{AseHeader, ImportSelector};
use super::utils::AseReader;

/// A decoded Aseprite file.
///
/// Layers and the tag table are taken from frame 0 when the file is read.
/// When an [`ImportSelector`] is given, the file is filtered down to the
/// selected layer group and tags before it is returned.
#[derive(Debug, Clone)]
pub struct AseFile {
    pub header: AseHeader,
    pub(crate) frames: Vec<AseFrame>,
    pub(crate) layers: Vec<LayerChunk>,
    pub(crate) tags: Option<FrameTagsChunk>,
    selector: Option<ImportSelector>,
}

impl AseFile {
    /// Read an Aseprite file from the given path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or does not decode; see
    /// [`AseFile::from_bytes`].
    pub fn open(path: impl AsRef<Path>, selector: Option<&ImportSelector>) -> Result<Self> {
        let path = path.as_ref();
        info!("Opening Aseprite file: {}", path.display());
        let data = std::fs::read(path)?;
        Self::from_bytes(&data, selector)
    }

    /// Decode a complete file held in memory.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The buffer ends before the header or a declared frame/chunk does
    /// - The header or a frame carries the wrong magic number
    /// - A chunk declares a size smaller than its own header
    pub fn from_bytes(data: &[u8], selector: Option<&ImportSelector>) -> Result<Self> {
        Self::from_bytes_with_decoder(data, selector, &DefaultChunkDecoder)
    }

    /// Like [`AseFile::from_bytes`], with a caller-supplied chunk decoder.
    pub fn from_bytes_with_decoder<D: ChunkDecoder + ?Sized>(
        data: &[u8],
        selector: Option<&ImportSelector>,
        decoder: &D,
    ) -> Result<Self> {
        let mut reader = AseReader::new(data);
        let header = format::header::parse(&mut reader)?;

        let mut frames = Vec::with_capacity(header.num_frames as usize);
        for index in 0..header.num_frames as usize {
            frames.push(format::frame::parse(&mut reader, index, decoder)?);
        }

        let (layers, tags): (Vec<LayerChunk>, Option<FrameTagsChunk>) = match frames.first() {
            Some(first) => (
                first.layers().cloned().collect(),
                first.chunks.iter().find_map(Chunk::as_frame_tags).cloned(),
            ),
            None => (Vec::new(), None),
        };
        debug!(
            "Frame 0 declares {} layers and {} tags",
            layers.len(),
            tags.as_ref().map_or(0, |t| t.entries.len())
        );

        let mut file = Self {
            header,
            frames,
            layers,
            tags,
            selector: selector.cloned(),
        };

        if let Some(selector) = selector {
            filter::apply(&mut file, selector);
        }

        info!(
            "Aseprite file read: {}x{}, {} frames, {} layers",
            file.header.width,
            file.header.height,
            file.frames.len(),
            file.layers.len()
        );

        Ok(file)
    }

    /// Frames in file order, minus any removed by filtering.
    pub fn frames(&self) -> &[AseFrame] {
        &self.frames
    }

    /// Every layer declared in frame 0, in file order. Filtering never
    /// removes layers.
    pub fn layers(&self) -> &[LayerChunk] {
        &self.layers
    }

    /// Looks a layer up by its position in the file's layer list.
    pub fn layer(&self, index: usize) -> Option<&LayerChunk> {
        self.layers.get(index)
    }

    pub fn tags(&self) -> Option<&FrameTagsChunk> {
        self.tags.as_ref()
    }

    /// The selector this file was filtered with, if any.
    pub fn selector(&self) -> Option<&ImportSelector> {
        self.selector.as_ref()
    }

    /// Layers selected for import. Empty when the file was read without a selector.
    pub fn matching_layers(&self) -> impl Iterator<Item = &LayerChunk> {
        self.layers.iter().filter(move |layer| {
            self.selector
                .as_ref()
                .is_some_and(|selector| filter::is_match(&self.layers, layer, selector))
        })
    }
}
