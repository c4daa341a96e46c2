//! Read-only traversal of a decoded file.
//!
//! [`AseFile::visit_contents`] walks frames and chunks in their current
//! order (after any filtering) and calls the matching hook on an
//! [`AseVisitor`]. Every hook has an empty default, so a visitor only
//! implements what it needs.

use super::format::frame::AseFrame;
use super::reader::AseFile;
use super::types::chunks::*;

#[allow(unused_variables)]
pub trait AseVisitor {
    fn begin_file(&mut self, file: &AseFile) {}
    fn end_file(&mut self, file: &AseFile) {}

    fn begin_frame(&mut self, frame: &AseFrame) {}
    fn end_frame(&mut self, frame: &AseFrame) {}

    fn visit_layer(&mut self, layer: &LayerChunk) {}
    fn visit_cel(&mut self, cel: &CelChunk) {}
    fn visit_frame_tags(&mut self, tags: &FrameTagsChunk) {}
    fn visit_palette(&mut self, palette: &PaletteChunk) {}
    fn visit_other(&mut self, chunk: &OtherChunk) {}
}

impl Chunk {
    /// Dispatches to the visitor hook for this chunk's kind.
    pub fn visit<V: AseVisitor + ?Sized>(&self, visitor: &mut V) {
        match self {
            Chunk::Layer(layer) => visitor.visit_layer(layer),
            Chunk::Cel(cel) => visitor.visit_cel(cel),
            Chunk::FrameTags(tags) => visitor.visit_frame_tags(tags),
            Chunk::Palette(palette) => visitor.visit_palette(palette),
            Chunk::Other(other) => visitor.visit_other(other),
        }
    }
}

impl AseFile {
    pub fn visit_contents<V: AseVisitor + ?Sized>(&self, visitor: &mut V) {
        visitor.begin_file(self);

        for frame in self.frames() {
            visitor.begin_frame(frame);
            for chunk in &frame.chunks {
                chunk.visit(visitor);
            }
            visitor.end_frame(frame);
        }

        visitor.end_file(self);
    }
}
