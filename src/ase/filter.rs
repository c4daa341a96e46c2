//! Layer-group and tag filtering.
//!
//! Layers are stored flat in frame 0, each with a `child_level` that only
//! says how deep it sits relative to the layer before it. The filter
//! rebuilds the hierarchy from that stream, picks the layers living under
//! the selected group, keeps the selected tags, and prunes frames and cels
//! so that what remains is a self-consistent animation.
//!
//! Group and parent come from one ancestor stack: `group` is the oldest
//! entry, `parent` the newest. A drop in `child_level` pops a single entry
//! however many levels it spans, so for hierarchies deeper than one level
//! the results differ from a strict tree walk. Importers depend on this
//! behaviour, so it is kept as is.

use std::collections::HashSet;
use log::debug;

use super::format::frame::AseFrame;
use super::reader::AseFile;
use super::types::chunks::{Chunk, FrameTagsChunk, LayerChunk};
use super::types::models::ImportSelector;

/// Assigns `index`, `group` and `parent` to every layer, in file order.
///
/// Running it again on the same layers yields the same assignments.
pub fn reconstruct_hierarchy(layers: &mut [LayerChunk]) {
    let mut ancestors: Vec<usize> = Vec::new();
    let mut previous_level: Option<u16> = None;

    for (index, layer) in layers.iter_mut().enumerate() {
        if let Some(previous) = previous_level {
            if layer.child_level > previous {
                ancestors.push(index - 1);
            } else if layer.child_level < previous {
                // A level drop before any nesting has nothing to pop.
                ancestors.pop();
            }
        }

        layer.group = ancestors.first().copied();
        layer.parent = ancestors.last().copied();
        layer.index = Some(index);

        previous_level = Some(layer.child_level);
    }
}

/// True if the layer's group is named with the selector's group prefix.
///
/// Layers without a group (top-level layers) never match.
pub fn is_match(layers: &[LayerChunk], layer: &LayerChunk, selector: &ImportSelector) -> bool {
    layer
        .group
        .and_then(|group| layers.get(group))
        .is_some_and(|group| selector.matches_group(&group.name))
}

/// Indices of the layers selected for import.
pub fn matching_layer_indices(layers: &[LayerChunk], selector: &ImportSelector) -> HashSet<usize> {
    layers
        .iter()
        .filter(|layer| is_match(layers, layer, selector))
        .filter_map(|layer| layer.index)
        .collect()
}

/// Drops every tag the selector does not keep. Survivors keep their order.
pub fn filter_tags(tags: &mut FrameTagsChunk, selector: &ImportSelector) {
    tags.entries.retain(|entry| selector.keeps_tag(&entry.name));
}

/// Runs the full filter over an assembled file.
pub(crate) fn apply(file: &mut AseFile, selector: &ImportSelector) {
    // Layers now live in `file.layers`; frame 0 no longer needs them as chunks.
    if let Some(first) = file.frames.first_mut() {
        first.chunks.retain(|chunk| !matches!(chunk, Chunk::Layer(_)));
    }

    reconstruct_hierarchy(&mut file.layers);
    let matching = matching_layer_indices(&file.layers, selector);
    debug!(
        "Group prefix '{}' matches {} of {} layers",
        selector.group_prefix,
        matching.len(),
        file.layers.len()
    );

    if let Some(tags) = file.tags.as_mut() {
        let before = tags.entries.len();
        filter_tags(tags, selector);
        debug!("Kept {} of {} tags", tags.entries.len(), before);

        // Frame 0 carries the same table; keep it in step for visitors.
        if let Some(first) = file.frames.first_mut()
            && let Some(Chunk::FrameTags(table)) = first
                .chunks
                .iter_mut()
                .find(|chunk| matches!(chunk, Chunk::FrameTags(_)))
        {
            filter_tags(table, selector);
        }
    }

    let tags = file.tags.as_ref().map(|t| t.entries.as_slice()).unwrap_or(&[]);
    let frames = std::mem::take(&mut file.frames);
    let total_frames = frames.len();
    let mut removed_cels = 0;

    let kept: Vec<AseFrame> = frames
        .into_iter()
        .filter(|frame| tags.is_empty() || tags.iter().any(|tag| tag.contains(frame.index)))
        .map(|mut frame| {
            let before = frame.chunks.len();
            frame.chunks.retain(|chunk| match chunk {
                Chunk::Cel(cel) => matching.contains(&(cel.layer_index as usize)),
                _ => true,
            });
            removed_cels += before - frame.chunks.len();
            frame
        })
        .collect();

    debug!(
        "Kept {} of {} frames, removed {} cels",
        kept.len(),
        total_frames,
        removed_cels
    );
    file.frames = kept;
}
