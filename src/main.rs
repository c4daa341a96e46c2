use ase_reader::{AseFile, AseFrame, AseVisitor, CelChunk, ImportSelector, OtherChunk};
use std::collections::BTreeMap;
use std::env;

/// Counts chunk kinds per frame for the summary table.
#[derive(Default)]
struct FrameSummary {
    rows: Vec<(usize, u16, usize, usize)>,
    cels: usize,
    other: BTreeMap<String, usize>,
}

impl AseVisitor for FrameSummary {
    fn begin_frame(&mut self, frame: &AseFrame) {
        self.rows.push((frame.index, frame.duration_ms, frame.chunks.len(), 0));
    }

    fn visit_cel(&mut self, _cel: &CelChunk) {
        self.cels += 1;
        if let Some(row) = self.rows.last_mut() {
            row.3 += 1;
        }
    }

    fn visit_other(&mut self, chunk: &OtherChunk) {
        *self.other.entry(chunk.chunk_type.to_string()).or_insert(0) += 1;
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <path-to-aseprite-file> [--group <PREFIX>] [--also <PREFIX>]", args[0]);
        std::process::exit(1);
    }

    let path = &args[1];
    let group = option_value(&args, "--group");
    let also = option_value(&args, "--also");
    if also.is_some() && group.is_none() {
        eprintln!("ERROR: --also requires --group.");
        std::process::exit(1);
    }
    let selector = group.map(|group| ImportSelector::new(group, also.unwrap_or_default()));

    println!("Reading Aseprite file: {}", path);
    if let Some(selector) = &selector {
        println!(
            "Importing group '{}' (extra tags: '{}')",
            selector.group_prefix, selector.tag_also_prefix
        );
    }
    println!("{}", "=".repeat(60));

    let file = match AseFile::open(path, selector.as_ref()) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("\nERROR: Failed to read Aseprite file");
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    };

    println!("\nSprite Information:");
    println!("  Size: {}x{}", file.header.width, file.header.height);
    println!("  Color depth: {:?}", file.header.color_depth);
    println!("  Frames in file: {}", file.header.num_frames);
    println!("  Frames kept: {}", file.frames().len());

    println!("\nLayers:");
    for (i, layer) in file.layers().iter().enumerate() {
        let indent = "  ".repeat(layer.child_level as usize);
        let mut line = format!("  {:>3}. {}{}", i, indent, layer.name);
        if layer.is_group() {
            line.push_str(" [group]");
        }
        if let Some(group) = layer.group.and_then(|g| file.layer(g)) {
            line.push_str(&format!(" (group: {}", group.name));
            if let Some(parent) = layer.parent.and_then(|p| file.layer(p)) {
                line.push_str(&format!(", parent: {}", parent.name));
            }
            line.push(')');
        }
        println!("{}", line);
    }
    if file.selector().is_some() {
        let matching: Vec<&str> = file.matching_layers().map(|l| l.name.as_str()).collect();
        println!("  Imported layers: {}", matching.join(", "));
    }

    println!("\nTags:");
    match file.tags() {
        Some(tags) if !tags.entries.is_empty() => {
            for tag in &tags.entries {
                println!(
                    "  {} [{}..={}] {:?}",
                    tag.name, tag.from_frame, tag.to_frame, tag.loop_direction
                );
            }
        }
        _ => println!("  (none)"),
    }

    let mut summary = FrameSummary::default();
    file.visit_contents(&mut summary);

    println!("\nFrames:");
    for (index, duration, chunks, cels) in &summary.rows {
        println!("  #{:<4} {:>5} ms  {:>3} chunks  {:>3} cels", index, duration, chunks, cels);
    }
    println!("\nTotal cels: {}", summary.cels);
    for (kind, count) in &summary.other {
        println!("  {}: {}", kind, count);
    }
}

fn option_value(args: &[String], flag: &str) -> Option<String> {
    let idx = args.iter().position(|arg| arg == flag)?;
    match args.get(idx + 1) {
        Some(value) => Some(value.clone()),
        None => {
            eprintln!("ERROR: {} flag requires an argument.", flag);
            std::process::exit(1);
        }
    }
}
