// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Chunked status blocks: a group of related lines reported under one
//! [`StatusKind`], grouped visually by a leading / continuing / trailing glyph.
//!
//! ```text
//! [INFO] ┌ downloading manifests
//!        │ resolving versions
//!        └ done in 1.2s
//! ```

use std::{fmt::Write as _, io::Write as _};

use smallvec::SmallVec;

use crate::{InlineString, MAX_DECORATION_WIDTH, OutputDevice, StatusKind,
            lock_output_device_as_mut, render_decoration_into};

/// Most chunks are a handful of lines; spill to the heap past this.
pub type ChunkLines = SmallVec<[InlineString; 8]>;

const GLYPH_LEADING: char = '┌';
const GLYPH_CONTINUING: char = '│';
const GLYPH_TRAILING: char = '└';
const GLYPH_SINGLE: char = '─';

/// Renders a chunk of related lines. Only the first line carries the kind's
/// decoration; continuation lines are indented to the same message column. An empty
/// `lines` slice renders an empty chunk.
#[must_use]
pub fn render_chunk_lines(kind: StatusKind, lines: &[&str]) -> ChunkLines {
    let mut acc_lines = ChunkLines::new();
    let last_index = match lines.len() {
        0 => return acc_lines,
        len => len - 1,
    };

    for (index, line) in lines.iter().enumerate() {
        let glyph = match (index, last_index) {
            (0, 0) => GLYPH_SINGLE,
            (0, _) => GLYPH_LEADING,
            (index, last) if index == last => GLYPH_TRAILING,
            _ => GLYPH_CONTINUING,
        };

        let mut acc = InlineString::new();
        if index == 0 {
            render_decoration_into(&mut acc, kind);
        } else {
            for _ in 0..*MAX_DECORATION_WIDTH {
                acc.push(' ');
            }
        }
        _ = writeln!(acc, " {glyph} {line}");
        acc_lines.push(acc);
    }

    acc_lines
}

/// Writes a rendered chunk to `device`, one line per write.
pub fn print_chunk_to(device: &OutputDevice, kind: StatusKind, lines: &[&str]) {
    let rendered = render_chunk_lines(kind, lines);
    let mut_ref = lock_output_device_as_mut!(device);
    for line in &rendered {
        // We don't care about the result of this operation.
        mut_ref.write_all(line.as_bytes()).ok();
    }
    // We don't care about the result of this operation.
    mut_ref.flush().ok();
}
