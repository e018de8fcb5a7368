// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Convenience print functions: one status-tagged line per call, written to the
//! process-global output device (see [`crate::global_output_device`]). Each wrapper
//! binds [`print_status`] to one [`StatusKind`].
//!
//! ```
//! use r3bl_status::{print_ok, print_error, print_info};
//! print_info("connecting to build cache");
//! print_ok("restored 42 artifacts");
//! print_error("artifact checksum mismatch");
//! ```

use crate::{StatusKind, global_output_device, print_chunk_to, print_status_line_to};

/// Prints one status line (with a trailing newline) to the process-global output
/// device.
pub fn print_status(message: &str, kind: StatusKind) {
    print_status_line_to(&global_output_device(), message, kind, "\n");
}

pub fn print_ok(message: &str) { print_status(message, StatusKind::Okay); }

pub fn print_error(message: &str) { print_status(message, StatusKind::Fail); }

pub fn print_warning(message: &str) { print_status(message, StatusKind::Warn); }

pub fn print_info(message: &str) { print_status(message, StatusKind::Info); }

pub fn print_debug(message: &str) { print_status(message, StatusKind::Debug); }

pub fn print_bullet(message: &str) { print_status(message, StatusKind::Bullet); }

/// Prints a chunk of related lines grouped under one kind. See
/// [`crate::render_chunk_lines`] for the glyph layout.
pub fn print_chunk(kind: StatusKind, lines: &[&str]) {
    print_chunk_to(&global_output_device(), kind, lines);
}
