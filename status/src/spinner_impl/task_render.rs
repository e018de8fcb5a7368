// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Rendering and painting of the in-progress line and the terminal DONE/FAIL line.
//!
//! Rendering is pure (`render_*` functions return the text); painting queues crossterm
//! commands on the output device. The in-progress paint overwrites the current line in
//! place and leaves the caret on it, so the next tick (or the final paint) replaces it.

use std::{fmt::Write as _, io::Write as _};

use crossterm::{QueueableCommand,
                cursor::{MoveToColumn, MoveUp},
                style::Print,
                terminal::{Clear, ClearType}};
use miette::IntoDiagnostic;

use crate::{InlineString, MAX_DECORATION_WIDTH, OutputDevice, StatusKind, TaskStatus,
            clip_text_to_width, lock_output_device_as_mut, render_status_line};

/// Renders one in-progress BUSY line: optional animation frame, description, optional
/// `(current/total)` suffix, clipped so the line never wraps at `display_width`.
#[must_use]
pub fn render_pending_tick(
    status: &TaskStatus,
    maybe_frame: Option<&str>,
    display_width: usize,
) -> InlineString {
    let mut message = InlineString::new();
    if let Some(frame) = maybe_frame {
        _ = write!(message, "{frame} ");
    }
    message.push_str(&status.description);
    if let Some(progress) = status.maybe_progress {
        _ = write!(message, " {progress}");
    }

    let clipped = clip_text_to_width(&message, message_budget(display_width));
    render_status_line(&clipped, StatusKind::Busy, "")
}

/// Renders the terminal status line for a finished task: the final description (and
/// final progress, if configured) under the given kind (DONE or FAIL).
#[must_use]
pub fn render_final_tick(
    status: &TaskStatus,
    kind: StatusKind,
    display_width: usize,
) -> InlineString {
    let mut message = InlineString::new();
    message.push_str(&status.description);
    if let Some(progress) = status.maybe_progress {
        _ = write!(message, " {progress}");
    }

    let clipped = clip_text_to_width(&message, message_budget(display_width));
    render_status_line(&clipped, kind, "")
}

/// Columns left for the message once the decoration column and its separator space are
/// spoken for.
fn message_budget(display_width: usize) -> usize {
    display_width.saturating_sub(*MAX_DECORATION_WIDTH + 1)
}

/// Paints one in-progress tick: return to column 0, erase the stale line, print the
/// new one, and move the caret back up so the next paint lands on the same line.
///
/// # Errors
///
/// Returns an error if queueing or flushing the underlying writes fails.
pub fn print_pending_tick(device: &OutputDevice, output: &str) -> miette::Result<()> {
    let mut_ref = lock_output_device_as_mut!(device);
    mut_ref
        .queue(MoveToColumn(0))
        .into_diagnostic()?
        .queue(Clear(ClearType::CurrentLine))
        .into_diagnostic()?
        .queue(Print(format!("{output}\n")))
        .into_diagnostic()?
        .queue(MoveUp(1))
        .into_diagnostic()?;
    mut_ref.flush().into_diagnostic()?;
    Ok(())
}

/// Paints the terminal status line over whatever in-progress line is on screen, and
/// terminates it with a newline (the line is final, nothing overwrites it).
///
/// # Errors
///
/// Returns an error if queueing or flushing the underlying writes fails.
pub fn print_final_tick(device: &OutputDevice, output: &str) -> miette::Result<()> {
    let mut_ref = lock_output_device_as_mut!(device);
    mut_ref
        .queue(MoveToColumn(0))
        .into_diagnostic()?
        .queue(Clear(ClearType::CurrentLine))
        .into_diagnostic()?
        .queue(Print(format!("{output}\n")))
        .into_diagnostic()?;
    mut_ref.flush().into_diagnostic()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{render_final_tick, render_pending_tick};
    use crate::{StatusKind, TaskStatus};

    const WIDTH: usize = 80;

    fn strip(text: &str) -> String {
        String::from_utf8(strip_ansi_escapes::strip(text.as_bytes())).expect("utf8")
    }

    #[test]
    fn pending_tick_contains_busy_tag_and_description() {
        let status = TaskStatus::new("loading".to_string(), None);
        let output = render_pending_tick(&status, None, WIDTH);
        assert_eq!(strip(&output), "[BUSY] loading");
    }

    #[test]
    fn pending_tick_embeds_the_animation_frame_as_prefix() {
        let status = TaskStatus::new("loading".to_string(), None);
        let output = render_pending_tick(&status, Some("•..."), WIDTH);
        assert_eq!(strip(&output), "[BUSY] •... loading");
    }

    #[test]
    fn pending_tick_appends_the_progress_fraction() {
        let mut status = TaskStatus::new("loading".to_string(), Some(10));
        if let Some(progress) = status.maybe_progress.as_mut() {
            progress.current = 7;
        }
        let output = render_pending_tick(&status, None, WIDTH);
        assert_eq!(strip(&output), "[BUSY] loading (7/10)");
    }

    #[test]
    fn pending_tick_clips_to_the_display_width() {
        let status = TaskStatus::new("x".repeat(200), None);
        let output = render_pending_tick(&status, None, 40);
        let stripped = strip(&output);
        assert!(stripped.len() <= 40 + '…'.len_utf8());
        assert!(stripped.ends_with('…'));
    }

    #[test]
    fn final_tick_renders_done_and_fail_kinds() {
        let status = TaskStatus::new("loading".to_string(), None);
        let done = render_final_tick(&status, StatusKind::Done, WIDTH);
        assert_eq!(strip(&done), "[DONE] loading");
        let fail = render_final_tick(&status, StatusKind::Fail, WIDTH);
        assert_eq!(strip(&fail), "[FAIL] loading");
    }
}
