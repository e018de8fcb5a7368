// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Pure rendering of single status lines, and the thin print layer that writes them to
//! an [`OutputDevice`]. Rendering never fails; print-layer I/O errors are dropped,
//! since there is nothing useful a caller can do about a terminal write that failed.

use std::{fmt::Write as _, io::Write as _, sync::LazyLock};

use crate::{BULLET_ARROW, InlineString, MAX_DECORATION_WIDTH, OutputDevice, SgrCode,
            StatusKind, lock_output_device_as_mut};

/// Pre-rendered `[✔]` mark (green check) for callers that compose their own lines.
pub static CHECKMARK: LazyLock<InlineString> = LazyLock::new(|| {
    let mut acc = InlineString::new();
    _ = write!(acc, "[{}✔{}] ", SgrCode::ForegroundBrightGreen, SgrCode::Reset);
    acc
});

/// Pre-rendered `[x]` mark (red cross) for callers that compose their own lines.
pub static FAILMARK: LazyLock<InlineString> = LazyLock::new(|| {
    let mut acc = InlineString::new();
    _ = write!(acc, "[{}x{}] ", SgrCode::ForegroundBrightRed, SgrCode::Reset);
    acc
});

/// Renders the colored decoration for `kind` into `acc`, padded with trailing spaces to
/// [`MAX_DECORATION_WIDTH`] so the message column lines up across all kinds.
pub fn render_decoration_into(acc: &mut InlineString, kind: StatusKind) {
    match kind {
        StatusKind::Bullet => {
            _ = write!(acc, "{BULLET_ARROW}");
        }
        StatusKind::None => {}
        _ => match kind.color() {
            Some(color) => {
                _ = write!(acc, "[{color}{}{}]", kind.label(), SgrCode::Reset);
            }
            None => {
                _ = write!(acc, "[{}]", kind.label());
            }
        },
    }
    for _ in kind.decoration_width()..*MAX_DECORATION_WIDTH {
        acc.push(' ');
    }
}

/// Renders one status line: decoration, one space, `message`, then `terminator`
/// verbatim. `message` may be empty. Callers overwrite a line in place by passing `"\r"`
/// as the terminator instead of `"\n"`.
#[must_use]
pub fn render_status_line(
    message: &str,
    kind: StatusKind,
    terminator: &str,
) -> InlineString {
    let mut acc = InlineString::new();
    render_decoration_into(&mut acc, kind);
    acc.push(' ');
    acc.push_str(message);
    acc.push_str(terminator);
    acc
}

/// Writes one rendered status line to `device`. A single write, then flush.
pub fn print_status_line_to(
    device: &OutputDevice,
    message: &str,
    kind: StatusKind,
    terminator: &str,
) {
    let output = render_status_line(message, kind, terminator);
    let mut_ref = lock_output_device_as_mut!(device);
    // We don't care about the result of these operations.
    mut_ref.write_all(output.as_bytes()).ok();
    mut_ref.flush().ok();
}
