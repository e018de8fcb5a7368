// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The `r3bl_status` library makes the status output of your CLI program colorful and
//! consistent without blocking the main thread. Status-tagged lines (`[OKAY]`,
//! `[WARN]`, `[FAIL]`, ...) all align on the same message column, related lines can be
//! grouped into visual chunks, and long running tasks get an animated busy indicator
//! ⌛ that repaints itself on a background timer while your code does the actual work.
//!
//! # Features
//!
//! 1. Status-tagged print functions. Every [`StatusKind`] maps to a fixed label and
//!    color, and the label column width is computed once per process across all kinds,
//!    so output stays aligned no matter which tags you mix. See [`print_ok`],
//!    [`print_error`], [`print_warning`], [`print_info`], [`print_debug`],
//!    [`print_bullet`], and the lower level [`render_status_line`] if you need the
//!    text without the write.
//!
//! 2. Chunked status blocks. A group of related lines reported under one kind, drawn
//!    with leading / continuing / trailing glyphs. See [`print_chunk`].
//!
//! 3. A busy indicator for long running tasks: [`PendingTask`]. While your operation
//!    runs, a background tokio task repaints an in-progress line in place, animated
//!    via a named [`AnimationTemplate`] if you want a moving glyph, with an optional
//!    `(current/total)` progress suffix. On scope exit the line is replaced by a
//!    terminal DONE/FAIL status, and failures get a structured report (category,
//!    message, cause frames). The ticker is stopped and fully joined before the final
//!    line is painted, so a stale repaint can never clobber it.
//!
//! 4. Scoped output suppression: [`MutedOutput`] swaps a null sink into the
//!    process-global output device and restores the previous destination when
//!    dropped, including during a panic unwind.
//!
//! All writes go through an [`OutputDevice`], which can be `stdout`, `stderr`, a null
//! sink, or a mock buffer ([`StdoutMock`]), which is also how this crate tests
//! itself without a terminal attached.
//!
//! # How to use this crate
//!
//! Print one-shot status lines:
//!
//! ```
//! use r3bl_status::{print_info, print_ok};
//! print_info("resolving dependencies");
//! print_ok("lockfile is up to date");
//! ```
//!
//! Wrap a long running operation in a [`PendingTask`] scope:
//!
//! ```
//! use r3bl_status::{FailurePolicy, OutputDevice, PendingTask, TICK_DELAY_UNIT};
//! # async fn example() -> miette::Result<()> {
//! let task = PendingTask::try_new(
//!     "syncing index",
//!     Some("dots"),
//!     Some(3),
//!     TICK_DELAY_UNIT,
//!     OutputDevice::new_stdout(),
//! )?;
//! let outcome = task
//!     .run_scope(FailurePolicy::default(), |handle| async move {
//!         for step in 1..=3u64 {
//!             handle.update_progress(step)?;
//!             // ... do one unit of work ...
//!         }
//!         Ok("synced")
//!     })
//!     .await?;
//! # _ = outcome;
//! # Ok(())
//! # }
//! ```
//!
//! With [`FailurePolicy::Report`] (the default, inherited behavior) a failing scope
//! renders its failure report and returns `Ok(None)`; the error is swallowed. Use
//! [`FailurePolicy::ReportAndPropagate`] when the caller needs to see the failure.
//!
//! # Concurrency model
//!
//! One background tokio task exists per running [`PendingTask`], communicating with
//! the owner through a single mutex-guarded status record (description, progress,
//! dirty flag, lifecycle state). The ticker owns the in-progress line; the owner owns
//! the final line. Independent tasks may run concurrently, but their writes to a
//! shared device are not serialized against each other, so ordering across
//! instances is unspecified.

// Attach sources.
pub mod public_api;
pub mod spinner_impl;
pub mod status_impl;
pub mod terminal_io;
pub mod test_fixtures;

// Re-export the public API.
pub use public_api::*;
pub use spinner_impl::*;
pub use status_impl::*;
pub use terminal_io::*;
pub use test_fixtures::*;

// Type aliases.
use std::sync::Arc;

use smallstr::SmallString;

/// Disambiguate the type of `StdMutex` from stdlib and tokio to avoid conflicts.
pub type StdMutex<T> = std::sync::Mutex<T>;

/// Type alias for a `Send`-able output destination (raw terminal, mock, null sink).
pub type SendRawTerminal = dyn std::io::Write + Send;
/// Type alias for a `Send`-able raw terminal wrapped in an `Arc<StdMutex>`.
pub type SafeRawTerminal = Arc<StdMutex<SendRawTerminal>>;

/// Stack allocated string storage for rendered lines. When this gets larger than
/// [`DEFAULT_STRING_STORAGE_SIZE`], it will be [`smallvec::SmallVec::spilled`] on the
/// heap.
pub type InlineString = SmallString<[u8; DEFAULT_STRING_STORAGE_SIZE]>;

/// Sized so that a typical short status message fits without spilling; full-width
/// decorated lines spill to the heap, which is fine at one line per tick.
pub const DEFAULT_STRING_STORAGE_SIZE: usize = 64;

/// This macro formats its arguments into a freshly allocated [`InlineString`] (which
/// stays on the stack until it outgrows [`DEFAULT_STRING_STORAGE_SIZE`]).
#[macro_export]
macro_rules! inline_string {
    ($($arg:tt)*) => {{
        use std::fmt::Write as _;
        let mut acc = $crate::InlineString::new();
        // We don't care about the result of this operation.
        write!(acc, $($arg)*).ok();
        acc
    }};
}
