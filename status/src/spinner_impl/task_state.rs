// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{fmt::Display, sync::Arc};

use miette::Diagnostic;
use thiserror::Error;

use crate::StdMutex;

/// Lifecycle of a [`crate::PendingTask`]. `Completed` and `Failed` are terminal; the
/// task is not reusable after reaching either.
///
/// ```text
/// Idle → Running → { Completed, Failed }
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TaskState {
    Idle,
    Running,
    Completed,
    Failed,
}

/// Numerator/denominator for the `(current/total)` suffix on an in-progress line. The
/// total is fixed at construction; only the numerator moves.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ProgressCount {
    pub current: u64,
    pub total: u64,
}

impl Display for ProgressCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}/{})", self.current, self.total)
    }
}

/// The record shared between the owner of a [`crate::PendingTask`] and its background
/// ticker. The owner mutates `description` / progress (via the task's update methods,
/// which also raise `dirty`); the ticker reads a consistent snapshot under the lock and
/// lowers `dirty` when it redraws. Holding all of it behind one mutex is what rules
/// out a half-written description being rendered.
#[derive(Clone, Debug)]
pub struct TaskStatus {
    pub description: String,
    pub maybe_progress: Option<ProgressCount>,
    pub dirty: bool,
    pub state: TaskState,
}

impl TaskStatus {
    #[must_use]
    pub fn new(description: String, maybe_total_count: Option<u64>) -> Self {
        Self {
            description,
            maybe_progress: maybe_total_count
                .map(|total| ProgressCount { current: 0, total }),
            // Start dirty so the first tick paints the line even with no animation.
            dirty: true,
            state: TaskState::Idle,
        }
    }
}

pub type SafeTaskStatus = Arc<StdMutex<TaskStatus>>;

/// Errors surfaced by this crate's public API.
///
/// The first variant is a configuration error (caught before any background ticker is
/// spawned); the rest are usage errors (calling a lifecycle method from the wrong
/// state).
#[derive(Debug, Error, Diagnostic)]
pub enum StatusError {
    #[error("unknown busy animation name: {0:?}")]
    #[diagnostic(code(r3bl_status::unknown_animation))]
    UnknownAnimation(String),

    #[error("task can only be started once, current state is {0:?}")]
    #[diagnostic(code(r3bl_status::already_started))]
    AlreadyStarted(TaskState),

    #[error("task is not running, current state is {0:?}")]
    #[diagnostic(code(r3bl_status::not_running))]
    NotRunning(TaskState),

    #[error("task was constructed without a total progress count")]
    #[diagnostic(code(r3bl_status::progress_not_configured))]
    ProgressNotConfigured,
}
