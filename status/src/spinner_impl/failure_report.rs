// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The structured report rendered after a FAIL line: failure category, failure
//! message, and the cause frames (one BULLET line each, oldest first).

use std::fmt::Write as _;

use miette::Diagnostic as _;
use smallvec::SmallVec;

use crate::{InlineString, StatusKind, inline_string, render_status_line};

/// Captured detail about a failure that escaped a task scope.
///
/// `frames` is the failure's cause chain, ordered oldest (root cause) first. For an
/// error with no underlying causes the chain is that error's own message, so a report
/// always carries at least one frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FailureReport {
    pub category: InlineString,
    pub message: InlineString,
    pub frames: SmallVec<[InlineString; 4]>,
}

impl FailureReport {
    #[must_use]
    pub fn new(category: impl AsRef<str>, message: impl AsRef<str>) -> Self {
        let message = InlineString::from(message.as_ref());
        Self {
            category: InlineString::from(category.as_ref()),
            frames: SmallVec::from_elem(message.clone(), 1),
            message,
        }
    }

    /// Builds a report from a [`miette::Report`]: the category is the diagnostic code
    /// when one is present, the message is the outermost error, and the frames are the
    /// cause chain reversed so the root cause comes first.
    #[must_use]
    pub fn from_report(report: &miette::Report) -> Self {
        let category = match report.code() {
            Some(code) => inline_string!("{code}"),
            None => InlineString::from("Error"),
        };

        let mut frames: SmallVec<[InlineString; 4]> =
            report.chain().map(|cause| inline_string!("{cause}")).collect();
        frames.reverse();

        Self {
            category,
            message: inline_string!("{report}"),
            frames,
        }
    }

    /// Renders the report: one FAIL line carrying category and message, then one
    /// BULLET line per cause frame.
    #[must_use]
    pub fn render_lines(&self) -> SmallVec<[InlineString; 8]> {
        let mut acc_lines = SmallVec::new();

        let mut error_line = InlineString::new();
        _ = write!(error_line, "ERROR ({}): {}", self.category, self.message);
        acc_lines.push(render_status_line(&error_line, StatusKind::Fail, "\n"));

        for frame in &self.frames {
            acc_lines.push(render_status_line(frame, StatusKind::Bullet, "\n"));
        }

        acc_lines
    }
}
