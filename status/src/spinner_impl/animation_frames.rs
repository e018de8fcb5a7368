// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use strum_macros::{EnumIter, EnumString};

use crate::StatusError;

pub const DOTS_FRAMES: [&str; 4] = ["•...", ".•..", "..•.", "...•"];
pub const BAR_FRAMES: [&str; 4] = ["=   ", " =  ", "  = ", "   ="];
pub const SHORT_ARROW_FRAMES: [&str; 4] = [">   ", " >  ", "  > ", "   >"];
pub const ARROW_FRAMES: [&str; 4] = ["->  ", " -> ", "  ->", ">  -"];

/// The process-wide read-only registry of busy animations, keyed by `snake_case` name
/// (`"dots"`, `"bar"`, `"short_arrow"`, `"arrow"`). Each template is a fixed, ordered,
/// non-empty frame table; cycling through it forever is what makes the glyph move.
#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum AnimationTemplate {
    Dots,
    Bar,
    ShortArrow,
    Arrow,
}

impl AnimationTemplate {
    /// Registry lookup by name.
    ///
    /// # Errors
    ///
    /// Returns [`StatusError::UnknownAnimation`] if `name` is not a registered
    /// template name.
    pub fn lookup(name: &str) -> Result<AnimationTemplate, StatusError> {
        name.parse()
            .map_err(|_| StatusError::UnknownAnimation(name.to_string()))
    }

    #[must_use]
    #[rustfmt::skip]
    pub fn frames(&self) -> &'static [&'static str] {
        match self {
            AnimationTemplate::Dots       => &DOTS_FRAMES,
            AnimationTemplate::Bar        => &BAR_FRAMES,
            AnimationTemplate::ShortArrow => &SHORT_ARROW_FRAMES,
            AnimationTemplate::Arrow      => &ARROW_FRAMES,
        }
    }
}

/// A lazy, infinite, restartable cursor over one template's frame table.
#[derive(Clone, Debug)]
pub struct FrameCycle {
    pub template: AnimationTemplate,
    cursor: usize,
}

impl FrameCycle {
    #[must_use]
    pub fn new(template: AnimationTemplate) -> Self { Self { template, cursor: 0 } }

    /// Returns the current frame and advances the cursor (wrapping around at the end
    /// of the table).
    pub fn next_frame(&mut self) -> &'static str {
        let frames = self.template.frames();
        let frame = frames[self.cursor % frames.len()];
        self.cursor = (self.cursor + 1) % frames.len();
        frame
    }

    /// Re-seeks to the first frame.
    pub fn restart(&mut self) { self.cursor = 0; }
}
