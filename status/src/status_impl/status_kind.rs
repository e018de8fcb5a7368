// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::sync::LazyLock;

use strum::IntoEnumIterator;
use strum_macros::EnumIter;

use crate::SgrCode;

/// Every status line carries one of these tags. Each kind maps to a fixed label and a
/// fixed color, held in process-wide constant tables ([`Self::label`], [`Self::color`]).
///
/// [`StatusKind::Bullet`] and [`StatusKind::None`] are the two undecorated kinds:
/// `Bullet` renders the ` --->` arrow prefix, and `None` renders the bare message.
#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter)]
pub enum StatusKind {
    Okay,
    Warn,
    Fail,
    Info,
    Busy,
    Done,
    Debug,
    Bullet,
    None,
}

/// Maximum visible width of any [`StatusKind`] decoration, computed once per process.
/// Padding every decoration to this width keeps the message column aligned across all
/// kinds.
pub static MAX_DECORATION_WIDTH: LazyLock<usize> =
    LazyLock::new(|| StatusKind::iter().map(|kind| kind.decoration_width()).max().unwrap_or(0));

impl StatusKind {
    /// The text inside the `[..]` brackets. Empty for the undecorated kinds.
    #[must_use]
    #[rustfmt::skip]
    pub fn label(&self) -> &'static str {
        match self {
            StatusKind::Okay   => "OKAY",
            StatusKind::Warn   => "WARN",
            StatusKind::Fail   => "FAIL",
            StatusKind::Info   => "INFO",
            StatusKind::Busy   => "BUSY",
            StatusKind::Done   => "DONE",
            StatusKind::Debug  => "DBUG",
            StatusKind::Bullet => "",
            StatusKind::None   => "",
        }
    }

    /// Fixed color for the label. The undecorated kinds have no color.
    #[must_use]
    #[rustfmt::skip]
    pub fn color(&self) -> Option<SgrCode> {
        match self {
            StatusKind::Okay   => Some(SgrCode::ForegroundBrightGreen),
            StatusKind::Warn   => Some(SgrCode::ForegroundBrightYellow),
            StatusKind::Fail   => Some(SgrCode::ForegroundBrightRed),
            StatusKind::Info   => Some(SgrCode::ForegroundBrightCyan),
            StatusKind::Busy   => Some(SgrCode::ForegroundBrightCyan),
            StatusKind::Done   => Some(SgrCode::ForegroundBrightGreen),
            StatusKind::Debug  => Some(SgrCode::ForegroundBrightMagenta),
            StatusKind::Bullet => None,
            StatusKind::None   => None,
        }
    }

    /// Visible width of the decoration: label plus brackets for the bracketed kinds,
    /// the arrow for [`StatusKind::Bullet`], zero for [`StatusKind::None`].
    #[must_use]
    pub fn decoration_width(&self) -> usize {
        match self {
            StatusKind::Bullet => BULLET_ARROW.len(),
            StatusKind::None => 0,
            _ => self.label().len() + 2,
        }
    }
}

/// The undecorated bullet prefix, as wide as a bracketed 4-char label.
pub const BULLET_ARROW: &str = " --->";

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator;

    use super::{BULLET_ARROW, MAX_DECORATION_WIDTH, StatusKind};

    #[test]
    fn labels_are_fixed_width() {
        for kind in StatusKind::iter() {
            let label = kind.label();
            if !label.is_empty() {
                assert_eq!(label.len(), 4, "label {label:?} should be 4 chars");
            }
        }
    }

    #[test]
    fn max_decoration_width_covers_all_kinds() {
        for kind in StatusKind::iter() {
            assert!(kind.decoration_width() <= *MAX_DECORATION_WIDTH);
        }
        // "[OKAY]" is 6 wide, and no decoration is wider.
        assert_eq!(*MAX_DECORATION_WIDTH, 6);
    }

    #[test]
    fn bullet_arrow_is_narrower_than_bracketed_labels() {
        assert!(BULLET_ARROW.len() < *MAX_DECORATION_WIDTH);
        assert_eq!(StatusKind::Bullet.decoration_width(), 5);
        assert_eq!(StatusKind::None.decoration_width(), 0);
    }
}
