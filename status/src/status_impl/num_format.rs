// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Formats a number as a colored string, where the color depends on whether the number
//! is above, below, or equal to a threshold. Handy for reporting deltas (regressions
//! red, improvements green) in status lines.

use std::fmt::Write as _;

use crate::{InlineString, SgrCode};

/// Colors to use for the three threshold outcomes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ThresholdColors {
    pub above: SgrCode,
    pub below: SgrCode,
    pub equal: SgrCode,
}

impl Default for ThresholdColors {
    fn default() -> Self {
        Self {
            above: SgrCode::ForegroundBrightGreen,
            below: SgrCode::ForegroundBrightRed,
            equal: SgrCode::ForegroundBrightYellow,
        }
    }
}

/// Formats `value` colored by comparison against `threshold`.
///
/// - `maybe_decimals`: round to this many decimal places before formatting.
/// - `show_sign`: prefix `+` when above the threshold and `±` when equal (a below
///   value carries its own minus sign when it is negative).
#[must_use]
pub fn format_number_by_threshold(
    value: f64,
    threshold: f64,
    colors: ThresholdColors,
    maybe_decimals: Option<usize>,
    show_sign: bool,
) -> InlineString {
    let (color, sign) = if value > threshold {
        (colors.above, "+")
    } else if value < threshold {
        (colors.below, "")
    } else {
        (colors.equal, "±")
    };

    let mut acc = InlineString::new();
    let sign = if show_sign { sign } else { "" };
    match maybe_decimals {
        Some(decimals) => {
            _ = write!(acc, "{color}{sign}{value:.decimals$}{}", SgrCode::Reset);
        }
        None => {
            _ = write!(acc, "{color}{sign}{value}{}", SgrCode::Reset);
        }
    }
    acc
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{ThresholdColors, format_number_by_threshold};

    #[test]
    fn above_threshold_is_green_with_sign() {
        let output = format_number_by_threshold(
            3.0,
            0.0,
            ThresholdColors::default(),
            None,
            true,
        );
        assert_eq!(output, "\x1b[92m+3\x1b[0m");
    }

    #[test]
    fn below_threshold_is_red_and_keeps_its_own_minus() {
        let output = format_number_by_threshold(
            -2.5,
            0.0,
            ThresholdColors::default(),
            None,
            true,
        );
        assert_eq!(output, "\x1b[91m-2.5\x1b[0m");
    }

    #[test]
    fn equal_threshold_is_yellow_with_plus_minus() {
        let output = format_number_by_threshold(
            0.0,
            0.0,
            ThresholdColors::default(),
            None,
            true,
        );
        assert_eq!(output, "\x1b[93m±0\x1b[0m");
    }

    #[test]
    fn decimals_round_the_value() {
        let output = format_number_by_threshold(
            1.23456,
            0.0,
            ThresholdColors::default(),
            Some(2),
            false,
        );
        assert_eq!(output, "\x1b[92m1.23\x1b[0m");
    }
}
