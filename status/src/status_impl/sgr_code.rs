// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! More info:
//! - <https://doc.rust-lang.org/reference/tokens.html#ascii-escapes>
//! - <https://notes.burke.libbey.me/ansi-escape-codes/>

use std::fmt::{Display, Formatter, Result};

/// The subset of SGR (set graphics rendition) commands that status output needs:
/// the classic bright foreground palette plus reset, bold, and dim.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SgrCode {
    Reset,
    Bold,
    Dim,
    ForegroundBrightRed,
    ForegroundBrightGreen,
    ForegroundBrightYellow,
    ForegroundBrightMagenta,
    ForegroundBrightCyan,
}

pub mod sgr_code_impl {
    use super::{Display, Formatter, Result, SgrCode};

    pub const CSI: &str = "\x1b[";
    pub const SGR: &str = "m";

    impl Display for SgrCode {
        /// SGR: set graphics mode command.
        /// More info:
        /// - <https://notes.burke.libbey.me/ansi-escape-codes/>
        /// - <https://en.wikipedia.org/wiki/ANSI_escape_code>
        #[rustfmt::skip]
        fn fmt(&self, f: &mut Formatter<'_>) -> Result {
            match *self {
                SgrCode::Reset                   => write!(f, "{CSI}0{SGR}"),
                SgrCode::Bold                    => write!(f, "{CSI}1{SGR}"),
                SgrCode::Dim                     => write!(f, "{CSI}2{SGR}"),
                SgrCode::ForegroundBrightRed     => write!(f, "{CSI}91{SGR}"),
                SgrCode::ForegroundBrightGreen   => write!(f, "{CSI}92{SGR}"),
                SgrCode::ForegroundBrightYellow  => write!(f, "{CSI}93{SGR}"),
                SgrCode::ForegroundBrightMagenta => write!(f, "{CSI}95{SGR}"),
                SgrCode::ForegroundBrightCyan    => write!(f, "{CSI}96{SGR}"),
            }
        }
    }
}
