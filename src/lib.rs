#![doc = include_str!("../readme.md")]
#![allow(clippy::uninlined_format_args)]

use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::ops::Range;

pub mod format_char;
pub mod pattern;
pub mod undo_buffer;

mod masked_input;

pub use format_char::{FormatChar, FormatCharacters};
pub use masked_input::{MaskOptions, MaskedInput, PatternOptions};
pub use pattern::Pattern;

/// Position type for indices into the masked buffer.
#[allow(non_camel_case_types)]
pub type upos_type = u32;

/// Construction-time failures.
///
/// Edit operations never produce these; they report rejections as
/// `bool` return values and leave the state unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaskError {
    /// The pattern ends with a raw escape character.
    TrailingEscape(String),
    /// The pattern contains no editable positions.
    NoEditablePositions(String),
}

impl Display for MaskError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl Error for MaskError {}

/// Selection into the masked buffer.
///
/// A collapsed selection (`start == end`) is a caret, anything else a
/// replace-range. Offsets are clamped to `0..=len` by the engine.
#[derive(Default, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub struct Selection {
    pub start: upos_type,
    pub end: upos_type,
}

impl Debug for Selection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl Selection {
    /// New selection.
    ///
    /// Panic
    /// Panics if start > end.
    pub fn new(start: upos_type, end: upos_type) -> Self {
        assert!(start <= end);
        Self { start, end }
    }

    /// Collapsed selection at the given position.
    pub const fn caret(pos: upos_type) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Caret rather than a range?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Covered range.
    #[inline]
    pub fn range(&self) -> Range<upos_type> {
        self.start..self.end
    }
}

impl From<Range<upos_type>> for Selection {
    fn from(value: Range<upos_type>) -> Self {
        Selection::new(value.start, value.end)
    }
}

impl From<upos_type> for Selection {
    fn from(value: upos_type) -> Self {
        Selection::caret(value)
    }
}
