//! Pattern compilation and value formatting.

use crate::format_char::FormatCharacters;
use crate::{upos_type, MaskError};
use std::fmt;
use std::fmt::{Debug, Formatter};

/// Escape character in a pattern source.
pub const ESCAPE_CHAR: char = '\\';

/// One position of a compiled pattern.
#[derive(Clone, PartialEq, Eq)]
pub enum MaskToken {
    /// Static character, copied into the buffer as is.
    Literal(char),
    /// Editable position, governed by the format character with
    /// this symbol.
    Editable(char),
}

impl Debug for MaskToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            MaskToken::Literal(c) => write!(f, "\\{}", c),
            MaskToken::Editable(c) => write!(f, "{}", c),
        }
    }
}

/// Compiled pattern.
///
/// Derived once from a source string and a set of format characters.
/// Immutable for its lifetime; installing a new pattern replaces the
/// whole thing, and with it the value buffer.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    tokens: Vec<MaskToken>,
    first_editable: upos_type,
    last_editable: upos_type,
    placeholder: Option<char>,
    revealing: bool,
    format_characters: FormatCharacters,
}

impl Pattern {
    /// Compile a pattern source.
    ///
    /// Any character that is a symbol in `format_characters` becomes an
    /// editable position, everything else a literal. [ESCAPE_CHAR] forces
    /// the next character to be a literal.
    ///
    /// Fails for a trailing escape and for a pattern without a single
    /// editable position.
    pub fn parse(
        source: &str,
        format_characters: FormatCharacters,
        placeholder: Option<char>,
        revealing: bool,
    ) -> Result<Pattern, MaskError> {
        let mut tokens = Vec::new();
        let mut first_editable = None;
        let mut last_editable = 0;

        let mut esc = false;
        for c in source.chars() {
            if esc {
                esc = false;
                tokens.push(MaskToken::Literal(c));
            } else if c == ESCAPE_CHAR {
                esc = true;
            } else if format_characters.contains(c) {
                let idx = tokens.len() as upos_type;
                if first_editable.is_none() {
                    first_editable = Some(idx);
                }
                last_editable = idx;
                tokens.push(MaskToken::Editable(c));
            } else {
                tokens.push(MaskToken::Literal(c));
            }
        }
        if esc {
            return Err(MaskError::TrailingEscape(source.into()));
        }
        let Some(first_editable) = first_editable else {
            return Err(MaskError::NoEditablePositions(source.into()));
        };

        Ok(Pattern {
            source: source.into(),
            tokens,
            first_editable,
            last_editable,
            placeholder,
            revealing,
            format_characters,
        })
    }

    /// Pattern source string.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Length of the compiled pattern.
    #[inline]
    pub fn len(&self) -> upos_type {
        self.tokens.len() as upos_type
    }

    /// Always false, an empty pattern doesn't compile.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// First editable position.
    #[inline]
    pub fn first_editable(&self) -> upos_type {
        self.first_editable
    }

    /// Last editable position.
    #[inline]
    pub fn last_editable(&self) -> upos_type {
        self.last_editable
    }

    /// Placeholder for unfilled editable positions.
    /// None renders as nothing at all.
    #[inline]
    pub fn placeholder(&self) -> Option<char> {
        self.placeholder
    }

    /// Formatting stops at the first unfilled position?
    #[inline]
    pub fn is_revealing(&self) -> bool {
        self.revealing
    }

    /// Is the position editable? Out of range counts as not editable.
    #[inline]
    pub fn is_editable(&self, pos: upos_type) -> bool {
        matches!(
            self.tokens.get(pos as usize),
            Some(MaskToken::Editable(_))
        )
    }

    /// Literal at the position, if it is a static one.
    #[inline]
    pub fn literal_at(&self, pos: upos_type) -> Option<char> {
        match self.tokens.get(pos as usize) {
            Some(MaskToken::Literal(c)) => Some(*c),
            _ => None,
        }
    }

    /// Is the char acceptable at the editable position?
    /// False for static and out of range positions.
    pub fn is_valid_at(&self, c: char, pos: upos_type) -> bool {
        match self.tokens.get(pos as usize) {
            Some(MaskToken::Editable(sym)) => match self.format_characters.get(*sym) {
                Some(fc) => fc.validate(c),
                None => false,
            },
            _ => false,
        }
    }

    /// Transform the char for the editable position.
    /// Identity for static and out of range positions.
    pub fn transform_at(&self, c: char, pos: upos_type) -> char {
        match self.tokens.get(pos as usize) {
            Some(MaskToken::Editable(sym)) => match self.format_characters.get(*sym) {
                Some(fc) => fc.transform(c),
                None => c,
            },
            _ => c,
        }
    }

    /// Format a sequence of raw chars into a value buffer.
    ///
    /// The buffer always has pattern length; `None` cells are unset and
    /// render as nothing. Editable positions take validated+transformed
    /// raw chars or the placeholder, static positions take their literal
    /// and swallow a matching raw char, so raw input may already contain
    /// the mask's own separators.
    ///
    /// A revealing pattern stops at the first exhausted or invalid raw
    /// char and leaves the rest of the buffer unset.
    pub fn format_value(&self, raw: &[char]) -> Vec<Option<char>> {
        let mut buf = vec![None; self.tokens.len()];
        let mut value_index = 0;
        for (i, token) in self.tokens.iter().enumerate() {
            match token {
                MaskToken::Editable(_) => {
                    let valid = value_index < raw.len()
                        && self.is_valid_at(raw[value_index], i as upos_type);
                    if self.revealing && !valid {
                        break;
                    }
                    if valid {
                        buf[i] = Some(self.transform_at(raw[value_index], i as upos_type));
                    } else {
                        buf[i] = self.placeholder;
                    }
                    value_index += 1;
                }
                MaskToken::Literal(c) => {
                    buf[i] = Some(*c);
                    if value_index < raw.len() && raw[value_index] == *c {
                        value_index += 1;
                    }
                }
            }
        }
        buf
    }
}
