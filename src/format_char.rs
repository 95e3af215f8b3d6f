//! Format characters.
//!
//! A format character maps one symbol in a pattern source to a class of
//! acceptable input, plus an optional transform applied before the char
//! is stored in the buffer.

use dyn_clone::DynClone;
use rustc_hash::FxHashMap;
use std::fmt::Debug;

/// One format character class.
///
/// Implementations must be cheap to clone; the registry is cloned into
/// every [Pattern](crate::Pattern).
pub trait FormatChar: DynClone + Debug {
    /// Is the char acceptable at a position governed by this class?
    fn validate(&self, c: char) -> bool;

    /// Transform the char before storing it.
    fn transform(&self, c: char) -> char {
        c
    }
}

dyn_clone::clone_trait_object!(FormatChar);

/// `*` - ascii letter or digit.
#[derive(Debug, Clone, Copy)]
pub struct AlphaNumeric;

/// `1` - ascii digit.
#[derive(Debug, Clone, Copy)]
pub struct Digit;

/// `a` - ascii letter.
#[derive(Debug, Clone, Copy)]
pub struct Letter;

/// `A` - ascii letter, stored uppercase.
#[derive(Debug, Clone, Copy)]
pub struct UppercaseLetter;

/// `#` - ascii letter or digit, stored uppercase.
#[derive(Debug, Clone, Copy)]
pub struct UppercaseAlphaNumeric;

impl FormatChar for AlphaNumeric {
    fn validate(&self, c: char) -> bool {
        c.is_ascii_alphanumeric()
    }
}

impl FormatChar for Digit {
    fn validate(&self, c: char) -> bool {
        c.is_ascii_digit()
    }
}

impl FormatChar for Letter {
    fn validate(&self, c: char) -> bool {
        c.is_ascii_alphabetic()
    }
}

impl FormatChar for UppercaseLetter {
    fn validate(&self, c: char) -> bool {
        c.is_ascii_alphabetic()
    }

    fn transform(&self, c: char) -> char {
        c.to_ascii_uppercase()
    }
}

impl FormatChar for UppercaseAlphaNumeric {
    fn validate(&self, c: char) -> bool {
        c.is_ascii_alphanumeric()
    }

    fn transform(&self, c: char) -> char {
        c.to_ascii_uppercase()
    }
}

/// Registry of format characters, symbol to class.
///
/// Starts out as [FormatCharacters::standard] and can be overlaid with
/// custom entries via [FormatCharacters::merge]. Not mutated afterwards;
/// every pattern keeps its own clone.
#[derive(Debug, Clone)]
pub struct FormatCharacters {
    map: FxHashMap<char, Box<dyn FormatChar>>,
}

impl Default for FormatCharacters {
    fn default() -> Self {
        Self::standard()
    }
}

impl FormatCharacters {
    /// The five standard classes: `*`, `1`, `a`, `A`, `#`.
    pub fn standard() -> Self {
        let mut map: FxHashMap<char, Box<dyn FormatChar>> = FxHashMap::default();
        map.insert('*', Box::new(AlphaNumeric));
        map.insert('1', Box::new(Digit));
        map.insert('a', Box::new(Letter));
        map.insert('A', Box::new(UppercaseLetter));
        map.insert('#', Box::new(UppercaseAlphaNumeric));
        Self { map }
    }

    /// No format characters at all.
    ///
    /// Useless as is; combine with [merge](Self::merge).
    pub fn empty() -> Self {
        Self {
            map: FxHashMap::default(),
        }
    }

    /// Overlay custom entries.
    ///
    /// `(sym, Some(class))` adds or overrides the class for `sym`,
    /// `(sym, None)` removes it.
    pub fn merge(
        mut self,
        overlay: impl IntoIterator<Item = (char, Option<Box<dyn FormatChar>>)>,
    ) -> Self {
        for (sym, fc) in overlay {
            match fc {
                Some(fc) => {
                    self.map.insert(sym, fc);
                }
                None => {
                    self.map.remove(&sym);
                }
            }
        }
        self
    }

    /// Is this symbol a format character?
    #[inline]
    pub fn contains(&self, sym: char) -> bool {
        self.map.contains_key(&sym)
    }

    /// Class for the symbol.
    #[inline]
    pub fn get(&self, sym: char) -> Option<&dyn FormatChar> {
        self.map.get(&sym).map(|v| v.as_ref())
    }
}
