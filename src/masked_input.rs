//! The mask engine.

use crate::format_char::{FormatChar, FormatCharacters};
use crate::pattern::Pattern;
use crate::undo_buffer::{EditOp, UndoBuffer, UndoEntry};
use crate::{upos_type, MaskError, Selection};
use log::debug;

/// Construction options for [MaskedInput].
#[derive(Debug, Clone)]
pub struct MaskOptions {
    /// Pattern source string. Required; an empty pattern doesn't compile.
    pub pattern: String,
    /// Overlay on the standard format characters.
    /// `(sym, Some(class))` adds or overrides, `(sym, None)` removes.
    pub format_characters: Vec<(char, Option<Box<dyn FormatChar>>)>,
    /// Placeholder for unfilled editable positions.
    /// None renders as nothing at all.
    pub placeholder: Option<char>,
    /// Only show the pattern up to the last filled position.
    pub revealing: bool,
    /// Initial selection.
    pub selection: Selection,
    /// Initial raw value.
    pub value: String,
}

impl Default for MaskOptions {
    fn default() -> Self {
        Self {
            pattern: Default::default(),
            format_characters: Default::default(),
            placeholder: Some('_'),
            revealing: false,
            selection: Default::default(),
            value: Default::default(),
        }
    }
}

/// Options for [MaskedInput::set_pattern].
#[derive(Debug, Default, Clone)]
pub struct PatternOptions {
    /// Raw value for the new pattern.
    pub value: String,
    /// Selection after the switch.
    pub selection: Selection,
    /// Only show the pattern up to the last filled position.
    pub revealing: bool,
}

/// Mask engine.
///
/// Owns the compiled pattern, the value buffer, the selection and the
/// undo history. The host feeds keystrokes, paste payloads and selection
/// changes in and writes [value](Self::value) and [selection](Self::selection)
/// back to its own surface; the engine never touches any UI.
///
/// Edit operations report rejection as `false` and leave the state
/// untouched in that case.
#[derive(Debug, Clone)]
pub struct MaskedInput {
    pattern: Pattern,
    // one cell per pattern position. None is unset and renders as
    // nothing; static cells always hold their literal.
    value: Vec<Option<char>>,
    selection: Selection,
    empty_value: String,

    undo: UndoBuffer,
    // decide whether consecutive edits coalesce into one undo entry.
    last_op: Option<EditOp>,
    last_selection: Option<Selection>,

    format_characters: FormatCharacters,
    placeholder: Option<char>,
}

impl MaskedInput {
    /// New engine from options.
    pub fn new(options: MaskOptions) -> Result<Self, MaskError> {
        let format_characters =
            FormatCharacters::standard().merge(options.format_characters);
        let pattern = Pattern::parse(
            &options.pattern,
            format_characters.clone(),
            options.placeholder,
            options.revealing,
        )?;

        let raw = options.value.chars().collect::<Vec<_>>();
        let value = pattern.format_value(&raw);
        let empty_value = Self::join(&pattern.format_value(&[]));

        Ok(Self {
            pattern,
            value,
            selection: options.selection,
            empty_value,
            undo: UndoBuffer::new(),
            last_op: None,
            last_selection: Some(options.selection),
            format_characters,
            placeholder: options.placeholder,
        })
    }

    /// New engine with default options.
    pub fn with_pattern(source: &str) -> Result<Self, MaskError> {
        Self::new(MaskOptions {
            pattern: source.into(),
            ..Default::default()
        })
    }

    fn join(buf: &[Option<char>]) -> String {
        buf.iter().flatten().collect()
    }

    fn raw_chars(&self) -> Vec<char> {
        self.value
            .iter()
            .enumerate()
            .filter(|(i, _)| self.pattern.is_editable(*i as upos_type))
            .filter_map(|(_, c)| *c)
            .collect()
    }

    // A revealing buffer is derived state; rebuild it from the raw
    // value before editing it in place.
    fn sync_revealing(&mut self) {
        if self.pattern.is_revealing() {
            let raw = self.raw_chars();
            self.value = self.pattern.format_value(&raw);
        }
    }

    /// Full masked display value.
    pub fn value(&self) -> String {
        if self.pattern.is_revealing() {
            let raw = self.raw_chars();
            Self::join(&self.pattern.format_value(&raw))
        } else {
            Self::join(&self.value)
        }
    }

    /// Contents of the editable positions only, including placeholders.
    pub fn raw_value(&self) -> String {
        self.raw_chars().into_iter().collect()
    }

    /// Display value of an empty raw value.
    /// Hosts show this as the field's placeholder string.
    pub fn empty_value(&self) -> &str {
        &self.empty_value
    }

    /// Current selection.
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Pattern length. Hosts use this as the maximum display length.
    pub fn len(&self) -> upos_type {
        self.pattern.len()
    }

    /// The installed pattern.
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Apply a single char of input at the current selection.
    ///
    /// Typing at a static position writes nothing but still clears a
    /// selected range and advances the caret, so typing over separators
    /// passes through harmlessly. The caret skips any static characters
    /// following the input position.
    ///
    /// Returns true if the value or the selection changed.
    pub fn input(&mut self, c: char) -> bool {
        // no room at the end of the pattern
        if self.selection.is_empty() && self.selection.start == self.pattern.len() {
            return false;
        }

        // input prior to the first editable position lands there
        let mut input_index = self.selection.start;
        if input_index < self.pattern.first_editable() {
            input_index = self.pattern.first_editable();
        }

        // rejection leaves the state untouched; decide it before the
        // revealing buffer is rebuilt.
        if self.pattern.is_editable(input_index) && !self.pattern.is_valid_at(c, input_index) {
            return false;
        }
        self.sync_revealing();

        let selection_before = self.selection;
        let value_before = Self::join(&self.value);

        if self.pattern.is_editable(input_index) {
            self.value[input_index as usize] = Some(self.pattern.transform_at(c, input_index));
        }

        // typing over a range blanks the remainder
        for idx in (input_index + 1..self.selection.end).rev() {
            if self.pattern.is_editable(idx) {
                self.value[idx as usize] = self.placeholder;
            }
        }

        // advance, skipping static characters
        let mut caret = input_index + 1;
        while caret < self.pattern.len() && !self.pattern.is_editable(caret) {
            caret += 1;
        }
        self.selection = Selection::caret(caret);

        self.undo.resume_live();
        if self.last_op != Some(EditOp::Input)
            || !selection_before.is_empty()
            || self
                .last_selection
                .map(|last| selection_before.start != last.start)
                .unwrap_or(false)
        {
            self.undo.push(UndoEntry {
                value: value_before,
                selection: selection_before,
                last_op: self.last_op,
                start_undo: false,
            });
        }
        self.last_op = Some(EditOp::Input);
        self.last_selection = Some(self.selection);
        true
    }

    /// Delete at the current selection.
    ///
    /// A collapsed caret resets the editable position before it to the
    /// placeholder and moves back one; a revealing pattern truncates
    /// instead. A range resets every editable position it covers and
    /// collapses to its start.
    ///
    /// Returns true if the value or the selection changed.
    pub fn backspace(&mut self) -> bool {
        if self.selection.start == 0 && self.selection.end == 0 {
            return false;
        }
        self.sync_revealing();

        let selection_before = self.selection;
        let value_before = Self::join(&self.value);

        if self.selection.is_empty() {
            let prev = self.selection.start - 1;
            if self.pattern.is_editable(prev) {
                if self.pattern.is_revealing() {
                    for idx in prev..self.pattern.len() {
                        self.value[idx as usize] = None;
                    }
                } else {
                    self.value[prev as usize] = self.placeholder;
                }
            }
            self.selection = Selection::caret(prev);
        } else {
            for idx in self.selection.range().rev() {
                if self.pattern.is_editable(idx) {
                    self.value[idx as usize] = self.placeholder;
                }
            }
            self.selection = Selection::caret(self.selection.start);
        }

        self.undo.resume_live();
        if self.last_op != Some(EditOp::Backspace)
            || !selection_before.is_empty()
            || self
                .last_selection
                .map(|last| selection_before.start != last.start)
                .unwrap_or(false)
        {
            self.undo.push(UndoEntry {
                value: value_before,
                selection: selection_before,
                last_op: self.last_op,
                start_undo: false,
            });
        }
        self.last_op = Some(EditOp::Backspace);
        self.last_selection = Some(self.selection);
        true
    }

    /// Paste a string at the current selection, all or nothing.
    ///
    /// Static characters at the start of the pattern must be matched by
    /// the paste when the selection lies before the first editable
    /// position, and the paste may contain the mask's own separators
    /// anywhere. Any other rejected character rolls the whole paste
    /// back.
    ///
    /// Returns true if the paste was applied.
    pub fn paste(&mut self, text: &str) -> bool {
        // built on repeated input() calls, so keep a full snapshot for
        // the rollback.
        let snapshot = (
            self.value.clone(),
            self.selection,
            self.last_op,
            self.last_selection,
            self.undo.clone(),
        );

        let input: Vec<char> = text.chars().collect();
        let mut index = 0;

        // a selection within the static prefix must be covered by
        // matching static characters in the paste.
        if self.selection.start < self.pattern.first_editable() {
            let prefix = (self.pattern.first_editable() - self.selection.start) as usize;
            for i in 0..prefix {
                let pos = self.selection.start + i as upos_type;
                if input.get(i).copied() != self.pattern.literal_at(pos) {
                    debug!("paste: static prefix mismatch at {}", pos);
                    return false;
                }
            }
            index = prefix;
            self.selection.start = self.pattern.first_editable();
            if self.selection.end < self.selection.start {
                self.selection.end = self.selection.start;
            }
        }

        while index < input.len() && self.selection.start <= self.pattern.last_editable() {
            let c = input[index];
            if !self.input(c) {
                // separators already stepped over by input() may appear
                // in the pasted text; skip them.
                let skip = self.selection.start > 0 && {
                    let behind = self.selection.start - 1;
                    !self.pattern.is_editable(behind)
                        && self.pattern.literal_at(behind) == Some(c)
                };
                if !skip {
                    debug!("paste: rejected {:?}", c);
                    (
                        self.value,
                        self.selection,
                        self.last_op,
                        self.last_selection,
                        self.undo,
                    ) = snapshot;
                    return false;
                }
            }
            index += 1;
        }
        true
    }

    fn restore(&mut self, entry: UndoEntry) {
        let raw = entry.value.chars().collect::<Vec<_>>();
        self.value = self.pattern.format_value(&raw);
        self.selection = entry.selection;
        self.last_op = entry.last_op;
    }

    /// Step back one undo entry.
    ///
    /// Returns true if a state was restored.
    pub fn undo(&mut self) -> bool {
        let current = UndoEntry {
            value: self.value(),
            selection: self.selection,
            last_op: self.last_op,
            start_undo: false,
        };
        match self.undo.undo(current) {
            Some(entry) => {
                self.restore(entry);
                true
            }
            None => false,
        }
    }

    /// Step forward one undo entry.
    ///
    /// Returns true if a state was restored.
    pub fn redo(&mut self) -> bool {
        match self.undo.redo() {
            Some(entry) => {
                self.restore(entry);
                true
            }
            None => false,
        }
    }

    /// Install a new pattern.
    ///
    /// Replaces the value buffer, recomputes the empty value, resets the
    /// selection and clears the history; a pattern change is not
    /// undoable.
    pub fn set_pattern(&mut self, source: &str, opts: PatternOptions) -> Result<(), MaskError> {
        self.pattern = Pattern::parse(
            source,
            self.format_characters.clone(),
            self.placeholder,
            opts.revealing,
        )?;
        debug!("set_pattern {:?}", source);

        self.set_value(&opts.value);
        self.empty_value = Self::join(&self.pattern.format_value(&[]));
        self.selection = opts.selection;

        self.undo.clear();
        self.last_op = None;
        self.last_selection = Some(self.selection);
        Ok(())
    }

    /// Rebuild the value buffer from a raw string.
    pub fn set_value(&mut self, raw: &str) {
        let raw = raw.chars().collect::<Vec<_>>();
        self.value = self.pattern.format_value(&raw);
    }

    /// Update the selection.
    ///
    /// A collapsed caret is clamped to the first editable position and
    /// otherwise snaps back to just after the nearest filled editable
    /// position, so it never idles where there is nothing to edit.
    ///
    /// Returns true if the requested selection was altered.
    pub fn set_selection(&mut self, sel: impl Into<Selection>) -> bool {
        let sel = sel.into();
        self.selection = sel;

        if !sel.is_empty() {
            return false;
        }

        let first = self.pattern.first_editable();
        if sel.start < first {
            self.selection = Selection::caret(first);
        } else {
            let mut index = sel.start;
            while index > first {
                let cell = self.value.get((index - 1) as usize).copied().flatten();
                if self.pattern.is_editable(index - 1)
                    && cell.is_some()
                    && cell != self.placeholder
                {
                    break;
                }
                index -= 1;
            }
            self.selection = Selection::caret(index);
        }
        self.selection != sel
    }
}
