//! Character-by-character value editor.
//!
//! The buffer keeps two cursors: the logical cursor indexes the full text and
//! the visual cursor is the on-screen column inside the value field. When the
//! visual cursor hits the last column the field scrolls instead.

use core::str;

use heapless::Vec;

use crate::value::{CommitError, ValueRef, ValueText, ValueType};

/// Bytes held by the working buffer.
pub const EDIT_CAPACITY: usize = 20;

const INTEGER_LIMIT: usize = 6;
const BYTE_LIMIT: usize = 3;

const SPACE: u8 = b' ';
const TILDE: u8 = b'~';
const PIPE: u8 = b'|';

/// Working text of an in-progress numeric or text edit.
#[derive(Clone, Debug)]
pub struct EditBuffer {
    bytes: Vec<u8, EDIT_CAPACITY>,
    value_type: ValueType,
    limit: usize,
    cursor: usize,
    visual: usize,
    columns: usize,
}

impl EditBuffer {
    /// Loads the display text of `value`. Non-ASCII characters become `?`.
    ///
    /// Text that does not fit the working buffer is refused with
    /// [`CommitError::Capacity`], since committing a shortened copy would
    /// overwrite the bound value.
    pub fn load(value: ValueRef<'_>, precision: u8, columns: usize) -> Result<Self, CommitError> {
        let value_type = value.value_type();
        let mut text = ValueText::new();
        value.write_display(&mut text, precision);

        let mut bytes = Vec::new();
        for ch in text.chars() {
            let byte = if ch.is_ascii() { ch as u8 } else { b'?' };
            bytes.push(byte).map_err(|_| CommitError::Capacity)?;
        }

        let limit = match value_type {
            ValueType::Integer => INTEGER_LIMIT,
            ValueType::Byte => BYTE_LIMIT,
            ValueType::Text => value
                .text_capacity()
                .unwrap_or(EDIT_CAPACITY)
                .min(EDIT_CAPACITY),
            ValueType::Boolean | ValueType::Float | ValueType::Double => EDIT_CAPACITY,
        };

        Ok(Self {
            bytes,
            value_type,
            limit: limit.max(1),
            cursor: 0,
            visual: 0,
            columns: columns.max(1),
        })
    }

    pub const fn value_type(&self) -> ValueType {
        self.value_type
    }

    /// Logical cursor position.
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// On-screen cursor column.
    pub const fn visual_cursor(&self) -> usize {
        self.visual
    }

    /// Maximum editable character count.
    pub const fn limit(&self) -> usize {
        self.limit
    }

    pub fn as_str(&self) -> &str {
        str::from_utf8(&self.bytes).unwrap_or("")
    }

    /// Slice of the text currently inside the value field.
    pub fn visible(&self) -> &str {
        let start = self.window_start().min(self.bytes.len());
        let end = (start + self.columns).min(self.bytes.len());
        str::from_utf8(&self.bytes[start..end]).unwrap_or("")
    }

    /// First logical position shown in the value field.
    pub const fn window_start(&self) -> usize {
        self.cursor - self.visual
    }

    /// Moves the cursor right. Stops at the end of the text and at the type limit.
    pub fn move_right(&mut self) -> bool {
        if self.cursor >= self.bytes.len() || self.cursor + 1 >= self.limit {
            return false;
        }

        self.cursor += 1;
        if self.visual + 1 < self.columns {
            self.visual += 1;
        }
        true
    }

    pub fn move_left(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }

        self.cursor -= 1;
        if self.visual > 0 {
            self.visual -= 1;
        }
        true
    }

    /// Steps the character under the cursor through its code cycle.
    ///
    /// The cursor position past the last character appends a new one.
    /// Returns the new character, or `None` when the buffer is full.
    pub fn step(&mut self, forward: bool) -> Option<u8> {
        let current = self.bytes.get(self.cursor).copied().unwrap_or(0);
        let next = if self.value_type == ValueType::Text {
            text_step(current, forward)
        } else {
            numeric_step(
                current,
                forward,
                self.cursor == 0,
                self.value_type.is_signed(),
                self.value_type.is_fractional(),
            )
        };

        match self.bytes.get_mut(self.cursor) {
            Some(slot) => *slot = next,
            None => self.bytes.push(next).ok()?,
        }
        Some(next)
    }
}

/// Digit, sign and decimal-point cycle for numeric edits.
fn numeric_step(current: u8, forward: bool, at_start: bool, signed: bool, fractional: bool) -> u8 {
    let sign_allowed = at_start && signed;
    let point_allowed = !at_start && fractional;

    if forward {
        match current {
            b'0'..=b'8' => current + 1,
            b'9' if sign_allowed => b'-',
            b'9' | b'-' => SPACE,
            SPACE if point_allowed => b'.',
            _ => b'0',
        }
    } else {
        match current {
            b'1'..=b'9' => current - 1,
            b'0' if point_allowed => b'.',
            b'0' | b'.' => SPACE,
            SPACE if sign_allowed => b'-',
            SPACE | b'-' => b'9',
            _ => b'0',
        }
    }
}

/// Printable ASCII cycle for text edits. `|` is skipped in both directions.
fn text_step(current: u8, forward: bool) -> u8 {
    if forward {
        match current {
            0 => SPACE,
            c if c >= TILDE || c < SPACE => SPACE,
            c if c + 1 == PIPE => PIPE + 1,
            c => c + 1,
        }
    } else {
        match current {
            c if c <= SPACE => TILDE,
            c if c - 1 == PIPE => PIPE - 1,
            c => c - 1,
        }
    }
}
