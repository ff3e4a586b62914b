//! Host-owned scalar bindings and their text codec.
//!
//! The engine never owns a bound value. Items hold shared references to
//! `Cell`/`RefCell` slots owned by the host application, so the host can read
//! and write the same storage between key presses.

use core::{
    cell::{Cell, RefCell},
    fmt::{self, Write},
};

use heapless::String;

/// Bytes reserved for one formatted value (row text, option label).
pub const VALUE_TEXT_BYTES: usize = 24;

/// Formatted value text.
pub type ValueText = String<VALUE_TEXT_BYTES>;

/// Shown in place of a number too wide for [`ValueText`].
pub const OVERFLOW_TEXT: &str = "###";

/// Scalar type of a bound variable.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ValueType {
    Integer,
    Byte,
    Text,
    Boolean,
    Float,
    Double,
}

impl ValueType {
    /// Whether a leading minus sign may be entered.
    pub const fn is_signed(self) -> bool {
        matches!(self, Self::Integer | Self::Float | Self::Double)
    }

    /// Whether a decimal point may be entered.
    pub const fn is_fractional(self) -> bool {
        matches!(self, Self::Float | Self::Double)
    }
}

/// Errors raised when an edited or selected value is written back.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CommitError {
    /// Edited text does not parse into the bound scalar type.
    Parse,
    /// Text is longer than the host-owned text storage.
    Capacity,
    /// Option value type differs from the bound variable type.
    TypeMismatch,
}

impl fmt::Display for CommitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse => f.write_str("value does not parse into the bound type"),
            Self::Capacity => f.write_str("text exceeds bound storage capacity"),
            Self::TypeMismatch => f.write_str("option type differs from bound type"),
        }
    }
}

/// Fixed-capacity text storage owned by the host.
pub trait TextStorage {
    fn as_str(&self) -> &str;

    /// Maximum number of bytes the storage accepts.
    fn capacity(&self) -> usize;

    /// Replaces the stored text, rejecting input that does not fit.
    fn replace(&mut self, text: &str) -> Result<(), CommitError>;
}

impl<const N: usize> TextStorage for String<N> {
    fn as_str(&self) -> &str {
        &**self
    }

    fn capacity(&self) -> usize {
        N
    }

    fn replace(&mut self, text: &str) -> Result<(), CommitError> {
        if text.len() > N {
            return Err(CommitError::Capacity);
        }

        self.clear();
        self.push_str(text).map_err(|_| CommitError::Capacity)
    }
}

/// One concrete scalar, used for option values and callback payloads.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Scalar<'a> {
    Integer(i32),
    Byte(u8),
    Text(&'a str),
    Boolean(bool),
    Float(f32),
    Double(f64),
}

impl Scalar<'_> {
    pub const fn value_type(&self) -> ValueType {
        match self {
            Self::Integer(_) => ValueType::Integer,
            Self::Byte(_) => ValueType::Byte,
            Self::Text(_) => ValueType::Text,
            Self::Boolean(_) => ValueType::Boolean,
            Self::Float(_) => ValueType::Float,
            Self::Double(_) => ValueType::Double,
        }
    }
}

/// Non-owning reference to a host variable.
#[derive(Clone, Copy)]
pub enum ValueRef<'a> {
    Integer(&'a Cell<i32>),
    Byte(&'a Cell<u8>),
    Text(&'a RefCell<dyn TextStorage + 'a>),
    Boolean(&'a Cell<bool>),
    Float(&'a Cell<f32>),
    Double(&'a Cell<f64>),
}

impl fmt::Debug for ValueRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut text = ValueText::new();
        self.write_display(&mut text, 6);
        write!(f, "{:?}({})", self.value_type(), text.as_str())
    }
}

impl<'a> ValueRef<'a> {
    pub const fn value_type(&self) -> ValueType {
        match self {
            Self::Integer(_) => ValueType::Integer,
            Self::Byte(_) => ValueType::Byte,
            Self::Text(_) => ValueType::Text,
            Self::Boolean(_) => ValueType::Boolean,
            Self::Float(_) => ValueType::Float,
            Self::Double(_) => ValueType::Double,
        }
    }

    /// Current boolean state, `None` for non-boolean bindings.
    pub fn flag(&self) -> Option<bool> {
        match self {
            Self::Boolean(cell) => Some(cell.get()),
            _ => None,
        }
    }

    /// Current numeric value, `None` for text and boolean bindings.
    pub fn number(&self) -> Option<f64> {
        match self {
            Self::Integer(cell) => Some(cell.get() as f64),
            Self::Byte(cell) => Some(cell.get() as f64),
            Self::Float(cell) => Some(cell.get() as f64),
            Self::Double(cell) => Some(cell.get()),
            Self::Text(_) | Self::Boolean(_) => None,
        }
    }

    /// Writes a numeric value, rounding and saturating into integer types.
    pub fn set_number(&self, value: f64) -> Result<(), CommitError> {
        match self {
            Self::Integer(cell) => {
                cell.set(round_to_i64(value).clamp(i32::MIN as i64, i32::MAX as i64) as i32)
            }
            Self::Byte(cell) => cell.set(round_to_i64(value).clamp(0, u8::MAX as i64) as u8),
            Self::Float(cell) => cell.set(value as f32),
            Self::Double(cell) => cell.set(value),
            Self::Text(_) | Self::Boolean(_) => return Err(CommitError::TypeMismatch),
        }
        Ok(())
    }

    /// Flips a boolean binding and returns the new state.
    pub fn toggle(&self) -> Option<bool> {
        match self {
            Self::Boolean(cell) => {
                let next = !cell.get();
                cell.set(next);
                Some(next)
            }
            _ => None,
        }
    }

    /// Whether the bound variable currently holds `scalar`.
    ///
    /// Values of a different scalar type never match.
    pub fn matches(&self, scalar: &Scalar<'_>) -> bool {
        match (self, scalar) {
            (Self::Integer(cell), Scalar::Integer(v)) => cell.get() == *v,
            (Self::Byte(cell), Scalar::Byte(v)) => cell.get() == *v,
            (Self::Boolean(cell), Scalar::Boolean(v)) => cell.get() == *v,
            (Self::Float(cell), Scalar::Float(v)) => cell.get() == *v,
            (Self::Double(cell), Scalar::Double(v)) => cell.get() == *v,
            (Self::Text(cell), Scalar::Text(v)) => cell
                .try_borrow()
                .map(|text| text.as_str() == *v)
                .unwrap_or(false),
            _ => false,
        }
    }

    /// Writes `scalar` into the bound variable.
    pub fn store(&self, scalar: Scalar<'_>) -> Result<(), CommitError> {
        match (self, scalar) {
            (Self::Integer(cell), Scalar::Integer(v)) => cell.set(v),
            (Self::Byte(cell), Scalar::Byte(v)) => cell.set(v),
            (Self::Boolean(cell), Scalar::Boolean(v)) => cell.set(v),
            (Self::Float(cell), Scalar::Float(v)) => cell.set(v),
            (Self::Double(cell), Scalar::Double(v)) => cell.set(v),
            (Self::Text(cell), Scalar::Text(v)) => {
                let mut text = cell.try_borrow_mut().map_err(|_| CommitError::Capacity)?;
                text.replace(v)?;
            }
            _ => return Err(CommitError::TypeMismatch),
        }
        Ok(())
    }

    /// Maximum text length accepted by a text binding.
    pub fn text_capacity(&self) -> Option<usize> {
        match self {
            Self::Text(cell) => cell.try_borrow().ok().map(|text| text.capacity()),
            _ => None,
        }
    }

    /// Formats the current value.
    ///
    /// Returns `false` when the text did not fit `out`: long text is cut short
    /// and an oversized number is shown as [`OVERFLOW_TEXT`].
    pub fn write_display(&self, out: &mut ValueText, precision: u8) -> bool {
        out.clear();
        match self {
            Self::Text(cell) => match cell.try_borrow() {
                Ok(text) => push_truncated(out, text.as_str()),
                Err(_) => true,
            },
            Self::Boolean(cell) => push_truncated(out, if cell.get() { "ON" } else { "OFF" }),
            _ => match self.number() {
                Some(value) => write_number(out, self.value_type(), value, precision),
                None => true,
            },
        }
    }

    /// Parses edited text back into the bound variable.
    ///
    /// Numeric text is trimmed before parsing; text bindings store the trimmed
    /// text after checking it against the storage capacity.
    pub fn commit_text(&self, text: &str) -> Result<(), CommitError> {
        let trimmed = text.trim();
        match self {
            Self::Integer(cell) => cell.set(trimmed.parse().map_err(|_| CommitError::Parse)?),
            Self::Byte(cell) => cell.set(trimmed.parse().map_err(|_| CommitError::Parse)?),
            Self::Float(cell) => cell.set(trimmed.parse().map_err(|_| CommitError::Parse)?),
            Self::Double(cell) => cell.set(trimmed.parse().map_err(|_| CommitError::Parse)?),
            Self::Text(cell) => {
                let mut storage = cell.try_borrow_mut().map_err(|_| CommitError::Capacity)?;
                storage.replace(trimmed)?;
            }
            Self::Boolean(cell) => match trimmed {
                "ON" | "1" | "true" => cell.set(true),
                "OFF" | "0" | "false" => cell.set(false),
                _ => return Err(CommitError::Parse),
            },
        }
        Ok(())
    }
}

/// Formats a number the way the bound type displays it.
///
/// A number too wide for `out` is replaced by [`OVERFLOW_TEXT`] and `false`
/// is returned; a partial write would read as a different number.
pub fn write_number(out: &mut ValueText, value_type: ValueType, value: f64, precision: u8) -> bool {
    let start = out.len();
    let written = match value_type {
        ValueType::Integer | ValueType::Byte => write!(out, "{}", round_to_i64(value)),
        ValueType::Float => write!(out, "{:.*}", precision as usize, value as f32),
        _ => write!(out, "{:.*}", precision as usize, value),
    };
    if written.is_ok() {
        return true;
    }

    out.truncate(start);
    push_truncated(out, OVERFLOW_TEXT);
    false
}

/// Pushes as much of `text` as fits. Returns `false` when it was cut short.
pub(crate) fn push_truncated<const N: usize>(out: &mut String<N>, text: &str) -> bool {
    for ch in text.chars() {
        if out.push(ch).is_err() {
            return false;
        }
    }
    true
}

/// Rounds half away from zero without `std` float intrinsics.
pub(crate) fn round_to_i64(value: f64) -> i64 {
    if value >= 0.0 {
        (value + 0.5) as i64
    } else {
        (value - 0.5) as i64
    }
}
