//! Option catalogs and spinners for cyclic value selection.

use crate::value::{CommitError, Scalar, ValueRef, ValueText, push_truncated, write_number};

const STEP_EPSILON: f64 = 1e-9;

/// One labeled option of a [`Select`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SelectOption<'a> {
    pub label: &'a str,
    pub value: Scalar<'a>,
}

impl<'a> SelectOption<'a> {
    pub const fn new(label: &'a str, value: Scalar<'a>) -> Self {
        Self { label, value }
    }
}

/// Immutable, ordered catalog of labeled values.
#[derive(Clone, Copy, Debug)]
pub struct Select<'a> {
    options: &'a [SelectOption<'a>],
}

impl<'a> Select<'a> {
    pub const fn new(options: &'a [SelectOption<'a>]) -> Self {
        Self { options }
    }

    pub const fn len(&self) -> usize {
        self.options.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn option(&self, index: usize) -> Option<&SelectOption<'a>> {
        self.options.get(index)
    }

    /// Index of the option holding the variable's current value.
    pub fn selected_index(&self, value: ValueRef<'_>) -> Option<usize> {
        self.options
            .iter()
            .position(|option| value.matches(&option.value))
    }

    /// Label of the option matching the current value, empty when unmatched.
    pub fn selected_option_name(&self, value: ValueRef<'_>) -> &'a str {
        self.selected_index(value)
            .and_then(|index| self.options.get(index))
            .map(|option| option.label)
            .unwrap_or("")
    }

    /// Writes option `index` into the variable. Out-of-range indices are ignored.
    pub fn apply(&self, value: ValueRef<'_>, index: usize) -> Result<(), CommitError> {
        match self.options.get(index) {
            Some(option) => value.store(option.value),
            None => Ok(()),
        }
    }
}

/// Computed stream of values `min, min + step, ..., max`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spinner {
    min: f64,
    max: f64,
    step: f64,
    looping: bool,
}

impl Spinner {
    /// Creates a spinner. Swapped bounds are reordered and a non-positive step
    /// falls back to `1`.
    pub fn new(mut min: f64, mut max: f64, step: f64) -> Self {
        if max < min {
            core::mem::swap(&mut min, &mut max);
        }
        let step = if step > 0.0 { step } else { 1.0 };

        Self {
            min,
            max,
            step,
            looping: false,
        }
    }

    /// Enables wrap-around past either end.
    pub const fn looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    pub const fn min(&self) -> f64 {
        self.min
    }

    pub const fn max(&self) -> f64 {
        self.max
    }

    pub const fn step(&self) -> f64 {
        self.step
    }

    pub const fn is_looping(&self) -> bool {
        self.looping
    }

    pub fn len(&self) -> usize {
        ((self.max - self.min) / self.step + STEP_EPSILON) as usize + 1
    }

    /// Position of the variable's current value, `None` when out of range.
    pub fn selected_index(&self, value: ValueRef<'_>) -> Option<usize> {
        let current = value.number()?;
        self.index_of(current)
    }

    fn index_of(&self, current: f64) -> Option<usize> {
        if current < self.min - STEP_EPSILON || current > self.max + STEP_EPSILON {
            return None;
        }

        let index = ((current - self.min) / self.step + STEP_EPSILON) as usize;
        Some(index.min(self.len() - 1))
    }

    /// Value at `index`, stepped relative to the variable's current value.
    ///
    /// Stepping relative to the current value keeps off-grid values (set out of
    /// band by the host) on their own grid. Results past `max` or below `min`
    /// wrap by one full span and are then clamped into range.
    pub fn value_at(&self, value: ValueRef<'_>, index: usize) -> Option<f64> {
        let len = self.len();
        if index >= len {
            return None;
        }

        let current = value.number()?;
        let Some(current_index) = self.index_of(current) else {
            return Some(self.min + index as f64 * self.step);
        };

        let span = len as f64 * self.step;
        let mut next = current + (index as f64 - current_index as f64) * self.step;
        if next > self.max + STEP_EPSILON {
            next -= span;
        } else if next < self.min - STEP_EPSILON {
            next += span;
        }

        Some(next.clamp(self.min, self.max))
    }

    /// Writes the value at `index`. Out-of-range indices are ignored.
    pub fn apply(&self, value: ValueRef<'_>, index: usize) -> Result<(), CommitError> {
        match self.value_at(value, index) {
            Some(next) => value.set_number(next),
            None => Ok(()),
        }
    }
}

/// Enumeration bound to a value item.
#[derive(Clone, Copy, Debug)]
pub enum OptionSource<'a> {
    Select(Select<'a>),
    Spinner(Spinner),
}

impl OptionSource<'_> {
    pub fn len(&self) -> usize {
        match self {
            Self::Select(select) => select.len(),
            Self::Spinner(spinner) => spinner.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether stepping past either end wraps around.
    pub fn wraps(&self) -> bool {
        match self {
            Self::Select(_) => false,
            Self::Spinner(spinner) => spinner.is_looping(),
        }
    }

    pub fn selected_index(&self, value: ValueRef<'_>) -> Option<usize> {
        match self {
            Self::Select(select) => select.selected_index(value),
            Self::Spinner(spinner) => spinner.selected_index(value),
        }
    }

    /// Writes the display label of position `index`; empty when out of range.
    pub fn write_label(&self, value: ValueRef<'_>, index: usize, precision: u8, out: &mut ValueText) {
        out.clear();
        match self {
            Self::Select(select) => {
                if let Some(option) = select.option(index) {
                    push_truncated(out, option.label);
                }
            }
            Self::Spinner(spinner) => {
                if let Some(next) = spinner.value_at(value, index) {
                    write_number(out, value.value_type(), next, precision);
                }
            }
        }
    }

    /// Writes the label of the variable's current value; empty when unmatched.
    pub fn write_current_label(&self, value: ValueRef<'_>, precision: u8, out: &mut ValueText) {
        match self.selected_index(value) {
            Some(index) => self.write_label(value, index, precision, out),
            None => {
                out.clear();
                if let (Self::Spinner(_), Some(current)) = (self, value.number()) {
                    write_number(out, value.value_type(), current, precision);
                }
            }
        }
    }

    pub fn apply(&self, value: ValueRef<'_>, index: usize) -> Result<(), CommitError> {
        match self {
            Self::Select(select) => select.apply(value, index),
            Self::Spinner(spinner) => spinner.apply(value, index),
        }
    }
}
