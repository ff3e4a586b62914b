//! Renderer-facing view models.
//!
//! The engine resolves the current page into a [`PageView`] and hands it to a
//! [`Renderer`] together with the part of the screen that changed.

use crate::{
    config::{DisplayGeometry, PointerStyle},
    value::ValueText,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RowKind {
    Value,
    Link,
    Back,
    Button,
}

/// Display state of one row's value column.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RowValue {
    None,
    Text(ValueText),
    /// Checkbox of a boolean value.
    Toggle(bool),
    /// Label of an option-bound value; empty when the value matches no option.
    Choice(ValueText),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RowView<'a> {
    pub title: &'a str,
    pub kind: RowKind,
    pub readonly: bool,
    pub value: RowValue,
}

/// In-progress edit of the focused row.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EditView<'v> {
    /// Visible slice of the working text and the cursor column inside it.
    Text { visible: &'v str, cursor_column: usize },
    /// Option label at the pending selection.
    Choice { label: &'v str },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ScrollMetrics {
    pub items_per_screen: usize,
    pub total_screens: usize,
    /// Zero-based index of the screen holding the focused row.
    pub current_screen: usize,
}

impl ScrollMetrics {
    pub fn new(items_per_screen: usize, visible: usize, focused: usize) -> Self {
        let items_per_screen = items_per_screen.max(1);
        Self {
            items_per_screen,
            total_screens: visible.div_ceil(items_per_screen).max(1),
            current_screen: focused / items_per_screen,
        }
    }

    pub fn needs_scrollbar(&self) -> bool {
        self.total_screens > 1
    }
}

/// One screen of the current page.
#[derive(Clone, Copy, Debug)]
pub struct PageView<'v> {
    pub title: &'v str,
    /// Visible rows of the current screen window.
    pub rows: &'v [RowView<'v>],
    /// Focused row inside `rows`, `None` for an empty page.
    pub focused_row: Option<usize>,
    pub scroll: ScrollMetrics,
    pub pointer: PointerStyle,
    pub edit: Option<EditView<'v>>,
}

/// Part of the screen a redraw has to repaint.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RedrawScope {
    /// Title, every row, pointer and scrollbar.
    Full,
    /// Focus indicator only.
    Pointer,
    /// Value column of the focused row.
    Value,
}

/// Display backend driven by the menu engine.
pub trait Renderer {
    fn geometry(&self) -> DisplayGeometry;

    fn render(&mut self, view: &PageView<'_>, scope: RedrawScope);

    fn render_splash(&mut self, _line1: &str, _line2: &str) {}
}
