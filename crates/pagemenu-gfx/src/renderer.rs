//! Monochrome menu renderer built on `embedded-graphics` primitives.

use embedded_graphics::{
    mono_font::{MonoTextStyle, ascii::FONT_6X10},
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{Line, PrimitiveStyle, Rectangle, Triangle},
    text::{Baseline, Text},
};
use log::warn;
use pagemenu_core::{
    config::{DisplayGeometry, MenuConfig, PointerStyle},
    render::{EditView, PageView, RedrawScope, Renderer, RowKind, RowValue, RowView, ScrollMetrics},
};

const CHAR_WIDTH: i32 = 6;
const GLYPH_HEIGHT: i32 = 10;
const TEXT_X: i32 = 6;
const POINTER_X: i32 = 1;
const POINTER_LEN: i32 = 3;
const SCROLLBAR_WIDTH: i32 = 2;
const CHOICE_INSET: i32 = 6;
const CHECKBOX_SIZE: u32 = 7;

/// Draws [`PageView`]s into any binary-color draw target.
pub struct GraphicsRenderer<D> {
    target: D,
    row_height: i32,
    title_offset: i32,
    value_column: i32,
}

impl<D> GraphicsRenderer<D>
where
    D: DrawTarget<Color = BinaryColor>,
{
    /// Row metrics are taken from `config` so they match the engine layout.
    pub fn new(target: D, config: &MenuConfig<'_>) -> Self {
        Self {
            target,
            row_height: config.row_height.max(1) as i32,
            title_offset: config.title_offset as i32,
            value_column: config.value_column as i32,
        }
    }

    pub fn target(&self) -> &D {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut D {
        &mut self.target
    }

    pub fn into_target(self) -> D {
        self.target
    }

    fn width(&self) -> i32 {
        self.target.bounding_box().size.width as i32
    }

    fn height(&self) -> i32 {
        self.target.bounding_box().size.height as i32
    }

    fn value_x(&self) -> i32 {
        self.value_column * CHAR_WIDTH
    }

    /// Glyphs that fit between the value column and the scrollbar.
    fn value_columns(&self) -> usize {
        ((self.width() / CHAR_WIDTH) - self.value_column - 1).max(1) as usize
    }

    fn marker_x(&self) -> i32 {
        self.width() - SCROLLBAR_WIDTH - 1 - CHAR_WIDTH
    }

    fn row_top(&self, index: usize) -> i32 {
        self.title_offset + index as i32 * self.row_height
    }

    fn text_y(&self, index: usize) -> i32 {
        self.row_top(index) + (self.row_height - GLYPH_HEIGHT).max(0) / 2
    }

    fn draw_page(&mut self, view: &PageView<'_>) -> Result<(), D::Error> {
        self.target.clear(BinaryColor::Off)?;
        self.draw_title(view.title)?;
        for (index, row) in view.rows.iter().enumerate() {
            self.draw_row(view, index, row)?;
        }
        if view.pointer == PointerStyle::Dash {
            self.draw_pointer(view)?;
        }
        self.draw_scrollbar(view.scroll)
    }

    fn draw_splash(&mut self, line1: &str, line2: &str) -> Result<(), D::Error> {
        let width = self.width();
        let mid = self.height() / 2;
        let center = |text: &str| (width - text.len() as i32 * CHAR_WIDTH).max(0) / 2;

        self.target.clear(BinaryColor::Off)?;
        self.text(line1, center(line1), mid - GLYPH_HEIGHT, BinaryColor::On)?;
        self.text(line2, center(line2), mid + 1, BinaryColor::On)
    }

    fn draw_title(&mut self, title: &str) -> Result<(), D::Error> {
        let max_chars = (self.width() / CHAR_WIDTH) as usize;
        self.text(fit(title, max_chars), 0, 0, BinaryColor::On)?;

        let rule_y = (self.title_offset - 2).max(0);
        Line::new(Point::new(0, rule_y), Point::new(self.width() - 1, rule_y))
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(&mut self.target)
    }

    fn draw_pointer(&mut self, view: &PageView<'_>) -> Result<(), D::Error> {
        match view.pointer {
            PointerStyle::Dash => {
                let rows = view.scroll.items_per_screen as i32;
                let column = Rectangle::new(
                    Point::new(0, self.title_offset),
                    Size::new(TEXT_X as u32, (rows * self.row_height) as u32),
                );
                self.target.fill_solid(&column, BinaryColor::Off)?;

                let Some(focused) = view.focused_row else {
                    return Ok(());
                };
                let y = self.row_top(focused) + self.row_height / 2;
                Line::new(Point::new(POINTER_X, y), Point::new(POINTER_X + POINTER_LEN - 1, y))
                    .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
                    .draw(&mut self.target)
            }
            PointerStyle::Highlight => {
                for (index, row) in view.rows.iter().enumerate() {
                    self.draw_row(view, index, row)?;
                }
                Ok(())
            }
        }
    }

    fn draw_scrollbar(&mut self, scroll: ScrollMetrics) -> Result<(), D::Error> {
        if !scroll.needs_scrollbar() {
            return Ok(());
        }

        let x = self.width() - SCROLLBAR_WIDTH;
        let track = (self.height() - self.title_offset).max(1);
        let thumb = (track / scroll.total_screens as i32).max(1);
        let thumb_y = self.title_offset + scroll.current_screen as i32 * thumb;

        let area = Rectangle::new(
            Point::new(x, self.title_offset),
            Size::new(SCROLLBAR_WIDTH as u32, track as u32),
        );
        self.target.fill_solid(&area, BinaryColor::Off)?;
        Line::new(
            Point::new(x + 1, self.title_offset),
            Point::new(x + 1, self.height() - 1),
        )
        .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
        .draw(&mut self.target)?;

        let thumb_rect = Rectangle::new(
            Point::new(x, thumb_y),
            Size::new(SCROLLBAR_WIDTH as u32, thumb as u32),
        );
        self.target.fill_solid(&thumb_rect, BinaryColor::On)
    }

    fn draw_row(&mut self, view: &PageView<'_>, index: usize, row: &RowView<'_>) -> Result<(), D::Error> {
        let (fg, bg) = row_colors(view, index);
        let top = self.row_top(index);
        let band = Rectangle::new(
            Point::new(0, top),
            Size::new((self.width() - SCROLLBAR_WIDTH) as u32, self.row_height as u32),
        );
        self.target.fill_solid(&band, bg)?;

        let title_end = match row.kind {
            RowKind::Value => self.value_x() - CHAR_WIDTH,
            RowKind::Link | RowKind::Back | RowKind::Button => self.marker_x(),
        };
        let max_chars = ((title_end - TEXT_X) / CHAR_WIDTH).max(0) as usize;
        let title = fit(row.title, max_chars);
        let y = self.text_y(index);
        self.text(title, TEXT_X, y, fg)?;

        if row.readonly {
            let x = TEXT_X + title.len() as i32 * CHAR_WIDTH;
            self.readonly_mark(x, top + 1, fg)?;
        }

        match row.kind {
            RowKind::Link | RowKind::Button => self.text(">", self.marker_x(), y, fg)?,
            RowKind::Back => self.text("<", self.marker_x(), y, fg)?,
            RowKind::Value => {}
        }

        self.draw_value_content(view, index, row, fg, bg)
    }

    /// Repaints only the value field of the focused row.
    fn draw_focused_value(&mut self, view: &PageView<'_>) -> Result<(), D::Error> {
        let Some(index) = view.focused_row else {
            return Ok(());
        };
        let Some(row) = view.rows.get(index) else {
            return Ok(());
        };

        let (fg, bg) = row_colors(view, index);
        let field = Rectangle::new(
            Point::new(self.value_x(), self.row_top(index)),
            Size::new(
                (self.width() - SCROLLBAR_WIDTH - self.value_x()).max(0) as u32,
                self.row_height as u32,
            ),
        );
        self.target.fill_solid(&field, bg)?;
        self.draw_value_content(view, index, row, fg, bg)
    }

    fn draw_value_content(
        &mut self,
        view: &PageView<'_>,
        index: usize,
        row: &RowView<'_>,
        fg: BinaryColor,
        bg: BinaryColor,
    ) -> Result<(), D::Error> {
        let x = self.value_x();
        let y = self.text_y(index);
        let columns = self.value_columns();

        if view.focused_row == Some(index)
            && let Some(edit) = view.edit
        {
            return match edit {
                EditView::Text {
                    visible,
                    cursor_column,
                } => {
                    self.text(fit(visible, columns), x, y, fg)?;
                    let cell_x = x + cursor_column as i32 * CHAR_WIDTH;
                    let cell = Rectangle::new(
                        Point::new(cell_x, self.row_top(index)),
                        Size::new(CHAR_WIDTH as u32, self.row_height as u32),
                    );
                    self.target.fill_solid(&cell, fg)?;
                    match visible.get(cursor_column..cursor_column + 1) {
                        Some(glyph) => self.text(glyph, cell_x, y, bg),
                        None => Ok(()),
                    }
                }
                EditView::Choice { label } => {
                    self.choice_arrows(x, index, fg)?;
                    let label = fit(label, columns.saturating_sub(1));
                    let block = Rectangle::new(
                        Point::new(x + CHOICE_INSET, self.row_top(index)),
                        Size::new((label.len() as i32 * CHAR_WIDTH) as u32, self.row_height as u32),
                    );
                    self.target.fill_solid(&block, fg)?;
                    self.text(label, x + CHOICE_INSET, y, bg)
                }
            };
        }

        match &row.value {
            RowValue::None => Ok(()),
            RowValue::Text(text) => self.text(fit(text, columns), x, y, fg),
            RowValue::Toggle(on) => self.checkbox(x, self.row_top(index) + 1, *on, fg),
            RowValue::Choice(label) => {
                self.choice_arrows(x, index, fg)?;
                self.text(fit(label, columns.saturating_sub(1)), x + CHOICE_INSET, y, fg)
            }
        }
    }

    fn text(&mut self, text: &str, x: i32, y: i32, color: BinaryColor) -> Result<(), D::Error> {
        let style = MonoTextStyle::new(&FONT_6X10, color);
        Text::with_baseline(text, Point::new(x, y), style, Baseline::Top).draw(&mut self.target)?;
        Ok(())
    }

    fn checkbox(&mut self, x: i32, y: i32, on: bool, color: BinaryColor) -> Result<(), D::Error> {
        Rectangle::new(Point::new(x, y), Size::new(CHECKBOX_SIZE, CHECKBOX_SIZE))
            .into_styled(PrimitiveStyle::with_stroke(color, 1))
            .draw(&mut self.target)?;
        if on {
            let inner = Rectangle::new(Point::new(x + 2, y + 2), Size::new(3, 3));
            self.target.fill_solid(&inner, color)?;
        }
        Ok(())
    }

    /// Up and down triangles marking a value cycled through options.
    fn choice_arrows(&mut self, x: i32, index: usize, color: BinaryColor) -> Result<(), D::Error> {
        let mid = self.row_top(index) + self.row_height / 2;
        let style = PrimitiveStyle::with_fill(color);
        Triangle::new(
            Point::new(x + 2, mid - 4),
            Point::new(x, mid - 2),
            Point::new(x + 4, mid - 2),
        )
        .into_styled(style)
        .draw(&mut self.target)?;
        Triangle::new(
            Point::new(x, mid + 1),
            Point::new(x + 4, mid + 1),
            Point::new(x + 2, mid + 3),
        )
        .into_styled(style)
        .draw(&mut self.target)
    }

    /// Superscript caret after the title of a read-only row.
    fn readonly_mark(&mut self, x: i32, y: i32, color: BinaryColor) -> Result<(), D::Error> {
        let style = PrimitiveStyle::with_stroke(color, 1);
        Line::new(Point::new(x, y + 2), Point::new(x + 1, y))
            .into_styled(style)
            .draw(&mut self.target)?;
        Line::new(Point::new(x + 1, y), Point::new(x + 2, y + 2))
            .into_styled(style)
            .draw(&mut self.target)
    }
}

impl<D> Renderer for GraphicsRenderer<D>
where
    D: DrawTarget<Color = BinaryColor>,
{
    fn geometry(&self) -> DisplayGeometry {
        let size = self.target.bounding_box().size;
        DisplayGeometry {
            width: size.width.min(u16::MAX as u32) as u16,
            height: size.height.min(u16::MAX as u32) as u16,
            char_width: CHAR_WIDTH as u16,
        }
    }

    fn render(&mut self, view: &PageView<'_>, scope: RedrawScope) {
        let result = match scope {
            RedrawScope::Full => self.draw_page(view),
            RedrawScope::Pointer => self.draw_pointer(view),
            RedrawScope::Value => self.draw_focused_value(view),
        };
        if result.is_err() {
            warn!("menu-gfx: draw failed scope={:?}", scope);
        }
    }

    fn render_splash(&mut self, line1: &str, line2: &str) {
        if self.draw_splash(line1, line2).is_err() {
            warn!("menu-gfx: splash draw failed");
        }
    }
}

/// Foreground and background of row `index`.
fn row_colors(view: &PageView<'_>, index: usize) -> (BinaryColor, BinaryColor) {
    let highlighted = view.pointer == PointerStyle::Highlight && view.focused_row == Some(index);
    if highlighted {
        (BinaryColor::Off, BinaryColor::On)
    } else {
        (BinaryColor::On, BinaryColor::Off)
    }
}

/// Longest prefix of `text` with at most `max_chars` characters.
fn fit(text: &str, max_chars: usize) -> &str {
    text.char_indices()
        .nth(max_chars)
        .map_or(text, |(end, _)| &text[..end])
}
