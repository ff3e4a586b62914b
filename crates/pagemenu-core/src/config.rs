//! Display layout configuration.

/// Upper bound on rows laid out per screen.
pub const MAX_ROWS_PER_SCREEN: usize = 16;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ItemsPerScreen {
    /// Derived from the display height, row height and title offset.
    Auto,
    Fixed(u8),
}

/// Focus indicator drawn next to the focused row.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PointerStyle {
    Dash,
    Highlight,
}

/// Pixel geometry reported by a renderer.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DisplayGeometry {
    pub width: u16,
    pub height: u16,
    /// Advance of one monospaced glyph.
    pub char_width: u16,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MenuConfig<'a> {
    pub items_per_screen: ItemsPerScreen,
    pub row_height: u16,
    pub title_offset: u16,
    /// Column (in glyphs) where value fields start.
    pub value_column: u16,
    pub pointer_style: PointerStyle,
    /// Two lines shown by [`crate::engine::MenuEngine::init`] before the first page.
    pub splash: Option<(&'a str, &'a str)>,
}

impl Default for MenuConfig<'_> {
    fn default() -> Self {
        Self {
            items_per_screen: ItemsPerScreen::Auto,
            row_height: 10,
            title_offset: 12,
            value_column: 10,
            pointer_style: PointerStyle::Dash,
            splash: None,
        }
    }
}

/// Layout constants derived from [`MenuConfig`] and [`DisplayGeometry`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Layout {
    pub items_per_screen: usize,
    /// Glyph columns available to an edited value field.
    pub value_columns: usize,
}

impl Layout {
    pub fn compute(config: &MenuConfig<'_>, geometry: DisplayGeometry) -> Self {
        let items_per_screen = match config.items_per_screen {
            ItemsPerScreen::Fixed(rows) => rows as usize,
            ItemsPerScreen::Auto => {
                let usable = geometry.height.saturating_sub(config.title_offset);
                (usable / config.row_height.max(1)) as usize
            }
        };

        let columns = geometry.width / geometry.char_width.max(1);
        let value_columns = columns
            .saturating_sub(config.value_column)
            .saturating_sub(1)
            .max(1) as usize;

        Self {
            items_per_screen: items_per_screen.clamp(1, MAX_ROWS_PER_SCREEN),
            value_columns,
        }
    }
}
