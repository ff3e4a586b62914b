//! Menu state machine: browsing, value editing and modal contexts.

use heapless::Vec;
use log::{debug, warn};

use crate::{
    catalog::OptionSource,
    config::{Layout, MAX_ROWS_PER_SCREEN, MenuConfig},
    context::{TaskHandle, TaskStatus},
    editor::EditBuffer,
    input::{InputProvider, KeyPress},
    item::{Callback, ItemId, ItemKind, MenuItem, Reaction, ValueBinding},
    page::{AttachError, Menu, PageId},
    render::{EditView, PageView, RedrawScope, Renderer, RowKind, RowValue, RowView, ScrollMetrics},
    value::{CommitError, ValueText, ValueType},
};

/// Transient state of the value editor. Dropped on save or cancel.
#[derive(Clone, Debug)]
enum EditSession {
    /// Digit-by-digit edit of a numeric or text value.
    Text { item: ItemId, buffer: EditBuffer },
    /// Cycling through an option catalog or spinner.
    Choice {
        item: ItemId,
        selected: Option<usize>,
    },
}

impl EditSession {
    const fn item(&self) -> ItemId {
        match self {
            Self::Text { item, .. } | Self::Choice { item, .. } => *item,
        }
    }
}

/// Drives one menu tree on one display.
pub struct MenuEngine<'a, R: Renderer> {
    menu: Menu<'a>,
    renderer: R,
    config: MenuConfig<'a>,
    layout: Layout,
    current: Option<PageId>,
    edit: Option<EditSession>,
    context: Option<TaskHandle<'a>>,
}

impl<'a, R: Renderer> MenuEngine<'a, R> {
    pub fn new(menu: Menu<'a>, renderer: R, config: MenuConfig<'a>) -> Self {
        let layout = Layout::compute(&config, renderer.geometry());
        Self {
            menu,
            renderer,
            config,
            layout,
            current: None,
            edit: None,
            context: None,
        }
    }

    /// Shows the configured splash, then makes `page` current and draws it.
    pub fn start(&mut self, page: PageId) -> Result<(), AttachError> {
        self.menu.page(page).ok_or(AttachError::UnknownPage)?;
        self.current = Some(page);
        self.init();
        Ok(())
    }

    pub fn init(&mut self) {
        if let Some((line1, line2)) = self.config.splash {
            self.renderer.render_splash(line1, line2);
        }
        self.re_init();
    }

    /// Recomputes the layout, drops edit and context state, and redraws.
    pub fn re_init(&mut self) {
        self.layout = Layout::compute(&self.config, self.renderer.geometry());
        self.edit = None;
        self.context = None;
        debug!(
            "menu-nav: init rows={} value_columns={}",
            self.layout.items_per_screen, self.layout.value_columns
        );
        self.redraw(RedrawScope::Full);
    }

    pub fn set_current_page(&mut self, page: PageId) -> Result<(), AttachError> {
        self.menu.page(page).ok_or(AttachError::UnknownPage)?;
        self.edit = None;
        self.current = Some(page);
        self.redraw(RedrawScope::Full);
        Ok(())
    }

    pub fn refresh(&mut self) {
        self.redraw(RedrawScope::Full);
    }

    pub fn current_page(&self) -> Option<PageId> {
        self.current
    }

    pub fn current_item(&self) -> Option<ItemId> {
        self.current.and_then(|page| self.menu.current_item(page))
    }

    pub fn is_editing(&self) -> bool {
        self.edit.is_some()
    }

    pub const fn layout(&self) -> Layout {
        self.layout
    }

    pub fn menu(&self) -> &Menu<'a> {
        &self.menu
    }

    /// Mutable access to the tree. Call [`Self::refresh`] after structural changes.
    pub fn menu_mut(&mut self) -> &mut Menu<'a> {
        &mut self.menu
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn hide_item(&mut self, item: ItemId) -> Result<(), AttachError> {
        self.menu.hide_item(item)?;
        self.redraw_if_current(item);
        Ok(())
    }

    pub fn show_item(&mut self, item: ItemId) -> Result<(), AttachError> {
        self.menu.show_item(item)?;
        self.redraw_if_current(item);
        Ok(())
    }

    fn redraw_if_current(&mut self, item: ItemId) {
        let owner = self.menu.item(item).and_then(|entry| entry.parent());
        if owner.is_some() && owner == self.current {
            if self.edit.as_ref().is_some_and(|edit| edit.item() == item) {
                self.edit = None;
            }
            self.redraw(RedrawScope::Full);
        }
    }

    /// Drains `input` while the engine accepts keys.
    ///
    /// Rejected commits are logged and leave the editor open. A provider
    /// error stops the pump and is returned.
    pub fn process_inputs<I: InputProvider>(&mut self, input: &mut I) -> Result<(), I::Error> {
        while self.ready_for_key() {
            let key = match input.poll_event() {
                Ok(Some(key)) => key,
                Ok(None) => break,
                Err(err) => {
                    warn!("menu-nav: input provider failed");
                    return Err(err);
                }
            };
            if let Err(err) = self.register_key_press(key) {
                warn!("menu-nav: key={:?} rejected: {}", key, err);
            }
        }
        Ok(())
    }
}

include!("dispatch.rs");
include!("browse.rs");
include!("edit.rs");
include!("view.rs");

#[cfg(test)]
mod tests;
