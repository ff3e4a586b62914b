//! Menu pages and the item arena.
//!
//! Pages and items live in one fixed-capacity [`Menu`] arena and refer to each
//! other by index. Each page keeps an intrusive singly-linked list of its items
//! (`first`/`last` on the page, `next` on the item), so attaching is O(1) and
//! positional lookups walk the list. Page sizes are small, so the walk is
//! cheaper than keeping a per-page index table in RAM.

use core::fmt;

use heapless::Vec;
use log::{debug, warn};

use crate::item::{Callback, ItemId, MenuItem};

/// Maximum number of items, synthesized back items included.
pub const MAX_ITEMS: usize = 64;
/// Maximum number of pages.
pub const MAX_PAGES: usize = 16;

/// Arena index of a [`MenuPage`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct PageId(pub(crate) u8);

impl PageId {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Errors raised while building the page/item graph.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AttachError {
    /// The item already belongs to a page; the attach was ignored.
    AlreadyAttached,
    /// The arena has no room for another page or item.
    ArenaFull,
    UnknownPage,
    UnknownItem,
}

impl fmt::Display for AttachError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyAttached => f.write_str("item is already attached to a page"),
            Self::ArenaFull => f.write_str("menu arena is full"),
            Self::UnknownPage => f.write_str("unknown page id"),
            Self::UnknownItem => f.write_str("unknown item id"),
        }
    }
}

pub struct MenuPage<'a> {
    title: &'a str,
    first: Option<ItemId>,
    last: Option<ItemId>,
    back: Option<ItemId>,
    focused: usize,
    visible: usize,
    total: usize,
    exit_action: Option<Callback<'a>>,
}

impl<'a> MenuPage<'a> {
    const fn new(title: &'a str) -> Self {
        Self {
            title,
            first: None,
            last: None,
            back: None,
            focused: 0,
            visible: 0,
            total: 0,
            exit_action: None,
        }
    }

    pub const fn title(&self) -> &'a str {
        self.title
    }

    /// Focused position among visible items.
    pub const fn focused_index(&self) -> usize {
        self.focused
    }

    pub const fn visible_count(&self) -> usize {
        self.visible
    }

    /// Item count including hidden items and the back item.
    pub const fn total_count(&self) -> usize {
        self.total
    }

    pub const fn back_item(&self) -> Option<ItemId> {
        self.back
    }

    pub const fn exit_action(&self) -> Option<Callback<'a>> {
        self.exit_action
    }
}

/// Arena owning every page and item of a menu tree.
pub struct Menu<'a> {
    pages: Vec<MenuPage<'a>, MAX_PAGES>,
    items: Vec<MenuItem<'a>, MAX_ITEMS>,
}

impl Default for Menu<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Menu<'a> {
    pub const fn new() -> Self {
        Self {
            pages: Vec::new(),
            items: Vec::new(),
        }
    }

    pub fn add_page(&mut self, title: &'a str) -> Result<PageId, AttachError> {
        let id = PageId(self.pages.len() as u8);
        self.pages
            .push(MenuPage::new(title))
            .map_err(|_| AttachError::ArenaFull)?;
        Ok(id)
    }

    /// Stores an item in the arena without attaching it to any page.
    pub fn insert_item(&mut self, item: MenuItem<'a>) -> Result<ItemId, AttachError> {
        let id = ItemId(self.items.len() as u16);
        self.items.push(item).map_err(|_| AttachError::ArenaFull)?;
        Ok(id)
    }

    /// Stores an item and attaches it as the tail of `page`.
    pub fn push_item(&mut self, page: PageId, item: MenuItem<'a>) -> Result<ItemId, AttachError> {
        self.page(page).ok_or(AttachError::UnknownPage)?;
        let id = self.insert_item(item)?;
        self.add_menu_item(page, id)?;
        Ok(id)
    }

    pub fn page(&self, page: PageId) -> Option<&MenuPage<'a>> {
        self.pages.get(page.index())
    }

    pub fn item(&self, item: ItemId) -> Option<&MenuItem<'a>> {
        self.items.get(item.index())
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn set_exit_action(&mut self, page: PageId, action: Callback<'a>) -> Result<(), AttachError> {
        let page = self.pages.get_mut(page.index()).ok_or(AttachError::UnknownPage)?;
        page.exit_action = Some(action);
        Ok(())
    }

    /// Attaches `item` as the new tail of `page`.
    ///
    /// An item already attached to a page stays where it is and the call is
    /// rejected with [`AttachError::AlreadyAttached`].
    pub fn add_menu_item(&mut self, page: PageId, item: ItemId) -> Result<(), AttachError> {
        if self.page(page).is_none() {
            return Err(AttachError::UnknownPage);
        }
        let entry = self.items.get_mut(item.index()).ok_or(AttachError::UnknownItem)?;
        if let Some(owner) = entry.parent {
            warn!(
                "menu-page: attach ignored item={} page={} owner={}",
                item.index(),
                page.index(),
                owner.index()
            );
            return Err(AttachError::AlreadyAttached);
        }

        entry.parent = Some(page);
        entry.next = None;
        let hidden = entry.hidden;

        let last = self.pages[page.index()].last;
        match last {
            Some(tail) => self.items[tail.index()].next = Some(item),
            None => self.pages[page.index()].first = Some(item),
        }

        let state = &mut self.pages[page.index()];
        state.last = Some(item);
        state.total += 1;
        if !hidden {
            state.visible += 1;
        }
        let resting = self.resting_focus(page);
        let state = &mut self.pages[page.index()];
        state.focused = resting;

        debug!(
            "menu-page: attach item={} page={} visible={} total={}",
            item.index(),
            page.index(),
            state.visible,
            state.total
        );
        Ok(())
    }

    /// Installs (or retargets) the synthesized back item at the head of `page`.
    pub fn set_parent_page(&mut self, page: PageId, parent: PageId) -> Result<(), AttachError> {
        if self.page(page).is_none() || self.page(parent).is_none() {
            return Err(AttachError::UnknownPage);
        }

        match self.pages[page.index()].back {
            Some(back) => self.items[back.index()].set_back_target(parent),
            None => {
                let back = self.insert_item(MenuItem::back(parent))?;
                let head = self.pages[page.index()].first;
                let entry = &mut self.items[back.index()];
                entry.parent = Some(page);
                entry.next = head;

                let state = &mut self.pages[page.index()];
                state.first = Some(back);
                if state.last.is_none() {
                    state.last = Some(back);
                }
                state.back = Some(back);
                state.total += 1;
                state.visible += 1;
            }
        }

        let state = &mut self.pages[page.index()];
        state.focused = if state.visible > 1 { 1 } else { 0 };
        debug!(
            "menu-page: parent page={} parent={} focused={}",
            page.index(),
            parent.index(),
            state.focused
        );
        Ok(())
    }

    /// Focus a page settles on: past the back item whenever other rows exist.
    fn resting_focus(&self, page: PageId) -> usize {
        let Some(state) = self.page(page) else {
            return 0;
        };
        let back_visible = state
            .back
            .and_then(|back| self.item(back))
            .is_some_and(|back| !back.hidden);
        if back_visible && state.visible > 1 { 1 } else { 0 }
    }

    /// Items of `page` in list order, hidden ones included.
    pub fn page_items(&self, page: PageId) -> PageItems<'_, 'a> {
        PageItems {
            menu: self,
            next: self.page(page).and_then(|page| page.first),
        }
    }

    /// Visible items of `page` in list order.
    pub fn visible_items(&self, page: PageId) -> impl Iterator<Item = ItemId> + '_ {
        self.page_items(page)
            .filter(|id| self.items.get(id.index()).is_some_and(|item| !item.hidden))
    }

    /// Item at `index`, counting only visible items unless `include_hidden`.
    pub fn item_at(&self, page: PageId, index: usize, include_hidden: bool) -> Option<ItemId> {
        if include_hidden {
            self.page_items(page).nth(index)
        } else {
            self.visible_items(page).nth(index)
        }
    }

    pub fn current_item(&self, page: PageId) -> Option<ItemId> {
        let focused = self.page(page)?.focused;
        self.item_at(page, focused, false)
    }

    /// Position of `item` among the visible items of `page`.
    pub fn find_item_index(&self, page: PageId, item: ItemId) -> Option<usize> {
        self.visible_items(page).position(|id| id == item)
    }

    /// Moves the focus of `page`, clamped into the visible range.
    pub fn set_focused_index(&mut self, page: PageId, index: usize) -> Result<(), AttachError> {
        let state = self.pages.get_mut(page.index()).ok_or(AttachError::UnknownPage)?;
        state.focused = index.min(state.visible.saturating_sub(1));
        Ok(())
    }

    /// Soft-removes `item`; it keeps its slot but is skipped by navigation.
    pub fn hide_item(&mut self, item: ItemId) -> Result<(), AttachError> {
        let entry = self.items.get(item.index()).ok_or(AttachError::UnknownItem)?;
        if entry.hidden {
            return Ok(());
        }
        let Some(page) = entry.parent else {
            self.items[item.index()].hidden = true;
            return Ok(());
        };

        let position = self.find_item_index(page, item);
        self.items[item.index()].hidden = true;
        self.pages[page.index()].visible = self.pages[page.index()].visible.saturating_sub(1);
        let resting = self.resting_focus(page);

        let state = &mut self.pages[page.index()];
        if let Some(position) = position {
            if position <= state.focused && state.focused > 0 {
                state.focused -= 1;
                if state.focused == 0 {
                    state.focused = resting;
                }
            }
        }
        state.focused = state.focused.min(state.visible.saturating_sub(1));
        if state.back.is_some() && state.visible == 1 {
            state.focused = 0;
        }

        debug!(
            "menu-page: hide item={} page={} visible={} focused={}",
            item.index(),
            page.index(),
            state.visible,
            state.focused
        );
        Ok(())
    }

    /// Restores a hidden item.
    pub fn show_item(&mut self, item: ItemId) -> Result<(), AttachError> {
        let entry = self.items.get(item.index()).ok_or(AttachError::UnknownItem)?;
        if !entry.hidden {
            return Ok(());
        }
        let Some(page) = entry.parent else {
            self.items[item.index()].hidden = false;
            return Ok(());
        };

        self.items[item.index()].hidden = false;
        let position = self.find_item_index(page, item);
        self.pages[page.index()].visible += 1;
        let resting = self.resting_focus(page);

        let state = &mut self.pages[page.index()];
        if let Some(position) = position {
            if position <= state.focused && state.focused + 1 < state.visible {
                state.focused += 1;
            }
        }
        if state.focused == 0 {
            state.focused = resting;
        }

        debug!(
            "menu-page: show item={} page={} visible={} focused={}",
            item.index(),
            page.index(),
            state.visible,
            state.focused
        );
        Ok(())
    }
}

/// Iterator over the intrusive item list of one page.
pub struct PageItems<'m, 'a> {
    menu: &'m Menu<'a>,
    next: Option<ItemId>,
}

impl Iterator for PageItems<'_, '_> {
    type Item = ItemId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.menu.item(current).and_then(|item| item.next);
        Some(current)
    }
}

#[cfg(test)]
mod tests;
