impl<'a, R: Renderer> MenuEngine<'a, R> {
    fn apply_browse_key(&mut self, key: KeyPress) -> Result<(), CommitError> {
        let Some(page) = self.current else {
            return Ok(());
        };

        match key {
            KeyPress::Up => self.move_focus(page, false),
            KeyPress::Down => self.move_focus(page, true),
            KeyPress::Right => {
                if let Some(item) = self.menu.current_item(page)
                    && matches!(self.item_kind(item), Some(ItemKind::Link(_) | ItemKind::Button(_)))
                {
                    return self.activate(page, item);
                }
            }
            KeyPress::Left => {
                if let Some(item) = self.menu.current_item(page)
                    && matches!(self.item_kind(item), Some(ItemKind::Back(_)))
                {
                    return self.activate(page, item);
                }
            }
            KeyPress::Confirm => {
                if let Some(item) = self.menu.current_item(page) {
                    return self.activate(page, item);
                }
            }
            KeyPress::Cancel => self.cancel_page(page),
            KeyPress::None => {}
        }
        Ok(())
    }

    fn item_kind(&self, item: ItemId) -> Option<ItemKind<'a>> {
        self.menu.item(item).map(|entry| entry.kind())
    }

    /// Moves focus one visible item with wrap-around at both ends.
    fn move_focus(&mut self, page: PageId, forward: bool) {
        let Some(state) = self.menu.page(page) else {
            return;
        };
        let total = state.visible_count();
        if total == 0 {
            return;
        }

        let previous = state.focused_index();
        let next = if forward {
            rotate_forward(previous, total)
        } else {
            rotate_backward(previous, total)
        };
        if self.menu.set_focused_index(page, next).is_err() {
            return;
        }

        let rows = self.layout.items_per_screen;
        let scope = if total > rows && previous / rows != next / rows {
            RedrawScope::Full
        } else {
            RedrawScope::Pointer
        };
        debug!(
            "menu-nav: focus page={} index={}/{} scope={:?}",
            page.index(),
            next,
            total,
            scope
        );
        self.redraw(scope);
    }

    fn activate(&mut self, page: PageId, item: ItemId) -> Result<(), CommitError> {
        let Some(entry) = self.menu.item(item) else {
            return Ok(());
        };
        let readonly = entry.is_readonly();
        let save = entry.save_callback();

        match entry.kind() {
            ItemKind::Value(binding) => {
                if !readonly {
                    return self.begin_edit(item, binding, save);
                }
            }
            ItemKind::Link(target) => {
                if !readonly {
                    self.enter_page(target);
                }
            }
            ItemKind::Back(parent) => self.leave_page(page, parent),
            ItemKind::Button(callback) => {
                if !readonly {
                    debug!("menu-nav: button item={}", item.index());
                    self.invoke_callback(callback, Some(item));
                }
            }
        }
        Ok(())
    }

    fn enter_page(&mut self, target: PageId) {
        if self.menu.page(target).is_none() {
            warn!("menu-nav: link to unknown page={}", target.index());
            return;
        }

        debug!("menu-nav: enter page={}", target.index());
        self.current = Some(target);
        self.redraw(RedrawScope::Full);
    }

    /// Leaves `page` for `parent`. Focus of `page` is parked past its back
    /// item so a later visit lands on the first real row.
    fn leave_page(&mut self, page: PageId, parent: PageId) {
        let visible = self.menu.page(page).map_or(0, |state| state.visible_count());
        let parked = if visible > 1 { 1 } else { 0 };
        if let Err(err) = self.menu.set_focused_index(page, parked) {
            warn!("menu-nav: park focus failed page={} err={}", page.index(), err);
        }

        debug!("menu-nav: back page={} parent={}", page.index(), parent.index());
        self.enter_page(parent);
    }

    fn cancel_page(&mut self, page: PageId) {
        if let Some(first) = self.menu.item_at(page, 0, false)
            && let Some(ItemKind::Back(parent)) = self.item_kind(first)
        {
            self.leave_page(page, parent);
            return;
        }

        let Some(exit) = self.menu.page(page).and_then(|state| state.exit_action()) else {
            return;
        };
        if let Err(err) = self.menu.set_focused_index(page, 0) {
            warn!("menu-nav: exit focus reset failed page={} err={}", page.index(), err);
        }
        debug!("menu-nav: exit action page={}", page.index());
        self.redraw(RedrawScope::Pointer);
        self.invoke_callback(exit, None);
    }
}

fn rotate_forward(current: usize, total: usize) -> usize {
    if total == 0 { 0 } else { (current + 1) % total }
}

fn rotate_backward(current: usize, total: usize) -> usize {
    if total == 0 {
        0
    } else if current == 0 {
        total - 1
    } else {
        current - 1
    }
}
