impl<'a, R: Renderer> MenuEngine<'a, R> {
    /// Opens the editor for a value item. A value whose text does not fit the
    /// working buffer is left alone and reported as [`CommitError::Capacity`].
    fn begin_edit(
        &mut self,
        item: ItemId,
        binding: ValueBinding<'a>,
        save: Option<Callback<'a>>,
    ) -> Result<(), CommitError> {
        if let Some(options) = binding.options {
            let selected = options.selected_index(binding.value);
            debug!(
                "menu-edit: choice item={} selected={:?}/{}",
                item.index(),
                selected,
                options.len()
            );
            self.edit = Some(EditSession::Choice { item, selected });
            self.redraw(RedrawScope::Value);
            return Ok(());
        }

        if binding.value.value_type() == ValueType::Boolean {
            let state = binding.value.toggle();
            debug!("menu-edit: toggle item={} state={:?}", item.index(), state);
            self.redraw(RedrawScope::Value);
            if let Some(save) = save {
                self.invoke_callback(save, Some(item));
            }
            return Ok(());
        }

        let buffer = EditBuffer::load(binding.value, binding.precision, self.layout.value_columns)
            .inspect_err(|err| warn!("menu-edit: edit refused item={} err={}", item.index(), err))?;
        debug!(
            "menu-edit: text item={} type={:?} limit={}",
            item.index(),
            buffer.value_type(),
            buffer.limit()
        );
        self.edit = Some(EditSession::Text { item, buffer });
        self.redraw(RedrawScope::Value);
        Ok(())
    }

    fn apply_edit_key(&mut self, key: KeyPress) -> Result<(), CommitError> {
        let Some(session) = self.edit.as_mut() else {
            return Ok(());
        };
        let item = session.item();
        let Some((binding, save)) = self
            .menu
            .item(item)
            .and_then(|entry| Some((entry.binding()?, entry.save_callback())))
        else {
            self.close_edit();
            return Ok(());
        };

        match key {
            KeyPress::Confirm => self.commit_edit(item, binding, save),
            KeyPress::Cancel => {
                debug!("menu-edit: cancel item={}", item.index());
                self.close_edit();
                Ok(())
            }
            KeyPress::Up | KeyPress::Down | KeyPress::Left | KeyPress::Right => {
                let changed = match session {
                    EditSession::Text { buffer, .. } => match key {
                        KeyPress::Up => buffer.step(true).is_some(),
                        KeyPress::Down => buffer.step(false).is_some(),
                        KeyPress::Right => buffer.move_right(),
                        _ => buffer.move_left(),
                    },
                    EditSession::Choice { selected, .. } => match (key, binding.options) {
                        (KeyPress::Up, Some(options)) => {
                            step_selection(selected, &options, false)
                        }
                        (KeyPress::Down, Some(options)) => {
                            step_selection(selected, &options, true)
                        }
                        _ => false,
                    },
                };
                if changed {
                    self.redraw(RedrawScope::Value);
                }
                Ok(())
            }
            KeyPress::None => Ok(()),
        }
    }

    fn commit_edit(
        &mut self,
        item: ItemId,
        binding: ValueBinding<'a>,
        save: Option<Callback<'a>>,
    ) -> Result<(), CommitError> {
        let result = match &self.edit {
            Some(EditSession::Text { buffer, .. }) => {
                Some(binding.value.commit_text(buffer.as_str()))
            }
            Some(EditSession::Choice {
                selected: Some(index),
                ..
            }) => binding
                .options
                .map(|options| options.apply(binding.value, *index)),
            _ => None,
        };
        let Some(result) = result else {
            self.close_edit();
            return Ok(());
        };

        if let Err(err) = result {
            warn!("menu-edit: commit rejected item={} err={}", item.index(), err);
            return Err(err);
        }

        debug!("menu-edit: commit item={} value={:?}", item.index(), binding.value);
        self.close_edit();
        if let Some(save) = save {
            self.invoke_callback(save, Some(item));
        }
        Ok(())
    }

    fn close_edit(&mut self) {
        self.edit = None;
        self.redraw(RedrawScope::Full);
    }
}

/// Steps a pending option selection to the next index (`forward`, Down) or
/// the previous one (Up). Starting from no selection, Up lands on the first
/// option and Down on the last.
fn step_selection(selected: &mut Option<usize>, options: &OptionSource<'_>, forward: bool) -> bool {
    let len = options.len();
    if len == 0 {
        return false;
    }

    let last = len - 1;
    let next = match (*selected, forward) {
        (None, false) => 0,
        (None, true) => last,
        (Some(index), true) if index >= last => {
            if options.wraps() {
                0
            } else {
                last
            }
        }
        (Some(index), true) => index + 1,
        (Some(0), false) => {
            if options.wraps() {
                last
            } else {
                0
            }
        }
        (Some(index), false) => (index - 1).min(last),
    };

    let changed = *selected != Some(next);
    *selected = Some(next);
    changed
}
