impl<'a, R: Renderer> MenuEngine<'a, R> {
    /// Feeds one key through the engine.
    ///
    /// A rejected value commit returns an error and leaves the editor open so
    /// the value can be corrected or the edit cancelled. A value too long for
    /// the working buffer is never opened for editing and reports
    /// [`CommitError::Capacity`].
    pub fn register_key_press(&mut self, key: KeyPress) -> Result<(), CommitError> {
        if let Some(task) = self.context {
            self.dispatch_context(task, key);
            return Ok(());
        }

        if key == KeyPress::None {
            return Ok(());
        }

        if self.edit.is_some() {
            self.apply_edit_key(key)
        } else {
            self.apply_browse_key(key)
        }
    }

    /// Whether the host may deliver a real key.
    ///
    /// While a context that refuses exit owns input, this feeds
    /// [`KeyPress::None`] to it and reports `false`.
    pub fn ready_for_key(&mut self) -> bool {
        let Some(task) = self.context else {
            return true;
        };
        if allows_exit(task) {
            return true;
        }

        self.dispatch_context(task, KeyPress::None);
        self.context.is_none()
    }

    pub fn has_context(&self) -> bool {
        self.context.is_some()
    }

    /// Hands key input to `task` until it finishes or is cancelled.
    pub fn enter_context(&mut self, task: TaskHandle<'a>) {
        if self.context.is_some() {
            self.exit_context();
        }
        self.edit = None;

        match task.try_borrow_mut() {
            Ok(mut task) => task.on_enter(),
            Err(_) => {
                warn!("menu-ctx: enter ignored, task is busy");
                return;
            }
        }
        self.context = Some(task);
        debug!("menu-ctx: enter allow_exit={}", allows_exit(task));
    }

    /// Ends the active context and restores the menu screen.
    pub fn exit_context(&mut self) {
        let Some(task) = self.context.take() else {
            return;
        };
        if let Ok(mut task) = task.try_borrow_mut() {
            task.on_exit();
        }

        debug!("menu-ctx: exit");
        self.re_init();
    }

    fn dispatch_context(&mut self, task: TaskHandle<'a>, key: KeyPress) {
        if key == KeyPress::Cancel && allows_exit(task) {
            self.exit_context();
            return;
        }

        let status = match task.try_borrow_mut() {
            Ok(mut task) => task.on_key(key),
            Err(_) => {
                warn!("menu-ctx: key={:?} dropped, task is busy", key);
                TaskStatus::Running
            }
        };
        if status == TaskStatus::Finished {
            self.exit_context();
        }
    }

    fn apply_reaction(&mut self, reaction: Reaction<'a>) {
        match reaction {
            Reaction::Stay => {}
            Reaction::EnterContext(task) => self.enter_context(task),
        }
    }

    fn invoke_callback(&mut self, callback: Callback<'a>, item: Option<ItemId>) {
        let reaction = callback.invoke(item);
        self.apply_reaction(reaction);
    }
}

fn allows_exit(task: TaskHandle<'_>) -> bool {
    task.try_borrow().map(|task| task.allow_exit()).unwrap_or(false)
}
