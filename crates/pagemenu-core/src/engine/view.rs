impl<'a, R: Renderer> MenuEngine<'a, R> {
    /// Resolves the screen window around the focused item and renders it.
    fn redraw(&mut self, scope: RedrawScope) {
        let Some(page) = self.current else {
            return;
        };
        let Some(state) = self.menu.page(page) else {
            return;
        };

        let visible = state.visible_count();
        let focused = state.focused_index();
        let scroll = ScrollMetrics::new(self.layout.items_per_screen, visible, focused);
        let window_start = scroll.current_screen * scroll.items_per_screen;

        let mut rows: Vec<RowView<'a>, MAX_ROWS_PER_SCREEN> = Vec::new();
        for id in self
            .menu
            .visible_items(page)
            .skip(window_start)
            .take(scroll.items_per_screen)
        {
            let Some(entry) = self.menu.item(id) else {
                continue;
            };
            if rows.push(row_view(entry)).is_err() {
                break;
            }
        }

        let mut label = ValueText::new();
        let edit = match &self.edit {
            Some(EditSession::Text { buffer, .. }) => Some(EditView::Text {
                visible: buffer.visible(),
                cursor_column: buffer.visual_cursor(),
            }),
            Some(EditSession::Choice { item, selected }) => {
                let binding = self.menu.item(*item).and_then(|entry| entry.binding());
                if let Some(binding) = binding
                    && let Some(options) = binding.options
                {
                    match selected {
                        Some(index) => {
                            options.write_label(binding.value, *index, binding.precision, &mut label)
                        }
                        None => options.write_current_label(binding.value, binding.precision, &mut label),
                    }
                }
                Some(EditView::Choice {
                    label: label.as_str(),
                })
            }
            None => None,
        };

        let view = PageView {
            title: state.title(),
            rows: &rows,
            focused_row: (visible > 0).then(|| focused - window_start),
            scroll,
            pointer: self.config.pointer_style,
            edit,
        };
        self.renderer.render(&view, scope);
    }
}

fn row_view<'a>(entry: &MenuItem<'a>) -> RowView<'a> {
    let (kind, value) = match entry.kind() {
        ItemKind::Value(binding) => (RowKind::Value, row_value(binding)),
        ItemKind::Link(_) => (RowKind::Link, RowValue::None),
        ItemKind::Back(_) => (RowKind::Back, RowValue::None),
        ItemKind::Button(_) => (RowKind::Button, RowValue::None),
    };

    RowView {
        title: entry.title(),
        kind,
        readonly: entry.is_readonly(),
        value,
    }
}

fn row_value(binding: ValueBinding<'_>) -> RowValue {
    let mut text = ValueText::new();
    if let Some(options) = binding.options {
        options.write_current_label(binding.value, binding.precision, &mut text);
        return RowValue::Choice(text);
    }

    match binding.value.flag() {
        Some(flag) => RowValue::Toggle(flag),
        None => {
            binding.value.write_display(&mut text, binding.precision);
            RowValue::Text(text)
        }
    }
}
