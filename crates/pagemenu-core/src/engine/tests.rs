use core::cell::{Cell, RefCell};
use std::{string::String, vec::Vec};

use super::*;
use crate::{
    catalog::{Select, SelectOption, Spinner},
    config::{DisplayGeometry, PointerStyle},
    context::ModalTask,
    input::{MockInput, ScriptedInput},
    item::{ActionArgs, MenuItem},
    value::{Scalar, ValueRef},
};

const LCD: DisplayGeometry = DisplayGeometry {
    width: 128,
    height: 64,
    char_width: 6,
};

#[derive(Clone, Debug)]
struct Frame {
    scope: RedrawScope,
    title: String,
    rows: Vec<String>,
    values: Vec<RowValue>,
    focused_row: Option<usize>,
    scroll: ScrollMetrics,
    pointer: PointerStyle,
    edit: Option<(String, Option<usize>)>,
}

#[derive(Default)]
struct Recorder {
    frames: Vec<Frame>,
    splash: Option<(String, String)>,
}

impl Recorder {
    fn last(&self) -> &Frame {
        self.frames.last().unwrap()
    }
}

impl Renderer for Recorder {
    fn geometry(&self) -> DisplayGeometry {
        LCD
    }

    fn render(&mut self, view: &PageView<'_>, scope: RedrawScope) {
        self.frames.push(Frame {
            scope,
            title: view.title.into(),
            rows: view.rows.iter().map(|row| row.title.into()).collect(),
            values: view.rows.iter().map(|row| row.value.clone()).collect(),
            focused_row: view.focused_row,
            scroll: view.scroll,
            pointer: view.pointer,
            edit: view.edit.map(|edit| match edit {
                EditView::Text {
                    visible,
                    cursor_column,
                } => (visible.into(), Some(cursor_column)),
                EditView::Choice { label } => (label.into(), None),
            }),
        });
    }

    fn render_splash(&mut self, line1: &str, line2: &str) {
        self.splash = Some((line1.into(), line2.into()));
    }
}

struct CountingTask {
    allow_exit: bool,
    keys: Vec<KeyPress>,
    entered: bool,
    exited: bool,
}

impl CountingTask {
    fn new(allow_exit: bool) -> Self {
        Self {
            allow_exit,
            keys: Vec::new(),
            entered: false,
            exited: false,
        }
    }
}

impl ModalTask for CountingTask {
    fn allow_exit(&self) -> bool {
        self.allow_exit
    }

    fn on_enter(&mut self) {
        self.entered = true;
    }

    fn on_key(&mut self, key: KeyPress) -> TaskStatus {
        self.keys.push(key);
        if key == KeyPress::Confirm {
            TaskStatus::Finished
        } else {
            TaskStatus::Running
        }
    }

    fn on_exit(&mut self) {
        self.exited = true;
    }
}

const ODD: [SelectOption<'static>; 3] = [
    SelectOption::new("one", Scalar::Integer(1)),
    SelectOption::new("five", Scalar::Integer(5)),
    SelectOption::new("nine", Scalar::Integer(9)),
];

const TITLES: [&str; 7] = ["E0", "E1", "E2", "E3", "E4", "E5", "E6"];

fn engine(menu: Menu<'_>) -> MenuEngine<'_, Recorder> {
    MenuEngine::new(menu, Recorder::default(), MenuConfig::default())
}

fn press(engine: &mut MenuEngine<'_, Recorder>, keys: &[KeyPress]) {
    for key in keys {
        engine.register_key_press(*key).unwrap();
    }
}

fn long_page(menu: &mut Menu<'static>) -> PageId {
    let page = menu.add_page("Long").unwrap();
    for title in TITLES {
        menu.push_item(page, MenuItem::link(title, page)).unwrap();
    }
    page
}

#[test]
fn settings_scenario_wraps_across_three_items() {
    let brightness = Cell::new(50);
    let mut menu = Menu::new();
    let root = menu.add_page("Root").unwrap();
    let settings = menu.add_page("Settings").unwrap();
    let display = menu.add_page("Display").unwrap();
    let level = menu
        .push_item(settings, MenuItem::value("Brightness", ValueRef::Integer(&brightness)))
        .unwrap();
    let link = menu
        .push_item(settings, MenuItem::link("Display", display))
        .unwrap();
    menu.set_parent_page(settings, root).unwrap();
    let back = menu.page(settings).unwrap().back_item();

    let mut engine = engine(menu);
    engine.start(settings).unwrap();
    assert_eq!(engine.current_item(), Some(level));

    press(&mut engine, &[KeyPress::Down]);
    assert_eq!(engine.current_item(), Some(link));
    press(&mut engine, &[KeyPress::Down]);
    assert_eq!(engine.current_item(), back);
    press(&mut engine, &[KeyPress::Up]);
    assert_eq!(engine.current_item(), Some(link));

    let frame = engine.renderer().last();
    assert_eq!(frame.title, "Settings");
    assert_eq!(frame.rows, ["Back", "Brightness", "Display"]);
    assert_eq!(frame.focused_row, Some(2));
}

#[test]
fn full_cycle_of_moves_returns_to_start() {
    let mut menu = Menu::new();
    let page = long_page(&mut menu);
    let mut engine = engine(menu);
    engine.start(page).unwrap();

    for start in 0..TITLES.len() {
        engine.menu_mut().set_focused_index(page, start).unwrap();
        for _ in 0..TITLES.len() {
            press(&mut engine, &[KeyPress::Down]);
        }
        assert_eq!(engine.menu().page(page).unwrap().focused_index(), start);
        for _ in 0..TITLES.len() {
            press(&mut engine, &[KeyPress::Up]);
        }
        assert_eq!(engine.menu().page(page).unwrap().focused_index(), start);
    }
}

#[test]
fn crossing_a_screen_window_forces_full_redraw() {
    let mut menu = Menu::new();
    let page = long_page(&mut menu);
    let mut engine = engine(menu);
    engine.start(page).unwrap();
    assert_eq!(engine.renderer().last().scope, RedrawScope::Full);

    for _ in 0..4 {
        press(&mut engine, &[KeyPress::Down]);
        assert_eq!(engine.renderer().last().scope, RedrawScope::Pointer);
    }

    press(&mut engine, &[KeyPress::Down]);
    let frame = engine.renderer().last();
    assert_eq!(frame.scope, RedrawScope::Full);
    assert_eq!(frame.rows, ["E5", "E6"]);
    assert_eq!(frame.focused_row, Some(0));
    assert_eq!(frame.scroll.current_screen, 1);
    assert_eq!(frame.scroll.total_screens, 2);
    assert!(frame.scroll.needs_scrollbar());

    press(&mut engine, &[KeyPress::Up]);
    assert_eq!(engine.renderer().last().scope, RedrawScope::Full);
    assert_eq!(engine.renderer().last().focused_row, Some(4));

    engine.menu_mut().set_focused_index(page, 0).unwrap();
    press(&mut engine, &[KeyPress::Up]);
    let frame = engine.renderer().last();
    assert_eq!(frame.scope, RedrawScope::Full);
    assert_eq!(frame.rows, ["E5", "E6"]);
    assert_eq!(frame.focused_row, Some(1));
}

#[test]
fn short_pages_only_repaint_the_pointer() {
    let mut menu = Menu::new();
    let page = menu.add_page("Short").unwrap();
    for title in TITLES.into_iter().take(3) {
        menu.push_item(page, MenuItem::link(title, page)).unwrap();
    }
    let mut engine = engine(menu);
    engine.start(page).unwrap();

    press(&mut engine, &[KeyPress::Up]);
    let frame = engine.renderer().last();
    assert_eq!(frame.scope, RedrawScope::Pointer);
    assert_eq!(frame.focused_row, Some(2));
    assert!(!frame.scroll.needs_scrollbar());
}

#[test]
fn up_from_first_real_item_lands_on_back() {
    let mut menu = Menu::new();
    let root = menu.add_page("Root").unwrap();
    let child = menu.add_page("Child").unwrap();
    menu.push_item(child, MenuItem::link("Only", child)).unwrap();
    menu.set_parent_page(child, root).unwrap();
    let back = menu.page(child).unwrap().back_item();

    let mut engine = engine(menu);
    engine.start(child).unwrap();
    assert_eq!(engine.menu().page(child).unwrap().focused_index(), 1);

    press(&mut engine, &[KeyPress::Up]);
    assert_eq!(engine.current_item(), back);
}

fn parent_and_child() -> (Menu<'static>, PageId, PageId, [ItemId; 3]) {
    let mut menu = Menu::new();
    let root = menu.add_page("Root").unwrap();
    let child = menu.add_page("Child").unwrap();
    let open = menu.push_item(root, MenuItem::link("Open", child)).unwrap();
    let a = menu.push_item(child, MenuItem::link("A", child)).unwrap();
    let b = menu.push_item(child, MenuItem::link("B", child)).unwrap();
    menu.set_parent_page(child, root).unwrap();
    (menu, root, child, [open, a, b])
}

#[test]
fn confirming_back_parks_focus_past_it() {
    let (menu, root, child, [open, a, _]) = parent_and_child();
    let mut engine = engine(menu);
    engine.start(child).unwrap();

    press(&mut engine, &[KeyPress::Up, KeyPress::Confirm]);
    assert_eq!(engine.current_page(), Some(root));
    assert_eq!(engine.current_item(), Some(open));
    assert_eq!(engine.renderer().last().scope, RedrawScope::Full);
    assert_eq!(engine.renderer().last().title, "Root");

    press(&mut engine, &[KeyPress::Confirm]);
    assert_eq!(engine.current_page(), Some(child));
    assert_eq!(engine.current_item(), Some(a));
}

#[test]
fn cancel_with_back_item_returns_to_parent() {
    let (menu, root, child, _) = parent_and_child();
    let mut engine = engine(menu);
    engine.start(child).unwrap();

    press(&mut engine, &[KeyPress::Down, KeyPress::Cancel]);
    assert_eq!(engine.current_page(), Some(root));
    assert_eq!(engine.menu().page(child).unwrap().focused_index(), 1);
}

#[test]
fn left_only_activates_back_and_right_only_links() {
    let (menu, root, child, [_, a, _]) = parent_and_child();
    let mut engine = engine(menu);
    engine.start(child).unwrap();

    press(&mut engine, &[KeyPress::Left]);
    assert_eq!(engine.current_page(), Some(child));
    assert_eq!(engine.current_item(), Some(a));

    press(&mut engine, &[KeyPress::Up, KeyPress::Right]);
    assert_eq!(engine.current_page(), Some(child));
    press(&mut engine, &[KeyPress::Left]);
    assert_eq!(engine.current_page(), Some(root));

    press(&mut engine, &[KeyPress::Right]);
    assert_eq!(engine.current_page(), Some(child));
}

#[test]
fn cancel_without_back_runs_exit_action() {
    let exits = Cell::new(0);
    let on_exit = |args: &ActionArgs<'_>| {
        assert!(args.item.is_none());
        exits.set(exits.get() + 1);
        Reaction::Stay
    };

    let mut menu = Menu::new();
    let root = menu.add_page("Root").unwrap();
    menu.push_item(root, MenuItem::link("A", root)).unwrap();
    menu.push_item(root, MenuItem::link("B", root)).unwrap();
    menu.set_exit_action(root, Callback::new(&on_exit)).unwrap();

    let mut engine = engine(menu);
    engine.start(root).unwrap();
    press(&mut engine, &[KeyPress::Down, KeyPress::Cancel]);

    assert_eq!(exits.get(), 1);
    assert_eq!(engine.menu().page(root).unwrap().focused_index(), 0);
    assert_eq!(engine.current_page(), Some(root));
}

#[test]
fn unchanged_integer_edit_restores_value() {
    let value = Cell::new(-4711);
    let saves = Cell::new(0);
    let on_save = |_: &ActionArgs<'_>| {
        saves.set(saves.get() + 1);
        Reaction::Stay
    };

    let mut menu = Menu::new();
    let page = menu.add_page("Page").unwrap();
    menu.push_item(
        page,
        MenuItem::value("Offset", ValueRef::Integer(&value)).on_save(Callback::new(&on_save)),
    )
    .unwrap();

    let mut engine = engine(menu);
    engine.start(page).unwrap();
    press(&mut engine, &[KeyPress::Confirm]);
    assert!(engine.is_editing());
    assert_eq!(
        engine.renderer().last().edit,
        Some((String::from("-4711"), Some(0)))
    );

    value.set(0);
    press(&mut engine, &[KeyPress::Confirm]);
    assert!(!engine.is_editing());
    assert_eq!(value.get(), -4711);
    assert_eq!(saves.get(), 1);
    assert_eq!(engine.renderer().last().scope, RedrawScope::Full);
}

#[test]
fn digits_step_in_place_and_append_past_the_end() {
    let value = Cell::new(42);
    let mut menu = Menu::new();
    let page = menu.add_page("Page").unwrap();
    menu.push_item(page, MenuItem::value("Level", ValueRef::Integer(&value)))
        .unwrap();

    let mut engine = engine(menu);
    engine.start(page).unwrap();
    press(&mut engine, &[KeyPress::Confirm, KeyPress::Up, KeyPress::Confirm]);
    assert_eq!(value.get(), 52);

    press(
        &mut engine,
        &[
            KeyPress::Confirm,
            KeyPress::Right,
            KeyPress::Right,
            KeyPress::Up,
        ],
    );
    assert_eq!(
        engine.renderer().last().edit,
        Some((String::from("520"), Some(2)))
    );
    press(&mut engine, &[KeyPress::Confirm]);
    assert_eq!(value.get(), 520);
}

#[test]
fn rejected_commit_keeps_the_editor_open() {
    let value = Cell::new(255u8);
    let saves = Cell::new(0);
    let on_save = |_: &ActionArgs<'_>| {
        saves.set(saves.get() + 1);
        Reaction::Stay
    };

    let mut menu = Menu::new();
    let page = menu.add_page("Page").unwrap();
    menu.push_item(
        page,
        MenuItem::value("Channel", ValueRef::Byte(&value)).on_save(Callback::new(&on_save)),
    )
    .unwrap();

    let mut engine = engine(menu);
    engine.start(page).unwrap();
    press(&mut engine, &[KeyPress::Confirm, KeyPress::Up]);

    assert_eq!(
        engine.register_key_press(KeyPress::Confirm),
        Err(CommitError::Parse)
    );
    assert!(engine.is_editing());
    assert_eq!(value.get(), 255);
    assert_eq!(saves.get(), 0);

    press(&mut engine, &[KeyPress::Cancel]);
    assert!(!engine.is_editing());
    assert_eq!(value.get(), 255);
}

#[test]
fn text_wider_than_the_edit_buffer_is_not_opened() {
    let name: RefCell<heapless::String<32>> =
        RefCell::new(heapless::String::try_from("abcdefghijklmnopqrstuvwxyz").unwrap());
    let mut menu = Menu::new();
    let page = menu.add_page("Page").unwrap();
    menu.push_item(page, MenuItem::value("Name", ValueRef::Text(&name)))
        .unwrap();

    let mut engine = engine(menu);
    engine.start(page).unwrap();
    let frames = engine.renderer().frames.len();

    for _ in 0..2 {
        assert_eq!(
            engine.register_key_press(KeyPress::Confirm),
            Err(CommitError::Capacity)
        );
        assert!(!engine.is_editing());
    }
    assert_eq!(name.borrow().as_str(), "abcdefghijklmnopqrstuvwxyz");
    assert_eq!(engine.renderer().frames.len(), frames);
}

#[test]
fn wide_double_is_not_opened() {
    let gain = Cell::new(1e20);
    let mut menu = Menu::new();
    let page = menu.add_page("Page").unwrap();
    menu.push_item(page, MenuItem::value("Gain", ValueRef::Double(&gain)))
        .unwrap();

    let mut engine = engine(menu);
    engine.start(page).unwrap();

    for _ in 0..2 {
        assert_eq!(
            engine.register_key_press(KeyPress::Confirm),
            Err(CommitError::Capacity)
        );
    }
    assert!(!engine.is_editing());
    assert_eq!(gain.get(), 1e20);

    gain.set(1234.5);
    press(&mut engine, &[KeyPress::Confirm, KeyPress::Confirm]);
    assert_eq!(gain.get(), 1234.5);
}

#[test]
fn text_edit_skips_the_pipe_character() {
    let name: RefCell<heapless::String<8>> = RefCell::new(heapless::String::try_from("{").unwrap());
    let mut menu = Menu::new();
    let page = menu.add_page("Page").unwrap();
    menu.push_item(page, MenuItem::value("Name", ValueRef::Text(&name)))
        .unwrap();

    let mut engine = engine(menu);
    engine.start(page).unwrap();
    press(&mut engine, &[KeyPress::Confirm, KeyPress::Up, KeyPress::Confirm]);
    assert_eq!(name.borrow().as_str(), "}");

    press(&mut engine, &[KeyPress::Confirm, KeyPress::Down, KeyPress::Confirm]);
    assert_eq!(name.borrow().as_str(), "{");
}

fn spinner_engine<'a>(value: &'a Cell<i32>, spinner: Spinner) -> MenuEngine<'a, Recorder> {
    let mut menu = Menu::new();
    let page = menu.add_page("Page").unwrap();
    menu.push_item(page, MenuItem::spinner("Step", ValueRef::Integer(value), spinner))
        .unwrap();
    let mut engine = engine(menu);
    engine.start(page).unwrap();
    engine
}

#[test]
fn spinner_clamps_at_max_without_looping() {
    let value = Cell::new(4);
    let mut engine = spinner_engine(&value, Spinner::new(0.0, 10.0, 2.0));

    press(&mut engine, &[KeyPress::Confirm]);
    assert_eq!(engine.renderer().last().edit, Some((String::from("4"), None)));
    press(&mut engine, &[KeyPress::Down]);
    assert_eq!(engine.renderer().last().edit, Some((String::from("6"), None)));

    let frames = engine.renderer().frames.len();
    press(
        &mut engine,
        &[KeyPress::Down, KeyPress::Down, KeyPress::Down, KeyPress::Down],
    );
    assert_eq!(engine.renderer().frames.len(), frames + 2);
    assert_eq!(engine.renderer().last().edit, Some((String::from("10"), None)));
    assert_eq!(value.get(), 4);

    press(&mut engine, &[KeyPress::Confirm]);
    assert_eq!(value.get(), 10);
    assert!(!engine.is_editing());
}

#[test]
fn looping_spinner_wraps_to_min() {
    let value = Cell::new(4);
    let mut engine = spinner_engine(&value, Spinner::new(0.0, 10.0, 2.0).looping(true));

    press(
        &mut engine,
        &[
            KeyPress::Confirm,
            KeyPress::Down,
            KeyPress::Down,
            KeyPress::Down,
            KeyPress::Down,
            KeyPress::Confirm,
        ],
    );
    assert_eq!(value.get(), 0);

    value.set(0);
    press(&mut engine, &[KeyPress::Confirm, KeyPress::Up, KeyPress::Confirm]);
    assert_eq!(value.get(), 10);
}

fn odd_select_engine(value: &Cell<i32>) -> MenuEngine<'_, Recorder> {
    let mut menu = Menu::new();
    let page = menu.add_page("Page").unwrap();
    menu.push_item(
        page,
        MenuItem::select("Mode", ValueRef::Integer(value), Select::new(&ODD)),
    )
    .unwrap();
    let mut engine = engine(menu);
    engine.start(page).unwrap();
    engine
}

#[test]
fn up_selects_the_previous_option() {
    let value = Cell::new(5);
    let mut engine = odd_select_engine(&value);

    press(&mut engine, &[KeyPress::Confirm, KeyPress::Up]);
    assert_eq!(engine.renderer().last().edit, Some((String::from("one"), None)));
    press(&mut engine, &[KeyPress::Confirm]);
    assert_eq!(value.get(), 1);
}

#[test]
fn down_selects_the_next_option() {
    let value = Cell::new(5);
    let mut engine = odd_select_engine(&value);

    press(&mut engine, &[KeyPress::Confirm, KeyPress::Down]);
    assert_eq!(engine.renderer().last().edit, Some((String::from("nine"), None)));
    press(&mut engine, &[KeyPress::Confirm]);
    assert_eq!(value.get(), 9);
}

#[test]
fn select_clamps_at_both_ends() {
    let value = Cell::new(5);
    let mut engine = odd_select_engine(&value);

    press(
        &mut engine,
        &[KeyPress::Confirm, KeyPress::Up, KeyPress::Up, KeyPress::Confirm],
    );
    assert_eq!(value.get(), 1);

    press(
        &mut engine,
        &[KeyPress::Confirm, KeyPress::Down, KeyPress::Down, KeyPress::Down, KeyPress::Confirm],
    );
    assert_eq!(value.get(), 9);
}

#[test]
fn unmatched_select_starts_without_selection() {
    let value = Cell::new(7);
    let mut menu = Menu::new();
    let page = menu.add_page("Page").unwrap();
    menu.push_item(
        page,
        MenuItem::select("Mode", ValueRef::Integer(&value), Select::new(&ODD)),
    )
    .unwrap();

    let mut engine = engine(menu);
    engine.start(page).unwrap();
    assert_eq!(
        engine.renderer().last().values,
        vec![RowValue::Choice(ValueText::new())]
    );

    press(&mut engine, &[KeyPress::Confirm]);
    assert_eq!(engine.renderer().last().edit, Some((String::new(), None)));
    press(&mut engine, &[KeyPress::Up]);
    assert_eq!(engine.renderer().last().edit, Some((String::from("one"), None)));
    press(&mut engine, &[KeyPress::Confirm]);
    assert_eq!(value.get(), 1);

    value.set(7);
    press(&mut engine, &[KeyPress::Confirm, KeyPress::Down, KeyPress::Confirm]);
    assert_eq!(value.get(), 9);
}

#[test]
fn cancelled_choice_leaves_value_untouched() {
    let value = Cell::new(5);
    let mut menu = Menu::new();
    let page = menu.add_page("Page").unwrap();
    menu.push_item(
        page,
        MenuItem::select("Mode", ValueRef::Integer(&value), Select::new(&ODD)),
    )
    .unwrap();

    let mut engine = engine(menu);
    engine.start(page).unwrap();
    press(
        &mut engine,
        &[KeyPress::Confirm, KeyPress::Down, KeyPress::Left, KeyPress::Cancel],
    );
    assert_eq!(value.get(), 5);
    assert!(!engine.is_editing());
}

#[test]
fn boolean_toggles_without_entering_the_editor() {
    let enabled = Cell::new(false);
    let saves = Cell::new(0);
    let on_save = |_: &ActionArgs<'_>| {
        saves.set(saves.get() + 1);
        Reaction::Stay
    };

    let mut menu = Menu::new();
    let page = menu.add_page("Page").unwrap();
    menu.push_item(
        page,
        MenuItem::value("Backlight", ValueRef::Boolean(&enabled)).on_save(Callback::new(&on_save)),
    )
    .unwrap();

    let mut engine = engine(menu);
    engine.start(page).unwrap();
    press(&mut engine, &[KeyPress::Confirm]);

    assert!(enabled.get());
    assert!(!engine.is_editing());
    assert_eq!(saves.get(), 1);
    let frame = engine.renderer().last();
    assert_eq!(frame.scope, RedrawScope::Value);
    assert_eq!(frame.values, vec![RowValue::Toggle(true)]);
}

#[test]
fn readonly_values_are_not_edited() {
    let value = Cell::new(3);
    let mut menu = Menu::new();
    let page = menu.add_page("Page").unwrap();
    menu.push_item(page, MenuItem::value("Fixed", ValueRef::Integer(&value)).readonly())
        .unwrap();

    let mut engine = engine(menu);
    engine.start(page).unwrap();
    let frames = engine.renderer().frames.len();
    press(&mut engine, &[KeyPress::Confirm]);

    assert!(!engine.is_editing());
    assert_eq!(value.get(), 3);
    assert_eq!(engine.renderer().frames.len(), frames);
}

#[test]
fn context_without_exit_swallows_every_key() {
    let task = RefCell::new(CountingTask::new(false));
    let enter = |_: &ActionArgs<'_>| Reaction::EnterContext(&task);

    let mut menu = Menu::new();
    let page = menu.add_page("Page").unwrap();
    let run = menu
        .push_item(page, MenuItem::button("Run", Callback::new(&enter)))
        .unwrap();
    menu.push_item(page, MenuItem::link("Other", page)).unwrap();

    let mut engine = engine(menu);
    engine.start(page).unwrap();
    press(&mut engine, &[KeyPress::Confirm]);
    assert!(engine.has_context());
    assert!(task.borrow().entered);

    assert!(!engine.ready_for_key());
    press(&mut engine, &[KeyPress::Down, KeyPress::Cancel]);
    assert!(engine.has_context());
    assert_eq!(engine.current_item(), Some(run));
    assert!(!engine.is_editing());
    assert_eq!(
        task.borrow().keys,
        [KeyPress::None, KeyPress::Down, KeyPress::Cancel]
    );

    press(&mut engine, &[KeyPress::Confirm]);
    assert!(!engine.has_context());
    assert!(task.borrow().exited);
    assert!(engine.ready_for_key());
    assert_eq!(engine.renderer().last().scope, RedrawScope::Full);
}

#[test]
fn cancel_leaves_an_exitable_context() {
    let task = RefCell::new(CountingTask::new(true));
    let enter = |_: &ActionArgs<'_>| Reaction::EnterContext(&task);

    let mut menu = Menu::new();
    let page = menu.add_page("Page").unwrap();
    menu.push_item(page, MenuItem::button("Run", Callback::new(&enter)))
        .unwrap();

    let mut engine = engine(menu);
    engine.start(page).unwrap();
    press(&mut engine, &[KeyPress::Right]);
    assert!(engine.has_context());
    assert!(engine.ready_for_key());

    press(&mut engine, &[KeyPress::Up, KeyPress::Cancel]);
    assert!(!engine.has_context());
    assert!(task.borrow().exited);
    assert_eq!(task.borrow().keys, [KeyPress::Up]);
}

#[test]
fn hiding_through_the_engine_redraws_current_page() {
    let mut menu = Menu::new();
    let page = menu.add_page("Page").unwrap();
    let a = menu.push_item(page, MenuItem::link("A", page)).unwrap();
    let b = menu.push_item(page, MenuItem::link("B", page)).unwrap();
    menu.push_item(page, MenuItem::link("C", page)).unwrap();

    let mut engine = engine(menu);
    engine.start(page).unwrap();
    press(&mut engine, &[KeyPress::Down]);
    engine.hide_item(b).unwrap();

    assert_eq!(engine.current_item(), Some(a));
    let frame = engine.renderer().last();
    assert_eq!(frame.scope, RedrawScope::Full);
    assert_eq!(frame.rows, ["A", "C"]);

    engine.show_item(b).unwrap();
    assert_eq!(engine.renderer().last().rows, ["A", "B", "C"]);
}

#[test]
fn scripted_input_is_drained_through_the_engine() {
    let (menu, root, _, [open, ..]) = parent_and_child();
    let keys = [
        KeyPress::Confirm,
        KeyPress::Down,
        KeyPress::Cancel,
        KeyPress::Down,
    ];
    let mut input = ScriptedInput::new(&keys);

    let mut engine = engine(menu);
    engine.start(root).unwrap();
    engine.process_inputs(&mut input).unwrap();

    assert_eq!(input.remaining(), 0);
    assert_eq!(engine.current_page(), Some(root));
    assert_eq!(engine.current_item(), Some(open));
}

#[test]
fn idle_input_leaves_the_screen_untouched() {
    let (menu, root, _, [open, ..]) = parent_and_child();
    let mut engine = engine(menu);
    engine.start(root).unwrap();
    let frames = engine.renderer().frames.len();

    let mut idle = MockInput::new();
    engine.process_inputs(&mut idle).unwrap();

    assert_eq!(idle.polls(), 1);
    assert_eq!(engine.renderer().frames.len(), frames);
    assert_eq!(engine.current_item(), Some(open));
}

#[test]
fn splash_is_shown_before_the_first_page() {
    let mut menu = Menu::new();
    let page = menu.add_page("Main").unwrap();
    menu.push_item(page, MenuItem::link("Loop", page)).unwrap();

    let config = MenuConfig {
        splash: Some(("pagemenu", "v0.1")),
        pointer_style: PointerStyle::Highlight,
        ..MenuConfig::default()
    };
    let mut engine = MenuEngine::new(menu, Recorder::default(), config);
    engine.start(page).unwrap();

    let recorder = engine.renderer();
    assert_eq!(
        recorder.splash,
        Some((String::from("pagemenu"), String::from("v0.1")))
    );
    assert_eq!(recorder.frames.len(), 1);
    assert_eq!(recorder.last().pointer, PointerStyle::Highlight);
    assert_eq!(engine.layout().items_per_screen, 5);
}
