//! Host simulator: replays a key script through the menu engine and logs
//! every rendered frame as ASCII art.
//!
//! Keys: `w` Up, `s` Down, `a` Left, `d` Right, `e` Confirm, `q` Cancel.

use core::cell::{Cell, RefCell};

use heapless::String as HeaplessString;
use log::{error, info, warn};
use pagemenu_core::{
    catalog::{Select, SelectOption, Spinner},
    config::MenuConfig,
    engine::MenuEngine,
    input::{KeyPress, MockInput, ScriptedInput},
    item::{ActionArgs, Callback, MenuItem, Payload, Reaction},
    page::{AttachError, Menu},
    value::{Scalar, ValueRef},
};
use pagemenu_gfx::{Frame128x64, GraphicsRenderer};

use ascii::log_frame;
use stopwatch::Stopwatch;

#[path = "main/ascii.rs"]
mod ascii;
#[path = "main/stopwatch.rs"]
mod stopwatch;

const TITLE: &str = "pagemenu";
const VERSION: &str = env!("CARGO_PKG_VERSION");
const DEFAULT_SCRIPT: &str = "eeweseqsssewwesewwweq";
const DEFAULT_BRIGHTNESS: i32 = 50;
const DEFAULT_NAME: &str = "demo";
const MAX_SCRIPT_KEYS: usize = 128;

const MODES: [SelectOption<'static>; 3] = [
    SelectOption::new("Eco", Scalar::Byte(0)),
    SelectOption::new("Normal", Scalar::Byte(1)),
    SelectOption::new("Turbo", Scalar::Byte(2)),
];

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let script = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_SCRIPT.to_owned());
    if let Err(err) = run(&script) {
        error!("demo: menu setup failed: {}", err);
        std::process::exit(1);
    }
}

fn run(script: &str) -> Result<(), AttachError> {
    let brightness = Cell::new(DEFAULT_BRIGHTNESS);
    let backlight = Cell::new(true);
    let gain = Cell::new(1.25f64);
    let mode = Cell::new(1u8);
    let contrast = Cell::new(30);
    let name: RefCell<HeaplessString<12>> = RefCell::new(
        HeaplessString::try_from(DEFAULT_NAME).unwrap_or_else(|()| {
            warn!("demo: default name {:?} does not fit, starting empty", DEFAULT_NAME);
            HeaplessString::new()
        }),
    );
    let stopwatch = RefCell::new(Stopwatch::default());

    let saved = |args: &ActionArgs<'_>| {
        info!("demo: saved item={:?}", args.item.map(|item| item.index()));
        Reaction::Stay
    };
    let run_stopwatch = |_: &ActionArgs<'_>| Reaction::EnterContext(&stopwatch);
    let reset = |args: &ActionArgs<'_>| {
        if let Payload::Integer(level) = args.payload {
            brightness.set(level);
            info!("demo: brightness reset to {}", level);
        }
        Reaction::Stay
    };
    let exit = |_: &ActionArgs<'_>| {
        info!("demo: exit requested on main page");
        Reaction::Stay
    };

    let mut menu = Menu::new();
    let main = menu.add_page("Main")?;
    let settings = menu.add_page("Settings")?;

    menu.push_item(main, MenuItem::link("Settings", settings))?;
    menu.push_item(
        main,
        MenuItem::value("Name", ValueRef::Text(&name)).on_save(Callback::new(&saved)),
    )?;
    menu.push_item(
        main,
        MenuItem::select("Mode", ValueRef::Byte(&mode), Select::new(&MODES)),
    )?;
    menu.push_item(
        main,
        MenuItem::spinner(
            "Contrast",
            ValueRef::Integer(&contrast),
            Spinner::new(0.0, 100.0, 5.0),
        )
        .on_save(Callback::new(&saved)),
    )?;
    menu.push_item(main, MenuItem::button("Stopwatch", Callback::new(&run_stopwatch)))?;
    menu.push_item(
        main,
        MenuItem::button(
            "Reset",
            Callback::with_payload(&reset, Payload::Integer(DEFAULT_BRIGHTNESS)),
        ),
    )?;
    menu.set_exit_action(main, Callback::new(&exit))?;

    menu.push_item(
        settings,
        MenuItem::value("Bright", ValueRef::Integer(&brightness)).on_save(Callback::new(&saved)),
    )?;
    menu.push_item(settings, MenuItem::value("Backlight", ValueRef::Boolean(&backlight)))?;
    menu.push_item(
        settings,
        MenuItem::value("Gain", ValueRef::Double(&gain))
            .with_precision(3)
            .readonly(),
    )?;
    menu.set_parent_page(settings, main)?;

    let config = MenuConfig {
        splash: Some((TITLE, VERSION)),
        ..MenuConfig::default()
    };
    let renderer = GraphicsRenderer::new(Frame128x64::new(), &config);
    let mut engine = MenuEngine::new(menu, renderer, config);
    engine.start(main)?;
    log_frame("start", engine.renderer().target());

    let keys = parse_script(script);
    if keys.is_empty() {
        let mut idle = MockInput::new();
        if engine.process_inputs(&mut idle).is_ok() {
            info!("demo: no keys scripted, idle polls={}", idle.polls());
        }
    }
    for key in keys.iter().copied() {
        let mut input = ScriptedInput::new(core::slice::from_ref(&key));
        if engine.process_inputs(&mut input).is_err() {
            warn!("demo: input pump failed");
        }
        if input.remaining() > 0 {
            warn!("demo: key={:?} not accepted while a modal task blocks input", key);
        }
        log_frame(key_label(key), engine.renderer().target());
    }

    info!(
        "demo: done brightness={} backlight={} mode={} contrast={} name={:?} laps={}",
        brightness.get(),
        backlight.get(),
        mode.get(),
        contrast.get(),
        name.borrow().as_str(),
        stopwatch.borrow().laps()
    );
    Ok(())
}

fn parse_script(script: &str) -> heapless::Vec<KeyPress, MAX_SCRIPT_KEYS> {
    let mut keys = heapless::Vec::new();
    for ch in script.chars() {
        let key = match ch {
            'w' => KeyPress::Up,
            's' => KeyPress::Down,
            'a' => KeyPress::Left,
            'd' => KeyPress::Right,
            'e' => KeyPress::Confirm,
            'q' => KeyPress::Cancel,
            other => {
                warn!("demo: unknown key {:?} skipped", other);
                continue;
            }
        };
        if keys.push(key).is_err() {
            warn!("demo: script truncated at {} keys", MAX_SCRIPT_KEYS);
            break;
        }
    }
    keys
}

fn key_label(key: KeyPress) -> &'static str {
    match key {
        KeyPress::None => "none",
        KeyPress::Up => "up",
        KeyPress::Right => "right",
        KeyPress::Down => "down",
        KeyPress::Left => "left",
        KeyPress::Cancel => "cancel",
        KeyPress::Confirm => "confirm",
    }
}
