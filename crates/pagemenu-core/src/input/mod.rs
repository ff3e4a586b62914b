//! Key-input abstraction layer.

mod mock;
mod scripted;

pub use mock::MockInput;
pub use scripted::ScriptedInput;

/// Discrete navigation keys consumed by the menu engine.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum KeyPress {
    /// No key; fed by the engine itself while a modal task blocks input.
    None,
    Up,
    Right,
    Down,
    Left,
    Cancel,
    Confirm,
}

/// Polled input provider.
pub trait InputProvider {
    type Error;

    fn poll_event(&mut self) -> Result<Option<KeyPress>, Self::Error>;
}
