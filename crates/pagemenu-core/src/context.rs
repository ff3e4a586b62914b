//! Modal tasks that temporarily take over key input from the menu.

use core::cell::RefCell;

use crate::input::KeyPress;

/// Result of one modal key step.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TaskStatus {
    Running,
    /// The task relinquishes input; the engine runs its exit sequence.
    Finished,
}

/// Host-supplied modal loop.
///
/// While a task is active every key is routed to [`ModalTask::on_key`]. When
/// [`ModalTask::allow_exit`] is `true`, `Cancel` ends the task instead.
pub trait ModalTask {
    fn allow_exit(&self) -> bool {
        true
    }

    fn on_enter(&mut self) {}

    fn on_key(&mut self, key: KeyPress) -> TaskStatus;

    fn on_exit(&mut self) {}
}

/// Shared handle to a host-owned task.
pub type TaskHandle<'a> = &'a RefCell<dyn ModalTask + 'a>;
