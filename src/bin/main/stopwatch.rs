use log::info;
use pagemenu_core::{
    context::{ModalTask, TaskStatus},
    input::KeyPress,
};

/// Modal task counting laps: Up records a lap, Down clears, Confirm leaves.
#[derive(Default)]
pub struct Stopwatch {
    laps: u32,
}

impl Stopwatch {
    pub fn laps(&self) -> u32 {
        self.laps
    }
}

impl ModalTask for Stopwatch {
    fn on_enter(&mut self) {
        info!("stopwatch: started laps={}", self.laps);
    }

    fn on_key(&mut self, key: KeyPress) -> TaskStatus {
        match key {
            KeyPress::Up => {
                self.laps = self.laps.saturating_add(1);
                info!("stopwatch: lap={}", self.laps);
            }
            KeyPress::Down => {
                self.laps = 0;
                info!("stopwatch: cleared");
            }
            KeyPress::Confirm => return TaskStatus::Finished,
            _ => {}
        }
        TaskStatus::Running
    }

    fn on_exit(&mut self) {
        info!("stopwatch: stopped laps={}", self.laps);
    }
}
