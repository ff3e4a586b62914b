use super::{InputProvider, KeyPress};

/// Key source with nothing to deliver. Counts how often the engine asked.
#[derive(Default, Debug, Clone, Copy)]
pub struct MockInput {
    polls: u32,
}

impl MockInput {
    pub const fn new() -> Self {
        Self { polls: 0 }
    }

    pub const fn polls(&self) -> u32 {
        self.polls
    }
}

impl InputProvider for MockInput {
    type Error = core::convert::Infallible;

    fn poll_event(&mut self) -> Result<Option<KeyPress>, Self::Error> {
        self.polls = self.polls.saturating_add(1);
        Ok(None)
    }
}
