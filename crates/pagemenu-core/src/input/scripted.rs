use super::{InputProvider, KeyPress};

/// Replays a fixed key sequence, one key per poll.
#[derive(Debug, Clone)]
pub struct ScriptedInput<'a> {
    keys: &'a [KeyPress],
    cursor: usize,
}

impl<'a> ScriptedInput<'a> {
    pub const fn new(keys: &'a [KeyPress]) -> Self {
        Self { keys, cursor: 0 }
    }

    pub const fn remaining(&self) -> usize {
        self.keys.len().saturating_sub(self.cursor)
    }
}

impl InputProvider for ScriptedInput<'_> {
    type Error = core::convert::Infallible;

    fn poll_event(&mut self) -> Result<Option<KeyPress>, Self::Error> {
        let Some(key) = self.keys.get(self.cursor).copied() else {
            return Ok(None);
        };
        self.cursor = self.cursor.saturating_add(1);
        Ok(Some(key))
    }
}
