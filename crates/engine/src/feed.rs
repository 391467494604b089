use primitives::Price;
use series::RawBar;

/// Replays recorded history the way a polling provider serves it:
/// every poll returns at most `fetch_limit` of the newest bars revealed so far.
pub struct PollFeed {
    pub fetch_limit: usize,
    history: Vec<RawBar>,
    cursor: usize,
}

impl PollFeed {
    pub fn new(history: Vec<RawBar>, fetch_limit: usize) -> Self {
        Self {
            fetch_limit: fetch_limit.max(1),
            history,
            cursor: 0,
        }
    }

    /// First poll reveals a full window, later polls `step` more bars.
    /// `None` once the whole history has been served.
    pub fn poll(&mut self, step: usize) -> Option<&[RawBar]> {
        if self.cursor >= self.history.len() {
            return None;
        }

        let advance = if self.cursor == 0 {
            self.fetch_limit
        } else {
            step.max(1)
        };
        self.cursor = (self.cursor + advance).min(self.history.len());

        let start = self.cursor.saturating_sub(self.fetch_limit);
        Some(&self.history[start..self.cursor])
    }

    pub fn remaining(&self) -> usize {
        self.history.len() - self.cursor
    }
}

/// Mimics a provider revising the still-open bar: close moves halfway to the high
pub fn revise_last(batch: &mut [RawBar]) {
    if let Some(last) = batch.last_mut() {
        last.close = Price((last.close.0 + last.high.0) / 2.0);
    }
}
