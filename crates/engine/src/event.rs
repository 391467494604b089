use primitives::TimestampMs;
use series::{SeriesError, UpdateMode};

#[derive(Debug, Clone)]
pub enum ChartEvent {
    Reconciled {
        mode: UpdateMode,
        changed: bool,
        updated: usize,
        appended: usize,
        count: usize,
        last: Option<TimestampMs>,
    },
    Rejected(SeriesError),
    ToolsDropped {
        dropped: usize,
    },
    Log(String),
}
