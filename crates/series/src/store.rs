use primitives::TimestampMs;

use crate::bar::Bar;

/// Outcome of the last reconciliation
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum UpdateMode {
    #[default]
    DoNothing,
    Refresh,
    Update,
    Append,
}

/// Read-side capabilities of a bar series (rendering, tool anchoring)
pub trait BarSource {
    fn name(&self) -> &str;

    fn count(&self) -> usize;

    /// Panics when `index >= count()`
    fn at(&self, index: usize) -> &Bar;

    fn last_date(&self) -> Option<TimestampMs> {
        match self.count() {
            0 => None,
            n => Some(self.at(n - 1).ts),
        }
    }
}

/// Bars of one instrument plus the stats of the last reconciliation.
///
/// Mutated only through `update` (see `reconcile.rs`). A Refresh swaps the
/// whole bar vector, so positions held outside the store are stale afterwards.
#[derive(Debug, Clone)]
pub struct SeriesStore {
    name: String,
    pub(crate) bars: Vec<Bar>,
    pub(crate) decimal_digits: u32,
    pub(crate) update_mode: UpdateMode,
    pub(crate) updated_count: usize,
    pub(crate) appended_count: usize,
    pub(crate) erased_count: usize,
}

impl SeriesStore {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bars: Vec::new(),
            decimal_digits: 0,
            update_mode: UpdateMode::DoNothing,
            updated_count: 0,
            appended_count: 0,
            erased_count: 0,
        }
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Bar> {
        self.bars.get(index)
    }

    /// Position of the bar opened at `ts`
    pub fn position_of(&self, ts: TimestampMs) -> Option<usize> {
        self.bars.binary_search_by_key(&ts, |b| b.ts).ok()
    }

    pub fn decimal_digits(&self) -> u32 {
        self.decimal_digits
    }

    pub fn update_mode(&self) -> UpdateMode {
        self.update_mode
    }

    pub fn updated_count(&self) -> usize {
        self.updated_count
    }

    pub fn appended_count(&self) -> usize {
        self.appended_count
    }

    /// Always 0: no reconciliation path erases bars
    pub fn erased_count(&self) -> usize {
        self.erased_count
    }
}

impl BarSource for SeriesStore {
    fn name(&self) -> &str {
        &self.name
    }

    fn count(&self) -> usize {
        self.bars.len()
    }

    fn at(&self, index: usize) -> &Bar {
        match self.bars.get(index) {
            Some(bar) => bar,
            None => panic!(
                "bar index {} out of range for series '{}' (count {})",
                index,
                self.name,
                self.bars.len()
            ),
        }
    }
}
