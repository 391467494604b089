use tracing::{debug, trace, warn};

use crate::atr::recompute_atr;
use crate::bar::{Bar, RawBar};
use crate::error::SeriesError;
use crate::store::{BarSource, SeriesStore, UpdateMode};

/// Dates strictly ascending, all prices and volumes finite.
pub fn validate_batch(batch: &[RawBar]) -> Result<(), SeriesError> {
    for (index, raw) in batch.iter().enumerate() {
        let fields = [
            ("open", raw.open.0),
            ("high", raw.high.0),
            ("low", raw.low.0),
            ("close", raw.close.0),
            ("volume", raw.volume.0),
        ];
        if let Some((field, _)) = fields.into_iter().find(|(_, v)| !v.is_finite()) {
            return Err(SeriesError::NonFiniteValue { index, field });
        }

        if index > 0 {
            let prev = batch[index - 1].ts;
            if raw.ts <= prev {
                return Err(SeriesError::MalformedBatch {
                    index,
                    prev,
                    next: raw.ts,
                });
            }
        }
    }

    Ok(())
}

impl SeriesStore {
    /// Reconcile the store with the provider's current view of the instrument.
    ///
    /// `batch` is the provider's last bars in ascending date order; `fetch_limit`
    /// is the number of bars a full response carries. Returns `Ok(false)` only
    /// when a short batch does not overlap the stored series. Otherwise the bar
    /// matching the stored last date is corrected if it differs, newer bars are
    /// appended, or (no overlap with a full-length batch, or an empty store) the
    /// series is rebuilt from the batch. ATR is recomputed over the whole series
    /// whenever `Ok(true)` is returned. A rejected batch leaves bars, mode and
    /// counters exactly as the previous call left them.
    pub fn update(&mut self, batch: &[RawBar], fetch_limit: usize) -> Result<bool, SeriesError> {
        if let Err(e) = validate_batch(batch) {
            warn!(series = %self.name(), error = %e, "batch rejected");
            return Err(e);
        }

        self.updated_count = 0;
        self.appended_count = 0;
        self.erased_count = 0;

        if let Some(last_index) = self.bars.len().checked_sub(1) {
            let last_ts = self.bars[last_index].ts;

            match batch.iter().position(|raw| raw.ts == last_ts) {
                Some(matched) => {
                    self.apply_overlap(batch, matched, last_index);
                    return Ok(true);
                }
                None if batch.len() < fetch_limit => {
                    self.update_mode = UpdateMode::DoNothing;
                    debug!(
                        series = %self.name(),
                        batch = batch.len(),
                        fetch_limit,
                        last = %last_ts,
                        "short batch without overlap, keeping history"
                    );
                    return Ok(false);
                }
                None => {}
            }
        }

        self.refresh(batch);
        Ok(true)
    }

    fn apply_overlap(&mut self, batch: &[RawBar], matched: usize, last_index: usize) {
        let raw = &batch[matched];

        if self.bars[last_index].same_values(raw) {
            self.update_mode = UpdateMode::DoNothing;
        } else {
            self.update_mode = UpdateMode::Update;
            self.bars[last_index] = Bar::from_raw(raw);
            self.updated_count += 1;
        }

        let tail = &batch[matched + 1..];
        if !tail.is_empty() {
            self.update_mode = UpdateMode::Append;
            self.bars.reserve(tail.len());
            for raw in tail {
                trace!(series = %self.name(), ts = %raw.ts, "append");
                self.bars.push(Bar::from_raw(raw));
                self.appended_count += 1;
            }
        }

        recompute_atr(&mut self.bars);

        debug!(
            series = %self.name(),
            mode = ?self.update_mode,
            updated = self.updated_count,
            appended = self.appended_count,
            count = self.bars.len(),
            "overlap applied"
        );
    }

    /// Rebuild from scratch. Precision only widens here, never on Update/Append.
    fn refresh(&mut self, batch: &[RawBar]) {
        self.update_mode = UpdateMode::Refresh;

        let mut digits = self.decimal_digits;
        let mut bars = Vec::with_capacity(batch.len());
        for raw in batch {
            for p in raw.ohlc() {
                digits = digits.max(p.decimal_digits());
            }
            bars.push(Bar::from_raw(raw));
        }

        self.bars = bars;
        self.decimal_digits = digits;
        recompute_atr(&mut self.bars);

        debug!(
            series = %self.name(),
            count = self.bars.len(),
            decimal_digits = self.decimal_digits,
            "refreshed"
        );
    }
}
