use primitives::TimestampMs;
use series::{Anchored, BarSource, RawBar, SeriesStore, ToolManager, UpdateMode};

use crate::event::ChartEvent;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DrawingKind {
    TrendLine,
    Marker,
}

/// A user drawing pinned to bar dates
#[derive(Debug, Clone, PartialEq)]
pub struct Drawing {
    pub kind: DrawingKind,
    pub anchors: Vec<TimestampMs>,
}

impl Anchored for Drawing {
    fn anchors(&self) -> &[TimestampMs] {
        &self.anchors
    }
}

/// One instrument on screen: its series, its drawings and the fetch limit it polls with
pub struct Chart {
    pub store: SeriesStore,
    pub tools: ToolManager<Drawing>,
    pub fetch_limit: usize,
}

impl Chart {
    pub fn new(name: &str, fetch_limit: usize) -> Self {
        Self {
            store: SeriesStore::new(name),
            tools: ToolManager::new(),
            fetch_limit,
        }
    }

    /// Feed one provider response into the series.
    /// A Refresh invalidates positions, so drawings whose dates vanished are dropped here.
    pub fn apply(&mut self, batch: &[RawBar]) -> Vec<ChartEvent> {
        let mut events = Vec::new();

        let changed = match self.store.update(batch, self.fetch_limit) {
            Ok(changed) => changed,
            Err(e) => {
                events.push(ChartEvent::Rejected(e));
                return events;
            }
        };

        events.push(ChartEvent::Reconciled {
            mode: self.store.update_mode(),
            changed,
            updated: self.store.updated_count(),
            appended: self.store.appended_count(),
            count: self.store.count(),
            last: self.store.last_date(),
        });

        if !changed {
            events.push(ChartEvent::Log(format!(
                "{} bars without overlap, history kept",
                batch.len()
            )));
        }

        if self.store.update_mode() == UpdateMode::Refresh {
            let store = &self.store;
            let dropped = self
                .tools
                .retain_anchored(|ts| store.position_of(ts).is_some());
            if dropped > 0 {
                events.push(ChartEvent::ToolsDropped { dropped });
            }
        }

        events
    }

    /// Bar positions of a drawing's anchors in the current series
    pub fn anchor_positions(&self, drawing: &Drawing) -> Option<Vec<usize>> {
        drawing
            .anchors
            .iter()
            .map(|&ts| self.store.position_of(ts))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(ts: i64) -> RawBar {
        RawBar::from((ts, 10.0, 11.0, 9.0, 10.5, 1.0, 1))
    }

    fn marker(ts: i64) -> Drawing {
        Drawing {
            kind: DrawingKind::Marker,
            anchors: vec![TimestampMs(ts)],
        }
    }

    #[test]
    fn refresh_drops_drawings_with_vanished_dates() {
        let mut chart = Chart::new("BTCUSDT", 3);
        chart.apply(&[raw(1), raw(2), raw(3)]);
        chart.tools.add(marker(1));
        chart.tools.add(Drawing {
            kind: DrawingKind::TrendLine,
            anchors: vec![TimestampMs(3), TimestampMs(4)],
        });
        chart.tools.add(marker(5));
        chart.tools.select(0);

        // full-length window without the stored last date
        let events = chart.apply(&[raw(4), raw(5), raw(6)]);

        assert_eq!(chart.store.update_mode(), UpdateMode::Refresh);
        assert!(matches!(
            events.last(),
            Some(ChartEvent::ToolsDropped { dropped: 2 })
        ));
        assert_eq!(chart.tools.count(), 1);
        assert_eq!(chart.tools.get(0), Some(&marker(5)));
        assert!(chart.tools.selected().is_none());
        assert_eq!(chart.anchor_positions(&marker(5)), Some(vec![1]));
    }

    #[test]
    fn append_keeps_drawings_and_positions() {
        let mut chart = Chart::new("BTCUSDT", 300);
        chart.apply(&[raw(1), raw(2)]);
        chart.tools.add(marker(2));

        let events = chart.apply(&[raw(2), raw(3)]);

        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0],
            ChartEvent::Reconciled {
                mode: UpdateMode::Append,
                changed: true,
                appended: 1,
                count: 3,
                ..
            }
        ));
        assert_eq!(chart.tools.count(), 1);
        assert_eq!(chart.anchor_positions(&marker(2)), Some(vec![1]));
        assert_eq!(chart.anchor_positions(&marker(9)), None);
    }

    #[test]
    fn short_stale_batch_is_logged() {
        let mut chart = Chart::new("BTCUSDT", 300);
        chart.apply(&[raw(1), raw(2)]);

        let events = chart.apply(&[raw(7)]);

        assert!(matches!(
            events.as_slice(),
            [
                ChartEvent::Reconciled {
                    mode: UpdateMode::DoNothing,
                    changed: false,
                    ..
                },
                ChartEvent::Log(_)
            ]
        ));
        assert_eq!(chart.store.count(), 2);
    }

    #[test]
    fn rejected_batch_is_reported() {
        let mut chart = Chart::new("BTCUSDT", 300);

        let events = chart.apply(&[raw(2), raw(1)]);

        assert!(matches!(events.as_slice(), [ChartEvent::Rejected(_)]));
        assert_eq!(chart.store.count(), 0);
    }
}
