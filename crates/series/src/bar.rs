use primitives::{Price, Qty, TimestampMs};

/// One stored bar of the series
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Bar {
    pub ts: TimestampMs,
    pub open: Price,
    pub high: Price,
    pub low: Price,
    pub close: Price,
    pub volume: Qty,
    pub trade: u64,
    /// Derived, rewritten by `atr::recompute_atr` after every mutation
    pub atr: Price,
}

/// One bar as served by the data provider: `(date, open, high, low, close, volume, trade)`
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RawBar {
    pub ts: TimestampMs,
    pub open: Price,
    pub high: Price,
    pub low: Price,
    pub close: Price,
    pub volume: Qty,
    pub trade: u64,
}

impl From<(i64, f64, f64, f64, f64, f64, u64)> for RawBar {
    fn from(t: (i64, f64, f64, f64, f64, f64, u64)) -> Self {
        let (ts, open, high, low, close, volume, trade) = t;
        Self {
            ts: TimestampMs(ts),
            open: Price(open),
            high: Price(high),
            low: Price(low),
            close: Price(close),
            volume: Qty(volume),
            trade,
        }
    }
}

impl RawBar {
    pub fn ohlc(&self) -> [Price; 4] {
        [self.open, self.high, self.low, self.close]
    }
}

impl Bar {
    pub fn from_raw(raw: &RawBar) -> Self {
        Self {
            ts: raw.ts,
            open: raw.open,
            high: raw.high,
            low: raw.low,
            close: raw.close,
            volume: raw.volume,
            trade: raw.trade,
            atr: Price(0.0),
        }
    }

    /// Exact comparison of open/high/low/close/volume/trade; the date is the match key and is not compared.
    pub fn same_values(&self, raw: &RawBar) -> bool {
        self.open == raw.open
            && self.high == raw.high
            && self.low == raw.low
            && self.close == raw.close
            && self.volume == raw.volume
            && self.trade == raw.trade
    }
}
