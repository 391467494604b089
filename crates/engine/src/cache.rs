use std::io;
use std::path::Path;

use anyhow::Result;
use primitives::{Price, Qty, TimestampMs};
use series::{Bar, RawBar};

#[derive(serde::Serialize, serde::Deserialize)]
struct BarRow {
    ts: i64,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
    #[serde(default)]
    trade: u64,
}

#[derive(serde::Serialize)]
struct SeriesRow {
    ts: i64,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
    trade: u64,
    atr: f64,
}

/// Reads `ts,open,high,low,close,volume[,trade]` rows
pub fn read_bars(path: &str) -> Result<Vec<RawBar>> {
    let rdr = csv::Reader::from_path(path)?;
    read_rows(rdr)
}

pub fn read_bars_from<R: io::Read>(reader: R) -> Result<Vec<RawBar>> {
    read_rows(csv::Reader::from_reader(reader))
}

fn read_rows<R: io::Read>(mut rdr: csv::Reader<R>) -> Result<Vec<RawBar>> {
    let mut out = Vec::new();

    for r in rdr.deserialize::<BarRow>() {
        let row = r?;
        out.push(RawBar {
            ts: TimestampMs(row.ts),
            open: Price(row.open),
            high: Price(row.high),
            low: Price(row.low),
            close: Price(row.close),
            volume: Qty(row.volume),
            trade: row.trade,
        });
    }

    Ok(out)
}

/// Writes the reconciled series, `atr` column included
pub fn write_series(path: &str, bars: &[Bar]) -> Result<()> {
    if let Some(parent) = Path::new(path).parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut wtr = csv::Writer::from_path(path)?;
    write_rows(&mut wtr, bars)?;
    wtr.flush()?;
    Ok(())
}

fn write_rows<W: io::Write>(wtr: &mut csv::Writer<W>, bars: &[Bar]) -> Result<()> {
    for b in bars {
        wtr.serialize(SeriesRow {
            ts: b.ts.0,
            open: b.open.0,
            high: b.high.0,
            low: b.low.0,
            close: b.close.0,
            volume: b.volume.0,
            trade: b.trade,
            atr: b.atr.0,
        })?;
    }
    Ok(())
}
