use anyhow::{Context, Result};
use chrono::DateTime;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use engine::cache::{read_bars, write_series};
use engine::chart::Chart;
use engine::feed::{PollFeed, revise_last};
use engine::sink;
use primitives::{Price, TimestampMs};
use series::BarSource;

/// Replays a recorded bar history through the reconciler, poll by poll.
#[derive(Parser, Debug)]
struct Args {
    /// CSV with `ts,open,high,low,close,volume[,trade]`, ascending by ts
    #[arg(long)]
    input: String,
    #[arg(long, default_value = "BTCUSDT")]
    name: String,
    /// Bars in a full provider response
    #[arg(long, default_value_t = 300)]
    fetch_limit: usize,
    /// New bars revealed per poll
    #[arg(long, default_value_t = 1)]
    step: usize,
    /// Revise the newest bar on every other poll
    #[arg(long, default_value_t = false)]
    revise: bool,
    /// Where to write the final series with its atr column
    #[arg(long)]
    output: Option<String>,
}

fn render_ts(ts: Option<TimestampMs>) -> String {
    match ts.and_then(|t| DateTime::from_timestamp_millis(t.0)) {
        Some(dt) => dt.to_rfc3339(),
        None => "-".to_string(),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "engine=info,replay=info,series=info".into()),
        )
        .init();

    let args = Args::parse();
    if args.fetch_limit == 0 {
        anyhow::bail!("fetch_limit must be > 0");
    }

    let history = read_bars(&args.input)
        .with_context(|| format!("read bars failed: {}", args.input))?;
    info!(bars = history.len(), input = %args.input, "history loaded");

    let mut chart = Chart::new(&args.name, args.fetch_limit);
    let mut feed = PollFeed::new(history, args.fetch_limit);
    let mut polls = 0usize;

    while let Some(window) = feed.poll(args.step) {
        let mut batch = window.to_vec();
        polls += 1;
        if args.revise && polls % 2 == 0 {
            revise_last(&mut batch);
        }

        sink::consume(chart.apply(&batch));
    }

    let store = &chart.store;
    let last_atr = match store.count() {
        0 => Price(0.0),
        n => store.at(n - 1).atr,
    };
    info!(
        name = %store.name(),
        polls,
        bars = store.count(),
        decimal_digits = store.decimal_digits(),
        last = %render_ts(store.last_date()),
        last_atr = %last_atr,
        "replay finished"
    );

    if let Some(path) = &args.output {
        write_series(path, store.bars()).context("write series failed")?;
        info!(output = %path, "series written");
    }

    Ok(())
}
