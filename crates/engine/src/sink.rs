use tracing::{info, warn};

use crate::event::ChartEvent;

pub fn consume(events: Vec<ChartEvent>) {
    for e in events {
        match e {
            ChartEvent::Reconciled {
                mode,
                changed,
                updated,
                appended,
                count,
                last,
            } => {
                info!(
                    ?mode,
                    changed,
                    updated,
                    appended,
                    count,
                    last = ?last.map(|t| t.0),
                    "reconciled"
                );
            }
            ChartEvent::Rejected(err) => {
                warn!(error = %err, "batch rejected");
            }
            ChartEvent::ToolsDropped { dropped } => {
                info!(dropped, "drawings lost their anchors after refresh");
            }
            ChartEvent::Log(msg) => {
                info!("{}", msg);
            }
        }
    }
}
