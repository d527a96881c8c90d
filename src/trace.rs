//! Headless run of the sorter that prints its event stream as JSON lines

use std::io::Write;

use serde::Serialize;

use crate::algorithms::{merge_sort, StepCounts};
use crate::viz::VizState;

/// Totals printed after the event stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceSummary {
    #[serde(flatten)]
    pub counts: StepCounts,
    /// Input with every event replayed onto it
    pub sorted: Vec<i64>,
}

/// Sort `values`, writing one JSON object per event and then the summary.
///
/// With `summary_only` the events are counted but not printed.
pub fn run_trace<W: Write>(
    values: &[i64],
    summary_only: bool,
    out: &mut W,
) -> anyhow::Result<TraceSummary> {
    let mut state = VizState::new(values.to_vec());
    let mut counts = StepCounts::default();

    for step in merge_sort(values) {
        if !state.apply(&step) {
            tracing::warn!(?step, "Sorter emitted an out-of-range step");
        }
        counts.record(&step);
        if !summary_only {
            serde_json::to_writer(&mut *out, &step)?;
            writeln!(out)?;
        }
    }

    let summary = TraceSummary {
        counts,
        sorted: state.array,
    };
    serde_json::to_writer(&mut *out, &summary)?;
    writeln!(out)?;
    out.flush()?;

    tracing::info!(
        size = values.len(),
        comparisons = summary.counts.comparisons,
        writes = summary.counts.writes,
        "Trace finished"
    );
    Ok(summary)
}
