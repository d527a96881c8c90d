//! Shared data model for the visualizer
//!
//! `Step` is the event vocabulary produced by the sorter, `VizState` is the
//! array plus highlight/sortedness annotations the renderer reads, and
//! `Instrumentation` holds the per-run counters.

use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// A single event emitted by a step-emitting sorter.
///
/// Events are index-based and carry no reference to the array they describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Step {
    /// Two positions are about to be compared
    Compare { i: usize, j: usize },
    /// `value` is placed at `index`
    Write {
        #[serde(rename = "i")]
        index: usize,
        value: i64,
    },
    /// `index` belongs to a sorted range
    MarkSorted {
        #[serde(rename = "i")]
        index: usize,
    },
    /// Terminal event, emitted exactly once
    Done,
}

impl Step {
    pub fn is_done(&self) -> bool {
        matches!(self, Step::Done)
    }
}

/// Highlighted positions: none, one (a write) or two (a comparison)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Active {
    #[default]
    None,
    Single(usize),
    Pair(usize, usize),
}

impl Active {
    pub fn contains(&self, index: usize) -> bool {
        match *self {
            Active::None => false,
            Active::Single(i) => i == index,
            Active::Pair(i, j) => i == index || j == index,
        }
    }
}

/// Array snapshot plus the annotations derived from applied steps
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VizState {
    pub array: Vec<i64>,
    pub active: Active,
    pub sorted: BTreeSet<usize>,
}

impl VizState {
    pub fn new(array: Vec<i64>) -> Self {
        Self {
            array,
            active: Active::None,
            sorted: BTreeSet::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.array.len()
    }

    pub fn is_empty(&self) -> bool {
        self.array.is_empty()
    }

    /// Drop highlight and sortedness, keeping the array as-is
    pub fn clear_annotations(&mut self) {
        self.active = Active::None;
        self.sorted.clear();
    }

    /// Apply one step to the snapshot.
    ///
    /// Returns `false` when the step references an index outside the array;
    /// such steps leave the state untouched.
    pub fn apply(&mut self, step: &Step) -> bool {
        let len = self.array.len();
        match *step {
            Step::Compare { i, j } => {
                if i >= len || j >= len {
                    return false;
                }
                self.active = Active::Pair(i, j);
            }
            Step::Write { index, value } => {
                let Some(slot) = self.array.get_mut(index) else {
                    return false;
                };
                *slot = value;
                self.active = Active::Single(index);
            }
            Step::MarkSorted { index } => {
                if index >= len {
                    return false;
                }
                self.sorted.insert(index);
            }
            Step::Done => {}
        }
        true
    }

    pub fn is_sorted(&self, index: usize) -> bool {
        self.sorted.contains(&index)
    }
}

/// Per-run counters and timing.
///
/// The clock is unset until a sequence is armed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Instrumentation {
    pub comparisons: u64,
    pub writes: u64,
    pub start_time: Option<Instant>,
    pub end_time: Option<Instant>,
}

impl Instrumentation {
    /// Fresh counters with the clock started now
    pub fn started_now() -> Self {
        Self {
            start_time: Some(Instant::now()),
            ..Self::default()
        }
    }

    /// Time from start to end, or to now while the run is still going.
    /// Zero when no run was ever started.
    pub fn elapsed(&self) -> Duration {
        match self.start_time {
            Some(start) => self
                .end_time
                .unwrap_or_else(Instant::now)
                .saturating_duration_since(start),
            None => Duration::ZERO,
        }
    }

    pub fn is_started(&self) -> bool {
        self.start_time.is_some()
    }

    pub fn is_finished(&self) -> bool {
        self.end_time.is_some()
    }
}
