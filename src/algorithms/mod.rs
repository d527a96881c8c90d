//! Step-emitting sorting algorithms

pub mod merge;

pub use merge::{merge_sort, MergeSort};

use serde::Serialize;

use crate::viz::Step;

/// Event totals for a full step sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StepCounts {
    pub comparisons: u64,
    pub writes: u64,
    pub marks: u64,
    pub events: u64,
}

impl StepCounts {
    pub fn record(&mut self, step: &Step) {
        match step {
            Step::Compare { .. } => self.comparisons += 1,
            Step::Write { .. } => self.writes += 1,
            Step::MarkSorted { .. } => self.marks += 1,
            Step::Done => {}
        }
        self.events += 1;
    }

    pub fn tally<'a, I>(steps: I) -> Self
    where
        I: IntoIterator<Item = &'a Step>,
    {
        let mut counts = Self::default();
        for step in steps {
            counts.record(step);
        }
        counts
    }
}
