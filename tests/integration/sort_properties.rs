//! Property-based tests for the step-emitting merge sort.
//!
//! For arbitrary inputs the event stream must:
//!
//! 1. Replay onto a copy of the input to produce the sorted permutation
//! 2. End with exactly one `Done`
//! 3. Reference only in-range indices
//! 4. Finish with a `MarkSorted` sweep over every index
//! 5. Stay within the n·⌈log₂ n⌉ comparison and write bounds
//! 6. Be deterministic for equal inputs
//! 7. Compare and write exactly like a textbook top-down merge sort, which
//!    keeps equal values in input order

use mergeviz::algorithms::StepCounts;
use mergeviz::{merge_sort, Step, VizState};
use proptest::prelude::*;

fn input_strategy() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(-1_000i64..1_000, 0..160)
}

/// Few distinct values so most merges see ties
fn tie_heavy_strategy() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(0i64..4, 0..200)
}

/// Textbook top-down merge sort over `(value, original_index)` pairs
#[derive(Default)]
struct Textbook {
    comparisons: u64,
    writes: Vec<(usize, i64)>,
}

impl Textbook {
    fn run(values: &[i64]) -> (Self, Vec<(i64, usize)>) {
        let mut items: Vec<(i64, usize)> = values.iter().copied().zip(0..).collect();
        let mut reference = Self::default();
        if !items.is_empty() {
            let r = items.len() - 1;
            reference.sort(&mut items, 0, r);
        }
        (reference, items)
    }

    fn sort(&mut self, items: &mut [(i64, usize)], l: usize, r: usize) {
        if l >= r {
            return;
        }
        let m = l + (r - l) / 2;
        self.sort(items, l, m);
        self.sort(items, m + 1, r);

        let left = items[l..=m].to_vec();
        let right = items[m + 1..=r].to_vec();
        let (mut i, mut j, mut k) = (0, 0, l);
        while i < left.len() && j < right.len() {
            self.comparisons += 1;
            if left[i].0 <= right[j].0 {
                items[k] = left[i];
                i += 1;
            } else {
                items[k] = right[j];
                j += 1;
            }
            self.writes.push((k, items[k].0));
            k += 1;
        }
        for item in left[i..].iter().chain(&right[j..]) {
            items[k] = *item;
            self.writes.push((k, item.0));
            k += 1;
        }
    }
}

fn ceil_log2(n: usize) -> u64 {
    if n <= 1 {
        0
    } else {
        u64::from(usize::BITS - (n - 1).leading_zeros())
    }
}

proptest! {
    #[test]
    fn replay_yields_sorted_permutation(values in input_strategy()) {
        let mut state = VizState::new(values.clone());
        for step in merge_sort(&values) {
            prop_assert!(state.apply(&step), "out-of-range step {:?}", step);
        }

        let mut expected = values.clone();
        expected.sort();
        prop_assert_eq!(state.array, expected);
    }

    #[test]
    fn single_trailing_done(values in input_strategy()) {
        let steps: Vec<Step> = merge_sort(&values).collect();
        prop_assert_eq!(steps.iter().filter(|s| s.is_done()).count(), 1);
        prop_assert_eq!(steps.last(), Some(&Step::Done));
    }

    #[test]
    fn final_sweep_marks_every_index(values in input_strategy()) {
        let steps: Vec<Step> = merge_sort(&values).collect();
        let n = values.len();
        let sweep: Vec<Step> = steps[steps.len() - 1 - n..steps.len() - 1].to_vec();
        let expected: Vec<Step> = (0..n).map(|index| Step::MarkSorted { index }).collect();
        prop_assert_eq!(sweep, expected);
    }

    #[test]
    fn counts_within_bounds(values in input_strategy()) {
        let steps: Vec<Step> = merge_sort(&values).collect();
        let counts = StepCounts::tally(&steps);
        let bound = values.len() as u64 * ceil_log2(values.len());

        prop_assert!(counts.comparisons <= bound);
        prop_assert!(counts.writes <= bound);
        prop_assert!(counts.comparisons <= counts.writes);
        prop_assert_eq!(counts.events, steps.len() as u64);
    }

    #[test]
    fn matches_textbook_merge_on_ties(values in tie_heavy_strategy()) {
        let steps: Vec<Step> = merge_sort(&values).collect();
        let (reference, sorted) = Textbook::run(&values);

        let counts = StepCounts::tally(&steps);
        prop_assert_eq!(counts.comparisons, reference.comparisons);

        let writes: Vec<(usize, i64)> = steps
            .iter()
            .filter_map(|step| match *step {
                Step::Write { index, value } => Some((index, value)),
                _ => None,
            })
            .collect();
        prop_assert_eq!(writes, reference.writes);

        for pair in sorted.windows(2) {
            prop_assert!(pair[0].0 <= pair[1].0);
            if pair[0].0 == pair[1].0 {
                prop_assert!(pair[0].1 < pair[1].1, "equal values reordered: {:?}", pair);
            }
        }
    }

    #[test]
    fn deterministic(values in input_strategy()) {
        let a: Vec<Step> = merge_sort(&values).collect();
        let b: Vec<Step> = merge_sort(&values).collect();
        prop_assert_eq!(a, b);
    }
}

#[test]
fn textbook_counts_for_small_input() {
    let (reference, sorted) = Textbook::run(&[5, 3, 8, 1]);
    assert_eq!(reference.comparisons, 5);
    assert_eq!(reference.writes.len(), 8);
    assert_eq!(sorted, vec![(1, 3), (3, 1), (5, 0), (8, 2)]);
}

#[test]
fn ceil_log2_helper() {
    assert_eq!(ceil_log2(0), 0);
    assert_eq!(ceil_log2(1), 0);
    assert_eq!(ceil_log2(2), 1);
    assert_eq!(ceil_log2(4), 2);
    assert_eq!(ceil_log2(5), 3);
}
