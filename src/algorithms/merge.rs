//! Merge sort expressed as a lazy stream of [`Step`] events
//!
//! The recursion is simulated with an explicit worklist so the sorter can be
//! pulled one event at a time and keep its position between pulls.

use std::iter::FusedIterator;

use crate::viz::Step;

/// Pending work for the simulated recursion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Frame {
    /// Sort the inclusive range `[l, r]`
    Sort { l: usize, r: usize },
    /// Both halves of `[l, r]` are sorted, merge them around `m`
    Merge { l: usize, m: usize, r: usize },
    /// Emit `MarkSorted` for `next..=r`
    Mark { next: usize, r: usize },
}

/// In-progress merge of `[l, m]` and `[m + 1, r]`
#[derive(Debug, Clone)]
struct MergeCursor {
    left: Vec<i64>,
    right: Vec<i64>,
    l: usize,
    m: usize,
    i: usize,
    j: usize,
    k: usize,
    /// A `Compare` for the current candidates has been emitted
    compared: bool,
}

impl MergeCursor {
    fn new(array: &[i64], l: usize, m: usize, r: usize) -> Self {
        Self {
            left: array[l..=m].to_vec(),
            right: array[m + 1..=r].to_vec(),
            l,
            m,
            i: 0,
            j: 0,
            k: l,
            compared: false,
        }
    }

    fn next_step(&mut self, array: &mut [i64]) -> Option<Step> {
        if self.i < self.left.len() && self.j < self.right.len() {
            if !self.compared {
                self.compared = true;
                return Some(Step::Compare {
                    i: self.l + self.i,
                    j: self.m + 1 + self.j,
                });
            }
            self.compared = false;

            // `<=` keeps equal elements in their original order
            let value = if self.left[self.i] <= self.right[self.j] {
                self.i += 1;
                self.left[self.i - 1]
            } else {
                self.j += 1;
                self.right[self.j - 1]
            };
            return Some(self.place(array, value));
        }

        if self.i < self.left.len() {
            self.i += 1;
            let value = self.left[self.i - 1];
            return Some(self.place(array, value));
        }

        if self.j < self.right.len() {
            self.j += 1;
            let value = self.right[self.j - 1];
            return Some(self.place(array, value));
        }

        None
    }

    fn place(&mut self, array: &mut [i64], value: i64) -> Step {
        let index = self.k;
        array[index] = value;
        self.k += 1;
        Step::Write { index, value }
    }
}

/// Lazy merge sort event stream. Build a new one to replay.
#[derive(Debug, Clone)]
pub struct MergeSort {
    array: Vec<i64>,
    stack: Vec<Frame>,
    merge: Option<MergeCursor>,
    finished: bool,
}

impl MergeSort {
    pub fn new(values: &[i64]) -> Self {
        let array = values.to_vec();
        let mut stack = Vec::new();
        if !array.is_empty() {
            stack.push(Frame::Sort {
                l: 0,
                r: array.len() - 1,
            });
        }
        Self {
            array,
            stack,
            merge: None,
            finished: false,
        }
    }

    /// The sorter's private working copy
    pub fn working_array(&self) -> &[i64] {
        &self.array
    }
}

impl Iterator for MergeSort {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        loop {
            if self.finished {
                return None;
            }

            if let Some(cursor) = self.merge.as_mut() {
                if let Some(step) = cursor.next_step(&mut self.array) {
                    return Some(step);
                }
                self.merge = None;
                continue;
            }

            match self.stack.pop() {
                Some(Frame::Sort { l, r }) => {
                    if l >= r {
                        return Some(Step::MarkSorted { index: l });
                    }
                    let m = l + (r - l) / 2;
                    self.stack.push(Frame::Merge { l, m, r });
                    self.stack.push(Frame::Sort { l: m + 1, r });
                    self.stack.push(Frame::Sort { l, r: m });
                }
                Some(Frame::Merge { l, m, r }) => {
                    // Marks run once the cursor is drained
                    self.stack.push(Frame::Mark { next: l, r });
                    self.merge = Some(MergeCursor::new(&self.array, l, m, r));
                }
                Some(Frame::Mark { next, r }) => {
                    if next < r {
                        self.stack.push(Frame::Mark { next: next + 1, r });
                    }
                    return Some(Step::MarkSorted { index: next });
                }
                None => {
                    self.finished = true;
                    return Some(Step::Done);
                }
            }
        }
    }
}

impl FusedIterator for MergeSort {}

/// Create the event stream for sorting `values`. The input is not modified.
pub fn merge_sort(values: &[i64]) -> MergeSort {
    MergeSort::new(values)
}
