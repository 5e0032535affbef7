//! Incremental, overlap-safe run scoring for score-to-win mode.
//!
//! After a mark is placed, each of the four axes through it is measured.
//! A run of length `L ≥ 3` is worth `L - 2` points; the award is the net
//! growth over whatever that side's overlapping segments on the same line
//! were already paid.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::{Axis, Board, LineId};
use crate::core::{Side, SideMap};

use super::segments::SegmentSet;

/// Shortest run that scores.
pub const MIN_SCORING_RUN: usize = 3;

/// Points for a run of `length` (0 below the minimum).
#[must_use]
pub fn run_points(length: usize) -> u32 {
    if length < MIN_SCORING_RUN {
        0
    } else {
        (length - (MIN_SCORING_RUN - 1)) as u32
    }
}

/// Award on one axis of a placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisAward {
    pub axis: Axis,
    pub line: LineId,
    pub length: usize,
    pub awarded: u32,
}

/// Result of scoring one placement.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreDelta {
    /// Total points awarded.
    pub total: u32,
    /// Axes that paid out.
    pub axes: SmallVec<[AxisAward; 4]>,
}

/// Per-side cumulative scores and credited segments.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreLedger {
    scores: SideMap<u32>,
    lines: SideMap<FxHashMap<LineId, SegmentSet>>,
}

impl ScoreLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cumulative score of `side`.
    #[must_use]
    pub fn score(&self, side: Side) -> u32 {
        self.scores[side]
    }

    /// Both scores.
    #[must_use]
    pub fn scores(&self) -> &SideMap<u32> {
        &self.scores
    }

    /// Credited segments of `side` on `line`, if any.
    #[must_use]
    pub fn segments(&self, side: Side, line: LineId) -> Option<&SegmentSet> {
        self.lines[side].get(&line)
    }

    /// Score the mark `side` just placed at `index`.
    pub fn score_placement(&mut self, board: &Board, index: usize, side: Side) -> ScoreDelta {
        let mut delta = ScoreDelta::default();
        for axis in Axis::ALL {
            let run = board.run_length(index, side, axis);
            let points = run_points(run.length);
            if points == 0 {
                continue;
            }
            let awarded = self.lines[side]
                .entry(run.line)
                .or_default()
                .credit(run.start, run.end, points);
            if awarded > 0 {
                delta.total += awarded;
                delta.axes.push(AxisAward {
                    axis,
                    line: run.line,
                    length: run.length,
                    awarded,
                });
            }
        }
        self.scores[side] += delta.total;
        delta
    }

    /// Points placing `side` at `index` would award, without recording it.
    ///
    /// `board` must not yet hold the mark; it is evaluated on a copy.
    #[must_use]
    pub fn preview_placement(&self, board: &Board, index: usize, side: Side) -> u32 {
        let mut probe = board.clone();
        probe.set(index, crate::board::Cell::Mark(side));

        Axis::ALL
            .into_iter()
            .map(|axis| {
                let run = probe.run_length(index, side, axis);
                let points = run_points(run.length);
                match self.lines[side].get(&run.line) {
                    Some(set) => set.award_for(run.start, run.end, points),
                    None => points,
                }
            })
            .sum()
    }

    /// Clear all scores and segments.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
