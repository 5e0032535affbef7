//! Credited segments along a single line.
//!
//! A segment records a contiguous span that has already been paid out and
//! at what level. When a run grows, only the growth is paid: the award is
//! the new run's points minus the best points among the segments it
//! overlaps, and the run replaces those segments.

use serde::{Deserialize, Serialize};

/// A credited span `[start, end]` (inclusive, positions along the line).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Segment {
    pub start: usize,
    pub end: usize,
    pub points: u32,
}

impl Segment {
    /// Check if this segment shares at least one position with `[start, end]`.
    #[must_use]
    pub const fn overlaps(&self, start: usize, end: usize) -> bool {
        self.start <= end && start <= self.end
    }
}

/// Disjoint credited segments of one line, sorted by start.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentSet {
    segments: Vec<Segment>,
}

impl SegmentSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Segments in position order.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Best points among segments overlapping `[start, end]` (0 if none).
    #[must_use]
    pub fn prior_points(&self, start: usize, end: usize) -> u32 {
        self.segments
            .iter()
            .filter(|s| s.overlaps(start, end))
            .map(|s| s.points)
            .max()
            .unwrap_or(0)
    }

    /// Points a run `[start, end]` worth `points` would be awarded.
    #[must_use]
    pub fn award_for(&self, start: usize, end: usize, points: u32) -> u32 {
        points.saturating_sub(self.prior_points(start, end))
    }

    /// Credit a run and return the points awarded.
    ///
    /// Every overlapping segment is dropped and the run itself is recorded
    /// at its own span and points. A run rebuilt shorter than its credited
    /// level lowers that level, so regrowing it pays again.
    pub fn credit(&mut self, start: usize, end: usize, points: u32) -> u32 {
        let award = self.award_for(start, end, points);

        let merged = Segment { start, end, points };
        self.segments.retain(|s| !s.overlaps(start, end));

        let at = self
            .segments
            .iter()
            .position(|s| s.start > merged.start)
            .unwrap_or(self.segments.len());
        self.segments.insert(at, merged);

        award
    }
}
