//! Score-to-win mode scoring.
//!
//! - `SegmentSet`: disjoint credited spans of one line
//! - `ScoreLedger`: per-side scores and segments keyed by `LineId`
//!
//! Runs of three or more pay `length - 2` points; extending a run only
//! pays its net growth.

pub mod ledger;
pub mod segments;

pub use ledger::{run_points, AxisAward, ScoreDelta, ScoreLedger, MIN_SCORING_RUN};
pub use segments::{Segment, SegmentSet};
