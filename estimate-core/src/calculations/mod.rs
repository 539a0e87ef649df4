//! Monetary derivations for estimates.
//!
//! Everything here is pure: totals are always recomputed with a full pass
//! over the current item list, never patched incrementally.

pub mod common;
pub mod totals;

pub use totals::{EstimateTotals, compute, line_total, line_total_parts};
