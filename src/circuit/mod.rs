//! Two-element circuit model.
//!
//! A lamp and a resistor wired either in series or in parallel. Everything
//! here is pure: the same inputs always give the same quantities, which is
//! what lets the live preview and the recorded points share one code path.

mod quantities;

pub use quantities::{current, total_resistance, ResistancePair, Topology};
