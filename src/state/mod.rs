//! State management for the lab.
//!
//! Contains the experiment protocol, the recorded series, the raw input
//! fields and the view model derived from them.

mod experiment;
mod input;
mod measurement;
mod series;
mod view;

pub use experiment::{Experiment, ExperimentState, Preview};
pub use input::{parse_or_zero, parse_quantity, InputPanel};
pub use measurement::{format_as_entered, format_fixed2, MeasurementPoint};
pub use series::{SeriesSnapshot, SeriesStore};
pub use view::{LabView, TableRow};
