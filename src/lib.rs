//! Ohm Lab - circuit simulation and measurement-recording engine
//!
//! Backs an Ohm's-law virtual lab: derives total resistance and current for a
//! lamp and a resistor in series or parallel, records a voltage sweep under a
//! lock-then-vary protocol, and exports the series as CSV, a PNG chart, or a
//! JSON session snapshot.

pub mod circuit;
pub mod config;
pub mod error;
pub mod export;
pub mod session;
pub mod state;

pub use circuit::{current, total_resistance, ResistancePair, Topology};
pub use config::LabParameters;
pub use error::{ExportError, LabError, Quantity, ValidationError};
pub use export::{ChartSurface, DirectoryTarget, ExportArtifact, ExportKind, MemoryTarget, ShareTarget};
pub use session::{Command, ExportReceipt, LabSession, Outcome};
pub use state::{Experiment, ExperimentState, LabView, MeasurementPoint, SeriesSnapshot, SeriesStore};
