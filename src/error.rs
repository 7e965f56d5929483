//! Error types shared by the experiment and export layers.

use std::fmt;

use thiserror::Error;

/// The physical quantity an input or derived value refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantity {
    /// Applied voltage (V)
    Voltage,
    /// Lamp resistance (Ω)
    LampResistance,
    /// Resistor resistance (Ω)
    ResistorResistance,
    /// Combined resistance of the circuit (Ω)
    TotalResistance,
    /// Current through the circuit (A)
    Current,
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Quantity::Voltage => "voltage",
            Quantity::LampResistance => "lamp resistance",
            Quantity::ResistorResistance => "resistor resistance",
            Quantity::TotalResistance => "total resistance",
            Quantity::Current => "current",
        };
        f.write_str(name)
    }
}

/// Rejected user input. Never leaves the experiment partially modified.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Voltage or (before the first point) a resistance is zero or negative
    #[error("non-positive input: {quantity} must be greater than zero (got {value})")]
    NonPositive { quantity: Quantity, value: f64 },

    /// Value is NaN or infinite
    #[error("non-finite value: {quantity} is {value}")]
    NonFinite { quantity: Quantity, value: f64 },

    /// Text that is neither empty nor a finite decimal number
    #[error("not a number: {quantity} input {text:?} could not be parsed")]
    NotANumber { quantity: Quantity, text: String },

    /// Voltage repeats the last recorded one (or any recorded one in strict mode)
    #[error("duplicate voltage: {voltage_v} V has already been recorded")]
    DuplicateVoltage { voltage_v: f64 },

    /// Resistances cannot change once a measurement has been recorded
    #[error("resistances locked: reset the experiment or change topology to edit them")]
    ResistancesLocked,

    /// Topology name other than series/parallel
    #[error("unknown topology {0:?} (expected \"series\" or \"parallel\")")]
    UnknownTopology(String),
}

/// Export failure. No file is produced when one of these is returned.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("empty series: record at least one measurement before exporting")]
    EmptySeries,

    #[error("chart not ready: the chart surface has not been laid out")]
    ChartNotReady,

    #[error("encoding failed: {0}")]
    Encode(String),

    /// The save/share collaborator failed; the encoded blob was still complete
    #[error("delivery failed: {0}")]
    Delivery(String),
}

impl From<csv::Error> for ExportError {
    fn from(e: csv::Error) -> Self {
        ExportError::Encode(e.to_string())
    }
}

impl From<image::ImageError> for ExportError {
    fn from(e: image::ImageError) -> Self {
        ExportError::Encode(e.to_string())
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(e: serde_json::Error) -> Self {
        ExportError::Encode(e.to_string())
    }
}

/// Top-level error for a dispatched lab command.
#[derive(Debug, Error)]
pub enum LabError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

pub type Result<T> = std::result::Result<T, LabError>;
