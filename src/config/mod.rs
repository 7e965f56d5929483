//! Configuration module for loading lab parameters.

mod parameters;

pub use parameters::{
    ChartParameters, ExportParameters, InputDefaults, LabParameters, ProtocolParameters,
    DEFAULT_PARAMETERS_PATH,
};
