//! Lab parameter structures.
//!
//! Every section has defaults, so a parameter file only needs the fields it
//! wants to override.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Default location of the parameter file
pub const DEFAULT_PARAMETERS_PATH: &str = "data/parameters/lab.json";

/// Top-level parameters container
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabParameters {
    /// Initial texts of the input fields
    pub inputs: InputDefaults,
    /// Export file names and destination
    pub export: ExportParameters,
    /// Chart surface size and styling
    pub chart: ChartParameters,
    /// Measurement protocol switches
    pub protocol: ProtocolParameters,
}

impl LabParameters {
    /// Load from the default path, or use defaults if the file is absent
    pub fn load_or_default() -> Self {
        Self::load_from_path(DEFAULT_PARAMETERS_PATH)
    }

    /// Load from a specific JSON file, falling back to defaults
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        match std::fs::read_to_string(path.as_ref()) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(params) => {
                    log::info!("Loaded lab parameters from {:?}", path.as_ref());
                    params
                }
                Err(e) => {
                    log::warn!("Failed to parse lab parameters: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Lab parameters file not found, using defaults");
                Self::default()
            }
        }
    }
}

/// Text each input field starts with, and returns to on reset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputDefaults {
    /// Voltage field (V)
    pub voltage: String,
    /// Lamp resistance field (Ω)
    pub lamp_resistance: String,
    /// Resistor resistance field (Ω)
    pub resistor_resistance: String,
}

impl Default for InputDefaults {
    fn default() -> Self {
        Self {
            voltage: "0".to_string(),
            lamp_resistance: "0".to_string(),
            resistor_resistance: "0".to_string(),
        }
    }
}

/// Where exported files go and what they are called
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportParameters {
    /// Directory handed to the save target
    pub directory: PathBuf,
    /// Tabular export file name
    pub csv_file_name: String,
    /// Chart snapshot file name
    pub chart_file_name: String,
    /// Session JSON file name
    pub json_file_name: String,
}

impl Default for ExportParameters {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("exports"),
            csv_file_name: "ohms_law_data.csv".to_string(),
            chart_file_name: "ohms_law_chart.png".to_string(),
            json_file_name: "ohms_law_session.json".to_string(),
        }
    }
}

/// Chart surface layout and colours
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartParameters {
    /// Surface width (px)
    pub width_px: u32,
    /// Surface height (px)
    pub height_px: u32,
    /// Blank border around the plot area (px)
    pub margin_px: u32,
    /// Data point marker radius (px)
    pub marker_radius_px: i32,
    /// Interpolated samples between two data points on the smoothed curve
    pub curve_samples: u32,
    /// Horizontal and vertical grid divisions
    pub grid_divisions: u32,
    pub background_rgb: [u8; 3],
    pub grid_rgb: [u8; 3],
    pub axis_rgb: [u8; 3],
    pub line_rgb: [u8; 3],
    pub marker_rgb: [u8; 3],
}

impl Default for ChartParameters {
    fn default() -> Self {
        Self {
            width_px: 640,
            height_px: 360,
            margin_px: 32,
            marker_radius_px: 6,
            curve_samples: 16,
            grid_divisions: 5,
            // White card, blue line, orange markers
            background_rgb: [255, 255, 255],
            grid_rgb: [225, 228, 232],
            axis_rgb: [44, 62, 80],
            line_rgb: [0, 0, 255],
            marker_rgb: [255, 167, 38],
        }
    }
}

/// Measurement protocol switches
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtocolParameters {
    /// Reject any previously recorded voltage, not only the last one
    pub strict_distinct_voltages: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_export_names() {
        let params = ExportParameters::default();
        assert_eq!(params.csv_file_name, "ohms_law_data.csv");
        assert_eq!(params.chart_file_name, "ohms_law_chart.png");
    }

    #[test]
    fn test_default_inputs_are_zero() {
        let params = InputDefaults::default();
        assert_eq!(params.voltage, "0");
        assert_eq!(params.lamp_resistance, "0");
        assert_eq!(params.resistor_resistance, "0");
    }

    #[test]
    fn test_serialization() {
        let params = LabParameters::default();
        let json = serde_json::to_string_pretty(&params).unwrap();
        let parsed: LabParameters = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, params);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let parsed: LabParameters =
            serde_json::from_str(r#"{ "protocol": { "strict_distinct_voltages": true } }"#).unwrap();
        assert!(parsed.protocol.strict_distinct_voltages);
        assert_eq!(parsed.chart, ChartParameters::default());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let params = LabParameters::load_from_path("definitely/not/here.json");
        assert_eq!(params, LabParameters::default());
    }
}
