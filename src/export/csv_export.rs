//! CSV export of the measurement series.

use serde::Serialize;

use crate::error::ExportError;
use crate::state::{format_as_entered, format_fixed2, MeasurementPoint, SeriesSnapshot};

use super::{ExportArtifact, ExportKind};

/// One CSV row. Field names double as the header row.
#[derive(Debug, Clone, Serialize)]
pub struct TableRecord {
    /// Lamp resistance, as entered
    #[serde(rename = "RL (Ω)")]
    pub lamp_resistance: String,
    /// Resistor resistance, as entered
    #[serde(rename = "RR (Ω)")]
    pub resistor_resistance: String,
    /// Total resistance, two decimals
    #[serde(rename = "Total R (Ω)")]
    pub total_resistance: String,
    /// Voltage, as entered
    #[serde(rename = "Voltage (V)")]
    pub voltage: String,
    /// Current, two decimals
    #[serde(rename = "Current (A)")]
    pub current: String,
}

impl From<&MeasurementPoint> for TableRecord {
    fn from(p: &MeasurementPoint) -> Self {
        Self {
            lamp_resistance: format_as_entered(p.lamp_resistance_ohm()),
            resistor_resistance: format_as_entered(p.resistor_resistance_ohm()),
            total_resistance: format_fixed2(p.total_resistance_ohm()),
            voltage: format_as_entered(p.voltage_v()),
            current: format_fixed2(p.current_a()),
        }
    }
}

/// Encode the snapshot as CSV text.
///
/// An empty series is an error, never an empty file.
pub fn encode_table(snapshot: &SeriesSnapshot) -> Result<Vec<u8>, ExportError> {
    if snapshot.is_empty() {
        return Err(ExportError::EmptySeries);
    }

    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    for point in snapshot.points() {
        writer.serialize(TableRecord::from(point))?;
    }

    writer
        .into_inner()
        .map_err(|e| ExportError::Encode(e.to_string()))
}

/// Encode the snapshot and wrap it for hand-off
pub fn export_table(snapshot: &SeriesSnapshot, file_name: &str) -> Result<ExportArtifact, ExportError> {
    let bytes = encode_table(snapshot)?;
    log::debug!("CSV encoded: {} rows, {} bytes", snapshot.len(), bytes.len());
    Ok(ExportArtifact::new(ExportKind::Table, file_name, bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::{ResistancePair, Topology};
    use crate::state::Experiment;

    #[test]
    fn test_empty_series_is_rejected() {
        let exp = Experiment::new(Topology::Series);
        assert!(matches!(encode_table(&exp.snapshot()), Err(ExportError::EmptySeries)));
    }

    #[test]
    fn test_header_and_rows() {
        let mut exp = Experiment::new(Topology::Series);
        exp.set_resistances(ResistancePair::new(10.0, 2.5)).unwrap();
        exp.commit(5.0).unwrap();

        let text = String::from_utf8(encode_table(&exp.snapshot()).unwrap()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "RL (Ω),RR (Ω),Total R (Ω),Voltage (V),Current (A)");
        assert_eq!(lines[1], "10,2.5,12.50,5,0.40");
        assert!(text.ends_with('\n'));
        assert!(!text.contains('\r'));
    }
}
