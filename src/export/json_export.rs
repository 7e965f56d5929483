//! JSON export of a session snapshot.

use chrono::Local;
use serde::Serialize;

use crate::circuit::{ResistancePair, Topology};
use crate::error::ExportError;
use crate::state::{MeasurementPoint, SeriesSnapshot};

use super::{ExportArtifact, ExportKind};

/// Format version written into every export
pub const SESSION_FORMAT_VERSION: &str = "1.0.0";

/// Full session export structure
#[derive(Debug, Clone, Serialize)]
pub struct SessionExport<'a> {
    /// Export timestamp (RFC 3339)
    pub exported_at: String,
    /// Export version for compatibility
    pub version: &'static str,
    /// Circuit arrangement
    pub topology: Topology,
    /// Resistances the series was recorded against
    pub resistances: ResistancePair,
    /// Recorded points in order
    pub points: &'a [MeasurementPoint],
}

/// Serialize the snapshot to pretty JSON
pub fn encode_session(snapshot: &SeriesSnapshot) -> Result<Vec<u8>, ExportError> {
    let first = snapshot.points().first().ok_or(ExportError::EmptySeries)?;

    let export = SessionExport {
        exported_at: Local::now().to_rfc3339(),
        version: SESSION_FORMAT_VERSION,
        topology: snapshot.topology(),
        resistances: first.resistances(),
        points: snapshot.points(),
    };

    Ok(serde_json::to_vec_pretty(&export)?)
}

/// Encode the snapshot and wrap it for hand-off
pub fn export_session(snapshot: &SeriesSnapshot, file_name: &str) -> Result<ExportArtifact, ExportError> {
    let bytes = encode_session(snapshot)?;
    Ok(ExportArtifact::new(ExportKind::Json, file_name, bytes))
}
