//! Export pipeline for the measurement series.
//!
//! Provides CSV table export, chart snapshot capture, and JSON session export.
//! Each encoder reads one immutable [`SeriesSnapshot`](crate::state::SeriesSnapshot)
//! and produces a complete [`ExportArtifact`] that is then handed to a
//! [`ShareTarget`].

mod chart;
mod csv_export;
mod json_export;
mod screenshot;
mod share;

use std::fmt;

pub use chart::{render_chart, smooth_curve, ChartSurface, Viewport};
pub use csv_export::{encode_table, export_table, TableRecord};
pub use json_export::{encode_session, export_session, SessionExport, SESSION_FORMAT_VERSION};
pub use screenshot::{capture_chart, encode_png, export_chart};
pub use share::{DirectoryTarget, MemoryTarget, ShareTarget};

/// Export format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Table,
    Chart,
    Json,
}

impl ExportKind {
    pub fn media_type(&self) -> &'static str {
        match self {
            ExportKind::Table => "text/csv",
            ExportKind::Chart => "image/png",
            ExportKind::Json => "application/json",
        }
    }
}

impl fmt::Display for ExportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportKind::Table => f.write_str("CSV"),
            ExportKind::Chart => f.write_str("Chart"),
            ExportKind::Json => f.write_str("JSON"),
        }
    }
}

/// A finished, fully encoded export blob
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub kind: ExportKind,
    /// Conventional file name for the save target
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ExportArtifact {
    pub fn new(kind: ExportKind, file_name: &str, bytes: Vec<u8>) -> Self {
        Self {
            kind,
            file_name: file_name.to_string(),
            bytes,
        }
    }

    pub fn media_type(&self) -> &'static str {
        self.kind.media_type()
    }
}
