//! View model for whatever front end displays the lab.
//!
//! Aggregates the input texts, the live preview and the recorded table into
//! one structure that a screen, a terminal or a test can render without
//! reaching into the experiment.

use std::fmt;

use serde::Serialize;

use crate::circuit::Topology;

use super::experiment::ExperimentState;
use super::measurement::{format_as_entered, format_fixed2, MeasurementPoint};

/// One row of the measurement table, formatted for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    /// Lamp resistance (Ω), as entered
    pub lamp_resistance: String,
    /// Resistor resistance (Ω), as entered
    pub resistor_resistance: String,
    /// Total resistance (Ω), two decimals
    pub total_resistance: String,
    /// Voltage (V), as entered
    pub voltage: String,
    /// Current (A), two decimals
    pub current: String,
}

impl From<&MeasurementPoint> for TableRow {
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

/// Everything a front end needs to draw the lab
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabView {
    // === Circuit ===
    pub topology: Topology,
    pub state: ExperimentState,
    /// False once a point has been recorded
    pub resistances_editable: bool,

    // === Inputs ===
    pub lamp_text: String,
    pub resistor_text: String,
    pub voltage_text: String,

    // === Preview (not recorded) ===
    /// Total resistance (Ω)
    pub total_resistance_ohm: f64,
    /// Current at the typed voltage (A)
    pub current_a: f64,

    // === Recorded ===
    pub rows: Vec<TableRow>,
    /// Chart surface has a frame to capture
    pub chart_ready: bool,
}

impl LabView {
    /// e.g. `20.00 Ω`
    pub fn total_resistance_display(&self) -> String {
        format!("{} Ω", format_fixed2(self.total_resistance_ohm))
    }

    /// e.g. `0.25 A`
    pub fn current_display(&self) -> String {
        format!("{} A", format_fixed2(self.current_a))
    }
}

impl fmt::Display for LabView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lock = match self.state {
            ExperimentState::Unlocked => "unlocked",
            ExperimentState::Locked => "locked",
        };
        writeln!(f, "Circuit: {} ({})", self.topology, lock)?;
        writeln!(f, "  Lamp resistance (Ω):     {}", self.lamp_text)?;
        writeln!(f, "  Resistor resistance (Ω): {}", self.resistor_text)?;
        writeln!(f, "  Voltage (V):             {}", self.voltage_text)?;
        writeln!(f, "Total resistance: {}", self.total_resistance_display())?;
        writeln!(f, "Current: {}", self.current_display())?;

        if self.rows.is_empty() {
            return writeln!(f, "No measurements recorded");
        }
        writeln!(
            f,
            "{:>8} {:>8} {:>11} {:>11} {:>11}",
            "RL (Ω)", "RR (Ω)", "Total R (Ω)", "Voltage (V)", "Current (A)"
        )?;
        for row in &self.rows {
            writeln!(
                f,
                "{:>8} {:>8} {:>11} {:>11} {:>11}",
                row.lamp_resistance, row.resistor_resistance, row.total_resistance, row.voltage, row.current
            )?;
        }
        Ok(())
    }
}
