//! Recorded measurement points.

use serde::Serialize;

use crate::circuit::{current, ResistancePair, Topology};

/// One frozen observation of the circuit.
///
/// Fields are private: a point is built only by the experiment when a commit
/// is accepted, and never changes afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MeasurementPoint {
    /// Applied voltage (V)
    voltage_v: f64,
    /// Current through the circuit (A)
    current_a: f64,
    /// Lamp resistance at recording time (Ω)
    lamp_resistance_ohm: f64,
    /// Resistor resistance at recording time (Ω)
    resistor_resistance_ohm: f64,
    /// Total resistance at recording time (Ω)
    total_resistance_ohm: f64,
}

impl MeasurementPoint {
    /// Derive a point from a voltage and the resistances in force right now.
    pub(crate) fn derive(topology: Topology, pair: ResistancePair, voltage_v: f64) -> Self {
        let total_resistance_ohm = pair.total(topology);
        Self {
            voltage_v,
            current_a: current(voltage_v, total_resistance_ohm),
            lamp_resistance_ohm: pair.lamp_ohm,
            resistor_resistance_ohm: pair.resistor_ohm,
            total_resistance_ohm,
        }
    }

    pub fn voltage_v(&self) -> f64 {
        self.voltage_v
    }

    pub fn current_a(&self) -> f64 {
        self.current_a
    }

    pub fn lamp_resistance_ohm(&self) -> f64 {
        self.lamp_resistance_ohm
    }

    pub fn resistor_resistance_ohm(&self) -> f64 {
        self.resistor_resistance_ohm
    }

    pub fn total_resistance_ohm(&self) -> f64 {
        self.total_resistance_ohm
    }

    /// Resistances this point was recorded against
    pub fn resistances(&self) -> ResistancePair {
        ResistancePair::new(self.lamp_resistance_ohm, self.resistor_resistance_ohm)
    }

    /// Every field finite and non-negative
    pub fn is_well_formed(&self) -> bool {
        [
            self.voltage_v,
            self.current_a,
            self.lamp_resistance_ohm,
            self.resistor_resistance_ohm,
            self.total_resistance_ohm,
        ]
        .iter()
        .all(|v| v.is_finite() && *v >= 0.0)
    }
}

/// Format a value the way the user typed it: shortest decimal, no forced digits.
pub fn format_as_entered(value: f64) -> String {
    format!("{}", value)
}

/// Format a derived value with exactly two fractional digits.
pub fn format_fixed2(value: f64) -> String {
    format!("{:.2}", value)
}
