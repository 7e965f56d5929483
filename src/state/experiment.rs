//! Lock-then-vary experiment protocol.
//!
//! The first accepted measurement freezes the lamp and resistor values; from
//! then on only the voltage may vary. Resetting or switching topology discards
//! the series and unlocks the resistances again.
//!
//! Every transition validates completely before it touches any field, so a
//! rejected command leaves the experiment exactly as it was.

use serde::Serialize;

use crate::circuit::{current, ResistancePair, Topology};
use crate::error::{Quantity, ValidationError};

use super::measurement::MeasurementPoint;
use super::series::{SeriesSnapshot, SeriesStore};

/// Whether the resistances can still be edited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperimentState {
    /// Resistances editable; no point recorded yet
    Unlocked,
    /// Resistances frozen by at least one recorded point
    Locked,
}

/// Derived quantities for the current inputs, not recorded
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preview {
    /// Total resistance (Ω)
    pub total_resistance_ohm: f64,
    /// Current (A)
    pub current_a: f64,
}

/// One experiment run: topology, resistances and the recorded series
#[derive(Debug, Clone)]
pub struct Experiment {
    topology: Topology,
    resistances: ResistancePair,
    series: SeriesStore,
    /// Reject a voltage that matches any recorded point, not just the last
    strict_distinct_voltages: bool,
}

impl Default for Experiment {
    fn default() -> Self {
        Self::new(Topology::default())
    }
}

impl Experiment {
    /// Create an unlocked experiment with zero resistances
    pub fn new(topology: Topology) -> Self {
        Self {
            topology,
            resistances: ResistancePair::default(),
            series: SeriesStore::new(),
            strict_distinct_voltages: false,
        }
    }

    /// Enable the full-series voltage uniqueness check
    pub fn with_strict_distinct_voltages(mut self, strict: bool) -> Self {
        self.strict_distinct_voltages = strict;
        self
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// Resistances in force (frozen values while locked)
    pub fn resistances(&self) -> ResistancePair {
        self.resistances
    }

    pub fn state(&self) -> ExperimentState {
        if self.series.is_empty() {
            ExperimentState::Unlocked
        } else {
            ExperimentState::Locked
        }
    }

    pub fn is_locked(&self) -> bool {
        self.state() == ExperimentState::Locked
    }

    pub fn series(&self) -> &SeriesStore {
        &self.series
    }

    /// Immutable copy of the series for exporters
    pub fn snapshot(&self) -> SeriesSnapshot {
        self.series.snapshot(self.topology)
    }

    /// Select a topology. Always discards the run and unlocks.
    pub fn set_topology(&mut self, topology: Topology) {
        let discarded = self.series.len();
        self.topology = topology;
        self.resistances = ResistancePair::default();
        self.series.clear();
        log::info!(
            "Topology set to {} ({} recorded points discarded)",
            topology,
            discarded
        );
    }

    /// Replace both resistances. Rejected while locked.
    pub fn set_resistances(&mut self, pair: ResistancePair) -> Result<(), ValidationError> {
        if self.is_locked() {
            return Err(ValidationError::ResistancesLocked);
        }
        self.resistances = pair;
        Ok(())
    }

    /// Replace the lamp resistance. Rejected while locked.
    pub fn set_lamp_resistance(&mut self, lamp_ohm: f64) -> Result<(), ValidationError> {
        self.set_resistances(ResistancePair::new(lamp_ohm, self.resistances.resistor_ohm))
    }

    /// Replace the resistor resistance. Rejected while locked.
    pub fn set_resistor_resistance(&mut self, resistor_ohm: f64) -> Result<(), ValidationError> {
        self.set_resistances(ResistancePair::new(self.resistances.lamp_ohm, resistor_ohm))
    }

    /// Quantities the circuit would show at `voltage_v` right now
    pub fn preview(&self, voltage_v: f64) -> Preview {
        let total_resistance_ohm = self.resistances.total(self.topology);
        Preview {
            total_resistance_ohm,
            current_a: current(voltage_v, total_resistance_ohm),
        }
    }

    /// Build the point a commit at `voltage_v` would record, without recording it.
    pub fn validate(&self, voltage_v: f64) -> Result<MeasurementPoint, ValidationError> {
        require_positive(Quantity::Voltage, voltage_v)?;

        if !self.is_locked() {
            require_positive(Quantity::LampResistance, self.resistances.lamp_ohm)?;
            require_positive(Quantity::ResistorResistance, self.resistances.resistor_ohm)?;
        }

        let duplicate = if self.strict_distinct_voltages {
            self.series.contains_voltage(voltage_v)
        } else {
            self.series.last().is_some_and(|p| p.voltage_v() == voltage_v)
        };
        if duplicate {
            return Err(ValidationError::DuplicateVoltage { voltage_v });
        }

        let point = MeasurementPoint::derive(self.topology, self.resistances, voltage_v);
        if !point.total_resistance_ohm().is_finite() {
            return Err(ValidationError::NonFinite {
                quantity: Quantity::TotalResistance,
                value: point.total_resistance_ohm(),
            });
        }
        if !point.current_a().is_finite() {
            return Err(ValidationError::NonFinite {
                quantity: Quantity::Current,
                value: point.current_a(),
            });
        }
        Ok(point)
    }

    /// Record a measurement at `voltage_v`, locking the resistances on the first one.
    pub fn commit(&mut self, voltage_v: f64) -> Result<MeasurementPoint, ValidationError> {
        let point = self.validate(voltage_v)?;

        if !self.is_locked() {
            log::info!(
                "Resistances locked: lamp={} Ω, resistor={} Ω ({})",
                self.resistances.lamp_ohm,
                self.resistances.resistor_ohm,
                self.topology
            );
        }
        self.series.append(point);

        log::info!(
            "Measurement {} recorded: V={} V, I={:.4} A, R={:.4} Ω",
            self.series.len(),
            point.voltage_v(),
            point.current_a(),
            point.total_resistance_ohm()
        );
        Ok(point)
    }

    /// Discard the series and unlock. Topology is kept.
    pub fn reset(&mut self) {
        self.series.clear();
        self.resistances = ResistancePair::default();
        log::info!("Experiment reset ({})", self.topology);
    }
}

fn require_positive(quantity: Quantity, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFinite { quantity, value });
    }
    if value <= 0.0 {
        return Err(ValidationError::NonPositive { quantity, value });
    }
    Ok(())
}
