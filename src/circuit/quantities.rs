//! Quantity calculator: total resistance and current.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Arrangement of the lamp and the resistor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topology {
    /// R = R1 + R2
    #[default]
    Series,
    /// 1/R = 1/R1 + 1/R2
    Parallel,
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Topology::Series => f.write_str("series"),
            Topology::Parallel => f.write_str("parallel"),
        }
    }
}

impl FromStr for Topology {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "series" | "serial" => Ok(Topology::Series),
            "parallel" => Ok(Topology::Parallel),
            other => Err(ValidationError::UnknownTopology(other.to_string())),
        }
    }
}

/// Lamp and resistor resistances (Ω)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ResistancePair {
    /// Lamp resistance (Ω)
    pub lamp_ohm: f64,
    /// Resistor resistance (Ω)
    pub resistor_ohm: f64,
}

impl ResistancePair {
    pub fn new(lamp_ohm: f64, resistor_ohm: f64) -> Self {
        Self {
            lamp_ohm,
            resistor_ohm,
        }
    }

    /// Both elements strictly positive
    pub fn is_positive(&self) -> bool {
        self.lamp_ohm > 0.0 && self.resistor_ohm > 0.0
    }

    /// Combined resistance for the given topology (Ω)
    pub fn total(&self, topology: Topology) -> f64 {
        total_resistance(topology, self.lamp_ohm, self.resistor_ohm)
    }
}

/// Total resistance of two elements (Ω).
///
/// A parallel pair whose resistances sum to zero yields `0` rather than NaN.
pub fn total_resistance(topology: Topology, r1_ohm: f64, r2_ohm: f64) -> f64 {
    match topology {
        Topology::Series => r1_ohm + r2_ohm,
        Topology::Parallel => {
            let sum = r1_ohm + r2_ohm;
            if sum == 0.0 {
                0.0
            } else {
                (r1_ohm * r2_ohm) / sum
            }
        }
    }
}

/// Current through the circuit (A); `0` when there is no positive resistance.
pub fn current(voltage_v: f64, total_resistance_ohm: f64) -> f64 {
    if total_resistance_ohm > 0.0 {
        voltage_v / total_resistance_ohm
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_series_total() {
        assert_eq!(total_resistance(Topology::Series, 10.0, 10.0), 20.0);
        assert_eq!(total_resistance(Topology::Series, 4.7, 0.3), 5.0);
    }

    #[test]
    fn test_parallel_total() {
        assert_eq!(total_resistance(Topology::Parallel, 10.0, 10.0), 5.0);
        assert!((total_resistance(Topology::Parallel, 6.0, 3.0) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_parallel_zero_pair_is_zero() {
        let r = total_resistance(Topology::Parallel, 0.0, 0.0);
        assert_eq!(r, 0.0);
        assert!(!r.is_nan());
    }

    #[test]
    fn test_current_without_resistance_is_zero() {
        assert_eq!(current(5.0, 0.0), 0.0);
        assert_eq!(current(-3.0, -1.0), 0.0);
        assert_eq!(current(5.0, 20.0), 0.25);
    }

    #[test]
    fn test_topology_parsing() {
        assert_eq!("Series".parse::<Topology>().unwrap(), Topology::Series);
        assert_eq!("serial".parse::<Topology>().unwrap(), Topology::Series);
        assert_eq!(" parallel ".parse::<Topology>().unwrap(), Topology::Parallel);
        assert!(matches!(
            "delta".parse::<Topology>(),
            Err(ValidationError::UnknownTopology(_))
        ));
    }

    #[test]
    fn test_pair_total_matches_free_function() {
        let pair = ResistancePair::new(12.0, 4.0);
        assert_eq!(pair.total(Topology::Series), 16.0);
        assert_eq!(pair.total(Topology::Parallel), 3.0);
        assert!(pair.is_positive());
        assert!(!ResistancePair::default().is_positive());
    }

    proptest! {
        #[test]
        fn prop_series_is_sum(r1 in 1e-3f64..1e6, r2 in 1e-3f64..1e6) {
            prop_assert_eq!(total_resistance(Topology::Series, r1, r2), r1 + r2);
        }

        #[test]
        fn prop_parallel_is_product_over_sum(r1 in 1e-3f64..1e6, r2 in 1e-3f64..1e6) {
            prop_assert_eq!(
                total_resistance(Topology::Parallel, r1, r2),
                (r1 * r2) / (r1 + r2)
            );
        }

        #[test]
        fn prop_parallel_below_smallest_element(r1 in 1e-3f64..1e6, r2 in 1e-3f64..1e6) {
            let total = total_resistance(Topology::Parallel, r1, r2);
            prop_assert!(total <= r1.min(r2) * (1.0 + 1e-12));
        }

        #[test]
        fn prop_current_on_zero_resistance(v in -1e6f64..1e6) {
            prop_assert_eq!(current(v, 0.0), 0.0);
        }
    }
}
