//! Raw text inputs and their conversion to numbers.

use crate::error::{Quantity, ValidationError};

/// Parse a numeric text field.
///
/// Empty text reads as `0`, which the protocol then rejects as non-positive.
/// Text that is not a finite decimal is reported as [`ValidationError::NotANumber`]
/// so that garbage and an explicit `0` stay distinguishable.
pub fn parse_quantity(quantity: Quantity, text: &str) -> Result<f64, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }

    // Rust accepts "inf" and "NaN"; the lab does not.
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ValidationError::NotANumber {
            quantity,
            text: text.to_string(),
        }),
    }
}

/// Lenient parse used for the live preview: anything unparsable counts as `0`.
pub fn parse_or_zero(text: &str) -> f64 {
    parse_quantity(Quantity::Voltage, text).unwrap_or(0.0)
}

/// The three text fields the user edits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputPanel {
    /// Lamp resistance text (Ω)
    pub lamp: String,
    /// Resistor resistance text (Ω)
    pub resistor: String,
    /// Voltage text (V)
    pub voltage: String,
}

impl InputPanel {
    pub fn new(lamp: &str, resistor: &str, voltage: &str) -> Self {
        Self {
            lamp: lamp.to_string(),
            resistor: resistor.to_string(),
            voltage: voltage.to_string(),
        }
    }

    /// Strictly parse lamp and resistor texts
    pub fn resistances(&self) -> Result<(f64, f64), ValidationError> {
        let lamp = parse_quantity(Quantity::LampResistance, &self.lamp)?;
        let resistor = parse_quantity(Quantity::ResistorResistance, &self.resistor)?;
        Ok((lamp, resistor))
    }

    /// Strictly parse the voltage text
    pub fn voltage(&self) -> Result<f64, ValidationError> {
        parse_quantity(Quantity::Voltage, &self.voltage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_numbers() {
        assert_eq!(parse_quantity(Quantity::Voltage, "5").unwrap(), 5.0);
        assert_eq!(parse_quantity(Quantity::Voltage, " 2.5 ").unwrap(), 2.5);
        assert_eq!(parse_quantity(Quantity::Voltage, "-3").unwrap(), -3.0);
        assert_eq!(parse_quantity(Quantity::Voltage, "1e3").unwrap(), 1000.0);
    }

    #[test]
    fn test_empty_reads_as_zero() {
        assert_eq!(parse_quantity(Quantity::Voltage, "").unwrap(), 0.0);
        assert_eq!(parse_quantity(Quantity::Voltage, "   ").unwrap(), 0.0);
    }

    #[test]
    fn test_garbage_is_not_a_number() {
        for text in ["abc", "5V", "NaN", "inf", "-infinity", "1,5"] {
            let err = parse_quantity(Quantity::LampResistance, text).unwrap_err();
            assert!(
                matches!(err, ValidationError::NotANumber { quantity: Quantity::LampResistance, .. }),
                "expected NotANumber for {:?}, got {:?}",
                text,
                err
            );
        }
    }

    #[test]
    fn test_preview_parse_is_lenient() {
        assert_eq!(parse_or_zero("abc"), 0.0);
        assert_eq!(parse_or_zero("7"), 7.0);
    }

    #[test]
    fn test_panel_reports_offending_field() {
        let panel = InputPanel::new("10", "ten", "5");
        let err = panel.resistances().unwrap_err();
        assert!(matches!(
            err,
            ValidationError::NotANumber { quantity: Quantity::ResistorResistance, .. }
        ));
        assert_eq!(panel.voltage().unwrap(), 5.0);
    }
}
