//! Component models for AC circuit analysis.
//!
//! This module provides:
//! - Linear elements: Resistor, Inductor, Capacitor
//! - The [`Impedance`] type with its open-circuit sentinel
//! - Series branch aggregation
//! - Voltage and current sources
//!
//! Every element reduces to a complex impedance at the drive frequency.

mod impedance;
mod linear;
mod sources;

pub use impedance::{branch_impedance, compute_branch_impedances, Impedance};
pub use linear::{capacitor_impedance, inductor_impedance, resistor_impedance};
pub use sources::{Source, SourceKind};

use std::fmt;

use crate::circuit::Frequency;
use crate::error::{AcMeshError, Result};

/// Kind of a passive circuit element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    /// Resistor (ohms)
    Resistor,
    /// Inductor (henries)
    Inductor,
    /// Capacitor (farads)
    Capacitor,
}

impl ComponentKind {
    /// Parse a component kind from its DSL keyword (`R`, `L`, `C`).
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.to_ascii_uppercase().as_str() {
            "R" => Some(Self::Resistor),
            "L" => Some(Self::Inductor),
            "C" => Some(Self::Capacitor),
            _ => None,
        }
    }

    /// Lowercase name used in messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Resistor => "resistor",
            Self::Inductor => "inductor",
            Self::Capacitor => "capacitor",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A passive element: a kind tag and a non-negative value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Component {
    kind: ComponentKind,
    value: f64,
}

impl Component {
    /// Create a component, rejecting negative or non-finite values.
    pub fn new(kind: ComponentKind, value: f64) -> Result<Self> {
        if !value.is_finite() || value < 0.0 {
            return Err(AcMeshError::InvalidValue {
                kind: kind.name(),
                value,
            });
        }
        Ok(Self { kind, value })
    }

    /// Create a resistor (ohms).
    pub fn resistor(resistance: f64) -> Result<Self> {
        Self::new(ComponentKind::Resistor, resistance)
    }

    /// Create an inductor (henries).
    pub fn inductor(inductance: f64) -> Result<Self> {
        Self::new(ComponentKind::Inductor, inductance)
    }

    /// Create a capacitor (farads). Zero capacitance is an open circuit.
    pub fn capacitor(capacitance: f64) -> Result<Self> {
        Self::new(ComponentKind::Capacitor, capacitance)
    }

    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Impedance of this element at the drive frequency.
    pub fn impedance(&self, frequency: Frequency) -> Impedance {
        match self.kind {
            ComponentKind::Resistor => Impedance::Finite(resistor_impedance(self.value)),
            ComponentKind::Inductor => {
                Impedance::Finite(inductor_impedance(self.value, frequency))
            }
            ComponentKind::Capacitor => capacitor_impedance(self.value, frequency),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_keyword() {
        assert_eq!(ComponentKind::from_keyword("r"), Some(ComponentKind::Resistor));
        assert_eq!(ComponentKind::from_keyword("L"), Some(ComponentKind::Inductor));
        assert_eq!(ComponentKind::from_keyword("C"), Some(ComponentKind::Capacitor));
        assert_eq!(ComponentKind::from_keyword("Q"), None);
    }

    #[test]
    fn test_rejects_negative_values() {
        assert!(matches!(
            Component::resistor(-1.0),
            Err(AcMeshError::InvalidValue { kind: "resistor", .. })
        ));
        assert!(Component::inductor(f64::NAN).is_err());
        let open = Component::capacitor(0.0).unwrap();
        assert_eq!(open.kind(), ComponentKind::Capacitor);
        assert_eq!(open.value(), 0.0);
    }
}
