//! Complex impedance with an explicit open-circuit sentinel.

use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use num_complex::Complex64;

use super::Component;
use crate::circuit::{Branch, Frequency};

/// The impedance of an element or a series branch.
///
/// `Open` marks infinite impedance. It absorbs every addition, so a series
/// branch containing one open element is itself open; no IEEE infinities are
/// ever produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Impedance {
    /// Finite complex impedance in ohms
    Finite(Complex64),
    /// Open circuit (infinite impedance)
    Open,
}

impl Impedance {
    /// Zero impedance (an empty branch or a short).
    pub const ZERO: Impedance = Impedance::Finite(Complex64::new(0.0, 0.0));

    /// Check whether this is the open-circuit sentinel.
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open)
    }

    /// The finite value, or `None` for an open circuit.
    pub fn finite(&self) -> Option<Complex64> {
        match self {
            Self::Finite(z) => Some(*z),
            Self::Open => None,
        }
    }
}

impl Default for Impedance {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<Complex64> for Impedance {
    fn from(z: Complex64) -> Self {
        Self::Finite(z)
    }
}

impl Add for Impedance {
    type Output = Impedance;

    fn add(self, rhs: Impedance) -> Impedance {
        match (self, rhs) {
            (Self::Finite(a), Self::Finite(b)) => Self::Finite(a + b),
            _ => Self::Open,
        }
    }
}

impl Sum for Impedance {
    fn sum<I: Iterator<Item = Impedance>>(iter: I) -> Impedance {
        iter.fold(Impedance::ZERO, |acc, z| acc + z)
    }
}

impl fmt::Display for Impedance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finite(z) => write!(f, "{}", z),
            Self::Open => write!(f, "open"),
        }
    }
}

/// Series impedance of an ordered list of components.
///
/// Components are accumulated in order, so rounding is reproducible.
pub fn branch_impedance(components: &[Component], frequency: Frequency) -> Impedance {
    components.iter().map(|c| c.impedance(frequency)).sum()
}

/// Impedance of every branch, in input order.
pub fn compute_branch_impedances(branches: &[Branch], frequency: Frequency) -> Vec<Impedance> {
    let impedances: Vec<Impedance> = branches
        .iter()
        .map(|b| branch_impedance(&b.components, frequency))
        .collect();
    tracing::debug!(
        branches = impedances.len(),
        open = impedances.iter().filter(|z| z.is_open()).count(),
        "computed branch impedances"
    );
    impedances
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn freq() -> Frequency {
        Frequency::from_omega(2.0).unwrap()
    }

    #[test]
    fn test_branch_is_additive() {
        let r = Component::resistor(3.0).unwrap();
        let l = Component::inductor(1.0).unwrap();
        let z = branch_impedance(&[r, l], freq()).finite().unwrap();
        let zr = r.impedance(freq()).finite().unwrap();
        let zl = l.impedance(freq()).finite().unwrap();
        assert_eq!(z, zr + zl);
        assert_relative_eq!(z.re, 3.0);
        assert_relative_eq!(z.im, 2.0, max_relative = 1e-12);
    }

    #[test]
    fn test_empty_branch_is_short() {
        assert_eq!(branch_impedance(&[], freq()), Impedance::ZERO);
    }

    #[test]
    fn test_open_element_opens_branch() {
        let comps = [
            Component::resistor(1.0).unwrap(),
            Component::capacitor(0.0).unwrap(),
            Component::inductor(1.0).unwrap(),
        ];
        assert!(branch_impedance(&comps, freq()).is_open());
    }

    #[test]
    fn test_open_absorbs_addition() {
        let z = Impedance::Finite(Complex64::new(1.0, 1.0));
        assert_eq!(z + Impedance::Open, Impedance::Open);
        assert_eq!(Impedance::Open + z, Impedance::Open);
        assert_eq!(Impedance::Open.finite(), None);
    }

    #[test]
    fn test_compute_branch_impedances_keeps_order() {
        let branches = vec![
            Branch::new("B0", vec![Component::resistor(4.0).unwrap()]),
            Branch::new("B1", vec![Component::capacitor(0.25).unwrap()]),
            Branch::new("B2", vec![Component::capacitor(0.0).unwrap()]),
        ];
        let z = compute_branch_impedances(&branches, freq());
        assert_eq!(z.len(), 3);
        assert_eq!(z[0], Impedance::Finite(Complex64::new(4.0, 0.0)));
        let z1 = z[1].finite().unwrap();
        assert_relative_eq!(z1.im, -2.0, max_relative = 1e-12);
        assert!(z[2].is_open());
    }
}
