//! Linear passive elements: Resistor, Inductor, Capacitor.
//!
//! At a fixed angular frequency ω = 2πf each element reduces to a complex
//! impedance:
//!
//! ```text
//! Z_R = R
//! Z_L = jωL
//! Z_C = 1 / (jωC) = -j / (ωC)
//! ```

use num_complex::Complex64;

use super::impedance::Impedance;
use crate::circuit::Frequency;

/// Impedance of a resistor: `R + 0j`.
pub fn resistor_impedance(resistance: f64) -> Complex64 {
    Complex64::new(resistance, 0.0)
}

/// Impedance of an inductor: `0 + j·2πfL`.
pub fn inductor_impedance(inductance: f64, frequency: Frequency) -> Complex64 {
    Complex64::new(0.0, frequency.omega() * inductance)
}

/// Impedance of a capacitor: `-j / (2πfC)`.
///
/// A zero capacitance is an open circuit and yields [`Impedance::Open`].
pub fn capacitor_impedance(capacitance: f64, frequency: Frequency) -> Impedance {
    if capacitance == 0.0 {
        return Impedance::Open;
    }
    Impedance::Finite(Complex64::new(0.0, -1.0 / (frequency.omega() * capacitance)))
}
