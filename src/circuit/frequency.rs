//! Drive frequency.
//!
//! Hz is the primitive representation; angular frequency is always derived
//! as `2π·f` and never stored.

use std::f64::consts::TAU;

use crate::error::{AcMeshError, Result};

/// Relative tolerance for agreement between the Hz and rad/s forms.
pub const FREQUENCY_TOLERANCE: f64 = 1e-9;

/// A validated, strictly positive drive frequency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frequency {
    hz: f64,
}

impl Frequency {
    /// Create a frequency from a value in Hz.
    pub fn from_hz(hz: f64) -> Result<Self> {
        if !hz.is_finite() || hz <= 0.0 {
            return Err(AcMeshError::InvalidFrequency {
                message: format!("{} Hz is not a finite positive frequency", hz),
            });
        }
        Ok(Self { hz })
    }

    /// Create a frequency from an angular frequency in rad/s.
    pub fn from_omega(omega: f64) -> Result<Self> {
        if !omega.is_finite() || omega <= 0.0 {
            return Err(AcMeshError::InvalidFrequency {
                message: format!("{} rad/s is not a finite positive frequency", omega),
            });
        }
        Self::from_hz(omega / TAU)
    }

    /// Resolve an externally supplied pair of optional Hz / rad/s values.
    ///
    /// At least one must be present. When both are, they must agree within
    /// [`FREQUENCY_TOLERANCE`] (relative) and the Hz value is kept.
    pub fn from_parts(hz: Option<f64>, omega: Option<f64>) -> Result<Self> {
        match (hz, omega) {
            (None, None) => Err(AcMeshError::MissingFrequency),
            (Some(hz), None) => Self::from_hz(hz),
            (None, Some(omega)) => Self::from_omega(omega),
            (Some(hz), Some(omega)) => {
                let from_hz = Self::from_hz(hz)?;
                let from_omega = Self::from_omega(omega)?;
                let scale = from_hz.hz.max(from_omega.hz);
                if (from_hz.hz - from_omega.hz).abs() > FREQUENCY_TOLERANCE * scale {
                    return Err(AcMeshError::InconsistentFrequency { hz, omega });
                }
                Ok(from_hz)
            }
        }
    }

    /// Frequency in Hz.
    pub fn hz(&self) -> f64 {
        self.hz
    }

    /// Angular frequency in rad/s.
    pub fn omega(&self) -> f64 {
        TAU * self.hz
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_hz_and_matching_omega() {
        let f = Frequency::from_parts(Some(60.0), Some(TAU * 60.0)).unwrap();
        assert_relative_eq!(f.hz(), 60.0);
        assert_relative_eq!(f.omega(), 376.99111843077515, max_relative = 1e-12);
    }

    #[test]
    fn test_inconsistent_frequency() {
        let err = Frequency::from_parts(Some(60.0), Some(100.0)).unwrap_err();
        assert!(matches!(err, AcMeshError::InconsistentFrequency { .. }));
    }

    #[test]
    fn test_one_over_pi_matches_two_rad_per_second() {
        let f = Frequency::from_parts(Some(1.0 / std::f64::consts::PI), Some(2.0)).unwrap();
        assert_relative_eq!(f.omega(), 2.0, max_relative = 1e-12);
    }

    #[test]
    fn test_omega_only() {
        let f = Frequency::from_parts(None, Some(TAU)).unwrap();
        assert_relative_eq!(f.hz(), 1.0);
    }

    #[test]
    fn test_missing_and_invalid() {
        assert!(matches!(
            Frequency::from_parts(None, None),
            Err(AcMeshError::MissingFrequency)
        ));
        assert!(Frequency::from_hz(0.0).is_err());
        assert!(Frequency::from_hz(-50.0).is_err());
        assert!(Frequency::from_omega(f64::INFINITY).is_err());
    }
}
