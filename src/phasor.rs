//! Conversion between rectangular and polar phasor forms.
//!
//! A phasor `m∠θ` is the complex number `m·(cos θ + j·sin θ)`. Angles are
//! accepted and reported in either degrees or radians; reported angles lie
//! in the principal range `(-180°, 180°]` / `(-π, π]`.

use std::fmt;
use std::str::FromStr;

use num_complex::Complex64;

use crate::error::{AcMeshError, Result};

/// Unit of a phasor angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AngleUnit {
    /// Degrees (default, as in `12∠30°`)
    #[default]
    Degrees,
    /// Radians
    Radians,
}

impl AngleUnit {
    /// Convert an angle in this unit to radians.
    pub fn to_radians(self, angle: f64) -> f64 {
        match self {
            Self::Degrees => angle.to_radians(),
            Self::Radians => angle,
        }
    }

    /// Convert an angle in radians to this unit.
    pub fn from_radians(self, radians: f64) -> f64 {
        match self {
            Self::Degrees => radians.to_degrees(),
            Self::Radians => radians,
        }
    }

    /// Display suffix used when rendering angles.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Degrees => "°",
            Self::Radians => " rad",
        }
    }
}

impl FromStr for AngleUnit {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "deg" | "degree" | "degrees" => Ok(Self::Degrees),
            "rad" | "radian" | "radians" => Ok(Self::Radians),
            other => Err(format!("unknown angle unit '{}' (expected deg or rad)", other)),
        }
    }
}

impl fmt::Display for AngleUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Degrees => write!(f, "deg"),
            Self::Radians => write!(f, "rad"),
        }
    }
}

/// Convert a polar phasor to rectangular form.
///
/// The magnitude must be finite and non-negative; the angle must be finite.
pub fn to_rect(magnitude: f64, angle: f64, unit: AngleUnit) -> Result<Complex64> {
    if !magnitude.is_finite() || magnitude < 0.0 {
        return Err(AcMeshError::InvalidPhasor {
            message: format!("magnitude {} must be finite and non-negative", magnitude),
        });
    }
    if !angle.is_finite() {
        return Err(AcMeshError::InvalidPhasor {
            message: format!("angle {} must be finite", angle),
        });
    }
    Ok(Complex64::from_polar(magnitude, unit.to_radians(angle)))
}

/// Convert a rectangular value to `(magnitude, angle)` in the requested unit.
pub fn to_polar(value: Complex64, unit: AngleUnit) -> (f64, f64) {
    let mut theta = value.im.atan2(value.re);
    // atan2 yields -π for (-x, -0.0); fold onto the closed upper end
    if theta <= -std::f64::consts::PI {
        theta = std::f64::consts::PI;
    }
    (value.norm(), unit.from_radians(theta))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_to_rect_degrees() {
        let z = to_rect(10.0, 30.0, AngleUnit::Degrees).unwrap();
        assert_relative_eq!(z.re, 8.660254037844386, epsilon = 1e-12);
        assert_relative_eq!(z.im, 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_to_rect_radians() {
        let z = to_rect(2.0, std::f64::consts::FRAC_PI_2, AngleUnit::Radians).unwrap();
        assert_abs_diff_eq!(z.re, 0.0, epsilon = 1e-12);
        assert_relative_eq!(z.im, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_to_rect_rejects_negative_magnitude() {
        assert!(matches!(
            to_rect(-1.0, 0.0, AngleUnit::Degrees),
            Err(AcMeshError::InvalidPhasor { .. })
        ));
        assert!(to_rect(1.0, f64::NAN, AngleUnit::Degrees).is_err());
    }

    #[test]
    fn test_to_polar_principal_range() {
        let (m, a) = to_polar(Complex64::new(-1.0, 0.0), AngleUnit::Degrees);
        assert_relative_eq!(m, 1.0);
        assert_relative_eq!(a, 180.0);

        let (_, a) = to_polar(Complex64::new(-1.0, -0.0), AngleUnit::Degrees);
        assert_relative_eq!(a, 180.0);

        let (m, a) = to_polar(Complex64::new(0.0, -4.0), AngleUnit::Radians);
        assert_relative_eq!(m, 4.0);
        assert_relative_eq!(a, -std::f64::consts::FRAC_PI_2);
    }

    #[test]
    fn test_polar_round_trip() {
        for &m in &[0.5, 3.0, 12.0, 1e3] {
            for &a in &[-179.0, -90.0, -10.0, 0.0, 10.0, 45.0, 135.0, 180.0] {
                let z = to_rect(m, a, AngleUnit::Degrees).unwrap();
                let (m2, a2) = to_polar(z, AngleUnit::Degrees);
                assert_relative_eq!(m2, m, max_relative = 1e-12);
                assert_abs_diff_eq!(a2, a, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_angle_unit_from_str() {
        assert_eq!("deg".parse::<AngleUnit>(), Ok(AngleUnit::Degrees));
        assert_eq!("RAD".parse::<AngleUnit>(), Ok(AngleUnit::Radians));
        assert!("grad".parse::<AngleUnit>().is_err());
    }
}
