//! Text rendering of solve results.

use std::fmt;

use num_complex::Complex64;

use crate::circuit::Circuit;
use crate::components::Impedance;
use crate::phasor::{to_polar, AngleUnit};
use crate::solver::CircuitSolution;

/// Render an impedance as `"3.00 + 2.00j"`, or `"open"` for an open circuit.
pub fn impedance_to_string(z: &Impedance) -> String {
    match z.finite() {
        Some(v) => rect_to_string(v),
        None => "open".to_string(),
    }
}

/// Render a complex value as `"a + bj"` with two decimals.
pub fn rect_to_string(v: Complex64) -> String {
    // -0.0 + 0.0 == +0.0
    let re = v.re + 0.0;
    if v.im >= 0.0 {
        format!("{:.2} + {:.2}j", re, v.im.abs())
    } else {
        format!("{:.2} - {:.2}j", re, v.im.abs())
    }
}

/// Render a complex value in polar form, e.g. `"12.0000∠0.00°"`.
pub fn polar_to_string(v: Complex64, unit: AngleUnit) -> String {
    let (magnitude, angle) = to_polar(v, unit);
    format!("{:.4}∠{:.2}{}", magnitude, angle, unit.suffix())
}

/// Printable summary of a solved circuit.
pub struct CircuitReport<'a> {
    circuit: &'a Circuit,
    result: &'a CircuitSolution,
    angle_unit: AngleUnit,
}

impl<'a> CircuitReport<'a> {
    pub fn new(circuit: &'a Circuit, result: &'a CircuitSolution) -> Self {
        Self {
            circuit,
            result,
            angle_unit: AngleUnit::Degrees,
        }
    }

    /// Set the unit used for polar angles.
    pub fn with_angle_unit(mut self, unit: AngleUnit) -> Self {
        self.angle_unit = unit;
        self
    }
}

impl fmt::Display for CircuitReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(40);
        writeln!(
            f,
            "Frequency: {} Hz ({} rad/s)",
            self.circuit.frequency.hz(),
            self.circuit.frequency.omega()
        )?;
        writeln!(f, "{}\nBRANCH IMPEDANCES\n{}", rule, rule)?;
        for (branch, z) in self.circuit.branches.iter().zip(&self.result.impedances) {
            writeln!(f, "{:<8} {}", branch.name, impedance_to_string(z))?;
        }
        writeln!(f, "{}\nMESH CURRENTS\n{}", rule, rule)?;
        for current in self.result.solution.iter() {
            let tag = if current.forced { " (fixed)" } else { "" };
            let name = match self.circuit.mesh_name(current.mesh) {
                Some(name) => name.to_string(),
                None => current.mesh.to_string(),
            };
            writeln!(
                f,
                "{:<8} {:<24} {}{}",
                name,
                rect_to_string(current.current),
                polar_to_string(current.current, self.angle_unit),
                tag
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl;
    use crate::solver::MeshSolver;

    #[test]
    fn test_impedance_to_string() {
        assert_eq!(
            impedance_to_string(&Impedance::Finite(Complex64::new(3.0, 2.0))),
            "3.00 + 2.00j"
        );
        assert_eq!(
            impedance_to_string(&Impedance::Finite(Complex64::new(0.0, -1.0 / 3.0))),
            "0.00 - 0.33j"
        );
        assert_eq!(impedance_to_string(&Impedance::Open), "open");
    }

    #[test]
    fn test_polar_to_string() {
        assert_eq!(
            polar_to_string(Complex64::new(12.0, 0.0), AngleUnit::Degrees),
            "12.0000∠0.00°"
        );
        assert_eq!(
            polar_to_string(Complex64::new(0.0, 2.0), AngleUnit::Radians),
            "2.0000∠1.57 rad"
        );
    }

    #[test]
    fn test_report_lists_branches_and_meshes() {
        let input = ".freq 50\nBA R=10\nBB R=10\nM1 BA\nM2 BB\nV1 BA 5\nI1 BB 1\n";
        let circuit = Circuit::from_ast(dsl::parse(input).unwrap()).unwrap();
        let result = MeshSolver::new().solve_circuit(&circuit).unwrap();
        let text = CircuitReport::new(&circuit, &result).to_string();
        assert!(text.contains("BRANCH IMPEDANCES"));
        assert!(text.contains("BA       10.00 + 0.00j"));
        assert!(text.contains("0.50 + 0.00j"));
        assert!(text.contains("(fixed)"));
    }
}
