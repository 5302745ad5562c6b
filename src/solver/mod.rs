//! Mesh-current solver.
//!
//! This module provides the numerical engine for steady-state AC analysis.
//!
//! ## Mesh Analysis
//!
//! With one unknown loop current per mesh, KVL around each mesh gives a
//! square complex system Ai = v where:
//! - i contains the unknown mesh currents
//! - A is the mesh impedance matrix (self-impedances on the diagonal,
//!   signed mutual impedances off it)
//! - v aggregates source voltages around each mesh
//!
//! A solve runs in three steps:
//!
//! 1. Compute each branch impedance at ω = 2πf
//! 2. Formulate the equations, substituting currents fixed by current
//!    sources or open branches
//! 3. Factor A with partial pivoting and back-substitute

mod formulate;
mod linalg;

pub use formulate::{formulate, Equation, EquationSystem};
pub use linalg::ComplexMatrix;

use num_complex::Complex64;

use crate::circuit::{Circuit, MeshId, Topology};
use crate::components::{Impedance, Source};
use crate::error::{AcMeshError, Result};

/// Default relative pivot threshold below which a system is singular.
pub const DEFAULT_SINGULAR_TOLERANCE: f64 = 1e-12;

/// Configuration for the solver.
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Pivot magnitude, relative to the largest entry of the pivot's own
    /// row, under which the system is reported singular.
    pub singular_tolerance: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            singular_tolerance: DEFAULT_SINGULAR_TOLERANCE,
        }
    }
}

impl SolverConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the relative singularity threshold.
    pub fn with_singular_tolerance(mut self, tolerance: f64) -> Self {
        self.singular_tolerance = tolerance;
        self
    }
}

/// The current of one mesh in a [`Solution`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshCurrent {
    pub mesh: MeshId,
    pub current: Complex64,
    /// True if the current was fixed by substitution rather than solved for
    pub forced: bool,
}

/// Mesh currents of a successful solve, in mesh order.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    currents: Vec<MeshCurrent>,
}

impl Solution {
    /// Current of `mesh`, if it exists.
    pub fn get(&self, mesh: MeshId) -> Option<Complex64> {
        self.currents.get(mesh.0).map(|c| c.current)
    }

    /// All mesh currents, in mesh order.
    pub fn iter(&self) -> impl Iterator<Item = &MeshCurrent> {
        self.currents.iter()
    }

    /// Only the currents obtained from the linear solve.
    pub fn solved(&self) -> impl Iterator<Item = &MeshCurrent> {
        self.currents.iter().filter(|c| !c.forced)
    }

    pub fn len(&self) -> usize {
        self.currents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.currents.is_empty()
    }
}

/// Branch impedances and mesh currents for a [`Circuit`].
#[derive(Debug, Clone)]
pub struct CircuitSolution {
    pub impedances: Vec<Impedance>,
    pub solution: Solution,
}

/// Mesh-current solver.
#[derive(Debug, Clone, Default)]
pub struct MeshSolver {
    config: SolverConfig,
}

impl MeshSolver {
    /// Create a solver with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a solver with custom configuration.
    pub fn with_config(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solve for every mesh current of a topology.
    pub fn solve(
        &self,
        topology: &Topology,
        impedances: &[Impedance],
        sources: &[Source],
    ) -> Result<Solution> {
        let _span = tracing::debug_span!("solve_mesh_currents").entered();

        let system = formulate(topology, impedances, sources)?;
        let values = self.solve_system(&system)?;

        let mut solved = system.unknowns.iter().zip(values);
        let mut currents = Vec::with_capacity(topology.mesh_count());
        for k in 0..topology.mesh_count() {
            let mesh = MeshId(k);
            let entry = match system.forced.get(&mesh) {
                Some(&current) => MeshCurrent {
                    mesh,
                    current,
                    forced: true,
                },
                None => {
                    let (&id, current) = solved
                        .next()
                        .ok_or(AcMeshError::DimensionMismatch {
                            equations: system.equations.len(),
                            unknowns: system.unknowns.len(),
                        })?;
                    debug_assert_eq!(id, mesh);
                    MeshCurrent {
                        mesh,
                        current,
                        forced: false,
                    }
                }
            };
            currents.push(entry);
        }

        Ok(Solution { currents })
    }

    /// Compute branch impedances and solve a validated circuit.
    pub fn solve_circuit(&self, circuit: &Circuit) -> Result<CircuitSolution> {
        let impedances = circuit.branch_impedances();
        let solution = self.solve(&circuit.topology, &impedances, &circuit.sources)?;
        Ok(CircuitSolution {
            impedances,
            solution,
        })
    }

    /// Solve a formulated system, returning values in `system.unknowns` order.
    pub fn solve_system(&self, system: &EquationSystem) -> Result<Vec<Complex64>> {
        let n = system.size();
        if system.equations.len() != n {
            return Err(AcMeshError::DimensionMismatch {
                equations: system.equations.len(),
                unknowns: n,
            });
        }

        let mut matrix = ComplexMatrix::new(n);
        for (row, equation) in system.equations.iter().enumerate() {
            for (mesh, &value) in &equation.coefficients {
                let col = system
                    .unknowns
                    .iter()
                    .position(|m| m == mesh)
                    .ok_or_else(|| {
                        AcMeshError::invalid_topology(format!(
                            "equation for {} references {}, which is not an unknown",
                            equation.mesh, mesh
                        ))
                    })?;
                matrix.add(row, col, value);
            }
            matrix.add_source(row, equation.rhs);
        }

        matrix.factor(self.config.singular_tolerance)?;
        if let Some(det) = matrix.determinant() {
            tracing::debug!(size = n, det = %det, "factored mesh impedance matrix");
        }
        matrix.solve()
    }
}

/// Solve for every mesh current with the default configuration.
pub fn solve_mesh_currents(
    topology: &Topology,
    impedances: &[Impedance],
    sources: &[Source],
) -> Result<Solution> {
    MeshSolver::new().solve(topology, impedances, sources)
}
