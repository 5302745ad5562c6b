//! # Acmesh Core
//!
//! A steady-state AC mesh-current solver for linear R/L/C networks.
//!
//! This library provides:
//! - Phasor conversion between rectangular and polar forms
//! - Complex impedance of resistors, inductors and capacitors, with an
//!   explicit open-circuit sentinel
//! - Data-driven mesh-current equation formulation from a signed
//!   mesh-to-branch incidence
//! - A complex LU solver with partial pivoting that reports singular systems
//! - A small text format for describing circuits
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`phasor`] - Polar/rectangular conversion
//! - [`components`] - Element impedances, branch aggregation, sources
//! - [`circuit`] - Frequency, branches, topology and the [`Circuit`] configuration
//! - [`solver`] - Equation formulation and complex linear solving
//! - [`dsl`] - Parser for the circuit description language
//! - [`report`] - Text rendering of results
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! acmesh circuit.acm --angle deg
//! ```
//!
//! ### Library
//!
//! ```no_run
//! use acmesh_core::{dsl, Circuit, MeshSolver};
//!
//! let ast = dsl::parse(".freq 60\nB1 R=10 L=10m\nM1 B1\nV1 B1 12 0\n")?;
//! let circuit = Circuit::from_ast(ast)?;
//! let result = MeshSolver::new().solve_circuit(&circuit)?;
//! for current in result.solution.iter() {
//!     if let Some(name) = circuit.mesh_name(current.mesh) {
//!         println!("{}: {}", name, current.current);
//!     }
//! }
//! # Ok::<(), acmesh_core::AcMeshError>(())
//! ```
//!
//! ## Solution Method
//!
//! For a single drive frequency ω = 2πf:
//!
//! 1. Reduce each series branch to a complex impedance
//! 2. Write KVL around every mesh whose current is not fixed by a current
//!    source or an open branch
//! 3. Solve the complex system by Gaussian elimination with partial pivoting

pub mod circuit;
pub mod components;
pub mod dsl;
pub mod error;
pub mod phasor;
pub mod report;
pub mod solver;

// Re-export main types for convenience
pub use circuit::{Circuit, Frequency};
pub use components::Impedance;
pub use error::{AcMeshError, Result};
pub use solver::{solve_mesh_currents, MeshSolver, Solution};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmAcSolver;
