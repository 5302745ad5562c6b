//! WASM bindings for Acmesh Core.
//!
//! This module provides JavaScript-friendly bindings for solving circuits in
//! the browser.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmAcSolver } from 'acmesh_core';
//!
//! await init();
//!
//! const circuitDsl = `
//!   .freq 60
//!   B1 R=10 L=10m
//!   M1 B1
//!   V1 B1 12 0
//! `;
//!
//! const solver = new WasmAcSolver(circuitDsl);
//! const currents = solver.currents(); // [re0, im0, re1, im1, ...]
//! console.log(solver.report(false));
//! ```

use wasm_bindgen::prelude::*;

use crate::circuit::Circuit;
use crate::dsl;
use crate::error::AcMeshError;
use crate::phasor::AngleUnit;
use crate::report::CircuitReport;
use crate::solver::{CircuitSolution, MeshSolver, SolverConfig};

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn to_js(err: AcMeshError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// WASM-compatible AC mesh solver.
///
/// Parses and solves the circuit once at construction; the accessors read
/// the immutable result.
#[wasm_bindgen]
pub struct WasmAcSolver {
    circuit: Circuit,
    result: CircuitSolution,
}

#[wasm_bindgen]
impl WasmAcSolver {
    /// Parse and solve a circuit DSL string.
    ///
    /// # Returns
    /// A solved `WasmAcSolver`, or an error string if the circuit is invalid
    /// or its equations are singular.
    #[wasm_bindgen(constructor)]
    pub fn new(circuit_dsl: &str) -> Result<WasmAcSolver, JsValue> {
        Self::with_tolerance(circuit_dsl, crate::solver::DEFAULT_SINGULAR_TOLERANCE)
    }

    /// Parse and solve with a custom relative singularity threshold.
    #[wasm_bindgen]
    pub fn with_tolerance(circuit_dsl: &str, singular_tolerance: f64) -> Result<WasmAcSolver, JsValue> {
        let ast = dsl::parse(circuit_dsl).map_err(to_js)?;
        let circuit = Circuit::from_ast(ast).map_err(to_js)?;

        let solver = MeshSolver::with_config(
            SolverConfig::new().with_singular_tolerance(singular_tolerance),
        );
        let result = solver.solve_circuit(&circuit).map_err(to_js)?;

        Ok(WasmAcSolver { circuit, result })
    }

    /// Number of meshes.
    #[wasm_bindgen(getter)]
    pub fn mesh_count(&self) -> usize {
        self.result.solution.len()
    }

    /// Mesh currents as interleaved `[re, im]` pairs, in mesh order.
    #[wasm_bindgen]
    pub fn currents(&self) -> Vec<f64> {
        self.result
            .solution
            .iter()
            .flat_map(|c| [c.current.re, c.current.im])
            .collect()
    }

    /// Branch impedances as interleaved `[re, im]` pairs; an open branch is
    /// reported as `[NaN, NaN]`.
    #[wasm_bindgen]
    pub fn branch_impedances(&self) -> Vec<f64> {
        self.result
            .impedances
            .iter()
            .flat_map(|z| match z.finite() {
                Some(v) => [v.re, v.im],
                None => [f64::NAN, f64::NAN],
            })
            .collect()
    }

    /// Current of a named mesh as `[re, im]`, or `undefined` if the mesh
    /// doesn't exist.
    #[wasm_bindgen]
    pub fn mesh_current(&self, mesh_name: &str) -> Option<Vec<f64>> {
        let mesh = self.circuit.find_mesh(mesh_name)?;
        self.result.solution.get(mesh).map(|c| vec![c.re, c.im])
    }

    /// Human-readable report; `radians` selects the angle unit.
    #[wasm_bindgen]
    pub fn report(&self, radians: bool) -> String {
        let unit = if radians {
            AngleUnit::Radians
        } else {
            AngleUnit::Degrees
        };
        CircuitReport::new(&self.circuit, &self.result)
            .with_angle_unit(unit)
            .to_string()
    }
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
