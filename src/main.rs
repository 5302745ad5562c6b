//! Acmesh - AC Mesh-Current Solver
//!
//! Solves a linear R/L/C network at one drive frequency and prints branch
//! impedances and mesh currents.
//!
//! # Usage
//!
//! ```bash
//! RUST_LOG=debug acmesh circuit.acm --angle rad
//! ```

use std::path::PathBuf;

use acmesh_core::{
    circuit::Circuit,
    dsl,
    error::Result,
    phasor::AngleUnit,
    report::CircuitReport,
    solver::{MeshSolver, SolverConfig, DEFAULT_SINGULAR_TOLERANCE},
};
use clap::Parser;

/// Steady-state AC mesh-current solver
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the circuit description file
    #[arg(value_name = "CIRCUIT_FILE")]
    circuit_file: PathBuf,

    /// Unit for reported phase angles (deg or rad)
    #[arg(short, long, default_value_t = AngleUnit::Degrees)]
    angle: AngleUnit,

    /// Relative pivot threshold for singular systems
    #[arg(long, default_value_t = DEFAULT_SINGULAR_TOLERANCE)]
    singular_tolerance: f64,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // Parse the circuit file
    let ast = dsl::parse_file(&args.circuit_file)?;

    // Build and validate the circuit
    let circuit = Circuit::from_ast(ast)?;
    tracing::info!(
        branches = circuit.branches.len(),
        meshes = circuit.topology.mesh_count(),
        sources = circuit.sources.len(),
        hz = circuit.frequency.hz(),
        "loaded circuit"
    );

    // Solve
    let solver = MeshSolver::with_config(
        SolverConfig::new().with_singular_tolerance(args.singular_tolerance),
    );
    let result = solver.solve_circuit(&circuit)?;

    print!("{}", CircuitReport::new(&circuit, &result).with_angle_unit(args.angle));

    Ok(())
}
