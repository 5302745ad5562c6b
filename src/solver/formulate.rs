//! Mesh-current equation formulation.
//!
//! For each mesh `k` whose current is unknown, KVL gives
//!
//! ```text
//! Σ_j A_kj · i_j = Σ_s sign(k, b_s) · sign_s · V_s
//! A_kj = Σ_b sign(k, b) · sign(j, b) · Z_b     (branches b shared by k and j)
//! ```
//!
//! The diagonal `A_kk` is the self-impedance of mesh `k`; off-diagonal terms
//! are the signed mutual impedances of shared branches.
//!
//! Mesh currents fixed by a current source, or by an open branch, are
//! substituted: the mesh's own KVL row is dropped and `A_jk · i_k` moves to
//! the right-hand side of every remaining row.

use std::collections::BTreeMap;

use num_complex::Complex64;

use crate::circuit::{validate_sources, validate_topology, BranchId, MeshId, Orientation, Topology};
use crate::components::{Impedance, Source, SourceKind};
use crate::error::{AcMeshError, Result};

/// One KVL equation over the unknown mesh currents.
#[derive(Debug, Clone, PartialEq)]
pub struct Equation {
    /// Mesh whose loop this equation describes
    pub mesh: MeshId,
    /// Coefficient of each unknown mesh current
    pub coefficients: BTreeMap<MeshId, Complex64>,
    /// Right-hand side (source voltages and substituted terms)
    pub rhs: Complex64,
}

/// The formulated system plus the currents fixed by substitution.
#[derive(Debug, Clone, PartialEq)]
pub struct EquationSystem {
    /// Unknown mesh currents, in mesh order
    pub unknowns: Vec<MeshId>,
    /// One equation per unknown, in the same order
    pub equations: Vec<Equation>,
    /// Mesh currents fixed before solving, in mesh order
    pub forced: BTreeMap<MeshId, Complex64>,
}

impl EquationSystem {
    /// Number of unknowns.
    pub fn size(&self) -> usize {
        self.unknowns.len()
    }
}

/// Build the mesh-current equation system.
///
/// `impedances` is indexed by [`BranchId`]; `sources` are applied in order.
pub fn formulate(
    topology: &Topology,
    impedances: &[Impedance],
    sources: &[Source],
) -> Result<EquationSystem> {
    let _span = tracing::debug_span!(
        "formulate",
        meshes = topology.mesh_count(),
        branches = impedances.len()
    )
    .entered();

    validate_topology(topology, impedances.len())?;
    validate_sources(sources, impedances.len())?;

    let incidence: Vec<Vec<(MeshId, Orientation)>> = (0..impedances.len())
        .map(|b| topology.traversals(BranchId(b)))
        .collect();

    if let Some(source) = sources.iter().find(|s| incidence[s.branch.0].is_empty()) {
        return Err(AcMeshError::UnmeshedSource {
            source_name: source.name.clone(),
            branch: source.branch.0,
        });
    }

    let forced = forced_currents(&incidence, impedances, sources)?;

    let unknowns: Vec<MeshId> = (0..topology.mesh_count())
        .map(MeshId)
        .filter(|m| !forced.contains_key(m))
        .collect();

    let mut equations = Vec::with_capacity(unknowns.len());
    for &k in &unknowns {
        let mesh = &topology.meshes[k.0];
        let mut coefficients: BTreeMap<MeshId, Complex64> = BTreeMap::new();
        coefficients.insert(k, Complex64::new(0.0, 0.0));
        let mut rhs = Complex64::new(0.0, 0.0);

        for &(branch, orientation_k) in &mesh.branches {
            // Open branches force every traversing mesh, so none remain here
            let z = impedances[branch.0]
                .finite()
                .ok_or(AcMeshError::OpenBranchShared { branch: branch.0 })?;
            for &(j, orientation_j) in &incidence[branch.0] {
                let term = z * orientation_k.compose(orientation_j).sign();
                *coefficients.entry(j).or_insert(Complex64::new(0.0, 0.0)) += term;
            }
        }

        for source in sources.iter().filter(|s| s.kind == SourceKind::Voltage) {
            if let Some(orientation_k) = mesh.orientation_of(source.branch) {
                rhs += source.oriented_value() * orientation_k.sign();
            }
        }

        // Move known currents to the right-hand side
        for (j, &current) in &forced {
            if let Some(a_kj) = coefficients.remove(j) {
                rhs -= a_kj * current;
            }
        }

        equations.push(Equation {
            mesh: k,
            coefficients,
            rhs,
        });
    }

    tracing::debug!(
        unknowns = unknowns.len(),
        forced = forced.len(),
        "formulated mesh equations"
    );

    Ok(EquationSystem {
        unknowns,
        equations,
        forced,
    })
}

/// Collect mesh currents fixed by current sources and by open branches.
fn forced_currents(
    incidence: &[Vec<(MeshId, Orientation)>],
    impedances: &[Impedance],
    sources: &[Source],
) -> Result<BTreeMap<MeshId, Complex64>> {
    let mut forced = BTreeMap::new();

    for source in sources.iter().filter(|s| s.kind == SourceKind::Current) {
        let (mesh, orientation) = match incidence[source.branch.0].as_slice() {
            [single] => *single,
            _ => {
                return Err(AcMeshError::SharedCurrentSource {
                    source_name: source.name.clone(),
                    branch: source.branch.0,
                })
            }
        };
        let current = source.oriented_value() * orientation.sign();
        if forced.insert(mesh, current).is_some() {
            return Err(AcMeshError::OverconstrainedMesh { mesh: mesh.0 });
        }
        tracing::trace!(source = %source.name, %mesh, %current, "current source fixes mesh current");
    }

    for (b, z) in impedances.iter().enumerate() {
        if !z.is_open() {
            continue;
        }
        match incidence[b].as_slice() {
            [] => {}
            [(mesh, _)] => {
                if forced.insert(*mesh, Complex64::new(0.0, 0.0)).is_some() {
                    return Err(AcMeshError::OverconstrainedMesh { mesh: mesh.0 });
                }
                tracing::trace!(branch = b, %mesh, "open branch fixes mesh current at zero");
            }
            _ => return Err(AcMeshError::OpenBranchShared { branch: b }),
        }
    }

    Ok(forced)
}
