//! Circuit structure: branches, meshes and the assembled configuration.

use std::collections::HashMap;

use super::types::{BranchId, MeshId, Orientation};
use super::validate::validate_circuit;
use super::Frequency;
use crate::components::{compute_branch_impedances, Component, Impedance, Source, SourceKind};
use crate::dsl::{BranchRef, CircuitAst};
use crate::error::{AcMeshError, Result};
use crate::phasor;

/// A series path of components between two circuit nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    /// Branch name (for reports and error messages)
    pub name: String,
    /// Components in series, in declaration order
    pub components: Vec<Component>,
}

impl Branch {
    /// Create a branch.
    pub fn new(name: impl Into<String>, components: Vec<Component>) -> Self {
        Self {
            name: name.into(),
            components,
        }
    }
}

/// A mesh: an ordered loop of branch traversals.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    /// Mesh name (for reports and error messages)
    pub name: String,
    /// Traversed branches with direction relative to each branch's reference
    pub branches: Vec<(BranchId, Orientation)>,
}

impl Mesh {
    /// Create a mesh.
    pub fn new(name: impl Into<String>, branches: Vec<(BranchId, Orientation)>) -> Self {
        Self {
            name: name.into(),
            branches,
        }
    }

    /// Orientation with which this mesh traverses `branch`, if it does.
    pub fn orientation_of(&self, branch: BranchId) -> Option<Orientation> {
        self.branches
            .iter()
            .find(|(b, _)| *b == branch)
            .map(|(_, o)| *o)
    }
}

/// Mesh-to-branch incidence with signs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Topology {
    pub meshes: Vec<Mesh>,
}

impl Topology {
    /// Create a topology from a list of meshes; mesh `k` gets `MeshId(k)`.
    pub fn new(meshes: Vec<Mesh>) -> Self {
        Self { meshes }
    }

    /// Number of meshes.
    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    /// Get a mesh by ID.
    pub fn mesh(&self, id: MeshId) -> Option<&Mesh> {
        self.meshes.get(id.0)
    }

    /// Meshes traversing `branch`, in mesh order.
    pub fn traversals(&self, branch: BranchId) -> Vec<(MeshId, Orientation)> {
        self.meshes
            .iter()
            .enumerate()
            .filter_map(|(k, m)| m.orientation_of(branch).map(|o| (MeshId(k), o)))
            .collect()
    }
}

/// A complete circuit ready for solving.
///
/// Immutable once built: one frequency, one set of branches, one topology.
#[derive(Debug, Clone)]
pub struct Circuit {
    /// Drive frequency
    pub frequency: Frequency,
    /// All branches, indexed by [`BranchId`]
    pub branches: Vec<Branch>,
    /// Mesh traversals, indexed by [`MeshId`]
    pub topology: Topology,
    /// All sources in declaration order
    pub sources: Vec<Source>,
}

impl Circuit {
    /// Assemble and validate a circuit.
    pub fn new(
        frequency: Frequency,
        branches: Vec<Branch>,
        topology: Topology,
        sources: Vec<Source>,
    ) -> Result<Self> {
        let circuit = Self {
            frequency,
            branches,
            topology,
            sources,
        };
        validate_circuit(&circuit)?;
        Ok(circuit)
    }

    /// Build a circuit from a parsed AST.
    pub fn from_ast(ast: CircuitAst) -> Result<Self> {
        let frequency = Frequency::from_parts(ast.frequency_hz, ast.omega)?;

        // Assign branch IDs in declaration order
        let mut branch_map: HashMap<String, BranchId> = HashMap::new();
        let mut branches = Vec::with_capacity(ast.branches.len());
        for def in ast.branches {
            if branch_map.contains_key(&def.name) {
                return Err(AcMeshError::DuplicateBranch { name: def.name });
            }
            let components = def
                .elements
                .iter()
                .map(|e| {
                    Component::new(e.kind, e.value).map_err(|err| {
                        AcMeshError::invalid_component(&def.name, def.line, err.to_string())
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            branch_map.insert(def.name.clone(), BranchId(branches.len()));
            branches.push(Branch::new(def.name, components));
        }

        let resolve = |r: &BranchRef, line: usize| -> Result<(BranchId, Orientation)> {
            branch_map
                .get(&r.name)
                .map(|&id| (id, r.orientation))
                .ok_or_else(|| AcMeshError::UnknownBranch {
                    name: r.name.clone(),
                    line,
                })
        };

        let mut mesh_names = std::collections::HashSet::new();
        let mut meshes = Vec::with_capacity(ast.meshes.len());
        for def in &ast.meshes {
            if !mesh_names.insert(def.name.clone()) {
                return Err(AcMeshError::DuplicateMesh {
                    name: def.name.clone(),
                });
            }
            let traversals = def
                .branches
                .iter()
                .map(|r| resolve(r, def.line))
                .collect::<Result<Vec<_>>>()?;
            meshes.push(Mesh::new(def.name.clone(), traversals));
        }

        let mut source_names = std::collections::HashSet::new();
        let mut sources = Vec::with_capacity(ast.sources.len());
        for def in &ast.sources {
            if !source_names.insert(def.name.clone()) {
                return Err(AcMeshError::DuplicateSource {
                    name: def.name.clone(),
                });
            }
            let (branch, orientation) = resolve(&def.branch, def.line)?;
            let phasor = phasor::to_rect(def.magnitude, def.angle, ast.angle_unit).map_err(
                |err| AcMeshError::invalid_component(&def.name, def.line, err.to_string()),
            )?;
            let source = match def.kind {
                SourceKind::Voltage => Source::voltage(&def.name, phasor, branch, orientation),
                SourceKind::Current => Source::current(&def.name, phasor, branch, orientation),
            };
            sources.push(source);
        }

        Self::new(frequency, branches, Topology::new(meshes), sources)
    }

    /// Impedance of every branch at the circuit frequency, in branch order.
    pub fn branch_impedances(&self) -> Vec<Impedance> {
        compute_branch_impedances(&self.branches, self.frequency)
    }

    /// Find a branch ID by name.
    pub fn find_branch(&self, name: &str) -> Option<BranchId> {
        self.branches
            .iter()
            .position(|b| b.name == name)
            .map(BranchId)
    }

    /// Find a mesh ID by name.
    pub fn find_mesh(&self, name: &str) -> Option<MeshId> {
        self.topology
            .meshes
            .iter()
            .position(|m| m.name == name)
            .map(MeshId)
    }

    /// Get the name of a mesh, if `mesh` belongs to this circuit.
    pub fn mesh_name(&self, mesh: MeshId) -> Option<&str> {
        self.topology.mesh(mesh).map(|m| m.name.as_str())
    }

    /// Sources placed on `branch`, in declaration order.
    pub fn sources_on(&self, branch: BranchId) -> impl Iterator<Item = &Source> {
        self.sources.iter().filter(move |s| s.branch == branch)
    }
}
