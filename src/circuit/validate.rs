//! Circuit validation.

use std::collections::HashSet;

use crate::components::Source;
use crate::error::{AcMeshError, Result};

use super::{Circuit, Topology};

/// Validate a circuit for solving.
///
/// Checks:
/// - At least one mesh, and no empty mesh
/// - Every mesh and source references an existing branch
/// - No mesh traverses the same branch twice
pub fn validate_circuit(circuit: &Circuit) -> Result<()> {
    let count = circuit.branches.len();
    validate_topology(&circuit.topology, count)?;
    validate_sources(&circuit.sources, count)
}

/// Check a topology against the number of available branches.
pub fn validate_topology(topology: &Topology, branch_count: usize) -> Result<()> {
    if topology.meshes.is_empty() {
        return Err(AcMeshError::invalid_topology("Circuit has no meshes"));
    }

    for mesh in &topology.meshes {
        if mesh.branches.is_empty() {
            return Err(AcMeshError::invalid_topology(format!(
                "Mesh '{}' traverses no branches",
                mesh.name
            )));
        }

        let mut seen = HashSet::new();
        for &(branch, _) in &mesh.branches {
            if branch.0 >= branch_count {
                return Err(AcMeshError::BranchOutOfRange {
                    branch: branch.0,
                    count: branch_count,
                });
            }
            if !seen.insert(branch) {
                return Err(AcMeshError::invalid_topology(format!(
                    "Mesh '{}' traverses branch {} more than once",
                    mesh.name, branch
                )));
            }
        }
    }

    Ok(())
}

/// Check that every source sits on an existing branch.
pub fn validate_sources(sources: &[Source], branch_count: usize) -> Result<()> {
    for source in sources {
        if source.branch.0 >= branch_count {
            return Err(AcMeshError::BranchOutOfRange {
                branch: source.branch.0,
                count: branch_count,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::{BranchId, Mesh, Orientation};
    use num_complex::Complex64;

    #[test]
    fn test_empty_topology() {
        assert!(matches!(
            validate_topology(&Topology::default(), 2),
            Err(AcMeshError::InvalidTopology { .. })
        ));
    }

    #[test]
    fn test_branch_out_of_range() {
        let topology = Topology::new(vec![Mesh::new(
            "M1",
            vec![(BranchId(0), Orientation::Forward), (BranchId(3), Orientation::Forward)],
        )]);
        assert!(matches!(
            validate_topology(&topology, 2),
            Err(AcMeshError::BranchOutOfRange { branch: 3, count: 2 })
        ));
    }

    #[test]
    fn test_repeated_branch() {
        let topology = Topology::new(vec![Mesh::new(
            "M1",
            vec![(BranchId(0), Orientation::Forward), (BranchId(0), Orientation::Reverse)],
        )]);
        assert!(validate_topology(&topology, 1).is_err());
    }

    #[test]
    fn test_source_out_of_range() {
        let sources = vec![Source::voltage(
            "V1",
            Complex64::new(1.0, 0.0),
            BranchId(5),
            Orientation::Forward,
        )];
        assert!(matches!(
            validate_sources(&sources, 2),
            Err(AcMeshError::BranchOutOfRange { branch: 5, .. })
        ));
    }
}
