//! Voltage and current sources.

use num_complex::Complex64;

use crate::circuit::{BranchId, Orientation};

/// Whether a source imposes a voltage or a current.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Voltage source: enters the KVL right-hand side of each mesh on its branch
    Voltage,
    /// Current source: fixes the current of the single mesh on its branch
    Current,
}

/// A sinusoidal source, as a complex phasor placed on one branch.
///
/// `orientation` is relative to the branch's reference direction. For a
/// voltage source, `Forward` means a rise along that direction; for a
/// current source, flow along it.
#[derive(Debug, Clone, PartialEq)]
pub struct Source {
    pub name: String,
    pub kind: SourceKind,
    pub phasor: Complex64,
    pub branch: BranchId,
    pub orientation: Orientation,
}

impl Source {
    /// Create a voltage source.
    pub fn voltage(
        name: impl Into<String>,
        phasor: Complex64,
        branch: BranchId,
        orientation: Orientation,
    ) -> Self {
        Self {
            name: name.into(),
            kind: SourceKind::Voltage,
            phasor,
            branch,
            orientation,
        }
    }

    /// Create a current source.
    pub fn current(
        name: impl Into<String>,
        phasor: Complex64,
        branch: BranchId,
        orientation: Orientation,
    ) -> Self {
        Self {
            name: name.into(),
            kind: SourceKind::Current,
            phasor,
            branch,
            orientation,
        }
    }

    /// The phasor with the source orientation applied.
    pub fn oriented_value(&self) -> Complex64 {
        self.phasor * self.orientation.sign()
    }
}
