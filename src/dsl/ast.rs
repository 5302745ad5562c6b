//! Abstract Syntax Tree types for the circuit DSL.

use crate::circuit::Orientation;
use crate::components::{ComponentKind, SourceKind};
use crate::phasor::AngleUnit;

/// Complete AST representation of a parsed circuit.
#[derive(Debug, Clone, Default)]
pub struct CircuitAst {
    /// Frequency from `.freq` (Hz)
    pub frequency_hz: Option<f64>,
    /// Frequency from `.omega` (rad/s)
    pub omega: Option<f64>,
    /// Unit for source angles, from `.angle`
    pub angle_unit: AngleUnit,
    /// Branch definitions in declaration order
    pub branches: Vec<BranchDef>,
    /// Mesh definitions in declaration order
    pub meshes: Vec<MeshDef>,
    /// Source definitions in declaration order
    pub sources: Vec<SourceDef>,
}

impl CircuitAst {
    /// Create a new empty circuit AST.
    pub fn new() -> Self {
        Self::default()
    }
}

/// One series element inside a branch, e.g. `R=4.7k`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementDef {
    pub kind: ComponentKind,
    pub value: f64,
}

/// A branch line: `B<name> {R|L|C=<value>}`.
#[derive(Debug, Clone)]
pub struct BranchDef {
    pub name: String,
    pub elements: Vec<ElementDef>,
    /// Source line number for error reporting
    pub line: usize,
}

/// A signed reference to a branch by name, e.g. `-B2`.
#[derive(Debug, Clone, PartialEq)]
pub struct BranchRef {
    pub name: String,
    pub orientation: Orientation,
}

/// A mesh line: `M<name> {[+|-]<branch>}`.
#[derive(Debug, Clone)]
pub struct MeshDef {
    pub name: String,
    pub branches: Vec<BranchRef>,
    pub line: usize,
}

/// A source line: `V<name>|I<name> [+|-]<branch> <magnitude> [<angle>]`.
#[derive(Debug, Clone)]
pub struct SourceDef {
    pub kind: SourceKind,
    pub name: String,
    pub branch: BranchRef,
    pub magnitude: f64,
    /// Phase angle, in the circuit's `.angle` unit
    pub angle: f64,
    pub line: usize,
}

/// Statement kinds, selected by the first letter of the leading identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementType {
    /// Branch
    Branch,
    /// Mesh
    Mesh,
    /// Voltage source
    VoltageSource,
    /// Current source
    CurrentSource,
}

impl StatementType {
    /// Parse a statement type from its DSL prefix.
    pub fn from_prefix(prefix: char) -> Option<Self> {
        match prefix.to_ascii_uppercase() {
            'B' => Some(Self::Branch),
            'M' => Some(Self::Mesh),
            'V' => Some(Self::VoltageSource),
            'I' => Some(Self::CurrentSource),
            _ => None,
        }
    }
}
