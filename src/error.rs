//! Error types for the AC mesh solver.
//!
//! This module provides a unified error type [`AcMeshError`] that covers
//! all error conditions that can occur during DSL parsing, circuit
//! configuration, equation formulation and solving.

use thiserror::Error;

/// Result type alias using [`AcMeshError`].
pub type Result<T> = std::result::Result<T, AcMeshError>;

/// Unified error type for all solver operations.
#[derive(Error, Debug)]
pub enum AcMeshError {
    // ============ DSL Parsing Errors ============
    /// Error during lexical analysis
    #[error("Lexer error at line {line}, column {column}: {message}")]
    LexerError {
        line: usize,
        column: usize,
        message: String,
    },

    /// Error during parsing
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    /// Invalid branch element or source definition
    #[error("Invalid component '{name}' at line {line}: {message}")]
    InvalidComponent {
        name: String,
        line: usize,
        message: String,
    },

    /// Statement whose prefix is not B, M, V or I
    #[error("Unknown statement '{statement}' at line {line}")]
    UnknownStatement { statement: String, line: usize },

    /// Branch referenced by a mesh or source was never declared
    #[error("Undefined branch '{name}' referenced at line {line}")]
    UnknownBranch { name: String, line: usize },

    /// Duplicate branch name
    #[error("Duplicate branch name '{name}'")]
    DuplicateBranch { name: String },

    /// Duplicate mesh name
    #[error("Duplicate mesh name '{name}'")]
    DuplicateMesh { name: String },

    /// Duplicate source name
    #[error("Duplicate source name '{name}'")]
    DuplicateSource { name: String },

    // ============ Configuration Errors ============
    /// Neither Hz nor rad/s was supplied
    #[error("No drive frequency specified (use '.freq <hz>' or '.omega <rad/s>')")]
    MissingFrequency,

    /// Frequency is not a finite positive number
    #[error("Invalid frequency: {message}")]
    InvalidFrequency { message: String },

    /// Hz and rad/s forms disagree
    #[error("Inconsistent frequency: {hz} Hz does not match {omega} rad/s")]
    InconsistentFrequency { hz: f64, omega: f64 },

    /// Phasor with a negative or non-finite magnitude/angle
    #[error("Invalid phasor: {message}")]
    InvalidPhasor { message: String },

    /// Component value outside its admissible range
    #[error("Invalid {kind} value {value}: must be finite and non-negative")]
    InvalidValue { kind: &'static str, value: f64 },

    // ============ Topology Errors ============
    /// Branch index past the end of the branch list
    #[error("Branch index {branch} out of range ({count} branches)")]
    BranchOutOfRange { branch: usize, count: usize },

    /// Structurally invalid mesh description
    #[error("Invalid circuit topology: {message}")]
    InvalidTopology { message: String },

    /// Current source on a branch shared by several meshes
    #[error("Current source '{source_name}' sits on branch {branch}, which is shared by several meshes")]
    SharedCurrentSource { source_name: String, branch: usize },

    /// Source on a branch no mesh traverses
    #[error("Source '{source_name}' sits on branch {branch}, which no mesh traverses")]
    UnmeshedSource { source_name: String, branch: usize },

    /// Open branch shared by several meshes
    #[error("Open-circuit branch {branch} is shared by several meshes")]
    OpenBranchShared { branch: usize },

    /// Mesh current fixed by more than one constraint
    #[error("Mesh {mesh} current is fixed by more than one constraint")]
    OverconstrainedMesh { mesh: usize },

    // ============ Solve Errors ============
    /// Coefficient matrix is singular
    #[error("Singular equation system - no unique mesh-current solution")]
    SingularSystem,

    /// Equation count does not match unknown count
    #[error("Dimension mismatch: {equations} equations for {unknowns} unknowns")]
    DimensionMismatch { equations: usize, unknowns: usize },

    // ============ I/O Errors ============
    /// Error reading circuit file
    #[error("Failed to read circuit file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl AcMeshError {
    /// Create a lexer error
    pub fn lexer(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::LexerError {
            line,
            column,
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::ParseError {
            line,
            message: message.into(),
        }
    }

    /// Create an invalid component error
    pub fn invalid_component(name: impl Into<String>, line: usize, message: impl Into<String>) -> Self {
        Self::InvalidComponent {
            name: name.into(),
            line,
            message: message.into(),
        }
    }

    /// Create an invalid topology error
    pub fn invalid_topology(message: impl Into<String>) -> Self {
        Self::InvalidTopology {
            message: message.into(),
        }
    }
}
