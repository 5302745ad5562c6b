//! DSL (Domain Specific Language) parser for circuit descriptions.
//!
//! This module provides a line-oriented, SPICE-flavoured text format for
//! describing AC mesh circuits: series branches, the meshes that traverse
//! them, the sources placed on them and the drive frequency.
//!
//! # Grammar Overview
//!
//! ```text
//! circuit     = { line }
//! line        = comment | directive | statement | empty
//! comment     = ('#' | ';') { any_char }
//! directive   = '.' directive_name argument
//! statement   = branch | mesh | source
//!
//! directive_name = "freq" | "omega" | "angle"
//! branch      = 'B' name { element }
//! element     = ('R' | 'L' | 'C') '=' value
//! mesh        = 'M' name { branch_ref }
//! source      = ('V' | 'I') name branch_ref value [angle]
//! branch_ref  = ['+' | '-'] identifier
//!
//! number      = ['-'|'+'] digit+ ['.' digit+] [('e'|'E') ['-'|'+'] digit+]
//! unit_suffix = 'p' | 'n' | 'u' | 'm' | 'k' | 'M' | 'G'
//! identifier  = (letter | '_') { letter | digit | '_' }
//! ```
//!
//! # Statements
//!
//! | Prefix | Description | Syntax |
//! |--------|-------------|--------|
//! | B | Series branch | `B<name> R=<ohms> L=<henries> C=<farads> ...` |
//! | M | Mesh | `M<name> [+\|-]<branch> ...` |
//! | V | Voltage source | `V<name> [+\|-]<branch> <magnitude> [angle]` |
//! | I | Current source | `I<name> [+\|-]<branch> <magnitude> [angle]` |
//!
//! # Directives
//!
//! | Directive | Description | Syntax |
//! |-----------|-------------|--------|
//! | .freq | Drive frequency in Hz | `.freq <hz>` |
//! | .omega | Drive frequency in rad/s | `.omega <rad/s>` |
//! | .angle | Unit of source angles, set before any source | `.angle deg\|rad` |
//!
//! # Example
//!
//! ```text
//! # Two meshes sharing B2
//! .freq 60
//!
//! B1 R=10 L=20m
//! B2 R=4.7
//! B3 C=220u
//!
//! M1 B1 B2
//! M2 -B2 B3
//!
//! VIN B1 10 0
//! ```

mod ast;
mod lexer;
mod parser;

pub use ast::*;
pub use lexer::{parse_value, Lexer, Token, TokenKind};
pub use parser::Parser;

use crate::error::Result;

/// Parse a circuit DSL string into an AST.
pub fn parse(input: &str) -> Result<CircuitAst> {
    let lexer = Lexer::new(input);
    let mut parser = Parser::new(lexer)?;
    parser.parse()
}

/// Parse a circuit DSL file.
#[cfg(feature = "cli")]
pub fn parse_file(path: &std::path::Path) -> Result<CircuitAst> {
    let content = std::fs::read_to_string(path).map_err(|e| crate::error::AcMeshError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    parse(&content)
}
