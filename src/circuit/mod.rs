//! Circuit representation and validation.
//!
//! This module provides the immutable configuration a solve runs against:
//! the drive [`Frequency`], the series [`Branch`]es, the mesh [`Topology`]
//! and the sources, bundled into a [`Circuit`].

mod frequency;
mod graph;
mod types;
mod validate;

pub use frequency::{Frequency, FREQUENCY_TOLERANCE};
pub use graph::{Branch, Circuit, Mesh, Topology};
pub use types::*;
pub use validate::{validate_circuit, validate_sources, validate_topology};
