//! Domain types for Comply Gateway.
//!
//! This module contains the policy context and compliance verdict types.

mod compliance;
mod policy;

pub use compliance::*;
pub use policy::*;
