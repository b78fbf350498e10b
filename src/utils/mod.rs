//! Utility functions for building test signals.
//!
//! - [`generation`] - sine/cosine tone synthesis and time axes

pub mod generation;

pub use generation::*;
