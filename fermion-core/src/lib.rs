//! Fermion Core - Fundamental types
//!
//! This crate provides the core types used throughout Fermion:
//! - `Input`: Hierarchical configuration blocks with typed field extraction
//! - `Transform`: Affine shape transform (rotation + translation)
//! - `InputError`: Extraction and parse errors

mod error;
mod input;
mod transform;

pub use error::InputError;
pub use input::Input;
pub use transform::Transform;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{Input, InputError, Transform};
    pub use nalgebra::Vector3;
}
