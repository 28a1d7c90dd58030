//! Fermion Plugin System
//!
//! Provides the pieces a shape family needs to participate in
//! configuration-driven construction:
//! - The `Shape` capability trait (sampling, containment, metadata)
//! - Self-describing configuration schemas with lazy one-time build
//! - The `ShapeFactory`: recursive inline construction plus by-name lookup

mod error;
mod factory;
mod schema;
mod traits;

pub use error::ShapeError;
pub use factory::{ShapeFactory, ShapePlugin};
pub use schema::{shape_block_schema, BlockSchema, FieldSchema};
pub use traits::{apply_common_inputs, InnerShape, Shape, ShapeMeta};

/// Re-export core types for plugin authors
pub mod prelude {
    pub use crate::{
        apply_common_inputs, shape_block_schema, BlockSchema, FieldSchema, InnerShape, Shape,
        ShapeError, ShapeFactory, ShapeMeta, ShapePlugin,
    };
    pub use fermion_core::prelude::*;
    pub use rand::RngCore;
}
