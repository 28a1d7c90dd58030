//! Point shape: a single fixed position
//!
//! ```text
//! :start shape:
//!     library  = point
//!     position = x y z
//! :stop shape:
//! ```

use fermion_plugin::prelude::*;
use nalgebra::Vector3;
use std::sync::{Arc, OnceLock};
use tracing::warn;

const LIBRARY: &str = "point";

pub struct PointShape {
    position: Vector3<f64>,
    meta: ShapeMeta,
}

impl PointShape {
    pub fn new(position: Vector3<f64>) -> Self {
        Self {
            position,
            meta: ShapeMeta::default(),
        }
    }
}

impl Shape for PointShape {
    fn sample_local(&self, _rng: &mut dyn RngCore) -> Vector3<f64> {
        self.position
    }

    fn contains_local(&self, p: Vector3<f64>) -> bool {
        (p - self.position).norm() < 1e-9
    }

    fn meta(&self) -> &ShapeMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut ShapeMeta {
        &mut self.meta
    }
}

pub struct PointPlugin;

impl ShapePlugin for PointPlugin {
    fn library(&self) -> &'static str {
        LIBRARY
    }

    fn schema(&self) -> Arc<BlockSchema> {
        static SCHEMA: OnceLock<Arc<BlockSchema>> = OnceLock::new();
        SCHEMA
            .get_or_init(|| {
                Arc::new(
                    BlockSchema::new("shape")
                        .with_field(
                            FieldSchema::required("library", "The shape family.")
                                .with_allowed(&[LIBRARY]),
                        )
                        .with_field(FieldSchema::required("position", "The point (x y z).")),
                )
            })
            .clone()
    }

    fn example(&self) -> &'static str {
        r#"
# Example of a point shape
:start shape:
    library  = point
    position = 0 0 0
:stop shape:
"#
    }

    fn create(
        &self,
        input: &mut Input,
        _factory: &ShapeFactory,
    ) -> Result<Box<dyn Shape>, ShapeError> {
        self.schema().check(input)?;
        let (x, y, z) = input.get_float_triple("position").map_err(|e| {
            warn!("createShape(point): wrong 'position' input");
            ShapeError::from(e)
        })?;
        Ok(Box::new(PointShape::new(Vector3::new(x, y, z))))
    }
}
