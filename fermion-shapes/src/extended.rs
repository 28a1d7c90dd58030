//! Extended shape: stretch another shape along z
//!
//! A decorator over any other shape. Points are sampled from the inner
//! shape, then the z coordinate is replaced by a uniform draw from the
//! closed interval `[z1, z2]` given by the `extension` input. A planar
//! shape thereby becomes a volume source.
//!
//! The inner shape is given either inline (a nested `shape` block, which
//! the decorator then owns) or by reference (`shape name`, resolved against
//! the factory's registry and shared). An inline block always takes
//! precedence; a malformed inline block is a hard error, never a trigger
//! for name fallback.

use fermion_plugin::prelude::*;
use nalgebra::Vector3;
use rand::Rng;
use std::sync::{Arc, OnceLock};
use tracing::warn;

const LIBRARY: &str = "extended shape";

pub struct ExtendedShape {
    inner: InnerShape,
    z_min: f64,
    z_max: f64,
    meta: ShapeMeta,
}

impl ExtendedShape {
    /// Wrap `inner`, redrawing sampled z coordinates from `[z_min, z_max]`.
    pub fn new(inner: InnerShape, z_min: f64, z_max: f64) -> Self {
        Self {
            inner,
            z_min,
            z_max,
            meta: ShapeMeta::default(),
        }
    }

    pub fn interval(&self) -> (f64, f64) {
        (self.z_min, self.z_max)
    }

    pub fn inner(&self) -> &InnerShape {
        &self.inner
    }
}

impl Shape for ExtendedShape {
    fn sample_local(&self, rng: &mut dyn RngCore) -> Vector3<f64> {
        let mut p = self.inner.as_shape().sample(rng);
        p.z = rng.gen_range(self.z_min..=self.z_max);
        p
    }

    fn contains_local(&self, p: Vector3<f64>) -> bool {
        if p.z < self.z_min || p.z > self.z_max {
            return false;
        }
        // Normalize z to a fixed representative inside the interval before
        // asking the inner shape; its own z semantics stay out of the test.
        self.inner
            .as_shape()
            .contains(Vector3::new(p.x, p.y, self.z_min))
    }

    fn meta(&self) -> &ShapeMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut ShapeMeta {
        &mut self.meta
    }
}

pub struct ExtendedShapePlugin;

impl ShapePlugin for ExtendedShapePlugin {
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
                        .with_field(FieldSchema::required(
                            "extension",
                            "Interval (z1 z2) the sampled z coordinate is drawn from.",
                        ))
                        .with_field(FieldSchema::optional(
                            "shape name",
                            "Previously defined shape to extend, used when no inline shape block is given.",
                        ))
                        .with_block(shape_block_schema()),
                )
            })
            .clone()
    }

    fn example(&self) -> &'static str {
        r#"
# Example of an extended shape
:start shape:
    library = extended shape
    :start shape:
        definition of the shape to be extended
    :stop shape:
    extension = z1 z2
:stop shape:
"#
    }

    fn create(
        &self,
        input: &mut Input,
        factory: &ShapeFactory,
    ) -> Result<Box<dyn Shape>, ShapeError> {
        self.schema().check(input)?;

        let (z1, z2) = input.get_float_pair("extension").map_err(|e| {
            warn!("createShape(extended shape): wrong/missing 'extension' input");
            ShapeError::from(e)
        })?;
        if z1 > z2 {
            warn!(z1, z2, "createShape(extended shape): reversed 'extension' interval");
            return Err(ShapeError::invalid(
                "extension",
                format!("reversed interval: {z1} > {z2}"),
            ));
        }

        let inner = match input.take_block("shape") {
            Some(mut block) => {
                // An inline definition was given; if it does not resolve,
                // that is a hard failure, not a cue to try 'shape name'.
                let shape = factory.construct(&mut block).map_err(|e| {
                    warn!(error = %e, "createShape(extended shape): inline shape construction failed");
                    ShapeError::ShapeConstructionFailed {
                        reason: e.to_string(),
                    }
                })?;
                InnerShape::Owned(shape)
            }
            None => {
                let name = input.get_string("shape name").map_err(|_| {
                    warn!("createShape(extended shape): no inline shape definition and no 'shape name' input");
                    ShapeError::invalid(
                        "shape name",
                        "no inline shape definition and no 'shape name' input",
                    )
                })?;
                let shape = factory.lookup(name).ok_or_else(|| {
                    warn!(name, "createShape(extended shape): no such shape");
                    ShapeError::UnresolvedReference { name: name.into() }
                })?;
                InnerShape::Shared(shape)
            }
        };

        Ok(Box::new(ExtendedShape::new(inner, z1, z2)))
    }
}
