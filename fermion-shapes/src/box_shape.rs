//! Box shape: uniform sampling inside an axis-aligned box
//!
//! ```text
//! :start shape:
//!     library  = box
//!     box size = s            # cube, or: sx sy sz
//! :stop shape:
//! ```
//!
//! The box is centered on the local origin; position it with a `transform`
//! block.

use fermion_plugin::prelude::*;
use nalgebra::Vector3;
use rand::Rng;
use std::sync::{Arc, OnceLock};
use tracing::warn;

const LIBRARY: &str = "box";

pub struct BoxShape {
    half: Vector3<f64>,
    meta: ShapeMeta,
}

impl BoxShape {
    pub fn new(size: Vector3<f64>) -> Self {
        Self {
            half: size / 2.0,
            meta: ShapeMeta::default(),
        }
    }
}

impl Shape for BoxShape {
    fn sample_local(&self, rng: &mut dyn RngCore) -> Vector3<f64> {
        Vector3::new(
            rng.gen_range(-self.half.x..=self.half.x),
            rng.gen_range(-self.half.y..=self.half.y),
            rng.gen_range(-self.half.z..=self.half.z),
        )
    }

    fn contains_local(&self, p: Vector3<f64>) -> bool {
        p.x.abs() <= self.half.x && p.y.abs() <= self.half.y && p.z.abs() <= self.half.z
    }

    fn meta(&self) -> &ShapeMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut ShapeMeta {
        &mut self.meta
    }
}

pub struct BoxPlugin;

impl ShapePlugin for BoxPlugin {
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
                            "box size",
                            "Edge length (one number for a cube, or sx sy sz).",
                        )),
                )
            })
            .clone()
    }

    fn example(&self) -> &'static str {
        r#"
# Example of a box shape
:start shape:
    library  = box
    box size = 1 2 3
:stop shape:
"#
    }

    fn create(
        &self,
        input: &mut Input,
        _factory: &ShapeFactory,
    ) -> Result<Box<dyn Shape>, ShapeError> {
        self.schema().check(input)?;
        let values = input.get_floats("box size")?;
        let size = match values.as_slice() {
            [s] => Vector3::new(*s, *s, *s),
            [x, y, z] => Vector3::new(*x, *y, *z),
            other => {
                warn!("createShape(box): wrong 'box size' input");
                return Err(ShapeError::invalid(
                    "box size",
                    format!("expected 1 or 3 numbers, got {}", other.len()),
                ));
            }
        };
        if size.iter().any(|s| *s <= 0.0) {
            warn!("createShape(box): non-positive 'box size'");
            return Err(ShapeError::invalid("box size", "sizes must be positive"));
        }
        Ok(Box::new(BoxShape::new(size)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn samples_stay_inside() {
        let shape = BoxShape::new(Vector3::new(2.0, 4.0, 6.0));
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let p = shape.sample(&mut rng);
            assert!(shape.contains(p), "sampled point {p:?} escaped the box");
        }
    }

    #[test]
    fn cube_from_single_size() {
        let factory = ShapeFactory::new();
        let mut input = Input::new("shape")
            .with_entry("library", "box")
            .with_entry("box size", "2");
        let shape = BoxPlugin.create(&mut input, &factory).unwrap();
        assert!(shape.contains(Vector3::new(0.9, -0.9, 0.9)));
        assert!(!shape.contains(Vector3::new(1.1, 0.0, 0.0)));
    }

    #[test]
    fn rejects_two_sizes() {
        let factory = ShapeFactory::new();
        let mut input = Input::new("shape")
            .with_entry("library", "box")
            .with_entry("box size", "1 2");
        assert!(matches!(
            BoxPlugin.create(&mut input, &factory),
            Err(ShapeError::InvalidConfiguration { field, .. }) if field == "box size"
        ));
    }

    #[test]
    fn rejects_negative_size() {
        let factory = ShapeFactory::new();
        let mut input = Input::new("shape")
            .with_entry("library", "box")
            .with_entry("box size", "-1");
        assert!(BoxPlugin.create(&mut input, &factory).is_err());
    }
}
