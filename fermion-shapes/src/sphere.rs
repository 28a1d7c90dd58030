//! Sphere shape: uniform sampling inside a ball
//!
//! ```text
//! :start shape:
//!     library  = sphere
//!     midpoint = x y z        # optional, default origin
//!     radius   = r
//! :stop shape:
//! ```

use fermion_plugin::prelude::*;
use nalgebra::Vector3;
use rand::Rng;
use std::sync::{Arc, OnceLock};
use tracing::warn;

const LIBRARY: &str = "sphere";

pub struct SphereShape {
    center: Vector3<f64>,
    radius: f64,
    meta: ShapeMeta,
}

impl SphereShape {
    pub fn new(center: Vector3<f64>, radius: f64) -> Self {
        Self {
            center,
            radius,
            meta: ShapeMeta::default(),
        }
    }
}

impl Shape for SphereShape {
    fn sample_local(&self, rng: &mut dyn RngCore) -> Vector3<f64> {
        // Cube rejection; acceptance ~52%, fine for setup-time sources.
        loop {
            let p = Vector3::new(
                rng.gen_range(-1.0..=1.0),
                rng.gen_range(-1.0..=1.0),
                rng.gen_range(-1.0..=1.0),
            );
            if p.norm_squared() <= 1.0 {
                return self.center + p * self.radius;
            }
        }
    }

    fn contains_local(&self, p: Vector3<f64>) -> bool {
        (p - self.center).norm() <= self.radius
    }

    fn meta(&self) -> &ShapeMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut ShapeMeta {
        &mut self.meta
    }
}

pub struct SpherePlugin;

impl ShapePlugin for SpherePlugin {
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
                        .with_field(FieldSchema::required("radius", "Sphere radius, > 0."))
                        .with_field(FieldSchema::optional(
                            "midpoint",
                            "Sphere center (x y z), default origin.",
                        )),
                )
            })
            .clone()
    }

    fn example(&self) -> &'static str {
        r#"
# Example of a sphere shape
:start shape:
    library  = sphere
    midpoint = 0 0 0
    radius   = 1
:stop shape:
"#
    }

    fn create(
        &self,
        input: &mut Input,
        _factory: &ShapeFactory,
    ) -> Result<Box<dyn Shape>, ShapeError> {
        self.schema().check(input)?;
        let radius = input.get_float("radius")?;
        if radius <= 0.0 {
            warn!(radius, "createShape(sphere): non-positive 'radius'");
            return Err(ShapeError::invalid("radius", "radius must be positive"));
        }
        let center = match input.get_float_triple("midpoint") {
            Ok((x, y, z)) => Vector3::new(x, y, z),
            Err(e) if e.is_not_found() => Vector3::zeros(),
            Err(e) => {
                warn!("createShape(sphere): wrong 'midpoint' input");
                return Err(e.into());
            }
        };
        Ok(Box::new(SphereShape::new(center, radius)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn samples_stay_inside() {
        let shape = SphereShape::new(Vector3::new(1.0, 0.0, -1.0), 2.5);
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..1000 {
            let p = shape.sample(&mut rng);
            assert!(shape.contains(p));
        }
    }

    #[test]
    fn default_midpoint_is_origin() {
        let factory = ShapeFactory::new();
        let mut input = Input::new("shape")
            .with_entry("library", "sphere")
            .with_entry("radius", "1");
        let shape = SpherePlugin.create(&mut input, &factory).unwrap();
        assert!(shape.contains(Vector3::new(0.0, 0.0, 0.99)));
        assert!(!shape.contains(Vector3::new(0.0, 0.0, 1.01)));
    }

    #[test]
    fn rejects_zero_radius() {
        let factory = ShapeFactory::new();
        let mut input = Input::new("shape")
            .with_entry("library", "sphere")
            .with_entry("radius", "0");
        assert!(SpherePlugin.create(&mut input, &factory).is_err());
    }
}
