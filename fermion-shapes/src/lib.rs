//! Fermion standard shapes
//!
//! The shape plugins shipped with Fermion:
//! - `point`: a single fixed position
//! - `box`: uniform sampling inside an axis-aligned box
//! - `sphere`: uniform sampling inside a ball
//! - `extended shape`: decorator stretching any shape along z

pub mod box_shape;
pub mod extended;
pub mod point;
pub mod sphere;

pub use box_shape::{BoxPlugin, BoxShape};
pub use extended::{ExtendedShape, ExtendedShapePlugin};
pub use point::{PointPlugin, PointShape};
pub use sphere::{SpherePlugin, SphereShape};

use fermion_plugin::ShapeFactory;

/// A factory with every standard shape family registered.
pub fn standard_factory() -> ShapeFactory {
    ShapeFactory::new()
        .with_plugin(PointPlugin)
        .with_plugin(BoxPlugin)
        .with_plugin(SpherePlugin)
        .with_plugin(ExtendedShapePlugin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fermion_core::Input;
    use fermion_plugin::{Shape, ShapeError};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    /// Route construction warnings to the test writer.
    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .try_init();
    }

    #[test]
    fn end_to_end_inline_definition() {
        init_tracing();
        let text = r#"
            :start shape:
                library = extended shape
                :start shape:
                    library  = point
                    position = 1 1 0
                :stop shape:
                extension = 2.0 5.0
            :stop shape:
        "#;
        let mut input = Input::parse(text).unwrap();
        let factory = standard_factory();
        let shape = factory.construct(&mut input).unwrap();

        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..100 {
            let p = shape.sample(&mut rng);
            assert_eq!((p.x, p.y), (1.0, 1.0));
            assert!((2.0..=5.0).contains(&p.z));
        }
    }

    #[test]
    fn end_to_end_reference_definition() {
        let mut factory = standard_factory();

        let mut base = Input::parse(
            ":start shape:\n library = point\n position = 0 0 0\n name = base\n:stop shape:",
        )
        .unwrap();
        let base: Arc<dyn Shape> = factory.construct_and_register(&mut base).unwrap();

        let mut ext = Input::parse(
            ":start shape:\n library = extended shape\n shape name = base\n extension = -1 1\n:stop shape:",
        )
        .unwrap();
        let shape = factory.construct(&mut ext).unwrap();

        let mut rng = StdRng::seed_from_u64(5);
        let p = shape.sample(&mut rng);
        assert_eq!((p.x, p.y), (0.0, 0.0));
        assert!((-1.0..=1.0).contains(&p.z));
        assert!(Arc::strong_count(&base) >= 2);
    }

    #[test]
    fn every_plugin_has_a_parsable_example() {
        let factory = standard_factory();
        for library in ["point", "box", "sphere"] {
            let example = factory.plugin(library).unwrap().example();
            let mut input = Input::parse(example).unwrap();
            assert!(
                factory.construct(&mut input).is_ok(),
                "example for '{library}' does not construct"
            );
        }
    }

    #[test]
    fn construction_failure_surfaces_as_error_not_panic() {
        init_tracing();
        let factory = standard_factory();
        let mut input = Input::parse(
            ":start shape:\n library = extended shape\n extension = 1\n:stop shape:",
        )
        .unwrap();
        assert!(matches!(
            factory.construct(&mut input).unwrap_err(),
            ShapeError::InvalidConfiguration { .. }
        ));
    }
}
