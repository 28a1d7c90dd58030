//! Shape traits and handles

use crate::ShapeError;
use fermion_core::{Input, Transform};
use nalgebra::Vector3;
use rand::RngCore;
use std::sync::Arc;

/// Shared metadata every shape carries: an optional display name and an
/// optional spatial transform, both set once after construction.
#[derive(Debug, Clone, Default)]
pub struct ShapeMeta {
    pub name: Option<String>,
    pub transform: Option<Transform>,
}

/// The polymorphic shape capability set.
///
/// Implementors supply local-frame sampling and containment plus access to
/// their `ShapeMeta`; the world-frame `sample`/`contains` wrappers apply the
/// stored transform and are shared by every shape.
///
/// Sampling draws from a caller-provided random source, so seeded runs stay
/// reproducible and a shape never holds private RNG state.
pub trait Shape: Send + Sync {
    /// Sample a point in the shape's local frame.
    fn sample_local(&self, rng: &mut dyn RngCore) -> Vector3<f64>;

    /// Containment test in the shape's local frame.
    fn contains_local(&self, p: Vector3<f64>) -> bool;

    fn meta(&self) -> &ShapeMeta;
    fn meta_mut(&mut self) -> &mut ShapeMeta;

    /// Sample a point in world coordinates.
    fn sample(&self, rng: &mut dyn RngCore) -> Vector3<f64> {
        let p = self.sample_local(rng);
        match &self.meta().transform {
            Some(t) => t.apply(p),
            None => p,
        }
    }

    /// Containment test in world coordinates.
    fn contains(&self, p: Vector3<f64>) -> bool {
        let local = match &self.meta().transform {
            Some(t) => t.apply_inverse(p),
            None => p,
        };
        self.contains_local(local)
    }

    fn name(&self) -> Option<&str> {
        self.meta().name.as_deref()
    }
}

impl std::fmt::Debug for dyn Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shape").field("meta", self.meta()).finish_non_exhaustive()
    }
}

/// Read the shared post-construction inputs (`name` key, `transform` block)
/// and store them on the shape. Both are optional; a malformed transform
/// block is a configuration error.
pub fn apply_common_inputs(shape: &mut dyn Shape, input: &Input) -> Result<(), ShapeError> {
    if let Ok(name) = input.get_string("name") {
        shape.meta_mut().name = Some(name.to_string());
    }
    if let Some(transform) = Transform::from_input(input)? {
        shape.meta_mut().transform = Some(transform);
    }
    Ok(())
}

/// A resolved inner shape, tagged with its provenance.
///
/// `Owned` comes from inline construction: the holder is sole owner and the
/// shape is dropped with it. `Shared` comes from a registry lookup: the
/// holder keeps a reference and the registry (or other holders) keep the
/// shape alive.
pub enum InnerShape {
    Owned(Box<dyn Shape>),
    Shared(Arc<dyn Shape>),
}

impl InnerShape {
    pub fn as_shape(&self) -> &dyn Shape {
        match self {
            Self::Owned(s) => s.as_ref(),
            Self::Shared(s) => s.as_ref(),
        }
    }

    pub fn is_owned(&self) -> bool {
        matches!(self, Self::Owned(_))
    }
}

impl std::fmt::Debug for InnerShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = if self.is_owned() { "Owned" } else { "Shared" };
        write!(f, "InnerShape::{tag}({:?})", self.as_shape().name())
    }
}
