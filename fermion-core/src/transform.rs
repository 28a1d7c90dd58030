//! Affine shape transform
//!
//! Every shape may carry one rotation + translation applied to its sampled
//! points (and inverted for containment queries). Parsed from an optional
//! `transform` block:
//!
//! ```text
//! :start transform:
//!     translation = x y z
//!     rotation    = rx ry rz      # Euler angles in radians, optional
//! :stop transform:
//! ```

use crate::{Input, InputError};
use nalgebra::{Rotation3, Vector3};

#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    pub rotation: Rotation3<f64>,
    pub translation: Vector3<f64>,
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            rotation: Rotation3::identity(),
            translation: Vector3::zeros(),
        }
    }

    pub fn new(rotation: Rotation3<f64>, translation: Vector3<f64>) -> Self {
        Self {
            rotation,
            translation,
        }
    }

    /// Read a transform from a `transform` sub-block of `input`, if present.
    ///
    /// `Ok(None)` when the block is absent; `Err` when the block is present
    /// but malformed.
    pub fn from_input(input: &Input) -> Result<Option<Transform>, InputError> {
        let Some(block) = input.block("transform") else {
            return Ok(None);
        };
        let translation = match block.get_float_triple("translation") {
            Ok((x, y, z)) => Vector3::new(x, y, z),
            Err(e) if e.is_not_found() => Vector3::zeros(),
            Err(e) => return Err(e),
        };
        let rotation = match block.get_float_triple("rotation") {
            Ok((rx, ry, rz)) => Rotation3::from_euler_angles(rx, ry, rz),
            Err(e) if e.is_not_found() => Rotation3::identity(),
            Err(e) => return Err(e),
        };
        Ok(Some(Transform::new(rotation, translation)))
    }

    /// Map a point from shape-local coordinates to world coordinates.
    #[inline]
    pub fn apply(&self, p: Vector3<f64>) -> Vector3<f64> {
        self.rotation * p + self.translation
    }

    /// Map a world-space point back into shape-local coordinates.
    #[inline]
    pub fn apply_inverse(&self, p: Vector3<f64>) -> Vector3<f64> {
        self.rotation.inverse() * (p - self.translation)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
