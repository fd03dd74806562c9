//! Position/rotation/scale transforms and the parent-child hierarchy.

pub mod tree;

pub use tree::{TransformId, TransformTree};

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::matrix::Matrix4d;
use crate::quaternion::Quaterniond;
use crate::vector::Vector3d;

/// Reference frame for relative transform mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Space {
    /// The node's own axes.
    #[default]
    Local,
    /// The axes of the root frame.
    World,
}

/// Translation, rotation and non-uniform scale, applied as `T·R·S`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transformd {
    pub position: Vector3d,
    pub rotation: Quaterniond,
    pub scale: Vector3d,
}

impl Transformd {
    pub const IDENTITY: Self = Self {
        position: Vector3d::ZERO,
        rotation: Quaterniond::IDENTITY,
        scale: Vector3d::ONE,
    };

    #[must_use]
    pub const fn new(position: Vector3d, rotation: Quaterniond, scale: Vector3d) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    #[must_use]
    pub const fn from_translation(position: Vector3d) -> Self {
        Self::new(position, Quaterniond::IDENTITY, Vector3d::ONE)
    }

    #[must_use]
    pub const fn from_translation_rotation(position: Vector3d, rotation: Quaterniond) -> Self {
        Self::new(position, rotation, Vector3d::ONE)
    }

    #[must_use]
    pub fn matrix(&self) -> Matrix4d {
        Matrix4d::trs(self.position, self.rotation, self.scale)
    }

    /// Composes `self` as the parent of `child`.
    ///
    /// The result maps a point in the child's frame straight into the
    /// parent's parent frame, so `a.then(b).transform_point(p)` equals
    /// `a.transform_point(b.transform_point(p))` for uniform scales.
    #[must_use]
    pub fn then(&self, child: &Self) -> Self {
        Self {
            position: self.position
                + self.rotation * self.scale.component_multiply(child.position),
            rotation: self.rotation * child.rotation,
            scale: self.scale.component_multiply(child.scale),
        }
    }

    #[must_use]
    pub fn transform_point(&self, point: Vector3d) -> Vector3d {
        self.position + self.rotation * self.scale.component_multiply(point)
    }
}

impl Default for Transformd {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl fmt::Display for Transformd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "T({}) R({}) S({})",
            self.position, self.rotation, self.scale
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::math::scalar::EPSILON_E12;

    #[test]
    fn matrix_matches_point_transform() {
        let t = Transformd::new(
            Vector3d::new(1.0, -2.0, 3.0),
            Quaterniond::euler(15.0, 30.0, 45.0),
            Vector3d::new(2.0, 0.5, 1.5),
        );
        let p = Vector3d::new(0.25, 4.0, -1.0);
        assert_abs_diff_eq!(t.matrix() * p, t.transform_point(p), epsilon = EPSILON_E12);
    }

    #[test]
    fn composition_matches_nested_application() {
        let parent = Transformd::new(
            Vector3d::new(5.0, 0.0, 0.0),
            Quaterniond::axis_angle(Vector3d::UP, 90.0),
            Vector3d::splat(2.0),
        );
        let child = Transformd::from_translation_rotation(
            Vector3d::new(0.0, 1.0, 1.0),
            Quaterniond::axis_angle(Vector3d::RIGHT, 30.0),
        );
        let p = Vector3d::new(1.0, 2.0, 3.0);
        let composed = parent.then(&child);
        assert_abs_diff_eq!(
            composed.transform_point(p),
            parent.transform_point(child.transform_point(p)),
            epsilon = EPSILON_E12
        );
        assert_abs_diff_eq!(
            composed.matrix(),
            parent.matrix() * child.matrix(),
            epsilon = EPSILON_E12
        );
    }

    #[test]
    fn identity_is_neutral() {
        let t = Transformd::from_translation(Vector3d::new(3.0, 2.0, 1.0));
        assert_eq!(Transformd::IDENTITY.then(&t), t);
        assert_eq!(t.then(&Transformd::IDENTITY), t);
        assert_eq!(Transformd::default().matrix(), Matrix4d::IDENTITY);
    }
}
