use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Div, Mul, Neg, Sub};

use approx::{AbsDiffEq, RelativeEq, UlpsEq};
use serde::{Deserialize, Serialize};

use super::{index_error, split, write_f64, Vector3d, Vector4f};
use crate::error::Result;
use crate::math::quantize::{hash_f64, key_f64};
use crate::math::scalar::divide;

/// Four-component double-precision vector, mostly used as a homogeneous
/// coordinate.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Vector4d {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Vector4d {
    pub const ZERO: Self = Self::splat(0.0);
    pub const ONE: Self = Self::splat(1.0);
    pub const MAX: Self = Self::splat(f64::MAX);
    pub const MIN: Self = Self::splat(f64::MIN);
    pub const POSITIVE_INFINITY: Self = Self::splat(f64::INFINITY);
    pub const NEGATIVE_INFINITY: Self = Self::splat(f64::NEG_INFINITY);
    pub const NAN: Self = Self::splat(f64::NAN);

    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    #[must_use]
    pub const fn splat(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    /// Extends a 3D vector with a `w` component.
    #[must_use]
    pub const fn from_vector3(v: Vector3d, w: f64) -> Self {
        Self::new(v.x, v.y, v.z, w)
    }

    /// Returns the component at `index`.
    ///
    /// # Errors
    ///
    /// Returns `MathError::IndexOutOfRange` if `index > 3`.
    pub fn get(&self, index: usize) -> Result<f64> {
        match index {
            0 => Ok(self.x),
            1 => Ok(self.y),
            2 => Ok(self.z),
            3 => Ok(self.w),
            _ => Err(index_error("Vector4d", index, 4)),
        }
    }

    #[must_use]
    pub fn high(&self) -> Vector4f {
        Vector4f::new(
            split(self.x).0,
            split(self.y).0,
            split(self.z).0,
            split(self.w).0,
        )
    }

    #[must_use]
    pub fn low(&self) -> Vector4f {
        Vector4f::new(
            split(self.x).1,
            split(self.y).1,
            split(self.z).1,
            split(self.w).1,
        )
    }

    #[must_use]
    pub fn from_high_low(high: Vector4f, low: Vector4f) -> Self {
        high.to_f64() + low.to_f64()
    }

    #[must_use]
    pub fn magnitude(&self) -> f64 {
        self.sqr_magnitude().sqrt()
    }

    #[must_use]
    pub fn sqr_magnitude(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w
    }

    #[must_use]
    pub fn normalised(&self) -> Self {
        let magnitude = self.magnitude();
        if magnitude == 0.0 || !magnitude.is_finite() {
            return Self::ZERO;
        }
        *self / magnitude
    }

    pub fn normalise(&mut self) {
        *self = self.normalised();
    }

    #[must_use]
    pub fn xyz(&self) -> Vector3d {
        Vector3d::new(self.x, self.y, self.z)
    }

    #[must_use]
    pub fn is_nan(&self) -> bool {
        self.x.is_nan() || self.y.is_nan() || self.z.is_nan() || self.w.is_nan()
    }

    #[must_use]
    pub fn dot(&self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    fn components(&self) -> [f64; 4] {
        [self.x, self.y, self.z, self.w]
    }
}

impl PartialEq for Vector4d {
    fn eq(&self, other: &Self) -> bool {
        self.components()
            .iter()
            .zip(other.components().iter())
            .all(|(a, b)| key_f64(*a) == key_f64(*b))
    }
}

impl Eq for Vector4d {}

impl Hash for Vector4d {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for value in self.components() {
            hash_f64(value, state);
        }
    }
}

impl fmt::Display for Vector4d {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.components().into_iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            f.write_str("[")?;
            write_f64(f, value)?;
            f.write_str("]d")?;
        }
        Ok(())
    }
}

impl Neg for Vector4d {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, -self.w)
    }
}

impl Add for Vector4d {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.x + rhs.x,
            self.y + rhs.y,
            self.z + rhs.z,
            self.w + rhs.w,
        )
    }
}

impl Sub for Vector4d {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(
            self.x - rhs.x,
            self.y - rhs.y,
            self.z - rhs.z,
            self.w - rhs.w,
        )
    }
}

impl Mul<f64> for Vector4d {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs, self.w * rhs)
    }
}

impl Mul<Vector4d> for f64 {
    type Output = Vector4d;

    fn mul(self, rhs: Vector4d) -> Vector4d {
        rhs * self
    }
}

impl Div<f64> for Vector4d {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        Self::new(
            divide(self.x, rhs),
            divide(self.y, rhs),
            divide(self.z, rhs),
            divide(self.w, rhs),
        )
    }
}

impl Div<Vector4d> for f64 {
    type Output = Vector4d;

    fn div(self, rhs: Vector4d) -> Vector4d {
        Vector4d::new(
            divide(self, rhs.x),
            divide(self, rhs.y),
            divide(self, rhs.z),
            divide(self, rhs.w),
        )
    }
}

impl AbsDiffEq for Vector4d {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.components()
            .iter()
            .zip(other.components().iter())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl RelativeEq for Vector4d {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.components()
            .iter()
            .zip(other.components().iter())
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}

impl UlpsEq for Vector4d {
    fn default_max_ulps() -> u32 {
        f64::default_max_ulps()
    }

    fn ulps_eq(&self, other: &Self, epsilon: f64, max_ulps: u32) -> bool {
        self.components()
            .iter()
            .zip(other.components().iter())
            .all(|(a, b)| a.ulps_eq(b, epsilon, max_ulps))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::math::scalar::EPSILON_E13;

    #[test]
    fn homogeneous_extension() {
        let v = Vector4d::from_vector3(Vector3d::new(1.0, 2.0, 3.0), 1.0);
        assert_eq!(v.xyz(), Vector3d::new(1.0, 2.0, 3.0));
        assert!((v.get(3).unwrap() - 1.0).abs() < f64::EPSILON);
        assert!(v.get(4).is_err());
    }

    #[test]
    fn high_low_round_trip() {
        let v = Vector4d::new(40_075_017.000_123, -1.0 / 7.0, 1e-5, 0.0);
        let rebuilt = Vector4d::from_high_low(v.high(), v.low());
        assert_relative_eq!(rebuilt, v, max_relative = EPSILON_E13);
    }

    #[test]
    fn arithmetic_and_display() {
        let v = Vector4d::new(1.0, -2.0, 0.5, 4.0);
        assert_eq!(v + v, v * 2.0);
        assert_eq!(v - v, Vector4d::ZERO);
        assert!((Vector4d::ZERO / 0.0).is_nan());
        assert_eq!(
            1.0 / Vector4d::new(0.0, 2.0, -0.0, 4.0),
            Vector4d::new(f64::INFINITY, 0.5, f64::INFINITY, 0.25)
        );
        assert_eq!(v.to_string(), "[1]d,[-2]d,[0.5]d,[4]d");
        assert!((Vector4d::new(0.0, 0.0, 3.0, 4.0).magnitude() - 5.0).abs() < f64::EPSILON);
        assert_eq!(Vector4d::MAX.normalised(), Vector4d::ZERO);
    }
}
