use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Div, Mul, Neg, Sub};

use approx::{AbsDiffEq, RelativeEq, UlpsEq};
use serde::{Deserialize, Serialize};

use super::vector2d::winding_sum;
use super::{index_error, split, write_f64, Vector2d, Vector3f};
use crate::error::{MathError, Result};
use crate::math::quantize::{hash_f64, key_f64};
use crate::math::scalar::{
    annihilating_mul, clamp, clamp01, divide, exact_difference, EPSILON_E10, EPSILON_E14, RAD2DEG,
};

/// Three-component double-precision vector.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Vector3d {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3d {
    pub const ZERO: Self = Self::splat(0.0);
    pub const ONE: Self = Self::splat(1.0);
    pub const UP: Self = Self::new(0.0, 1.0, 0.0);
    pub const DOWN: Self = Self::new(0.0, -1.0, 0.0);
    pub const RIGHT: Self = Self::new(1.0, 0.0, 0.0);
    pub const LEFT: Self = Self::new(-1.0, 0.0, 0.0);
    pub const FORWARD: Self = Self::new(0.0, 0.0, 1.0);
    pub const BACK: Self = Self::new(0.0, 0.0, -1.0);
    pub const MAX: Self = Self::splat(f64::MAX);
    pub const MIN: Self = Self::splat(f64::MIN);
    pub const POSITIVE_INFINITY: Self = Self::splat(f64::INFINITY);
    pub const NEGATIVE_INFINITY: Self = Self::splat(f64::NEG_INFINITY);
    pub const NAN: Self = Self::splat(f64::NAN);

    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[must_use]
    pub const fn splat(value: f64) -> Self {
        Self {
            x: value,
            y: value,
            z: value,
        }
    }

    /// Returns the component at `index` (0 = x, 1 = y, 2 = z).
    ///
    /// # Errors
    ///
    /// Returns `MathError::IndexOutOfRange` if `index > 2`.
    pub fn get(&self, index: usize) -> Result<f64> {
        match index {
            0 => Ok(self.x),
            1 => Ok(self.y),
            2 => Ok(self.z),
            _ => Err(index_error("Vector3d", index, 3)),
        }
    }

    #[must_use]
    pub fn high(&self) -> Vector3f {
        Vector3f::new(split(self.x).0, split(self.y).0, split(self.z).0)
    }

    #[must_use]
    pub fn low(&self) -> Vector3f {
        Vector3f::new(split(self.x).1, split(self.y).1, split(self.z).1)
    }

    #[must_use]
    pub fn from_high_low(high: Vector3f, low: Vector3f) -> Self {
        high.to_f64() + low.to_f64()
    }

    #[must_use]
    pub fn min_component(&self) -> f64 {
        self.x.min(self.y.min(self.z))
    }

    #[must_use]
    pub fn max_component(&self) -> f64 {
        self.x.max(self.y.max(self.z))
    }

    #[must_use]
    pub fn magnitude(&self) -> f64 {
        self.sqr_magnitude().sqrt()
    }

    #[must_use]
    pub fn sqr_magnitude(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Unit vector in this direction, or [`Self::ZERO`] when the magnitude is
    /// zero or not finite.
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

    pub fn normalize(&mut self) {
        self.normalise();
    }

    #[must_use]
    pub fn xy(&self) -> Vector2d {
        Vector2d::new(self.x, self.y)
    }

    #[must_use]
    pub fn xz(&self) -> Vector2d {
        Vector2d::new(self.x, self.z)
    }

    #[must_use]
    pub fn yx(&self) -> Vector2d {
        Vector2d::new(self.y, self.x)
    }

    #[must_use]
    pub fn yz(&self) -> Vector2d {
        Vector2d::new(self.y, self.z)
    }

    #[must_use]
    pub fn zx(&self) -> Vector2d {
        Vector2d::new(self.z, self.x)
    }

    #[must_use]
    pub fn zy(&self) -> Vector2d {
        Vector2d::new(self.z, self.y)
    }

    #[must_use]
    pub fn xyz(&self) -> Self {
        *self
    }

    #[must_use]
    pub fn xzy(&self) -> Self {
        Self::new(self.x, self.z, self.y)
    }

    #[must_use]
    pub fn yxz(&self) -> Self {
        Self::new(self.y, self.x, self.z)
    }

    #[must_use]
    pub fn yzx(&self) -> Self {
        Self::new(self.y, self.z, self.x)
    }

    #[must_use]
    pub fn zyx(&self) -> Self {
        Self::new(self.z, self.y, self.x)
    }

    #[must_use]
    pub fn zxy(&self) -> Self {
        Self::new(self.z, self.x, self.y)
    }

    #[must_use]
    pub fn is_nan(&self) -> bool {
        self.x.is_nan() || self.y.is_nan() || self.z.is_nan()
    }

    #[must_use]
    pub fn component_multiply(&self, other: Self) -> Self {
        Self::new(self.x * other.x, self.y * other.y, self.z * other.z)
    }

    /// Alias of [`Self::component_multiply`].
    #[must_use]
    pub fn scale(&self, other: Self) -> Self {
        self.component_multiply(other)
    }

    /// Component-wise quotient under the kernel division rule.
    #[must_use]
    pub fn component_divide(&self, other: Self) -> Self {
        Self::new(
            divide(self.x, other.x),
            divide(self.y, other.y),
            divide(self.z, other.z),
        )
    }

    #[must_use]
    pub fn distance(&self, other: Self) -> f64 {
        (*self - other).magnitude()
    }

    #[must_use]
    pub fn abs(&self) -> Self {
        Self::new(self.x.abs(), self.y.abs(), self.z.abs())
    }

    #[must_use]
    pub fn component_distance(&self, other: Self) -> Self {
        (*self - other).abs()
    }

    #[must_use]
    pub fn midpoint(&self, other: Self) -> Self {
        (*self + other) * 0.5
    }

    #[must_use]
    pub fn max(&self, other: Self) -> Self {
        Self::new(self.x.max(other.x), self.y.max(other.y), self.z.max(other.z))
    }

    #[must_use]
    pub fn min(&self, other: Self) -> Self {
        Self::new(self.x.min(other.x), self.y.min(other.y), self.z.min(other.z))
    }

    #[must_use]
    pub fn pow(&self, power: f64) -> Self {
        Self::new(self.x.powf(power), self.y.powf(power), self.z.powf(power))
    }

    #[must_use]
    pub fn dot(&self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product.
    ///
    /// Zero factors annihilate infinite ones, so `(inf, 0, 0) x (0, inf, 0)`
    /// is `(0, 0, inf)`. Finite parallel or anti-parallel operands give
    /// exactly [`Self::ZERO`].
    #[must_use]
    pub fn cross(&self, other: Self) -> Self {
        let product = |p: f64, q: f64, r: f64, s: f64| {
            exact_difference(annihilating_mul(p, q), annihilating_mul(r, s))
        };
        let c = Self::new(
            product(self.y, other.z, self.z, other.y),
            product(self.z, other.x, self.x, other.z),
            product(self.x, other.y, self.y, other.x),
        );
        if let (Some(u), Some(v)) = (self.scaled_to_unit_max(), other.scaled_to_unit_max()) {
            let n = Self::new(
                u.y * v.z - u.z * v.y,
                u.z * v.x - u.x * v.z,
                u.x * v.y - u.y * v.x,
            );
            if n.magnitude() <= EPSILON_E14 * u.magnitude() * v.magnitude() {
                return Self::ZERO;
            }
        }
        c
    }

    /// Divides by the largest absolute component so the parallel test
    /// cannot overflow. `None` for zero or non-finite vectors.
    fn scaled_to_unit_max(&self) -> Option<Self> {
        let scale = self.x.abs().max(self.y.abs()).max(self.z.abs());
        (scale > 0.0 && scale.is_finite())
            .then(|| Self::new(self.x / scale, self.y / scale, self.z / scale))
    }

    /// Unsigned angle between the two vectors in degrees.
    #[must_use]
    pub fn angle(&self, other: Self) -> f64 {
        clamp(self.normalised().dot(other.normalised()), -1.0, 1.0).acos() * RAD2DEG
    }

    /// Rotates around `axis` by `angle` degrees (right-handed).
    ///
    /// # Errors
    ///
    /// Returns `MathError::Arithmetic` if `axis` is the zero vector.
    pub fn rotate(&self, axis: Self, angle: f64) -> Result<Self> {
        if axis == Self::ZERO {
            return Err(MathError::Arithmetic("rotation axis is the zero vector".into()).into());
        }
        let Self { x: u, y: v, z: w } = axis;
        let (sin, cos) = angle.to_radians().sin_cos();
        let ms = axis.sqr_magnitude();
        let m = ms.sqrt();
        let along = u * self.x + v * self.y + w * self.z;

        let x = (u * along
            + (self.x * (v * v + w * w) - u * (v * self.y + w * self.z)) * cos
            + m * (-w * self.y + v * self.z) * sin)
            / ms;
        let y = (v * along
            + (self.y * (u * u + w * w) - v * (u * self.x + w * self.z)) * cos
            + m * (w * self.x - u * self.z) * sin)
            / ms;
        let z = (w * along
            + (self.z * (u * u + v * v) - w * (u * self.x + v * self.y)) * cos
            + m * (-v * self.x + u * self.y) * sin)
            / ms;
        Ok(Self::new(x, y, z))
    }

    /// Linear interpolation with `t` clamped to `[0, 1]`.
    #[must_use]
    pub fn lerp(&self, other: Self, t: f64) -> Self {
        let t = clamp01(t);
        *self + (other - *self) * t
    }

    /// Returns `true` if this point lies on the segment `[a, b]`.
    #[must_use]
    pub fn lies_between(&self, a: Self, b: Self) -> bool {
        self.time_between(a, b).is_ok()
    }

    /// Parameter `t` in `[0, 1]` at which this point lies on `[a, b]`.
    ///
    /// # Errors
    ///
    /// Returns `MathError::Arithmetic` if the point is off the segment or the
    /// segment is degenerate.
    pub fn time_between(&self, a: Self, b: Self) -> Result<f64> {
        if *self == a {
            return Ok(0.0);
        }
        if *self == b {
            return Ok(1.0);
        }
        let ab = b - a;
        let length_sq = ab.sqr_magnitude();
        let ap = *self - a;
        let t = ap.dot(ab) / length_sq;
        let residual = (ap - ab * t).magnitude();
        if length_sq > 0.0
            && (0.0..=1.0).contains(&t)
            && residual <= EPSILON_E10 * ab.magnitude().max(1.0)
        {
            Ok(t)
        } else {
            Err(MathError::Arithmetic(format!(
                "point {self} does not lie on segment {a} -> {b}"
            ))
            .into())
        }
    }

    /// Returns `true` if every point lies in the plane of the first three.
    ///
    /// Three or fewer points are always coplanar.
    #[must_use]
    pub fn coplanar(points: &[Self]) -> bool {
        if points.len() < 4 {
            return true;
        }
        let origin = points[0];
        let normal = (points[1] - origin).cross(points[2] - origin);
        let normal_length = normal.magnitude();
        points[3..].iter().all(|p| {
            let offset = *p - origin;
            offset.dot(normal).abs() <= EPSILON_E10 * offset.magnitude() * normal_length
        })
    }

    /// Winding of the ring projected onto the xy plane.
    ///
    /// # Errors
    ///
    /// Returns `MathError::InsufficientPoints` for fewer than 3 points.
    pub fn clockwise(points: &[Self]) -> Result<bool> {
        let projected: Vec<Vector2d> = points.iter().map(Self::xy).collect();
        Ok(winding_sum(&projected)? > 0.0)
    }

    /// Convexity of the chain projected onto the xy plane.
    ///
    /// # Errors
    ///
    /// Returns `MathError::InsufficientPoints` for fewer than 3 points.
    pub fn convex(points: &[Self]) -> Result<bool> {
        let projected: Vec<Vector2d> = points.iter().map(Self::xy).collect();
        Vector2d::convex(&projected)
    }

    /// Position of `point` relative to `anchor`, scaled by `scale`.
    #[must_use]
    pub fn relative(anchor: Self, point: Self, scale: f64) -> Self {
        (point - anchor) * scale
    }
}

impl From<Vector2d> for Vector3d {
    fn from(v: Vector2d) -> Self {
        Self::new(v.x, v.y, 0.0)
    }
}

impl From<[f64; 3]> for Vector3d {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<Vector3d> for [f64; 3] {
    fn from(v: Vector3d) -> Self {
        [v.x, v.y, v.z]
    }
}

impl PartialEq for Vector3d {
    fn eq(&self, other: &Self) -> bool {
        key_f64(self.x) == key_f64(other.x)
            && key_f64(self.y) == key_f64(other.y)
            && key_f64(self.z) == key_f64(other.z)
    }
}

impl Eq for Vector3d {}

impl Hash for Vector3d {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_f64(self.x, state);
        hash_f64(self.y, state);
        hash_f64(self.z, state);
    }
}

impl fmt::Display for Vector3d {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in [self.x, self.y, self.z].into_iter().enumerate() {
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

impl Neg for Vector3d {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl Add for Vector3d {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vector3d {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vector3d {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Mul<Vector3d> for f64 {
    type Output = Vector3d;

    fn mul(self, rhs: Vector3d) -> Vector3d {
        rhs * self
    }
}

impl Div<f64> for Vector3d {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        Self::new(divide(self.x, rhs), divide(self.y, rhs), divide(self.z, rhs))
    }
}

impl Div<Vector3d> for f64 {
    type Output = Vector3d;

    fn div(self, rhs: Vector3d) -> Vector3d {
        Vector3d::new(divide(self, rhs.x), divide(self, rhs.y), divide(self, rhs.z))
    }
}

impl AbsDiffEq for Vector3d {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && self.z.abs_diff_eq(&other.z, epsilon)
    }
}

impl RelativeEq for Vector3d {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
            && self.z.relative_eq(&other.z, epsilon, max_relative)
    }
}

impl UlpsEq for Vector3d {
    fn default_max_ulps() -> u32 {
        f64::default_max_ulps()
    }

    fn ulps_eq(&self, other: &Self, epsilon: f64, max_ulps: u32) -> bool {
        self.x.ulps_eq(&other.x, epsilon, max_ulps)
            && self.y.ulps_eq(&other.y, epsilon, max_ulps)
            && self.z.ulps_eq(&other.z, epsilon, max_ulps)
    }
}
