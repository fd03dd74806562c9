use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Div, Mul, Neg, Sub};

use approx::{AbsDiffEq, RelativeEq, UlpsEq};
use serde::{Deserialize, Serialize};

use super::{index_error, split, write_f64, Vector2f};
use crate::error::{MathError, Result};
use crate::math::quantize::{hash_f64, key_f64};
use crate::math::scalar::{
    annihilating_mul, clamp, clamp01, divide, epsilon_equals, exact_difference, sign, EPSILON,
    EPSILON_E10, EPSILON_E14, RAD2DEG,
};

/// Two-component double-precision vector.
///
/// Equality and hashing are quantized to 14 decimal places, so values that
/// differ only in representation noise compare equal and hash identically.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Vector2d {
    pub x: f64,
    pub y: f64,
}

impl Vector2d {
    pub const ZERO: Self = Self::splat(0.0);
    pub const ONE: Self = Self::splat(1.0);
    pub const UP: Self = Self::new(0.0, 1.0);
    pub const DOWN: Self = Self::new(0.0, -1.0);
    pub const RIGHT: Self = Self::new(1.0, 0.0);
    pub const LEFT: Self = Self::new(-1.0, 0.0);
    pub const MAX: Self = Self::splat(f64::MAX);
    pub const MIN: Self = Self::splat(f64::MIN);
    pub const POSITIVE_INFINITY: Self = Self::splat(f64::INFINITY);
    pub const NEGATIVE_INFINITY: Self = Self::splat(f64::NEG_INFINITY);
    pub const NAN: Self = Self::splat(f64::NAN);

    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Creates a vector with both components set to `value`.
    #[must_use]
    pub const fn splat(value: f64) -> Self {
        Self { x: value, y: value }
    }

    /// Returns the component at `index` (0 = x, 1 = y).
    ///
    /// # Errors
    ///
    /// Returns `MathError::IndexOutOfRange` if `index > 1`.
    pub fn get(&self, index: usize) -> Result<f64> {
        match index {
            0 => Ok(self.x),
            1 => Ok(self.y),
            _ => Err(index_error("Vector2d", index, 2)),
        }
    }

    /// Nearest single-precision representation of each component.
    #[must_use]
    pub fn high(&self) -> Vector2f {
        let (x, _) = split(self.x);
        let (y, _) = split(self.y);
        Vector2f::new(x, y)
    }

    /// Single-precision residual left after subtracting [`Self::high`].
    ///
    /// `high + low` reconstructs a finite component to within one ULP of the
    /// low term.
    #[must_use]
    pub fn low(&self) -> Vector2f {
        let (_, x) = split(self.x);
        let (_, y) = split(self.y);
        Vector2f::new(x, y)
    }

    /// Reconstructs a double-precision vector from a High/Low pair.
    #[must_use]
    pub fn from_high_low(high: Vector2f, low: Vector2f) -> Self {
        high.to_f64() + low.to_f64()
    }

    #[must_use]
    pub fn min_component(&self) -> f64 {
        self.x.min(self.y)
    }

    #[must_use]
    pub fn max_component(&self) -> f64 {
        self.x.max(self.y)
    }

    #[must_use]
    pub fn magnitude(&self) -> f64 {
        self.sqr_magnitude().sqrt()
    }

    #[must_use]
    pub fn sqr_magnitude(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Returns the unit vector in this direction.
    ///
    /// Yields [`Self::ZERO`] when the magnitude is zero or not finite, so
    /// overflow never leaks NaN into chains of unit-vector math.
    #[must_use]
    pub fn normalised(&self) -> Self {
        let magnitude = self.magnitude();
        if magnitude == 0.0 || !magnitude.is_finite() {
            return Self::ZERO;
        }
        *self / magnitude
    }

    /// Normalises the vector in place. See [`Self::normalised`].
    pub fn normalise(&mut self) {
        *self = self.normalised();
    }

    pub fn normalize(&mut self) {
        self.normalise();
    }

    /// Counter-clockwise perpendicular `(-y, x)`.
    #[must_use]
    pub fn perpendicular(&self) -> Self {
        Self::new(-self.y, self.x)
    }

    #[must_use]
    pub fn xy(&self) -> Self {
        *self
    }

    #[must_use]
    pub fn yx(&self) -> Self {
        Self::new(self.y, self.x)
    }

    /// Returns `true` if any component is NaN.
    #[must_use]
    pub fn is_nan(&self) -> bool {
        self.x.is_nan() || self.y.is_nan()
    }

    #[must_use]
    pub fn component_multiply(&self, other: Self) -> Self {
        Self::new(self.x * other.x, self.y * other.y)
    }

    /// Alias of [`Self::component_multiply`].
    #[must_use]
    pub fn scale(&self, other: Self) -> Self {
        self.component_multiply(other)
    }

    #[must_use]
    pub fn distance(&self, other: Self) -> f64 {
        (*self - other).magnitude()
    }

    #[must_use]
    pub fn abs(&self) -> Self {
        Self::new(self.x.abs(), self.y.abs())
    }

    /// Per-axis absolute distance.
    #[must_use]
    pub fn component_distance(&self, other: Self) -> Self {
        (*self - other).abs()
    }

    #[must_use]
    pub fn midpoint(&self, other: Self) -> Self {
        Self::new((self.x + other.x) * 0.5, (self.y + other.y) * 0.5)
    }

    #[must_use]
    pub fn max(&self, other: Self) -> Self {
        Self::new(self.x.max(other.x), self.y.max(other.y))
    }

    #[must_use]
    pub fn min(&self, other: Self) -> Self {
        Self::new(self.x.min(other.x), self.y.min(other.y))
    }

    #[must_use]
    pub fn pow(&self, power: f64) -> Self {
        Self::new(self.x.powf(power), self.y.powf(power))
    }

    #[must_use]
    pub fn dot(&self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Z component of the equivalent 3D cross product.
    ///
    /// A zero factor annihilates an infinite one and equal products cancel
    /// exactly, so `a.cross(a)` is always `0`. Finite parallel operands,
    /// scalar multiples included, give exactly `0`.
    #[must_use]
    pub fn cross(&self, other: Self) -> f64 {
        let c = exact_difference(
            annihilating_mul(self.x, other.y),
            annihilating_mul(self.y, other.x),
        );
        if let (Some(u), Some(v)) = (self.scaled_to_unit_max(), other.scaled_to_unit_max()) {
            let n = u.x * v.y - u.y * v.x;
            if n.abs() <= EPSILON_E14 * u.magnitude() * v.magnitude() {
                return 0.0;
            }
        }
        c
    }

    /// Divides by the largest absolute component so the parallel test
    /// cannot overflow. `None` for zero or non-finite vectors.
    fn scaled_to_unit_max(&self) -> Option<Self> {
        let scale = self.x.abs().max(self.y.abs());
        (scale > 0.0 && scale.is_finite()).then(|| Self::new(self.x / scale, self.y / scale))
    }

    /// Unsigned angle between the two vectors in degrees.
    #[must_use]
    pub fn angle(&self, other: Self) -> f64 {
        clamp(self.normalised().dot(other.normalised()), -1.0, 1.0).acos() * RAD2DEG
    }

    /// Angle from the positive x axis in degrees, `0` for the zero vector.
    #[must_use]
    pub fn polar_angle(&self) -> f64 {
        if epsilon_equals(self.x, 0.0) && epsilon_equals(self.y, 0.0) {
            return 0.0;
        }
        self.y.atan2(self.x) * RAD2DEG
    }

    /// Compass heading in degrees clockwise from north (+y).
    #[must_use]
    pub fn cardinal_heading(&self) -> f64 {
        if self.sqr_magnitude() < EPSILON {
            return 0.0;
        }
        (90.0 - self.polar_angle() + 360.0) % 360.0
    }

    /// Rotates counter-clockwise by `angle` degrees.
    #[must_use]
    pub fn rotate(&self, angle: f64) -> Self {
        let (sin, cos) = angle.to_radians().sin_cos();
        Self::new(cos * self.x - sin * self.y, cos * self.y + sin * self.x)
    }

    /// Linear interpolation with `t` clamped to `[0, 1]`.
    #[must_use]
    pub fn lerp(&self, other: Self, t: f64) -> Self {
        let t = clamp01(t);
        Self::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
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

    /// Shoelace area of a ring. Positive for counter-clockwise, negative for
    /// clockwise.
    #[must_use]
    pub fn signed_area(points: &[Self]) -> f64 {
        let n = points.len();
        if n < 3 {
            return 0.0;
        }
        let mut sum = 0.0;
        for i in 0..n {
            let j = (i + 1) % n;
            sum += points[i].x * points[j].y - points[j].x * points[i].y;
        }
        sum * 0.5
    }

    /// Returns `true` if the ring winds clockwise.
    ///
    /// The ring may be explicitly closed (last point equal to the first).
    ///
    /// # Errors
    ///
    /// Returns `MathError::InsufficientPoints` for fewer than 3 points.
    pub fn clockwise(points: &[Self]) -> Result<bool> {
        Ok(winding_sum(points)? > 0.0)
    }

    /// Returns `true` if every turn along the open chain bends the same way.
    ///
    /// # Errors
    ///
    /// Returns `MathError::InsufficientPoints` for fewer than 3 points.
    pub fn convex(points: &[Self]) -> Result<bool> {
        if points.len() < 3 {
            return Err(MathError::InsufficientPoints {
                required: 3,
                actual: points.len(),
            }
            .into());
        }
        let turn = |i: usize| sign((points[i - 1] - points[i]).cross(points[i + 1] - points[i]));
        let first = turn(1);
        Ok((2..points.len() - 1).all(|i| turn(i) == first))
    }
}

/// Sum of `(x1 - x0) * (y1 + y0)` over every edge, positive for clockwise.
pub(crate) fn winding_sum(points: &[Vector2d]) -> Result<f64> {
    let n = points.len();
    if n < 3 {
        return Err(MathError::InsufficientPoints {
            required: 3,
            actual: n,
        }
        .into());
    }
    let edge = |p0: Vector2d, p1: Vector2d| (p1.x - p0.x) * (p1.y + p0.y);
    let mut sum: f64 = points.windows(2).map(|w| edge(w[0], w[1])).sum();
    if points[0] != points[n - 1] {
        sum += edge(points[n - 1], points[0]);
    }
    Ok(sum)
}

impl PartialEq for Vector2d {
    fn eq(&self, other: &Self) -> bool {
        key_f64(self.x) == key_f64(other.x) && key_f64(self.y) == key_f64(other.y)
    }
}

impl Eq for Vector2d {}

impl Hash for Vector2d {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_f64(self.x, state);
        hash_f64(self.y, state);
    }
}

impl fmt::Display for Vector2d {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        write_f64(f, self.x)?;
        f.write_str("]d,[")?;
        write_f64(f, self.y)?;
        f.write_str("]d")
    }
}

impl Neg for Vector2d {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl Add for Vector2d {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector2d {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vector2d {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Mul<Vector2d> for f64 {
    type Output = Vector2d;

    fn mul(self, rhs: Vector2d) -> Vector2d {
        rhs * self
    }
}

impl Div<f64> for Vector2d {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        Self::new(divide(self.x, rhs), divide(self.y, rhs))
    }
}

impl Div<Vector2d> for f64 {
    type Output = Vector2d;

    fn div(self, rhs: Vector2d) -> Vector2d {
        Vector2d::new(divide(self, rhs.x), divide(self, rhs.y))
    }
}

impl From<[f64; 2]> for Vector2d {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

impl From<Vector2d> for [f64; 2] {
    fn from(v: Vector2d) -> Self {
        [v.x, v.y]
    }
}

impl AbsDiffEq for Vector2d {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon) && self.y.abs_diff_eq(&other.y, epsilon)
    }
}

impl RelativeEq for Vector2d {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
    }
}

impl UlpsEq for Vector2d {
    fn default_max_ulps() -> u32 {
        f64::default_max_ulps()
    }

    fn ulps_eq(&self, other: &Self, epsilon: f64, max_ulps: u32) -> bool {
        self.x.ulps_eq(&other.x, epsilon, max_ulps) && self.y.ulps_eq(&other.y, epsilon, max_ulps)
    }
}
