use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Mul, Neg, Sub};

use approx::{AbsDiffEq, RelativeEq, UlpsEq};
use serde::{Deserialize, Serialize};

use super::{components_eq, hash_components, write_rows};
use crate::error::Result;
use crate::math::scalar::{DEG2RAD, EPSILON};
use crate::vector::{index_error, Vector2d};

/// 2×2 matrix.
///
/// ```text
/// | a b |
/// | c d |
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Matrix2d {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl Matrix2d {
    pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0, 1.0);
    pub const ZERO: Self = Self::splat(0.0);
    pub const NAN: Self = Self::splat(f64::NAN);

    #[must_use]
    pub const fn new(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self { a, b, c, d }
    }

    const fn splat(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    /// Counter-clockwise rotation by `degrees`.
    #[must_use]
    pub fn rotation(degrees: f64) -> Self {
        let (sin, cos) = (degrees * DEG2RAD).sin_cos();
        Self::new(cos, -sin, sin, cos)
    }

    #[must_use]
    pub const fn from_array(m: [f64; 4]) -> Self {
        Self::new(m[0], m[1], m[2], m[3])
    }

    #[must_use]
    pub const fn to_array(&self) -> [f64; 4] {
        [self.a, self.b, self.c, self.d]
    }

    /// Returns the component at row-major `index`.
    ///
    /// # Errors
    ///
    /// Returns `MathError::IndexOutOfRange` if `index > 3`.
    pub fn get(&self, index: usize) -> Result<f64> {
        self.to_array()
            .get(index)
            .copied()
            .ok_or_else(|| index_error("Matrix2d", index, 4))
    }

    #[must_use]
    pub fn transpose(&self) -> Self {
        Self::new(self.a, self.c, self.b, self.d)
    }

    #[must_use]
    pub fn determinant(&self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    /// The inverse, or [`Matrix2d::NAN`] for a singular matrix.
    #[must_use]
    pub fn inverse(&self) -> Self {
        let det = self.determinant();
        if det.abs() < EPSILON {
            return Self::NAN;
        }
        Self::new(self.d, -self.b, -self.c, self.a) * (1.0 / det)
    }

    #[must_use]
    pub fn is_nan(&self) -> bool {
        self.to_array().iter().any(|v| v.is_nan())
    }

    fn map(self, f: impl Fn(f64) -> f64) -> Self {
        Self::from_array(self.to_array().map(f))
    }

    fn zip(self, other: Self, f: impl Fn(f64, f64) -> f64) -> Self {
        let (lhs, rhs) = (self.to_array(), other.to_array());
        Self::from_array(std::array::from_fn(|i| f(lhs[i], rhs[i])))
    }
}

impl Default for Matrix2d {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl PartialEq for Matrix2d {
    fn eq(&self, other: &Self) -> bool {
        components_eq(&self.to_array(), &other.to_array())
    }
}

impl Eq for Matrix2d {}

impl Hash for Matrix2d {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_components(&self.to_array(), state);
    }
}

impl fmt::Display for Matrix2d {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_rows(f, &self.to_array(), 2)
    }
}

impl Neg for Matrix2d {
    type Output = Self;

    fn neg(self) -> Self {
        self.map(|v| -v)
    }
}

impl Add for Matrix2d {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| a + b)
    }
}

impl Add<f64> for Matrix2d {
    type Output = Self;

    fn add(self, rhs: f64) -> Self {
        self.map(|v| v + rhs)
    }
}

impl Add<Matrix2d> for f64 {
    type Output = Matrix2d;

    fn add(self, rhs: Matrix2d) -> Matrix2d {
        rhs.map(|v| self + v)
    }
}

impl Sub for Matrix2d {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| a - b)
    }
}

impl Sub<f64> for Matrix2d {
    type Output = Self;

    fn sub(self, rhs: f64) -> Self {
        self.map(|v| v - rhs)
    }
}

impl Sub<Matrix2d> for f64 {
    type Output = Matrix2d;

    fn sub(self, rhs: Matrix2d) -> Matrix2d {
        rhs.map(|v| self - v)
    }
}

impl Mul<f64> for Matrix2d {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        self.map(|v| v * rhs)
    }
}

impl Mul<Matrix2d> for f64 {
    type Output = Matrix2d;

    fn mul(self, rhs: Matrix2d) -> Matrix2d {
        rhs.map(|v| self * v)
    }
}

impl Mul for Matrix2d {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.a * rhs.a + self.b * rhs.c,
            self.a * rhs.b + self.b * rhs.d,
            self.c * rhs.a + self.d * rhs.c,
            self.c * rhs.b + self.d * rhs.d,
        )
    }
}

impl Mul<Vector2d> for Matrix2d {
    type Output = Vector2d;

    fn mul(self, rhs: Vector2d) -> Vector2d {
        Vector2d::new(
            self.a * rhs.x + self.b * rhs.y,
            self.c * rhs.x + self.d * rhs.y,
        )
    }
}

impl AbsDiffEq for Matrix2d {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.to_array()
            .as_slice()
            .abs_diff_eq(other.to_array().as_slice(), epsilon)
    }
}

impl RelativeEq for Matrix2d {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.to_array()
            .as_slice()
            .relative_eq(other.to_array().as_slice(), epsilon, max_relative)
    }
}

impl UlpsEq for Matrix2d {
    fn default_max_ulps() -> u32 {
        f64::default_max_ulps()
    }

    fn ulps_eq(&self, other: &Self, epsilon: f64, max_ulps: u32) -> bool {
        self.to_array()
            .as_slice()
            .ulps_eq(other.to_array().as_slice(), epsilon, max_ulps)
    }
}
