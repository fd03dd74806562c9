use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Mul, Neg, Sub};

use approx::{AbsDiffEq, RelativeEq, UlpsEq};
use serde::{Deserialize, Serialize};

use super::{components_eq, hash_components, write_rows, Matrix2d};
use crate::error::Result;
use crate::math::scalar::EPSILON;
use crate::vector::{index_error, Vector3d};

/// 3×3 matrix.
///
/// ```text
/// | a b c |
/// | d e f |
/// | g h i |
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Matrix3d {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
    pub g: f64,
    pub h: f64,
    pub i: f64,
}

impl Matrix3d {
    pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0);
    pub const ZERO: Self = Self::from_array([0.0; 9]);
    pub const NAN: Self = Self::from_array([f64::NAN; 9]);

    #[must_use]
    #[allow(clippy::too_many_arguments, clippy::many_single_char_names)]
    pub const fn new(
        a: f64,
        b: f64,
        c: f64,
        d: f64,
        e: f64,
        f: f64,
        g: f64,
        h: f64,
        i: f64,
    ) -> Self {
        Self {
            a,
            b,
            c,
            d,
            e,
            f,
            g,
            h,
            i,
        }
    }

    #[must_use]
    pub const fn from_array(m: [f64; 9]) -> Self {
        Self::new(m[0], m[1], m[2], m[3], m[4], m[5], m[6], m[7], m[8])
    }

    #[must_use]
    pub const fn to_array(&self) -> [f64; 9] {
        [
            self.a, self.b, self.c, self.d, self.e, self.f, self.g, self.h, self.i,
        ]
    }

    /// Returns the component at row-major `index`.
    ///
    /// # Errors
    ///
    /// Returns `MathError::IndexOutOfRange` if `index > 8`.
    pub fn get(&self, index: usize) -> Result<f64> {
        self.to_array()
            .get(index)
            .copied()
            .ok_or_else(|| index_error("Matrix3d", index, 9))
    }

    #[must_use]
    pub fn transpose(&self) -> Self {
        Self::new(
            self.a, self.d, self.g, self.b, self.e, self.h, self.c, self.f, self.i,
        )
    }

    /// Determinant by the rule of Sarrus.
    #[must_use]
    pub fn determinant(&self) -> f64 {
        self.a * self.e * self.i + self.b * self.f * self.g + self.c * self.d * self.h
            - self.c * self.e * self.g
            - self.b * self.d * self.i
            - self.a * self.f * self.h
    }

    /// The inverse, or [`Matrix3d::NAN`] for a singular matrix.
    #[must_use]
    #[allow(clippy::many_single_char_names)]
    pub fn inverse(&self) -> Self {
        let det = self.determinant();
        if det.abs() < EPSILON {
            return Self::NAN;
        }
        let Self {
            a,
            b,
            c,
            d,
            e,
            f,
            g,
            h,
            i,
        } = *self;
        let adjugate = Self::new(
            e * i - f * h,
            c * h - b * i,
            b * f - c * e,
            f * g - d * i,
            a * i - c * g,
            c * d - a * f,
            d * h - e * g,
            b * g - a * h,
            a * e - b * d,
        );
        adjugate * (1.0 / det)
    }

    /// Minor obtained by removing the first row and column.
    #[must_use]
    pub fn a_minor(&self) -> Matrix2d {
        Matrix2d::new(self.e, self.f, self.h, self.i)
    }

    /// Minor obtained by removing the first row and second column.
    #[must_use]
    pub fn b_minor(&self) -> Matrix2d {
        Matrix2d::new(self.d, self.f, self.g, self.i)
    }

    /// Minor obtained by removing the first row and third column.
    #[must_use]
    pub fn c_minor(&self) -> Matrix2d {
        Matrix2d::new(self.d, self.e, self.g, self.h)
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

impl Default for Matrix3d {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl PartialEq for Matrix3d {
    fn eq(&self, other: &Self) -> bool {
        components_eq(&self.to_array(), &other.to_array())
    }
}

impl Eq for Matrix3d {}

impl Hash for Matrix3d {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_components(&self.to_array(), state);
    }
}

impl fmt::Display for Matrix3d {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_rows(f, &self.to_array(), 3)
    }
}

impl Neg for Matrix3d {
    type Output = Self;

    fn neg(self) -> Self {
        self.map(|v| -v)
    }
}

impl Add for Matrix3d {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| a + b)
    }
}

impl Add<f64> for Matrix3d {
    type Output = Self;

    fn add(self, rhs: f64) -> Self {
        self.map(|v| v + rhs)
    }
}

impl Add<Matrix3d> for f64 {
    type Output = Matrix3d;

    fn add(self, rhs: Matrix3d) -> Matrix3d {
        rhs.map(|v| self + v)
    }
}

impl Sub for Matrix3d {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| a - b)
    }
}

impl Sub<f64> for Matrix3d {
    type Output = Self;

    fn sub(self, rhs: f64) -> Self {
        self.map(|v| v - rhs)
    }
}

impl Sub<Matrix3d> for f64 {
    type Output = Matrix3d;

    fn sub(self, rhs: Matrix3d) -> Matrix3d {
        rhs.map(|v| self - v)
    }
}

impl Mul<f64> for Matrix3d {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        self.map(|v| v * rhs)
    }
}

impl Mul<Matrix3d> for f64 {
    type Output = Matrix3d;

    fn mul(self, rhs: Matrix3d) -> Matrix3d {
        rhs.map(|v| self * v)
    }
}

impl Mul for Matrix3d {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let (l, r) = (self.to_array(), rhs.to_array());
        Self::from_array(std::array::from_fn(|index| {
            let (row, col) = (index / 3, index % 3);
            l[row * 3] * r[col] + l[row * 3 + 1] * r[3 + col] + l[row * 3 + 2] * r[6 + col]
        }))
    }
}

impl Mul<Vector3d> for Matrix3d {
    type Output = Vector3d;

    fn mul(self, rhs: Vector3d) -> Vector3d {
        Vector3d::new(
            self.a * rhs.x + self.b * rhs.y + self.c * rhs.z,
            self.d * rhs.x + self.e * rhs.y + self.f * rhs.z,
            self.g * rhs.x + self.h * rhs.y + self.i * rhs.z,
        )
    }
}

impl AbsDiffEq for Matrix3d {
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

impl RelativeEq for Matrix3d {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.to_array()
            .as_slice()
            .relative_eq(other.to_array().as_slice(), epsilon, max_relative)
    }
}

impl UlpsEq for Matrix3d {
    fn default_max_ulps() -> u32 {
        f64::default_max_ulps()
    }

    fn ulps_eq(&self, other: &Self, epsilon: f64, max_ulps: u32) -> bool {
        self.to_array()
            .as_slice()
            .ulps_eq(other.to_array().as_slice(), epsilon, max_ulps)
    }
}
