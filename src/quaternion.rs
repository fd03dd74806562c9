//! Rotation quaternion.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Div, Mul, Neg, Sub};

use approx::{AbsDiffEq, RelativeEq, UlpsEq};
use serde::{Deserialize, Serialize};

use crate::error::{MathError, Result};
use crate::math::quantize::{hash_f64, key_f64};
use crate::math::scalar::{
    clamp, divide, epsilon_equals, DEG2RAD, EPSILON, EPSILON_E15, HALF_DEG2RAD, RAD2DEG,
};
use crate::matrix::{Matrix3d, Matrix4d};
use crate::vector::{index_error, write_f64, Vector3d};

/// Tolerance on `det - 1` accepted by [`Quaterniond::from_rotation_matrix`].
const ROTATION_DETERMINANT_TOLERANCE: f64 = EPSILON_E15 * 16.0;

/// Quaternion `x·i + y·j + z·k + w`, with `(x, y, z)` the vector part.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Quaterniond {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Quaterniond {
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    #[must_use]
    pub const fn from_parts(vector: Vector3d, w: f64) -> Self {
        Self::new(vector.x, vector.y, vector.z, w)
    }

    /// Vector part.
    #[must_use]
    pub const fn vector(&self) -> Vector3d {
        Vector3d::new(self.x, self.y, self.z)
    }

    #[must_use]
    pub const fn to_array(&self) -> [f64; 4] {
        [self.x, self.y, self.z, self.w]
    }

    /// Returns the component at `index`, with `w` last.
    ///
    /// # Errors
    ///
    /// Returns `MathError::IndexOutOfRange` if `index > 3`.
    pub fn get(&self, index: usize) -> Result<f64> {
        self.to_array()
            .get(index)
            .copied()
            .ok_or_else(|| index_error("Quaterniond", index, 4))
    }

    #[must_use]
    pub fn magnitude(&self) -> f64 {
        self.sqr_magnitude().sqrt()
    }

    #[must_use]
    pub fn sqr_magnitude(&self) -> f64 {
        self.w * self.w + self.vector().sqr_magnitude()
    }

    #[must_use]
    pub fn conjugate(&self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    /// Unit quaternion in the same direction, or [`Quaterniond::ZERO`] when
    /// the magnitude is zero.
    #[must_use]
    pub fn normalised(&self) -> Self {
        let magnitude = self.magnitude();
        if magnitude == 0.0 {
            return Self::ZERO;
        }
        *self / magnitude
    }

    pub fn normalise(&mut self) {
        *self = self.normalised();
    }

    #[must_use]
    pub fn inverse(&self) -> Self {
        self.conjugate() / self.sqr_magnitude()
    }

    #[must_use]
    pub fn rotation_matrix3(&self) -> Matrix3d {
        let [r0, r1, r2] = self.rotation_rows();
        Matrix3d::new(r0[0], r0[1], r0[2], r1[0], r1[1], r1[2], r2[0], r2[1], r2[2])
    }

    #[must_use]
    pub fn rotation_matrix4(&self) -> Matrix4d {
        let [r0, r1, r2] = self.rotation_rows();
        Matrix4d::from_array([
            r0[0], r0[1], r0[2], 0.0, //
            r1[0], r1[1], r1[2], 0.0, //
            r2[0], r2[1], r2[2], 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    fn rotation_rows(&self) -> [[f64; 3]; 3] {
        let Self { x, y, z, w } = *self;
        let (xy, xz, yz) = (x * y, x * z, y * z);
        let (wx, wy, wz) = (w * x, w * y, w * z);
        let (x2, y2, z2) = (x * x, y * y, z * z);
        [
            [1.0 - 2.0 * (y2 + z2), 2.0 * (xy - wz), 2.0 * (xz + wy)],
            [2.0 * (xy + wz), 1.0 - 2.0 * (x2 + z2), 2.0 * (yz - wx)],
            [2.0 * (xz - wy), 2.0 * (yz + wx), 1.0 - 2.0 * (x2 + y2)],
        ]
    }

    /// Rotation about `x`, then `y`, then `z` in degrees.
    #[must_use]
    pub fn euler_angles(&self) -> Vector3d {
        Vector3d::new(self.euler_x(), self.euler_y(), self.euler_z())
    }

    fn euler_x(&self) -> f64 {
        let Self { x, y, z, w } = *self;
        let sin = 2.0 * (y * z + w * x);
        let cos = w * w - x * x - y * y + z * z;
        if epsilon_equals(sin, 0.0) && epsilon_equals(cos, 0.0) {
            // gimbal lock
            return 2.0 * x.atan2(w) * RAD2DEG;
        }
        sin.atan2(cos) * RAD2DEG
    }

    fn euler_y(&self) -> f64 {
        let Self { x, y, z, w } = *self;
        clamp(-2.0 * (x * z - w * y), -1.0, 1.0).asin() * RAD2DEG
    }

    fn euler_z(&self) -> f64 {
        let Self { x, y, z, w } = *self;
        (2.0 * (x * y + w * z)).atan2(w * w + x * x - y * y - z * z) * RAD2DEG
    }

    /// Builds the rotation from Euler angles in degrees, inverse of
    /// [`Quaterniond::euler_angles`].
    #[must_use]
    pub fn euler(x: f64, y: f64, z: f64) -> Self {
        let (sx, cx) = (x * HALF_DEG2RAD).sin_cos();
        let (sy, cy) = (y * HALF_DEG2RAD).sin_cos();
        let (sz, cz) = (z * HALF_DEG2RAD).sin_cos();
        Self::new(
            sx * cy * cz - cx * sy * sz,
            cx * sy * cz + sx * cy * sz,
            cx * cy * sz - sx * sy * cz,
            cx * cy * cz + sx * sy * sz,
        )
    }

    /// Rotation of `degrees` about `axis`.
    ///
    /// A degenerate axis yields [`Quaterniond::IDENTITY`].
    #[must_use]
    pub fn axis_angle(axis: Vector3d, degrees: f64) -> Self {
        if axis.sqr_magnitude() < EPSILON {
            return Self::IDENTITY;
        }
        let (sin, cos) = (degrees * 0.5 * DEG2RAD).sin_cos();
        Self::from_parts(axis.normalised() * sin, cos).normalised()
    }

    /// Decomposes a unit quaternion into `(axis, degrees)`.
    ///
    /// The identity reports [`Vector3d::ONE`] as its axis.
    #[must_use]
    pub fn to_axis_angle(&self) -> (Vector3d, f64) {
        let w = clamp(self.w, -1.0, 1.0);
        let degrees = w.acos() * 2.0 * RAD2DEG;
        #[allow(clippy::float_cmp)]
        let axis = if w == 1.0 {
            Vector3d::ONE
        } else {
            self.vector() / (1.0 - w * w).sqrt()
        };
        (axis, degrees)
    }

    /// Recovers the rotation encoded by a proper rotation matrix.
    ///
    /// # Errors
    ///
    /// Returns `MathError::Arithmetic` if the determinant of `m` is not 1,
    /// in which case the matrix carries scale or reflection.
    pub fn from_rotation_matrix(m: &Matrix3d) -> Result<Self> {
        let det = m.determinant();
        if (det - 1.0).abs() > ROTATION_DETERMINANT_TOLERANCE {
            return Err(MathError::Arithmetic(format!(
                "rotation matrix determinant is {det}, expected 1"
            ))
            .into());
        }

        let trace = m.a + m.e + m.i;
        let q = if trace > 0.0 {
            let s = (trace + 1.0).sqrt() * 2.0;
            Self::new((m.h - m.f) / s, (m.c - m.g) / s, (m.d - m.b) / s, 0.25 * s)
        } else if m.a > m.e && m.a > m.i {
            let s = (1.0 + m.a - m.e - m.i).sqrt() * 2.0;
            Self::new(0.25 * s, (m.b + m.d) / s, (m.c + m.g) / s, (m.h - m.f) / s)
        } else if m.e > m.i {
            let s = (1.0 + m.e - m.a - m.i).sqrt() * 2.0;
            Self::new((m.b + m.d) / s, 0.25 * s, (m.f + m.h) / s, (m.c - m.g) / s)
        } else {
            let s = (1.0 + m.i - m.a - m.e).sqrt() * 2.0;
            Self::new((m.c + m.g) / s, (m.f + m.h) / s, 0.25 * s, (m.d - m.b) / s)
        };
        Ok(q)
    }
}

impl Default for Quaterniond {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl PartialEq for Quaterniond {
    fn eq(&self, other: &Self) -> bool {
        self.to_array()
            .iter()
            .zip(other.to_array().iter())
            .all(|(a, b)| key_f64(*a) == key_f64(*b))
    }
}

impl Eq for Quaterniond {}

impl Hash for Quaterniond {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for value in self.to_array() {
            hash_f64(value, state);
        }
    }
}

impl fmt::Display for Quaterniond {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},[", self.vector())?;
        write_f64(f, self.w)?;
        f.write_str("]d")
    }
}

/// Negation is the inverse rotation.
impl Neg for Quaterniond {
    type Output = Self;

    fn neg(self) -> Self {
        self.inverse()
    }
}

impl Add for Quaterniond {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::from_parts(self.vector() + rhs.vector(), self.w + rhs.w)
    }
}

impl Sub for Quaterniond {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::from_parts(self.vector() - rhs.vector(), self.w - rhs.w)
    }
}

impl Mul<f64> for Quaterniond {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::from_parts(self.vector() * rhs, self.w * rhs)
    }
}

impl Mul<Quaterniond> for f64 {
    type Output = Quaterniond;

    fn mul(self, rhs: Quaterniond) -> Quaterniond {
        rhs * self
    }
}

impl Div<f64> for Quaterniond {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        Self::from_parts(self.vector() / rhs, divide(self.w, rhs))
    }
}

/// Hamilton product; `a * b` applies `b` first.
impl Mul for Quaterniond {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let (a, b) = (self.vector(), rhs.vector());
        Self::from_parts(
            b * self.w + a * rhs.w + a.cross(b),
            self.w * rhs.w - a.dot(b),
        )
    }
}

/// Rotates the vector.
impl Mul<Vector3d> for Quaterniond {
    type Output = Vector3d;

    fn mul(self, rhs: Vector3d) -> Vector3d {
        self.rotation_matrix4() * rhs
    }
}

impl AbsDiffEq for Quaterniond {
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

impl RelativeEq for Quaterniond {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.to_array()
            .as_slice()
            .relative_eq(other.to_array().as_slice(), epsilon, max_relative)
    }
}

impl UlpsEq for Quaterniond {
    fn default_max_ulps() -> u32 {
        f64::default_max_ulps()
    }

    fn ulps_eq(&self, other: &Self, epsilon: f64, max_ulps: u32) -> bool {
        self.to_array()
            .as_slice()
            .ulps_eq(other.to_array().as_slice(), epsilon, max_ulps)
    }
}
