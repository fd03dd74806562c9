use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Mul, Neg, Sub};

use approx::{AbsDiffEq, RelativeEq, UlpsEq};
use serde::{Deserialize, Serialize};

use super::{components_eq, hash_components, write_rows, Matrix3d};
use crate::error::Result;
use crate::math::scalar::EPSILON;
use crate::quaternion::Quaterniond;
use crate::vector::{index_error, Vector3d, Vector4d};

/// 4×4 matrix for affine and projective transforms.
///
/// ```text
/// | a b c d |
/// | e f g h |
/// | i j k l |
/// | m n o p |
/// ```
///
/// The translation of an affine matrix lives in `d`, `h` and `l`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Matrix4d {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
    pub g: f64,
    pub h: f64,
    pub i: f64,
    pub j: f64,
    pub k: f64,
    pub l: f64,
    pub m: f64,
    pub n: f64,
    pub o: f64,
    pub p: f64,
}

impl Matrix4d {
    pub const IDENTITY: Self = Self::from_array([
        1.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    ]);
    pub const ZERO: Self = Self::from_array([0.0; 16]);
    pub const NAN: Self = Self::from_array([f64::NAN; 16]);

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
        j: f64,
        k: f64,
        l: f64,
        m: f64,
        n: f64,
        o: f64,
        p: f64,
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
            j,
            k,
            l,
            m,
            n,
            o,
            p,
        }
    }

    #[must_use]
    pub const fn from_array(v: [f64; 16]) -> Self {
        Self::new(
            v[0], v[1], v[2], v[3], v[4], v[5], v[6], v[7], v[8], v[9], v[10], v[11], v[12],
            v[13], v[14], v[15],
        )
    }

    #[must_use]
    pub const fn to_array(&self) -> [f64; 16] {
        [
            self.a, self.b, self.c, self.d, self.e, self.f, self.g, self.h, self.i, self.j,
            self.k, self.l, self.m, self.n, self.o, self.p,
        ]
    }

    /// Non-uniform scale along the principal axes.
    #[must_use]
    pub const fn scale(scale: Vector3d) -> Self {
        Self::from_array([
            scale.x, 0.0, 0.0, 0.0, //
            0.0, scale.y, 0.0, 0.0, //
            0.0, 0.0, scale.z, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    #[must_use]
    pub const fn translate(translation: Vector3d) -> Self {
        Self::from_array([
            1.0, 0.0, 0.0, translation.x, //
            0.0, 1.0, 0.0, translation.y, //
            0.0, 0.0, 1.0, translation.z, //
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    #[must_use]
    pub fn rotate(rotation: Quaterniond) -> Self {
        rotation.rotation_matrix4()
    }

    /// Translation, then rotation, then scale: `T·R·S`.
    #[must_use]
    pub fn trs(position: Vector3d, rotation: Quaterniond, scale: Vector3d) -> Self {
        Self::translate(position) * Self::rotate(rotation) * Self::scale(scale)
    }

    /// Perspective projection onto the near plane of the given frustum.
    #[must_use]
    pub fn frustum(left: f64, right: f64, bottom: f64, top: f64, near: f64, far: f64) -> Self {
        let depth = far - near;
        Self::from_array([
            (2.0 * near) / (right - left),
            0.0,
            0.0,
            0.0,
            0.0,
            (2.0 * near) / (top - bottom),
            0.0,
            0.0,
            0.0,
            0.0,
            (far + near) / depth,
            -(2.0 * far * near) / depth,
            0.0,
            0.0,
            1.0,
            0.0,
        ])
    }

    /// Returns the component at row-major `index`.
    ///
    /// # Errors
    ///
    /// Returns `MathError::IndexOutOfRange` if `index > 15`.
    pub fn get(&self, index: usize) -> Result<f64> {
        self.to_array()
            .get(index)
            .copied()
            .ok_or_else(|| index_error("Matrix4d", index, 16))
    }

    #[must_use]
    pub fn translation(&self) -> Vector3d {
        Vector3d::new(self.d, self.h, self.l)
    }

    #[must_use]
    pub fn transpose(&self) -> Self {
        Self::from_array([
            self.a, self.e, self.i, self.m, //
            self.b, self.f, self.j, self.n, //
            self.c, self.g, self.k, self.o, //
            self.d, self.h, self.l, self.p,
        ])
    }

    /// Full 24-term Leibniz expansion.
    #[must_use]
    #[rustfmt::skip]
    #[allow(clippy::many_single_char_names)]
    pub fn determinant(&self) -> f64 {
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
            j,
            k,
            l,
            m,
            n,
            o,
            p,
        } = *self;
        a * f * k * p + a * g * l * n + a * h * j * o
            + b * e * l * o + b * g * i * p + b * h * k * m
            + c * e * j * p + c * f * l * m + c * h * i * n
            + d * e * k * n + d * f * i * o + d * g * j * m
            - a * f * l * o - a * g * j * p - a * h * k * n
            - b * e * k * p - b * g * l * m - b * h * i * o
            - c * e * l * n - c * f * i * p - c * h * j * m
            - d * e * j * o - d * f * k * m - d * g * i * n
    }

    /// The inverse, or [`Matrix4d::NAN`] when `|det|` is below
    /// [`EPSILON`].
    ///
    /// The adjugate is assembled from the 2×2 sub-determinants of the top
    /// and bottom row pairs.
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
            j,
            k,
            l,
            m,
            n,
            o,
            p,
        } = *self;

        let s0 = a * f - b * e;
        let s1 = a * g - c * e;
        let s2 = a * h - d * e;
        let s3 = b * g - c * f;
        let s4 = b * h - d * f;
        let s5 = c * h - d * g;

        let c5 = k * p - l * o;
        let c4 = j * p - l * n;
        let c3 = j * o - k * n;
        let c2 = i * p - l * m;
        let c1 = i * o - k * m;
        let c0 = i * n - j * m;

        let adjugate = Self::from_array([
            f * c5 - g * c4 + h * c3,
            -b * c5 + c * c4 - d * c3,
            n * s5 - o * s4 + p * s3,
            -j * s5 + k * s4 - l * s3,
            -e * c5 + g * c2 - h * c1,
            a * c5 - c * c2 + d * c1,
            -m * s5 + o * s2 - p * s1,
            i * s5 - k * s2 + l * s1,
            e * c4 - f * c2 + h * c0,
            -a * c4 + b * c2 - d * c0,
            m * s4 - n * s2 + p * s0,
            -i * s4 + j * s2 - l * s0,
            -e * c3 + f * c1 - g * c0,
            a * c3 - b * c1 + c * c0,
            -m * s3 + n * s1 - o * s0,
            i * s3 - j * s1 + k * s0,
        ]);
        adjugate * (1.0 / det)
    }

    #[must_use]
    pub fn a_minor(&self) -> Matrix3d {
        Matrix3d::new(
            self.f, self.g, self.h, self.j, self.k, self.l, self.n, self.o, self.p,
        )
    }

    #[must_use]
    pub fn b_minor(&self) -> Matrix3d {
        Matrix3d::new(
            self.e, self.g, self.h, self.i, self.k, self.l, self.m, self.o, self.p,
        )
    }

    #[must_use]
    pub fn c_minor(&self) -> Matrix3d {
        Matrix3d::new(
            self.e, self.f, self.h, self.i, self.j, self.l, self.m, self.n, self.p,
        )
    }

    #[must_use]
    pub fn d_minor(&self) -> Matrix3d {
        Matrix3d::new(
            self.e, self.f, self.g, self.i, self.j, self.k, self.m, self.n, self.o,
        )
    }

    /// Upper-left 3×3 block, the linear part of an affine matrix.
    #[must_use]
    pub fn p_minor(&self) -> Matrix3d {
        Matrix3d::new(
            self.a, self.b, self.c, self.e, self.f, self.g, self.i, self.j, self.k,
        )
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

impl Default for Matrix4d {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl PartialEq for Matrix4d {
    fn eq(&self, other: &Self) -> bool {
        components_eq(&self.to_array(), &other.to_array())
    }
}

impl Eq for Matrix4d {}

impl Hash for Matrix4d {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_components(&self.to_array(), state);
    }
}

impl fmt::Display for Matrix4d {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_rows(f, &self.to_array(), 4)
    }
}

impl Neg for Matrix4d {
    type Output = Self;

    fn neg(self) -> Self {
        self.map(|v| -v)
    }
}

impl Add for Matrix4d {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| a + b)
    }
}

impl Add<f64> for Matrix4d {
    type Output = Self;

    fn add(self, rhs: f64) -> Self {
        self.map(|v| v + rhs)
    }
}

impl Add<Matrix4d> for f64 {
    type Output = Matrix4d;

    fn add(self, rhs: Matrix4d) -> Matrix4d {
        rhs.map(|v| self + v)
    }
}

impl Sub for Matrix4d {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| a - b)
    }
}

impl Sub<f64> for Matrix4d {
    type Output = Self;

    fn sub(self, rhs: f64) -> Self {
        self.map(|v| v - rhs)
    }
}

impl Sub<Matrix4d> for f64 {
    type Output = Matrix4d;

    fn sub(self, rhs: Matrix4d) -> Matrix4d {
        rhs.map(|v| self - v)
    }
}

impl Mul<f64> for Matrix4d {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        self.map(|v| v * rhs)
    }
}

impl Mul<Matrix4d> for f64 {
    type Output = Matrix4d;

    fn mul(self, rhs: Matrix4d) -> Matrix4d {
        rhs.map(|v| self * v)
    }
}

impl Mul for Matrix4d {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let (l, r) = (self.to_array(), rhs.to_array());
        Self::from_array(std::array::from_fn(|index| {
            let (row, col) = (index / 4 * 4, index % 4);
            l[row] * r[col]
                + l[row + 1] * r[4 + col]
                + l[row + 2] * r[8 + col]
                + l[row + 3] * r[12 + col]
        }))
    }
}

/// Affine transform of a point (`w = 1`).
impl Mul<Vector3d> for Matrix4d {
    type Output = Vector3d;

    fn mul(self, rhs: Vector3d) -> Vector3d {
        Vector3d::new(
            self.a * rhs.x + self.b * rhs.y + self.c * rhs.z + self.d,
            self.e * rhs.x + self.f * rhs.y + self.g * rhs.z + self.h,
            self.i * rhs.x + self.j * rhs.y + self.k * rhs.z + self.l,
        )
    }
}

impl Mul<Vector4d> for Matrix4d {
    type Output = Vector4d;

    fn mul(self, rhs: Vector4d) -> Vector4d {
        Vector4d::new(
            self.a * rhs.x + self.b * rhs.y + self.c * rhs.z + self.d * rhs.w,
            self.e * rhs.x + self.f * rhs.y + self.g * rhs.z + self.h * rhs.w,
            self.i * rhs.x + self.j * rhs.y + self.k * rhs.z + self.l * rhs.w,
            self.m * rhs.x + self.n * rhs.y + self.o * rhs.z + self.p * rhs.w,
        )
    }
}

impl AbsDiffEq for Matrix4d {
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

impl RelativeEq for Matrix4d {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.to_array()
            .as_slice()
            .relative_eq(other.to_array().as_slice(), epsilon, max_relative)
    }
}

impl UlpsEq for Matrix4d {
    fn default_max_ulps() -> u32 {
        f64::default_max_ulps()
    }

    fn ulps_eq(&self, other: &Self, epsilon: f64, max_ulps: u32) -> bool {
        self.to_array()
            .as_slice()
            .ulps_eq(other.to_array().as_slice(), epsilon, max_ulps)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    use super::*;
    use crate::math::scalar::{EPSILON_E14, EPSILON_E15, EPSILON_E20};

    fn scenario() -> Matrix4d {
        Matrix4d::from_array([
            8.0, 2.0, 3.0, 4.0, //
            5.0, 6.0, -7.0, 8.0, //
            9.0, -10.0, 11.0, 12.0, //
            13.0, 14.0, 15.0, 16.0,
        ])
    }

    #[test]
    fn determinant_of_scenario() {
        assert!((scenario().determinant() + 23184.0).abs() < EPSILON_E14);
    }

    #[test]
    fn inverse_against_identity() {
        let m = scenario();
        let inverse = m.inverse();
        assert_abs_diff_eq!(m * inverse, Matrix4d::IDENTITY, epsilon = EPSILON_E15);
        assert_abs_diff_eq!(inverse * m, Matrix4d::IDENTITY, epsilon = EPSILON_E15);
    }

    #[test]
    fn inverse_of_inverse_and_determinant() {
        let m = scenario();
        let inverse = m.inverse();
        assert_relative_eq!(inverse.inverse(), m, max_relative = EPSILON_E14);
        assert!((inverse.determinant() - 1.0 / m.determinant()).abs() < EPSILON_E20);
    }

    #[test]
    fn singular_matrix_gives_nan_sentinel() {
        let singular = Matrix4d::from_array([
            1.0, 2.0, 3.0, 4.0, //
            2.0, 4.0, 6.0, 8.0, //
            0.0, 1.0, 0.0, 1.0, //
            1.0, 0.0, 1.0, 0.0,
        ]);
        assert!(singular.inverse().is_nan());
        assert!(!Matrix4d::IDENTITY.inverse().is_nan());
        assert!(Matrix4d::NAN.is_nan());
    }

    #[test]
    fn transpose_laws() {
        let a = scenario();
        let b = Matrix4d::IDENTITY * 2.0 + 0.5;
        assert_eq!(a.transpose().transpose(), a);
        assert_eq!((a + b).transpose(), a.transpose() + b.transpose());
        assert_eq!((-1.5 * a).transpose(), -1.5 * a.transpose());
    }

    #[test]
    fn product_is_not_commutative() {
        let a = scenario();
        let b = Matrix4d::translate(Vector3d::new(1.0, 2.0, 3.0));
        assert_ne!(a * b, b * a);
        assert_eq!(a * Matrix4d::IDENTITY, a);
    }

    #[test]
    fn minors_expand_to_determinant() {
        let m = scenario();
        let expansion = m.a * m.a_minor().determinant() - m.b * m.b_minor().determinant()
            + m.c * m.c_minor().determinant()
            - m.d * m.d_minor().determinant();
        assert!((expansion - m.determinant()).abs() < EPSILON_E14);
        assert_eq!(
            m.p_minor(),
            Matrix3d::new(8.0, 2.0, 3.0, 5.0, 6.0, -7.0, 9.0, -10.0, 11.0)
        );
    }

    #[test]
    fn trs_applies_scale_then_rotation_then_translation() {
        let rotation = Quaterniond::axis_angle(Vector3d::UP, 90.0);
        let m = Matrix4d::trs(Vector3d::new(10.0, 0.0, 0.0), rotation, Vector3d::splat(2.0));
        let point = m * Vector3d::FORWARD;
        assert_abs_diff_eq!(point, Vector3d::new(12.0, 0.0, 0.0), epsilon = EPSILON_E14);
        assert_eq!(m.translation(), Vector3d::new(10.0, 0.0, 0.0));
    }

    #[test]
    fn homogeneous_product() {
        let m = Matrix4d::translate(Vector3d::new(1.0, 2.0, 3.0));
        assert_eq!(m * Vector4d::new(1.0, 1.0, 1.0, 0.0), Vector4d::new(1.0, 1.0, 1.0, 0.0));
        assert_eq!(m * Vector4d::new(1.0, 1.0, 1.0, 1.0), Vector4d::new(2.0, 3.0, 4.0, 1.0));
        assert_eq!(m * Vector3d::ONE, Vector3d::new(2.0, 3.0, 4.0));
    }

    #[test]
    fn frustum_maps_near_plane_corners() {
        let m = Matrix4d::frustum(-1.0, 1.0, -1.0, 1.0, 1.0, 10.0);
        let clip = m * Vector4d::new(1.0, 1.0, 1.0, 1.0);
        let ndc = clip.xyz() / clip.w;
        assert_abs_diff_eq!(ndc, Vector3d::new(1.0, 1.0, -1.0), epsilon = EPSILON_E14);
    }

    #[test]
    fn index_and_display() {
        let m = scenario();
        assert!((m.get(15).unwrap() - 16.0).abs() < f64::EPSILON);
        assert!(m.get(16).is_err());
        assert_eq!(
            Matrix4d::IDENTITY.to_string().lines().next().unwrap(),
            "[+1.000][+0.000][+0.000][+0.000]"
        );
        assert_eq!(Matrix4d::IDENTITY.to_string().lines().count(), 4);
    }

    #[test]
    fn display_prints_rounded_negative_zero_as_positive() {
        let mut m = Matrix4d::IDENTITY;
        m.b = -1e-17;
        m.c = -0.0004;
        m.d = -0.0006;
        assert_eq!(
            m.to_string().lines().next().unwrap(),
            "[+1.000][+0.000][+0.000][-0.001]"
        );
        for line in (scenario() * scenario().inverse()).to_string().lines() {
            assert!(!line.contains("-0.000"), "{line}");
        }
    }
}
