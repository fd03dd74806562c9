//! Conversions between the kernel value types and `nalgebra`.
//!
//! Matrices map row-major to row-major; quaternions keep `(x, y, z, w)` as
//! nalgebra's `(i, j, k, w)`.

use nalgebra::{Quaternion, SMatrix, Vector2, Vector3, Vector4};

use crate::matrix::{Matrix2d, Matrix3d, Matrix4d};
use crate::quaternion::Quaterniond;
use crate::vector::{Vector2d, Vector3d, Vector4d};

fn row_major<const N: usize, const L: usize>(m: &SMatrix<f64, N, N>) -> [f64; L] {
    std::array::from_fn(|i| m[(i / N, i % N)])
}

impl From<Vector2d> for Vector2<f64> {
    fn from(v: Vector2d) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Vector2<f64>> for Vector2d {
    fn from(v: Vector2<f64>) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Vector3d> for Vector3<f64> {
    fn from(v: Vector3d) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Vector3<f64>> for Vector3d {
    fn from(v: Vector3<f64>) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Vector4d> for Vector4<f64> {
    fn from(v: Vector4d) -> Self {
        Self::new(v.x, v.y, v.z, v.w)
    }
}

impl From<Vector4<f64>> for Vector4d {
    fn from(v: Vector4<f64>) -> Self {
        Self::new(v.x, v.y, v.z, v.w)
    }
}

impl From<Matrix2d> for SMatrix<f64, 2, 2> {
    fn from(m: Matrix2d) -> Self {
        Self::from_row_slice(&m.to_array())
    }
}

impl From<SMatrix<f64, 2, 2>> for Matrix2d {
    fn from(m: SMatrix<f64, 2, 2>) -> Self {
        Self::from_array(row_major(&m))
    }
}

impl From<Matrix3d> for SMatrix<f64, 3, 3> {
    fn from(m: Matrix3d) -> Self {
        Self::from_row_slice(&m.to_array())
    }
}

impl From<SMatrix<f64, 3, 3>> for Matrix3d {
    fn from(m: SMatrix<f64, 3, 3>) -> Self {
        Self::from_array(row_major(&m))
    }
}

impl From<Matrix4d> for SMatrix<f64, 4, 4> {
    fn from(m: Matrix4d) -> Self {
        Self::from_row_slice(&m.to_array())
    }
}

impl From<SMatrix<f64, 4, 4>> for Matrix4d {
    fn from(m: SMatrix<f64, 4, 4>) -> Self {
        Self::from_array(row_major(&m))
    }
}

impl From<Quaterniond> for Quaternion<f64> {
    fn from(q: Quaterniond) -> Self {
        Self::new(q.w, q.x, q.y, q.z)
    }
}

impl From<Quaternion<f64>> for Quaterniond {
    fn from(q: Quaternion<f64>) -> Self {
        let c = q.coords;
        Self::new(c.x, c.y, c.z, c.w)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use nalgebra::{Matrix4, UnitQuaternion};

    use super::*;
    use crate::math::scalar::{EPSILON_E12, EPSILON_E14};

    fn sample() -> Matrix4d {
        Matrix4d::new(
            8.0, 2.0, 3.0, 4.0, 5.0, 6.0, -7.0, 8.0, 9.0, -10.0, 11.0, 12.0, 13.0, 14.0, 15.0, 16.0,
        )
    }

    #[test]
    fn layout_is_row_major() {
        let m: Matrix4<f64> = sample().into();
        assert_eq!(m[(0, 1)], 2.0);
        assert_eq!(m[(1, 0)], 5.0);
        assert_eq!(m[(3, 2)], 15.0);
        assert_eq!(Matrix4d::from(m), sample());

        let m2: SMatrix<f64, 2, 2> = Matrix2d::new(1.0, 2.0, 3.0, 4.0).into();
        assert_eq!(m2[(0, 1)], 2.0);
        assert_eq!(Matrix2d::from(m2), Matrix2d::new(1.0, 2.0, 3.0, 4.0));
    }

    #[test]
    fn inverse_agrees_with_nalgebra() {
        let ours = sample().inverse();
        let theirs: Matrix4d = Matrix4::from(sample()).try_inverse().unwrap().into();
        assert_relative_eq!(ours, theirs, epsilon = EPSILON_E14, max_relative = EPSILON_E12);
    }

    #[test]
    fn product_agrees_with_nalgebra() {
        let a = sample();
        let b = Matrix4d::trs(
            Vector3d::new(1.0, 2.0, 3.0),
            Quaterniond::euler(10.0, 20.0, 30.0),
            Vector3d::splat(2.0),
        );
        let theirs: Matrix4d = (Matrix4::from(a) * Matrix4::from(b)).into();
        assert_abs_diff_eq!(a * b, theirs, epsilon = EPSILON_E12);
        let v = Vector4d::new(1.0, -2.0, 0.5, 1.0);
        let theirs: Vector4d = (Matrix4::from(a) * Vector4::from(v)).into();
        assert_abs_diff_eq!(a * v, theirs, epsilon = EPSILON_E12);
    }

    #[test]
    fn rotation_agrees_with_nalgebra() {
        let q = Quaterniond::axis_angle(Vector3d::new(1.0, 2.0, -0.5), 73.0);
        let unit = UnitQuaternion::from_quaternion(Quaternion::from(q));
        let theirs: Matrix3d = (*unit.to_rotation_matrix().matrix()).into();
        assert_abs_diff_eq!(q.rotation_matrix3(), theirs, epsilon = EPSILON_E12);

        let p = Vector3d::new(0.3, -4.0, 2.0);
        let rotated: Vector3d = (unit * Vector3::from(p)).into();
        assert_abs_diff_eq!(q * p, rotated, epsilon = EPSILON_E12);
    }

    #[test]
    fn hamilton_product_agrees_with_nalgebra() {
        let a = Quaterniond::new(1.0, 2.0, 3.0, 4.0);
        let b = Quaterniond::new(-0.5, 0.25, 2.0, 1.0);
        let theirs: Quaterniond = (Quaternion::from(a) * Quaternion::from(b)).into();
        assert_eq!(a * b, theirs);
        assert_eq!(Quaterniond::from(Quaternion::from(a)), a);
    }

    #[test]
    fn vectors_round_trip() {
        let v = Vector3d::new(1.0, -2.0, 3.5);
        let n: Vector3<f64> = v.into();
        assert_eq!((n.x, n.y, n.z), (1.0, -2.0, 3.5));
        assert_eq!(Vector2d::from(Vector2::new(4.0, 5.0)), Vector2d::new(4.0, 5.0));
    }
}
