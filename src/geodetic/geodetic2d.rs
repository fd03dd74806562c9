use std::fmt;
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

use crate::error::{GeodeticError, Result};
use crate::math::scalar::{
    clamp, clamp01, divide, sign, DEG2RAD, EPSILON, EPSILON_E12, R_AVERAGE, RAD2DEG,
};
use crate::vector::{write_f64, Vector2d};

/// Latitude/longitude pair in degrees.
///
/// Stored as a [`Vector2d`] with longitude on x and latitude on y, so the
/// planar helpers of the vector type apply directly to coordinate rings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Geodetic2d {
    point: Vector2d,
}

impl Geodetic2d {
    pub const NORTH_POLE: Self = Self::new(90.0, 0.0);
    pub const SOUTH_POLE: Self = Self::new(-90.0, 0.0);
    pub const MERIDIAN: Self = Self::new(0.0, 0.0);
    pub const MERIDIAN_90: Self = Self::new(0.0, 90.0);
    pub const MERIDIAN_NEGATIVE_90: Self = Self::new(0.0, -90.0);
    pub const MERIDIAN_180: Self = Self::new(0.0, 180.0);
    pub const MERIDIAN_NEGATIVE_180: Self = Self::new(0.0, -180.0);
    pub const POSITIVE_EXTENT: Self = Self::new(90.0, 180.0);
    pub const NEGATIVE_EXTENT: Self = Self::new(-90.0, -180.0);
    pub const MAX: Self = Self::from_point(Vector2d::MAX);
    pub const MIN: Self = Self::from_point(Vector2d::MIN);
    pub const NAN: Self = Self::from_point(Vector2d::NAN);

    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            point: Vector2d::new(longitude, latitude),
        }
    }

    /// Wraps a planar point whose x is longitude and y is latitude.
    #[must_use]
    pub const fn from_point(point: Vector2d) -> Self {
        Self { point }
    }

    #[must_use]
    pub fn latitude(&self) -> f64 {
        self.point.y
    }

    #[must_use]
    pub fn longitude(&self) -> f64 {
        self.point.x
    }

    #[must_use]
    pub const fn point(&self) -> Vector2d {
        self.point
    }

    #[must_use]
    pub fn is_nan(&self) -> bool {
        self.point.is_nan()
    }

    /// Great-circle distance in metres on a sphere of mean earth radius.
    #[must_use]
    pub fn distance(&self, other: Self) -> f64 {
        self.distance_on(other, R_AVERAGE)
    }

    /// Haversine distance on a sphere of the given radius.
    ///
    /// With `radius = 1` the result is the central angle in radians.
    #[must_use]
    pub fn distance_on(&self, other: Self, radius: f64) -> f64 {
        if *self == other {
            return 0.0;
        }
        let lat_a = self.latitude() * DEG2RAD;
        let lat_b = other.latitude() * DEG2RAD;
        let half_lat = (lat_b - lat_a) * 0.5;
        let half_lon = (other.longitude() - self.longitude()) * DEG2RAD * 0.5;
        let h = half_lat.sin().powi(2) + lat_a.cos() * lat_b.cos() * half_lon.sin().powi(2);
        2.0 * radius * h.sqrt().min(1.0).asin()
    }

    /// Destination reached by travelling `distance` metres along the great
    /// circle starting at `heading` degrees clockwise from north.
    #[must_use]
    pub fn offset(&self, distance: f64, heading: f64) -> Self {
        self.offset_on(distance, heading, R_AVERAGE)
    }

    /// [`Self::offset`] on a sphere of the given radius.
    ///
    /// The resulting longitude is normalised into `[-180, 180)`.
    #[must_use]
    pub fn offset_on(&self, distance: f64, heading: f64, radius: f64) -> Self {
        if distance < EPSILON {
            return *self;
        }
        let angular = distance / radius;
        let (sin_d, cos_d) = angular.sin_cos();
        let (sin_h, cos_h) = (heading * DEG2RAD).sin_cos();
        let lat = self.latitude() * DEG2RAD;
        let (sin_lat, cos_lat) = lat.sin_cos();

        let new_lat = (sin_lat * cos_d + cos_lat * sin_d * cos_h).clamp(-1.0, 1.0).asin();
        let delta_lon = (sin_h * sin_d * cos_lat).atan2(cos_d - sin_lat * new_lat.sin());
        let lon = self.longitude() + delta_lon * RAD2DEG;

        Self::new(new_lat * RAD2DEG, (lon + 180.0).rem_euclid(360.0) - 180.0)
    }

    /// Initial bearing from `self` towards `other`, in degrees `[0, 360)`.
    ///
    /// Equal coordinates give 0. Starting at a pole every direction is due
    /// south (180) or due north (360).
    #[must_use]
    pub fn course(&self, other: Self) -> f64 {
        if *self == other {
            return 0.0;
        }
        let lat_a = self.latitude() * DEG2RAD;
        let cos_lat_a = lat_a.cos();
        if cos_lat_a < EPSILON_E12 {
            return if self.latitude() > 0.0 { 180.0 } else { 360.0 };
        }
        let lat_b = other.latitude() * DEG2RAD;
        let delta_lon = (self.longitude() - other.longitude()) * DEG2RAD;
        let cos_lat_b = lat_b.cos();
        let east = delta_lon.sin() * cos_lat_b;
        let north = cos_lat_a * lat_b.sin() - lat_a.sin() * cos_lat_b * delta_lon.cos();
        (east.atan2(north) * RAD2DEG - 360.0).abs() % 360.0
    }

    /// Point at fraction `t` (clamped to `[0, 1]`) along the great circle
    /// from `self` to `other`.
    #[must_use]
    pub fn lerp(&self, other: Self, t: f64) -> Self {
        if *self == other {
            return *self;
        }
        let t = clamp01(t);
        let d = self.distance_on(other, 1.0);
        let sin_d = d.sin();
        let weight_a = divide(((1.0 - t) * d).sin(), sin_d);
        let weight_b = divide((t * d).sin(), sin_d);

        let (sin_lat_a, cos_lat_a) = (self.latitude() * DEG2RAD).sin_cos();
        let (sin_lon_a, cos_lon_a) = (self.longitude() * DEG2RAD).sin_cos();
        let (sin_lat_b, cos_lat_b) = (other.latitude() * DEG2RAD).sin_cos();
        let (sin_lon_b, cos_lon_b) = (other.longitude() * DEG2RAD).sin_cos();

        let x = weight_a * cos_lat_a * cos_lon_a + weight_b * cos_lat_b * cos_lon_b;
        let y = weight_a * cos_lat_a * sin_lon_a + weight_b * cos_lat_b * sin_lon_b;
        let z = weight_a * sin_lat_a + weight_b * sin_lat_b;

        Self::new(z.atan2(x.hypot(y)) * RAD2DEG, y.atan2(x) * RAD2DEG)
    }

    /// Great-circle midpoint.
    #[must_use]
    pub fn midpoint(&self, other: Self) -> Self {
        self.lerp(other, 0.5)
    }

    #[must_use]
    pub fn max(&self, other: Self) -> Self {
        Self::from_point(self.point.max(other.point))
    }

    #[must_use]
    pub fn min(&self, other: Self) -> Self {
        Self::from_point(self.point.min(other.point))
    }

    #[must_use]
    pub fn clamp(
        &self,
        max_latitude: f64,
        min_latitude: f64,
        max_longitude: f64,
        min_longitude: f64,
    ) -> Self {
        Self::new(
            clamp(self.latitude(), min_latitude, max_latitude),
            clamp(self.longitude(), min_longitude, max_longitude),
        )
    }

    /// Clamps each component into a range symmetric about zero.
    #[must_use]
    pub fn clamp_abs(&self, max_abs_latitude: f64, max_abs_longitude: f64) -> Self {
        self.clamp(
            max_abs_latitude,
            -max_abs_latitude,
            max_abs_longitude,
            -max_abs_longitude,
        )
    }

    /// Reports whether every turn along the coordinate chain has the same
    /// direction. Three coordinates are always convex.
    ///
    /// # Errors
    ///
    /// Returns `GeodeticError::InsufficientCoordinates` for fewer than three
    /// coordinates.
    pub fn convex(coordinates: &[Self]) -> Result<bool> {
        if coordinates.len() < 3 {
            return Err(GeodeticError::InsufficientCoordinates {
                required: 3,
                actual: coordinates.len(),
            }
            .into());
        }
        let turn = |i: usize| {
            let here = coordinates[i].point;
            sign((coordinates[i - 1].point - here).cross(coordinates[i + 1].point - here))
        };
        let first = turn(1);
        Ok((2..coordinates.len() - 1).all(|i| turn(i) == first))
    }
}

impl TryFrom<&[f64]> for Geodetic2d {
    type Error = crate::MapError;

    /// Builds a coordinate from `[latitude, longitude]`.
    fn try_from(values: &[f64]) -> Result<Self> {
        match values {
            [latitude, longitude] => Ok(Self::new(*latitude, *longitude)),
            _ => Err(GeodeticError::InvalidCoordinate(format!(
                "expected [latitude, longitude], got {} values",
                values.len()
            ))
            .into()),
        }
    }
}

impl From<Vector2d> for Geodetic2d {
    fn from(point: Vector2d) -> Self {
        Self::from_point(point)
    }
}

impl From<Geodetic2d> for Vector2d {
    fn from(coordinate: Geodetic2d) -> Self {
        coordinate.point
    }
}

impl Add for Geodetic2d {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::from_point(self.point + rhs.point)
    }
}

impl Sub for Geodetic2d {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::from_point(self.point - rhs.point)
    }
}

impl fmt::Display for Geodetic2d {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ϕ[")?;
        write_f64(f, self.latitude())?;
        f.write_str("]d,θ[")?;
        write_f64(f, self.longitude())?;
        f.write_str("]d")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashSet;

    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::math::scalar::EPSILON_E9;
    use crate::MapError;

    const QUARTER: f64 = R_AVERAGE * std::f64::consts::FRAC_PI_2;

    #[test]
    fn stores_longitude_as_x() {
        let c = Geodetic2d::new(51.5, -0.12);
        assert_eq!(c.point(), Vector2d::new(-0.12, 51.5));
        assert_eq!(c.latitude(), 51.5);
        assert_eq!(c.longitude(), -0.12);
        assert_eq!(Geodetic2d::POSITIVE_EXTENT.point(), Vector2d::new(180.0, 90.0));
    }

    #[test]
    fn try_from_slice() {
        let c = Geodetic2d::try_from([10.0, 20.0].as_slice()).unwrap();
        assert_eq!(c, Geodetic2d::new(10.0, 20.0));

        let err = Geodetic2d::try_from([1.0, 2.0, 3.0].as_slice()).unwrap_err();
        assert!(matches!(
            err,
            MapError::Geodetic(GeodeticError::InvalidCoordinate(_))
        ));
    }

    #[test]
    fn quantized_equality_and_hash() {
        let a = Geodetic2d::new(72.002_311_593_573_149, 1.0);
        let b = Geodetic2d::new(72.002_311_593_573_151, 1.0);
        assert_eq!(a, b);
        let set: HashSet<_> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn distance_quarter_meridian() {
        let d = Geodetic2d::MERIDIAN.distance(Geodetic2d::MERIDIAN_90);
        assert_abs_diff_eq!(d, QUARTER, epsilon = 1e-6);
        assert_eq!(Geodetic2d::MERIDIAN.distance(Geodetic2d::MERIDIAN), 0.0);
        assert_abs_diff_eq!(
            Geodetic2d::MERIDIAN.distance(Geodetic2d::NORTH_POLE),
            QUARTER,
            epsilon = 1e-6
        );
    }

    #[test]
    fn offset_travels_along_heading() {
        let east = Geodetic2d::MERIDIAN.offset(QUARTER, 90.0);
        assert_abs_diff_eq!(east.latitude(), 0.0, epsilon = EPSILON_E9);
        assert_abs_diff_eq!(east.longitude(), 90.0, epsilon = EPSILON_E9);

        let north = Geodetic2d::MERIDIAN.offset(QUARTER * 0.5, 0.0);
        assert_abs_diff_eq!(north.latitude(), 45.0, epsilon = EPSILON_E9);
        assert_abs_diff_eq!(north.longitude(), 0.0, epsilon = EPSILON_E9);

        assert_eq!(Geodetic2d::MERIDIAN.offset(0.0, 45.0), Geodetic2d::MERIDIAN);
    }

    #[test]
    fn offset_normalises_longitude() {
        let start = Geodetic2d::new(0.0, 170.0);
        let wrapped = start.offset(R_AVERAGE * 20.0 * DEG2RAD, 90.0);
        assert_abs_diff_eq!(wrapped.longitude(), -170.0, epsilon = EPSILON_E9);
        assert!((-180.0..180.0).contains(&wrapped.longitude()));
    }

    #[test]
    fn course_cardinals() {
        let origin = Geodetic2d::MERIDIAN;
        for (target, expected) in [
            (Geodetic2d::new(10.0, 0.0), 0.0),
            (Geodetic2d::new(0.0, 10.0), 90.0),
            (Geodetic2d::new(-10.0, 0.0), 180.0),
            (Geodetic2d::new(0.0, -10.0), 270.0),
        ] {
            assert_abs_diff_eq!(origin.course(target), expected, epsilon = EPSILON_E9);
        }
        assert_eq!(origin.course(origin), 0.0);
    }

    #[test]
    fn course_from_poles() {
        assert_eq!(Geodetic2d::NORTH_POLE.course(Geodetic2d::MERIDIAN), 180.0);
        assert_eq!(Geodetic2d::SOUTH_POLE.course(Geodetic2d::MERIDIAN), 360.0);
    }

    #[test]
    fn lerp_follows_great_circle() {
        let mid = Geodetic2d::MERIDIAN.midpoint(Geodetic2d::MERIDIAN_90);
        assert_abs_diff_eq!(mid.latitude(), 0.0, epsilon = EPSILON_E9);
        assert_abs_diff_eq!(mid.longitude(), 45.0, epsilon = EPSILON_E9);

        let a = Geodetic2d::new(10.0, 20.0);
        let b = Geodetic2d::new(-30.0, 60.0);
        let start = a.lerp(b, -1.0);
        assert_abs_diff_eq!(start.point(), a.point(), epsilon = EPSILON_E9);
        let end = a.lerp(b, 2.0);
        assert_abs_diff_eq!(end.point(), b.point(), epsilon = EPSILON_E9);
        assert_eq!(a.lerp(a, 0.3), a);
    }

    #[test]
    fn min_max_and_clamp() {
        let a = Geodetic2d::new(10.0, -20.0);
        let b = Geodetic2d::new(-5.0, 30.0);
        assert_eq!(a.max(b), Geodetic2d::new(10.0, 30.0));
        assert_eq!(a.min(b), Geodetic2d::new(-5.0, -20.0));
        assert_eq!(
            Geodetic2d::new(100.0, -200.0).clamp_abs(90.0, 180.0),
            Geodetic2d::new(90.0, -180.0)
        );
        assert_eq!(
            Geodetic2d::new(50.0, 50.0).clamp(40.0, 0.0, 10.0, 0.0),
            Geodetic2d::new(40.0, 10.0)
        );
    }

    #[test]
    fn convexity() {
        let square = [
            Geodetic2d::new(0.0, 0.0),
            Geodetic2d::new(1.0, 0.0),
            Geodetic2d::new(1.0, 1.0),
            Geodetic2d::new(0.0, 1.0),
        ];
        assert!(Geodetic2d::convex(&square).unwrap());

        let dart = [
            Geodetic2d::new(0.0, 0.0),
            Geodetic2d::new(2.0, 1.0),
            Geodetic2d::new(0.0, 2.0),
            Geodetic2d::new(0.5, 1.0),
            Geodetic2d::new(0.0, 0.0),
        ];
        assert!(!Geodetic2d::convex(&dart).unwrap());
        assert!(Geodetic2d::convex(&square[..3]).unwrap());
        assert!(matches!(
            Geodetic2d::convex(&square[..2]),
            Err(MapError::Geodetic(GeodeticError::InsufficientCoordinates {
                required: 3,
                actual: 2
            }))
        ));
    }

    #[test]
    fn display() {
        assert_eq!(Geodetic2d::new(51.5, -0.25).to_string(), "ϕ[51.5]d,θ[-0.25]d");
        assert_eq!(
            Geodetic2d::from_point(Vector2d::new(f64::INFINITY, f64::NAN)).to_string(),
            "ϕ[NaN]d,θ[Infinity]d"
        );
    }
}
