use std::fmt;

use serde::{Deserialize, Serialize};

use super::Geodetic2d;
use crate::vector::{write_f64, Vector3d};

/// Latitude/longitude in degrees plus a height in metres.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Geodetic3d {
    position: Vector3d,
}

impl Geodetic3d {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const MAX: Self = Self::new(f64::MAX, f64::MAX, f64::MAX);
    pub const MIN: Self = Self::new(f64::MIN, f64::MIN, f64::MIN);
    pub const NAN: Self = Self::new(f64::NAN, f64::NAN, f64::NAN);

    #[must_use]
    pub const fn new(latitude: f64, longitude: f64, height: f64) -> Self {
        Self {
            position: Vector3d::new(longitude, latitude, height),
        }
    }

    #[must_use]
    pub const fn from_geodetic2d(coordinate: Geodetic2d, height: f64) -> Self {
        let point = coordinate.point();
        Self {
            position: Vector3d::new(point.x, point.y, height),
        }
    }

    #[must_use]
    pub fn latitude(&self) -> f64 {
        self.position.y
    }

    #[must_use]
    pub fn longitude(&self) -> f64 {
        self.position.x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.position.z
    }

    /// Drops the height.
    #[must_use]
    pub fn geodetic2d(&self) -> Geodetic2d {
        Geodetic2d::from_point(self.position.xy())
    }

    #[must_use]
    pub fn max(&self, other: Self) -> Self {
        Self {
            position: self.position.max(other.position),
        }
    }

    #[must_use]
    pub fn min(&self, other: Self) -> Self {
        Self {
            position: self.position.min(other.position),
        }
    }
}

impl From<Geodetic3d> for Vector3d {
    /// `(longitude, latitude, height)`.
    fn from(coordinate: Geodetic3d) -> Self {
        coordinate.position
    }
}

impl From<Vector3d> for Geodetic3d {
    fn from(position: Vector3d) -> Self {
        Self { position }
    }
}

impl From<Geodetic3d> for Geodetic2d {
    fn from(coordinate: Geodetic3d) -> Self {
        coordinate.geodetic2d()
    }
}

impl fmt::Display for Geodetic3d {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ϕ[")?;
        write_f64(f, self.latitude())?;
        f.write_str("]d,θ[")?;
        write_f64(f, self.longitude())?;
        f.write_str("]d,h[")?;
        write_f64(f, self.height())?;
        f.write_str("]d")
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn vector_mapping() {
        let c = Geodetic3d::new(45.0, -120.0, 350.0);
        let v = Vector3d::from(c);
        assert_eq!(v, Vector3d::new(-120.0, 45.0, 350.0));
        assert_eq!(Geodetic3d::from(v), c);
        assert_eq!(c.geodetic2d(), Geodetic2d::new(45.0, -120.0));
        assert_eq!(
            Geodetic3d::from_geodetic2d(Geodetic2d::new(45.0, -120.0), 350.0),
            c
        );
    }

    #[test]
    fn component_extremes() {
        let a = Geodetic3d::new(10.0, 20.0, -5.0);
        let b = Geodetic3d::new(-10.0, 30.0, 5.0);
        assert_eq!(a.max(b), Geodetic3d::new(10.0, 30.0, 5.0));
        assert_eq!(a.min(b), Geodetic3d::new(-10.0, 20.0, -5.0));
        assert_eq!(Geodetic3d::MIN.max(a), a);
    }

    #[test]
    fn quantized_hash() {
        let a = Geodetic3d::new(1.0, 2.0, 3.000_000_000_000_001);
        let b = Geodetic3d::new(1.0, 2.0, 3.0);
        assert_eq!(a, b);
        let set: HashSet<_> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
        assert_ne!(a, Geodetic3d::new(1.0, 2.0, 3.001));
    }

    #[test]
    fn display() {
        assert_eq!(
            Geodetic3d::new(1.5, -2.0, 100.0).to_string(),
            "ϕ[1.5]d,θ[-2]d,h[100]d"
        );
        assert_eq!(Geodetic3d::ZERO.to_string(), "ϕ[0]d,θ[0]d,h[0]d");
    }
}
