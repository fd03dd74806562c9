use std::fmt;

use serde::{Deserialize, Serialize};

use super::Geodetic2d;
use crate::error::{GeodeticError, Result};

/// Axis-aligned latitude/longitude bounds.
///
/// The box never wraps across the antimeridian: `min` holds the smallest
/// latitude and longitude, `max` the largest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GeodeticBox2d {
    min: Geodetic2d,
    max: Geodetic2d,
}

impl GeodeticBox2d {
    /// Bounds covering the whole earth.
    pub const WORLD: Self = Self {
        min: Geodetic2d::NEGATIVE_EXTENT,
        max: Geodetic2d::POSITIVE_EXTENT,
    };

    /// Box spanned by two opposite corners given in any order.
    #[must_use]
    pub fn new(c0: Geodetic2d, c1: Geodetic2d) -> Self {
        Self {
            min: c0.min(c1),
            max: c0.max(c1),
        }
    }

    /// Smallest box containing every coordinate.
    ///
    /// # Errors
    ///
    /// Returns `GeodeticError::InsufficientCoordinates` if `coordinates` is
    /// empty.
    pub fn encompass(coordinates: &[Geodetic2d]) -> Result<Self> {
        let Some(first) = coordinates.first() else {
            return Err(GeodeticError::InsufficientCoordinates {
                required: 1,
                actual: 0,
            }
            .into());
        };
        let (min, max) = coordinates
            .iter()
            .fold((*first, *first), |(min, max), c| (min.min(*c), max.max(*c)));
        Ok(Self { min, max })
    }

    #[must_use]
    pub fn min(&self) -> Geodetic2d {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> Geodetic2d {
        self.max
    }

    #[must_use]
    pub fn min_latitude(&self) -> f64 {
        self.min.latitude()
    }

    #[must_use]
    pub fn max_latitude(&self) -> f64 {
        self.max.latitude()
    }

    #[must_use]
    pub fn min_longitude(&self) -> f64 {
        self.min.longitude()
    }

    #[must_use]
    pub fn max_longitude(&self) -> f64 {
        self.max.longitude()
    }

    /// Planar centre of the box.
    #[must_use]
    pub fn centre(&self) -> Geodetic2d {
        Geodetic2d::from_point(self.min.point().midpoint(self.max.point()))
    }

    /// Corners in clockwise order starting at `min`.
    #[must_use]
    pub fn corners(&self) -> [Geodetic2d; 4] {
        [
            self.min,
            Geodetic2d::new(self.max.latitude(), self.min.longitude()),
            self.max,
            Geodetic2d::new(self.min.latitude(), self.max.longitude()),
        ]
    }

    /// Inclusive containment test.
    #[must_use]
    pub fn contains(&self, coordinate: Geodetic2d) -> bool {
        (self.min_latitude()..=self.max_latitude()).contains(&coordinate.latitude())
            && (self.min_longitude()..=self.max_longitude()).contains(&coordinate.longitude())
    }

    #[must_use]
    pub fn contains_box(&self, other: &Self) -> bool {
        self.contains(other.min) && self.contains(other.max)
    }

    /// Whether the boxes overlap, touching edges included.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.min_latitude() <= other.max_latitude()
            && other.min_latitude() <= self.max_latitude()
            && self.min_longitude() <= other.max_longitude()
            && other.min_longitude() <= self.max_longitude()
    }

    /// Moves `coordinate` onto the nearest point inside the box.
    #[must_use]
    pub fn clamp(&self, coordinate: Geodetic2d) -> Geodetic2d {
        coordinate.clamp(
            self.max_latitude(),
            self.min_latitude(),
            self.max_longitude(),
            self.min_longitude(),
        )
    }

    /// Grows the box by pushing each corner `metres / 2` outwards along the
    /// diagonal.
    #[must_use]
    pub fn expand(&self, metres: f64) -> Self {
        Self::new(
            self.min.offset(metres * 0.5, 225.0),
            self.max.offset(metres * 0.5, 45.0),
        )
    }
}

impl fmt::Display for GeodeticBox2d {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "A{}, B{}", self.min, self.max)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::vector::Vector2d;
    use crate::MapError;

    fn sample() -> GeodeticBox2d {
        GeodeticBox2d::new(Geodetic2d::new(10.0, 20.0), Geodetic2d::new(-10.0, -20.0))
    }

    #[test]
    fn corners_are_normalised() {
        let b = sample();
        assert_eq!(b.min(), Geodetic2d::new(-10.0, -20.0));
        assert_eq!(b.max(), Geodetic2d::new(10.0, 20.0));
        assert_eq!(b.centre(), Geodetic2d::MERIDIAN);
        let ring: Vec<Vector2d> = b.corners().iter().map(Geodetic2d::point).collect();
        assert!(Vector2d::clockwise(&ring).unwrap());
    }

    #[test]
    fn containment() {
        let b = sample();
        assert!(b.contains(Geodetic2d::new(10.0, 20.0)));
        assert!(b.contains(Geodetic2d::new(0.0, 0.0)));
        assert!(!b.contains(Geodetic2d::new(0.0, 20.5)));
        assert!(GeodeticBox2d::WORLD.contains_box(&b));
        assert!(!b.contains_box(&GeodeticBox2d::WORLD));
    }

    #[test]
    fn intersection() {
        let b = sample();
        let touching = GeodeticBox2d::new(Geodetic2d::new(10.0, 20.0), Geodetic2d::new(30.0, 40.0));
        let apart = GeodeticBox2d::new(Geodetic2d::new(11.0, 21.0), Geodetic2d::new(30.0, 40.0));
        assert!(b.intersects(&touching));
        assert!(touching.intersects(&b));
        assert!(!b.intersects(&apart));
    }

    #[test]
    fn encompass_and_clamp() {
        let coords = [
            Geodetic2d::new(5.0, -3.0),
            Geodetic2d::new(-2.0, 7.0),
            Geodetic2d::new(1.0, 1.0),
        ];
        let b = GeodeticBox2d::encompass(&coords).unwrap();
        assert_eq!(b, GeodeticBox2d::new(Geodetic2d::new(-2.0, -3.0), Geodetic2d::new(5.0, 7.0)));
        assert!(coords.iter().all(|c| b.contains(*c)));
        assert_eq!(b.clamp(Geodetic2d::new(50.0, -50.0)), Geodetic2d::new(5.0, -3.0));
        assert!(matches!(
            GeodeticBox2d::encompass(&[]),
            Err(MapError::Geodetic(GeodeticError::InsufficientCoordinates { .. }))
        ));
    }

    #[test]
    fn expand_grows_every_side() {
        let b = sample();
        let grown = b.expand(100_000.0);
        assert!(grown.contains_box(&b));
        assert!(grown.min_latitude() < b.min_latitude());
        assert!(grown.max_longitude() > b.max_longitude());
    }

    #[test]
    fn display() {
        let b = GeodeticBox2d::new(Geodetic2d::new(0.0, 0.0), Geodetic2d::new(1.0, 2.0));
        assert_eq!(b.to_string(), "Aϕ[0]d,θ[0]d, Bϕ[1]d,θ[2]d");
    }
}
