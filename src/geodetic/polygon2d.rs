use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Geodetic2d, GeodeticBox2d};
use crate::error::{GeodeticError, Result};
use crate::vector::vector2d::winding_sum;
use crate::vector::Vector2d;

/// Closed geodetic ring with optional holes.
///
/// The outer ring always repeats its first coordinate at the end. Holes are
/// polygons themselves and are expected to wind against the outer ring.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GeodeticPolygon2d {
    coordinates: Vec<Geodetic2d>,
    holes: Vec<GeodeticPolygon2d>,
    bounds: GeodeticBox2d,
}

impl GeodeticPolygon2d {
    /// Builds a polygon without holes, closing the ring if needed.
    ///
    /// # Errors
    ///
    /// Returns `GeodeticError::InsufficientCoordinates` for fewer than three
    /// coordinates.
    pub fn new(coordinates: Vec<Geodetic2d>) -> Result<Self> {
        Self::with_holes(coordinates, Vec::new())
    }

    /// Builds a polygon and one hole per coordinate list.
    ///
    /// # Errors
    ///
    /// Returns `GeodeticError::InsufficientCoordinates` if the outer ring or
    /// any hole has fewer than three coordinates.
    pub fn with_holes(
        mut coordinates: Vec<Geodetic2d>,
        holes: Vec<Vec<Geodetic2d>>,
    ) -> Result<Self> {
        if coordinates.len() < 3 {
            return Err(GeodeticError::InsufficientCoordinates {
                required: 3,
                actual: coordinates.len(),
            }
            .into());
        }
        let first = coordinates[0];
        if coordinates.last() != Some(&first) {
            coordinates.push(first);
        }
        let holes = holes
            .into_iter()
            .map(Self::new)
            .collect::<Result<Vec<_>>>()?;
        let bounds = GeodeticBox2d::encompass(&coordinates)?;
        Ok(Self {
            coordinates,
            holes,
            bounds,
        })
    }

    /// Attaches `holes` to an existing polygon, after any it already has.
    #[must_use]
    pub fn from_outer(mut outer: Self, holes: Vec<Self>) -> Self {
        outer.holes.extend(holes);
        outer
    }

    /// Coordinate count of the outer ring, closing coordinate included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    #[must_use]
    pub fn hole_count(&self) -> usize {
        self.holes.len()
    }

    /// # Errors
    ///
    /// Returns `GeodeticError::IndexOutOfRange` if `index >= self.len()`.
    pub fn get(&self, index: usize) -> Result<Geodetic2d> {
        self.coordinates.get(index).copied().ok_or_else(|| {
            GeodeticError::IndexOutOfRange {
                kind: "GeodeticPolygon2d coordinate",
                index,
                len: self.coordinates.len(),
            }
            .into()
        })
    }

    /// # Errors
    ///
    /// Returns `GeodeticError::IndexOutOfRange` if `index >= self.hole_count()`.
    pub fn hole(&self, index: usize) -> Result<&Self> {
        self.holes.get(index).ok_or_else(|| {
            GeodeticError::IndexOutOfRange {
                kind: "GeodeticPolygon2d hole",
                index,
                len: self.holes.len(),
            }
            .into()
        })
    }

    #[must_use]
    pub fn coordinates(&self) -> &[Geodetic2d] {
        &self.coordinates
    }

    #[must_use]
    pub fn holes(&self) -> &[Self] {
        &self.holes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Geodetic2d> {
        self.coordinates.iter()
    }

    #[must_use]
    pub fn bounds(&self) -> GeodeticBox2d {
        self.bounds
    }

    /// Outer ring as planar `(longitude, latitude)` points.
    #[must_use]
    pub fn points(&self) -> Vec<Vector2d> {
        self.coordinates.iter().map(Geodetic2d::point).collect()
    }

    /// Winding of the outer ring in the longitude/latitude plane.
    #[must_use]
    pub fn clockwise(&self) -> bool {
        winding_sum(&self.points()).is_ok_and(|sum| sum > 0.0)
    }

    /// Whether every hole winds the opposite way to the outer ring.
    #[must_use]
    pub fn holes_oppose_outer(&self) -> bool {
        let outer = self.clockwise();
        self.holes.iter().all(|hole| hole.clockwise() != outer)
    }

    /// Polygon with every coordinate, holes included, expressed relative to
    /// `origin`.
    #[must_use]
    pub fn relative(&self, origin: Geodetic2d) -> Self {
        self.map_coordinates(&|c| c - origin)
    }

    /// Inverse of [`Self::relative`].
    #[must_use]
    pub fn absolute(&self, origin: Geodetic2d) -> Self {
        self.map_coordinates(&|c| c + origin)
    }

    /// Whether `coordinate` is a vertex of the outer ring or of a hole.
    #[must_use]
    pub fn has_vertex(&self, coordinate: Geodetic2d) -> bool {
        self.coordinates.contains(&coordinate)
            || self.holes.iter().any(|hole| hole.has_vertex(coordinate))
    }

    fn map_coordinates(&self, f: &dyn Fn(Geodetic2d) -> Geodetic2d) -> Self {
        Self {
            coordinates: self.coordinates.iter().map(|c| f(*c)).collect(),
            holes: self.holes.iter().map(|hole| hole.map_coordinates(f)).collect(),
            bounds: GeodeticBox2d::new(f(self.bounds.min()), f(self.bounds.max())),
        }
    }
}

impl<'a> IntoIterator for &'a GeodeticPolygon2d {
    type Item = &'a Geodetic2d;
    type IntoIter = std::slice::Iter<'a, Geodetic2d>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for GeodeticPolygon2d {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, c) in self.coordinates.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{c}")?;
        }
        f.write_str(")")?;
        if !self.holes.is_empty() {
            write!(f, " with {} holes", self.holes.len())?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::MapError;

    /// Unit square in the lon/lat plane, wound clockwise.
    fn unit_square() -> Vec<Geodetic2d> {
        vec![
            Geodetic2d::new(0.0, 0.0),
            Geodetic2d::new(1.0, 0.0),
            Geodetic2d::new(1.0, 1.0),
            Geodetic2d::new(0.0, 1.0),
        ]
    }

    fn inner_square() -> Vec<Geodetic2d> {
        vec![
            Geodetic2d::new(0.25, 0.25),
            Geodetic2d::new(0.25, 0.75),
            Geodetic2d::new(0.75, 0.75),
            Geodetic2d::new(0.75, 0.25),
        ]
    }

    #[test]
    fn ring_is_closed_once() {
        let open = GeodeticPolygon2d::new(unit_square()).unwrap();
        assert_eq!(open.len(), 5);
        assert_eq!(open.get(4).unwrap(), open.get(0).unwrap());

        let mut closed_coords = unit_square();
        closed_coords.push(closed_coords[0]);
        let closed = GeodeticPolygon2d::new(closed_coords).unwrap();
        assert_eq!(closed.len(), 5);
        assert_eq!(open, closed);
    }

    #[test]
    fn rejects_short_rings() {
        let err = GeodeticPolygon2d::new(unit_square()[..2].to_vec()).unwrap_err();
        assert!(matches!(
            err,
            MapError::Geodetic(GeodeticError::InsufficientCoordinates {
                required: 3,
                actual: 2
            })
        ));
        let err = GeodeticPolygon2d::with_holes(unit_square(), vec![vec![Geodetic2d::MERIDIAN]])
            .unwrap_err();
        assert!(matches!(
            err,
            MapError::Geodetic(GeodeticError::InsufficientCoordinates { actual: 1, .. })
        ));
    }

    #[test]
    fn index_access() {
        let p = GeodeticPolygon2d::with_holes(unit_square(), vec![inner_square()]).unwrap();
        assert_eq!(p.get(2).unwrap(), Geodetic2d::new(1.0, 1.0));
        assert_eq!(p.hole_count(), 1);
        assert_eq!(p.hole(0).unwrap().len(), 5);
        assert!(matches!(
            p.get(5),
            Err(MapError::Geodetic(GeodeticError::IndexOutOfRange { index: 5, len: 5, .. }))
        ));
        assert!(matches!(
            p.hole(1),
            Err(MapError::Geodetic(GeodeticError::IndexOutOfRange { index: 1, len: 1, .. }))
        ));
        assert_eq!(p.iter().count(), 5);
        let mut visited = Vec::new();
        for c in &p {
            visited.push(*c);
        }
        assert_eq!(visited.first(), Some(&Geodetic2d::MERIDIAN));
        assert_eq!(visited.last(), Some(&Geodetic2d::MERIDIAN));
    }

    #[test]
    fn winding_of_unit_square() {
        let square = GeodeticPolygon2d::new(unit_square()).unwrap();
        assert!(square.clockwise());

        let mut reversed = unit_square();
        reversed.reverse();
        assert!(!GeodeticPolygon2d::new(reversed).unwrap().clockwise());
    }

    #[test]
    fn holes_oppose_outer() {
        let good = GeodeticPolygon2d::with_holes(unit_square(), vec![inner_square()]).unwrap();
        assert!(good.holes_oppose_outer());

        let mut same = inner_square();
        same.reverse();
        let bad = GeodeticPolygon2d::with_holes(unit_square(), vec![same]).unwrap();
        assert!(!bad.holes_oppose_outer());
    }

    #[test]
    fn bounds_cover_ring() {
        let p = GeodeticPolygon2d::new(unit_square()).unwrap();
        assert_eq!(p.bounds().min(), Geodetic2d::new(0.0, 0.0));
        assert_eq!(p.bounds().max(), Geodetic2d::new(1.0, 1.0));
    }

    #[test]
    fn relative_round_trip() {
        let p = GeodeticPolygon2d::with_holes(unit_square(), vec![inner_square()]).unwrap();
        let origin = Geodetic2d::new(10.0, -5.0);
        let shifted = p.relative(origin);
        assert_eq!(shifted.get(0).unwrap(), Geodetic2d::new(-10.0, 5.0));
        assert_eq!(shifted.hole(0).unwrap().get(0).unwrap(), Geodetic2d::new(-9.75, 5.25));
        assert_eq!(shifted.bounds().max(), Geodetic2d::new(-9.0, 6.0));
        assert_eq!(shifted.absolute(origin), p);
    }

    #[test]
    fn structural_equality_and_hash() {
        let a = GeodeticPolygon2d::with_holes(unit_square(), vec![inner_square()]).unwrap();
        let b = GeodeticPolygon2d::from_outer(
            GeodeticPolygon2d::new(unit_square()).unwrap(),
            vec![GeodeticPolygon2d::new(inner_square()).unwrap()],
        );
        assert_eq!(a, b);
        let set: HashSet<_> = [a.clone(), b].into_iter().collect();
        assert_eq!(set.len(), 1);
        assert_ne!(a, GeodeticPolygon2d::new(unit_square()).unwrap());
        assert!(a.has_vertex(Geodetic2d::new(0.75, 0.25)));
        assert!(!a.has_vertex(Geodetic2d::new(0.5, 0.5)));
    }

    #[test]
    fn display_lists_coordinates() {
        let p = GeodeticPolygon2d::new(vec![
            Geodetic2d::new(0.0, 0.0),
            Geodetic2d::new(1.0, 0.0),
            Geodetic2d::new(0.0, 1.0),
        ])
        .unwrap();
        assert_eq!(
            p.to_string(),
            "(ϕ[0]d,θ[0]d, ϕ[1]d,θ[0]d, ϕ[0]d,θ[1]d, ϕ[0]d,θ[0]d)"
        );
    }
}
