use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{normalise_name, resolve_connections, resolve_ring_connections, Feature};
use crate::geodetic::{Geodetic2d, GeodeticPolygon2d};

/// Named polygonal feature such as a lake, park or building footprint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Area {
    guid: Uuid,
    name: String,
    polygon: GeodeticPolygon2d,
}

impl Area {
    #[must_use]
    pub fn new(guid: Uuid, name: &str, polygon: GeodeticPolygon2d) -> Self {
        Self {
            guid,
            name: normalise_name(name),
            polygon,
        }
    }

    /// Creates an area under a fresh v4 identifier.
    #[must_use]
    pub fn with_random_id(name: &str, polygon: GeodeticPolygon2d) -> Self {
        Self::new(Uuid::new_v4(), name, polygon)
    }

    #[must_use]
    pub fn polygon(&self) -> &GeodeticPolygon2d {
        &self.polygon
    }

    /// Per ring (outer first, then holes), which vertices equal `coordinate`.
    #[must_use]
    pub fn connections_to_coordinate(&self, coordinate: Geodetic2d) -> Vec<Vec<bool>> {
        std::iter::once(&self.polygon)
            .chain(self.polygon.holes())
            .map(|ring| resolve_connections(ring.coordinates(), coordinate))
            .collect()
    }

    /// Per ring (outer first, then holes), which vertices are shared with
    /// `other`. The outer ring is matched against the other outer ring and
    /// each hole against every hole of `other`.
    #[must_use]
    pub fn connections_to_area(&self, other: &Area) -> Vec<Vec<bool>> {
        let outer = resolve_ring_connections(
            self.polygon.coordinates(),
            other.polygon.coordinates(),
        );
        let holes = self.polygon.holes().iter().map(|hole| {
            let mut marks = vec![false; hole.len()];
            for other_hole in other.polygon.holes() {
                let shared = resolve_ring_connections(hole.coordinates(), other_hole.coordinates());
                for (mark, hit) in marks.iter_mut().zip(shared) {
                    *mark |= hit;
                }
            }
            marks
        });
        std::iter::once(outer).chain(holes).collect()
    }
}

impl Feature for Area {
    fn guid(&self) -> Uuid {
        self.guid
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn relative(&self, origin: Geodetic2d) -> Box<dyn Feature> {
        Box::new(Self {
            polygon: self.polygon.relative(origin),
            ..self.clone()
        })
    }

    fn absolute(&self, origin: Geodetic2d) -> Box<dyn Feature> {
        Box::new(Self {
            polygon: self.polygon.absolute(origin),
            ..self.clone()
        })
    }

    fn connected_to(&self, coordinate: Geodetic2d) -> bool {
        self.polygon.has_vertex(coordinate)
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Area: {} - '{}' - {}", self.guid, self.name, self.polygon)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::error::FeatureError;
    use crate::MapError;

    fn square(offset: f64) -> GeodeticPolygon2d {
        GeodeticPolygon2d::new(vec![
            Geodetic2d::new(offset, offset),
            Geodetic2d::new(offset + 1.0, offset),
            Geodetic2d::new(offset + 1.0, offset + 1.0),
            Geodetic2d::new(offset, offset + 1.0),
        ])
        .unwrap()
    }

    fn fixed_id() -> Uuid {
        Uuid::from_u128(0x0123_4567_89ab_cdef_0123_4567_89ab_cdef)
    }

    #[test]
    fn blank_name_is_empty() {
        let area = Area::new(fixed_id(), "   ", square(0.0));
        assert_eq!(area.name(), "");
        assert_eq!(area.guid(), fixed_id());
    }

    #[test]
    fn random_ids_differ() {
        let a = Area::with_random_id("park", square(0.0));
        let b = Area::with_random_id("park", square(0.0));
        assert_ne!(a.guid(), b.guid());
        assert_ne!(a, b);
    }

    #[test]
    fn structural_equality() {
        let a = Area::new(fixed_id(), "lake", square(0.0));
        let b = Area::new(fixed_id(), "lake", square(0.0));
        assert_eq!(a, b);
        let set: HashSet<_> = [a.clone(), b].into_iter().collect();
        assert_eq!(set.len(), 1);
        assert_ne!(a, Area::new(fixed_id(), "pond", square(0.0)));
        assert_ne!(a, Area::new(fixed_id(), "lake", square(1.0)));
    }

    #[test]
    fn generic_equality_is_unimplemented() {
        let a = Area::new(fixed_id(), "lake", square(0.0));
        let err = a.feature_eq(&a).unwrap_err();
        assert!(matches!(
            err,
            MapError::Feature(FeatureError::NotImplemented(_))
        ));
    }

    #[test]
    fn coordinate_connections_per_ring() {
        let polygon = GeodeticPolygon2d::with_holes(
            square(0.0).coordinates().to_vec(),
            vec![vec![
                Geodetic2d::new(0.25, 0.25),
                Geodetic2d::new(0.25, 0.75),
                Geodetic2d::new(0.75, 0.75),
            ]],
        )
        .unwrap();
        let area = Area::new(fixed_id(), "yard", polygon);

        let hits = area.connections_to_coordinate(Geodetic2d::new(1.0, 1.0));
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0], vec![false, false, true, false, false]);
        assert!(hits[1].iter().all(|hit| !hit));

        assert!(area.connected_to(Geodetic2d::new(0.75, 0.75)));
        assert!(!area.connected_to(Geodetic2d::new(0.5, 0.5)));
    }

    #[test]
    fn shared_vertices_with_neighbour() {
        let a = Area::new(fixed_id(), "a", square(0.0));
        let b = Area::with_random_id("b", square(1.0));
        let shared = a.connections_to_area(&b);
        assert_eq!(shared, vec![vec![false, false, true, false, false]]);
    }

    #[test]
    fn relative_feature_round_trip() {
        let area = Area::new(fixed_id(), "lake", square(0.0));
        let origin = Geodetic2d::new(2.0, 3.0);
        let moved = area.relative(origin);
        assert_eq!(moved.guid(), area.guid());
        assert!(moved.connected_to(Geodetic2d::new(-2.0, -3.0)));
        let back = moved.absolute(origin);
        assert!(back.connected_to(Geodetic2d::MERIDIAN));
        assert_eq!(back.name(), "lake");
    }

    #[test]
    fn display_and_json() {
        let area = Area::new(fixed_id(), "lake", square(0.0));
        let text = area.to_string();
        assert!(text.starts_with(
            "Area: 01234567-89ab-cdef-0123-456789abcdef - 'lake' - (ϕ[0]d,θ[0]d"
        ));

        let json = serde_json::to_string(&area).unwrap();
        let parsed: Area = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, area);
    }
}
