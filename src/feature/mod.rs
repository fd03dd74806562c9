//! Identified map features built on geodetic geometry.

pub mod area;

pub use area::Area;

use std::fmt;

use uuid::Uuid;

use crate::error::{FeatureError, Result};
use crate::geodetic::Geodetic2d;

/// Common surface of every map feature.
pub trait Feature: fmt::Debug + Send + Sync {
    fn guid(&self) -> Uuid;

    /// Display name, `""` when the feature is unnamed.
    fn name(&self) -> &str;

    /// Copy of the feature with its geometry expressed relative to `origin`.
    fn relative(&self, origin: Geodetic2d) -> Box<dyn Feature>;

    /// Copy of the feature with its geometry moved back from `origin`.
    fn absolute(&self, origin: Geodetic2d) -> Box<dyn Feature>;

    /// Whether `coordinate` is one of the feature's vertices.
    fn connected_to(&self, coordinate: Geodetic2d) -> bool;

    /// Equality across feature kinds.
    ///
    /// # Errors
    ///
    /// The default returns `FeatureError::NotImplemented`; concrete types
    /// compare through `PartialEq` instead.
    fn feature_eq(&self, _other: &dyn Feature) -> Result<bool> {
        Err(FeatureError::NotImplemented("feature equality").into())
    }
}

/// Empty or whitespace-only names collapse to `""`.
pub(crate) fn normalise_name(name: &str) -> String {
    if name.trim().is_empty() {
        String::new()
    } else {
        name.to_owned()
    }
}

/// Marks each host vertex equal to `subject`.
pub(crate) fn resolve_connections(host: &[Geodetic2d], subject: Geodetic2d) -> Vec<bool> {
    host.iter().map(|c| *c == subject).collect()
}

/// Marks each host vertex that appears anywhere in `subject`.
///
/// When both rings are the same, a vertex does not connect to itself.
pub(crate) fn resolve_ring_connections(host: &[Geodetic2d], subject: &[Geodetic2d]) -> Vec<bool> {
    let same = host == subject;
    host.iter()
        .enumerate()
        .map(|(i, a)| {
            subject
                .iter()
                .enumerate()
                .any(|(j, b)| !(same && i == j) && a == b)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_names_normalise() {
        assert_eq!(normalise_name(""), "");
        assert_eq!(normalise_name(" \t\n"), "");
        assert_eq!(normalise_name(" Lake "), " Lake ");
    }

    #[test]
    fn coordinate_connections() {
        let ring = [
            Geodetic2d::new(0.0, 0.0),
            Geodetic2d::new(1.0, 0.0),
            Geodetic2d::new(0.0, 0.0),
        ];
        assert_eq!(
            resolve_connections(&ring, Geodetic2d::MERIDIAN),
            vec![true, false, true]
        );
    }

    #[test]
    fn ring_connections_skip_identity() {
        let a = [
            Geodetic2d::new(0.0, 0.0),
            Geodetic2d::new(1.0, 0.0),
            Geodetic2d::new(1.0, 1.0),
        ];
        let b = [Geodetic2d::new(1.0, 1.0), Geodetic2d::new(5.0, 5.0)];
        assert_eq!(resolve_ring_connections(&a, &b), vec![false, false, true]);
        assert_eq!(resolve_ring_connections(&a, &a), vec![false, false, false]);
    }
}
