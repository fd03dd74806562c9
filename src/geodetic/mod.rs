//! Geodetic coordinates, bounds and polygons.
//!
//! Latitude and longitude are in degrees. Planar helpers treat longitude as
//! x and latitude as y.

pub mod box2d;
pub mod geodetic2d;
pub mod geodetic3d;
pub mod polygon2d;

pub use box2d::GeodeticBox2d;
pub use geodetic2d::Geodetic2d;
pub use geodetic3d::Geodetic3d;
pub use polygon2d::GeodeticPolygon2d;
