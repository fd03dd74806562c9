pub mod error;
pub mod feature;
pub mod geodetic;
pub mod math;
pub mod matrix;
pub mod quaternion;
pub mod transform;
pub mod vector;

pub use error::{MapError, Result};
pub use feature::{Area, Feature};
pub use geodetic::{Geodetic2d, Geodetic3d, GeodeticBox2d, GeodeticPolygon2d};
pub use matrix::{Matrix2d, Matrix3d, Matrix4d};
pub use quaternion::Quaterniond;
pub use transform::{Space, TransformId, TransformTree, Transformd};
pub use vector::{Vector2d, Vector2f, Vector3d, Vector3f, Vector4d, Vector4f};
