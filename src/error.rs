use thiserror::Error;

/// Top-level error type for the mapcore kernel.
#[derive(Debug, Error)]
pub enum MapError {
    #[error(transparent)]
    Math(#[from] MathError),

    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error(transparent)]
    Geodetic(#[from] GeodeticError),

    #[error(transparent)]
    Feature(#[from] FeatureError),
}

/// Errors raised by vector, matrix and quaternion operations.
#[derive(Debug, Error, PartialEq)]
pub enum MathError {
    #[error("{kind} index {index} is out of range [0, {len})")]
    IndexOutOfRange {
        kind: &'static str,
        index: usize,
        len: usize,
    },

    #[error("arithmetic failure: {0}")]
    Arithmetic(String),

    #[error("requires at least {required} points, got {actual}")]
    InsufficientPoints { required: usize, actual: usize },
}

/// Errors related to the transform hierarchy.
#[derive(Debug, Error, PartialEq)]
pub enum TransformError {
    #[error("transform not found: {0}")]
    NodeNotFound(String),

    #[error("cannot parent a transform to itself")]
    SelfParent,

    #[error("reparenting would create a cycle")]
    Cycle,
}

/// Errors related to geodetic coordinates and polygons.
#[derive(Debug, Error, PartialEq)]
pub enum GeodeticError {
    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("requires at least {required} coordinates, got {actual}")]
    InsufficientCoordinates { required: usize, actual: usize },

    #[error("{kind} index {index} is out of range [0, {len})")]
    IndexOutOfRange {
        kind: &'static str,
        index: usize,
        len: usize,
    },
}

/// Errors related to map features.
#[derive(Debug, Error, PartialEq)]
pub enum FeatureError {
    #[error("not implemented: {0}")]
    NotImplemented(&'static str),
}

/// Convenience type alias for results using [`MapError`].
pub type Result<T> = std::result::Result<T, MapError>;
