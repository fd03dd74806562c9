//! Scalar constants, quantized comparison and the `nalgebra` bridge.

pub mod interop;
pub mod quantize;
pub mod scalar;
