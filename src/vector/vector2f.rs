use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Div, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

use super::{index_error, write_f32, Vector2d};
use crate::error::Result;
use crate::math::quantize::{hash_f32, key_f32};
use crate::math::scalar::divide_f32;

/// Two-component single-precision vector.
///
/// Equality and hashing are quantized to 6 decimal places.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Vector2f {
    pub x: f32,
    pub y: f32,
}

impl Vector2f {
    pub const ZERO: Self = Self::splat(0.0);
    pub const ONE: Self = Self::splat(1.0);
    pub const UP: Self = Self::new(0.0, 1.0);
    pub const DOWN: Self = Self::new(0.0, -1.0);
    pub const RIGHT: Self = Self::new(1.0, 0.0);
    pub const LEFT: Self = Self::new(-1.0, 0.0);
    pub const MAX: Self = Self::splat(f32::MAX);
    pub const MIN: Self = Self::splat(f32::MIN);
    pub const POSITIVE_INFINITY: Self = Self::splat(f32::INFINITY);
    pub const NEGATIVE_INFINITY: Self = Self::splat(f32::NEG_INFINITY);
    pub const NAN: Self = Self::splat(f32::NAN);

    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn splat(value: f32) -> Self {
        Self { x: value, y: value }
    }

    /// Returns the component at `index`.
    ///
    /// # Errors
    ///
    /// Returns `MathError::IndexOutOfRange` if `index > 1`.
    pub fn get(&self, index: usize) -> Result<f32> {
        match index {
            0 => Ok(self.x),
            1 => Ok(self.y),
            _ => Err(index_error("Vector2f", index, 2)),
        }
    }

    /// Widens to double precision without rounding.
    #[must_use]
    pub fn to_f64(&self) -> Vector2d {
        Vector2d::new(f64::from(self.x), f64::from(self.y))
    }

    #[must_use]
    pub fn min_component(&self) -> f32 {
        self.x.min(self.y)
    }

    #[must_use]
    pub fn max_component(&self) -> f32 {
        self.x.max(self.y)
    }

    #[must_use]
    pub fn magnitude(&self) -> f32 {
        self.sqr_magnitude().sqrt()
    }

    #[must_use]
    pub fn sqr_magnitude(&self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    /// Unit vector in this direction, or zero for a zero or non-finite
    /// magnitude.
    #[must_use]
    pub fn normalised(&self) -> Self {
        let magnitude = self.magnitude();
        if magnitude == 0.0 || !magnitude.is_finite() {
            return Self::ZERO;
        }
        *self / magnitude
    }

    pub fn normalise(&mut self) {
        *self = self.normalised();
    }

    pub fn normalize(&mut self) {
        self.normalise();
    }

    #[must_use]
    pub fn is_nan(&self) -> bool {
        self.x.is_nan() || self.y.is_nan()
    }

    #[must_use]
    pub fn dot(&self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y
    }
}

impl PartialEq for Vector2f {
    fn eq(&self, other: &Self) -> bool {
        key_f32(self.x) == key_f32(other.x) && key_f32(self.y) == key_f32(other.y)
    }
}

impl Eq for Vector2f {}

impl Hash for Vector2f {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_f32(self.x, state);
        hash_f32(self.y, state);
    }
}

impl fmt::Display for Vector2f {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        write_f32(f, self.x)?;
        f.write_str("]f,[")?;
        write_f32(f, self.y)?;
        f.write_str("]f")
    }
}

impl Neg for Vector2f {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl Add for Vector2f {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector2f {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vector2f {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Mul<Vector2f> for f32 {
    type Output = Vector2f;

    fn mul(self, rhs: Vector2f) -> Vector2f {
        rhs * self
    }
}

impl Div<f32> for Vector2f {
    type Output = Self;

    fn div(self, rhs: f32) -> Self {
        Self::new(divide_f32(self.x, rhs), divide_f32(self.y, rhs))
    }
}

impl Div<Vector2f> for f32 {
    type Output = Vector2f;

    fn div(self, rhs: Vector2f) -> Vector2f {
        Vector2f::new(divide_f32(self, rhs.x), divide_f32(self, rhs.y))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::hash_map::DefaultHasher;

    use super::*;

    fn hash_of(v: &Vector2f) -> u64 {
        let mut hasher = DefaultHasher::new();
        v.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn display_uses_glyphs() {
        let v = Vector2d::new(72.002_311_593_573_15, 67.764_513_246_782_21).high();
        assert_eq!(v.to_string(), "[72.00231]f,[67.76451]f");
        assert_eq!(Vector2f::POSITIVE_INFINITY.to_string(), "[∞]f,[∞]f");
        assert_eq!(Vector2f::NEGATIVE_INFINITY.to_string(), "[-∞]f,[-∞]f");
        assert_eq!(Vector2f::ZERO.to_string(), "[0]f,[0]f");
    }

    #[test]
    fn quantized_equality_at_six_digits() {
        let a = Vector2f::new(72.002_311, 1.0);
        let b = Vector2f::new(72.002_316, 1.0);
        assert_ne!(a, b);
        let c = Vector2f::new(0.1 + 0.2, 0.0);
        let d = Vector2f::new(0.3, -0.0);
        assert_eq!(c, d);
        assert_eq!(hash_of(&c), hash_of(&d));
    }

    #[test]
    fn division_and_normalisation() {
        assert_eq!(Vector2f::ONE / 0.0, Vector2f::POSITIVE_INFINITY);
        assert!((Vector2f::ZERO / 0.0).is_nan());
        assert_eq!(Vector2f::POSITIVE_INFINITY.normalised(), Vector2f::ZERO);
        assert_eq!(Vector2f::new(0.0, 2.0).normalised(), Vector2f::UP);
        assert!(Vector2f::ONE.get(2).is_err());
    }

    #[test]
    fn widening_is_exact() {
        let v = Vector2f::new(0.1, -3.5);
        let wide = v.to_f64();
        assert_eq!(wide.x.to_bits(), f64::from(0.1_f32).to_bits());
        assert_eq!(wide.y.to_bits(), (-3.5_f64).to_bits());
    }
}
