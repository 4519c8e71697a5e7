//! Density-independent pixels.
//!
//! A [`Dp`] value scales to physical pixels through a global scale factor.
//! Headless mounts never set the factor, so it defaults to 1.0 and dp values
//! map one-to-one onto pixels.

use std::sync::OnceLock;

use parking_lot::RwLock;

use crate::px::Px;

/// Global scale factor used for dp-to-pixel conversion.
///
/// Set once at startup by an embedding that knows its display density. When
/// unset, conversions assume a factor of 1.0.
pub static SCALE_FACTOR: OnceLock<RwLock<f64>> = OnceLock::new();

fn scale_factor() -> f64 {
    SCALE_FACTOR.get().map(|lock| *lock.read()).unwrap_or(1.0)
}

/// A length in density-independent pixels.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub struct Dp(pub f64);

impl Dp {
    /// Zero dp.
    pub const ZERO: Self = Self(0.0);

    /// Creates a dp value.
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    /// Converts to physical pixels using the current scale factor.
    pub fn to_pixels_f64(self) -> f64 {
        self.0 * scale_factor()
    }

    /// Converts to physical pixels as `f32`.
    pub fn to_pixels_f32(self) -> f32 {
        self.to_pixels_f64() as f32
    }
}

impl From<Dp> for Px {
    fn from(dp: Dp) -> Self {
        Px::saturating_from_f32(dp.to_pixels_f64().round() as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dp_converts_one_to_one_without_scale_factor() {
        assert_eq!(Px::from(Dp(16.0)), Px(16));
        assert_eq!(Px::from(Dp::ZERO), Px::ZERO);
    }
}
