//! Layout constraints and measurement vocabulary.

use thiserror::Error;

use crate::px::Px;

/// How much space a dimension may occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimensionValue {
    /// Exactly this many pixels.
    Fixed(Px),
    /// As small as the content allows, within the optional bounds.
    Wrap {
        /// Lower bound, if any.
        min: Option<Px>,
        /// Upper bound, if any.
        max: Option<Px>,
    },
    /// As large as the parent allows, within the optional bounds.
    Fill {
        /// Lower bound, if any.
        min: Option<Px>,
        /// Upper bound, if any.
        max: Option<Px>,
    },
}

impl DimensionValue {
    /// The largest pixel extent this dimension can resolve to, if bounded.
    pub fn get_max(&self) -> Option<Px> {
        match self {
            DimensionValue::Fixed(value) => Some(*value),
            DimensionValue::Wrap { max, .. } | DimensionValue::Fill { max, .. } => *max,
        }
    }

    /// The smallest pixel extent this dimension can resolve to, if bounded.
    pub fn get_min(&self) -> Option<Px> {
        match self {
            DimensionValue::Fixed(value) => Some(*value),
            DimensionValue::Wrap { min, .. } | DimensionValue::Fill { min, .. } => *min,
        }
    }
}

/// Width and height constraints handed to a widget during measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Constraint {
    /// Horizontal constraint.
    pub width: DimensionValue,
    /// Vertical constraint.
    pub height: DimensionValue,
}

impl Constraint {
    /// Creates a constraint from both dimensions.
    pub const fn new(width: DimensionValue, height: DimensionValue) -> Self {
        Self { width, height }
    }
}

/// A measured size produced by a layout pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ComputedData {
    /// Measured width.
    pub width: Px,
    /// Measured height.
    pub height: Px,
}

impl ComputedData {
    /// A zero-sized measurement.
    pub const ZERO: Self = Self {
        width: Px::ZERO,
        height: Px::ZERO,
    };
}

/// Whether content flows left-to-right or right-to-left.
///
/// Flips the sign of horizontal offsets; vertical layout is unaffected.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum LayoutDirection {
    /// Content flows left to right.
    #[default]
    Ltr,
    /// Content flows right to left.
    Rtl,
}

impl LayoutDirection {
    /// Sign applied to horizontal offsets: `+1` for LTR, `-1` for RTL.
    pub fn horizontal_sign(self) -> i32 {
        match self {
            LayoutDirection::Ltr => 1,
            LayoutDirection::Rtl => -1,
        }
    }
}

/// Errors raised while measuring a widget.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MeasurementError {
    /// A `Fill` dimension had no upper bound to fill.
    #[error("cannot fill an unbounded {0} axis")]
    UnboundedFill(&'static str),
}

/// Resolves a dimension against a measured content extent.
pub(crate) fn resolve_dimension(
    dimension: DimensionValue,
    measured: Px,
    axis: &'static str,
) -> Result<Px, MeasurementError> {
    match dimension {
        DimensionValue::Fixed(value) => Ok(value),
        DimensionValue::Wrap { min, max } => Ok(min
            .unwrap_or(Px::ZERO)
            .max(measured)
            .min(max.unwrap_or(Px::MAX))),
        DimensionValue::Fill { min, max } => {
            let max = max.ok_or(MeasurementError::UnboundedFill(axis))?;
            let mut value = max.max(measured);
            if let Some(min) = min {
                value = value.max(min);
            }
            Ok(value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_dimension_resolves_to_itself() {
        let resolved = resolve_dimension(DimensionValue::Fixed(Px(640)), Px(10), "main");
        assert_eq!(resolved, Ok(Px(640)));
    }

    #[test]
    fn wrap_dimension_clamps_measured_content() {
        let wrap = DimensionValue::Wrap {
            min: Some(Px(100)),
            max: Some(Px(200)),
        };

        assert_eq!(resolve_dimension(wrap, Px(50), "main"), Ok(Px(100)));
        assert_eq!(resolve_dimension(wrap, Px(150), "main"), Ok(Px(150)));
        assert_eq!(resolve_dimension(wrap, Px(500), "main"), Ok(Px(200)));
    }

    #[test]
    fn unbounded_fill_is_an_error() {
        let fill = DimensionValue::Fill {
            min: None,
            max: None,
        };

        assert_eq!(
            resolve_dimension(fill, Px::ZERO, "main"),
            Err(MeasurementError::UnboundedFill("main"))
        );
    }

    #[test]
    fn layout_direction_signs() {
        assert_eq!(LayoutDirection::Ltr.horizontal_sign(), 1);
        assert_eq!(LayoutDirection::Rtl.horizontal_sign(), -1);
    }
}
