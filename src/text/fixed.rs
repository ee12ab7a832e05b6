//! 26.6 fixed-point numbers used for glyph positioning.
//!
//! Positions are carried with 6 fractional bits (1/64 pixel). This matches
//! the precision font sources report metrics in, and makes quantizing an
//! origin onto a coarser sub-pixel grid an exact integer operation.
//!
//! Values saturate at the `i32` range (about ±33.5 million pixels) instead of
//! wrapping.

use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Number of fractional bits.
pub const FRACTION_BITS: u32 = 6;

/// One whole pixel in fixed units.
pub const ONE: i32 = 1 << FRACTION_BITS;

const FRACTION_MASK: i32 = ONE - 1;

/// A signed 26.6 fixed-point value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fixed(pub i32);

impl Fixed {
    pub const ZERO: Fixed = Fixed(0);

    pub const fn from_int(value: i32) -> Self {
        Self(value.saturating_mul(ONE))
    }

    /// Converts a float, flooring anything finer than 1/64 pixel.
    ///
    /// Out of range values saturate and NaN becomes zero.
    pub fn from_f64(value: f64) -> Self {
        Self((value * ONE as f64).floor() as i32)
    }

    pub fn to_f64(self) -> f64 {
        self.0 as f64 / ONE as f64
    }

    /// Greatest integer less than or equal to the value.
    pub fn floor(self) -> i32 {
        self.0 >> FRACTION_BITS
    }

    /// Least integer greater than or equal to the value.
    pub fn ceil(self) -> i32 {
        self.0.saturating_add(FRACTION_MASK) >> FRACTION_BITS
    }

    /// The fractional bits only, always in `0..ONE`.
    pub fn fract(self) -> Self {
        Self(self.0 & FRACTION_MASK)
    }

    /// The value with its fractional bits cleared (rounded down).
    pub fn floor_to_pixel(self) -> Self {
        Self(self.0 & !FRACTION_MASK)
    }

    /// Rounds down to a multiple of `step` fixed units.
    pub fn quantize(self, step: i32) -> Self {
        debug_assert!(step > 0);
        Self(self.0.div_euclid(step) * step)
    }
}

impl Add for Fixed {
    type Output = Fixed;

    fn add(self, rhs: Fixed) -> Fixed {
        Fixed(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Fixed {
    fn add_assign(&mut self, rhs: Fixed) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sub for Fixed {
    type Output = Fixed;

    fn sub(self, rhs: Fixed) -> Fixed {
        Fixed(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for Fixed {
    fn sub_assign(&mut self, rhs: Fixed) {
        self.0 = self.0.saturating_sub(rhs.0);
    }
}

impl Neg for Fixed {
    type Output = Fixed;

    fn neg(self) -> Fixed {
        Fixed(self.0.saturating_neg())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FixedPoint {
    pub x: Fixed,
    pub y: Fixed,
}

impl FixedPoint {
    pub const fn new(x: Fixed, y: Fixed) -> Self {
        Self { x, y }
    }

    pub fn from_f64(x: f64, y: f64) -> Self {
        Self {
            x: Fixed::from_f64(x),
            y: Fixed::from_f64(y),
        }
    }
}

impl Add for FixedPoint {
    type Output = FixedPoint;

    fn add(self, rhs: FixedPoint) -> FixedPoint {
        FixedPoint::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// Axis-aligned rectangle; `min` is inclusive, `max` exclusive.
///
/// The y axis grows downwards, so glyph ink above the baseline has a
/// negative `min.y`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FixedRect {
    pub min: FixedPoint,
    pub max: FixedPoint,
}

impl FixedRect {
    pub const fn new(min: FixedPoint, max: FixedPoint) -> Self {
        Self { min, max }
    }

    pub fn width(&self) -> Fixed {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> Fixed {
        self.max.y - self.min.y
    }

    pub fn is_empty(&self) -> bool {
        self.width().ceil() <= 0 || self.height().ceil() <= 0
    }
}
