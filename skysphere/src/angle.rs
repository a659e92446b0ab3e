//! Fixed-point angle domain and trig lookup.
//!
//! Angles live in a 16-bit wrapping domain where 65536 raw units make one
//! full turn, so ordinary wrapping arithmetic is all the renormalization
//! that is ever needed. Sine and cosine are served from a precomputed
//! quarter-wave table scaled to `TRIG_SCALE`; the arctangent is the leaf
//! primitive the rest of the pipeline treats as given.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use std::ops::{Add, Neg, Sub};

/// Fixed-point scale of the trig lookups: `sin_lookup` and `cos_lookup`
/// return values in `[-TRIG_SCALE, TRIG_SCALE]`.
pub const TRIG_SCALE: i32 = 1 << 16;

/// Raw units in a quarter turn.
const QUARTER: usize = 1 << 14;

/// A signed angle in the 16-bit wrapping turn domain.
///
/// 65536 raw units = 360 degrees. Addition, subtraction and negation all
/// wrap, matching the natural modular arithmetic of the domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Angle(i16);

impl Angle {
    pub const ZERO: Angle = Angle(0);
    pub const QUARTER_TURN: Angle = Angle(QUARTER as i16);
    pub const HALF_TURN: Angle = Angle(i16::MIN);

    /// Wrap a raw 16-bit value into an angle.
    pub const fn from_raw(raw: i16) -> Self {
        Angle(raw)
    }

    /// The raw 16-bit representation.
    pub const fn raw(self) -> i16 {
        self.0
    }

    /// Convert from degrees, wrapping into the turn domain.
    pub fn from_degrees(deg: f64) -> Self {
        Angle(((deg / 360.0 * 65536.0).round() as i64) as i16)
    }

    /// Convert to degrees in `[-180, 180)`.
    pub fn to_degrees(self) -> f64 {
        self.0 as f64 * 360.0 / 65536.0
    }
}

impl Add for Angle {
    type Output = Angle;

    fn add(self, rhs: Angle) -> Angle {
        Angle(self.0.wrapping_add(rhs.0))
    }
}

impl Sub for Angle {
    type Output = Angle;

    fn sub(self, rhs: Angle) -> Angle {
        Angle(self.0.wrapping_sub(rhs.0))
    }
}

impl Neg for Angle {
    type Output = Angle;

    fn neg(self) -> Angle {
        Angle(self.0.wrapping_neg())
    }
}

/// First-quadrant sine samples, one per raw angle unit.
///
/// 16385 entries so both endpoints are exact: `SIN_QUARTER[0] == 0` and
/// `SIN_QUARTER[QUARTER] == TRIG_SCALE`.
static SIN_QUARTER: Lazy<Vec<i32>> = Lazy::new(|| {
    (0..=QUARTER)
        .map(|i| ((i as f64 / 65536.0 * TAU).sin() * TRIG_SCALE as f64).round() as i32)
        .collect()
});

/// Fixed-point sine, scaled to [`TRIG_SCALE`].
pub fn sin_lookup(a: Angle) -> i32 {
    let idx = a.raw() as u16 as usize;
    let pos = idx & (QUARTER - 1);
    match idx >> 14 {
        0 => SIN_QUARTER[pos],
        1 => SIN_QUARTER[QUARTER - pos],
        2 => -SIN_QUARTER[pos],
        _ => -SIN_QUARTER[QUARTER - pos],
    }
}

/// Fixed-point cosine, scaled to [`TRIG_SCALE`].
pub fn cos_lookup(a: Angle) -> i32 {
    sin_lookup(a + Angle::QUARTER_TURN)
}

/// Arctangent of `y/x` over the turn domain.
///
/// Leaf primitive of the pipeline; both arguments zero yields `Angle::ZERO`.
pub fn atan2_lookup(y: i32, x: i32) -> Angle {
    if x == 0 && y == 0 {
        return Angle::ZERO;
    }
    let turns = (y as f64).atan2(x as f64) / TAU;
    Angle(((turns * 65536.0).round() as i64) as i16)
}
