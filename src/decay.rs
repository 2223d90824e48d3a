//! Freshness decay.
//!
//! An order's maximum age shrinks with its decay rate and with how hostile
//! its environment is: a temperature-controlled home shelf has factor
//! [`HOME_FACTOR`], the crowded overflow tier has [`OVERFLOW_FACTOR`].

/// Environment factor on a home shelf.
pub const HOME_FACTOR: u8 = 1;

/// Environment factor in the overflow tier.
pub const OVERFLOW_FACTOR: u8 = 2;

/// Maximum age in whole seconds, rounded half-up:
/// `floor(shelf_life / (1 + decay_rate * factor) + 0.5)`.
pub fn max_age(shelf_life: u32, decay_rate: f32, factor: u8) -> i64 {
    let divisor = 1.0 + f64::from(decay_rate) * f64::from(factor);
    (f64::from(shelf_life) / divisor + 0.5).floor() as i64
}
