//! Cyclic angle arithmetic in degrees.

const FULL_TURN: f32 = 360.0;

/// Wrap an angle into `[0, 360)`.
///
/// Works for any finite input, including values many revolutions away from
/// zero. Non-finite input is returned unchanged.
pub fn normalize_degrees(degrees: f32) -> f32 {
    if !degrees.is_finite() {
        return degrees;
    }
    let wrapped = degrees.rem_euclid(FULL_TURN);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= FULL_TURN {
        0.0
    } else {
        wrapped
    }
}

/// Rotate `degrees` by `delta` and wrap the result.
pub fn add_degrees(degrees: f32, delta: f32) -> f32 {
    normalize_degrees(degrees + delta)
}
