//! Numeric constraint checks for `number` and `range` controls

use alloc::format;
use alloc::string::String;

/// Tolerance for step alignment
const STEP_EPSILON: f64 = 1e-9;

/// Parses a value the way a number control accepts it
///
/// Returns `None` for anything a user agent would flag as bad input:
/// leading `+`, surrounding whitespace, `inf`/`NaN`, trailing dot.
pub fn parse_number(value: &str) -> Option<f64> {
    if value.is_empty() || value.starts_with('+') || value.ends_with('.') {
        return None;
    }
    let allowed = |c: char| c.is_ascii_digit() || matches!(c, '.' | '-' | 'e' | 'E');
    if !value.chars().all(allowed) {
        return None;
    }
    value.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// `min`
pub fn validate_min(value: f64, min: f64) -> Result<(), String> {
    if value >= min {
        Ok(())
    } else {
        Err(format!(
            "Value must be greater than or equal to {}.",
            format_number(min)
        ))
    }
}

/// `max`
pub fn validate_max(value: f64, max: f64) -> Result<(), String> {
    if value <= max {
        Ok(())
    } else {
        Err(format!(
            "Value must be less than or equal to {}.",
            format_number(max)
        ))
    }
}

/// `step`, counted from `base` (the control's `min`, or zero)
///
/// A non-positive step disables the constraint, like `step="any"`.
pub fn validate_step(value: f64, step: f64, base: f64) -> Result<(), String> {
    if step <= 0.0 {
        return Ok(());
    }
    let steps = (value - base) / step;
    let nearest = round(steps);
    let drift = steps - nearest;
    if -STEP_EPSILON <= drift && drift <= STEP_EPSILON {
        return Ok(());
    }
    let lower = base + floor(steps) * step;
    let upper = lower + step;
    Err(format!(
        "Please enter a valid value. The two nearest valid values are {} and {}.",
        format_number(lower),
        format_number(upper)
    ))
}

/// Largest magnitude that still survives scaling by `1e10` exactly
const SCALE_BOUND: f64 = 1e5;

/// Renders a float without binary noise (`0.30000000000000004` → `0.3`)
pub fn format_number(n: f64) -> String {
    if floor(n) == n || !(-SCALE_BOUND < n && n < SCALE_BOUND) {
        return format!("{}", n);
    }
    let scaled = round(n * 1e10) / 1e10;
    format!("{}", scaled)
}

#[cfg(feature = "std")]
fn floor(x: f64) -> f64 {
    x.floor()
}

#[cfg(not(feature = "std"))]
fn floor(x: f64) -> f64 {
    // beyond 2^52 every f64 is whole; the cast below would saturate
    const INTEGRAL_BOUND: f64 = 4_503_599_627_370_496.0;
    if !(-INTEGRAL_BOUND < x && x < INTEGRAL_BOUND) {
        return x;
    }
    let t = x as i64 as f64;
    if t > x {
        t - 1.0
    } else {
        t
    }
}

fn round(x: f64) -> f64 {
    floor(x + 0.5)
}
