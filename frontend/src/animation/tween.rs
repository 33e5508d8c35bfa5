/// Linearly remaps `value` from `[in_start, in_end]` onto `[out_start, out_end]`.
///
/// The result is not clamped. A zero-width input range maps everything to
/// `out_start` instead of dividing by zero.
pub fn map_range(in_start: f64, in_end: f64, out_start: f64, out_end: f64, value: f64) -> f64 {
    let span = in_end - in_start;
    if span == 0.0 {
        return out_start;
    }
    out_start + (value - in_start) / span * (out_end - out_start)
}

pub fn clamp01(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Fraction of the way through a window, clamped before it is used.
///
/// Reaching either bound gives exactly 0 or 1.
pub fn window_progress(start: f64, end: f64, value: f64) -> f64 {
    if value <= start {
        return 0.0;
    }
    if value >= end {
        return 1.0;
    }
    clamp01(map_range(start, end, 0.0, 1.0, value))
}
