fn scale(digits: u32) -> f64 {
    (10.0 as f64).powi(digits as i32)
}

/// Maps `x` to an integer key holding `digits` decimals, so that values whose
/// difference is pure floating-point jitter share the same key.
///
/// Halves round toward positive infinity, so `-2.5` keys as `-2`.
pub fn quantize(x: f64, digits: u32) -> i64 {
    (x * scale(digits) + 0.5).floor() as i64
}

/// Inverse of [`quantize`]: the representative value of `key`.
pub fn dequantize(key: i64, digits: u32) -> f64 {
    key as f64 / scale(digits)
}
