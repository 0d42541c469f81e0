/// Smallest power of two that is `>= v`. `0` maps to `1`.
///
/// Saturates at `2^31` for inputs above it.
#[must_use]
pub fn next_power_of_two_ceil(v: u32) -> u32 {
    v.checked_next_power_of_two().unwrap_or(1 << 31)
}

/// Texture side length able to hold `point_count` texels:
/// `next_power_of_two_ceil(ceil(sqrt(point_count)))`.
#[must_use]
pub fn atlas_side(point_count: usize) -> u32 {
    next_power_of_two_ceil(ceil_sqrt(point_count as u64) as u32)
}

/// Exact integer `ceil(sqrt(n))`.
fn ceil_sqrt(n: u64) -> u64 {
    let mut r = (n as f64).sqrt().ceil() as u64;
    // Correct float rounding in either direction
    while r.saturating_mul(r) < n {
        r += 1;
    }
    while r > 0 && (r - 1) * (r - 1) >= n {
        r -= 1;
    }
    r
}
