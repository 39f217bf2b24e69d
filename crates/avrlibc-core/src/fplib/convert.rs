//! Float <-> integer conversions.

/// Returned for overflow, infinities and NaN.
pub const CONVERSION_ERROR: i32 = i32::MIN;

/// `(long) x`: truncate toward zero.
///
/// Anything outside `[-2^31, 2^31)` and every NaN gives `0x80000000`.
pub fn fixsfsi(x: f32) -> i32 {
    if x.is_nan() {
        return CONVERSION_ERROR;
    }
    let t = x.trunc();
    if !(-2_147_483_648.0..2_147_483_648.0).contains(&t) {
        return CONVERSION_ERROR;
    }
    t as i32
}

/// `(unsigned long) x`.
///
/// Negative inputs above `-1.0` truncate to zero; everything else outside
/// `[0, 2^32)` gives `0x80000000` like the signed conversion.
pub fn fixunssfsi(x: f32) -> u32 {
    if x.is_nan() {
        return CONVERSION_ERROR as u32;
    }
    let t = x.trunc();
    if t == 0.0 {
        return 0;
    }
    if !(0.0..4_294_967_296.0).contains(&t) {
        return CONVERSION_ERROR as u32;
    }
    t as u32
}

/// `(float) n`, rounded to nearest even.
#[inline]
pub fn floatsisf(n: i32) -> f32 {
    n as f32
}

/// `(float) n` for unsigned long.
#[inline]
pub fn floatunsisf(n: u32) -> f32 {
    n as f32
}
