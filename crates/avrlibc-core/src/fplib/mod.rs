//! Soft-float runtime entry points (`libgcc`-compatible names).
//!
//! The AVR compiler lowers every `float` operation to one of these calls.
//! Arithmetic is IEEE-754 binary32 with round-to-nearest-even; conversions
//! follow the avr-libc (and GCC/x86) convention of returning `0x80000000`
//! for every out-of-range or NaN input.

pub mod convert;

pub use convert::{fixsfsi, fixunssfsi, floatsisf, floatunsisf};

/// `x + y`.
#[inline]
pub fn addsf3(x: f32, y: f32) -> f32 {
    x + y
}

/// `x - y`.
#[inline]
pub fn subsf3(x: f32, y: f32) -> f32 {
    x - y
}

/// `x * y`.
#[inline]
pub fn mulsf3(x: f32, y: f32) -> f32 {
    x * y
}

/// `x / y`.
#[inline]
pub fn divsf3(x: f32, y: f32) -> f32 {
    x / y
}

/// Flip the sign bit only; NaN payloads pass through untouched.
#[inline]
pub fn negsf2(x: f32) -> f32 {
    f32::from_bits(x.to_bits() ^ 0x8000_0000)
}

/// Non-zero when either operand is NaN (`isunordered`).
#[inline]
pub fn unordsf2(x: f32, y: f32) -> i32 {
    i32::from(x.is_nan() || y.is_nan())
}

/// Three-way compare used by `__cmpsf2`: `-1`, `0`, `1`, or `1` when unordered.
pub fn cmpsf2(x: f32, y: f32) -> i32 {
    match x.partial_cmp(&y) {
        Some(core::cmp::Ordering::Less) => -1,
        Some(core::cmp::Ordering::Equal) => 0,
        Some(core::cmp::Ordering::Greater) | None => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PINF: u32 = 0x7f80_0000;
    const NINF: u32 = 0xff80_0000;

    fn add_bits(x: u32, y: u32) -> u32 {
        addsf3(f32::from_bits(x), f32::from_bits(y)).to_bits()
    }

    #[test]
    fn infinity_absorbs_finite_operands() {
        assert_eq!(add_bits(PINF, 0x0000_0001), PINF);
        assert_eq!(add_bits(0xff7f_ffff, PINF), PINF);
        assert_eq!(add_bits(NINF, 0x7f7f_ffff), NINF);
    }

    #[test]
    fn finite_overflow_rounds_to_infinity() {
        assert_eq!(add_bits(0x7f7f_ffff, 0x7f7f_ffff), PINF);
        assert_eq!(add_bits(0xff7f_ffff, 0xff00_0001), NINF);
    }

    #[test]
    fn exact_cancellation_gives_positive_zero() {
        assert_eq!(add_bits(0x3f80_0000, 0xbf80_0000), 0);
        assert_eq!(subsf3(-0.0, -0.0).to_bits(), 0);
    }

    #[test]
    fn negation_keeps_nan_payload() {
        let nan = f32::from_bits(0x7fc0_1234);
        assert_eq!(negsf2(nan).to_bits(), 0xffc0_1234);
        assert_eq!(negsf2(0.0).to_bits(), 0x8000_0000);
    }

    #[test]
    fn unordered_only_for_nan() {
        assert_eq!(unordsf2(f32::INFINITY, f32::NEG_INFINITY), 0);
        assert_eq!(unordsf2(f32::from_bits(0x7f80_0001), 1.0), 1);
        assert_eq!(unordsf2(0.0, f32::NAN), 1);
    }

    #[test]
    fn compare_treats_unordered_as_greater() {
        assert_eq!(cmpsf2(1.0, 2.0), -1);
        assert_eq!(cmpsf2(-0.0, 0.0), 0);
        assert_eq!(cmpsf2(f32::NAN, 0.0), 1);
    }

    #[test]
    fn mul_div_round_trip() {
        assert_eq!(mulsf3(3.0, 0.5), 1.5);
        assert_eq!(divsf3(1.0, 0.0), f32::INFINITY);
    }
}
