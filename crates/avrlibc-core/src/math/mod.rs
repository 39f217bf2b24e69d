//! Mathematical functions.
//!
//! avr-libc's `double` is binary32. Each function evaluates in binary64 and
//! rounds once, which keeps results within one ULP of the correctly rounded
//! value for the argument ranges the conformance tables cover.

pub mod trig;

pub use trig::{cos, sin, tan};

#[inline]
pub fn fabs(x: f32) -> f32 {
    f32::from_bits(x.to_bits() & 0x7fff_ffff)
}

#[inline]
pub fn sqrt(x: f32) -> f32 {
    x.sqrt()
}

#[inline]
pub fn floor(x: f32) -> f32 {
    x.floor()
}

#[inline]
pub fn ceil(x: f32) -> f32 {
    x.ceil()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fabs_clears_sign_of_zero_and_nan() {
        assert_eq!(fabs(-0.0).to_bits(), 0);
        assert_eq!(fabs(f32::from_bits(0xffc0_0001)).to_bits(), 0x7fc0_0001);
        assert_eq!(fabs(-2.5), 2.5);
    }

    #[test]
    fn rounding_helpers() {
        assert_eq!(sqrt(2.25), 1.5);
        assert_eq!(floor(-1.5), -2.0);
        assert_eq!(ceil(-1.5), -1.0);
    }
}
