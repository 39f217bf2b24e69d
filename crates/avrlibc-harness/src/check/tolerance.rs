//! ULP tolerance checker.

use crate::check::{CaseFailure, CheckPass, CheckResult, FailureKind};
use crate::table::TestCase;

/// Map a binary32 bit pattern onto a monotonic `u32` line: negative
/// patterns are complemented, non-negative ones are offset by 2^31.
#[must_use]
pub const fn ordered_bits(bits: u32) -> u32 {
    if (bits as i32) < 0 {
        !bits
    } else {
        bits.wrapping_add(0x8000_0000)
    }
}

/// Distance in units in the last place between two bit patterns.
/// `ulp_distance(a, b) == ulp_distance(b, a)`.
#[must_use]
pub const fn ulp_distance(a: u32, b: u32) -> u32 {
    ordered_bits(a).abs_diff(ordered_bits(b))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToleranceChecker {
    pub max_ulp: u32,
}

impl ToleranceChecker {
    #[must_use]
    pub const fn new(max_ulp: u32) -> Self {
        Self { max_ulp }
    }

    #[must_use]
    pub fn accepts(&self, actual: u32, expected: u32) -> bool {
        ulp_distance(actual, expected) <= self.max_ulp
    }

    /// Tables hold (argument bits, expected result bits).
    pub fn check<F>(&self, table: &[TestCase<u32, u32>], mut f: F) -> CheckResult
    where
        F: FnMut(u32) -> u32,
    {
        for (i, case) in table.iter().enumerate() {
            let actual = f(case.input);
            if !self.accepts(actual, case.expected) {
                return Err(CaseFailure::at(
                    i + 1,
                    FailureKind::Tolerance,
                    format!("{:#010x}", case.expected),
                    format!(
                        "{actual:#010x} ({} ulp > {})",
                        ulp_distance(actual, case.expected),
                        self.max_ulp
                    ),
                ));
            }
        }
        Ok(CheckPass { cases: table.len() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::case;

    #[test]
    fn zeros_are_adjacent_across_the_sign() {
        assert_eq!(ordered_bits(0x8000_0000), 0x7fff_ffff);
        assert_eq!(ordered_bits(0x0000_0000), 0x8000_0000);
        assert_eq!(ulp_distance(0x8000_0000, 0x0000_0000), 1);
        assert_eq!(ulp_distance(0x8000_0001, 0x0000_0001), 3);
    }

    #[test]
    fn ordering_is_monotonic_in_value() {
        let values = [-f32::MAX, -1.0, -f32::MIN_POSITIVE, -0.0, 0.0, 1e-45, 1.0, f32::MAX];
        for pair in values.windows(2) {
            assert!(ordered_bits(pair[0].to_bits()) < ordered_bits(pair[1].to_bits()));
        }
    }

    #[test]
    fn distance_is_symmetric() {
        let samples = [0x3f80_0000u32, 0xbf80_0000, 0x0000_0001, 0x8000_0001, 0x7f7f_ffff];
        for &a in &samples {
            for &b in &samples {
                assert_eq!(ulp_distance(a, b), ulp_distance(b, a));
            }
        }
    }

    #[test]
    fn threshold_is_inclusive() {
        let checker = ToleranceChecker::new(2);
        assert!(checker.accepts(0x3f80_0002, 0x3f80_0000));
        assert!(!checker.accepts(0x3f80_0003, 0x3f80_0000));
        assert!(checker.accepts(0x8000_0001, 0x0000_0000));
    }

    #[test]
    fn reports_first_case_out_of_tolerance() {
        let table = [case(1u32, 0x3f80_0000u32), case(2, 0x3f80_0000), case(3, 0x3f80_0000)];
        let err = ToleranceChecker::new(2)
            .check(&table, |x| 0x3f80_0000 + if x == 1 { 2 } else { 5 })
            .unwrap_err();
        assert_eq!(err.index, 2);
        assert_eq!(err.kind, FailureKind::Tolerance);
        assert!(err.actual.contains("5 ulp"));
    }
}
