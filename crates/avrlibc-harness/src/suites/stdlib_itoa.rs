//! `itoa()` results, cross-checked against `strtol()` on the host.
//!
//! The table covers the inline, library and unknown-radix call shapes, which
//! all reduce to the same routine here, followed by invalid radixes and
//! decimal negatives. A final pass checks that only radix 10 is signed.

use serde_json::json;

use crate::check::{CaseFailure, CheckPass, CheckResult, FailureKind, index_code};
use crate::exit_code::ExitPolicy;
use crate::fixtures::{FixtureCase, FixtureSet};
use crate::routines::Routines;
use crate::suites::Suite;

pub(crate) const SUITE: Suite = Suite {
    name: "stdlib-itoa",
    symbol: "itoa",
    description: "itoa() patterns, invalid radixes, and signedness of radix 10 only",
    policy: ExitPolicy::FoldHundreds,
    run,
    export: Some(export),
};

/// Added to the index when `strtol` does not read the expected text back.
pub const CROSS_CHECK_BASE: i32 = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItoaCase {
    pub value: i16,
    pub radix: i32,
    pub expected: &'static str,
}

const fn t(value: i16, radix: i32, expected: &'static str) -> ItoaCase {
    ItoaCase {
        value,
        radix,
        expected,
    }
}

pub static CASES: [ItoaCase; 18] = [
    t(-12345, 10, "-12345"),
    t(35, 2, "100011"),
    t(35, 36, "z"),
    t(2, 1, ""),
    t(2, 37, ""),
    t(2, 0x0108, ""),
    // invalid radix
    t(0, 0, ""),
    t(0, 1, ""),
    t(0, 37, ""),
    t(10, 0x0102, ""),
    t(-256, -10, ""),
    // decimal negative
    t(-1, 10, "-1"),
    t(-255, 10, "-255"),
    t(-256, 10, "-256"),
    t(-257, 10, "-257"),
    t(-32767, 10, "-32767"),
    t(-32768, 10, "-32768"),
    t(-12345, 10, "-12345"),
];

/// Radixes of the signedness pass, numbered after [`CASES`].
pub const SIGN_RADIXES: std::ops::RangeInclusive<i32> = 2..=36;

pub fn run(r: &dyn Routines) -> CheckResult {
    for (i, c) in CASES.iter().enumerate() {
        let index = i + 1;
        if (2..=36).contains(&c.radix) {
            let (back, _) = r.strtol(c.expected.as_bytes(), c.radix);
            if back != i32::from(c.value) {
                return Err(CaseFailure::new(
                    CROSS_CHECK_BASE + index_code(index),
                    index,
                    FailureKind::CrossCheck,
                    c.value.to_string(),
                    format!("strtol({:?}, {}) = {back}", c.expected, c.radix),
                ));
            }
        }
        let got = r.itoa(c.value, c.radix);
        if got != c.expected {
            return Err(CaseFailure::at(
                index,
                FailureKind::Mismatch,
                format!("{:?}", c.expected),
                format!("{got:?}"),
            ));
        }
    }

    for (k, radix) in SIGN_RADIXES.enumerate() {
        let index = CASES.len() + k + 1;
        let got = r.itoa(-1, radix);
        if got.starts_with('-') != (radix == 10) {
            let want = if radix == 10 { "signed" } else { "unsigned" };
            return Err(CaseFailure::at(
                index,
                FailureKind::Mismatch,
                format!("{want} in radix {radix}"),
                format!("{got:?}"),
            ));
        }
    }

    Ok(CheckPass {
        cases: CASES.len() + SIGN_RADIXES.count(),
    })
}

pub fn export() -> FixtureSet {
    let cases = CASES
        .iter()
        .enumerate()
        .map(|(i, c)| FixtureCase {
            name: format!("itoa-{:03}", i + 1),
            function: "itoa".to_string(),
            inputs: json!({"value": c.value, "radix": c.radix}),
            expected_output: c.expected.to_string(),
            tolerance_ulp: None,
        })
        .collect();
    FixtureSet::new("stdlib", cases)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routines::Reference;

    /// Signs every radix, like `ltoa` on some hosts.
    struct AlwaysSigned;

    impl Routines for AlwaysSigned {
        fn itoa(&self, value: i16, radix: i32) -> String {
            if value < 0 && (2..=36).contains(&radix) {
                let digits = avrlibc_core::stdlib::utoa(value.unsigned_abs(), radix);
                format!("-{digits}")
            } else {
                avrlibc_core::stdlib::itoa(value, radix)
            }
        }
    }

    /// Drops the sign when parsing.
    struct UnsignedStrtol;

    impl Routines for UnsignedStrtol {
        fn strtol(&self, s: &[u8], base: i32) -> (i32, usize) {
            let s = s.strip_prefix(b"-").unwrap_or(s);
            avrlibc_core::stdlib::strtol(s, base)
        }
    }

    #[test]
    fn reference_passes() {
        assert_eq!(run(&Reference).map(|p| p.cases), Ok(18 + 35));
    }

    #[test]
    fn signed_non_decimal_radix_fails_sign_pass() {
        let err = run(&AlwaysSigned).unwrap_err();
        // radix 2 is the first row after the table
        assert_eq!(err.index, 19);
        assert_eq!(err.actual, "\"-1\"");
    }

    #[test]
    fn strtol_disagreement_is_reported_above_2000() {
        let err = run(&UnsignedStrtol).unwrap_err();
        assert_eq!(err.kind, FailureKind::CrossCheck);
        assert_eq!((err.index, err.code), (1, 2001));
        assert_eq!(ExitPolicy::FoldHundreds.fold(err.code), 101);
    }

    #[test]
    fn export_keeps_invalid_radix_rows() {
        let set = export();
        assert_eq!(set.cases.len(), CASES.len());
        assert_eq!(set.cases[6].inputs, json!({"value": 0, "radix": 0}));
        assert_eq!(set.cases[6].expected_output, "");
    }
}
