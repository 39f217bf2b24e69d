//! `addsf3` with infinite operands and results. `Inf - Inf` is not covered.

use avrlibc_fixture_exec::format_bits;
use serde_json::json;

use crate::check::{CheckResult, check_exact};
use crate::exit_code::ExitPolicy;
use crate::fixtures::{FixtureCase, FixtureSet};
use crate::routines::Routines;
use crate::suites::Suite;
use crate::table::{TestCase, case};

pub(crate) const SUITE: Suite = Suite {
    name: "fplib-add-inf",
    symbol: "addsf3",
    description: "float addition with infinities and overflow to infinity",
    policy: ExitPolicy::Index,
    run,
    export: Some(export),
};

/// `x + y = z`, all as binary32 bit patterns.
pub static TABLE: [TestCase<(u32, u32), u32>; 52] = [
    // +Inf + finite -> +Inf
    case((0x7f80_0000, 0x0000_0001), 0x7f80_0000),
    case((0x7f80_0000, 0x007f_ffff), 0x7f80_0000),
    case((0x7f80_0000, 0x0080_0000), 0x7f80_0000),
    case((0x7f80_0000, 0x3f80_0000), 0x7f80_0000),
    case((0x7f80_0000, 0x7f7f_ffff), 0x7f80_0000),
    case((0x7f80_0000, 0x8000_0001), 0x7f80_0000),
    case((0x7f80_0000, 0x807f_ffff), 0x7f80_0000),
    case((0x7f80_0000, 0x8080_0000), 0x7f80_0000),
    case((0x7f80_0000, 0xbf80_0000), 0x7f80_0000),
    case((0x7f80_0000, 0xff7f_ffff), 0x7f80_0000),
    // -Inf + finite -> -Inf
    case((0xff80_0000, 0x0000_0001), 0xff80_0000),
    case((0xff80_0000, 0x007f_ffff), 0xff80_0000),
    case((0xff80_0000, 0x0080_0000), 0xff80_0000),
    case((0xff80_0000, 0x3f80_0000), 0xff80_0000),
    case((0xff80_0000, 0x7f7f_ffff), 0xff80_0000),
    case((0xff80_0000, 0x8000_0001), 0xff80_0000),
    case((0xff80_0000, 0x807f_ffff), 0xff80_0000),
    case((0xff80_0000, 0x8080_0000), 0xff80_0000),
    case((0xff80_0000, 0xbf80_0000), 0xff80_0000),
    case((0xff80_0000, 0xff7f_ffff), 0xff80_0000),
    // finite + +Inf -> +Inf
    case((0x0000_0001, 0x7f80_0000), 0x7f80_0000),
    case((0x007f_ffff, 0x7f80_0000), 0x7f80_0000),
    case((0x0080_0000, 0x7f80_0000), 0x7f80_0000),
    case((0x3f80_0000, 0x7f80_0000), 0x7f80_0000),
    case((0x7f7f_ffff, 0x7f80_0000), 0x7f80_0000),
    case((0x8000_0001, 0x7f80_0000), 0x7f80_0000),
    case((0x807f_ffff, 0x7f80_0000), 0x7f80_0000),
    case((0x8080_0000, 0x7f80_0000), 0x7f80_0000),
    case((0xbf80_0000, 0x7f80_0000), 0x7f80_0000),
    case((0xff7f_ffff, 0x7f80_0000), 0x7f80_0000),
    // finite + -Inf -> -Inf
    case((0x0000_0001, 0xff80_0000), 0xff80_0000),
    case((0x007f_ffff, 0xff80_0000), 0xff80_0000),
    case((0x0080_0000, 0xff80_0000), 0xff80_0000),
    case((0x3f80_0000, 0xff80_0000), 0xff80_0000),
    case((0x7f7f_ffff, 0xff80_0000), 0xff80_0000),
    case((0x8000_0001, 0xff80_0000), 0xff80_0000),
    case((0x807f_ffff, 0xff80_0000), 0xff80_0000),
    case((0x8080_0000, 0xff80_0000), 0xff80_0000),
    case((0xbf80_0000, 0xff80_0000), 0xff80_0000),
    case((0xff7f_ffff, 0xff80_0000), 0xff80_0000),
    // Inf + Inf -> Inf
    case((0x7f80_0000, 0x7f80_0000), 0x7f80_0000),
    case((0xff80_0000, 0xff80_0000), 0xff80_0000),
    // finite + finite overflows to Inf
    case((0x7f7f_ffff, 0x7f7f_ffff), 0x7f80_0000),
    case((0x7f7f_ffff, 0x7f00_0001), 0x7f80_0000),
    case((0x7f7f_ffff, 0x7f00_0002), 0x7f80_0000),
    case((0x7f00_0001, 0x7f7f_ffff), 0x7f80_0000),
    case((0x7f00_0002, 0x7f7f_ffff), 0x7f80_0000),
    case((0xff7f_ffff, 0xff7f_ffff), 0xff80_0000),
    case((0xff7f_ffff, 0xff00_0001), 0xff80_0000),
    case((0xff7f_ffff, 0xff00_0002), 0xff80_0000),
    case((0xff00_0001, 0xff7f_ffff), 0xff80_0000),
    case((0xff00_0002, 0xff7f_ffff), 0xff80_0000),
];

pub fn run(r: &dyn Routines) -> CheckResult {
    // Compare as integers so the sign of a zero would count.
    check_exact(&TABLE, |&(x, y)| {
        r.addsf3(f32::from_bits(x), f32::from_bits(y)).to_bits()
    })
}

pub fn export() -> FixtureSet {
    let cases = TABLE
        .iter()
        .enumerate()
        .map(|(i, t)| FixtureCase {
            name: format!("add-inf-{:03}", i + 1),
            function: "addsf3".to_string(),
            inputs: json!({"a": format_bits(t.input.0), "b": format_bits(t.input.1)}),
            expected_output: format_bits(t.expected),
            tolerance_ulp: None,
        })
        .collect();
    FixtureSet::new("fplib", cases)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routines::Reference;

    struct FlushesOverflow;

    impl Routines for FlushesOverflow {
        fn addsf3(&self, x: f32, y: f32) -> f32 {
            let z = x + y;
            if z.is_infinite() && x.is_finite() && y.is_finite() {
                f32::MAX.copysign(z)
            } else {
                z
            }
        }
    }

    #[test]
    fn reference_passes() {
        assert_eq!(run(&Reference).map(|p| p.cases), Ok(52));
    }

    #[test]
    fn saturating_overflow_fails_first_overflow_row() {
        let err = run(&FlushesOverflow).unwrap_err();
        assert_eq!(err.index, 43);
        assert_eq!(err.actual, "0x7f7fffff");
    }
}
