//! `fixsfsi`: binary32 to signed 32-bit `long`.

use avrlibc_fixture_exec::format_bits;
use serde_json::json;

use crate::check::{CheckResult, check_exact};
use crate::exit_code::ExitPolicy;
use crate::fixtures::{FixtureCase, FixtureSet};
use crate::routines::Routines;
use crate::suites::Suite;
use crate::table::{TestCase, case};

pub(crate) const SUITE: Suite = Suite {
    name: "fplib-flt2long",
    symbol: "fixsfsi",
    description: "float to long conversion: truncation, limits, overflow and NaN",
    policy: ExitPolicy::Index,
    run,
    export: Some(export),
};

/// Argument bit pattern and the expected `long`.
pub static TABLE: [TestCase<u32, i32>; 86] = [
    // zero, both signs
    case(0x0000_0000, 0),
    case(0x8000_0000, 0),
    // too small
    case(0x0000_0001, 0),
    case(0x007f_ffff, 0),
    case(0x0080_0000, 0),
    case(0x3f7f_ffff, 0),
    case(0x8000_0001, 0),
    case(0x807f_ffff, 0),
    case(0x8080_0000, 0),
    case(0xbf7f_ffff, 0),
    // every exponent
    case(0x3f80_0000, 1), // 0x1p00
    case(0x4000_0000, 2), // 0x1p01
    case(0x4080_0000, 4), // 0x1p02
    case(0x4100_0000, 8), // 0x1p03
    case(0x4180_0000, 0x0000_0010), // 0x1p04
    case(0x4200_0000, 0x0000_0020), // 0x1p05
    case(0x4280_0000, 0x0000_0040), // 0x1p06
    case(0x4300_0000, 0x0000_0080), // 0x1p07
    case(0x4380_0000, 0x0000_0100), // 0x1p08
    case(0x4400_0000, 0x0000_0200), // 0x1p09
    case(0x4480_0000, 0x0000_0400), // 0x1p10
    case(0x4500_0000, 0x0000_0800), // 0x1p11
    case(0x4580_0000, 0x0000_1000), // 0x1p12
    case(0x4600_0000, 0x0000_2000), // 0x1p13
    case(0x4680_0000, 0x0000_4000), // 0x1p14
    case(0x4700_0000, 0x0000_8000), // 0x1p15
    case(0x4780_0000, 0x0001_0000), // 0x1p16
    case(0x4800_0000, 0x0002_0000), // 0x1p17
    case(0x4880_0000, 0x0004_0000), // 0x1p18
    case(0x4900_0000, 0x0008_0000), // 0x1p19
    case(0x4980_0000, 0x0010_0000), // 0x1p20
    case(0x4a00_0000, 0x0020_0000), // 0x1p21
    case(0x4a80_0000, 0x0040_0000), // 0x1p22
    case(0x4b00_0000, 0x0080_0000), // 0x1p23
    case(0x4b80_0000, 0x0100_0000), // 0x1p24
    case(0x4c00_0000, 0x0200_0000), // 0x1p25
    case(0x4c80_0000, 0x0400_0000), // 0x1p26
    case(0x4d00_0000, 0x0800_0000), // 0x1p27
    case(0x4d80_0000, 0x1000_0000), // 0x1p28
    case(0x4e00_0000, 0x2000_0000), // 0x1p29
    case(0x4e80_0000, 0x4000_0000), // 0x1p30
    case(0xcf00_0000, i32::MIN), // -0x1p31
    // negative
    case(0xbf80_0000, -1), // -0x1p00
    case(0xc040_0000, -3), // -0x3p00
    case(0xc37f_0000, -0x0000_00ff), // -0xffp00
    case(0xc380_0000, -0x0000_0100), // -0x100p00
    case(0xc77f_ff00, -0x0000_ffff), // -0xffffp00
    case(0xc780_0000, -0x0001_0000), // -0x10000p00
    case(0xcb7f_ffff, -0x00ff_ffff), // -0xffffffp00
    case(0xceff_ffff, -0x7fff_ff80), // -0xffffffp07
    // max values
    case(0x4eff_ffff, 0x7fff_ff80), // 0x1.fffffep+30
    case(0xceff_ffff, -0x7fff_ff80), // -0x1.fffffep+30
    case(0xcf00_0000, i32::MIN), // -0x1.000000p+31
    // truncation toward zero
    case(0x3f7f_ffff, 0),
    case(0x3f80_0000, 1),
    case(0x3fff_ffff, 1),
    case(0x4000_0000, 2),
    case(0x403f_ffff, 2),
    case(0x4040_0000, 3),
    case(0x407f_ffff, 3),
    case(0x4a80_0000, 0x0040_0000), // 0x1.000000p+22
    case(0x4a80_0001, 0x0040_0000), // 0x1.000002p+22
    // overflow, Inf and NaN all give 0x80000000
    // positive overflow
    case(0x4f00_0000, i32::MIN), // 0x0.800000p+32
    case(0x4f00_0001, i32::MIN), // 0x0.800001p+32
    case(0x4f7f_ffff, i32::MIN), // 0x0.ffffffp+32
    case(0x4f80_0000, i32::MIN), // 0x0.800000p+33
    case(0x4fff_ffff, i32::MIN), // 0x0.ffffffp+33
    case(0x7f00_0000, i32::MIN),
    case(0x7f7f_ffff, i32::MIN),
    case(0x7f80_0000, i32::MIN), // +Inf
    // negative overflow
    case(0xcf00_0000, i32::MIN), // -0x0.800000p+32, exactly -2^31
    case(0xcf00_0001, i32::MIN), // -0x0.800001p+32
    case(0xcf7f_ffff, i32::MIN), // -0x0.ffffffp+32
    case(0xcf80_0000, i32::MIN), // -0x0.800000p+33
    case(0xcfff_ffff, i32::MIN), // -0x0.ffffffp+33
    case(0xff00_0000, i32::MIN),
    case(0xff7f_ffff, i32::MIN),
    case(0xff80_0000, i32::MIN), // -Inf
    // Inf
    case(0x7f80_0000, i32::MIN),
    case(0xff80_0000, i32::MIN),
    // NaN
    case(0x7f80_0001, i32::MIN),
    case(0x7fc0_0000, i32::MIN),
    case(0x7fff_ffff, i32::MIN),
    case(0xff80_0001, i32::MIN),
    case(0xffc0_0000, i32::MIN),
    case(0xffff_ffff, i32::MIN),
];

pub fn run(r: &dyn Routines) -> CheckResult {
    check_exact(&TABLE, |&x| r.fixsfsi(f32::from_bits(x)))
}

pub fn export() -> FixtureSet {
    let cases = TABLE
        .iter()
        .enumerate()
        .map(|(i, t)| FixtureCase {
            name: format!("flt2long-{:03}", i + 1),
            function: "fixsfsi".to_string(),
            inputs: json!({"a": format_bits(t.input)}),
            expected_output: t.expected.to_string(),
            tolerance_ulp: None,
        })
        .collect();
    FixtureSet::new("fplib", cases)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routines::Reference;

    struct Rounds;

    impl Routines for Rounds {
        fn fixsfsi(&self, x: f32) -> i32 {
            avrlibc_core::fplib::fixsfsi(x.round())
        }
    }

    struct Saturates;

    impl Routines for Saturates {
        fn fixsfsi(&self, x: f32) -> i32 {
            x as i32
        }
    }

    #[test]
    fn reference_passes() {
        assert_eq!(run(&Reference).map(|p| p.cases), Ok(86));
    }

    #[test]
    fn rounding_instead_of_truncating_fails() {
        // 0x3f7fffff rounds to 1.
        assert_eq!(run(&Rounds).unwrap_err().index, 6);
    }

    #[test]
    fn saturating_cast_fails_on_positive_overflow() {
        let err = run(&Saturates).unwrap_err();
        assert_eq!(err.index, 63);
        assert_eq!(err.actual, "2147483647");
    }
}
