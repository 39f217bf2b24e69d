//! `unordsf2` with infinite operands: never unordered.

use avrlibc_fixture_exec::format_bits;
use serde_json::json;

use crate::check::{CheckResult, check_exact};
use crate::exit_code::ExitPolicy;
use crate::fixtures::{FixtureCase, FixtureSet};
use crate::routines::Routines;
use crate::suites::Suite;
use crate::table::{TestCase, case};

pub(crate) const SUITE: Suite = Suite {
    name: "fplib-unord-inf",
    symbol: "unordsf2",
    description: "unordered comparison of infinities against zeros, finites and infinities",
    policy: ExitPolicy::Saturate,
    run,
    export: Some(export),
};

pub static TABLE: [TestCase<(u32, u32), u8>; 40] = [
    // 0.0 and Inf, all signs
    case((0x0000_0000, 0x7f80_0000), 0),
    case((0x8000_0000, 0x7f80_0000), 0),
    case((0x0000_0000, 0xff80_0000), 0),
    case((0x8000_0000, 0xff80_0000), 0),
    // nonzero and +Inf
    case((0xff7f_ffff, 0x7f80_0000), 0),
    case((0x8080_0000, 0x7f80_0000), 0),
    case((0x807f_ffff, 0x7f80_0000), 0),
    case((0x8000_0001, 0x7f80_0000), 0),
    case((0x0000_0001, 0x7f80_0000), 0),
    case((0x007f_ffff, 0x7f80_0000), 0),
    case((0x0080_0000, 0x7f80_0000), 0),
    case((0x7f7f_ffff, 0x7f80_0000), 0),
    // nonzero and -Inf
    case((0xff7f_ffff, 0xff80_0000), 0),
    case((0x8080_0000, 0xff80_0000), 0),
    case((0x807f_ffff, 0xff80_0000), 0),
    case((0x8000_0001, 0xff80_0000), 0),
    case((0x0000_0001, 0xff80_0000), 0),
    case((0x007f_ffff, 0xff80_0000), 0),
    case((0x0080_0000, 0xff80_0000), 0),
    case((0x7f7f_ffff, 0xff80_0000), 0),
    // +Inf and nonzero
    case((0x7f80_0000, 0xff7f_ffff), 0),
    case((0x7f80_0000, 0x8080_0000), 0),
    case((0x7f80_0000, 0x807f_ffff), 0),
    case((0x7f80_0000, 0x8000_0001), 0),
    case((0x7f80_0000, 0x0000_0001), 0),
    case((0x7f80_0000, 0x007f_ffff), 0),
    case((0x7f80_0000, 0x0080_0000), 0),
    case((0x7f80_0000, 0x7f7f_ffff), 0),
    // -Inf and nonzero
    case((0xff80_0000, 0xff7f_ffff), 0),
    case((0xff80_0000, 0x8080_0000), 0),
    case((0xff80_0000, 0x807f_ffff), 0),
    case((0xff80_0000, 0x8000_0001), 0),
    case((0xff80_0000, 0x0000_0001), 0),
    case((0xff80_0000, 0x007f_ffff), 0),
    case((0xff80_0000, 0x0080_0000), 0),
    case((0xff80_0000, 0x7f7f_ffff), 0),
    // Inf and Inf, all signs
    case((0x7f80_0000, 0x7f80_0000), 0),
    case((0xff80_0000, 0xff80_0000), 0),
    case((0xff80_0000, 0x7f80_0000), 0),
    case((0x7f80_0000, 0xff80_0000), 0),
];

pub fn run(r: &dyn Routines) -> CheckResult {
    check_exact(&TABLE, |&(x, y)| {
        u8::from(r.unordsf2(f32::from_bits(x), f32::from_bits(y)) != 0)
    })
}

pub fn export() -> FixtureSet {
    let cases = TABLE
        .iter()
        .enumerate()
        .map(|(i, t)| FixtureCase {
            name: format!("unord-inf-{:03}", i + 1),
            function: "unordsf2".to_string(),
            inputs: json!({"a": format_bits(t.input.0), "b": format_bits(t.input.1)}),
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

    struct InfIsUnordered;

    impl Routines for InfIsUnordered {
        fn unordsf2(&self, x: f32, y: f32) -> i32 {
            i32::from(x.is_infinite() && y.is_infinite())
        }
    }

    #[test]
    fn reference_passes() {
        assert_eq!(run(&Reference).map(|p| p.cases), Ok(40));
    }

    #[test]
    fn first_inf_inf_row_is_reported() {
        assert_eq!(run(&InfIsUnordered).unwrap_err().index, 37);
    }
}
