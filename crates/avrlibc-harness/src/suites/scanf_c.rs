//! `%c` conversions through `sscanf` and `sscanf_P`.

use crate::check::{CheckResult, RegionCheck, ScanfCase, check_scanf};
use crate::exit_code::ExitPolicy;
use crate::routines::Routines;
use crate::suites::Suite;

pub(crate) const SUITE: Suite = Suite {
    name: "scanf-c",
    symbol: "sscanf",
    description: "sscanf/sscanf_P %c: empty input, suppression, width, invalid flags",
    policy: ExitPolicy::Saturate,
    run,
    export: None,
};

/// Size of the `char s[12]` destination.
pub const REGION: usize = 12;

const fn c(
    expected: i32,
    input: &'static [u8],
    format: &'static str,
    dests: &'static [usize],
    check: RegionCheck,
) -> ScanfCase {
    ScanfCase {
        expected,
        input,
        format,
        dests,
        check,
    }
}

pub static CASES: [ScanfCase; 28] = [
    // empty input
    c(-1, b"", "%c", &[0], RegionCheck::ANY),
    c(-1, b"", " %c", &[0], RegionCheck::ANY),
    c(-1, b" ", " %c", &[0], RegionCheck::ANY),
    c(-1, b" ", "  %c", &[0], RegionCheck::ANY),
    c(-1, b"\t\n\x0b\x0c\r", " %c", &[0], RegionCheck::ANY),
    // plain conversion
    c(1, b"a", "%c", &[0], RegionCheck::prefix(b"a")),
    c(3, b" \x01\xff", "%c%c%c", &[0, 1, 2], RegionCheck::prefix(b" \x01\xff")),
    c(4, b"ABCD", "%c%c%c%c", &[3, 2, 1, 0], RegionCheck::prefix(b"DCBA")),
    // literal match
    c(1, b"%The        %q", "%%The %%%c", &[0], RegionCheck::prefix(b"q")),
    // suppressed assignment
    c(0, b"a", "%*c", &[0], RegionCheck::UNTOUCHED),
    c(3, b"ABCD", "%c%*c%c%c", &[0, 1, 2], RegionCheck::prefix(b"ACD")),
    // width
    c(1, b"A", "%1c", &[0], RegionCheck::prefix(b"A")),
    c(1, b"AB", "%2c", &[0], RegionCheck::prefix(b"AB")),
    c(1, b"The_quick_brown_fox", "%12c", &[0], RegionCheck::prefix(b"The_quick_br")),
    c(1, b"A\t D", "%4c", &[0], RegionCheck::prefix(b"A\t D")),
    c(2, b"1234", "%2c%2c", &[2, 0], RegionCheck::prefix(b"3412")),
    // suppression with width
    c(0, b"A", "%*1c", &[0], RegionCheck::UNTOUCHED),
    c(0, b"AA", "%*2c", &[0], RegionCheck::UNTOUCHED),
    // a zero width ends the scan
    c(0, b"A", "%0c", &[0], RegionCheck::UNTOUCHED),
    // leading zero in the width
    c(1, b"A", "%01c", &[0], RegionCheck::prefix(b"A")),
    c(1, b"AB", "%02c", &[0], RegionCheck::prefix(b"AB")),
    // flags are not valid conversions
    c(0, b"A", "% c", &[0], RegionCheck::UNTOUCHED),
    c(0, b"A", "%-c", &[0], RegionCheck::UNTOUCHED),
    c(0, b"A", "%+c", &[0], RegionCheck::UNTOUCHED),
    c(0, b"A", "%.c", &[0], RegionCheck::UNTOUCHED),
    c(0, b"A", "%#c", &[0], RegionCheck::UNTOUCHED),
    // length modifiers do not widen %c
    c(1, b"A", "%hc", &[0], RegionCheck::fill_after(b"A")),
    c(1, b"A", "%lc", &[0], RegionCheck::fill_after(b"A")),
];

pub fn run(r: &dyn Routines) -> CheckResult {
    check_scanf(
        &CASES,
        REGION,
        |input, fmt, args| r.sscanf(input, fmt, args),
        |input, fmt, args| r.sscanf_p(input, fmt, args),
    )
}
