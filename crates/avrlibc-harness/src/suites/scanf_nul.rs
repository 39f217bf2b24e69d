//! NUL bytes read from a stream: data for `%c` and `%s`, never space.

use crate::check::{CheckResult, RegionCheck, ScanfCase, check_scanf_stream};
use crate::exit_code::ExitPolicy;
use crate::routines::Routines;
use crate::suites::Suite;

pub(crate) const SUITE: Suite = Suite {
    name: "scanf-nul",
    symbol: "fscanf",
    description: "fscanf on a program-memory stream containing NUL bytes",
    policy: ExitPolicy::Saturate,
    run,
    export: None,
};

/// `struct { int i; int j; char s[8]; char t[8]; }`
pub const REGION: usize = 20;
const I: usize = 0;
const J: usize = 2;
const S: usize = 4;
const T: usize = 12;

/// The region is filled with `0xff` before each case.
pub const FILL: u8 = 0xff;

pub static CASES: [ScanfCase; 4] = [
    ScanfCase {
        expected: 3,
        input: b"A\0B",
        format: "%c%c%c",
        dests: &[S, S + 1, S + 2],
        check: RegionCheck::prefix(b"\xff\xff\xff\xffA\0B"),
    },
    ScanfCase {
        expected: 1,
        input: b"\t \0",
        format: " %c",
        dests: &[S],
        check: RegionCheck::prefix(b"\xff\xff\xff\xff\0"),
    },
    ScanfCase {
        expected: 3,
        input: b"123\0456",
        format: "%d%c%d",
        dests: &[I, S, J],
        // i = 123, j = 456, s[0] = NUL
        check: RegionCheck::prefix(&[123, 0, 0xc8, 0x01, 0]),
    },
    ScanfCase {
        expected: 1,
        input: b"A\0BC",
        format: "%s%s",
        dests: &[S, T],
        check: RegionCheck::prefix(b"\xff\xff\xff\xffA\0BC"),
    },
];

pub fn run(r: &dyn Routines) -> CheckResult {
    check_scanf_stream(&CASES, REGION, FILL, |src, fmt, args| r.fscanf(src, fmt, args))
}
