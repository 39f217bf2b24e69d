//! `%d` conversions through `sscanf` and `sscanf_P`. Destinations are
//! 16-bit `int`s, so expected prefixes are little-endian byte pairs.

use crate::check::{CheckResult, RegionCheck, ScanfCase, check_scanf};
use crate::exit_code::ExitPolicy;
use crate::routines::Routines;
use crate::suites::Suite;

pub(crate) const SUITE: Suite = Suite {
    name: "scanf-d",
    symbol: "sscanf",
    description: "sscanf/sscanf_P %d: EOF, invalid input, width with spaces and signs",
    policy: ExitPolicy::Saturate,
    run,
    export: None,
};

/// Size of the `int i[4]` destination.
pub const REGION: usize = 8;

const fn d(
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

pub static CASES: [ScanfCase; 18] = [
    // no number before end of input
    d(-1, b"", "%d", &[0], RegionCheck::UNTOUCHED),
    d(-1, b" ", "%d", &[0], RegionCheck::UNTOUCHED),
    d(-1, b"+", "%d", &[0], RegionCheck::UNTOUCHED),
    d(-1, b"-", "%d", &[0], RegionCheck::UNTOUCHED),
    // no number, invalid character
    d(0, b"A", "%d", &[0], RegionCheck::UNTOUCHED),
    d(0, b".9", "%d", &[0], RegionCheck::UNTOUCHED),
    // width
    d(1, b"9", "%1d", &[0], RegionCheck::prefix(&[9, 0])),
    d(1, b"98", "%1d", &[0], RegionCheck::prefix(&[9, 0])),
    d(1, b"9876", "%2d", &[0], RegionCheck::prefix(&[98, 0])),
    d(2, b"9876", "%2d%2d", &[2, 0], RegionCheck::prefix(&[76, 0, 98, 0])),
    d(1, b"000000000012345", "%14d", &[0], RegionCheck::prefix(&[0xd2, 0x04])), // 1234
    // leading spaces do not count against the width
    d(1, b" 12345", "%2d", &[0], RegionCheck::prefix(&[12, 0])),
    d(1, b" \t\n\x0b\x0c\r12345", "%2d", &[0], RegionCheck::prefix(&[12, 0])),
    // a sign does
    d(1, b"+12345", "%3d", &[0], RegionCheck::prefix(&[12, 0])),
    d(1, b"-12345", "%3d", &[0], RegionCheck::prefix(&[0xf4, 0xff])), // -12
    d(1, b"  -12345", "%3d", &[0], RegionCheck::prefix(&[0xf4, 0xff])),
    // suppression with width
    d(0, b"9", "%*1d", &[0], RegionCheck::UNTOUCHED),
    d(0, b"9876", "%*2d", &[0], RegionCheck::UNTOUCHED),
];

pub fn run(r: &dyn Routines) -> CheckResult {
    check_scanf(
        &CASES,
        REGION,
        |input, fmt, args| r.sscanf(input, fmt, args),
        |input, fmt, args| r.sscanf_p(input, fmt, args),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::FailureKind;
    use crate::routines::Reference;
    use avrlibc_core::stdio::{ByteSource, Format, ScanError};

    /// glibc behaviour: a lone sign is a matching failure, not EOF.
    struct SignIsMismatch;

    impl Routines for SignIsMismatch {
        fn vfscanf(
            &self,
            src: &mut dyn ByteSource,
            fmt: Format<'_>,
            args: &mut [&mut [u8]],
        ) -> Result<i32, ScanError> {
            let mut input = Vec::new();
            while let Some(c) = src.next_byte() {
                input.push(c);
            }
            if input == b"+" || input == b"-" {
                return Ok(0);
            }
            let mut replay = avrlibc_core::stdio::StreamSource::new(&input);
            avrlibc_core::stdio::vfscanf(&mut replay, fmt, args)
        }
    }

    #[test]
    fn reference_passes() {
        assert_eq!(run(&Reference).map(|p| p.cases), Ok(CASES.len()));
    }

    #[test]
    fn lone_sign_must_be_eof() {
        let err = run(&SignIsMismatch).unwrap_err();
        assert_eq!((err.index, err.kind), (3, FailureKind::ScanResult));
    }
}
