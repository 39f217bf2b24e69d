//! `%o` conversions through `sprintf_P`: flags, width, precision and
//! length modifiers with AVR's 16-bit `int`.

use avrlibc_core::stdio::Arg::Int;

use crate::check::{CheckResult, PrintfCase, check_printf};
use crate::exit_code::ExitPolicy;
use crate::routines::Routines;
use crate::suites::Suite;

pub(crate) const SUITE: Suite = Suite {
    name: "printf-octal",
    symbol: "sprintf_P",
    description: "sprintf_P %o conversions with flags, width, precision and h/l",
    policy: ExitPolicy::Saturate,
    run,
    export: None,
};

pub static CASES: [PrintfCase; 33] = [
    // flags
    PrintfCase {
        expected: "0",
        format: "%o",
        args: &[Int(0)],
    },
    PrintfCase {
        expected: "123456",
        format: "%o",
        args: &[Int(0o123456)],
    },
    PrintfCase {
        expected: "1 77777 100000 100001 177777",
        format: "%o %o %o %o %o",
        args: &[Int(1), Int(0x7fff), Int(0x8000), Int(0x8001), Int(0xffff)],
    },
    PrintfCase {
        expected: "0 1 177777",
        format: "%0o %0o %0o",
        args: &[Int(0), Int(1), Int(0xffff)],
    },
    PrintfCase {
        expected: "0 1 177777",
        format: "% o % o % o",
        args: &[Int(0), Int(1), Int(0xffff)],
    },
    PrintfCase {
        expected: "0 1 177777",
        format: "%+o %+o %+o",
        args: &[Int(0), Int(1), Int(0xffff)],
    },
    PrintfCase {
        expected: "0 1 177777",
        format: "%-o %-o %-o",
        args: &[Int(0), Int(1), Int(0xffff)],
    },
    PrintfCase {
        expected: "0 01 0177777",
        format: "%#o %#o %#o",
        args: &[Int(0), Int(1), Int(0xffff)],
    },
    // precision
    PrintfCase {
        expected: "0",
        format: "%.0o",
        args: &[Int(0)],
    },
    PrintfCase {
        expected: "1 177777",
        format: "%.0o %.0o",
        args: &[Int(1), Int(0xffff)],
    },
    PrintfCase {
        expected: "0 1 177777",
        format: "%.1o %.1o %.1o",
        args: &[Int(0), Int(1), Int(0xffff)],
    },
    PrintfCase {
        expected: "00 01 10 177777",
        format: "%.2o %.2o %.2o %.2o",
        args: &[Int(0), Int(1), Int(0o10), Int(0xffff)],
    },
    PrintfCase {
        expected: "0000 0001 0012 0123 1234 12345",
        format: "%.4o %.4o %.4o %.4o %.4o %.4o",
        args: &[Int(0), Int(1), Int(0o12), Int(0o123), Int(0o1234), Int(0o12345)],
    },
    // width
    PrintfCase {
        expected: "0.1.177777",
        format: "%1o.%1o.%1o",
        args: &[Int(0), Int(1), Int(0xffff)],
    },
    PrintfCase {
        expected: " 1.12.123",
        format: "%2o.%2o.%2o",
        args: &[Int(1), Int(0o12), Int(0o123)],
    },
    PrintfCase {
        expected: "   1.  12. 123.1234.12345",
        format: "%4o.%4o.%4o.%4o.%4o",
        args: &[Int(1), Int(0o12), Int(0o123), Int(0o1234), Int(0o12345)],
    },
    PrintfCase {
        expected: " 012.0123.01234",
        format: "%#4o.%#4o.%#4o",
        args: &[Int(0o12), Int(0o123), Int(0o1234)],
    },
    PrintfCase {
        expected: "  14.177777",
        format: "% 4o.% 4o",
        args: &[Int(0o14), Int(0xffff)],
    },
    PrintfCase {
        expected: "  16.177777",
        format: "%+4o.%+4o",
        args: &[Int(0o16), Int(0xffff)],
    },
    PrintfCase {
        expected: "17  .177777",
        format: "%-4o.%-4o",
        args: &[Int(0o17), Int(0xffff)],
    },
    PrintfCase {
        expected: "0000.0001.0012.0123.1234.12345.177777",
        format: "%04o.%04o.%04o.%04o.%04o.%04o.%04o",
        args: &[Int(0), Int(1), Int(0o12), Int(0o123), Int(0o1234), Int(0o12345), Int(0xffff)],
    },
    // a precision turns off zero padding
    PrintfCase {
        expected: "    0001",
        format: "%08.4o",
        args: &[Int(1)],
    },
    PrintfCase {
        expected: "       1",
        format: "%08.0o",
        args: &[Int(1)],
    },
    PrintfCase {
        expected: "       1",
        format: "%08.o",
        args: &[Int(1)],
    },
    // width and precision
    PrintfCase {
        expected: "    0001.    0123.    1234.  177777",
        format: "%8.4o.%8.4o.%8.4o.%8.4o",
        args: &[Int(1), Int(0o123), Int(0o1234), Int(0xffff)],
    },
    PrintfCase {
        expected: "    0012.    0013.    0014",
        format: "%08.4o.% 8.4o.%+8.4o",
        args: &[Int(0o12), Int(0o13), Int(0o14)],
    },
    PrintfCase {
        expected: "0001    .0123    .1234    .12345   ",
        format: "%-8.4o.%-8.4o.%-8.4o.%-8.4o",
        args: &[Int(1), Int(0o123), Int(0o1234), Int(0o12345)],
    },
    PrintfCase {
        expected: "    0000.    0001.    0012.    0123.   01234",
        format: "%#8.4o.%#8.4o.%#8.4o.%#8.4o.%#8.4o",
        args: &[Int(0), Int(1), Int(0o12), Int(0o123), Int(0o1234)],
    },
    // 255 is the largest width and precision
    PrintfCase {
        expected: concat!(
            "                                                                ",
            "                                                                ",
            "                                                                ",
            "                                                              1",
        ),
        format: "%255o",
        args: &[Int(1)],
    },
    PrintfCase {
        expected: concat!(
            "1                                                               ",
            "                                                                ",
            "                                                                ",
            "                                                               ",
        ),
        format: "%-255o",
        args: &[Int(1)],
    },
    PrintfCase {
        expected: concat!(
            "0000000000000000000000000000000000000000000000000000000000000000",
            "0000000000000000000000000000000000000000000000000000000000000000",
            "0000000000000000000000000000000000000000000000000000000000000000",
            "000000000000000000000000000000000000000000000000000000000000002",
        ),
        format: "%.255o",
        args: &[Int(2)],
    },
    // long argument
    PrintfCase {
        expected: "0 1234567 76543210 17777777777 20000000000 20000000001 37777777777",
        format: "%lo %lo %lo %lo %lo %lo %lo",
        args: &[
            Int(0),
            Int(0o1234567),
            Int(0o76543210),
            Int(0o17777777777),
            Int(0o20000000000),
            Int(0o20000000001),
            Int(0o37777777777),
        ],
    },
    // short argument
    PrintfCase {
        expected: "0 2 177776",
        format: "%ho %ho %ho",
        args: &[Int(0), Int(2), Int(0xfffe)],
    },
];

pub fn run(r: &dyn Routines) -> CheckResult {
    check_printf(&CASES, |buf, fmt, args| r.sprintf_p(buf, fmt, args))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::FailureKind;
    use crate::routines::Reference;
    use avrlibc_core::pgmspace::ProgMem;
    use avrlibc_core::stdio::{Arg, PrintfError};

    /// Formats correctly but reports one character too many.
    struct CountsNul;

    impl Routines for CountsNul {
        fn sprintf_p(
            &self,
            buf: &mut [u8],
            fmt: ProgMem<'_>,
            args: &[Arg<'_>],
        ) -> Result<usize, PrintfError> {
            avrlibc_core::stdio::sprintf_p(buf, fmt, args).map(|n| n + 1)
        }
    }

    /// Prefixes every `#o` result with `0`, even when it already starts
    /// with one.
    struct AlwaysPrefix;

    impl Routines for AlwaysPrefix {
        fn sprintf_p(
            &self,
            buf: &mut [u8],
            fmt: ProgMem<'_>,
            args: &[Arg<'_>],
        ) -> Result<usize, PrintfError> {
            let n = avrlibc_core::stdio::sprintf_p(buf, fmt, args)?;
            if fmt.c_str() == b"%#o %#o %#o" {
                buf.copy_within(0..=n, 1);
                buf[0] = b'0';
                return Ok(n + 1);
            }
            Ok(n)
        }
    }

    #[test]
    fn reference_passes() {
        assert_eq!(run(&Reference).map(|p| p.cases), Ok(CASES.len()));
    }

    #[test]
    fn count_mismatch_reports_1000_plus_index() {
        let err = run(&CountsNul).unwrap_err();
        assert_eq!((err.code, err.index, err.kind), (1001, 1, FailureKind::Count));
        assert_eq!(ExitPolicy::Saturate.fold(err.code), 255);
    }

    #[test]
    fn content_mismatch_reports_index() {
        let err = run(&AlwaysPrefix).unwrap_err();
        assert_eq!((err.code, err.kind), (8, FailureKind::Content));
        assert_eq!(err.actual, "00 01 0177777");
    }
}
