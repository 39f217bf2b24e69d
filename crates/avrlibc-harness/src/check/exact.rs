//! Exact-match table checker.

use crate::check::{CaseFailure, CheckPass, CheckResult, FailureKind};
use crate::table::TestCase;

/// Equality used by the exact checker, plus how a value is shown in a
/// diagnostic.
pub trait ExactEq {
    fn exact_eq(&self, other: &Self) -> bool;
    fn render(&self) -> String;
}

macro_rules! exact_int {
    ($($t:ty),*) => {$(
        impl ExactEq for $t {
            fn exact_eq(&self, other: &Self) -> bool {
                self == other
            }
            fn render(&self) -> String {
                self.to_string()
            }
        }
    )*};
}

exact_int!(i8, i16, i32, i64, u8, u16, usize, bool);

/// `u32` tables hold binary32 bit patterns and long values alike; they
/// are shown in hex.
impl ExactEq for u32 {
    fn exact_eq(&self, other: &Self) -> bool {
        self == other
    }
    fn render(&self) -> String {
        format!("{self:#010x}")
    }
}

/// Floats compare by bit pattern: `-0.0 != 0.0` and NaN payloads matter.
impl ExactEq for f32 {
    fn exact_eq(&self, other: &Self) -> bool {
        self.to_bits() == other.to_bits()
    }
    fn render(&self) -> String {
        format!("{:#010x}", self.to_bits())
    }
}

impl ExactEq for String {
    fn exact_eq(&self, other: &Self) -> bool {
        self == other
    }
    fn render(&self) -> String {
        format!("{self:?}")
    }
}

impl ExactEq for &str {
    fn exact_eq(&self, other: &Self) -> bool {
        self == other
    }
    fn render(&self) -> String {
        format!("{self:?}")
    }
}

impl<T: ExactEq> ExactEq for Option<T> {
    fn exact_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.exact_eq(b),
            (None, None) => true,
            _ => false,
        }
    }
    fn render(&self) -> String {
        match self {
            Some(v) => v.render(),
            None => "none".to_string(),
        }
    }
}

/// Run `f` over `table` in order; the first mismatch fails with its
/// 1-based index.
pub fn check_exact<I, O, F>(table: &[TestCase<I, O>], mut f: F) -> CheckResult
where
    O: ExactEq,
    F: FnMut(&I) -> O,
{
    for (i, case) in table.iter().enumerate() {
        let actual = f(&case.input);
        if !actual.exact_eq(&case.expected) {
            return Err(CaseFailure::at(
                i + 1,
                FailureKind::Mismatch,
                case.expected.render(),
                actual.render(),
            ));
        }
    }
    Ok(CheckPass { cases: table.len() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::case;

    static SQUARES: [TestCase<i32, i32>; 4] = [case(1, 1), case(2, 4), case(3, 9), case(4, 16)];

    #[test]
    fn passes_when_all_rows_match() {
        assert_eq!(check_exact(&SQUARES, |x| x * x), Ok(CheckPass { cases: 4 }));
    }

    #[test]
    fn stops_at_first_mismatch() {
        let mut calls = 0;
        let err = check_exact(&SQUARES, |x| {
            calls += 1;
            if *x >= 2 { x * x + 1 } else { x * x }
        })
        .unwrap_err();
        assert_eq!(err.index, 2);
        assert_eq!(err.code, 2);
        assert_eq!(err.expected, "4");
        assert_eq!(err.actual, "5");
        assert_eq!(calls, 2);
    }

    #[test]
    fn signed_zero_is_not_equal_to_zero() {
        assert!(!(-0.0f32).exact_eq(&0.0));
        assert!(f32::NAN.exact_eq(&f32::NAN));
        assert!(!f32::from_bits(0x7fc0_0001).exact_eq(&f32::from_bits(0x7fc0_0000)));
        assert_eq!(0x7f80_0000u32.render(), "0x7f800000");
    }
}
