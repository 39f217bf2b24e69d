//! Numeric conversion functions (atoi, atol, strtol, strtoul).
//!
//! `long` is 32 bits here; `atoi` returns the 16-bit `int`.

/// Result of a string-to-number conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionStatus {
    Success,
    Overflow,
    Underflow,
    InvalidBase,
}

pub fn atoi(s: &[u8]) -> i16 {
    let (val, _, _) = strtol_impl(s, 10);
    val as i16
}

pub fn atol(s: &[u8]) -> i32 {
    let (val, _, _) = strtol_impl(s, 10);
    val
}

struct Prefix {
    negative: bool,
    base: u32,
    digits_start: usize,
}

/// Whitespace, sign and `0x` prefix handling shared by both conversions.
fn scan_prefix(s: &[u8], base: i32) -> Result<Option<Prefix>, ConversionStatus> {
    if base != 0 && !(2..=36).contains(&base) {
        return Err(ConversionStatus::InvalidBase);
    }
    let len = s.len();
    let mut i = 0;
    while i < len && is_space(s[i]) {
        i += 1;
    }
    let mut negative = false;
    if i < len && (s[i] == b'-' || s[i] == b'+') {
        negative = s[i] == b'-';
        i += 1;
    }
    if i >= len || s[i] == 0 {
        return Ok(None);
    }

    let has_0x = i + 2 < len
        && s[i] == b'0'
        && (s[i + 1] | 0x20) == b'x'
        && s[i + 2].is_ascii_hexdigit();
    let base = match base {
        0 if has_0x => {
            i += 2;
            16
        }
        0 if s[i] == b'0' => 8,
        0 => 10,
        16 if has_0x => {
            i += 2;
            16
        }
        b => b as u32,
    };
    Ok(Some(Prefix {
        negative,
        base,
        digits_start: i,
    }))
}

fn digit_value(c: u8) -> Option<u32> {
    match c {
        b'0'..=b'9' => Some(u32::from(c - b'0')),
        b'a'..=b'z' => Some(u32::from(c - b'a') + 10),
        b'A'..=b'Z' => Some(u32::from(c - b'A') + 10),
        _ => None,
    }
}

/// Accumulate digits up to `limit`; returns (magnitude, end, any, overflow).
fn accumulate(s: &[u8], start: usize, base: u32, limit: u64) -> (u64, usize, bool, bool) {
    let mut acc: u64 = 0;
    let mut i = start;
    let mut any = false;
    let mut overflow = false;
    while let Some(d) = s.get(i).copied().and_then(digit_value) {
        if d >= base {
            break;
        }
        any = true;
        if !overflow {
            acc = acc * u64::from(base) + u64::from(d);
            if acc > limit {
                overflow = true;
            }
        }
        i += 1;
    }
    (acc, i, any, overflow)
}

/// strtol: returns (value, consumed_bytes, status).
pub fn strtol_impl(s: &[u8], base: i32) -> (i32, usize, ConversionStatus) {
    let prefix = match scan_prefix(s, base) {
        Ok(Some(p)) => p,
        Ok(None) => return (0, 0, ConversionStatus::Success),
        Err(status) => return (0, 0, status),
    };
    let limit = if prefix.negative {
        1u64 << 31
    } else {
        (1u64 << 31) - 1
    };
    let (acc, end, any, overflow) = accumulate(s, prefix.digits_start, prefix.base, limit);
    if !any {
        return (0, 0, ConversionStatus::Success);
    }
    if overflow {
        return if prefix.negative {
            (i32::MIN, end, ConversionStatus::Underflow)
        } else {
            (i32::MAX, end, ConversionStatus::Overflow)
        };
    }
    let val = if prefix.negative {
        (acc as i64).wrapping_neg() as i32
    } else {
        acc as i32
    };
    (val, end, ConversionStatus::Success)
}

pub fn strtol(s: &[u8], base: i32) -> (i32, usize) {
    let (val, len, _) = strtol_impl(s, base);
    (val, len)
}

/// strtoul: returns (value, consumed_bytes, status). A leading `-` negates
/// the result modulo 2^32.
pub fn strtoul_impl(s: &[u8], base: i32) -> (u32, usize, ConversionStatus) {
    let prefix = match scan_prefix(s, base) {
        Ok(Some(p)) => p,
        Ok(None) => return (0, 0, ConversionStatus::Success),
        Err(status) => return (0, 0, status),
    };
    let (acc, end, any, overflow) =
        accumulate(s, prefix.digits_start, prefix.base, u64::from(u32::MAX));
    if !any {
        return (0, 0, ConversionStatus::Success);
    }
    if overflow {
        return (u32::MAX, end, ConversionStatus::Overflow);
    }
    let val = if prefix.negative {
        (acc as u32).wrapping_neg()
    } else {
        acc as u32
    };
    (val, end, ConversionStatus::Success)
}

pub fn strtoul(s: &[u8], base: i32) -> (u32, usize) {
    let (val, len, _) = strtoul_impl(s, base);
    (val, len)
}

/// C `isspace` in the "C" locale.
#[inline]
pub(crate) fn is_space(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}
