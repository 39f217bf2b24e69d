//! printf formatting engine.
//!
//! Parses `vfprintf` directives and renders typed arguments with the avr-libc
//! data model. Integer arguments are cut down to the width the length
//! modifier implies: 8 bits for `hh`, 32 bits for `l`, otherwise the 16-bit
//! `int`.
//!
//! Differences from a hosted libc that the conformance tables rely on:
//! a precision always disables zero fill, a zero value printed with
//! precision 0 still yields `0`, and `#o` only adds a leading zero when the
//! digits do not already start with one.
//!
//! Width and precision are held in a byte, as avr-libc's `vfprintf` does,
//! so both saturate at [`MAX_FIELD`].

use thiserror::Error;

use crate::pgmspace::{ProgMem, until_nul};

// ---------------------------------------------------------------------------
// Format spec types
// ---------------------------------------------------------------------------

/// Largest width or precision a directive can request.
pub const MAX_FIELD: usize = u8::MAX as usize;

/// Flags parsed from a printf format directive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatFlags {
    pub left_justify: bool, // '-'
    pub force_sign: bool,   // '+'
    pub space_sign: bool,   // ' '
    pub alt_form: bool,     // '#'
    pub zero_pad: bool,     // '0'
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    None,
    Fixed(usize),
    FromArg, // '*'
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precision {
    None,
    Fixed(usize),
    FromArg, // '.*'
}

/// Length modifier. avr-libc has no `ll`, `z`, `t`, `j` or `L`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthMod {
    None,
    Hh,
    H,
    L,
}

/// A parsed printf format specifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatSpec {
    pub flags: FormatFlags,
    pub width: Width,
    pub precision: Precision,
    pub length: LengthMod,
    pub conversion: u8,
}

/// One variadic argument.
///
/// Integers are carried wide and truncated per directive, the way the
/// promoted C arguments would be read back by `va_arg`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Arg<'a> {
    Int(i64),
    Double(f64),
    Char(u8),
    /// A C string; rendering stops at the first NUL.
    Str(&'a [u8]),
    Ptr(u16),
}

/// A segment of a parsed format string.
#[derive(Debug, Clone)]
pub enum FormatSegment<'a> {
    Literal(&'a [u8]),
    /// `%%`
    Percent,
    Spec(FormatSpec),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrintfError {
    #[error("no argument supplied for argument slot {index}")]
    MissingArgument { index: usize },
    #[error("argument {index} cannot be formatted with %{conversion}")]
    ArgumentMismatch { index: usize, conversion: char },
    #[error("output needs {needed} bytes but the buffer holds {capacity}")]
    BufferTooSmall { needed: usize, capacity: usize },
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

/// Parse a single format specifier starting after the '%' character.
///
/// Returns `(spec, bytes_consumed)` or `None` for an unknown conversion.
pub fn parse_format_spec(fmt: &[u8]) -> Option<(FormatSpec, usize)> {
    let mut pos = 0;
    let len = fmt.len();

    let mut flags = FormatFlags::default();
    while pos < len {
        match fmt[pos] {
            b'-' => flags.left_justify = true,
            b'+' => flags.force_sign = true,
            b' ' => flags.space_sign = true,
            b'#' => flags.alt_form = true,
            b'0' => flags.zero_pad = true,
            _ => break,
        }
        pos += 1;
    }
    if flags.force_sign {
        flags.space_sign = false;
    }
    if flags.left_justify {
        flags.zero_pad = false;
    }

    let width = if pos < len && fmt[pos] == b'*' {
        pos += 1;
        Width::FromArg
    } else {
        let start = pos;
        while pos < len && fmt[pos].is_ascii_digit() {
            pos += 1;
        }
        if pos > start {
            Width::Fixed(parse_decimal(&fmt[start..pos]))
        } else {
            Width::None
        }
    };

    let precision = if pos < len && fmt[pos] == b'.' {
        pos += 1;
        if pos < len && fmt[pos] == b'*' {
            pos += 1;
            Precision::FromArg
        } else {
            let start = pos;
            while pos < len && fmt[pos].is_ascii_digit() {
                pos += 1;
            }
            Precision::Fixed(parse_decimal(&fmt[start..pos]))
        }
    } else {
        Precision::None
    };

    let length = match fmt.get(pos) {
        Some(b'h') if fmt.get(pos + 1) == Some(&b'h') => {
            pos += 2;
            LengthMod::Hh
        }
        Some(b'h') => {
            pos += 1;
            LengthMod::H
        }
        Some(b'l') => {
            pos += 1;
            LengthMod::L
        }
        _ => LengthMod::None,
    };

    let conversion = *fmt.get(pos)?;
    pos += 1;
    match conversion {
        b'd' | b'i' | b'u' | b'o' | b'x' | b'X' | b'c' | b's' | b'S' | b'p' | b'e' | b'E'
        | b'f' | b'F' | b'g' | b'G' => {}
        _ => return None,
    }

    Some((
        FormatSpec {
            flags,
            width,
            precision,
            length,
            conversion,
        },
        pos,
    ))
}

/// Split a format string into literal runs, `%%` escapes and directives.
///
/// A malformed directive emits its '%' literally and parsing resumes after it.
pub fn parse_format_string(fmt: &[u8]) -> Vec<FormatSegment<'_>> {
    let mut segments = Vec::new();
    let mut pos = 0;
    let len = fmt.len();

    while pos < len {
        let start = pos;
        while pos < len && fmt[pos] != b'%' {
            pos += 1;
        }
        if pos > start {
            segments.push(FormatSegment::Literal(&fmt[start..pos]));
        }
        if pos >= len {
            break;
        }
        pos += 1;
        if pos >= len {
            segments.push(FormatSegment::Literal(&fmt[pos - 1..pos]));
            break;
        }
        if fmt[pos] == b'%' {
            segments.push(FormatSegment::Percent);
            pos += 1;
            continue;
        }
        if let Some((spec, consumed)) = parse_format_spec(&fmt[pos..]) {
            pos += consumed;
            segments.push(FormatSegment::Spec(spec));
        } else {
            segments.push(FormatSegment::Literal(&fmt[pos - 1..pos]));
        }
    }
    segments
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Render `fmt` (up to its first NUL) into a fresh byte vector.
pub fn format_bytes(fmt: &[u8], args: &[Arg<'_>]) -> Result<Vec<u8>, PrintfError> {
    let mut out = Vec::new();
    let mut next = 0usize;
    for segment in parse_format_string(until_nul(fmt)) {
        match segment {
            FormatSegment::Literal(lit) => out.extend_from_slice(lit),
            FormatSegment::Percent => out.push(b'%'),
            FormatSegment::Spec(spec) => render_spec(spec, args, &mut next, &mut out)?,
        }
    }
    Ok(out)
}

/// `vsprintf`: format into `buf`, NUL-terminate, return the character count.
pub fn vsprintf(buf: &mut [u8], fmt: &[u8], args: &[Arg<'_>]) -> Result<usize, PrintfError> {
    let out = format_bytes(fmt, args)?;
    if out.len() >= buf.len() {
        return Err(PrintfError::BufferTooSmall {
            needed: out.len() + 1,
            capacity: buf.len(),
        });
    }
    buf[..out.len()].copy_from_slice(&out);
    buf[out.len()] = 0;
    Ok(out.len())
}

/// `sprintf_P`: the format string lives in program memory.
pub fn sprintf_p(buf: &mut [u8], fmt: ProgMem<'_>, args: &[Arg<'_>]) -> Result<usize, PrintfError> {
    vsprintf(buf, fmt.c_str(), args)
}

/// `snprintf`: writes at most `buf.len() - 1` characters plus NUL and
/// returns the length the full output would have had.
pub fn snprintf(buf: &mut [u8], fmt: &[u8], args: &[Arg<'_>]) -> Result<usize, PrintfError> {
    let out = format_bytes(fmt, args)?;
    if let Some(room) = buf.len().checked_sub(1) {
        let n = out.len().min(room);
        buf[..n].copy_from_slice(&out[..n]);
        buf[n] = 0;
    }
    Ok(out.len())
}

fn render_spec(
    mut spec: FormatSpec,
    args: &[Arg<'_>],
    next: &mut usize,
    out: &mut Vec<u8>,
) -> Result<(), PrintfError> {
    if spec.width == Width::FromArg {
        let w = int_arg(take_arg(args, next)?, *next, b'*')? as i16;
        if w < 0 {
            spec.flags.left_justify = true;
            spec.flags.zero_pad = false;
        }
        spec.width = Width::Fixed(usize::from(w.unsigned_abs()).min(MAX_FIELD));
    }
    if spec.precision == Precision::FromArg {
        let p = int_arg(take_arg(args, next)?, *next, b'*')? as i16;
        spec.precision = if p < 0 {
            Precision::None
        } else {
            Precision::Fixed((p as usize).min(MAX_FIELD))
        };
    }

    let arg = take_arg(args, next)?;
    let index = *next;
    match spec.conversion {
        b'd' | b'i' => {
            let v = int_arg(arg, index, spec.conversion)?;
            let v = match spec.length {
                LengthMod::Hh => i64::from(v as i8),
                LengthMod::L => i64::from(v as i32),
                LengthMod::H | LengthMod::None => i64::from(v as i16),
            };
            format_signed(v, &spec, out);
        }
        b'u' | b'o' | b'x' | b'X' => {
            let v = int_arg(arg, index, spec.conversion)?;
            let v = match spec.length {
                LengthMod::Hh => u64::from(v as u8),
                LengthMod::L => u64::from(v as u32),
                LengthMod::H | LengthMod::None => u64::from(v as u16),
            };
            format_unsigned(v, &spec, out);
        }
        b'c' => format_char(int_arg(arg, index, b'c')? as u8, &spec, out),
        b's' | b'S' => match arg {
            Arg::Str(s) => format_str(s, &spec, out),
            _ => return Err(mismatch(index, spec.conversion)),
        },
        b'p' => format_pointer(int_arg(arg, index, b'p')? as u16, &spec, out),
        _ => match arg {
            Arg::Double(v) => format_float(f64::from(v as f32), &spec, out),
            _ => return Err(mismatch(index, spec.conversion)),
        },
    }
    Ok(())
}

fn take_arg<'a>(args: &[Arg<'a>], next: &mut usize) -> Result<Arg<'a>, PrintfError> {
    let arg = args
        .get(*next)
        .copied()
        .ok_or(PrintfError::MissingArgument { index: *next + 1 })?;
    *next += 1;
    Ok(arg)
}

fn int_arg(arg: Arg<'_>, index: usize, conversion: u8) -> Result<i64, PrintfError> {
    match arg {
        Arg::Int(v) => Ok(v),
        Arg::Char(c) => Ok(i64::from(c)),
        Arg::Ptr(p) => Ok(i64::from(p)),
        _ => Err(mismatch(index, conversion)),
    }
}

fn mismatch(index: usize, conversion: u8) -> PrintfError {
    PrintfError::ArgumentMismatch {
        index,
        conversion: char::from(conversion),
    }
}

// ---------------------------------------------------------------------------
// Renderers
// ---------------------------------------------------------------------------

/// Render a signed decimal integer.
pub fn format_signed(value: i64, spec: &FormatSpec, buf: &mut Vec<u8>) {
    let digits = render_digits(value.unsigned_abs(), 10, false);
    let sign = if value < 0 {
        Some(b'-')
    } else if spec.flags.force_sign {
        Some(b'+')
    } else if spec.flags.space_sign {
        Some(b' ')
    } else {
        None
    };
    emit_integer(sign, b"", &digits, spec, buf);
}

/// Render an unsigned integer in the base the conversion selects.
///
/// `+` and space never apply to unsigned conversions.
pub fn format_unsigned(value: u64, spec: &FormatSpec, buf: &mut Vec<u8>) {
    let (base, uppercase) = int_base(spec.conversion);
    let digits = render_digits(value, base, uppercase);
    let prefix: &[u8] = if !spec.flags.alt_form || value == 0 {
        b""
    } else {
        match spec.conversion {
            b'o' if min_digits(spec) <= digits.len() => b"0",
            b'x' => b"0x",
            b'X' => b"0X",
            _ => b"",
        }
    };
    emit_integer(None, prefix, &digits, spec, buf);
}

/// `%p` is `%#x` of the 16-bit address.
pub fn format_pointer(addr: u16, spec: &FormatSpec, buf: &mut Vec<u8>) {
    let spec = FormatSpec {
        flags: FormatFlags {
            alt_form: true,
            ..spec.flags
        },
        conversion: b'x',
        ..spec.clone()
    };
    format_unsigned(u64::from(addr), &spec, buf);
}

/// Render a floating-point value for `%e`, `%f` and `%g` (and upper case).
pub fn format_float(value: f64, spec: &FormatSpec, buf: &mut Vec<u8>) {
    let precision = match spec.precision {
        Precision::Fixed(p) => p,
        _ => 6,
    };
    let upper = spec.conversion.is_ascii_uppercase();

    let sign = if value.is_sign_negative() && !value.is_nan() {
        Some(b'-')
    } else if spec.flags.force_sign {
        Some(b'+')
    } else if spec.flags.space_sign {
        Some(b' ')
    } else {
        None
    };

    let (body, finite) = if value.is_nan() {
        (if upper { "NAN" } else { "nan" }.to_string(), false)
    } else if value.is_infinite() {
        (if upper { "INF" } else { "inf" }.to_string(), false)
    } else {
        let abs = value.abs();
        let alt = spec.flags.alt_form;
        let body = match spec.conversion | 0x20 {
            b'e' => format_e(abs, precision, upper, alt),
            b'g' => format_g(abs, precision, upper, alt),
            _ => format_f(abs, precision, alt),
        };
        (body, true)
    };

    let content_len = usize::from(sign.is_some()) + body.len();
    let pad_total = resolve_width(spec).saturating_sub(content_len);
    let zero_fill = finite && spec.flags.zero_pad;

    if !spec.flags.left_justify && !zero_fill {
        pad(buf, b' ', pad_total);
    }
    if let Some(s) = sign {
        buf.push(s);
    }
    if !spec.flags.left_justify && zero_fill {
        pad(buf, b'0', pad_total);
    }
    buf.extend_from_slice(body.as_bytes());
    if spec.flags.left_justify {
        pad(buf, b' ', pad_total);
    }
}

/// Render a C string; precision caps the number of bytes taken.
pub fn format_str(s: &[u8], spec: &FormatSpec, buf: &mut Vec<u8>) {
    let s = until_nul(s);
    let effective = match spec.precision {
        Precision::Fixed(p) => &s[..s.len().min(p)],
        _ => s,
    };
    pad_around(effective, spec, buf);
}

pub fn format_char(c: u8, spec: &FormatSpec, buf: &mut Vec<u8>) {
    pad_around(&[c], spec, buf);
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn parse_decimal(digits: &[u8]) -> usize {
    digits
        .iter()
        .fold(0_usize, |acc, &d| acc.saturating_mul(10).saturating_add(usize::from(d - b'0')))
        .min(MAX_FIELD)
}

fn resolve_width(spec: &FormatSpec) -> usize {
    match spec.width {
        Width::Fixed(w) => w,
        _ => 0,
    }
}

fn min_digits(spec: &FormatSpec) -> usize {
    match spec.precision {
        Precision::Fixed(p) => p,
        _ => 0,
    }
}

fn int_base(conversion: u8) -> (u64, bool) {
    match conversion {
        b'o' => (8, false),
        b'x' => (16, false),
        b'X' => (16, true),
        _ => (10, false),
    }
}

/// Digits of `value`, most significant first. Zero renders as "0".
fn render_digits(mut value: u64, base: u64, uppercase: bool) -> Vec<u8> {
    let alpha = if uppercase { b'A' } else { b'a' };
    let mut digits = Vec::with_capacity(22);
    loop {
        let digit = (value % base) as u8;
        digits.push(if digit < 10 {
            b'0' + digit
        } else {
            alpha + (digit - 10)
        });
        value /= base;
        if value == 0 {
            break;
        }
    }
    digits.reverse();
    digits
}

fn emit_integer(sign: Option<u8>, prefix: &[u8], digits: &[u8], spec: &FormatSpec, buf: &mut Vec<u8>) {
    let zeros = min_digits(spec).saturating_sub(digits.len());
    let content = usize::from(sign.is_some()) + prefix.len() + zeros + digits.len();
    let pad_total = resolve_width(spec).saturating_sub(content);
    let zero_fill = spec.flags.zero_pad && spec.precision == Precision::None;

    if !spec.flags.left_justify && !zero_fill {
        pad(buf, b' ', pad_total);
    }
    if let Some(s) = sign {
        buf.push(s);
    }
    buf.extend_from_slice(prefix);
    if !spec.flags.left_justify && zero_fill {
        pad(buf, b'0', pad_total);
    }
    pad(buf, b'0', zeros);
    buf.extend_from_slice(digits);
    if spec.flags.left_justify {
        pad(buf, b' ', pad_total);
    }
}

fn pad_around(content: &[u8], spec: &FormatSpec, buf: &mut Vec<u8>) {
    let pad_total = resolve_width(spec).saturating_sub(content.len());
    if !spec.flags.left_justify {
        pad(buf, b' ', pad_total);
    }
    buf.extend_from_slice(content);
    if spec.flags.left_justify {
        pad(buf, b' ', pad_total);
    }
}

fn pad(buf: &mut Vec<u8>, byte: u8, count: usize) {
    buf.resize(buf.len() + count, byte);
}

/// `%f`: fixed-point decimal.
fn format_f(value: f64, precision: usize, alt_form: bool) -> String {
    let mut s = format!("{value:.precision$}");
    if alt_form && precision == 0 {
        s.push('.');
    }
    s
}

/// `%e`: one digit, point, `precision` digits, then a signed exponent of at
/// least two digits.
fn format_e(value: f64, precision: usize, uppercase: bool, alt_form: bool) -> String {
    let (mantissa, exp) = split_exp(value, precision);
    let mut s = mantissa;
    if alt_form && precision == 0 {
        s.push('.');
    }
    s.push(if uppercase { 'E' } else { 'e' });
    s.push(if exp < 0 { '-' } else { '+' });
    s.push_str(&format!("{:02}", exp.unsigned_abs()));
    s
}

/// `%g`: `%e` when the exponent is below -4 or at least the precision,
/// otherwise `%f`; trailing zeros dropped unless `#`.
fn format_g(value: f64, precision: usize, uppercase: bool, alt_form: bool) -> String {
    let p = precision.max(1);
    let (_, exp) = split_exp(value, p - 1);
    if exp >= -4 && exp < p as i32 {
        let frac = (p as i32 - 1 - exp).max(0) as usize;
        let mut s = format_f(value, frac, alt_form);
        if !alt_form {
            strip_trailing_zeros(&mut s);
        }
        s
    } else {
        let s = format_e(value, p - 1, uppercase, alt_form);
        if alt_form {
            return s;
        }
        match s.find(['e', 'E']) {
            Some(e_pos) => {
                let mut mantissa = s[..e_pos].to_string();
                strip_trailing_zeros(&mut mantissa);
                mantissa + &s[e_pos..]
            }
            None => s,
        }
    }
}

/// Rounded mantissa text and decimal exponent, via Rust's `{:e}` output.
fn split_exp(value: f64, precision: usize) -> (String, i32) {
    let s = format!("{value:.precision$e}");
    match s.split_once('e') {
        Some((m, e)) => (m.to_string(), e.parse().unwrap_or(0)),
        None => (s, 0),
    }
}

/// Remove trailing zeros after the decimal point.
fn strip_trailing_zeros(s: &mut String) {
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(f: &str, args: &[Arg<'_>]) -> String {
        String::from_utf8(format_bytes(f.as_bytes(), args).unwrap()).unwrap()
    }

    fn ints(values: &[i64]) -> Vec<Arg<'static>> {
        values.iter().map(|&v| Arg::Int(v)).collect()
    }

    #[test]
    fn parse_width_precision() {
        let (spec, consumed) = parse_format_spec(b"10.5f").unwrap();
        assert_eq!(consumed, 5);
        assert_eq!(spec.conversion, b'f');
        assert_eq!(spec.width, Width::Fixed(10));
        assert_eq!(spec.precision, Precision::Fixed(5));
    }

    #[test]
    fn parse_flags_left_overrides_zero() {
        let (spec, _) = parse_format_spec(b"-+#010d").unwrap();
        assert!(spec.flags.left_justify);
        assert!(spec.flags.force_sign);
        assert!(spec.flags.alt_form);
        assert!(!spec.flags.zero_pad);
    }

    #[test]
    fn parse_length_modifiers() {
        assert_eq!(parse_format_spec(b"hhd").unwrap().0.length, LengthMod::Hh);
        assert_eq!(parse_format_spec(b"ho").unwrap().0.length, LengthMod::H);
        assert_eq!(parse_format_spec(b"lx").unwrap().0.length, LengthMod::L);
        assert!(parse_format_spec(b"llu").is_none());
        assert!(parse_format_spec(b"q").is_none());
    }

    #[test]
    fn octal_basic_and_flags() {
        assert_eq!(fmt("%o", &ints(&[0])), "0");
        assert_eq!(fmt("%o", &ints(&[0o123456])), "123456");
        assert_eq!(
            fmt("%o %o %o %o %o", &ints(&[1, 0x7fff, 0x8000, 0x8001, 0xffff])),
            "1 77777 100000 100001 177777"
        );
        assert_eq!(fmt("% o %+o", &ints(&[1, 1])), "1 1");
        assert_eq!(fmt("%#o %#o %#o", &ints(&[0, 1, 0xffff])), "0 01 0177777");
    }

    #[test]
    fn precision_zero_still_prints_zero() {
        assert_eq!(fmt("%.0o", &ints(&[0])), "0");
        assert_eq!(fmt("%.0d", &ints(&[0])), "0");
        assert_eq!(fmt("%.2o %.2o", &ints(&[0, 8])), "00 10");
    }

    #[test]
    fn precision_disables_zero_fill() {
        assert_eq!(fmt("%08.4o", &ints(&[1])), "    0001");
        assert_eq!(fmt("%08.o", &ints(&[1])), "       1");
        assert_eq!(fmt("%04o", &ints(&[0o12])), "0012");
    }

    #[test]
    fn alternate_octal_with_precision() {
        assert_eq!(
            fmt("%#8.4o.%#8.4o.%#8.4o", &ints(&[0, 0o123, 0o1234])),
            "    0000.    0123.   01234"
        );
        assert_eq!(fmt("%#4o", &ints(&[0o12])), " 012");
    }

    #[test]
    fn length_modifiers_truncate() {
        assert_eq!(fmt("%lo", &ints(&[0xffff_ffff])), "37777777777");
        assert_eq!(fmt("%ho", &ints(&[0xfffe])), "177776");
        assert_eq!(fmt("%d", &ints(&[0xffff])), "-1");
        assert_eq!(fmt("%hhu", &ints(&[0x1ff])), "255");
        assert_eq!(fmt("%ld", &ints(&[-100_000])), "-100000");
    }

    #[test]
    fn wide_fields() {
        let out = fmt("%255o", &ints(&[1]));
        assert_eq!(out.len(), 255);
        assert!(out.ends_with(" 1"));
        let out = fmt("%.255o", &ints(&[2]));
        assert_eq!(out.len(), 255);
        assert!(out.starts_with("000") && out.ends_with("02"));
    }

    #[test]
    fn oversized_fields_saturate() {
        let out = fmt("%99999999999999999999d", &ints(&[1]));
        assert_eq!(out.len(), MAX_FIELD);
        assert!(out.ends_with(" 1"));
        let out = fmt("%.4000000000d", &ints(&[7]));
        assert_eq!(out.len(), MAX_FIELD);
        assert!(out.ends_with("07"));
        assert_eq!(fmt("%*d", &ints(&[-30000, 1])).len(), MAX_FIELD);
        assert_eq!(fmt("%.*s", &[Arg::Int(30000), Arg::Str(b"ab")]), "ab");
        let (spec, _) = parse_format_spec(b"1000.1000f").unwrap();
        assert_eq!((spec.width, spec.precision), (Width::Fixed(255), Precision::Fixed(255)));
    }

    #[test]
    fn signed_and_hex() {
        assert_eq!(fmt("%+5d|%-5d|%05d", &ints(&[42, -7, -42])), "  +42|-7   |-0042");
        assert_eq!(fmt("%#x %#X %x", &ints(&[255, 255, 0])), "0xff 0XFF 0");
        assert_eq!(fmt("%#.4x", &ints(&[1])), "0x0001");
    }

    #[test]
    fn strings_chars_pointers() {
        assert_eq!(fmt("[%5s|%-4.2s]", &[Arg::Str(b"abc\0zz"), Arg::Str(b"xyz")]), "[  abc|xy  ]");
        assert_eq!(fmt("%c%c", &[Arg::Char(b'o'), Arg::Int(0x16b)]), "ok");
        assert_eq!(fmt("%p %p", &[Arg::Ptr(0x1234), Arg::Ptr(0)]), "0x1234 0");
    }

    #[test]
    fn star_width_and_precision() {
        assert_eq!(fmt("%*d|%-*d", &ints(&[4, 7, 3, 1])), "   7|1  ");
        assert_eq!(fmt("%*d", &ints(&[-3, 5])), "5  ");
        assert_eq!(fmt("%.*o", &ints(&[3, 1])), "001");
    }

    #[test]
    fn floats() {
        assert_eq!(fmt("%.2f", &[Arg::Double(3.14159)]), "3.14");
        assert_eq!(fmt("%e", &[Arg::Double(1234.5)]), "1.234500e+03");
        assert_eq!(fmt("%g %g", &[Arg::Double(0.0001), Arg::Double(1e-5)]), "0.0001 1e-05");
        assert_eq!(fmt("%08.2f", &[Arg::Double(-1.5)]), "-0001.50");
        assert_eq!(fmt("%5f|%F", &[Arg::Double(f64::INFINITY), Arg::Double(f64::NAN)]), "  inf|NAN");
    }

    #[test]
    fn percent_and_malformed() {
        assert_eq!(fmt("100%%", &[]), "100%");
        assert_eq!(fmt("%q", &[]), "%q");
        assert_eq!(fmt("50%", &[]), "50%");
    }

    #[test]
    fn vsprintf_writes_terminator_and_count() {
        let mut buf = [0xAAu8; 16];
        let n = vsprintf(&mut buf, b"%o-%o\0ignored", &ints(&[8, 9])).unwrap();
        assert_eq!(n, 5);
        assert_eq!(&buf[..6], b"10-11\0");
    }

    #[test]
    fn sprintf_p_reads_flash_format() {
        let flash = ProgMem::new(b"%#o\0");
        let mut buf = [0u8; 8];
        assert_eq!(sprintf_p(&mut buf, flash, &ints(&[8])), Ok(3));
        assert_eq!(&buf[..4], b"010\0");
    }

    #[test]
    fn snprintf_truncates() {
        let mut buf = [0xAAu8; 4];
        assert_eq!(snprintf(&mut buf, b"%d", &ints(&[12345])), Ok(5));
        assert_eq!(&buf, b"123\0");
        assert_eq!(snprintf(&mut [], b"%d", &ints(&[1])), Ok(1));
    }

    #[test]
    fn errors() {
        assert_eq!(format_bytes(b"%d %d", &ints(&[1])), Err(PrintfError::MissingArgument { index: 2 }));
        assert_eq!(
            format_bytes(b"%s", &ints(&[1])),
            Err(PrintfError::ArgumentMismatch { index: 1, conversion: 's' })
        );
        let mut small = [0u8; 3];
        assert_eq!(
            vsprintf(&mut small, b"abc", &[]),
            Err(PrintfError::BufferTooSmall { needed: 4, capacity: 3 })
        );
    }
}
