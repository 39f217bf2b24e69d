//! `vfscanf` and its string/program-memory front ends.
//!
//! Input comes from a [`ByteSource`]. `sscanf` input ends at the first NUL;
//! a stream may deliver NUL as an ordinary (non-space) byte. Destinations are
//! byte slices, one per assigning conversion, and integers are stored
//! little-endian in 1, 2 or 4 bytes for `hh`, no modifier and `l`.
//!
//! Result rules:
//! - the count of assigned conversions is returned, `%n` and `*` excluded;
//! - a conversion or literal that fails at end of input returns
//!   [`EOF`](crate::EOF) when nothing has been assigned yet;
//! - a width of 0 or an unknown conversion character ends the scan.

use thiserror::Error;

use crate::EOF;
use crate::pgmspace::ProgMem;
use crate::stdlib::conversion::is_space;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    #[error("no destination supplied for argument slot {index}")]
    MissingArgument { index: usize },
    #[error("destination {index} holds {capacity} bytes, conversion needs {needed}")]
    DestinationTooSmall {
        index: usize,
        needed: usize,
        capacity: usize,
    },
}

// ---------------------------------------------------------------------------
// Input sources
// ---------------------------------------------------------------------------

/// A `getc`-style input. `None` is end of input.
pub trait ByteSource {
    fn next_byte(&mut self) -> Option<u8>;
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn next_byte(&mut self) -> Option<u8> {
        (**self).next_byte()
    }
}

/// The string behind `sscanf`: ends at the first NUL or the slice end.
#[derive(Debug, Clone)]
pub struct CStrSource<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> CStrSource<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }
}

impl ByteSource for CStrSource<'_> {
    fn next_byte(&mut self) -> Option<u8> {
        let c = *self.bytes.get(self.pos).filter(|&&c| c != 0)?;
        self.pos += 1;
        Some(c)
    }
}

/// A stream over raw bytes; NUL is data.
#[derive(Debug, Clone)]
pub struct StreamSource<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> StreamSource<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }
}

impl ByteSource for StreamSource<'_> {
    fn next_byte(&mut self) -> Option<u8> {
        let c = *self.bytes.get(self.pos)?;
        self.pos += 1;
        Some(c)
    }
}

/// A device stream whose `get` callback reads a flash buffer with
/// `pgm_read_byte` until a fixed end.
#[derive(Debug, Clone)]
pub struct ProgMemSource<'a> {
    flash: ProgMem<'a>,
    pos: usize,
    end: usize,
}

impl<'a> ProgMemSource<'a> {
    pub fn new(flash: ProgMem<'a>, len: usize) -> Self {
        Self {
            flash,
            pos: 0,
            end: len.min(flash.len()),
        }
    }
}

impl ByteSource for ProgMemSource<'_> {
    fn next_byte(&mut self) -> Option<u8> {
        if self.pos == self.end {
            return None;
        }
        let c = self.flash.read_byte(self.pos).ok()?;
        self.pos += 1;
        Some(c)
    }
}

/// Where the format string lives.
#[derive(Debug, Clone, Copy)]
pub enum Format<'a> {
    Ram(&'a [u8]),
    Flash(ProgMem<'a>),
}

impl Format<'_> {
    /// Byte at `pos`; the end of the string reads as NUL.
    fn byte(&self, pos: usize) -> u8 {
        match self {
            Format::Ram(s) => s.get(pos).copied().unwrap_or(0),
            Format::Flash(p) => p.read_byte(pos).unwrap_or(0),
        }
    }
}

// ---------------------------------------------------------------------------
// Front ends
// ---------------------------------------------------------------------------

pub fn sscanf(input: &[u8], fmt: &[u8], args: &mut [&mut [u8]]) -> Result<i32, ScanError> {
    vfscanf(CStrSource::new(input), Format::Ram(fmt), args)
}

/// `sscanf_P`: format string in program memory.
pub fn sscanf_p(input: &[u8], fmt: ProgMem<'_>, args: &mut [&mut [u8]]) -> Result<i32, ScanError> {
    vfscanf(CStrSource::new(input), Format::Flash(fmt), args)
}

pub fn fscanf<S: ByteSource>(stream: S, fmt: &[u8], args: &mut [&mut [u8]]) -> Result<i32, ScanError> {
    vfscanf(stream, Format::Ram(fmt), args)
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IntSize {
    Char,
    Short,
    Long,
}

impl IntSize {
    fn bytes(self) -> usize {
        match self {
            IntSize::Char => 1,
            IntSize::Short => 2,
            IntSize::Long => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Radix {
    Dec,
    Oct,
    Hex,
    Auto,
}

/// Stream state: one byte of pushback plus the count `%n` reports.
struct Scanner<S> {
    src: S,
    pushback: Option<u8>,
    consumed: usize,
    eof: bool,
}

impl<S: ByteSource> Scanner<S> {
    fn getc(&mut self) -> Option<u8> {
        let c = match self.pushback.take() {
            Some(c) => c,
            None => match self.src.next_byte() {
                Some(c) => c,
                None => {
                    self.eof = true;
                    return None;
                }
            },
        };
        self.consumed += 1;
        Some(c)
    }

    fn ungetc(&mut self, c: u8) {
        self.pushback = Some(c);
        self.consumed -= 1;
    }

    /// Skip whitespace; returns the next byte without consuming it.
    fn skip_spaces(&mut self) -> Option<u8> {
        loop {
            let c = self.getc()?;
            if !is_space(c) {
                self.ungetc(c);
                return Some(c);
            }
        }
    }
}

struct Destinations<'a, 'b> {
    args: &'a mut [&'b mut [u8]],
    next: usize,
}

impl Destinations<'_, '_> {
    fn take(&mut self) -> Result<(usize, &mut [u8]), ScanError> {
        let index = self.next + 1;
        let slot = self
            .args
            .get_mut(self.next)
            .ok_or(ScanError::MissingArgument { index })?;
        self.next += 1;
        Ok((index, &mut **slot))
    }
}

fn store(dest: &mut [u8], index: usize, at: usize, bytes: &[u8]) -> Result<(), ScanError> {
    let capacity = dest.len();
    let slot = dest
        .get_mut(at..at + bytes.len())
        .ok_or(ScanError::DestinationTooSmall {
            index,
            needed: at + bytes.len(),
            capacity,
        })?;
    slot.copy_from_slice(bytes);
    Ok(())
}

fn at_eof(nconvs: i32) -> i32 {
    if nconvs > 0 { nconvs } else { EOF }
}

/// Scan `src` according to `fmt`, writing into `args`.
pub fn vfscanf<S: ByteSource>(
    src: S,
    fmt: Format<'_>,
    args: &mut [&mut [u8]],
) -> Result<i32, ScanError> {
    let mut sc = Scanner {
        src,
        pushback: None,
        consumed: 0,
        eof: false,
    };
    let mut dests = Destinations { args, next: 0 };
    let mut nconvs = 0i32;
    let mut pos = 0usize;

    loop {
        let mut c = fmt.byte(pos);
        pos += 1;
        if c == 0 {
            return Ok(nconvs);
        }

        if is_space(c) {
            sc.skip_spaces();
            continue;
        }

        if c != b'%' || fmt.byte(pos) == b'%' {
            if c == b'%' {
                pos += 1;
            }
            match sc.getc() {
                None => return Ok(at_eof(nconvs)),
                Some(i) if i != c => {
                    sc.ungetc(i);
                    return Ok(nconvs);
                }
                Some(_) => continue,
            }
        }

        // Directive: %[*][width][hh|h|l]conv
        let mut next = || {
            let b = fmt.byte(pos);
            pos += 1;
            b
        };
        c = next();
        let suppress = c == b'*';
        if suppress {
            c = next();
        }

        let mut width: Option<usize> = None;
        while c.is_ascii_digit() {
            let w = width.unwrap_or(0);
            width = Some((w * 10 + usize::from(c - b'0')).min(usize::from(u16::MAX)));
            c = next();
        }
        if width == Some(0) {
            return Ok(nconvs);
        }

        let mut size = IntSize::Short;
        match c {
            b'h' => {
                c = next();
                if c == b'h' {
                    size = IntSize::Char;
                    c = next();
                }
            }
            b'l' => {
                size = IntSize::Long;
                c = next();
            }
            _ => {}
        }

        if !matches!(
            c,
            b'c' | b's' | b'd' | b'u' | b'i' | b'o' | b'x' | b'X' | b'p' | b'n' | b'['
                | b'e' | b'f' | b'g' | b'E' | b'F' | b'G'
        ) {
            return Ok(nconvs);
        }

        let max = width.unwrap_or(usize::from(u16::MAX));

        match c {
            b'n' => {
                if !suppress {
                    let (index, dest) = dests.take()?;
                    let count = sc.consumed as u32;
                    store(dest, index, 0, &count.to_le_bytes()[..size.bytes()])?;
                }
                continue;
            }
            b'c' => {
                let count = width.unwrap_or(1);
                let mut dest = if suppress { None } else { Some(dests.take()?) };
                for k in 0..count {
                    let Some(byte) = sc.getc() else {
                        return Ok(at_eof(nconvs));
                    };
                    if let Some((index, d)) = dest.as_mut() {
                        store(d, *index, k, &[byte])?;
                    }
                }
            }
            b'[' => {
                let Some((set, used)) = parse_scanset(&fmt, pos) else {
                    return Ok(nconvs);
                };
                pos = used;
                let mut dest = if suppress { None } else { Some(dests.take()?) };
                let mut count = 0usize;
                while count < max {
                    let Some(byte) = sc.getc() else { break };
                    if !set[usize::from(byte)] {
                        sc.ungetc(byte);
                        break;
                    }
                    if let Some((index, d)) = dest.as_mut() {
                        store(d, *index, count, &[byte])?;
                    }
                    count += 1;
                }
                if count == 0 {
                    return Ok(if sc.eof { at_eof(nconvs) } else { nconvs });
                }
                if let Some((index, d)) = dest.as_mut() {
                    store(d, *index, count, &[0])?;
                }
            }
            _ => {
                if sc.skip_spaces().is_none() {
                    return Ok(at_eof(nconvs));
                }
                match c {
                    b's' => {
                        let mut dest = if suppress { None } else { Some(dests.take()?) };
                        let mut count = 0usize;
                        while count < max {
                            let Some(byte) = sc.getc() else { break };
                            if is_space(byte) {
                                sc.ungetc(byte);
                                break;
                            }
                            if let Some((index, d)) = dest.as_mut() {
                                store(d, *index, count, &[byte])?;
                            }
                            count += 1;
                        }
                        if let Some((index, d)) = dest.as_mut() {
                            store(d, *index, count, &[0])?;
                        }
                    }
                    b'e' | b'f' | b'g' | b'E' | b'F' | b'G' => {
                        let Some(value) = conv_float(&mut sc, max) else {
                            return Ok(if sc.eof { at_eof(nconvs) } else { nconvs });
                        };
                        if !suppress {
                            let (index, dest) = dests.take()?;
                            store(dest, index, 0, &value.to_le_bytes())?;
                        }
                    }
                    _ => {
                        let radix = match c {
                            b'd' | b'u' => Radix::Dec,
                            b'o' => Radix::Oct,
                            b'i' => Radix::Auto,
                            _ => Radix::Hex,
                        };
                        let Some(value) = conv_int(&mut sc, max, radix) else {
                            return Ok(if sc.eof { at_eof(nconvs) } else { nconvs });
                        };
                        if !suppress {
                            let (index, dest) = dests.take()?;
                            store(dest, index, 0, &value.to_le_bytes()[..size.bytes()])?;
                        }
                    }
                }
            }
        }

        if !suppress {
            nconvs += 1;
        }
    }
}

/// Integer conversion. The sign counts against the width; `0x` is accepted
/// for `%x` and `%i`, and a leading `0` switches `%i` to octal.
fn conv_int<S: ByteSource>(sc: &mut Scanner<S>, width: usize, radix: Radix) -> Option<u32> {
    let mut width = width;
    let mut c = sc.getc()?;
    let mut negative = false;
    if c == b'-' || c == b'+' {
        negative = c == b'-';
        width -= 1;
        if width == 0 {
            return None;
        }
        c = sc.getc()?;
    }

    let mut base: u32 = match radix {
        Radix::Oct => 8,
        Radix::Hex => 16,
        Radix::Dec | Radix::Auto => 10,
    };
    let mut have_digits = false;
    let mut val: u32 = 0;
    let finish = |val: u32| Some(if negative { val.wrapping_neg() } else { val });

    if matches!(radix, Radix::Hex | Radix::Auto) && c == b'0' {
        width -= 1;
        if width == 0 {
            return finish(0);
        }
        let Some(n) = sc.getc() else {
            return finish(0);
        };
        have_digits = true;
        c = n;
        if c == b'x' || c == b'X' {
            base = 16;
            width -= 1;
            if width == 0 {
                return finish(0);
            }
            let Some(n) = sc.getc() else {
                return finish(0);
            };
            c = n;
        } else if radix == Radix::Auto {
            base = 8;
        }
    }

    loop {
        let digit = match c {
            b'0'..=b'9' => u32::from(c - b'0'),
            b'a'..=b'z' => u32::from(c - b'a') + 10,
            b'A'..=b'Z' => u32::from(c - b'A') + 10,
            _ => u32::MAX,
        };
        if digit >= base {
            sc.ungetc(c);
            break;
        }
        val = val.wrapping_mul(base).wrapping_add(digit);
        have_digits = true;
        width -= 1;
        if width == 0 {
            break;
        }
        match sc.getc() {
            Some(n) => c = n,
            None => break,
        }
    }

    if have_digits { finish(val) } else { None }
}

/// Floating-point conversion to binary32: sign, `inf`/`nan`, digits with an
/// optional point and exponent.
fn conv_float<S: ByteSource>(sc: &mut Scanner<S>, width: usize) -> Option<f32> {
    let mut width = width;
    let mut text = String::new();
    let mut c = sc.getc()?;
    if c == b'-' || c == b'+' {
        text.push(char::from(c));
        width -= 1;
        if width == 0 {
            return None;
        }
        c = sc.getc()?;
    }

    let lower = c | 0x20;
    if lower == b'i' || lower == b'n' {
        let word: &[u8] = if lower == b'i' { b"inf" } else { b"nan" };
        for (k, &expect) in word.iter().enumerate() {
            if k > 0 {
                c = sc.getc()?;
            }
            if c | 0x20 != expect {
                sc.ungetc(c);
                return None;
            }
        }
        let value = if lower == b'i' { f32::INFINITY } else { f32::NAN };
        return Some(if text == "-" { -value } else { value });
    }

    let (mut digits, mut dot, mut exp) = (false, false, false);
    loop {
        let accept = match c {
            b'0'..=b'9' => {
                digits = true;
                true
            }
            b'.' if !dot && !exp => {
                dot = true;
                true
            }
            b'e' | b'E' if digits && !exp => {
                exp = true;
                true
            }
            b'+' | b'-' => text.ends_with('e') || text.ends_with('E'),
            _ => false,
        };
        if !accept {
            sc.ungetc(c);
            break;
        }
        text.push(char::from(c));
        width -= 1;
        if width == 0 {
            break;
        }
        match sc.getc() {
            Some(n) => c = n,
            None => break,
        }
    }
    if !digits {
        return None;
    }
    let text = text.trim_end_matches(['e', 'E', '+', '-']);
    text.parse().ok()
}

/// Parse `%[...]` starting just after the `[`. Returns the membership table
/// and the format position after the closing `]`.
fn parse_scanset(fmt: &Format<'_>, mut pos: usize) -> Option<([bool; 256], usize)> {
    let mut set = [false; 256];
    let mut negate = false;
    let mut c = fmt.byte(pos);
    if c == b'^' {
        negate = true;
        pos += 1;
        c = fmt.byte(pos);
    }
    let mut first = true;
    loop {
        if c == 0 {
            return None;
        }
        if c == b']' && !first {
            pos += 1;
            break;
        }
        let hi = fmt.byte(pos + 2);
        if fmt.byte(pos + 1) == b'-' && hi != b']' && hi != 0 {
            for b in c.min(hi)..=c.max(hi) {
                set[usize::from(b)] = true;
            }
            pos += 3;
        } else {
            set[usize::from(c)] = true;
            pos += 1;
        }
        first = false;
        c = fmt.byte(pos);
    }
    if negate {
        for member in &mut set {
            *member = !*member;
        }
    }
    Some((set, pos))
}
