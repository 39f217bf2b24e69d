//! Format-string round-trip checkers for the `printf` and `scanf` families.
//!
//! Format strings are kept in fixture tables as plain text and copied into
//! a NUL-terminated program-memory image when a case needs the `_P`
//! variant.

use std::cmp::Ordering;

use avrlibc_core::pgmspace::{ProgMem, strcmp_p};
use avrlibc_core::stdio::{Arg, ByteSource, PrintfError, ProgMemSource, ScanError};

use crate::check::{CaseFailure, CheckPass, CheckResult, FailureKind, index_code};

/// Output buffer handed to `sprintf_P` for each case.
pub const PRINTF_BUFFER: usize = 260;

/// `printf` count mismatches are reported as `COUNT_CODE_BASE + index`.
pub const COUNT_CODE_BASE: i32 = 1000;

/// Each `scanf` case runs once per fill byte `0..FILL_PASSES`.
pub const FILL_PASSES: u8 = 4;

#[derive(Debug, Clone, Copy)]
pub struct PrintfCase {
    pub expected: &'static str,
    pub format: &'static str,
    pub args: &'static [Arg<'static>],
}

/// What the destination region must look like after a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionCheck {
    /// Bytes the region must start with.
    pub prefix: &'static [u8],
    /// Whether the byte after `prefix` must still hold the fill byte.
    pub then_fill: bool,
}

impl RegionCheck {
    /// No constraint on the region.
    pub const ANY: Self = Self::prefix(&[]);
    /// The first byte was left untouched.
    pub const UNTOUCHED: Self = Self::fill_after(&[]);

    pub const fn prefix(prefix: &'static [u8]) -> Self {
        Self {
            prefix,
            then_fill: false,
        }
    }

    pub const fn fill_after(prefix: &'static [u8]) -> Self {
        Self {
            prefix,
            then_fill: true,
        }
    }

    #[must_use]
    pub fn matches(&self, region: &[u8], fill: u8) -> bool {
        region.starts_with(self.prefix)
            && (!self.then_fill || region.get(self.prefix.len()) == Some(&fill))
    }

    fn describe(&self, fill: u8) -> String {
        let mut text = hex_bytes(self.prefix);
        if self.then_fill {
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str(&format!("{fill:02x}"));
        }
        text
    }

    fn span(&self) -> usize {
        self.prefix.len() + usize::from(self.then_fill)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ScanfCase {
    /// Expected return value; -1 is EOF.
    pub expected: i32,
    pub input: &'static [u8],
    pub format: &'static str,
    /// Byte offset of each destination inside the region, in argument order.
    pub dests: &'static [usize],
    pub check: RegionCheck,
}

/// Run `sprintf_P` on every case: the returned count must equal the
/// produced length (`1000 + index` otherwise) and the text must match
/// (`index` otherwise).
pub fn check_printf<F>(cases: &[PrintfCase], mut sprintf_p: F) -> CheckResult
where
    F: FnMut(&mut [u8], ProgMem<'_>, &[Arg<'_>]) -> Result<usize, PrintfError>,
{
    for (i, case) in cases.iter().enumerate() {
        let index = i + 1;
        let flash = nul_terminated(case.format);
        let mut buf = [0u8; PRINTF_BUFFER];
        let count = sprintf_p(&mut buf, ProgMem::new(&flash), case.args).map_err(|e| {
            CaseFailure::at(index, FailureKind::Error, case.expected, e.to_string())
        })?;
        let produced = ProgMem::new(&buf).c_str();
        if count != produced.len() {
            return Err(CaseFailure::new(
                COUNT_CODE_BASE.saturating_add(index_code(index)),
                index,
                FailureKind::Count,
                produced.len().to_string(),
                count.to_string(),
            ));
        }
        let expected = nul_terminated(case.expected);
        if strcmp_p(produced, ProgMem::new(&expected)) != Ordering::Equal {
            return Err(CaseFailure::at(
                index,
                FailureKind::Content,
                case.expected,
                String::from_utf8_lossy(produced),
            ));
        }
    }
    Ok(CheckPass { cases: cases.len() })
}

/// Run every case over a region of `region_len` bytes, once per fill byte,
/// with a RAM format on even fills and a program-memory format on odd ones.
pub fn check_scanf<R, P>(
    cases: &[ScanfCase],
    region_len: usize,
    mut sscanf: R,
    mut sscanf_p: P,
) -> CheckResult
where
    R: FnMut(&[u8], &[u8], &mut [&mut [u8]]) -> Result<i32, ScanError>,
    P: FnMut(&[u8], ProgMem<'_>, &mut [&mut [u8]]) -> Result<i32, ScanError>,
{
    for (i, case) in cases.iter().enumerate() {
        let flash = nul_terminated(case.format);
        for fill in 0..FILL_PASSES {
            let mut region = vec![fill; region_len];
            let got = {
                let mut args = carve(&mut region, case.dests);
                if fill & 1 == 0 {
                    sscanf(case.input, case.format.as_bytes(), &mut args)
                } else {
                    sscanf_p(case.input, ProgMem::new(&flash), &mut args)
                }
            };
            verify_scan(i + 1, case, got, &region, fill)?;
        }
    }
    Ok(CheckPass { cases: cases.len() })
}

/// Stream variant: the input of each case is delivered byte by byte from
/// program memory (NUL included), into a region filled with `fill`.
pub fn check_scanf_stream<F>(
    cases: &[ScanfCase],
    region_len: usize,
    fill: u8,
    mut fscanf: F,
) -> CheckResult
where
    F: FnMut(&mut dyn ByteSource, &[u8], &mut [&mut [u8]]) -> Result<i32, ScanError>,
{
    for (i, case) in cases.iter().enumerate() {
        let mut region = vec![fill; region_len];
        let got = {
            let mut args = carve(&mut region, case.dests);
            let mut stream = ProgMemSource::new(ProgMem::new(case.input), case.input.len());
            fscanf(&mut stream, case.format.as_bytes(), &mut args)
        };
        verify_scan(i + 1, case, got, &region, fill)?;
    }
    Ok(CheckPass { cases: cases.len() })
}

fn verify_scan(
    index: usize,
    case: &ScanfCase,
    got: Result<i32, ScanError>,
    region: &[u8],
    fill: u8,
) -> Result<(), CaseFailure> {
    let n = got.map_err(|e| {
        CaseFailure::at(index, FailureKind::Error, case.expected.to_string(), e.to_string())
    })?;
    if n != case.expected {
        return Err(CaseFailure::at(
            index,
            FailureKind::ScanResult,
            case.expected.to_string(),
            format!("{n} (fill {fill})"),
        ));
    }
    if !case.check.matches(region, fill) {
        let shown = &region[..case.check.span().min(region.len())];
        return Err(CaseFailure::at(
            index,
            FailureKind::Region,
            case.check.describe(fill),
            hex_bytes(shown),
        ));
    }
    Ok(())
}

/// Split `region` into one destination per offset, in argument order.
/// Each destination runs up to the next higher offset (or the region end),
/// so writes past a destination's own bytes stay visible in the region.
fn carve<'r>(region: &'r mut [u8], offsets: &[usize]) -> Vec<&'r mut [u8]> {
    let mut order: Vec<usize> = (0..offsets.len()).collect();
    order.sort_by_key(|&i| offsets[i]);

    let mut slots: Vec<Option<&'r mut [u8]>> = offsets.iter().map(|_| None).collect();
    let mut rest = region;
    let mut base = 0usize;
    for (k, &i) in order.iter().enumerate() {
        let taken = std::mem::take(&mut rest);
        let skip = offsets[i].saturating_sub(base).min(taken.len());
        let (_, tail) = taken.split_at_mut(skip);
        let len = order
            .get(k + 1)
            .map_or(tail.len(), |&j| offsets[j] - offsets[i])
            .min(tail.len());
        let (slot, after) = tail.split_at_mut(len);
        slots[i] = Some(slot);
        rest = after;
        base = offsets[i] + len;
    }
    slots.into_iter().flatten().collect()
}

fn nul_terminated(text: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(text.len() + 1);
    bytes.extend_from_slice(text.as_bytes());
    bytes.push(0);
    bytes
}

fn hex_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}
