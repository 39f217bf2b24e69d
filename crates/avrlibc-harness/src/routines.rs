//! The implementation under test.
//!
//! Suites call library routines through [`Routines`] so that a mutated
//! implementation can be substituted. Every method defaults to the
//! reference routine in `avrlibc-core`; an implementation overrides only
//! what it changes.

use avrlibc_core::eeprom::{Eeprom, EepromError};
use avrlibc_core::pgmspace::{ProgMem, ProgMemFault};
use avrlibc_core::stdio::{self, Arg, ByteSource, Format, PrintfError, ScanError};
use avrlibc_core::stdlib::{self, Heap, HeapError};
use avrlibc_core::{fplib, math};

pub trait Routines {
    // fplib

    fn addsf3(&self, x: f32, y: f32) -> f32 {
        fplib::addsf3(x, y)
    }

    fn unordsf2(&self, x: f32, y: f32) -> i32 {
        fplib::unordsf2(x, y)
    }

    fn fixsfsi(&self, x: f32) -> i32 {
        fplib::fixsfsi(x)
    }

    // math

    fn sin(&self, x: f32) -> f32 {
        math::sin(x)
    }

    // stdio

    fn sprintf_p(
        &self,
        buf: &mut [u8],
        fmt: ProgMem<'_>,
        args: &[Arg<'_>],
    ) -> Result<usize, PrintfError> {
        stdio::sprintf_p(buf, fmt, args)
    }

    /// `vfscanf`; the `sscanf`, `sscanf_P` and `fscanf` front ends below
    /// all funnel into it.
    fn vfscanf(
        &self,
        src: &mut dyn ByteSource,
        fmt: Format<'_>,
        args: &mut [&mut [u8]],
    ) -> Result<i32, ScanError> {
        stdio::vfscanf(src, fmt, args)
    }

    fn sscanf(&self, input: &[u8], fmt: &[u8], args: &mut [&mut [u8]]) -> Result<i32, ScanError> {
        self.vfscanf(&mut stdio::CStrSource::new(input), Format::Ram(fmt), args)
    }

    fn sscanf_p(
        &self,
        input: &[u8],
        fmt: ProgMem<'_>,
        args: &mut [&mut [u8]],
    ) -> Result<i32, ScanError> {
        self.vfscanf(&mut stdio::CStrSource::new(input), Format::Flash(fmt), args)
    }

    fn fscanf(
        &self,
        stream: &mut dyn ByteSource,
        fmt: &[u8],
        args: &mut [&mut [u8]],
    ) -> Result<i32, ScanError> {
        self.vfscanf(stream, Format::Ram(fmt), args)
    }

    // stdlib

    fn itoa(&self, value: i16, radix: i32) -> String {
        stdlib::itoa(value, radix)
    }

    fn strtol(&self, s: &[u8], base: i32) -> (i32, usize) {
        stdlib::strtol(s, base)
    }

    fn heap(&self, start: u16, end: u16) -> Result<Heap, HeapError> {
        Heap::new(start, end)
    }

    fn malloc(&self, heap: &mut Heap, len: usize) -> Option<u16> {
        heap.malloc(len)
    }

    // eeprom

    fn eeprom_write_float(&self, ee: &mut Eeprom, addr: u16, value: f32) -> Result<(), EepromError> {
        ee.write_float(addr, value)
    }

    fn eeprom_update_float(&self, ee: &mut Eeprom, addr: u16, value: f32) -> Result<(), EepromError> {
        ee.update_float(addr, value)
    }

    fn eeprom_read_float(&self, ee: &Eeprom, addr: u16) -> Result<f32, EepromError> {
        ee.read_float(addr)
    }

    // pgmspace

    fn pgm_read_byte(&self, flash: ProgMem<'_>, addr: usize) -> Result<u8, ProgMemFault> {
        flash.read_byte(addr)
    }
}

/// The reference implementation, unmodified.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reference;

impl Routines for Reference {}

#[cfg(test)]
mod tests {
    use super::*;

    struct OffByOneUlp;

    impl Routines for OffByOneUlp {
        fn sin(&self, x: f32) -> f32 {
            f32::from_bits(math::sin(x).to_bits() + 1)
        }
    }

    #[test]
    fn overrides_touch_only_their_method() {
        let m = OffByOneUlp;
        assert_eq!(m.sin(0.5).to_bits(), Reference.sin(0.5).to_bits() + 1);
        assert_eq!(m.itoa(-1, 16), "ffff");
    }

    #[test]
    fn scanf_front_ends_share_vfscanf() {
        struct NoConversions;
        impl Routines for NoConversions {
            fn vfscanf(
                &self,
                _src: &mut dyn ByteSource,
                _fmt: Format<'_>,
                _args: &mut [&mut [u8]],
            ) -> Result<i32, ScanError> {
                Ok(0)
            }
        }
        let mut c = [0u8; 1];
        assert_eq!(NoConversions.sscanf(b"x", b"%c", &mut [&mut c]), Ok(0));
        assert_eq!(Reference.sscanf(b"x", b"%c", &mut [&mut c]), Ok(1));
        assert_eq!(c[0], b'x');
    }
}
