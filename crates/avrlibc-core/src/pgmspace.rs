//! Program-memory (flash) images.
//!
//! On the AVR, constant tables live in flash and are read through the
//! `pgm_read_*` accessors instead of ordinary loads. [`ProgMem`] models one
//! such read-only image; multi-byte reads are little-endian like the target.

use std::cmp::Ordering;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("program memory read of {width} byte(s) at {addr:#06x} past end of image ({len} bytes)")]
pub struct ProgMemFault {
    pub addr: usize,
    pub width: usize,
    pub len: usize,
}

/// A read-only program-memory image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgMem<'a> {
    image: &'a [u8],
}

impl<'a> ProgMem<'a> {
    #[must_use]
    pub const fn new(image: &'a [u8]) -> Self {
        Self { image }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.image.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.image.is_empty()
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &'a [u8] {
        self.image
    }

    /// Bytes up to (not including) the first NUL, as `strlen_P` sees them.
    pub fn c_str(&self) -> &'a [u8] {
        until_nul(self.image)
    }

    pub fn read_byte(&self, addr: usize) -> Result<u8, ProgMemFault> {
        self.window::<1>(addr).map(|b| b[0])
    }

    pub fn read_word(&self, addr: usize) -> Result<u16, ProgMemFault> {
        self.window::<2>(addr).map(u16::from_le_bytes)
    }

    pub fn read_dword(&self, addr: usize) -> Result<u32, ProgMemFault> {
        self.window::<4>(addr).map(u32::from_le_bytes)
    }

    pub fn read_float(&self, addr: usize) -> Result<f32, ProgMemFault> {
        self.read_dword(addr).map(f32::from_bits)
    }

    fn window<const N: usize>(&self, addr: usize) -> Result<[u8; N], ProgMemFault> {
        let fault = ProgMemFault {
            addr,
            width: N,
            len: self.image.len(),
        };
        let end = addr.checked_add(N).ok_or(fault)?;
        let bytes = self.image.get(addr..end).ok_or(fault)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }
}

/// Pack 32-bit words into a little-endian flash image.
#[must_use]
pub fn pack_dwords(words: &[u32]) -> Vec<u8> {
    words.iter().flat_map(|w| w.to_le_bytes()).collect()
}

/// `strcmp_P`: compare a RAM string with a flash string, both NUL-terminated
/// (or ending at the slice end).
#[must_use]
pub fn strcmp_p(ram: &[u8], flash: ProgMem<'_>) -> Ordering {
    let a = until_nul(ram);
    let b = until_nul(flash.as_bytes());
    a.cmp(b)
}

/// `memcmp_P`: compare the first `n` bytes. Missing bytes compare as smaller.
#[must_use]
pub fn memcmp_p(ram: &[u8], flash: ProgMem<'_>, n: usize) -> Ordering {
    let a = &ram[..ram.len().min(n)];
    let b = flash.as_bytes();
    let b = &b[..b.len().min(n)];
    a.cmp(b)
}

pub(crate) fn until_nul(s: &[u8]) -> &[u8] {
    s.iter().position(|&c| c == 0).map_or(s, |p| &s[..p])
}

#[cfg(test)]
mod tests {
    use super::*;

    static TABLE: [u8; 8] = [0x00, 0x00, 0x80, 0x7f, 0x01, 0x00, 0x00, 0x00];

    #[test]
    fn reads_are_little_endian() {
        let flash = ProgMem::new(&TABLE);
        assert_eq!(flash.read_dword(0), Ok(0x7f80_0000));
        assert_eq!(flash.read_word(4), Ok(1));
        assert_eq!(flash.read_float(0), Ok(f32::INFINITY));
    }

    #[test]
    fn reads_past_the_end_fault() {
        let flash = ProgMem::new(&TABLE);
        let err = flash.read_dword(6).unwrap_err();
        assert_eq!(err.width, 4);
        assert_eq!(err.len, 8);
        assert!(flash.read_byte(usize::MAX).is_err());
    }

    #[test]
    fn packed_words_read_back() {
        let image = pack_dwords(&[0xbe46_3583, 0xbe44_f940]);
        let flash = ProgMem::new(&image);
        assert_eq!(flash.read_dword(4), Ok(0xbe44_f940));
    }

    #[test]
    fn string_comparisons_stop_at_nul() {
        assert_eq!(strcmp_p(b"-12345\0junk", ProgMem::new(b"-12345\0")), Ordering::Equal);
        assert_eq!(strcmp_p(b"z", ProgMem::new(b"100011")), Ordering::Greater);
        assert_eq!(memcmp_p(b"A\0BC", ProgMem::new(b"A\0BD"), 3), Ordering::Equal);
        assert_eq!(memcmp_p(b"A\0BC", ProgMem::new(b"A\0BD"), 4), Ordering::Less);
    }
}
