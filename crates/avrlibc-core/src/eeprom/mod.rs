//! EEPROM emulator with the `<avr/eeprom.h>` access functions.
//!
//! Cells start erased (`0xFF`). `update_*` only programs cells whose content
//! differs, which is observable through [`Eeprom::write_cycles`].

use thiserror::Error;

/// `E2END` of the ATmega128, the device the simulator tests run on.
pub const ATMEGA128_E2END: u16 = 0x0FFF;

const ERASED: u8 = 0xFF;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EepromError {
    #[error("eeprom access of {len} byte(s) at {addr:#06x} exceeds E2END {e2end:#06x}")]
    OutOfRange { addr: u16, len: usize, e2end: u16 },
}

/// Emulated on-chip EEPROM of `E2END + 1` bytes.
#[derive(Debug, Clone)]
pub struct Eeprom {
    cells: Vec<u8>,
    e2end: u16,
    write_cycles: u64,
}

impl Eeprom {
    /// Erased EEPROM with the given last address.
    #[must_use]
    pub fn new(e2end: u16) -> Self {
        Self {
            cells: vec![ERASED; usize::from(e2end) + 1],
            e2end,
            write_cycles: 0,
        }
    }

    #[must_use]
    pub fn e2end(&self) -> u16 {
        self.e2end
    }

    /// Size in bytes (`E2END + 1`).
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of cells physically programmed so far.
    #[must_use]
    pub fn write_cycles(&self) -> u64 {
        self.write_cycles
    }

    /// Writes complete synchronously, so the device is always ready.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        true
    }

    pub fn read_block(&self, dst: &mut [u8], addr: u16) -> Result<(), EepromError> {
        let range = self.range(addr, dst.len())?;
        dst.copy_from_slice(&self.cells[range]);
        Ok(())
    }

    pub fn write_block(&mut self, src: &[u8], addr: u16) -> Result<(), EepromError> {
        let range = self.range(addr, src.len())?;
        self.cells[range].copy_from_slice(src);
        self.write_cycles += src.len() as u64;
        Ok(())
    }

    pub fn update_block(&mut self, src: &[u8], addr: u16) -> Result<(), EepromError> {
        let range = self.range(addr, src.len())?;
        for (cell, &byte) in self.cells[range].iter_mut().zip(src) {
            if *cell != byte {
                *cell = byte;
                self.write_cycles += 1;
            }
        }
        Ok(())
    }

    pub fn read_byte(&self, addr: u16) -> Result<u8, EepromError> {
        let mut b = [0u8; 1];
        self.read_block(&mut b, addr)?;
        Ok(b[0])
    }

    pub fn read_word(&self, addr: u16) -> Result<u16, EepromError> {
        let mut b = [0u8; 2];
        self.read_block(&mut b, addr)?;
        Ok(u16::from_le_bytes(b))
    }

    pub fn read_dword(&self, addr: u16) -> Result<u32, EepromError> {
        let mut b = [0u8; 4];
        self.read_block(&mut b, addr)?;
        Ok(u32::from_le_bytes(b))
    }

    pub fn read_float(&self, addr: u16) -> Result<f32, EepromError> {
        self.read_dword(addr).map(f32::from_bits)
    }

    pub fn write_byte(&mut self, addr: u16, value: u8) -> Result<(), EepromError> {
        self.write_block(&[value], addr)
    }

    pub fn write_word(&mut self, addr: u16, value: u16) -> Result<(), EepromError> {
        self.write_block(&value.to_le_bytes(), addr)
    }

    pub fn write_dword(&mut self, addr: u16, value: u32) -> Result<(), EepromError> {
        self.write_block(&value.to_le_bytes(), addr)
    }

    pub fn write_float(&mut self, addr: u16, value: f32) -> Result<(), EepromError> {
        self.write_dword(addr, value.to_bits())
    }

    pub fn update_byte(&mut self, addr: u16, value: u8) -> Result<(), EepromError> {
        self.update_block(&[value], addr)
    }

    pub fn update_word(&mut self, addr: u16, value: u16) -> Result<(), EepromError> {
        self.update_block(&value.to_le_bytes(), addr)
    }

    pub fn update_dword(&mut self, addr: u16, value: u32) -> Result<(), EepromError> {
        self.update_block(&value.to_le_bytes(), addr)
    }

    pub fn update_float(&mut self, addr: u16, value: f32) -> Result<(), EepromError> {
        self.update_dword(addr, value.to_bits())
    }

    fn range(&self, addr: u16, len: usize) -> Result<std::ops::Range<usize>, EepromError> {
        let start = usize::from(addr);
        match start.checked_add(len) {
            Some(end) if end <= self.cells.len() => Ok(start..end),
            _ => Err(EepromError::OutOfRange {
                addr,
                len,
                e2end: self.e2end,
            }),
        }
    }
}

impl Default for Eeprom {
    fn default() -> Self {
        Self::new(ATMEGA128_E2END)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_device_reads_erased() {
        let e = Eeprom::new(0x1F);
        assert_eq!(e.len(), 32);
        assert_eq!(e.read_byte(0x1F), Ok(0xFF));
        assert_eq!(e.read_dword(0), Ok(0xFFFF_FFFF));
        assert!(e.read_float(0).unwrap().is_nan());
    }

    #[test]
    fn multibyte_values_are_little_endian() {
        let mut e = Eeprom::new(0x1F);
        e.write_word(2, 0x1234).unwrap();
        assert_eq!(e.read_byte(2), Ok(0x34));
        assert_eq!(e.read_byte(3), Ok(0x12));
        e.write_float(4, -2.0).unwrap();
        assert_eq!(e.read_dword(4), Ok(0xc000_0000));
    }

    #[test]
    fn update_skips_identical_cells() {
        let mut e = Eeprom::new(0x1F);
        e.write_dword(0, 0x0000_00AA).unwrap();
        assert_eq!(e.write_cycles(), 4);
        e.update_dword(0, 0x0000_00AB).unwrap();
        assert_eq!(e.write_cycles(), 5);
        e.update_float(0, f32::from_bits(0x0000_00AB)).unwrap();
        assert_eq!(e.write_cycles(), 5);
    }

    #[test]
    fn last_cell_is_addressable_but_not_beyond() {
        let mut e = Eeprom::new(0x1F);
        assert!(e.write_byte(0x1F, 1).is_ok());
        assert_eq!(
            e.write_word(0x1F, 1),
            Err(EepromError::OutOfRange {
                addr: 0x1F,
                len: 2,
                e2end: 0x1F
            })
        );
        assert!(e.read_float(0x1D).is_err());
    }
}
