//! Float accessors over the whole EEPROM: write, read back, update.

use avrlibc_core::eeprom::{Eeprom, EepromError};

use crate::check::{CaseFailure, CheckPass, CheckResult, FailureKind};
use crate::exit_code::ExitPolicy;
use crate::routines::Routines;
use crate::suites::Suite;

pub(crate) const SUITE: Suite = Suite {
    name: "eeprom-float",
    symbol: "eeprom_write_float",
    description: "eeprom_{write,read,update}_float over every 4-byte cell",
    policy: ExitPolicy::Raw,
    run,
    export: None,
};

/// Failure code of the write/read pass.
pub const WRITE_CODE: i32 = 1;
/// Failure code of the update/read pass.
pub const UPDATE_CODE: i32 = 2;

const CELL: u16 = 4;

type Store = fn(&dyn Routines, &mut Eeprom, u16, f32) -> Result<(), EepromError>;

/// Store `value(n)` in every cell, then read every cell back. No cell is
/// read until the whole device has been written.
fn pass(
    r: &dyn Routines,
    ee: &mut Eeprom,
    code: i32,
    value: fn(u16) -> f32,
    store: Store,
) -> Result<usize, CaseFailure> {
    // at most 0x4000 cells for a 16-bit E2END
    let cells = (ee.len() / usize::from(CELL)) as u16;
    let fail = |n: u16, actual: String| {
        CaseFailure::new(
            code,
            usize::from(n) + 1,
            FailureKind::Mismatch,
            value(n).to_string(),
            actual,
        )
    };

    for n in 0..cells {
        store(r, ee, n * CELL, value(n)).map_err(|e| fail(n, e.to_string()))?;
    }
    for n in 0..cells {
        let got = r
            .eeprom_read_float(ee, n * CELL)
            .map_err(|e| fail(n, e.to_string()))?;
        if got.to_bits() != value(n).to_bits() {
            return Err(fail(n, got.to_string()));
        }
    }
    Ok(usize::from(cells))
}

pub fn run(r: &dyn Routines) -> CheckResult {
    let mut ee = Eeprom::default();
    let written = pass(r, &mut ee, WRITE_CODE, f32::from, |r, ee, a, v| {
        r.eeprom_write_float(ee, a, v)
    })?;
    let updated = pass(r, &mut ee, UPDATE_CODE, |n| -f32::from(n), |r, ee, a, v| {
        r.eeprom_update_float(ee, a, v)
    })?;
    Ok(CheckPass {
        cases: written + updated,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routines::Reference;
    use avrlibc_core::eeprom::ATMEGA128_E2END;

    /// `update` that skips cells already holding a value.
    struct UpdateOnlyErased;

    impl Routines for UpdateOnlyErased {
        fn eeprom_update_float(&self, ee: &mut Eeprom, addr: u16, value: f32) -> Result<(), EepromError> {
            if ee.read_dword(addr)? == u32::MAX {
                ee.update_float(addr, value)?;
            }
            Ok(())
        }
    }

    #[test]
    fn reference_passes() {
        let cells = (usize::from(ATMEGA128_E2END) + 1) / 4;
        assert_eq!(run(&Reference).map(|p| p.cases), Ok(2 * cells));
    }

    #[test]
    fn stale_update_reports_update_code() {
        let err = run(&UpdateOnlyErased).unwrap_err();
        // cell 0 holds 0.0 == -0.0 numerically, but not by bits
        assert_eq!((err.code, err.index), (UPDATE_CODE, 1));
    }

    /// Drops address bit 11: the upper half of the device aliases the lower.
    struct Aliased;

    const ADDR_MASK: u16 = 0x07ff;

    impl Routines for Aliased {
        fn eeprom_write_float(&self, ee: &mut Eeprom, addr: u16, value: f32) -> Result<(), EepromError> {
            ee.write_float(addr & ADDR_MASK, value)
        }

        fn eeprom_update_float(&self, ee: &mut Eeprom, addr: u16, value: f32) -> Result<(), EepromError> {
            ee.update_float(addr & ADDR_MASK, value)
        }

        fn eeprom_read_float(&self, ee: &Eeprom, addr: u16) -> Result<f32, EepromError> {
            ee.read_float(addr & ADDR_MASK)
        }
    }

    #[test]
    fn aliased_addresses_fail_write_pass() {
        let err = run(&Aliased).unwrap_err();
        // cell 0 was overwritten by cell 0x200
        assert_eq!((err.code, err.index), (WRITE_CODE, 1));
        assert_eq!(err.actual, "512");
    }
}
