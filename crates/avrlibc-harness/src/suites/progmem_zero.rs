//! A program-memory array declared without an initializer reads as zeros.

use avrlibc_core::pgmspace::ProgMem;

use crate::check::{CaseFailure, CheckPass, CheckResult, FailureKind};
use crate::exit_code::ExitPolicy;
use crate::routines::Routines;
use crate::suites::Suite;

pub(crate) const SUITE: Suite = Suite {
    name: "progmem-zero-array",
    symbol: "pgm_read_byte",
    description: "uninitialised 10-byte progmem array reads back as zeros",
    policy: ExitPolicy::Raw,
    run,
    export: None,
};

pub const LEN: usize = 10;

static ZEROS: [u8; LEN] = [0; LEN];

/// Code for a wrongly sized image; byte `i` fails with `i + 2`.
pub const SIZE_CODE: i32 = 1;

pub fn run(r: &dyn Routines) -> CheckResult {
    run_on(r, ProgMem::new(&ZEROS))
}

fn run_on(r: &dyn Routines, flash: ProgMem<'_>) -> CheckResult {
    if flash.len() != LEN {
        return Err(CaseFailure::new(
            SIZE_CODE,
            1,
            FailureKind::Mismatch,
            LEN.to_string(),
            flash.len().to_string(),
        ));
    }
    for addr in 0..LEN {
        let index = addr + 2;
        let code = SIZE_CODE + 1 + addr as i32;
        match r.pgm_read_byte(flash, addr) {
            Ok(0) => {}
            Ok(b) => {
                return Err(CaseFailure::new(
                    code,
                    index,
                    FailureKind::Mismatch,
                    "0x00",
                    format!("{b:#04x}"),
                ));
            }
            Err(e) => {
                return Err(CaseFailure::new(
                    code,
                    index,
                    FailureKind::Error,
                    "0x00",
                    e.to_string(),
                ));
            }
        }
    }
    Ok(CheckPass { cases: LEN + 1 })
}
