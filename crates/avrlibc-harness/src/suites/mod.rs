//! Built-in suites, one per conformance program.
//!
//! Each module owns its fixture table as `'static` data and a `run` function
//! that drives one checker over it. [`all`] lists them in run order.

use std::fmt;

use crate::check::CheckResult;
use crate::exit_code::ExitPolicy;
use crate::fixtures::FixtureSet;
use crate::routines::Routines;

pub mod eeprom_float;
pub mod fplib_add_inf;
pub mod fplib_flt2long;
pub mod fplib_unord_inf;
pub mod math_sin;
pub mod printf_octal;
pub mod progmem_zero;
pub mod scanf_c;
pub mod scanf_d;
pub mod scanf_nul;
pub mod stdlib_itoa;
pub mod stdlib_malloc;

/// A named conformance program.
#[derive(Clone, Copy)]
pub struct Suite {
    pub name: &'static str,
    /// The routine under test, as the C library names it.
    pub symbol: &'static str,
    pub description: &'static str,
    /// How failure codes reach the process exit status on the host.
    pub policy: ExitPolicy,
    pub run: fn(&dyn Routines) -> CheckResult,
    /// Serializes the table as fixtures, for suites whose rows the
    /// fixture adapter can execute.
    pub export: Option<fn() -> FixtureSet>,
}

impl Suite {
    #[must_use]
    pub fn exportable(&self) -> bool {
        self.export.is_some()
    }
}

impl fmt::Debug for Suite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Suite")
            .field("name", &self.name)
            .field("symbol", &self.symbol)
            .field("policy", &self.policy)
            .field("exportable", &self.exportable())
            .finish()
    }
}

static SUITES: [Suite; 12] = [
    fplib_add_inf::SUITE,
    fplib_unord_inf::SUITE,
    fplib_flt2long::SUITE,
    math_sin::SUITE,
    printf_octal::SUITE,
    scanf_c::SUITE,
    scanf_d::SUITE,
    scanf_nul::SUITE,
    stdlib_itoa::SUITE,
    stdlib_malloc::SUITE,
    eeprom_float::SUITE,
    progmem_zero::SUITE,
];

#[must_use]
pub fn all() -> &'static [Suite] {
    &SUITES
}

#[must_use]
pub fn find(name: &str) -> Option<&'static Suite> {
    SUITES.iter().find(|s| s.name == name)
}
