//! `malloc()` with `__malloc_heap_start`/`__malloc_heap_end` restricted to
//! an ATmega128 window.

use crate::check::{CaseFailure, CheckPass, CheckResult, FailureKind};
use crate::exit_code::ExitPolicy;
use crate::routines::Routines;
use crate::suites::Suite;

pub(crate) const SUITE: Suite = Suite {
    name: "stdlib-malloc-bounds",
    symbol: "malloc",
    description: "malloc() never allocates past __malloc_heap_end",
    policy: ExitPolicy::Raw,
    run,
    export: None,
};

pub const HEAP_START: u16 = 0x200;
pub const HEAP_END: u16 = 0x1000;
/// One header too large for the window.
pub const ALLOC_FAILS: usize = 0xe00;
/// Exactly fills the window.
pub const ALLOC_WORKS: usize = 0xdfe;

fn ptr(p: Option<u16>) -> String {
    p.map_or_else(|| "NULL".to_string(), |a| format!("{a:#06x}"))
}

pub fn run(r: &dyn Routines) -> CheckResult {
    let mut heap = r
        .heap(HEAP_START, HEAP_END)
        .map_err(|e| CaseFailure::at(1, FailureKind::Error, "heap", e.to_string()))?;

    let p = r.malloc(&mut heap, ALLOC_FAILS);
    if p.is_some() {
        return Err(CaseFailure::at(2, FailureKind::Mismatch, "NULL", ptr(p)));
    }

    let p = r.malloc(&mut heap, ALLOC_WORKS);
    if p.is_none() {
        return Err(CaseFailure::at(3, FailureKind::Mismatch, "non-NULL", ptr(p)));
    }
    let want = Some(HEAP_START + avrlibc_core::stdlib::malloc::HEADER);
    if p != want {
        return Err(CaseFailure::at(4, FailureKind::Mismatch, ptr(want), ptr(p)));
    }

    Ok(CheckPass { cases: 4 })
}
