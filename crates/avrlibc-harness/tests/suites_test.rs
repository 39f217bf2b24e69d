// Integration tests for the built-in suites: every suite passes against the
// reference routines, and a single mutated routine fails exactly the suites
// that exercise it, at the first affected row.

use avrlibc_harness::exit_code::ExitPolicy;
use avrlibc_harness::suites::{self, math_sin};
use avrlibc_harness::{FailureKind, HarnessConfig, Reference, Routines, SuiteRunner, Target};

struct SinOffBy(u32);

impl Routines for SinOffBy {
    fn sin(&self, x: f32) -> f32 {
        f32::from_bits(avrlibc_core::math::sin(x).to_bits() + self.0)
    }
}

struct ItoaUppercase;

impl Routines for ItoaUppercase {
    fn itoa(&self, value: i16, radix: i32) -> String {
        avrlibc_core::stdlib::itoa(value, radix).to_uppercase()
    }
}

#[test]
fn run_all_passes_with_reference() {
    let mut runner = SuiteRunner::new(&Reference, HarnessConfig::default());
    let outcomes = runner.run_all(suites::all()).unwrap();
    assert_eq!(outcomes.len(), suites::all().len());
    for outcome in &outcomes {
        assert!(outcome.passed(), "{} failed: {:?}", outcome.suite, outcome.result);
        assert_eq!(outcome.process_status(), 0);
    }
}

#[test]
fn sin_within_tolerance_still_passes() {
    let outcome = SuiteRunner::new(&SinOffBy(math_sin::MAX_ULP), HarnessConfig::default())
        .run(suites::find("math-sin-500").unwrap())
        .unwrap();
    assert!(outcome.passed());
}

#[test]
fn sin_past_tolerance_fails_first_row() {
    let mut runner = SuiteRunner::new(&SinOffBy(math_sin::MAX_ULP + 1), HarnessConfig::default());
    let outcome = runner.run(suites::find("math-sin-500").unwrap()).unwrap();
    let failure = outcome.result.clone().unwrap_err();
    assert_eq!(failure.kind, FailureKind::Tolerance);
    assert_eq!(outcome.exit_code, 1);
}

#[test]
fn mutation_only_breaks_suites_that_use_it() {
    let mut runner = SuiteRunner::new(&ItoaUppercase, HarnessConfig::default());
    let outcomes = runner.run_all(suites::all()).unwrap();
    let last = outcomes.last().unwrap();
    assert_eq!(last.suite, "stdlib-itoa");
    // "z" in radix 36 is the first row with a letter
    assert_eq!(last.exit_code, 3);
    assert!(outcomes[..outcomes.len() - 1].iter().all(|o| o.passed()));
}

#[test]
fn avr_target_passes_codes_through() {
    let suite = suites::find("stdlib-itoa").unwrap();
    assert_eq!(suite.policy, ExitPolicy::FoldHundreds);
    assert_eq!(suite.policy.for_target(Target::Avr), ExitPolicy::Raw);
    assert_eq!(suite.policy.for_target(Target::Host).fold(2012), 112);
}
