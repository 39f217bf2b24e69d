//! Fixture table rows.

/// One row of a fixture table: the operands and the expected result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestCase<I, O> {
    pub input: I,
    pub expected: O,
}

/// Table row constructor usable in `static` initializers.
pub const fn case<I, O>(input: I, expected: O) -> TestCase<I, O> {
    TestCase { input, expected }
}
