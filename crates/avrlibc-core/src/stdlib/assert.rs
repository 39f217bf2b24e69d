//! The `__assert` diagnostic message.

use std::fmt;

/// The diagnostic emitted by `__assert` before `abort()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssertionFailure {
    pub func: Option<String>,
    pub file: String,
    pub line: u32,
    pub expr: String,
}

impl AssertionFailure {
    pub fn new(func: Option<&str>, file: &str, line: u32, expr: &str) -> Self {
        Self {
            func: func.map(str::to_owned),
            file: file.to_owned(),
            line,
            expr: expr.to_owned(),
        }
    }
}

impl fmt::Display for AssertionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.func {
            Some(func) => write!(
                f,
                "Assertion failed: ({}), function {}, file {}, line {}.",
                self.expr, func, self.file, self.line
            ),
            None => write!(
                f,
                "Assertion failed: ({}), file {}, line {}.",
                self.expr, self.file, self.line
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_with_function() {
        let f = AssertionFailure::new(Some("main"), "t.c", 12, "x == 1");
        assert_eq!(
            f.to_string(),
            "Assertion failed: (x == 1), function main, file t.c, line 12."
        );
    }

    #[test]
    fn message_without_function() {
        let f = AssertionFailure::new(None, "t.c", 3, "p");
        assert_eq!(f.to_string(), "Assertion failed: (p), file t.c, line 3.");
    }
}
