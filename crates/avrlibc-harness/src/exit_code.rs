//! Folding a failure code into a process exit status.

use serde::{Deserialize, Serialize};

use crate::config::Target;

/// How a suite turns its failure code into an exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitPolicy {
    /// The code as is.
    Raw,
    /// Codes above 255 become 255.
    Saturate,
    /// Codes of 255 and above become `100 + code % 100`.
    FoldHundreds,
    /// A failing index of 0 becomes -1 so it cannot read as success.
    Index,
}

impl ExitPolicy {
    /// Policy in effect on `target`. The saturating folds exist only
    /// for host exit statuses.
    #[must_use]
    pub fn for_target(self, target: Target) -> Self {
        match (self, target) {
            (ExitPolicy::Saturate | ExitPolicy::FoldHundreds, Target::Avr) => ExitPolicy::Raw,
            (policy, _) => policy,
        }
    }

    /// Apply the policy to a failure code. Success (no failure) is not
    /// routed through here.
    #[must_use]
    pub fn fold(self, code: i32) -> i32 {
        match self {
            ExitPolicy::Raw => code,
            ExitPolicy::Saturate => code.min(255),
            ExitPolicy::FoldHundreds if code >= 255 => 100 + code % 100,
            ExitPolicy::FoldHundreds => code,
            ExitPolicy::Index if code == 0 => -1,
            ExitPolicy::Index => code,
        }
    }

    /// The status byte a host process reports for `code`.
    #[must_use]
    pub fn process_status(self, code: i32) -> u8 {
        status_byte(self.fold(code))
    }
}

/// Truncate a folded code to the 8-bit exit status. A non-zero code that
/// would wrap to 0 reports 255 instead, so only success exits 0.
#[must_use]
pub fn status_byte(folded: i32) -> u8 {
    match (folded & 0xff) as u8 {
        0 if folded != 0 => 255,
        byte => byte,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saturate_caps_at_255() {
        assert_eq!(ExitPolicy::Saturate.fold(7), 7);
        assert_eq!(ExitPolicy::Saturate.fold(255), 255);
        assert_eq!(ExitPolicy::Saturate.fold(1007), 255);
    }

    #[test]
    fn fold_hundreds_keeps_low_digits() {
        assert_eq!(ExitPolicy::FoldHundreds.fold(42), 42);
        assert_eq!(ExitPolicy::FoldHundreds.fold(254), 254);
        assert_eq!(ExitPolicy::FoldHundreds.fold(255), 155);
        assert_eq!(ExitPolicy::FoldHundreds.fold(2017), 117);
    }

    #[test]
    fn index_zero_reports_as_255() {
        assert_eq!(ExitPolicy::Index.fold(0), -1);
        assert_eq!(ExitPolicy::Index.process_status(0), 255);
        assert_eq!(ExitPolicy::Index.process_status(12), 12);
    }

    #[test]
    fn raw_truncates_only_at_the_process_boundary() {
        assert_eq!(ExitPolicy::Raw.fold(300), 300);
        assert_eq!(ExitPolicy::Raw.process_status(300), 44);
    }

    #[test]
    fn multiples_of_256_never_exit_zero() {
        for policy in [ExitPolicy::Raw, ExitPolicy::Index] {
            assert_eq!(policy.process_status(256), 255);
            assert_eq!(policy.process_status(512), 255);
            assert_eq!(policy.process_status(257), 1);
        }
        assert_eq!(status_byte(0), 0);
        assert_eq!(status_byte(-256), 255);
    }

    #[test]
    fn avr_target_skips_host_folding() {
        assert_eq!(ExitPolicy::Saturate.for_target(Target::Avr), ExitPolicy::Raw);
        assert_eq!(ExitPolicy::FoldHundreds.for_target(Target::Avr), ExitPolicy::Raw);
        assert_eq!(ExitPolicy::Index.for_target(Target::Avr), ExitPolicy::Index);
        assert_eq!(ExitPolicy::Saturate.for_target(Target::Host), ExitPolicy::Saturate);
    }
}
