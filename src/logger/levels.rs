//! Severity definitions for leveled logging
//!
//! Severities are ordered by verbosity (Off < Panic < Fatal < Error < Warn < Info < Debug).
//! A logger configured at severity T emits a call at severity S only when T >= S.

use std::fmt;
use std::str::FromStr;

use super::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Off = 0,   // Disables all leveled output
    Panic = 1, // Written, then the caller panics
    Fatal = 2, // Written, then the process exits
    Error = 3,
    Warn = 4,
    Info = 5,
    Debug = 6,
}

/// Names accepted in configuration, indexed by severity
const CONFIG_NAMES: [&str; 7] = ["Off", "Panic", "Fatal", "Error", "Warn", "Info", "Debug"];

/// Labels written in front of messages, indexed by severity
const LABELS: [&str; 7] = ["", "PANIC", "FATAL", "ERROR", "WARN", "INFO", "DEBUG"];

impl Severity {
    /// Every severity, from least to most verbose
    pub const ALL: [Severity; 7] = [
        Severity::Off,
        Severity::Panic,
        Severity::Fatal,
        Severity::Error,
        Severity::Warn,
        Severity::Info,
        Severity::Debug,
    ];

    /// Name used in configuration ("Off", "Warn", ...)
    pub fn config_name(self) -> &'static str {
        CONFIG_NAMES[self as usize]
    }

    /// Label written in front of a message ("WARN", "ERROR", ...)
    ///
    /// `Off` is never written, so it has no label.
    pub fn label(self) -> Option<&'static str> {
        match self {
            Severity::Off => None,
            other => Some(LABELS[other as usize]),
        }
    }

    /// Parse a written label back into its severity
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|severity| severity.label() == Some(label))
    }

    /// Check whether a logger at this threshold emits a call at `call` severity
    pub fn enables(self, call: Severity) -> bool {
        call != Severity::Off && self >= call
    }
}

impl FromStr for Severity {
    type Err = ConfigError;

    /// Parse a configuration name (case-sensitive)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|severity| severity.config_name() == s)
            .ok_or_else(|| ConfigError::UnknownLevel(s.to_string()))
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.config_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_config_name_parses_to_its_severity() {
        for severity in Severity::ALL {
            let parsed: Severity = severity.config_name().parse().unwrap();
            assert_eq!(parsed, severity);
        }
    }

    #[test]
    fn test_unknown_or_miscased_names_are_rejected() {
        for name in ["warn", "WARN", "Warning", "", "Trace", " Info"] {
            let err = name.parse::<Severity>().unwrap_err();
            assert!(matches!(err, ConfigError::UnknownLevel(ref n) if n == name));
        }
    }

    #[test]
    fn test_off_has_no_label() {
        assert_eq!(Severity::Off.label(), None);
        assert_eq!(Severity::Warn.label(), Some("WARN"));
        assert_eq!(Severity::from_label("DEBUG"), Some(Severity::Debug));
        assert_eq!(Severity::from_label(""), None);
    }

    #[test]
    fn test_gate_follows_numeric_order() {
        for threshold in Severity::ALL {
            for call in Severity::ALL {
                let expected = call != Severity::Off && (threshold as u8) >= (call as u8);
                assert_eq!(threshold.enables(call), expected, "{threshold} vs {call}");
            }
        }
        assert!(!Severity::Off.enables(Severity::Panic));
        assert!(Severity::Debug.enables(Severity::Panic));
    }
}
