//! Line annotation flags understood by the stream writer
//!
//! These only control what the sink puts in front of a message (timestamp,
//! caller location, where its own prefix goes). They never change the
//! severity decoration added by the leveled logger.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use super::error::{ConfigError, ConfigResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FormatFlags(u32);

impl FormatFlags {
    /// Local date: 2009/01/23
    pub const DATE: FormatFlags = FormatFlags(1 << 0);
    /// Local time: 01:23:23
    pub const TIME: FormatFlags = FormatFlags(1 << 1);
    /// Microsecond resolution: 01:23:23.123123 (implies TIME)
    pub const MICROSECONDS: FormatFlags = FormatFlags(1 << 2);
    /// Full source path and line of the call site
    pub const LONG_FILE: FormatFlags = FormatFlags(1 << 3);
    /// Final path component and line of the call site (overrides LONG_FILE)
    pub const SHORT_FILE: FormatFlags = FormatFlags(1 << 4);
    /// Use UTC rather than the local time zone
    pub const UTC: FormatFlags = FormatFlags(1 << 5);
    /// Move the sink prefix from the start of the line to just before the message
    pub const MSG_PREFIX: FormatFlags = FormatFlags(1 << 6);
    /// Initial values for the standard logger
    pub const STANDARD: FormatFlags = FormatFlags(Self::DATE.0 | Self::TIME.0);

    /// Flag names as they appear in configuration
    const NAMED: [(&'static str, FormatFlags); 8] = [
        ("IncludeDate", Self::DATE),
        ("IncludeTime", Self::TIME),
        ("IncludeMicroseconds", Self::MICROSECONDS),
        ("IncludeLongFilePath", Self::LONG_FILE),
        ("IncludeShortFileName", Self::SHORT_FILE),
        ("UseUTC", Self::UTC),
        ("PrefixBeforeFlags", Self::MSG_PREFIX),
        ("StandardFlags", Self::STANDARD),
    ];

    pub const fn empty() -> Self {
        FormatFlags(0)
    }

    pub const fn from_bits(bits: u32) -> Self {
        FormatFlags(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True when every bit of `other` is set
    pub const fn contains(self, other: FormatFlags) -> bool {
        self.0 & other.0 == other.0
    }

    /// True when any bit of `other` is set
    pub const fn intersects(self, other: FormatFlags) -> bool {
        self.0 & other.0 != 0
    }

    /// Look up a single configuration name
    pub fn from_name(name: &str) -> ConfigResult<Self> {
        Self::NAMED
            .iter()
            .find(|(known, _)| *known == name)
            .map(|(_, flags)| *flags)
            .ok_or_else(|| ConfigError::UnknownFlag(name.to_string()))
    }

    /// Combine a list of configuration names
    pub fn from_names<I, S>(names: I) -> ConfigResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut flags = Self::empty();
        for name in names {
            flags |= Self::from_name(name.as_ref())?;
        }
        Ok(flags)
    }
}

impl BitOr for FormatFlags {
    type Output = FormatFlags;

    fn bitor(self, rhs: FormatFlags) -> FormatFlags {
        FormatFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for FormatFlags {
    fn bitor_assign(&mut self, rhs: FormatFlags) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for FormatFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // StandardFlags is a combination, so only the single-bit names are listed
        let names: Vec<&str> = Self::NAMED[..7]
            .iter()
            .filter(|(_, flag)| self.contains(*flag))
            .map(|(name, _)| *name)
            .collect();
        write!(f, "{}", names.join("|"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_is_date_and_time() {
        assert_eq!(FormatFlags::STANDARD, FormatFlags::DATE | FormatFlags::TIME);
        assert!(FormatFlags::STANDARD.contains(FormatFlags::TIME));
        assert!(!FormatFlags::STANDARD.contains(FormatFlags::UTC));
    }

    #[test]
    fn test_names_combine() {
        let flags = FormatFlags::from_names(["StandardFlags", "UseUTC", "IncludeShortFileName"]).unwrap();
        assert_eq!(
            flags,
            FormatFlags::DATE | FormatFlags::TIME | FormatFlags::UTC | FormatFlags::SHORT_FILE
        );
        assert_eq!(flags.to_string(), "IncludeDate|IncludeTime|IncludeShortFileName|UseUTC");
        assert_eq!(FormatFlags::from_names(Vec::<String>::new()).unwrap(), FormatFlags::empty());
    }

    #[test]
    fn test_unknown_name_fails() {
        let err = FormatFlags::from_names(["IncludeDate", "Lshortfile"]).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownFlag(ref n) if n == "Lshortfile"));
    }
}
