//! Render fingerprint value object
//!
//! SHA-256 over the rendered artifacts, used by `status` to tell whether the
//! workspace still matches the stack config.

use std::fmt;

/// Fingerprint of a set of rendered artifacts, `sha256:<hex>`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub const PREFIX: &'static str = "sha256:";

    /// Hash named parts in order; names are included so moving content
    /// between files changes the fingerprint
    pub fn of_parts<'a>(parts: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        for (name, content) in parts {
            hasher.update(name.as_bytes());
            hasher.update([0u8]);
            hasher.update(content.as_bytes());
            hasher.update([0u8]);
        }
        Self(format!("{}{:x}", Self::PREFIX, hasher.finalize()))
    }

    /// Parse a stored fingerprint, tolerating surrounding whitespace
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let hex = s.strip_prefix(Self::PREFIX)?;
        if hex.len() == 64 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
            Some(Self(s.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First 12 hex characters, for display
    pub fn short(&self) -> &str {
        let hex = &self.0[Self::PREFIX.len()..];
        &hex[..12.min(hex.len())]
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_parts_same_fingerprint() {
        let a = Fingerprint::of_parts([("main.tf", "x"), ("variables.tf", "y")]);
        let b = Fingerprint::of_parts([("main.tf", "x"), ("variables.tf", "y")]);
        assert_eq!(a, b);
    }

    #[test]
    fn moving_content_between_files_changes_fingerprint() {
        let a = Fingerprint::of_parts([("main.tf", "xy"), ("variables.tf", "")]);
        let b = Fingerprint::of_parts([("main.tf", "x"), ("variables.tf", "y")]);
        assert_ne!(a, b);
    }

    #[test]
    fn parse_round_trips_display() {
        let fp = Fingerprint::of_parts([("main.tf", "x")]);
        assert_eq!(Fingerprint::parse(&format!("{}\n", fp)), Some(fp));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(Fingerprint::parse("sha256:nothex"), None);
        assert_eq!(Fingerprint::parse("md5:abc"), None);
    }
}
