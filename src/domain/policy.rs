//! Policy context domain type.
//!
//! The compliance rulebook injected into every prompt. Loaded once at
//! startup and never mutated afterwards.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Rulebook used when no policy file is available.
pub const DEFAULT_POLICY: &str = "
    Social Media Compliance Rulebook:
    1. Maintain professional tone
    2. No unverified claims
    3. No confidential information
    4. High-quality imagery only
    5. Include legal disclaimers
    ";

/// Where the policy text came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicySource {
    /// Read from a file on disk.
    File(PathBuf),
    /// Built-in fallback rulebook.
    Default,
}

impl std::fmt::Display for PolicySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PolicySource::File(path) => write!(f, "{}", path.display()),
            PolicySource::Default => write!(f, "built-in default"),
        }
    }
}

/// The compliance rulebook text.
#[derive(Debug, Clone)]
pub struct PolicyContext {
    text: String,
    source: PolicySource,
}

impl PolicyContext {
    pub fn new(text: impl Into<String>, source: PolicySource) -> Self {
        Self {
            text: text.into(),
            source,
        }
    }

    /// The built-in fallback rulebook.
    pub fn fallback() -> Self {
        Self::new(DEFAULT_POLICY, PolicySource::Default)
    }

    /// Load the policy from `path`.
    ///
    /// A missing file yields the built-in rulebook. Any other read failure
    /// (permissions, invalid UTF-8) is returned when `strict` is set and
    /// otherwise also falls back to the built-in rulebook.
    pub fn load(path: impl AsRef<Path>, strict: bool) -> std::io::Result<Self> {
        let path = path.as_ref();

        match std::fs::read_to_string(path) {
            Ok(text) => {
                tracing::info!(path = %path.display(), chars = text.chars().count(), "Policy document loaded");
                Ok(Self::new(text, PolicySource::File(path.to_path_buf())))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!(path = %path.display(), "Policy file not found, using default policy");
                Ok(Self::fallback())
            }
            Err(e) if strict => {
                tracing::error!(path = %path.display(), error = %e, "Failed to read policy file");
                Err(e)
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Policy file unreadable, using default policy"
                );
                Ok(Self::fallback())
            }
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn source(&self) -> &PolicySource {
        &self.source
    }

    /// Whether there is any policy text at all.
    pub fn is_loaded(&self) -> bool {
        !self.text.is_empty()
    }

    /// The first `max_chars` characters of the policy.
    pub fn excerpt(&self, max_chars: usize) -> &str {
        truncate_chars(&self.text, max_chars)
    }
}

/// Borrow at most `max_chars` characters from the start of `text`,
/// never splitting a UTF-8 sequence.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "1. No profanity").unwrap();

        let policy = PolicyContext::load(file.path(), false).unwrap();
        assert_eq!(policy.text(), "1. No profanity");
        assert_eq!(policy.source(), &PolicySource::File(file.path().to_path_buf()));
        assert!(policy.is_loaded());
    }

    #[test]
    fn test_missing_file_uses_default() {
        let dir = tempfile::tempdir().unwrap();
        let policy = PolicyContext::load(dir.path().join("policy.txt"), true).unwrap();

        assert_eq!(policy.source(), &PolicySource::Default);
        assert!(policy.text().contains("No unverified claims"));
        assert!(policy.is_loaded());
    }

    #[test]
    fn test_unreadable_file_lenient_and_strict() {
        // Reading a directory fails with something other than NotFound.
        let dir = tempfile::tempdir().unwrap();

        let lenient = PolicyContext::load(dir.path(), false).unwrap();
        assert_eq!(lenient.source(), &PolicySource::Default);

        assert!(PolicyContext::load(dir.path(), true).is_err());
    }

    #[test]
    fn test_invalid_utf8_is_unreadable() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0xff, 0xfe, 0x00, 0x80]).unwrap();

        assert!(PolicyContext::load(file.path(), true).is_err());
        assert_eq!(
            PolicyContext::load(file.path(), false).unwrap().source(),
            &PolicySource::Default
        );
    }

    #[test]
    fn test_empty_policy_is_not_loaded() {
        let policy = PolicyContext::new("", PolicySource::Default);
        assert!(!policy.is_loaded());
    }

    #[test]
    fn test_excerpt_truncates_by_characters() {
        let policy = PolicyContext::new("é".repeat(2000), PolicySource::Default);

        let excerpt = policy.excerpt(1500);
        assert_eq!(excerpt.chars().count(), 1500);
        assert_eq!(excerpt.len(), 3000);
    }

    #[test]
    fn test_excerpt_short_policy_unchanged() {
        let policy = PolicyContext::new("short", PolicySource::Default);
        assert_eq!(policy.excerpt(1500), "short");
        assert_eq!(truncate_chars("abc", 3), "abc");
        assert_eq!(truncate_chars("abc", 0), "");
    }
}
