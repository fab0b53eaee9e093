//! Validated file name type.

use crate::Result;
use crate::SandboxError;
use std::fmt;
use std::path::Path;

/// Characters that may not appear anywhere in a file name.
const FORBIDDEN_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Maximum file name length, in Unicode code points.
const MAX_NAME_LEN: usize = 255;

/// A file name that passed every legality rule.
///
/// Name legality is independent of path containment: a `FileName` says
/// nothing about where the entry will live, only that the name itself is
/// portable across the filesystems this library targets.
///
/// The rules are applied in order, first failure wins:
///
/// 1. Must not be empty
/// 2. At most 255 Unicode code points
/// 3. None of `< > : " / \ | ? *` and no control characters
/// 4. Stem must not be a reserved device name (`CON`, `PRN`, `AUX`,
///    `NUL`, `COM1`–`COM9`, `LPT1`–`LPT9`, case-insensitive)
/// 5. Must not end with a space or a dot
///
/// Names are checked as provided; no Unicode normalization is applied.
///
/// # Examples
///
/// ```
/// use filegate_core::FileName;
///
/// let name = FileName::validate("hello.txt").unwrap();
/// assert_eq!(name.as_str(), "hello.txt");
///
/// assert!(FileName::validate("bad:name?.txt").is_err());
/// assert!(FileName::validate("CON").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileName(String);

impl FileName {
    /// Validates and constructs a `FileName`.
    ///
    /// # Errors
    ///
    /// Returns [`SandboxError::InvalidName`] carrying the first violated
    /// rule.
    pub fn validate(name: &str) -> Result<Self> {
        if name.is_empty() {
            return Err(invalid("the file name cannot be empty"));
        }

        if name.chars().count() > MAX_NAME_LEN {
            return Err(invalid(
                "the file name exceeds the maximum length of 255 characters",
            ));
        }

        if name
            .chars()
            .any(|c| FORBIDDEN_CHARS.contains(&c) || (c as u32) < 0x20)
        {
            return Err(invalid("the file name contains invalid characters"));
        }

        let stem = Path::new(name)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        if is_reserved_device_name(&stem) {
            return Err(SandboxError::InvalidName {
                reason: format!("the file name '{name}' is a reserved name on Windows"),
            });
        }

        if name.ends_with(' ') || name.ends_with('.') {
            return Err(invalid("the file name must not end with a space or dot"));
        }

        Ok(Self(name.to_string()))
    }

    /// Returns the name as a `&str`.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Converts into the inner `String`.
    #[inline]
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for FileName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn invalid(reason: &str) -> SandboxError {
    SandboxError::InvalidName {
        reason: reason.to_string(),
    }
}

/// Checks whether a name stem collides with a Windows device name.
fn is_reserved_device_name(stem: &str) -> bool {
    let upper = stem.to_uppercase();
    match upper.as_str() {
        "CON" | "PRN" | "AUX" | "NUL" => true,
        s if s.len() == 4 && (s.starts_with("COM") || s.starts_with("LPT")) => {
            matches!(s.as_bytes()[3], b'1'..=b'9')
        }
        _ => false,
    }
}
