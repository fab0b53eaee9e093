//! File name legality validation.

use crate::Result;
use crate::types::FileName;

/// Validates a candidate file name.
///
/// This function delegates to [`FileName::validate`], which applies the
/// legality rules in order (first failure wins):
/// - Non-empty
/// - At most 255 Unicode code points
/// - No `< > : " / \ | ? *` and no control characters
/// - Stem not a reserved device name (`CON`, `PRN`, `AUX`, `NUL`,
///   `COM1`–`COM9`, `LPT1`–`LPT9`)
/// - No trailing space or dot
///
/// Name legality and path containment are independent gates; this
/// function performs no I/O and never consults the filesystem.
///
/// # Errors
///
/// Returns [`crate::SandboxError::InvalidName`] with a human-readable
/// reason for the first violated rule.
///
/// # Examples
///
/// ```
/// use filegate_core::validate_file_name;
///
/// assert!(validate_file_name("hello.txt").is_ok());
/// assert!(validate_file_name("bad:name?.txt").is_err());
/// assert!(validate_file_name("name ").is_err());
/// ```
pub fn validate_file_name(name: &str) -> Result<FileName> {
    FileName::validate(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_file_name_valid() {
        assert!(validate_file_name("hello.txt").is_ok());
    }

    #[test]
    fn test_validate_file_name_reserved() {
        assert!(validate_file_name("CON").is_err());
    }

    #[test]
    fn test_validate_file_name_empty() {
        assert!(validate_file_name("").is_err());
    }
}
