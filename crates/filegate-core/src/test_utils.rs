//! Test utilities for filesystem fixtures.
//!
//! This module provides reusable helpers for laying out files and for
//! producing recognizable media payloads, reducing duplication across
//! tests.
//!
//! # Panics
//!
//! All functions in this module may panic on I/O errors since they are
//! designed for test use only where panics are acceptable.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::fs;
use std::path::Path;
use std::path::PathBuf;

/// Writes `contents` to `dir/name` and returns the full path.
///
/// # Examples
///
/// ```no_run
/// use filegate_core::test_utils::write_file;
/// use std::path::Path;
///
/// let path = write_file(Path::new("/tmp/fixture"), "file.txt", b"hello");
/// ```
#[must_use]
pub fn write_file(dir: &Path, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

/// Returns a payload that sniffs as `image/png`.
#[must_use]
pub fn png_bytes() -> Vec<u8> {
    let mut data = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
    data.extend_from_slice(b"IHDR fixture payload");
    data
}

/// Returns a payload that sniffs as `image/jpeg`.
#[must_use]
pub fn jpeg_bytes() -> Vec<u8> {
    let mut data = vec![0xFF, 0xD8, 0xFF, 0xE0];
    data.extend_from_slice(b"JFIF fixture payload");
    data
}

/// Returns a payload that sniffs as `application/pdf`.
#[must_use]
pub fn pdf_bytes() -> Vec<u8> {
    b"%PDF-1.4\nfixture payload\n%%EOF\n".to_vec()
}
