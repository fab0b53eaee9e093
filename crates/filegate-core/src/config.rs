//! Upload policy configuration.

/// Media types accepted for single-file uploads.
pub const SINGLE_UPLOAD_ALLOWED_TYPES: &[&str] = &["image/jpeg", "image/png", "application/pdf"];

/// Media types accepted for batch image uploads.
pub const BATCH_UPLOAD_ALLOWED_TYPES: &[&str] = &["image/jpeg", "image/png"];

/// Size and count limits applied to uploads.
///
/// Constructed once at process start by the host and passed down; the
/// library holds no global configuration state.
///
/// # Examples
///
/// ```
/// use filegate_core::UploadLimits;
///
/// // Use the defaults
/// let limits = UploadLimits::default();
/// assert_eq!(limits.batch_max_files, 10);
///
/// // Customize for specific needs
/// let strict = UploadLimits {
///     single_max_size: 5 * 1024 * 1024, // 5 MB
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct UploadLimits {
    /// Maximum size for a single-file upload, in bytes.
    pub single_max_size: u64,

    /// Maximum size for each file of a batch upload, in bytes.
    pub batch_max_size: u64,

    /// Maximum number of files in one batch upload.
    pub batch_max_files: usize,

    /// Maximum combined size of a batch upload, in bytes.
    pub batch_max_total_size: u64,
}

impl Default for UploadLimits {
    /// Creates `UploadLimits` with the stock settings.
    ///
    /// Default values:
    /// - `single_max_size`: 100 MB
    /// - `batch_max_size`: 10 MB per file
    /// - `batch_max_files`: 10 files
    /// - `batch_max_total_size`: 30 MB total
    fn default() -> Self {
        Self {
            single_max_size: 100 * 1024 * 1024,
            batch_max_size: 10 * 1024 * 1024,
            batch_max_files: 10,
            batch_max_total_size: 30 * 1024 * 1024,
        }
    }
}
