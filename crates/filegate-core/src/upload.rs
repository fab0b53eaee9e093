//! Upload validation and storage pipeline.
//!
//! The serving layer parses the request, spools the body to a temporary
//! file, and hands over a [`StagedUpload`]. Everything security-relevant
//! happens here: name legality, size limits, content-sniffed type checks,
//! and the final collision-safe placement into the target directory.

use std::fs;
use std::io;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;

use crate::Result;
use crate::SandboxError;
use crate::config::BATCH_UPLOAD_ALLOWED_TYPES;
use crate::config::SINGLE_UPLOAD_ALLOWED_TYPES;
use crate::config::UploadLimits;
use crate::naming::SequentialNamer;
use crate::ops::move_file::relocate;
use crate::types::FileName;
use crate::types::WorkDir;

/// How many leading bytes are read for content sniffing.
const SNIFF_LEN: usize = 16;

/// An inbound file spooled to disk, awaiting validation and placement.
#[derive(Debug, Clone)]
pub struct StagedUpload {
    name: String,
    path: PathBuf,
}

impl StagedUpload {
    /// Creates a staged upload from the client-declared name and the
    /// spool file location.
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Returns the client-declared file name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the spool file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Validates uploads against a size limit and a media-type allow-list,
/// then stores them with collision-safe naming.
///
/// The type check sniffs file content (magic bytes); the client-declared
/// name and type are never trusted on their own.
///
/// # Examples
///
/// ```no_run
/// use filegate_core::SequentialNamer;
/// use filegate_core::StagedUpload;
/// use filegate_core::UploadLimits;
/// use filegate_core::UploadValidator;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let limits = UploadLimits::default();
/// let validator = UploadValidator::single(&limits);
/// let namer = SequentialNamer::new();
///
/// let upload = StagedUpload::new("scan.pdf", "/tmp/upload-spool/abc123");
/// let final_path = validator.store(&namer, "/srv/files/data", &upload)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct UploadValidator {
    allowed_types: Vec<String>,
    max_file_size: u64,
}

impl UploadValidator {
    /// Creates a validator with an explicit allow-list and size limit.
    pub fn new(allowed_types: Vec<String>, max_file_size: u64) -> Self {
        Self {
            allowed_types,
            max_file_size,
        }
    }

    /// Validator for single-file uploads (JPEG, PNG, PDF).
    #[must_use]
    pub fn single(limits: &UploadLimits) -> Self {
        Self::new(
            SINGLE_UPLOAD_ALLOWED_TYPES
                .iter()
                .map(ToString::to_string)
                .collect(),
            limits.single_max_size,
        )
    }

    /// Validator for batch image uploads (JPEG, PNG).
    #[must_use]
    pub fn batch(limits: &UploadLimits) -> Self {
        Self::new(
            BATCH_UPLOAD_ALLOWED_TYPES
                .iter()
                .map(ToString::to_string)
                .collect(),
            limits.batch_max_size,
        )
    }

    /// Validates one staged upload: name legality, on-disk size, and
    /// content-sniffed media type.
    ///
    /// # Errors
    ///
    /// - [`SandboxError::InvalidName`] for an illegal declared name
    /// - [`SandboxError::UploadRejected`] for size or type violations
    /// - [`SandboxError::Io`] if the spool file cannot be read
    pub fn validate(&self, upload: &StagedUpload) -> Result<()> {
        FileName::validate(upload.name())?;

        let metadata = fs::metadata(upload.path()).map_err(|e| {
            SandboxError::Io(io::Error::new(
                e.kind(),
                format!("staged upload is not readable: {}", upload.path().display()),
            ))
        })?;
        if !metadata.is_file() {
            return Err(SandboxError::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("staged upload is not a regular file: {}", upload.path().display()),
            )));
        }

        if metadata.len() > self.max_file_size {
            let limit_mb = self.max_file_size / (1024 * 1024);
            return Err(SandboxError::UploadRejected {
                reason: format!("file exceeds the {limit_mb} MB limit"),
            });
        }

        let detected = sniff_file(upload.path())?.ok_or_else(|| SandboxError::UploadRejected {
            reason: "unrecognized file type".to_string(),
        })?;
        if !self.allowed_types.iter().any(|t| t == detected) {
            return Err(SandboxError::UploadRejected {
                reason: format!("file type not allowed: {detected}"),
            });
        }

        Ok(())
    }

    /// Validates batch-wide constraints: file count and combined size.
    ///
    /// Per-file rules still apply through [`validate`](Self::validate) on
    /// each element.
    ///
    /// # Errors
    ///
    /// Returns [`SandboxError::UploadRejected`] when the batch is empty,
    /// has too many files, or is too large in total.
    pub fn validate_batch(&self, uploads: &[StagedUpload], limits: &UploadLimits) -> Result<()> {
        if uploads.is_empty() {
            return Err(SandboxError::UploadRejected {
                reason: "no files uploaded".to_string(),
            });
        }

        if uploads.len() > limits.batch_max_files {
            return Err(SandboxError::UploadRejected {
                reason: format!("too many files, maximum is {}", limits.batch_max_files),
            });
        }

        let mut total: u64 = 0;
        for upload in uploads {
            let metadata = fs::metadata(upload.path())?;
            total = total.saturating_add(metadata.len());
        }
        if total > limits.batch_max_total_size {
            let limit_mb = limits.batch_max_total_size / (1024 * 1024);
            return Err(SandboxError::UploadRejected {
                reason: format!("total upload size exceeds {limit_mb} MB"),
            });
        }

        Ok(())
    }

    /// Validates the upload and moves it into `dest_dir` under a
    /// collision-free name.
    ///
    /// The spool file is consumed. Upload spools commonly live on a
    /// different filesystem than the data root, so the relocation uses
    /// the cross-device-safe move primitive.
    ///
    /// # Errors
    ///
    /// Propagates [`validate`](Self::validate) failures, plus
    /// [`SandboxError::Directory`] for a bad destination and
    /// [`SandboxError::Io`] for a failed relocation.
    pub fn store(
        &self,
        namer: &SequentialNamer,
        dest_dir: impl AsRef<Path>,
        upload: &StagedUpload,
    ) -> Result<PathBuf> {
        self.validate(upload)?;

        let dest = WorkDir::new(dest_dir.as_ref())?;
        let name = FileName::validate(upload.name())?;

        let target = namer.free_path(dest.as_path(), name.as_str())?;
        relocate(upload.path(), &target)?;

        Ok(target.canonicalize().unwrap_or(target))
    }
}

/// Detects a media type from leading magic bytes.
///
/// Recognizes the formats this pipeline can be configured to accept:
/// PNG, JPEG, GIF, and PDF. Returns `None` for anything else.
///
/// # Examples
///
/// ```
/// use filegate_core::sniff_media_type;
///
/// let png = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
/// assert_eq!(sniff_media_type(&png), Some("image/png"));
///
/// assert_eq!(sniff_media_type(b"plain text"), None);
/// ```
#[must_use]
pub fn sniff_media_type(content: &[u8]) -> Option<&'static str> {
    if content.len() >= 8 && content[0..8] == [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A] {
        return Some("image/png");
    }

    if content.len() >= 3 && content[0..3] == [0xFF, 0xD8, 0xFF] {
        return Some("image/jpeg");
    }

    if content.len() >= 4 && content[0..4] == [0x47, 0x49, 0x46, 0x38] {
        return Some("image/gif");
    }

    if content.len() >= 4 && content[0..4] == [0x25, 0x50, 0x44, 0x46] {
        return Some("application/pdf");
    }

    None
}

/// Reads the sniffing window from a file and detects its media type.
fn sniff_file(path: &Path) -> Result<Option<&'static str>> {
    let mut file = fs::File::open(path)?;
    let mut head = [0u8; SNIFF_LEN];
    let mut filled = 0;
    while filled < SNIFF_LEN {
        let n = file.read(&mut head[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    Ok(sniff_media_type(&head[..filled]))
}
