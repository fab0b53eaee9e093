//! Sandboxed filesystem mutation library with collision-safe operations.
//!
//! `filegate-core` exposes list, upload, rename, and delete/trash
//! primitives to untrusted callers while guaranteeing that every path
//! derived from caller input stays inside a designated sandbox root, that
//! concurrent requests never silently overwrite existing files, and that
//! moves stay atomic and recoverable across storage-device boundaries.
//!
//! # Examples
//!
//! ```no_run
//! use filegate_core::SandboxRoot;
//! use filegate_core::SequentialNamer;
//! use filegate_core::resolve_safe_path;
//! use filegate_core::move_file;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let root = SandboxRoot::new("/srv/files/data")?;
//! let namer = SequentialNamer::new();
//!
//! // Caller-supplied paths are contained to the root
//! let source = resolve_safe_path(&root, "incoming/report.pdf")?;
//!
//! // Moves disambiguate on collision and survive device boundaries
//! let stored = move_file(source.as_path(), root.as_path(), &namer)?;
//! println!("stored as {}", stored.display());
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod listing;
pub mod naming;
pub mod ops;
pub mod resolve;
pub mod test_utils;
pub mod types;
pub mod upload;

// Re-export main API types
pub use config::UploadLimits;
pub use error::Result;
pub use error::SandboxError;
pub use listing::DirectoryItem;
pub use listing::scan_directory;
pub use naming::SequentialNamer;
pub use naming::validate_file_name;
pub use ops::delete_file;
pub use ops::move_file;
pub use ops::move_to_trash;
pub use ops::rename_file;
pub use resolve::resolve_safe_path;
pub use upload::StagedUpload;
pub use upload::UploadValidator;
pub use upload::sniff_media_type;

// Re-export types module for easier access
pub use types::EntryKind;
pub use types::FileName;
pub use types::ResolvedPath;
pub use types::SandboxRoot;
pub use types::WorkDir;
