//! File mutation primitives: move, rename, delete, trash.

pub mod delete;
pub mod move_file;
pub mod rename;
pub mod trash;

// Re-export public functions
pub use delete::delete_file;
pub use move_file::move_file;
pub use rename::rename_file;
pub use trash::move_to_trash;
