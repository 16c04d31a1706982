//! Uploaded file management.
//!
//! Files are pushed through the [`crate::storage::StorageFacade`] and a record
//! of each upload is kept so the admin console can list and delete them.

mod error;
mod service;
mod types;

pub use error::FileError;
pub use service::{FileRepository, FileService};
pub use types::{CreateFileInput, FileFilter, FileRecord, UploadFileInput};
