//! Core domain logic for Quill.
//!
//! This crate contains domain logic with ZERO web or database dependencies.
//!
//! # Modules
//!
//! - `storage` - Pluggable object storage selected from the `oss` setting
//! - `setting` - Site settings, visibility scopes and i18n defaults
//! - `file` - Uploaded file records on top of `storage`

pub mod file;
pub mod setting;
pub mod storage;
