//! Pluggable object storage for uploaded files, built on Apache OpenDAL.
//!
//! The active provider is chosen from the `oss` site setting on every call:
//!
//! ```text
//! caller ──► StorageFacade::put_file / delete_file
//!                 │
//!                 ├─► ConfigResolver::resolve   (reads + parses `oss` JSON)
//!                 ├─► ProviderRegistry::select  (lower-cased `type`, default `aliyun`)
//!                 └─► StorageClient             (aliyun | local)
//! ```

mod aliyun;
mod client;
mod config;
mod error;
mod facade;
mod local;
mod registry;
mod resolver;

pub use aliyun::{AliyunOssClient, AliyunOssOptions};
pub use client::{FileContent, StorageClient, key_from_url, normalize_key, public_url};
pub use config::StorageConfig;
pub use error::StorageError;
pub use facade::StorageFacade;
pub use local::LocalFsClient;
pub use registry::{ALIYUN, ClientFactory, LOCAL, ProviderRegistry};
pub use resolver::{ConfigResolver, OssSettingsSource};
