//! Local filesystem adapter (development only).

use async_trait::async_trait;
use opendal::{Operator, services};
use serde::Deserialize;
use tracing::info;

use super::client::{self, FileContent, StorageClient};
use super::config::StorageConfig;
use super::error::StorageError;

const PROVIDER: &str = "local";
const DEFAULT_BASE_URL: &str = "/uploads";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LocalFsOptions {
    root: String,
    #[serde(default)]
    base_url: Option<String>,
}

/// Storage client writing into a local directory.
pub struct LocalFsClient {
    operator: Operator,
    base_url: String,
}

impl LocalFsClient {
    /// Create a client from the resolved storage configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `root` is missing or the operator
    /// cannot be built.
    pub fn from_config(config: &StorageConfig) -> Result<Self, StorageError> {
        let options: LocalFsOptions = config.options(PROVIDER)?;
        if options.root.trim().is_empty() {
            return Err(StorageError::configuration("local storage root must not be empty"));
        }

        let operator = Operator::new(services::Fs::default().root(&options.root))
            .map_err(|e| StorageError::configuration(e.to_string()))?
            .finish();

        let base_url = options
            .base_url
            .as_deref()
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
            .to_string();

        Ok(Self { operator, base_url })
    }
}

#[async_trait]
impl StorageClient for LocalFsClient {
    fn provider(&self) -> &'static str {
        PROVIDER
    }

    async fn put_file(&self, path: &str, content: FileContent) -> Result<String, StorageError> {
        let key = client::normalize_key(path)?;
        let size = client::write_content(&self.operator, PROVIDER, &key, content).await?;
        info!(key = %key, size, "stored object on local filesystem");
        Ok(client::public_url(&self.base_url, &key))
    }

    /// Deleting a key that does not exist succeeds.
    async fn delete_file(&self, url: &str) -> Result<(), StorageError> {
        let key = client::key_from_url(url, &self.base_url, "")?;
        self.operator
            .delete(&key)
            .await
            .map_err(|e| StorageError::provider(PROVIDER, e))?;
        info!(key = %key, "deleted object from local filesystem");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use futures::stream;

    fn client_for(dir: &tempfile::TempDir, base_url: &str) -> LocalFsClient {
        let raw = serde_json::json!({
            "type": "local",
            "root": dir.path().to_str().expect("utf-8 path"),
            "baseUrl": base_url,
        })
        .to_string();
        let config = StorageConfig::parse(Some(&raw)).expect("valid config");
        LocalFsClient::from_config(&config).expect("client")
    }

    #[tokio::test]
    async fn test_put_and_delete_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let client = client_for(&dir, "http://localhost:8080/uploads/");

        let url = client
            .put_file("a/b.png", FileContent::from(vec![7u8; 100]))
            .await
            .expect("put");
        assert_eq!(url, "http://localhost:8080/uploads/a/b.png");

        let stored = dir.path().join("a").join("b.png");
        assert_eq!(std::fs::read(&stored).expect("stored file").len(), 100);

        client.delete_file(&url).await.expect("delete");
        assert!(!stored.exists());
    }

    #[tokio::test]
    async fn test_put_stream() {
        let dir = tempfile::tempdir().expect("tempdir");
        let client = client_for(&dir, "/files");

        let chunks = vec![
            Ok(Bytes::from_static(b"hello ")),
            Ok(Bytes::from_static(b"world")),
        ];
        let content = FileContent::Stream(Box::pin(stream::iter(chunks)));

        let url = client.put_file("/docs/hello.txt", content).await.expect("put");
        assert_eq!(url, "/files/docs/hello.txt");
        assert_eq!(
            std::fs::read_to_string(dir.path().join("docs/hello.txt")).expect("stored file"),
            "hello world"
        );
    }

    #[tokio::test]
    async fn test_stream_error_is_content_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let client = client_for(&dir, "/files");

        let chunks = vec![
            Ok(Bytes::from_static(b"partial")),
            Err(std::io::Error::other("connection reset")),
        ];
        let content = FileContent::Stream(Box::pin(stream::iter(chunks)));

        let err = client.put_file("broken.bin", content).await.unwrap_err();
        assert!(matches!(err, StorageError::Content(_)));
    }

    #[tokio::test]
    async fn test_delete_missing_object_is_idempotent() {
        let dir = tempfile::tempdir().expect("tempdir");
        let client = client_for(&dir, "/files");

        client
            .delete_file("/files/never/uploaded.png")
            .await
            .expect("delete of missing object succeeds");
    }

    #[tokio::test]
    async fn test_delete_cannot_leave_root() {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path().join("root");
        std::fs::create_dir(&root).expect("root dir");
        let outside = dir.path().join("victim.txt");
        std::fs::write(&outside, b"keep").expect("outside file");

        let raw = serde_json::json!({
            "type": "local",
            "root": root.to_str().expect("utf-8 path"),
            "baseUrl": "/uploads",
        })
        .to_string();
        let config = StorageConfig::parse(Some(&raw)).expect("valid config");
        let client = LocalFsClient::from_config(&config).expect("client");

        for url in ["/uploads/%2e%2e/victim.txt", "/uploads/../victim.txt"] {
            let err = client.delete_file(url).await.unwrap_err();
            assert!(matches!(err, StorageError::InvalidUrl(_)), "{url}: {err}");
        }
        assert!(outside.exists());
    }

    #[test]
    fn test_missing_root() {
        let config = StorageConfig::parse(Some(r#"{"type":"local"}"#)).expect("valid config");
        assert!(matches!(
            LocalFsClient::from_config(&config),
            Err(StorageError::Configuration(_))
        ));
    }
}
