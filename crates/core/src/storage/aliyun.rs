//! Aliyun OSS adapter.

use async_trait::async_trait;
use opendal::{Operator, services};
use serde::Deserialize;
use tracing::{debug, info};

use super::client::{self, FileContent, StorageClient};
use super::config::StorageConfig;
use super::error::StorageError;

const PROVIDER: &str = "aliyun";
const DEFAULT_REGION: &str = "oss-cn-hangzhou";

/// Aliyun OSS settings, as stored in the `oss` setting (camelCase keys).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AliyunOssOptions {
    /// AccessKey ID.
    pub access_key_id: String,
    /// AccessKey secret.
    pub access_key_secret: String,
    /// Bucket name.
    pub bucket: String,
    /// Region id, e.g. `oss-cn-hangzhou`.
    #[serde(default)]
    pub region: Option<String>,
    /// API endpoint override.
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Custom public domain (CDN) used when building URLs.
    #[serde(default, alias = "cdnHost")]
    pub domain: Option<String>,
    /// Key prefix inside the bucket.
    #[serde(default)]
    pub root: Option<String>,
}

impl AliyunOssOptions {
    /// Region with the `oss-` prefix applied.
    #[must_use]
    pub fn region(&self) -> String {
        let region = self
            .region
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .unwrap_or(DEFAULT_REGION);
        if region.starts_with("oss-") {
            region.to_string()
        } else {
            format!("oss-{region}")
        }
    }

    /// API endpoint.
    #[must_use]
    pub fn endpoint(&self) -> String {
        self.endpoint
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .map_or_else(
                || format!("https://{}.aliyuncs.com", self.region()),
                with_scheme,
            )
    }

    /// Public base URL objects are served from.
    #[must_use]
    pub fn public_base(&self) -> String {
        let base = self
            .domain
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map_or_else(
                || format!("https://{}.{}.aliyuncs.com", self.bucket, self.region()),
                with_scheme,
            );

        match self.prefix() {
            Some(prefix) => format!("{}/{prefix}", base.trim_end_matches('/')),
            None => base.trim_end_matches('/').to_string(),
        }
    }

    fn prefix(&self) -> Option<&str> {
        self.root
            .as_deref()
            .map(|r| r.trim_matches('/'))
            .filter(|r| !r.is_empty())
    }
}

fn with_scheme(host: &str) -> String {
    if host.contains("://") {
        host.to_string()
    } else {
        format!("https://{host}")
    }
}

/// Storage client backed by an Aliyun OSS bucket.
pub struct AliyunOssClient {
    operator: Operator,
    public_base: String,
    prefix: String,
}

impl AliyunOssClient {
    /// Create a client from the resolved storage configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if credentials or bucket are missing,
    /// or if the OpenDAL operator cannot be built.
    pub fn from_config(config: &StorageConfig) -> Result<Self, StorageError> {
        let options: AliyunOssOptions = config.options(PROVIDER)?;
        Self::from_options(&options)
    }

    /// Create a client from typed options.
    pub fn from_options(options: &AliyunOssOptions) -> Result<Self, StorageError> {
        if options.bucket.trim().is_empty() {
            return Err(StorageError::configuration("aliyun bucket must not be empty"));
        }

        let mut builder = services::Oss::default()
            .bucket(&options.bucket)
            .endpoint(&options.endpoint())
            .access_key_id(&options.access_key_id)
            .access_key_secret(&options.access_key_secret);
        if let Some(prefix) = options.prefix() {
            builder = builder.root(&format!("/{prefix}"));
        }

        let operator = Operator::new(builder)
            .map_err(|e| StorageError::configuration(e.to_string()))?
            .finish();

        debug!(bucket = %options.bucket, region = %options.region(), "aliyun oss client created");

        Ok(Self {
            operator,
            public_base: options.public_base(),
            prefix: options.prefix().unwrap_or_default().to_string(),
        })
    }

    /// Public base URL.
    #[must_use]
    pub fn public_base(&self) -> &str {
        &self.public_base
    }

    /// Object key, relative to the bucket root prefix, behind `url`.
    ///
    /// URLs issued under a previous domain still resolve to the same key.
    pub fn object_key(&self, url: &str) -> Result<String, StorageError> {
        client::key_from_url(url, &self.public_base, &self.prefix)
    }
}

#[async_trait]
impl StorageClient for AliyunOssClient {
    fn provider(&self) -> &'static str {
        PROVIDER
    }

    async fn put_file(&self, path: &str, content: FileContent) -> Result<String, StorageError> {
        let key = client::normalize_key(path)?;
        let size = client::write_content(&self.operator, PROVIDER, &key, content).await?;
        info!(key = %key, size, "uploaded object to aliyun oss");
        Ok(client::public_url(&self.public_base, &key))
    }

    /// Deleting a key that does not exist succeeds.
    async fn delete_file(&self, url: &str) -> Result<(), StorageError> {
        let key = self.object_key(url)?;
        self.operator
            .delete(&key)
            .await
            .map_err(|e| StorageError::provider(PROVIDER, e))?;
        info!(key = %key, "deleted object from aliyun oss");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(raw: &str) -> StorageConfig {
        StorageConfig::parse(Some(raw)).expect("valid config")
    }

    #[test]
    fn test_default_region_and_public_base() {
        let options: AliyunOssOptions = config(
            r#"{"type":"aliyun","bucket":"x","accessKeyId":"k","accessKeySecret":"s"}"#,
        )
        .options(PROVIDER)
        .expect("options");

        assert_eq!(options.region(), "oss-cn-hangzhou");
        assert_eq!(options.endpoint(), "https://oss-cn-hangzhou.aliyuncs.com");
        assert_eq!(
            options.public_base(),
            "https://x.oss-cn-hangzhou.aliyuncs.com"
        );
    }

    #[test]
    fn test_region_prefix_and_domain() {
        let options: AliyunOssOptions = config(
            r#"{"bucket":"blog","accessKeyId":"k","accessKeySecret":"s",
                "region":"cn-shanghai","cdnHost":"static.example.com/","root":"/media/"}"#,
        )
        .options(PROVIDER)
        .expect("options");

        assert_eq!(options.region(), "oss-cn-shanghai");
        assert_eq!(options.endpoint(), "https://oss-cn-shanghai.aliyuncs.com");
        assert_eq!(options.public_base(), "https://static.example.com/media");
    }

    #[test]
    fn test_client_urls() {
        let client = AliyunOssClient::from_config(&config(
            r#"{"type":"aliyun","bucket":"x","accessKeyId":"k","accessKeySecret":"s"}"#,
        ))
        .expect("client");

        assert_eq!(client.provider(), "aliyun");
        let key = client::normalize_key("img/1.png").expect("key");
        let url = client::public_url(client.public_base(), &key);
        assert_eq!(url, "https://x.oss-cn-hangzhou.aliyuncs.com/img/1.png");
        assert_eq!(client.object_key(&url).expect("key"), "img/1.png");
    }

    #[test]
    fn test_object_key_after_domain_change() {
        let before = AliyunOssClient::from_config(&config(
            r#"{"bucket":"x","accessKeyId":"k","accessKeySecret":"s","root":"media"}"#,
        ))
        .expect("client");
        let url = client::public_url(before.public_base(), "img/1.png");
        assert_eq!(url, "https://x.oss-cn-hangzhou.aliyuncs.com/media/img/1.png");

        let after = AliyunOssClient::from_config(&config(
            r#"{"bucket":"x","accessKeyId":"k","accessKeySecret":"s","root":"media",
                "domain":"cdn.example.com"}"#,
        ))
        .expect("client");
        assert_eq!(after.public_base(), "https://cdn.example.com/media");
        assert_eq!(after.object_key(&url).expect("key"), "img/1.png");
        assert_eq!(
            after
                .object_key("https://cdn.example.com/media/img/1.png")
                .expect("key"),
            "img/1.png"
        );
    }

    #[test]
    fn test_object_key_rejects_traversal() {
        let client = AliyunOssClient::from_config(&config(
            r#"{"bucket":"x","accessKeyId":"k","accessKeySecret":"s","root":"media"}"#,
        ))
        .expect("client");

        assert!(matches!(
            client.object_key("https://x.oss-cn-hangzhou.aliyuncs.com/media/%2e%2e/secret"),
            Err(StorageError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_missing_credentials() {
        let result = AliyunOssClient::from_config(&config(r#"{"type":"aliyun","bucket":"x"}"#));
        assert!(matches!(result, Err(StorageError::Configuration(_))));
    }

    #[test]
    fn test_empty_bucket() {
        let result = AliyunOssClient::from_config(&config(
            r#"{"bucket":" ","accessKeyId":"k","accessKeySecret":"s"}"#,
        ));
        assert!(matches!(result, Err(StorageError::Configuration(_))));
    }
}
