//! Storage client contract and helpers shared by the provider adapters.

use std::fmt;

use async_trait::async_trait;
use bytes::Bytes;
use futures::TryStreamExt;
use futures::stream::BoxStream;
use opendal::Operator;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

use super::error::StorageError;

/// Characters left unescaped in object keys when rendered into URLs.
const KEY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Content to upload.
pub enum FileContent {
    /// Whole file already in memory.
    Bytes(Bytes),
    /// File arriving as a stream of chunks.
    Stream(BoxStream<'static, std::io::Result<Bytes>>),
}

impl fmt::Debug for FileContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bytes(b) => f.debug_tuple("Bytes").field(&b.len()).finish(),
            Self::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

impl From<Bytes> for FileContent {
    fn from(value: Bytes) -> Self {
        Self::Bytes(value)
    }
}

impl From<Vec<u8>> for FileContent {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(Bytes::from(value))
    }
}

impl From<&'static [u8]> for FileContent {
    fn from(value: &'static [u8]) -> Self {
        Self::Bytes(Bytes::from_static(value))
    }
}

impl From<BoxStream<'static, std::io::Result<Bytes>>> for FileContent {
    fn from(value: BoxStream<'static, std::io::Result<Bytes>>) -> Self {
        Self::Stream(value)
    }
}

/// Capability contract every storage provider adapter implements.
#[async_trait]
pub trait StorageClient: Send + Sync {
    /// Provider identifier, e.g. `aliyun`.
    fn provider(&self) -> &'static str;

    /// Store `content` under `path` and return its public URL.
    async fn put_file(&self, path: &str, content: FileContent) -> Result<String, StorageError>;

    /// Remove the object behind `url`.
    async fn delete_file(&self, url: &str) -> Result<(), StorageError>;
}

/// Normalize a caller supplied path into an object key.
///
/// Leading slashes are dropped. Empty paths and `.`/`..` segments are rejected.
pub fn normalize_key(path: &str) -> Result<String, StorageError> {
    let key = path.trim().trim_start_matches('/');
    if !is_safe_key(key) {
        return Err(StorageError::invalid_path(path));
    }
    Ok(key.to_string())
}

fn is_safe_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .split('/')
            .all(|segment| !segment.is_empty() && segment != "." && segment != "..")
}

/// Join a public base URL and an object key.
#[must_use]
pub fn public_url(base: &str, key: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        utf8_percent_encode(key, KEY_ENCODE_SET)
    )
}

/// Recover the object key from a URL returned by [`public_url`].
///
/// When `url` starts with `base` the remainder is the key. Otherwise the
/// path component of the URL is used, which must start with `root` (the
/// key prefix already contained in `base`, empty for none); the prefix is
/// stripped. Query strings and fragments are ignored. Keys that would
/// escape the storage root are rejected.
pub fn key_from_url(url: &str, base: &str, root: &str) -> Result<String, StorageError> {
    let trimmed = url.trim();
    let base = base.trim_end_matches('/');
    let root = root.trim_matches('/');

    let under_base = trimmed
        .strip_prefix(base)
        .filter(|rest| !base.is_empty() && (rest.is_empty() || rest.starts_with(['/', '?', '#'])));

    let (encoded, strip_root) = if let Some(rest) = under_base {
        (rest, false)
    } else if let Some((_, rest)) = trimmed.split_once("://") {
        (rest.find('/').map_or("", |idx| &rest[idx..]), true)
    } else {
        (trimmed, true)
    };

    let encoded = encoded
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim_start_matches('/');

    let decoded = percent_decode_str(encoded)
        .decode_utf8()
        .map_err(|_| StorageError::invalid_url(url))?;

    let key = if strip_root && !root.is_empty() {
        decoded
            .strip_prefix(root)
            .and_then(|rest| rest.strip_prefix('/'))
            .ok_or_else(|| StorageError::invalid_url(url))?
    } else {
        decoded.as_ref()
    };

    if !is_safe_key(key) {
        return Err(StorageError::invalid_url(url));
    }
    Ok(key.to_string())
}

/// Write `content` to `key` through an OpenDAL operator.
pub(crate) async fn write_content(
    operator: &Operator,
    provider: &'static str,
    key: &str,
    content: FileContent,
) -> Result<u64, StorageError> {
    match content {
        FileContent::Bytes(bytes) => {
            let size = bytes.len() as u64;
            operator
                .write(key, bytes)
                .await
                .map_err(|e| StorageError::provider(provider, e))?;
            Ok(size)
        }
        FileContent::Stream(mut stream) => {
            let mut writer = operator
                .writer(key)
                .await
                .map_err(|e| StorageError::provider(provider, e))?;
            let mut size = 0u64;

            loop {
                let chunk = match stream.try_next().await {
                    Ok(Some(chunk)) => chunk,
                    Ok(None) => break,
                    Err(e) => {
                        let _ = writer.abort().await;
                        return Err(StorageError::Content(e));
                    }
                };
                size += chunk.len() as u64;
                if let Err(e) = writer.write(chunk).await {
                    let _ = writer.abort().await;
                    return Err(StorageError::provider(provider, e));
                }
            }

            writer
                .close()
                .await
                .map_err(|e| StorageError::provider(provider, e))?;
            Ok(size)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("img/1.png", "img/1.png")]
    #[case("/img/1.png", "img/1.png")]
    #[case("//a/b/c.txt", "a/b/c.txt")]
    #[case("  a.txt ", "a.txt")]
    fn test_normalize_key(#[case] path: &str, #[case] expected: &str) {
        assert_eq!(normalize_key(path).expect("valid"), expected);
    }

    #[rstest]
    #[case("")]
    #[case("/")]
    #[case("a/")]
    #[case("a//b")]
    #[case("../etc/passwd")]
    #[case("a/./b")]
    fn test_normalize_key_rejects(#[case] path: &str) {
        assert!(matches!(
            normalize_key(path),
            Err(StorageError::InvalidPath(_))
        ));
    }

    #[test]
    fn test_public_url_encodes_key() {
        assert_eq!(
            public_url("https://cdn.example.com/", "2024-01-01/my file.png"),
            "https://cdn.example.com/2024-01-01/my%20file.png"
        );
    }

    #[test]
    fn test_key_from_url_with_base() {
        let key = key_from_url(
            "https://cdn.example.com/blog/2024/my%20file.png",
            "https://cdn.example.com/blog",
            "blog",
        )
        .expect("key");
        assert_eq!(key, "2024/my file.png");
    }

    #[test]
    fn test_key_from_url_foreign_host() {
        let key = key_from_url(
            "https://bucket.oss-cn-hangzhou.aliyuncs.com/img/1.png?x-oss-process=style",
            "https://cdn.example.com",
            "",
        )
        .expect("key");
        assert_eq!(key, "img/1.png");
    }

    #[test]
    fn test_key_from_relative_url() {
        assert_eq!(key_from_url("/uploads/a.png", "/uploads", "").expect("key"), "a.png");
        assert_eq!(key_from_url("a/b.png", "/uploads", "").expect("key"), "a/b.png");
        assert_eq!(
            key_from_url("/uploads2/a.png", "/uploads", "").expect("key"),
            "uploads2/a.png"
        );
    }

    #[test]
    fn test_key_from_foreign_host_strips_root() {
        let key = key_from_url(
            "https://x.oss-cn-hangzhou.aliyuncs.com/media/img/1.png",
            "https://cdn.example.com/media",
            "/media",
        )
        .expect("key");
        assert_eq!(key, "img/1.png");
    }

    #[rstest]
    #[case("https://x.oss-cn-hangzhou.aliyuncs.com/other/img/1.png")]
    #[case("https://x.oss-cn-hangzhou.aliyuncs.com/media")]
    #[case("https://x.oss-cn-hangzhou.aliyuncs.com/mediaextra/1.png")]
    fn test_key_outside_root_rejected(#[case] url: &str) {
        assert!(matches!(
            key_from_url(url, "https://cdn.example.com/media", "media"),
            Err(StorageError::InvalidUrl(_))
        ));
    }

    #[rstest]
    #[case("/uploads/../x")]
    #[case("/uploads/%2e%2e/x")]
    #[case("/uploads/a/%2E%2E/%2e%2e/x")]
    #[case("/uploads/./x")]
    #[case("/uploads/a//x")]
    #[case("https://evil.example.com/../x")]
    fn test_key_from_url_rejects_traversal(#[case] url: &str) {
        assert!(matches!(
            key_from_url(url, "/uploads", ""),
            Err(StorageError::InvalidUrl(_))
        ));
    }

    #[rstest]
    #[case("https://cdn.example.com")]
    #[case("https://cdn.example.com/")]
    #[case("")]
    fn test_key_from_url_rejects_empty(#[case] url: &str) {
        assert!(matches!(
            key_from_url(url, "https://other.example.com", ""),
            Err(StorageError::InvalidUrl(_))
        ));
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    // A key rendered into a URL maps back to the same key.
    proptest! {
        #[test]
        fn prop_url_key_inverse(
            segments in proptest::collection::vec("[a-zA-Z0-9 _.\\-()]{1,12}", 1..4),
        ) {
            prop_assume!(segments.iter().all(|s| s != "." && s != ".."));
            let key = segments.join("/");
            let url = public_url("https://x.oss-cn-hangzhou.aliyuncs.com", &key);
            let back = key_from_url(&url, "https://x.oss-cn-hangzhou.aliyuncs.com", "")
                .expect("key");
            prop_assert_eq!(back, key);
        }
    }
}
