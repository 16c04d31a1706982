//! Storage configuration types.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::error::StorageError;

/// Storage provider configuration as persisted in the `oss` setting.
///
/// The `type` field selects the provider; every other field is opaque to
/// the storage layer and interpreted by the selected adapter.
#[derive(Debug, Clone, PartialEq)]
pub struct StorageConfig {
    provider_type: Option<String>,
    fields: Map<String, Value>,
}

impl StorageConfig {
    /// Parse the raw `oss` setting.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Configuration`] when the value is absent,
    /// blank, not valid JSON, or not a non-empty JSON object.
    pub fn parse(raw: Option<&str>) -> Result<Self, StorageError> {
        let raw = raw
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| StorageError::configuration("oss settings are not configured"))?;

        let value: Value = serde_json::from_str(raw)
            .map_err(|e| StorageError::configuration(format!("oss settings are not valid JSON: {e}")))?;

        Self::from_value(value)
    }

    /// Build from an already parsed JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Configuration`] unless `value` is a non-empty object.
    pub fn from_value(value: Value) -> Result<Self, StorageError> {
        let fields = match value {
            Value::Object(map) if !map.is_empty() => map,
            Value::Object(_) => {
                return Err(StorageError::configuration("oss settings are empty"));
            }
            Value::Null => {
                return Err(StorageError::configuration("oss settings are null"));
            }
            other => {
                return Err(StorageError::configuration(format!(
                    "oss settings must be a JSON object, got {}",
                    json_kind(&other)
                )));
            }
        };

        let provider_type = match fields.get("type") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
        };

        Ok(Self {
            provider_type,
            fields,
        })
    }

    /// The raw `type` discriminator, if any.
    #[must_use]
    pub fn provider_type(&self) -> Option<&str> {
        self.provider_type.as_deref()
    }

    /// All fields, including `type`.
    #[must_use]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Look up a string field.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    /// Deserialize the provider-specific options.
    ///
    /// Missing or ill-typed fields are reported as configuration errors
    /// naming the provider.
    pub fn options<T: DeserializeOwned>(&self, provider: &str) -> Result<T, StorageError> {
        serde_json::from_value(Value::Object(self.fields.clone())).map_err(|e| {
            StorageError::configuration(format!("invalid {provider} oss settings: {e}"))
        })
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde::Deserialize;

    #[test]
    fn test_parse_aliyun_config() {
        let config = StorageConfig::parse(Some(
            r#"{"type":"aliyun","bucket":"x","accessKeyId":"k","accessKeySecret":"s"}"#,
        ))
        .expect("valid config");

        assert_eq!(config.provider_type(), Some("aliyun"));
        assert_eq!(config.get_str("bucket"), Some("x"));
        assert_eq!(config.fields().len(), 4);
    }

    #[test]
    fn test_parse_without_type() {
        let config = StorageConfig::parse(Some(r#"{"bucket":"x"}"#)).expect("valid config");
        assert_eq!(config.provider_type(), None);
    }

    #[test]
    fn test_non_string_type_is_stringified() {
        let config = StorageConfig::parse(Some(r#"{"type":42}"#)).expect("valid config");
        assert_eq!(config.provider_type(), Some("42"));
    }

    #[rstest]
    #[case::absent(None)]
    #[case::blank(Some("   "))]
    #[case::malformed(Some("{not json"))]
    #[case::null(Some("null"))]
    #[case::empty_object(Some("{}"))]
    #[case::array(Some(r#"["aliyun"]"#))]
    #[case::string(Some(r#""aliyun""#))]
    #[case::boolean(Some("false"))]
    fn test_parse_rejects(#[case] raw: Option<&str>) {
        let err = StorageConfig::parse(raw).unwrap_err();
        assert!(matches!(err, StorageError::Configuration(_)), "{err}");
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Creds {
        access_key_id: String,
    }

    #[test]
    fn test_options_missing_field() {
        let config = StorageConfig::parse(Some(r#"{"type":"aliyun"}"#)).expect("valid config");
        let err = config.options::<Creds>("aliyun").unwrap_err();
        assert!(err.to_string().contains("invalid aliyun oss settings"));
    }

    #[test]
    fn test_options_ok() {
        let config =
            StorageConfig::parse(Some(r#"{"accessKeyId":"k"}"#)).expect("valid config");
        let creds: Creds = config.options("aliyun").expect("options");
        assert_eq!(creds.access_key_id, "k");
    }
}
