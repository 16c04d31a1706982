//! Built-in translations and JSON deep merge.

use serde_json::{Value, json};

/// Translations shipped with the application.
///
/// Stored translations are merged over these at startup, so admins only
/// persist the keys they override.
#[must_use]
pub fn default_i18n() -> Value {
    json!({
        "en": {
            "article": "Article",
            "archives": "Archives",
            "knowledgeBooks": "Knowledge Books",
            "comment": "Comment",
            "readingCount": "Views",
            "publishAt": "Published at",
            "tagTitle": "Tags",
            "categoryTitle": "Categories",
            "search": "Search",
            "empty": "No data",
        },
        "zh": {
            "article": "文章",
            "archives": "归档",
            "knowledgeBooks": "知识小册",
            "comment": "评论",
            "readingCount": "阅读量",
            "publishAt": "发布于",
            "tagTitle": "文章标签",
            "categoryTitle": "文章分类",
            "search": "搜索",
            "empty": "暂无数据",
        },
    })
}

/// Deep-merge `overlay` into `base`.
///
/// Objects merge key by key, arrays concatenate, and any other overlay
/// value replaces the base value.
pub fn merge_json(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) => merge_json(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (Value::Array(base_items), Value::Array(overlay_items)) => {
            base_items.extend(overlay_items);
        }
        (slot, value) => *slot = value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_keeps_defaults_and_overrides() {
        let mut base = default_i18n();
        merge_json(
            &mut base,
            json!({"en": {"article": "Post", "custom": "Mine"}, "ja": {"article": "記事"}}),
        );

        assert_eq!(base["en"]["article"], "Post");
        assert_eq!(base["en"]["custom"], "Mine");
        assert_eq!(base["en"]["archives"], "Archives");
        assert_eq!(base["zh"]["article"], "文章");
        assert_eq!(base["ja"]["article"], "記事");
    }

    #[test]
    fn test_merge_arrays_concatenate() {
        let mut base = json!({"tags": ["a"]});
        merge_json(&mut base, json!({"tags": ["b"]}));
        assert_eq!(base, json!({"tags": ["a", "b"]}));
    }

    #[test]
    fn test_merge_scalar_replaces_object() {
        let mut base = json!({"en": {"a": 1}});
        merge_json(&mut base, json!({"en": "flat"}));
        assert_eq!(base, json!({"en": "flat"}));
    }

    #[test]
    fn test_merge_empty_overlay_is_noop() {
        let mut base = default_i18n();
        merge_json(&mut base, json!({}));
        assert_eq!(base, default_i18n());
    }
}
