use chrono::{DateTime, Utc};
use smart_default::SmartDefault;

/// 对象元数据
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectMeta {
    pub key: String,
    pub size: u64,
    pub last_modified: DateTime<Utc>,
    pub etag: Option<String>,
}

/// 单次列举的结果
///
/// 只对应一次列举请求，`is_truncated` 为 true 时需要调用方自行翻页。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListObjectsResult {
    pub bucket: String,
    pub prefix: String,
    pub marker: String,
    pub next_marker: Option<String>,
    pub is_truncated: bool,
    pub objects: Vec<ObjectMeta>,
}

impl ListObjectsResult {
    /// 列举结果中的所有 key
    pub fn keys(&self) -> Vec<&str> {
        self.objects.iter().map(|o| o.key.as_str()).collect()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.objects.iter().any(|o| o.key == key)
    }
}

/// 签名 URL 选项
#[derive(Debug, Clone, SmartDefault)]
pub struct SignOptions {
    /// 覆盖配置中的过期时间（秒）
    pub expire_seconds: Option<i64>,
    /// 参与签名的 Content-Type
    pub content_type: Option<String>,
    /// 参与签名的 `x-oss-*` 头
    pub oss_headers: Vec<(String, String)>,
}

impl SignOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_expire_seconds(mut self, expire_seconds: i64) -> Self {
        self.expire_seconds = Some(expire_seconds);
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn with_oss_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.oss_headers.push((key.into(), value.into()));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_options_builder() {
        let options = SignOptions::new()
            .with_expire_seconds(60)
            .with_content_type("image/png")
            .with_oss_header("x-oss-traffic-limit", "819200");

        assert_eq!(options.expire_seconds, Some(60));
        assert_eq!(options.content_type.as_deref(), Some("image/png"));
        assert_eq!(options.oss_headers.len(), 1);
    }

    #[test]
    fn test_list_result_keys() {
        let result = ListObjectsResult {
            bucket: "b".to_string(),
            objects: vec![ObjectMeta {
                key: "a/1.txt".to_string(),
                size: 3,
                last_modified: Utc::now(),
                etag: None,
            }],
            ..Default::default()
        };

        assert_eq!(result.keys(), vec!["a/1.txt"]);
        assert!(result.contains("a/1.txt"));
        assert!(!result.contains("a/2.txt"));
    }
}
