//! 对象标识
//!
//! 由本客户端管理的对象使用 `oss://<key>` 形式的标识，其余字符串视为外部 URL。

use std::fmt;
use uuid::Uuid;

/// 对象标识的保留前缀
pub const OSS_PREFIX: &str = "oss://";

/// 对象标识
///
/// 在边界处由字符串解析得到，避免在每个操作中重复判断前缀。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ObjectId {
    /// `oss://` 开头的标识，保存去掉前缀后的对象 key
    Managed(String),
    /// 外部 URL，原样保存
    External(String),
}

impl ObjectId {
    pub fn parse(id: &str) -> Self {
        match id.strip_prefix(OSS_PREFIX) {
            Some(key) => ObjectId::Managed(key.to_string()),
            None => ObjectId::External(id.to_string()),
        }
    }

    pub fn is_managed(&self) -> bool {
        matches!(self, ObjectId::Managed(_))
    }

    /// 传给 SDK 的对象 key；外部 URL 原样返回
    pub fn key(&self) -> &str {
        match self {
            ObjectId::Managed(key) => key,
            ObjectId::External(url) => url,
        }
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectId::Managed(key) => write!(f, "{}{}", OSS_PREFIX, key),
            ObjectId::External(url) => f.write_str(url),
        }
    }
}

impl From<&str> for ObjectId {
    fn from(id: &str) -> Self {
        ObjectId::parse(id)
    }
}

/// 去掉保留前缀，没有前缀时原样返回
pub fn strip_prefix(id: &str) -> &str {
    id.strip_prefix(OSS_PREFIX).unwrap_or(id)
}

/// 生成新的对象标识：`oss://<prefix_path>/<uuid>[.<suffix>]`
///
/// uuid 去掉了连字符；suffix 不以 `.` 开头时自动补上。
pub fn generate_object_id(prefix_path: &str, suffix: &str) -> String {
    let token = Uuid::new_v4().simple().to_string();
    let mut id = format!("{}{}", OSS_PREFIX, join_path(prefix_path, &token));

    if suffix.is_empty() {
        return id;
    }
    if !suffix.starts_with('.') {
        id.push('.');
    }
    id.push_str(suffix);
    id
}

/// 按词法规则拼接并清理路径：去掉空段和 `.`，处理 `..`，保留开头的 `/`
fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        return name.to_string();
    }

    let rooted = prefix.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();

    for segment in prefix.split('/').chain(std::iter::once(name)) {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().is_some_and(|s| *s != "..") {
                    segments.pop();
                } else if !rooted {
                    segments.push("..");
                }
            }
            _ => segments.push(segment),
        }
    }

    let joined = segments.join("/");
    if rooted {
        format!("/{}", joined)
    } else {
        joined
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_of(id: &str) -> &str {
        let name = id.rsplit('/').next().unwrap();
        name.split('.').next().unwrap()
    }

    #[test]
    fn test_generate_object_id_with_suffix() {
        let id = generate_object_id("images/avatar", "png");
        assert!(id.starts_with("oss://images/avatar/"));
        assert!(id.ends_with(".png"));

        let token = token_of(&id);
        assert_eq!(token.len(), 32);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
        assert!(!token.contains('-'));
    }

    #[test]
    fn test_generate_object_id_dotted_suffix() {
        let id = generate_object_id("docs", ".pdf");
        assert!(id.ends_with(".pdf"));
        assert!(!id.ends_with("..pdf"));
    }

    #[test]
    fn test_generate_object_id_without_suffix() {
        let id = generate_object_id("docs", "");
        assert!(id.starts_with("oss://docs/"));
        assert!(!id.contains('.'));
        assert_eq!(id.len(), "oss://docs/".len() + 32);
    }

    #[test]
    fn test_generate_object_id_unique() {
        let a = generate_object_id("tmp", "txt");
        let b = generate_object_id("tmp", "txt");
        assert_ne!(a, b);
        assert_ne!(token_of(&a), token_of(&b));
    }

    #[test]
    fn test_generate_object_id_empty_prefix() {
        let id = generate_object_id("", "jpg");
        assert!(id.starts_with(OSS_PREFIX));
        assert!(!id[OSS_PREFIX.len()..].contains('/'));
    }

    #[test]
    fn test_join_path() {
        assert_eq!(join_path("a/b", "x"), "a/b/x");
        assert_eq!(join_path("a/b/", "x"), "a/b/x");
        assert_eq!(join_path("a//b/./", "x"), "a/b/x");
        assert_eq!(join_path("a/b/..", "x"), "a/x");
        assert_eq!(join_path("/a", "x"), "/a/x");
        assert_eq!(join_path("/..", "x"), "/x");
        assert_eq!(join_path("../a", "x"), "../a/x");
        assert_eq!(join_path("", "x"), "x");
    }

    #[test]
    fn test_object_id_parse() {
        let managed = ObjectId::parse("oss://images/a.png");
        assert!(managed.is_managed());
        assert_eq!(managed.key(), "images/a.png");
        assert_eq!(managed.to_string(), "oss://images/a.png");

        let external = ObjectId::from("https://example.com/a.png");
        assert!(!external.is_managed());
        assert_eq!(external.key(), "https://example.com/a.png");
        assert_eq!(external.to_string(), "https://example.com/a.png");
    }

    #[test]
    fn test_strip_prefix() {
        assert_eq!(strip_prefix("oss://a/b.txt"), "a/b.txt");
        assert_eq!(strip_prefix("a/b.txt"), "a/b.txt");
        assert_eq!(strip_prefix("oss://"), "");
    }
}
