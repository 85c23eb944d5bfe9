use garde::Validate;
use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;
use std::fmt;
use std::path::Path;

use crate::oss::{BucketCacheConfig, OssError};

/// 已有部署中配置文件的嵌套位置
const NESTED_CONFIG_POINTER: &str = "/trellis/alioss";

/// 客户端配置
///
/// 可以直接放在配置文件根部，也可以嵌套在 `trellis.alioss` 下：
///
/// ```yaml
/// trellis:
///   alioss:
///     end_point: oss-cn-hangzhou.aliyuncs.com
///     access_id: ${ALIOSS_ACCESS_ID}
///     access_key: ${ALIOSS_ACCESS_KEY}
///     domain: cdn.example.com
///     expire_seconds: 600
/// ```
#[derive(Deserialize, Serialize, SmartDefault, Clone, Validate)]
#[serde(default)]
pub struct ClientConfig {
    /// 区域端点，如 oss-cn-hangzhou.aliyuncs.com
    #[garde(length(min = 1))]
    #[serde(alias = "end_point")]
    pub endpoint: String,

    /// Access Key ID，与 access_key 都为空时从环境变量读取
    #[garde(skip)]
    pub access_id: String,

    /// Access Key Secret
    #[garde(skip)]
    pub access_key: String,

    /// 自定义域名，配置后签名 URL 中的 `<bucket>.<endpoint>` 会被替换为该域名
    #[garde(skip)]
    pub domain: Option<String>,

    /// 签名 URL 有效期（秒）
    #[garde(range(min = 1))]
    #[default = 3600]
    pub expire_seconds: i64,

    /// 列举请求是否使用 HTTPS
    #[garde(skip)]
    #[default = true]
    pub https: bool,

    #[garde(dive)]
    pub cache: BucketCacheConfig,
}

impl ClientConfig {
    pub fn new(
        endpoint: impl Into<String>,
        access_id: impl Into<String>,
        access_key: impl Into<String>,
        expire_seconds: i64,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            access_id: access_id.into(),
            access_key: access_key.into(),
            expire_seconds,
            ..Default::default()
        }
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// 从配置文件加载，格式由扩展名决定
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, OssError> {
        let path = path.as_ref();
        let value = crate::cfg::load_value(path)
            .map_err(|e| OssError::Configuration(format!("{:#}", e)))?;

        let value = match value.pointer(NESTED_CONFIG_POINTER) {
            Some(nested) => nested.clone(),
            None => value,
        };

        let config: ClientConfig = serde_json::from_value(value).map_err(|e| {
            OssError::Configuration(format!("配置结构不匹配 {}: {}", path.display(), e))
        })?;
        Ok(config)
    }

    /// 校验配置
    pub fn check(&self) -> Result<(), OssError> {
        self.validate()
            .map_err(|errors| OssError::Configuration(format!("{}", errors)))
    }

    /// 去掉协议和结尾 `/` 的端点
    pub fn endpoint_host(&self) -> &str {
        let endpoint = self.endpoint.trim();
        let endpoint = endpoint
            .strip_prefix("https://")
            .or_else(|| endpoint.strip_prefix("http://"))
            .unwrap_or(endpoint);
        endpoint.trim_end_matches('/')
    }

    /// 非空的自定义域名
    pub fn custom_domain(&self) -> Option<&str> {
        self.domain.as_deref().map(str::trim).filter(|d| !d.is_empty())
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("endpoint", &self.endpoint)
            .field("access_id", &self.access_id)
            .field("access_key", &"***")
            .field("domain", &self.domain)
            .field("expire_seconds", &self.expire_seconds)
            .field("https", &self.https)
            .field("cache", &self.cache)
            .finish()
    }
}
