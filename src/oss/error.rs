use thiserror::Error;

/// 对象存储客户端错误类型
///
/// 客户端本身不做重试和错误分类，后端返回的错误原样包装在 `Provider` 中向上传递。
#[derive(Error, Debug)]
pub enum OssError {
    #[error("配置错误: {0}")]
    Configuration(String),

    #[error("无效参数: {0}")]
    InvalidInput(String),

    #[error("厂商错误 [{provider}]: {message}")]
    Provider {
        provider: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("序列化错误: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),
}

impl OssError {
    /// 从厂商 SDK 错误转换
    pub fn from_provider<E>(err: E, provider: &str, context: &str) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        OssError::Provider {
            provider: provider.to_string(),
            message: context.to_string(),
            source: Some(Box::new(err)),
        }
    }

    /// 没有底层错误对象时的厂商错误（如 HTTP 状态码异常）
    pub fn provider_message(provider: &str, message: impl Into<String>) -> Self {
        OssError::Provider {
            provider: provider.to_string(),
            message: message.into(),
            source: None,
        }
    }
}
