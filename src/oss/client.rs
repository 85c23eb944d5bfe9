//! 客户端
//!
//! 每个操作的流程相同：规范化对象标识 → 从缓存获取 bucket 句柄 → 调用句柄 → 返回结果。
//! 不做重试，后端错误原样返回。

use std::path::Path;
use std::sync::Arc;
use tokio::io::AsyncRead;

use crate::oss::object_id::{generate_object_id, strip_prefix, ObjectId};
use crate::oss::{
    AliOssProvider, Bucket, BucketCache, BucketProvider, ClientConfig, ListObjectsResult,
    OssError, SignOptions,
};

/// 阿里云 OSS 客户端
///
/// `Client` 可以通过 `Arc` 在多个任务之间共享。bucket 句柄缓存属于客户端实例，
/// 多个客户端之间互不影响。
///
/// # 示例
///
/// ```no_run
/// use alioss::{Client, ClientConfig, SignOptions};
///
/// # async fn run() -> Result<(), alioss::OssError> {
/// let config = ClientConfig::new("oss-cn-hangzhou.aliyuncs.com", "id", "key", 600)
///     .with_domain("cdn.example.com");
/// let client = Client::new(config)?;
///
/// let id = client.generate_object_id("avatars", "png");
/// client.put_object("mybucket", &id, Box::new(&b"..."[..])).await?;
/// let url = client.get_signed_url("mybucket", &id, &SignOptions::default()).await?;
/// # Ok(())
/// # }
/// ```
pub struct Client {
    config: ClientConfig,
    provider: Arc<dyn BucketProvider>,
    buckets: BucketCache,
}

impl Client {
    /// 使用阿里云 SDK 创建客户端
    pub fn new(config: ClientConfig) -> Result<Self, OssError> {
        let provider = AliOssProvider::new(&config)?;
        Self::with_provider(config, Arc::new(provider))
    }

    /// 使用指定的 provider 创建客户端
    pub fn with_provider(
        config: ClientConfig,
        provider: Arc<dyn BucketProvider>,
    ) -> Result<Self, OssError> {
        config.check()?;

        let buckets = BucketCache::new(config.cache.clone());
        tracing::debug!(
            endpoint = provider.endpoint(),
            domain = config.custom_domain().unwrap_or(""),
            expire_seconds = config.expire_seconds,
            "created oss client"
        );

        Ok(Self {
            config,
            provider,
            buckets,
        })
    }

    /// 从配置文件创建客户端
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, OssError> {
        Self::new(ClientConfig::from_file(path)?)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// 生成 `oss://<prefix_path>/<uuid>[.<suffix>]` 形式的对象标识
    pub fn generate_object_id(&self, prefix_path: &str, suffix: &str) -> String {
        generate_object_id(prefix_path, suffix)
    }

    /// 获取 bucket 句柄，首次访问时创建并缓存
    pub fn bucket(&self, bucket: &str) -> Result<Arc<dyn Bucket>, OssError> {
        self.buckets.get_or_open(bucket, self.provider.as_ref())
    }

    /// 上传对象
    pub async fn put_object(
        &self,
        bucket: &str,
        object_id: &str,
        reader: Box<dyn AsyncRead + Send + Unpin>,
    ) -> Result<(), OssError> {
        let key = strip_prefix(object_id);
        let handle = self.bucket(bucket)?;

        tracing::debug!(bucket, key, "put object");
        handle.put_object(key, reader).await
    }

    /// 获取签名下载地址
    ///
    /// 不带 `oss://` 前缀的标识视为外部 URL，原样返回。
    /// 有效期小于 1 秒时返回 `InvalidInput`。
    /// 配置了自定义域名时，URL 中的 `<bucket>.<endpoint>` 替换为该域名。
    pub async fn get_signed_url(
        &self,
        bucket: &str,
        object_id: &str,
        options: &SignOptions,
    ) -> Result<String, OssError> {
        let key = match ObjectId::parse(object_id) {
            ObjectId::Managed(key) => key,
            ObjectId::External(url) => return Ok(url),
        };

        let expire_seconds = options.expire_seconds.unwrap_or(self.config.expire_seconds);
        if expire_seconds < 1 {
            return Err(OssError::InvalidInput(format!(
                "签名有效期必须大于 0 秒: {}",
                expire_seconds
            )));
        }
        let handle = self.bucket(bucket)?;
        let url = handle.sign_url(&key, expire_seconds, options).await?;

        tracing::debug!(bucket, key = key.as_str(), expire_seconds, "signed url");
        Ok(self.rewrite_domain(bucket, url))
    }

    /// 单次列举 bucket 中的对象，不做翻页
    pub async fn list_objects(&self, bucket: &str) -> Result<ListObjectsResult, OssError> {
        let handle = self.bucket(bucket)?;

        tracing::debug!(bucket, "list objects");
        handle.list_objects().await
    }

    /// 删除对象，对象不存在时的行为由后端决定
    pub async fn delete_object(&self, bucket: &str, object_id: &str) -> Result<(), OssError> {
        let key = strip_prefix(object_id);
        let handle = self.bucket(bucket)?;

        tracing::debug!(bucket, key, "delete object");
        handle.delete_object(key).await
    }

    fn rewrite_domain(&self, bucket: &str, url: String) -> String {
        match self.config.custom_domain() {
            Some(domain) => {
                let host = format!("{}.{}", bucket, self.provider.endpoint());
                url.replace(&host, domain)
            }
            None => url,
        }
    }
}
