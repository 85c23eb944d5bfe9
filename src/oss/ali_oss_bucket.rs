// API 文档参考：
// aliyun-oss-rust-sdk crate: https://docs.rs/aliyun-oss-rust-sdk
// 阿里云 OSS 文档: https://help.aliyun.com/zh/oss
// 阿里云 OSS API 参考: https://help.aliyun.com/zh/oss/developer-reference/api-reference

use aliyun_oss_rust_sdk::oss::OSS;
use aliyun_oss_rust_sdk::request::{RequestBuilder, RequestType};
use aliyun_oss_rust_sdk::url::UrlApi;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::oss::{
    Bucket, BucketProvider, ClientConfig, ListObjectsResult, ObjectMeta, OssError, SignOptions,
};

const PROVIDER: &str = "Aliyun OSS";

// 阿里云 OSS ListObjects API 响应结构
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "PascalCase", default)]
struct ListBucketResult {
    name: String,
    prefix: String,
    marker: String,
    is_truncated: bool,
    next_marker: Option<String>,
    contents: Vec<ObjectContent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ObjectContent {
    key: String,
    last_modified: DateTime<Utc>,
    #[serde(rename = "ETag", default, deserialize_with = "deserialize_etag")]
    etag: Option<String>,
    size: u64,
}

fn deserialize_etag<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    // OSS 返回的 ETag 包含引号，需要去掉
    Ok(Some(s.trim_matches('"').to_string()))
}

/// 解析 ListObjects 的 XML 响应
fn parse_list_response(xml: &str) -> Result<ListObjectsResult, OssError> {
    let result: ListBucketResult = quick_xml::de::from_str(xml).map_err(|e| {
        OssError::from_provider(e, PROVIDER, "list_objects: 解析 XML 响应失败")
    })?;

    let objects = result
        .contents
        .into_iter()
        .map(|content| ObjectMeta {
            key: content.key,
            size: content.size,
            last_modified: content.last_modified,
            etag: content.etag,
        })
        .collect();

    Ok(ListObjectsResult {
        bucket: result.name,
        prefix: result.prefix,
        marker: result.marker,
        next_marker: result.next_marker.filter(|m| !m.is_empty()),
        is_truncated: result.is_truncated,
        objects,
    })
}

/// 阿里云访问凭证
#[derive(Clone)]
struct AliyunCredentials {
    access_key_id: String,
    access_key_secret: String,
}

impl AliyunCredentials {
    /// 配置中的 AK/SK 优先，都为空时读取环境变量（支持新旧两种命名）
    fn resolve(config: &ClientConfig) -> Result<Self, OssError> {
        if !config.access_id.is_empty() || !config.access_key.is_empty() {
            if config.access_id.is_empty() || config.access_key.is_empty() {
                return Err(OssError::Configuration(
                    "access_id 和 access_key 需要同时配置".to_string(),
                ));
            }
            return Ok(Self {
                access_key_id: config.access_id.clone(),
                access_key_secret: config.access_key.clone(),
            });
        }

        let ak = std::env::var("ALIBABA_CLOUD_ACCESS_KEY_ID")
            .or_else(|_| std::env::var("ALIYUN_OSS_ACCESS_KEY_ID"))
            .ok();
        let sk = std::env::var("ALIBABA_CLOUD_ACCESS_KEY_SECRET")
            .or_else(|_| std::env::var("ALIYUN_OSS_ACCESS_KEY_SECRET"))
            .ok();

        match (ak, sk) {
            (Some(ak), Some(sk)) if !ak.is_empty() && !sk.is_empty() => Ok(Self {
                access_key_id: ak,
                access_key_secret: sk,
            }),
            _ => Err(OssError::Configuration(
                "未配置访问凭证: 请设置 access_id/access_key 或环境变量 ALIBABA_CLOUD_ACCESS_KEY_ID/ALIBABA_CLOUD_ACCESS_KEY_SECRET".to_string(),
            )),
        }
    }
}

/// 基于 aliyun-oss-rust-sdk 的 provider
///
/// SDK 的 `OSS` 实例绑定单个 bucket，因此每个 bucket 句柄持有一个 `OSS`。
/// 构造 `OSS` 只做字段赋值，不发起网络请求。
pub struct AliOssProvider {
    credentials: AliyunCredentials,
    endpoint: String,
    https: bool,
    http_client: reqwest::Client,
}

impl AliOssProvider {
    pub fn new(config: &ClientConfig) -> Result<Self, OssError> {
        config.check()?;
        let credentials = AliyunCredentials::resolve(config)?;

        Ok(Self {
            credentials,
            endpoint: config.endpoint_host().to_string(),
            https: config.https,
            http_client: reqwest::Client::new(),
        })
    }

    fn scheme(&self) -> &'static str {
        if self.https {
            "https"
        } else {
            "http"
        }
    }

    // SDK 只根据端点字符串的协议前缀决定请求协议，上传和删除用带协议的端点；
    // 签名用不带协议的端点，保证 URL 中的主机是 `<bucket>.<endpoint>`
    fn bucket(&self, name: &str) -> AliOssBucket {
        let ak = self.credentials.access_key_id.as_str();
        let sk = self.credentials.access_key_secret.as_str();
        let endpoint = format!("{}://{}", self.scheme(), self.endpoint);

        AliOssBucket {
            name: name.to_string(),
            endpoint: self.endpoint.clone(),
            https: self.https,
            client: Arc::new(OSS::new(ak, sk, endpoint.as_str(), name)),
            signer: Arc::new(OSS::new(ak, sk, self.endpoint.as_str(), name)),
            http_client: self.http_client.clone(),
        }
    }
}

impl BucketProvider for AliOssProvider {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn open_bucket(&self, name: &str) -> Result<Arc<dyn Bucket>, OssError> {
        if name.is_empty() {
            return Err(OssError::InvalidInput("bucket 名称不能为空".to_string()));
        }

        Ok(Arc::new(self.bucket(name)))
    }
}

/// 阿里云 OSS bucket 句柄
pub struct AliOssBucket {
    name: String,
    endpoint: String,
    https: bool,
    client: Arc<OSS>,
    signer: Arc<OSS>,
    http_client: reqwest::Client,
}

impl AliOssBucket {
    fn bucket_url(&self) -> String {
        let scheme = if self.https { "https" } else { "http" };
        format!("{}://{}.{}/", scheme, self.name, self.endpoint)
    }
}

#[async_trait]
impl Bucket for AliOssBucket {
    fn name(&self) -> &str {
        &self.name
    }

    // 上传内存文件 API (异步): https://docs.rs/aliyun-oss-rust-sdk/aliyun_oss_rust_sdk/oss/struct.OSS.html#method.pub_object_from_buffer
    async fn put_object(
        &self,
        key: &str,
        mut reader: Box<dyn AsyncRead + Send + Unpin>,
    ) -> Result<(), OssError> {
        let mut buffer = Vec::new();
        reader.read_to_end(&mut buffer).await?;

        self.client
            .pub_object_from_buffer(key, buffer.as_slice(), RequestBuilder::new())
            .await
            .map_err(|e| OssError::from_provider(e, PROVIDER, "put_object"))?;

        Ok(())
    }

    // 签名 URL 只在本地计算，不访问网络
    async fn sign_url(
        &self,
        key: &str,
        expire_seconds: i64,
        options: &SignOptions,
    ) -> Result<String, OssError> {
        let mut builder = RequestBuilder::new().with_expire(expire_seconds);
        if !self.https {
            builder = builder.with_http();
        }

        if let Some(ct) = &options.content_type {
            builder = builder.with_content_type(ct.as_str());
        }
        for (k, v) in &options.oss_headers {
            builder = builder.oss_header_put(k.as_str(), v.as_str());
        }

        Ok(self.signer.sign_download_url(key, &builder))
    }

    // 单次列举: https://help.aliyun.com/zh/oss/developer-reference/listobjects
    async fn list_objects(&self) -> Result<ListObjectsResult, OssError> {
        let mut builder = RequestBuilder::new();
        builder.method = RequestType::Get;

        let (_signed_url, headers) = self
            .client
            .build_request("/", builder)
            .map_err(|e| OssError::from_provider(e, PROVIDER, "list_objects: 构建请求失败"))?;

        let header = |name: &str| -> Result<String, OssError> {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
                .ok_or_else(|| {
                    OssError::provider_message(PROVIDER, format!("list_objects: 签名缺少 {} 头", name))
                })
        };
        let authorization = header("Authorization")?;
        let date = header("date")?;

        let response = self
            .http_client
            .get(self.bucket_url())
            .header("Authorization", authorization)
            .header("Date", date)
            .send()
            .await
            .map_err(|e| OssError::from_provider(e, PROVIDER, "list_objects"))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| OssError::from_provider(e, PROVIDER, "list_objects: 读取响应失败"))?;

        if !status.is_success() {
            return Err(OssError::provider_message(
                PROVIDER,
                format!("list_objects HTTP {}: {}", status, body),
            ));
        }

        let mut result = parse_list_response(&body)?;
        if result.bucket.is_empty() {
            result.bucket = self.name.clone();
        }
        Ok(result)
    }

    // 文件删除 API (异步): https://docs.rs/aliyun-oss-rust-sdk/aliyun_oss_rust_sdk/oss/struct.OSS.html#method.delete_object
    async fn delete_object(&self, key: &str) -> Result<(), OssError> {
        self.client
            .delete_object(key, RequestBuilder::new())
            .await
            .map_err(|e| OssError::from_provider(e, PROVIDER, "delete_object"))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serial_test::serial;

    const LIST_RESPONSE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ListBucketResult>
  <Name>examplebucket</Name>
  <Prefix></Prefix>
  <Marker></Marker>
  <MaxKeys>100</MaxKeys>
  <Delimiter></Delimiter>
  <IsTruncated>true</IsTruncated>
  <NextMarker>fun/test.jpg</NextMarker>
  <Contents>
    <Key>fun/movie/001.avi</Key>
    <LastModified>2012-02-24T08:43:07.000Z</LastModified>
    <ETag>"5B3C1A2E053D763E1B002CC607C5A0FE"</ETag>
    <Type>Normal</Type>
    <Size>344606</Size>
    <StorageClass>Standard</StorageClass>
  </Contents>
  <Contents>
    <Key>fun/movie/007.avi</Key>
    <LastModified>2012-02-24T08:43:27.000Z</LastModified>
    <ETag>"5B3C1A2E053D763E1B002CC607C5A0FF"</ETag>
    <Type>Normal</Type>
    <Size>12</Size>
    <StorageClass>Standard</StorageClass>
  </Contents>
</ListBucketResult>"#;

    fn test_config() -> ClientConfig {
        ClientConfig::new("https://oss-cn-hangzhou.aliyuncs.com", "test-id", "test-key", 60)
    }

    #[test]
    fn test_parse_list_response() {
        let result = parse_list_response(LIST_RESPONSE).unwrap();

        assert_eq!(result.bucket, "examplebucket");
        assert!(result.is_truncated);
        assert_eq!(result.next_marker.as_deref(), Some("fun/test.jpg"));
        assert_eq!(result.keys(), vec!["fun/movie/001.avi", "fun/movie/007.avi"]);
        assert_eq!(result.objects[0].size, 344606);
        assert_eq!(
            result.objects[0].etag.as_deref(),
            Some("5B3C1A2E053D763E1B002CC607C5A0FE")
        );
        assert_eq!(
            result.objects[0].last_modified,
            Utc.with_ymd_and_hms(2012, 2, 24, 8, 43, 7).unwrap()
        );
    }

    #[test]
    fn test_parse_empty_list_response() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<ListBucketResult>
  <Name>emptybucket</Name>
  <Prefix></Prefix>
  <Marker></Marker>
  <MaxKeys>100</MaxKeys>
  <IsTruncated>false</IsTruncated>
</ListBucketResult>"#;

        let result = parse_list_response(xml).unwrap();
        assert_eq!(result.bucket, "emptybucket");
        assert!(!result.is_truncated);
        assert!(result.next_marker.is_none());
        assert!(result.objects.is_empty());
    }

    #[test]
    fn test_parse_invalid_response() {
        assert!(matches!(
            parse_list_response("<Error><Code>"),
            Err(OssError::Provider { .. })
        ));
    }

    #[test]
    fn test_provider_endpoint_strips_scheme() {
        let provider = AliOssProvider::new(&test_config()).unwrap();
        assert_eq!(provider.endpoint(), "oss-cn-hangzhou.aliyuncs.com");

        let bucket = provider.open_bucket("mybucket").unwrap();
        assert_eq!(bucket.name(), "mybucket");
        assert!(provider.open_bucket("").is_err());
    }

    #[test]
    fn test_bucket_url() {
        let mut config = test_config();
        config.https = false;
        let provider = AliOssProvider::new(&config).unwrap();

        let bucket = provider.bucket("mybucket");
        assert_eq!(bucket.bucket_url(), "http://mybucket.oss-cn-hangzhou.aliyuncs.com/");
    }

    fn put_request_url(bucket: &AliOssBucket) -> String {
        let mut builder = RequestBuilder::new();
        builder.method = RequestType::Put;
        let (url, _) = bucket.client.build_request("/k.txt", builder).unwrap();
        url
    }

    #[test]
    fn test_request_scheme_follows_https() {
        let provider = AliOssProvider::new(&test_config()).unwrap();
        let url = put_request_url(&provider.bucket("mybucket"));
        assert!(
            url.starts_with("https://mybucket.oss-cn-hangzhou.aliyuncs.com/k.txt"),
            "{}",
            url
        );

        let config = ClientConfig::new("oss-cn-hangzhou.aliyuncs.com", "id", "key", 60);
        let provider = AliOssProvider::new(&config).unwrap();
        assert!(put_request_url(&provider.bucket("mybucket")).starts_with("https://"));

        let mut config = test_config();
        config.https = false;
        let provider = AliOssProvider::new(&config).unwrap();
        let url = put_request_url(&provider.bucket("mybucket"));
        assert!(
            url.starts_with("http://mybucket.oss-cn-hangzhou.aliyuncs.com/k.txt"),
            "{}",
            url
        );
    }

    #[test]
    fn test_invalid_config() {
        let config = ClientConfig::new("", "id", "key", 60);
        assert!(matches!(
            AliOssProvider::new(&config),
            Err(OssError::Configuration(_))
        ));

        let config = ClientConfig::new("oss-cn-hangzhou.aliyuncs.com", "id", "", 60);
        assert!(matches!(
            AliOssProvider::new(&config),
            Err(OssError::Configuration(_))
        ));
    }

    #[test]
    #[serial]
    fn test_credentials_from_env() {
        let config = ClientConfig::new("oss-cn-hangzhou.aliyuncs.com", "", "", 60);

        std::env::remove_var("ALIBABA_CLOUD_ACCESS_KEY_ID");
        std::env::remove_var("ALIBABA_CLOUD_ACCESS_KEY_SECRET");
        std::env::remove_var("ALIYUN_OSS_ACCESS_KEY_ID");
        std::env::remove_var("ALIYUN_OSS_ACCESS_KEY_SECRET");
        assert!(AliOssProvider::new(&config).is_err());

        std::env::set_var("ALIYUN_OSS_ACCESS_KEY_ID", "legacy-id");
        std::env::set_var("ALIYUN_OSS_ACCESS_KEY_SECRET", "legacy-key");
        let credentials = AliyunCredentials::resolve(&config).unwrap();
        assert_eq!(credentials.access_key_id, "legacy-id");

        std::env::set_var("ALIBABA_CLOUD_ACCESS_KEY_ID", "env-id");
        std::env::set_var("ALIBABA_CLOUD_ACCESS_KEY_SECRET", "env-key");
        let credentials = AliyunCredentials::resolve(&config).unwrap();
        assert_eq!(credentials.access_key_id, "env-id");
        assert_eq!(credentials.access_key_secret, "env-key");

        std::env::remove_var("ALIBABA_CLOUD_ACCESS_KEY_ID");
        std::env::remove_var("ALIBABA_CLOUD_ACCESS_KEY_SECRET");
        std::env::remove_var("ALIYUN_OSS_ACCESS_KEY_ID");
        std::env::remove_var("ALIYUN_OSS_ACCESS_KEY_SECRET");
    }

    #[tokio::test]
    async fn test_sign_url_offline() {
        let provider = AliOssProvider::new(&test_config()).unwrap();
        let bucket = provider.open_bucket("mybucket").unwrap();

        let url = bucket
            .sign_url("images/a.png", 60, &SignOptions::default())
            .await
            .unwrap();
        assert!(
            url.starts_with("https://mybucket.oss-cn-hangzhou.aliyuncs.com/"),
            "{}",
            url
        );
        assert!(url.contains("images/a.png"));
    }
}
