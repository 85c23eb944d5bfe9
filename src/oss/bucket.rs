use async_trait::async_trait;
use std::sync::Arc;
use tokio::io::AsyncRead;

use crate::oss::{ListObjectsResult, OssError, SignOptions};

/// 绑定到单个 bucket 的句柄
///
/// 所有 key 都是去掉 `oss://` 前缀之后的对象 key。
#[async_trait]
pub trait Bucket: Send + Sync {
    /// bucket 名称
    fn name(&self) -> &str;

    /// 从 reader 读取数据并上传
    ///
    /// aliyun-oss-rust-sdk 0.2 的异步接口只接受内存缓冲区，阿里云后端会先把 reader
    /// 全部读入内存再上传，大文件需注意内存占用。
    async fn put_object(
        &self,
        key: &str,
        reader: Box<dyn AsyncRead + Send + Unpin>,
    ) -> Result<(), OssError>;

    /// 生成限时有效的 GET 下载地址
    async fn sign_url(
        &self,
        key: &str,
        expire_seconds: i64,
        options: &SignOptions,
    ) -> Result<String, OssError>;

    /// 单次列举，不做翻页
    async fn list_objects(&self) -> Result<ListObjectsResult, OssError>;

    /// 删除对象
    async fn delete_object(&self, key: &str) -> Result<(), OssError>;
}

/// bucket 句柄的创建者
///
/// `open_bucket` 需要足够廉价且没有副作用，并发首次访问时可能被调用多次。
pub trait BucketProvider: Send + Sync {
    /// 服务端点（不含协议），签名 URL 中的主机名为 `<bucket>.<endpoint>`
    fn endpoint(&self) -> &str;

    fn open_bucket(&self, name: &str) -> Result<Arc<dyn Bucket>, OssError>;
}
