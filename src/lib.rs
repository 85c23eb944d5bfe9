//! alioss - 阿里云 OSS 轻量客户端
//!
//! 在 aliyun-oss-rust-sdk 之上封装常用操作，减少样板代码。
//!
//! ## 模块
//!
//! - **cfg**: 配置文件加载（JSON/JSON5/YAML/TOML）
//! - **oss**: 对象标识生成、上传、签名 URL、列举、删除，以及按 bucket 缓存的句柄
//!
//! ## 对象标识
//!
//! 本客户端管理的对象使用 `oss://<key>` 形式的标识；不带该前缀的字符串视为外部 URL，
//! 获取签名地址时原样返回。

pub mod cfg;
pub mod oss;

pub use oss::{
    generate_object_id, AliOssProvider, Bucket, BucketCache, BucketCacheConfig, BucketProvider,
    Client, ClientConfig, ListObjectsResult, MemoryProvider, ObjectId, ObjectMeta, OssError,
    SignOptions, OSS_PREFIX,
};
