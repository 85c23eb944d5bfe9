mod ali_oss_bucket;
mod bucket;
mod bucket_cache;
mod bucket_types;
mod client;
mod config;
mod error;
mod memory_bucket;
pub mod object_id;

pub use ali_oss_bucket::{AliOssBucket, AliOssProvider};
pub use bucket::{Bucket, BucketProvider};
pub use bucket_cache::{BucketCache, BucketCacheConfig};
pub use bucket_types::{ListObjectsResult, ObjectMeta, SignOptions};
pub use client::Client;
pub use config::ClientConfig;
pub use error::OssError;
pub use memory_bucket::{MemoryBucket, MemoryProvider};
pub use object_id::{generate_object_id, ObjectId, OSS_PREFIX};
