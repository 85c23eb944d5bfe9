//! 内存实现的 bucket
//!
//! 不访问网络，用于测试和本地调试。同一个 provider 打开的同名 bucket 共享数据。

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};
use tokio::io::{AsyncRead, AsyncReadExt};
use uuid::Uuid;

use crate::oss::{Bucket, BucketProvider, ListObjectsResult, ObjectMeta, OssError, SignOptions};

#[derive(Debug, Clone)]
struct StoredObject {
    data: Bytes,
    last_modified: DateTime<Utc>,
    etag: String,
}

type ObjectTable = Arc<RwLock<BTreeMap<String, StoredObject>>>;

/// 内存 bucket 的 provider
#[derive(Clone)]
pub struct MemoryProvider {
    endpoint: String,
    tables: Arc<RwLock<HashMap<String, ObjectTable>>>,
}

impl MemoryProvider {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            tables: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    fn table(&self, name: &str) -> ObjectTable {
        if let Some(table) = self.tables.read().unwrap_or_else(|e| e.into_inner()).get(name) {
            return Arc::clone(table);
        }

        let mut tables = self.tables.write().unwrap_or_else(|e| e.into_inner());
        Arc::clone(tables.entry(name.to_string()).or_default())
    }

    /// 读取对象内容
    pub fn object(&self, bucket: &str, key: &str) -> Option<Bytes> {
        let table = self.table(bucket);
        let objects = table.read().unwrap_or_else(|e| e.into_inner());
        objects.get(key).map(|o| o.data.clone())
    }
}

impl BucketProvider for MemoryProvider {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn open_bucket(&self, name: &str) -> Result<Arc<dyn Bucket>, OssError> {
        if name.is_empty() {
            return Err(OssError::InvalidInput("bucket 名称不能为空".to_string()));
        }

        Ok(Arc::new(MemoryBucket {
            name: name.to_string(),
            endpoint: self.endpoint.clone(),
            objects: self.table(name),
        }))
    }
}

/// 内存 bucket
pub struct MemoryBucket {
    name: String,
    endpoint: String,
    objects: ObjectTable,
}

#[async_trait]
impl Bucket for MemoryBucket {
    fn name(&self) -> &str {
        &self.name
    }

    async fn put_object(
        &self,
        key: &str,
        mut reader: Box<dyn AsyncRead + Send + Unpin>,
    ) -> Result<(), OssError> {
        if key.is_empty() {
            return Err(OssError::InvalidInput("对象 key 不能为空".to_string()));
        }

        let mut buffer = Vec::new();
        reader.read_to_end(&mut buffer).await?;

        let object = StoredObject {
            data: Bytes::from(buffer),
            last_modified: Utc::now(),
            etag: Uuid::new_v4().simple().to_string().to_uppercase(),
        };
        self.objects
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string(), object);
        Ok(())
    }

    async fn sign_url(
        &self,
        key: &str,
        expire_seconds: i64,
        _options: &SignOptions,
    ) -> Result<String, OssError> {
        let encoded_key = key
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/");
        let expires = Utc::now().timestamp() + expire_seconds;

        Ok(format!(
            "https://{}.{}/{}?Expires={}",
            self.name, self.endpoint, encoded_key, expires
        ))
    }

    async fn list_objects(&self) -> Result<ListObjectsResult, OssError> {
        let objects = self.objects.read().unwrap_or_else(|e| e.into_inner());
        let objects = objects
            .iter()
            .map(|(key, object)| ObjectMeta {
                key: key.clone(),
                size: object.data.len() as u64,
                last_modified: object.last_modified,
                etag: Some(object.etag.clone()),
            })
            .collect();

        Ok(ListObjectsResult {
            bucket: self.name.clone(),
            objects,
            ..Default::default()
        })
    }

    async fn delete_object(&self, key: &str) -> Result<(), OssError> {
        self.objects
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(key);
        Ok(())
    }
}
