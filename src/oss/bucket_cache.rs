use garde::Validate;
use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::oss::{Bucket, BucketProvider, OssError};

/// BucketCache 配置结构体
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, SmartDefault, Validate)]
#[serde(default)]
pub struct BucketCacheConfig {
    /// 初始容量（可选）
    #[garde(skip)]
    pub initial_capacity: Option<usize>,
}

/// bucket 名称到句柄的缓存
///
/// 读锁下查找，写锁下插入；条目只增不删，生命周期与所属客户端相同。
/// 锁只保护内存中的 map，不会跨越任何网络调用。
pub struct BucketCache {
    map: RwLock<HashMap<String, Arc<dyn Bucket>>>,
}

impl BucketCache {
    pub fn new(config: BucketCacheConfig) -> Self {
        let initial_map = match config.initial_capacity {
            Some(capacity) => HashMap::with_capacity(capacity),
            None => HashMap::new(),
        };

        Self {
            map: RwLock::new(initial_map),
        }
    }

    /// 查找已缓存的句柄
    pub fn get(&self, name: &str) -> Option<Arc<dyn Bucket>> {
        // map 中没有跨越多个键的不变量，锁中毒时直接取回数据
        let map = self.map.read().unwrap_or_else(|e| e.into_inner());
        map.get(name).cloned()
    }

    /// 写入句柄，已存在时覆盖
    pub fn set(&self, name: &str, bucket: Arc<dyn Bucket>) {
        let mut map = self.map.write().unwrap_or_else(|e| e.into_inner());
        map.insert(name.to_string(), bucket);
    }

    /// 命中直接返回，否则在锁外创建句柄后写入缓存
    ///
    /// 并发首次访问同一个 bucket 时可能创建多次，后写入的覆盖先写入的。
    /// 创建失败时不写入缓存。
    pub fn get_or_open(
        &self,
        name: &str,
        provider: &dyn BucketProvider,
    ) -> Result<Arc<dyn Bucket>, OssError> {
        if let Some(bucket) = self.get(name) {
            return Ok(bucket);
        }

        let bucket = provider.open_bucket(name)?;
        tracing::debug!(bucket = name, "opened bucket handle");
        self.set(name, Arc::clone(&bucket));
        Ok(bucket)
    }

    pub fn len(&self) -> usize {
        self.map.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for BucketCache {
    fn default() -> Self {
        Self::new(BucketCacheConfig::default())
    }
}

impl From<BucketCacheConfig> for BucketCache {
    fn from(config: BucketCacheConfig) -> Self {
        BucketCache::new(config)
    }
}
