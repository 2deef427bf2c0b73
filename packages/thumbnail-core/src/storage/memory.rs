use std::collections::HashMap;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::RwLock;

use super::{ObjectStore, StoredObject};
use crate::errors::StorageError;

/// メモリ上の ObjectStore 実装
///
/// テストやローカル実行向け。`deny_read` に登録したバケットへの読み込みは
/// `StorageError::Forbidden` になる
#[derive(Debug, Default)]
pub struct InMemoryObjectStore {
    objects: RwLock<HashMap<(String, String), StoredObject>>,
    denied_buckets: RwLock<Vec<String>>,
}

impl InMemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(
        &self,
        bucket: &str,
        key: &str,
        body: impl Into<Bytes>,
        content_type: Option<&str>,
    ) {
        self.objects.write().await.insert(
            (bucket.to_string(), key.to_string()),
            StoredObject {
                body: body.into(),
                content_type: content_type.map(str::to_string),
            },
        );
    }

    /// 指定バケットへのアクセスを拒否する
    pub async fn deny_read(&self, bucket: &str) {
        self.denied_buckets.write().await.push(bucket.to_string());
    }

    pub async fn get(&self, bucket: &str, key: &str) -> Option<StoredObject> {
        self.objects
            .read()
            .await
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
    }

    /// 指定バケット内のキー一覧（ソート済み）
    pub async fn keys(&self, bucket: &str) -> Vec<String> {
        let mut keys: Vec<String> = self
            .objects
            .read()
            .await
            .keys()
            .filter(|(b, _)| b == bucket)
            .map(|(_, k)| k.clone())
            .collect();
        keys.sort();
        keys
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn get_object(&self, bucket: &str, key: &str) -> Result<StoredObject, StorageError> {
        if self.denied_buckets.read().await.iter().any(|b| b == bucket) {
            return Err(StorageError::Forbidden {
                bucket: bucket.to_string(),
                key: key.to_string(),
            });
        }

        self.get(bucket, key)
            .await
            .ok_or_else(|| StorageError::NotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            })
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> Result<(), StorageError> {
        self.insert(bucket, key, body, Some(content_type)).await;
        Ok(())
    }
}
