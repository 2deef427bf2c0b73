pub mod memory;

use async_trait::async_trait;
use bytes::Bytes;

pub use crate::errors::StorageError;
pub use memory::InMemoryObjectStore;

/// ストレージから取得したオブジェクト
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub body: Bytes,
    /// ストレージが返した Content-Type（出力側へは引き継がない）
    pub content_type: Option<String>,
}

/// オブジェクトストレージの読み書き
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// オブジェクト本体を全てメモリに読み込む
    async fn get_object(&self, bucket: &str, key: &str) -> Result<StoredObject, StorageError>;

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> Result<(), StorageError>;
}
