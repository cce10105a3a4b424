use std::time::Duration;

pub mod file_store;
pub mod s3;
pub mod store;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectStoreError {
    NoSuchKey,
    NoSuchBucket,
    Other(String),
}

impl std::fmt::Display for ObjectStoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ObjectStoreError::NoSuchKey => write!(f, "no such key"),
            ObjectStoreError::NoSuchBucket => write!(f, "no such bucket"),
            ObjectStoreError::Other(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for ObjectStoreError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            read_timeout: Duration::from_secs(180),
        }
    }
}

#[allow(async_fn_in_trait)]
pub trait ObjectStoreTrait {
    async fn get_object(&self, container: &str, key: &str) -> Result<Vec<u8>, ObjectStoreError>;
}
