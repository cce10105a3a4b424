use crate::{file_store::FileObjectStore, s3::S3ObjectStore, ObjectStoreError, ObjectStoreTrait};

#[derive(Debug, Clone)]
pub enum ObjectStore {
    S3(S3ObjectStore),
    File(FileObjectStore),
}

impl ObjectStoreTrait for ObjectStore {
    async fn get_object(&self, container: &str, key: &str) -> Result<Vec<u8>, ObjectStoreError> {
        match self {
            ObjectStore::S3(store) => store.get_object(container, key).await,
            ObjectStore::File(store) => store.get_object(container, key).await,
        }
    }
}
