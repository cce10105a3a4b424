use std::{io::ErrorKind, path::PathBuf};

use crate::{ObjectStoreError, ObjectStoreTrait};

/// Object store backed by a local directory: `<root>/<container>/<key>`.
#[derive(Debug, Clone)]
pub struct FileObjectStore {
    root: PathBuf,
}

impl FileObjectStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn container_path(&self, container: &str) -> Option<PathBuf> {
        if !is_plain_segment(container) {
            return None;
        }
        Some(self.root.join(container))
    }

    fn object_path(&self, container: &str, key: &str) -> Option<PathBuf> {
        let mut path = self.container_path(container)?;
        for segment in key.split('/') {
            if !is_plain_segment(segment) {
                return None;
            }
            path.push(segment);
        }
        Some(path)
    }

    pub fn create_container(&self, container: &str) -> Result<(), ObjectStoreError> {
        let path = self
            .container_path(container)
            .ok_or_else(|| ObjectStoreError::Other(format!("invalid container `{}`", container)))?;
        std::fs::create_dir_all(path).map_err(|e| ObjectStoreError::Other(e.to_string()))
    }

    pub fn put_object(
        &self,
        container: &str,
        key: &str,
        data: &[u8],
    ) -> Result<(), ObjectStoreError> {
        let container_path = self
            .container_path(container)
            .ok_or(ObjectStoreError::NoSuchBucket)?;
        if !container_path.is_dir() {
            return Err(ObjectStoreError::NoSuchBucket);
        }
        let path = self
            .object_path(container, key)
            .ok_or(ObjectStoreError::NoSuchKey)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ObjectStoreError::Other(e.to_string()))?;
        }
        std::fs::write(path, data).map_err(|e| ObjectStoreError::Other(e.to_string()))
    }
}

// Rejects segments that would escape the container or alias another key.
fn is_plain_segment(segment: &str) -> bool {
    !segment.is_empty() && segment != "." && segment != ".." && !segment.contains('\\')
}

impl ObjectStoreTrait for FileObjectStore {
    async fn get_object(&self, container: &str, key: &str) -> Result<Vec<u8>, ObjectStoreError> {
        let container_path = self
            .container_path(container)
            .ok_or(ObjectStoreError::NoSuchBucket)?;
        if !tokio::fs::metadata(&container_path)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false)
        {
            return Err(ObjectStoreError::NoSuchBucket);
        }

        let path = self
            .object_path(container, key)
            .ok_or(ObjectStoreError::NoSuchKey)?;
        log::debug!("reading object from {}", path.display());

        match tokio::fs::read(&path).await {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(ObjectStoreError::NoSuchKey),
            // A directory, or a path running through a file: no object under this key.
            Err(_) if !path.is_file() => Err(ObjectStoreError::NoSuchKey),
            Err(e) => Err(ObjectStoreError::Other(format!(
                "failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }
}
