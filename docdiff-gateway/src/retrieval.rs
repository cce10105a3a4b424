use docdiff_common::locator::{StorageLocator, StorageLocatorError};
use docdiff_object_store::{ObjectStoreError, ObjectStoreTrait};

use crate::error::{GatewayError, NotFoundKind};

/// The comparison function always renders its result as HTML.
pub const RESULT_CONTENT_TYPE: &str = "text/html";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrievedBlob {
    pub content: Vec<u8>,
    pub filename: String,
    pub content_type: &'static str,
}

impl RetrievedBlob {
    /// `attachment; filename*=UTF-8''<percent-encoded filename>`
    pub fn content_disposition(&self) -> String {
        format!(
            "attachment; filename*=UTF-8''{}",
            urlencoding::encode(&self.filename)
        )
    }
}

#[derive(Debug, Clone)]
pub struct RetrievalGateway<S> {
    object_store: S,
}

impl<S: ObjectStoreTrait> RetrievalGateway<S> {
    pub fn new(object_store: S) -> Self {
        Self { object_store }
    }

    pub fn object_store(&self) -> &S {
        &self.object_store
    }

    pub async fn retrieve(&self, locator: &str) -> Result<RetrievedBlob, GatewayError> {
        let result = self.fetch(locator).await;
        match &result {
            Ok(blob) => log::info!(
                "retrieved {} ({} bytes) for {}",
                blob.filename,
                blob.content.len(),
                locator
            ),
            Err(GatewayError::NotFound(kind)) => {
                log::warn!("retrieval of {} failed: {:?}", locator, kind)
            }
            Err(e) => log::error!("retrieval of {} failed [{}]: {}", locator, e.kind(), e),
        }
        result
    }

    async fn fetch(&self, locator: &str) -> Result<RetrievedBlob, GatewayError> {
        let locator = StorageLocator::parse(locator).map_err(locator_error)?;

        let content = self
            .object_store
            .get_object(&locator.container, &locator.key)
            .await
            .map_err(|e| storage_error(&locator, e))?;

        Ok(RetrievedBlob {
            content,
            filename: locator.file_name().to_string(),
            content_type: RESULT_CONTENT_TYPE,
        })
    }
}

fn locator_error(error: StorageLocatorError) -> GatewayError {
    GatewayError::Input(error.to_string())
}

fn storage_error(locator: &StorageLocator, error: ObjectStoreError) -> GatewayError {
    match error {
        ObjectStoreError::NoSuchKey => GatewayError::NotFound(NotFoundKind::Object {
            container: locator.container.clone(),
            key: locator.key.clone(),
        }),
        ObjectStoreError::NoSuchBucket => GatewayError::NotFound(NotFoundKind::Container {
            container: locator.container.clone(),
        }),
        ObjectStoreError::Other(message) => GatewayError::Storage(message),
    }
}
