use aws_config::{retry::RetryConfig, timeout::TimeoutConfig, BehaviorVersion, Region};
use aws_sdk_s3::{
    error::{DisplayErrorContext, ProvideErrorMetadata, SdkError},
    operation::get_object::GetObjectError,
};

use crate::{ObjectStoreError, ObjectStoreTrait, StoreConfig};

#[derive(Debug, Clone)]
pub struct S3ObjectStore {
    client: aws_sdk_s3::Client,
}

impl S3ObjectStore {
    /// Not-found is not transient, so the SDK retry loop is disabled.
    pub async fn new(region: String, config: &StoreConfig) -> Self {
        let timeout_config = TimeoutConfig::builder()
            .connect_timeout(config.connect_timeout)
            .read_timeout(config.read_timeout)
            .build();
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region))
            .timeout_config(timeout_config)
            .retry_config(RetryConfig::disabled())
            .load()
            .await;
        Self::from_client(aws_sdk_s3::Client::new(&sdk_config))
    }

    pub fn from_client(client: aws_sdk_s3::Client) -> Self {
        Self { client }
    }
}

impl ObjectStoreTrait for S3ObjectStore {
    async fn get_object(&self, container: &str, key: &str) -> Result<Vec<u8>, ObjectStoreError> {
        let output = match self
            .client
            .get_object()
            .bucket(container)
            .key(key)
            .send()
            .await
        {
            Ok(output) => output,
            Err(SdkError::ServiceError(service)) => {
                return Err(classify_get_object_error(service.into_err()))
            }
            Err(error) => {
                return Err(ObjectStoreError::Other(format!(
                    "failed to get object from s3: {}",
                    DisplayErrorContext(&error)
                )))
            }
        };

        let body = output.body.collect().await.map_err(|e| {
            ObjectStoreError::Other(format!("failed to read object body from s3: {}", e))
        })?;
        Ok(body.into_bytes().to_vec())
    }
}

fn classify_get_object_error(error: GetObjectError) -> ObjectStoreError {
    match error {
        GetObjectError::NoSuchKey(_) => ObjectStoreError::NoSuchKey,
        error if error.code() == Some("NoSuchBucket") => ObjectStoreError::NoSuchBucket,
        error => ObjectStoreError::Other(format!(
            "failed to get object from s3: {}",
            DisplayErrorContext(&error)
        )),
    }
}
