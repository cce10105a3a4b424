use serde::{Deserialize, Serialize};

pub const STANDARD_FILE_FIELD: &str = "standard_file";
pub const CUSTOMER_FILE_FIELD: &str = "customer_file";

pub const UPLOAD_SUCCESS_MESSAGE: &str = "contract comparison completed";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadStatus {
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub message: String,
    pub status: UploadStatus,
    pub s3path: String,
}

impl UploadResponse {
    pub fn success(s3path: String) -> Self {
        Self {
            message: UPLOAD_SUCCESS_MESSAGE.to_string(),
            status: UploadStatus::Success,
            s3path,
        }
    }
}
