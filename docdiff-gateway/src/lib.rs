//! The two-phase workflow: submit two documents to the remote comparison
//! function and get back a locator, then later resolve that locator against
//! the object store and hand back the stored artifact.

pub mod envelope;
pub mod error;
pub mod retrieval;
pub mod retry;
pub mod submission;

pub use error::{GatewayError, GatewayErrorKind, NotFoundKind};
pub use retrieval::{RetrievalGateway, RetrievedBlob, RESULT_CONTENT_TYPE};
pub use retry::RetryPolicy;
pub use submission::{Document, SubmissionGateway, SubmitRequest, SubmitResponse};
