use docdiff_gateway::{RetrievalGateway, RetryPolicy, SubmissionGateway};
use docdiff_object_store::store::ObjectStore;
use docdiff_remote_function::function::RemoteFunction;

#[derive(Debug, Clone)]
pub struct ApiState {
    pub submission: SubmissionGateway<RemoteFunction>,
    pub retrieval: RetrievalGateway<ObjectStore>,
    pub max_upload_bytes: usize,
}

impl ApiState {
    pub fn new(
        remote_function: RemoteFunction,
        retry_policy: RetryPolicy,
        object_store: ObjectStore,
        max_upload_bytes: usize,
    ) -> Self {
        Self {
            submission: SubmissionGateway::new(remote_function, retry_policy),
            retrieval: RetrievalGateway::new(object_store),
            max_upload_bytes,
        }
    }
}
