use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use docdiff_gateway::{
    Document, GatewayError, NotFoundKind, RetrievalGateway, RetryPolicy, SubmissionGateway,
    SubmitRequest, RESULT_CONTENT_TYPE,
};
use docdiff_object_store::{ObjectStoreError, ObjectStoreTrait};
use docdiff_remote_function::{
    decode_document, InvocationEnvelope, InvocationPayload, InvokeError, RemoteFunctionTrait,
};

#[derive(Default)]
struct ScriptedFunction {
    responses: Mutex<VecDeque<Result<InvocationEnvelope, InvokeError>>>,
    payloads: Mutex<Vec<InvocationPayload>>,
}

impl ScriptedFunction {
    fn new(responses: Vec<Result<InvocationEnvelope, InvokeError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            payloads: Mutex::new(vec![]),
        }
    }

    fn calls(&self) -> usize {
        self.payloads.lock().unwrap().len()
    }
}

impl RemoteFunctionTrait for ScriptedFunction {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn invoke(&self, payload: &InvocationPayload) -> Result<InvocationEnvelope, InvokeError> {
        self.payloads.lock().unwrap().push(payload.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected invocation")
    }
}

#[derive(Default)]
struct MemoryStore {
    objects: HashMap<(String, String), Vec<u8>>,
    containers: Vec<String>,
    failure: Option<String>,
    requests: Mutex<Vec<(String, String)>>,
}

impl MemoryStore {
    fn with_object(container: &str, key: &str, data: &[u8]) -> Self {
        let mut store = MemoryStore::default();
        store.containers.push(container.to_string());
        store
            .objects
            .insert((container.to_string(), key.to_string()), data.to_vec());
        store
    }

    fn requests(&self) -> Vec<(String, String)> {
        self.requests.lock().unwrap().clone()
    }
}

impl ObjectStoreTrait for MemoryStore {
    async fn get_object(&self, container: &str, key: &str) -> Result<Vec<u8>, ObjectStoreError> {
        self.requests
            .lock()
            .unwrap()
            .push((container.to_string(), key.to_string()));
        if let Some(message) = &self.failure {
            return Err(ObjectStoreError::Other(message.clone()));
        }
        if !self.containers.iter().any(|c| c == container) {
            return Err(ObjectStoreError::NoSuchBucket);
        }
        self.objects
            .get(&(container.to_string(), key.to_string()))
            .cloned()
            .ok_or(ObjectStoreError::NoSuchKey)
    }
}

fn ok_envelope(payload: &str) -> Result<InvocationEnvelope, InvokeError> {
    Ok(InvocationEnvelope {
        status_code: 200,
        payload: payload.as_bytes().to_vec(),
        function_error: None,
    })
}

fn transport_error() -> Result<InvocationEnvelope, InvokeError> {
    Err(InvokeError::Transport("connection refused".to_string()))
}

fn request(standard: &[u8], customer: &[u8]) -> SubmitRequest {
    SubmitRequest {
        standard: Document::new("standard.docx", standard.to_vec()),
        customer: Document::new("customer.docx", customer.to_vec()),
    }
}

fn submission(
    responses: Vec<Result<InvocationEnvelope, InvokeError>>,
) -> SubmissionGateway<ScriptedFunction> {
    SubmissionGateway::new(
        ScriptedFunction::new(responses),
        RetryPolicy::without_backoff(3),
    )
}

const SUCCESS: &str = r#"{"statusCode":200, "body": "{\"s3path\":\"bucket/dir/file.html\"}"}"#;

#[tokio::test]
async fn test_submit_returns_locator() {
    let gateway = submission(vec![ok_envelope(SUCCESS)]);
    let res = gateway
        .submit(request(b"standard contract", b"customer contract"))
        .await
        .unwrap();
    assert_eq!(res.locator, "bucket/dir/file.html");

    let payloads = gateway.remote_function().payloads.lock().unwrap().clone();
    assert_eq!(payloads.len(), 1);
    assert_eq!(
        decode_document(&payloads[0].standard_contract_file_base64).unwrap(),
        b"standard contract"
    );
    assert_eq!(
        decode_document(&payloads[0].customer_contract_file_base64).unwrap(),
        b"customer contract"
    );
}

#[tokio::test]
async fn test_submit_rejects_empty_documents_before_invoking() {
    let gateway = submission(vec![]);

    let err = gateway.submit(request(b"", b"customer")).await.unwrap_err();
    assert!(matches!(err, GatewayError::Input(_)));
    let err = gateway.submit(request(b"standard", b"")).await.unwrap_err();
    assert!(matches!(err, GatewayError::Input(_)));

    assert_eq!(gateway.remote_function().calls(), 0);
}

#[tokio::test]
async fn test_submit_error_status_is_not_retried() {
    let gateway = submission(vec![Ok(InvocationEnvelope {
        status_code: 500,
        payload: vec![],
        function_error: None,
    })]);
    let err = gateway.submit(request(b"a", b"b")).await.unwrap_err();
    assert!(matches!(err, GatewayError::RemoteInvocation(_)));
    assert_eq!(gateway.remote_function().calls(), 1);
}

#[tokio::test]
async fn test_submit_inner_error_status() {
    let gateway = submission(vec![ok_envelope(
        r#"{"statusCode":500,"body":"{\"error\":\"model unavailable\"}"}"#,
    )]);
    let err = gateway.submit(request(b"a", b"b")).await.unwrap_err();
    assert!(matches!(err, GatewayError::RemoteInvocation(_)));
}

#[tokio::test]
async fn test_submit_missing_locator_is_contract_error_and_not_retried() {
    let gateway = submission(vec![ok_envelope(
        r#"{"statusCode":200,"body":"{\"summary\":\"done\"}"}"#,
    )]);
    let err = gateway.submit(request(b"a", b"b")).await.unwrap_err();
    assert_eq!(
        err,
        GatewayError::Contract("remote function succeeded but returned no locator".to_string())
    );
    assert_eq!(gateway.remote_function().calls(), 1);
}

#[tokio::test]
async fn test_submit_undecodable_response() {
    let gateway = submission(vec![ok_envelope(r#"{"body":"{broken"}"#)]);
    let err = gateway.submit(request(b"a", b"b")).await.unwrap_err();
    assert!(matches!(err, GatewayError::EnvelopeDecode(_)));
    assert_eq!(gateway.remote_function().calls(), 1);
}

#[tokio::test]
async fn test_submit_retries_transport_failures() {
    let gateway = submission(vec![
        transport_error(),
        transport_error(),
        ok_envelope(SUCCESS),
    ]);
    let res = gateway.submit(request(b"a", b"b")).await.unwrap();
    assert_eq!(res.locator, "bucket/dir/file.html");
    assert_eq!(gateway.remote_function().calls(), 3);
}

#[tokio::test]
async fn test_submit_gives_up_after_retry_budget() {
    let gateway = submission(vec![
        transport_error(),
        transport_error(),
        transport_error(),
        ok_envelope(SUCCESS),
    ]);
    let err = gateway.submit(request(b"a", b"b")).await.unwrap_err();
    insta::assert_snapshot!(
        err,
        @"remote invocation error: transport failure: connection refused (gave up after 3 attempts)"
    );
    assert_eq!(gateway.remote_function().calls(), 3);
}

#[tokio::test]
async fn test_submit_does_not_retry_rejected_call() {
    let gateway = submission(vec![
        Err(InvokeError::Failed("function not found".to_string())),
        ok_envelope(SUCCESS),
    ]);
    let err = gateway.submit(request(b"a", b"b")).await.unwrap_err();
    assert_eq!(
        err,
        GatewayError::RemoteInvocation("function not found".to_string())
    );
    assert_eq!(gateway.remote_function().calls(), 1);
}

#[tokio::test]
async fn test_retrieve_blob() {
    let gateway = RetrievalGateway::new(MemoryStore::with_object(
        "my-bucket",
        "a/b/report.html",
        b"<html>diff</html>",
    ));
    let blob = gateway
        .retrieve("s3://my-bucket/a/b/report.html")
        .await
        .unwrap();
    assert_eq!(blob.content, b"<html>diff</html>");
    assert_eq!(blob.filename, "report.html");
    assert_eq!(blob.content_type, RESULT_CONTENT_TYPE);
    assert_eq!(
        blob.content_disposition(),
        "attachment; filename*=UTF-8''report.html"
    );
}

#[tokio::test]
async fn test_retrieve_missing_key() {
    let gateway = RetrievalGateway::new(MemoryStore::with_object("my-bucket", "other", b"x"));
    let err = gateway
        .retrieve("s3://my-bucket/a/b/report.html")
        .await
        .unwrap_err();
    assert_eq!(
        gateway.object_store().requests(),
        vec![("my-bucket".to_string(), "a/b/report.html".to_string())]
    );
    assert_eq!(
        err,
        GatewayError::NotFound(NotFoundKind::Object {
            container: "my-bucket".to_string(),
            key: "a/b/report.html".to_string(),
        })
    );
}

#[tokio::test]
async fn test_retrieve_missing_container() {
    let gateway = RetrievalGateway::new(MemoryStore::default());
    let err = gateway.retrieve("nope/report.html").await.unwrap_err();
    assert_eq!(
        err,
        GatewayError::NotFound(NotFoundKind::Container {
            container: "nope".to_string(),
        })
    );
}

#[tokio::test]
async fn test_retrieve_locator_without_key() {
    let gateway = RetrievalGateway::new(MemoryStore::default());
    let err = gateway.retrieve("s3://bucket-only").await.unwrap_err();
    assert!(matches!(err, GatewayError::Input(_)));
    assert!(gateway.object_store().requests().is_empty());
}

#[tokio::test]
async fn test_retrieve_other_storage_failure() {
    let store = MemoryStore {
        failure: Some("Access Denied".to_string()),
        ..MemoryStore::default()
    };
    let gateway = RetrievalGateway::new(store);
    let err = gateway.retrieve("bucket/key.html").await.unwrap_err();
    insta::assert_snapshot!(err, @"storage error: Access Denied");
}

#[tokio::test]
async fn test_submitted_locator_is_retrievable() {
    let submission = submission(vec![ok_envelope(
        r#"{"statusCode":200,"body":{"s3path":"s3://results/2025/03/合同条款偏离结果.html"}}"#,
    )]);
    let locator = submission
        .submit(request(b"a", b"b"))
        .await
        .unwrap()
        .locator;

    let retrieval = RetrievalGateway::new(MemoryStore::with_object(
        "results",
        "2025/03/合同条款偏离结果.html",
        b"<html></html>",
    ));
    let blob = retrieval.retrieve(&locator).await.unwrap();
    assert_eq!(blob.filename, "合同条款偏离结果.html");
}
