use docdiff_remote_function::{InvocationEnvelope, InvocationPayload, RemoteFunctionTrait};
use serde_json::Value;

use crate::{envelope::unwrap_envelope, error::GatewayError, retry::RetryPolicy};

#[derive(Debug, Clone)]
pub struct Document {
    pub name: String,
    pub content: Vec<u8>,
}

impl Document {
    pub fn new(name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SubmitRequest {
    pub standard: Document,
    pub customer: Document,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitResponse {
    pub locator: String,
}

#[derive(Debug, Clone)]
pub struct SubmissionGateway<F> {
    remote_function: F,
    retry_policy: RetryPolicy,
}

impl<F: RemoteFunctionTrait> SubmissionGateway<F> {
    pub fn new(remote_function: F, retry_policy: RetryPolicy) -> Self {
        Self {
            remote_function,
            retry_policy,
        }
    }

    pub fn remote_function(&self) -> &F {
        &self.remote_function
    }

    pub async fn submit(&self, request: SubmitRequest) -> Result<SubmitResponse, GatewayError> {
        let result = self.submit_documents(&request).await;
        match &result {
            Ok(res) => log::info!(
                "comparison of {} ({} bytes) and {} ({} bytes) stored at {}",
                request.standard.name,
                request.standard.content.len(),
                request.customer.name,
                request.customer.content.len(),
                res.locator
            ),
            Err(e) => log::error!("submission failed [{}]: {}", e.kind(), e),
        }
        result
    }

    async fn submit_documents(
        &self,
        request: &SubmitRequest,
    ) -> Result<SubmitResponse, GatewayError> {
        check_document("standard", &request.standard)?;
        check_document("customer", &request.customer)?;

        let payload =
            InvocationPayload::from_documents(&request.standard.content, &request.customer.content);
        let envelope = self.invoke_with_retry(&payload).await?;
        let locator = interpret_envelope(&envelope)?;
        Ok(SubmitResponse { locator })
    }

    async fn invoke_with_retry(
        &self,
        payload: &InvocationPayload,
    ) -> Result<InvocationEnvelope, GatewayError> {
        let max_attempts = self.retry_policy.max_attempts.max(1);
        let mut attempt = 0;
        loop {
            attempt += 1;
            let err = match self.remote_function.invoke(payload).await {
                Ok(envelope) => return Ok(envelope),
                Err(err) => err,
            };

            if !err.is_transport() {
                return Err(GatewayError::RemoteInvocation(err.to_string()));
            }
            if attempt >= max_attempts {
                return Err(GatewayError::RemoteInvocation(format!(
                    "{} (gave up after {} attempts)",
                    err, attempt
                )));
            }

            let backoff = self
                .retry_policy
                .compute_backoff(attempt, &mut rand::thread_rng());
            log::warn!(
                "invocation of {} failed on attempt {}/{}, retrying in {:?}: {}",
                self.remote_function.name(),
                attempt,
                max_attempts,
                backoff,
                err
            );
            tokio::time::sleep(backoff).await;
        }
    }
}

fn check_document(role: &str, document: &Document) -> Result<(), GatewayError> {
    if document.content.is_empty() {
        return Err(GatewayError::Input(format!(
            "{} document `{}` is missing or empty",
            role, document.name
        )));
    }
    Ok(())
}

/// Turns a completed invocation into the locator it carries.
pub fn interpret_envelope(envelope: &InvocationEnvelope) -> Result<String, GatewayError> {
    if let Some(function_error) = &envelope.function_error {
        let message = serde_json::from_slice::<Value>(&envelope.payload)
            .ok()
            .and_then(|v| v.get("errorMessage").and_then(Value::as_str).map(str::to_string));
        return Err(GatewayError::RemoteInvocation(match message {
            Some(message) => format!("remote function raised ({}): {}", function_error, message),
            None => format!("remote function raised ({})", function_error),
        }));
    }
    if !envelope.is_success() {
        return Err(GatewayError::RemoteInvocation(format!(
            "remote function returned status {}",
            envelope.status_code
        )));
    }

    let result = unwrap_envelope(&envelope.payload)?;
    let locator = result.locator().ok_or_else(|| {
        GatewayError::Contract("remote function succeeded but returned no locator".to_string())
    })?;
    Ok(locator.to_string())
}
