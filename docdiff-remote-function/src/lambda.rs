use aws_config::{retry::RetryConfig, timeout::TimeoutConfig, BehaviorVersion, Region};
use aws_sdk_lambda::{
    error::{DisplayErrorContext, SdkError},
    primitives::Blob,
    types::InvocationType,
};

use crate::{
    InvocationConfig, InvocationEnvelope, InvocationPayload, InvokeError, RemoteFunctionTrait,
};

#[derive(Debug, Clone)]
pub struct LambdaRemoteFunction {
    client: aws_sdk_lambda::Client,
    function_name: String,
}

impl LambdaRemoteFunction {
    /// Retries are left to the caller, so the SDK's own retry loop is off.
    pub async fn new(function_name: String, region: String, config: &InvocationConfig) -> Self {
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
        Self::from_client(aws_sdk_lambda::Client::new(&sdk_config), function_name)
    }

    pub fn from_client(client: aws_sdk_lambda::Client, function_name: String) -> Self {
        Self {
            client,
            function_name,
        }
    }
}

impl RemoteFunctionTrait for LambdaRemoteFunction {
    fn name(&self) -> &str {
        &self.function_name
    }

    async fn invoke(&self, payload: &InvocationPayload) -> Result<InvocationEnvelope, InvokeError> {
        let body = payload.to_json_vec()?;
        log::debug!(
            "invoking lambda {} with {} byte payload",
            self.function_name,
            body.len()
        );

        let output = self
            .client
            .invoke()
            .function_name(&self.function_name)
            .invocation_type(InvocationType::RequestResponse)
            .payload(Blob::new(body))
            .send()
            .await
            .map_err(classify_sdk_error)?;

        Ok(InvocationEnvelope {
            status_code: output.status_code(),
            payload: output
                .payload()
                .map(|blob| blob.as_ref().to_vec())
                .unwrap_or_default(),
            function_error: output.function_error().map(str::to_string),
        })
    }
}

fn classify_sdk_error<E, R>(error: SdkError<E, R>) -> InvokeError
where
    E: std::error::Error + 'static,
    R: std::fmt::Debug,
{
    let is_transport = matches!(error, SdkError::DispatchFailure(_) | SdkError::TimeoutError(_));
    let message = format!("failed to invoke lambda: {}", DisplayErrorContext(&error));
    if is_transport {
        InvokeError::Transport(message)
    } else {
        InvokeError::Failed(message)
    }
}

#[cfg(test)]
mod tests {
    use aws_sdk_lambda::{error::ErrorMetadata, operation::invoke::InvokeError as LambdaInvokeError};
    use aws_smithy_runtime_api::client::result::ConnectorError;

    use super::*;

    type LambdaSdkError = SdkError<LambdaInvokeError, ()>;

    #[test]
    fn test_timeout_is_transport() {
        let error: LambdaSdkError = SdkError::timeout_error("read timed out");
        assert!(classify_sdk_error(error).is_transport());
    }

    #[test]
    fn test_dispatch_failure_is_transport() {
        let io_error = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let error: LambdaSdkError = SdkError::dispatch_failure(ConnectorError::io(io_error.into()));
        assert!(classify_sdk_error(error).is_transport());
    }

    #[test]
    fn test_service_error_is_not_retried() {
        let service_error = LambdaInvokeError::generic(
            ErrorMetadata::builder()
                .code("ResourceNotFoundException")
                .message("Function not found")
                .build(),
        );
        let error: LambdaSdkError = SdkError::service_error(service_error, ());

        let classified = classify_sdk_error(error);
        assert!(!classified.is_transport());
        let InvokeError::Failed(message) = classified else {
            panic!("expected a non-retryable failure");
        };
        assert!(message.starts_with("failed to invoke lambda: "));
    }

    #[test]
    fn test_construction_failure_is_not_retried() {
        let error: LambdaSdkError = SdkError::construction_failure("missing function name");
        assert!(!classify_sdk_error(error).is_transport());
    }
}
