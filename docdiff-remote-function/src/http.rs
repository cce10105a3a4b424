use std::io::Read;

use crate::{
    InvocationConfig, InvocationEnvelope, InvocationPayload, InvokeError, RemoteFunctionTrait,
};

pub const FUNCTION_ERROR_HEADER: &str = "X-Amz-Function-Error";

/// Invokes a function exposed over plain HTTP, e.g. a function URL or a
/// local runtime emulator.
#[derive(Clone)]
pub struct HttpRemoteFunction {
    agent: ureq::Agent,
    url: String,
}

impl std::fmt::Debug for HttpRemoteFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpRemoteFunction")
            .field("url", &self.url)
            .finish()
    }
}

impl HttpRemoteFunction {
    pub fn new(url: String, config: &InvocationConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(config.connect_timeout)
            .timeout_read(config.read_timeout)
            .build();
        Self { agent, url }
    }
}

impl RemoteFunctionTrait for HttpRemoteFunction {
    fn name(&self) -> &str {
        &self.url
    }

    async fn invoke(&self, payload: &InvocationPayload) -> Result<InvocationEnvelope, InvokeError> {
        let body = payload.to_json_vec()?;
        let agent = self.agent.clone();
        let url = self.url.clone();
        log::debug!("posting {} byte payload to {}", body.len(), url);

        tokio::task::spawn_blocking(move || post_payload(&agent, &url, &body))
            .await
            .map_err(|e| InvokeError::Failed(format!("invocation task failed: {}", e)))?
    }
}

fn post_payload(
    agent: &ureq::Agent,
    url: &str,
    body: &[u8],
) -> Result<InvocationEnvelope, InvokeError> {
    let response = match agent
        .post(url)
        .set("Content-Type", "application/json")
        .send_bytes(body)
    {
        Ok(response) => response,
        // Non-2xx still carries an envelope; the gateway decides what it means.
        Err(ureq::Error::Status(_, response)) => response,
        Err(ureq::Error::Transport(transport)) => {
            return Err(InvokeError::Transport(format!(
                "failed to reach {}: {}",
                url, transport
            )))
        }
    };
    read_envelope(response)
}

fn read_envelope(response: ureq::Response) -> Result<InvocationEnvelope, InvokeError> {
    let status_code = i32::from(response.status());
    let function_error = response.header(FUNCTION_ERROR_HEADER).map(str::to_string);
    let mut payload = Vec::new();
    response
        .into_reader()
        .read_to_end(&mut payload)
        .map_err(|e| InvokeError::Failed(format!("failed to read response body: {}", e)))?;
    Ok(InvocationEnvelope {
        status_code,
        payload,
        function_error,
    })
}
