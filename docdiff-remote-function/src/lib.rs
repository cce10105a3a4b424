//! Outbound side of the submission phase: the remote comparison function.
//!
//! The function is a black box that takes two base64-encoded documents and
//! answers with a status code plus an opaque payload. Backends report the
//! raw [`InvocationEnvelope`]; interpreting it is the gateway's job.

use std::time::Duration;

use base64::prelude::*;
use serde::{Deserialize, Serialize};

pub mod function;
pub mod http;
pub mod lambda;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationPayload {
    pub standard_contract_file_base64: String,
    pub customer_contract_file_base64: String,
}

impl InvocationPayload {
    pub fn from_documents(standard: &[u8], customer: &[u8]) -> Self {
        Self {
            standard_contract_file_base64: encode_document(standard),
            customer_contract_file_base64: encode_document(customer),
        }
    }

    pub fn to_json_vec(&self) -> Result<Vec<u8>, InvokeError> {
        serde_json::to_vec(self)
            .map_err(|e| InvokeError::Failed(format!("failed to serialize payload: {}", e)))
    }
}

pub fn encode_document(content: &[u8]) -> String {
    BASE64_STANDARD.encode(content)
}

pub fn decode_document(encoded: &str) -> Result<Vec<u8>, base64::DecodeError> {
    BASE64_STANDARD.decode(encoded)
}

/// Raw result of one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationEnvelope {
    pub status_code: i32,
    pub payload: Vec<u8>,
    /// Set when the function ran but raised (Lambda's `FunctionError`).
    pub function_error: Option<String>,
}

impl InvocationEnvelope {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvokeError {
    /// The call never completed at the transport level; safe to retry.
    Transport(String),
    /// The function was reached but refused or failed the call, e.g. an
    /// unknown function name or missing permission; never retried.
    Failed(String),
}

impl InvokeError {
    pub fn is_transport(&self) -> bool {
        matches!(self, InvokeError::Transport(_))
    }
}

impl std::fmt::Display for InvokeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvokeError::Transport(message) => write!(f, "transport failure: {}", message),
            InvokeError::Failed(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for InvokeError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvocationConfig {
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
}

impl Default for InvocationConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            read_timeout: Duration::from_secs(180),
        }
    }
}

#[allow(async_fn_in_trait)]
pub trait RemoteFunctionTrait {
    fn name(&self) -> &str;

    async fn invoke(&self, payload: &InvocationPayload) -> Result<InvocationEnvelope, InvokeError>;
}
