use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotFoundKind {
    Object { container: String, key: String },
    Container { container: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// Missing or empty document, or a locator that cannot name an object.
    Input(String),
    /// Transport failure after the retry budget, or a non-success status.
    RemoteInvocation(String),
    /// The response could not be parsed at either unwrap layer.
    EnvelopeDecode(String),
    /// The response parsed but does not carry what the function promises.
    Contract(String),
    NotFound(NotFoundKind),
    Storage(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatewayErrorKind {
    Input,
    RemoteInvocation,
    EnvelopeDecode,
    Contract,
    NotFound,
    Storage,
}

impl GatewayErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GatewayErrorKind::Input => "input_error",
            GatewayErrorKind::RemoteInvocation => "remote_invocation_error",
            GatewayErrorKind::EnvelopeDecode => "envelope_decode_error",
            GatewayErrorKind::Contract => "contract_error",
            GatewayErrorKind::NotFound => "not_found_error",
            GatewayErrorKind::Storage => "storage_error",
        }
    }

    fn prefix(&self) -> &'static str {
        match self {
            GatewayErrorKind::Input => "input error",
            GatewayErrorKind::RemoteInvocation => "remote invocation error",
            GatewayErrorKind::EnvelopeDecode => "envelope decode error",
            GatewayErrorKind::Contract => "contract error",
            GatewayErrorKind::NotFound => "not found",
            GatewayErrorKind::Storage => "storage error",
        }
    }
}

impl fmt::Display for GatewayErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl GatewayError {
    pub fn kind(&self) -> GatewayErrorKind {
        match self {
            GatewayError::Input(_) => GatewayErrorKind::Input,
            GatewayError::RemoteInvocation(_) => GatewayErrorKind::RemoteInvocation,
            GatewayError::EnvelopeDecode(_) => GatewayErrorKind::EnvelopeDecode,
            GatewayError::Contract(_) => GatewayErrorKind::Contract,
            GatewayError::NotFound(_) => GatewayErrorKind::NotFound,
            GatewayError::Storage(_) => GatewayErrorKind::Storage,
        }
    }

    /// Human-readable detail without the classification prefix.
    pub fn detail(&self) -> &str {
        match self {
            GatewayError::Input(detail)
            | GatewayError::RemoteInvocation(detail)
            | GatewayError::EnvelopeDecode(detail)
            | GatewayError::Contract(detail)
            | GatewayError::Storage(detail) => detail,
            GatewayError::NotFound(NotFoundKind::Object { .. }) => "file does not exist",
            GatewayError::NotFound(NotFoundKind::Container { .. }) => {
                "storage location does not exist"
            }
        }
    }
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind().prefix(), self.detail())
    }
}

impl std::error::Error for GatewayError {}
