use std::path::{Path, PathBuf};

use serde::Deserialize;

pub const DEFAULT_REGION: &str = "cn-northwest-1";
pub const DEFAULT_FUNCTION_NAME: &str = "llm_contract_items_comparison_deviate_project";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DocdiffConfigToml {
    pub server: ServerSection,
    pub remote_function: RemoteFunctionSection,
    pub object_store: ObjectStoreSection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerSection {
    pub host: String,
    pub port: u16,
    pub max_upload_bytes: usize,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            max_upload_bytes: 50 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoteFunctionKind {
    Lambda,
    Http,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RemoteFunctionSection {
    pub kind: RemoteFunctionKind,
    pub function_name: String,
    pub region: String,
    pub url: Option<String>,
    pub connect_timeout_secs: u64,
    pub read_timeout_secs: u64,
    pub max_attempts: u32,
}

impl Default for RemoteFunctionSection {
    fn default() -> Self {
        Self {
            kind: RemoteFunctionKind::Lambda,
            function_name: DEFAULT_FUNCTION_NAME.to_string(),
            region: DEFAULT_REGION.to_string(),
            url: None,
            connect_timeout_secs: 10,
            read_timeout_secs: 180,
            max_attempts: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectStoreKind {
    S3,
    File,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ObjectStoreSection {
    pub kind: ObjectStoreKind,
    pub region: String,
    pub base_path: Option<PathBuf>,
    pub connect_timeout_secs: u64,
    pub read_timeout_secs: u64,
}

impl Default for ObjectStoreSection {
    fn default() -> Self {
        Self {
            kind: ObjectStoreKind::S3,
            region: DEFAULT_REGION.to_string(),
            base_path: None,
            connect_timeout_secs: 10,
            read_timeout_secs: 180,
        }
    }
}

#[derive(Debug)]
pub enum DocdiffConfigError {
    IO(Box<std::io::Error>),
    Toml(Box<toml::de::Error>),
    Invalid(String),
}

impl std::fmt::Display for DocdiffConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocdiffConfigError::IO(e) => write!(f, "failed to read config file: {}", e),
            DocdiffConfigError::Toml(e) => write!(f, "failed to parse config file: {}", e),
            DocdiffConfigError::Invalid(message) => write!(f, "invalid config: {}", message),
        }
    }
}

impl std::error::Error for DocdiffConfigError {}

impl DocdiffConfigToml {
    pub fn from_toml_str(s: &str) -> Result<Self, DocdiffConfigError> {
        let config: DocdiffConfigToml =
            toml::from_str(s).map_err(|e| DocdiffConfigError::Toml(Box::new(e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, DocdiffConfigError> {
        let s = std::fs::read_to_string(path).map_err(|e| DocdiffConfigError::IO(Box::new(e)))?;
        Self::from_toml_str(&s)
    }

    fn validate(&self) -> Result<(), DocdiffConfigError> {
        if self.remote_function.kind == RemoteFunctionKind::Http
            && self.remote_function.url.is_none()
        {
            return Err(DocdiffConfigError::Invalid(
                "remote_function.url is required when kind = \"http\"".to_string(),
            ));
        }
        if self.remote_function.max_attempts == 0 {
            return Err(DocdiffConfigError::Invalid(
                "remote_function.max_attempts must be at least 1".to_string(),
            ));
        }
        if self.object_store.kind == ObjectStoreKind::File && self.object_store.base_path.is_none()
        {
            return Err(DocdiffConfigError::Invalid(
                "object_store.base_path is required when kind = \"file\"".to_string(),
            ));
        }
        Ok(())
    }
}
