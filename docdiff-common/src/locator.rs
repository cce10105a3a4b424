//! Locator grammar shared by submission and retrieval.
//!
//! ```text
//! locator        := [scheme-prefix] container "/" key
//! scheme-prefix  := "s3://"
//! container      := token without "/"
//! key            := remainder (may contain "/")
//! ```

use std::fmt;
use std::str::FromStr;

pub const S3_SCHEME_PREFIX: &str = "s3://";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageLocator {
    pub container: String,
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageLocatorError {
    Empty,
    MissingContainer { locator: String },
    MissingKey { locator: String },
}

impl fmt::Display for StorageLocatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageLocatorError::Empty => write!(f, "locator is empty"),
            StorageLocatorError::MissingContainer { locator } => {
                write!(f, "locator `{}` has no container segment", locator)
            }
            StorageLocatorError::MissingKey { locator } => {
                write!(f, "locator `{}` has no key segment", locator)
            }
        }
    }
}

impl std::error::Error for StorageLocatorError {}

impl StorageLocator {
    pub fn new(container: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            container: container.into(),
            key: key.into(),
        }
    }

    /// Removes one leading `s3://` if present.
    pub fn strip_scheme(locator: &str) -> &str {
        locator.strip_prefix(S3_SCHEME_PREFIX).unwrap_or(locator)
    }

    pub fn parse(locator: &str) -> Result<Self, StorageLocatorError> {
        let bare = Self::strip_scheme(locator);
        if bare.is_empty() {
            return Err(StorageLocatorError::Empty);
        }

        let Some((container, key)) = bare.split_once('/') else {
            return Err(StorageLocatorError::MissingKey {
                locator: locator.to_string(),
            });
        };
        if container.is_empty() {
            return Err(StorageLocatorError::MissingContainer {
                locator: locator.to_string(),
            });
        }
        if key.is_empty() {
            return Err(StorageLocatorError::MissingKey {
                locator: locator.to_string(),
            });
        }

        Ok(Self::new(container, key))
    }

    pub fn to_bare(&self) -> String {
        format!("{}/{}", self.container, self.key)
    }

    pub fn to_qualified(&self) -> String {
        format!("{}{}/{}", S3_SCHEME_PREFIX, self.container, self.key)
    }

    /// Last path segment of the key.
    pub fn file_name(&self) -> &str {
        self.key.rsplit('/').next().unwrap_or(&self.key)
    }
}

impl fmt::Display for StorageLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.container, self.key)
    }
}

impl FromStr for StorageLocator {
    type Err = StorageLocatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
