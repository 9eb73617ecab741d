//! Uniform envelope returned by every facade operation.

use crate::error::CuratorError;
use serde::Serialize;

/// Outcome of a Curator operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CuratorResponse<T> {
    /// Whether the operation succeeded.
    pub success: bool,
    /// Payload on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Human-readable failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Stable failure code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

impl<T> CuratorResponse<T> {
    /// Wraps a successful payload.
    #[must_use]
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            error_code: None,
        }
    }

    /// Wraps a failure.
    #[must_use]
    pub fn failure(error: &CuratorError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.to_string()),
            error_code: Some(error.code().to_owned()),
        }
    }

    /// Whether the operation succeeded.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.success
    }

    /// Borrows the payload.
    #[must_use]
    pub const fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Consumes the response and returns the payload.
    #[must_use]
    pub fn into_data(self) -> Option<T> {
        self.data
    }

    /// Failure code, if any.
    #[must_use]
    pub fn error_code(&self) -> Option<&str> {
        self.error_code.as_deref()
    }
}

impl<T> From<Result<T, CuratorError>> for CuratorResponse<T> {
    fn from(result: Result<T, CuratorError>) -> Self {
        match result {
            Ok(data) => Self::success(data),
            Err(err) => Self::failure(&err),
        }
    }
}
