//! Invocation contracts attached to a capability.

use super::ParseContractKindError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Surface through which a capability can be invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractKind {
    /// Plain REST endpoint.
    RestApi,
    /// Internal service-oriented API endpoint.
    SoaApi,
    /// MCP tool exposed to agents.
    McpTool,
}

impl ContractKind {
    /// Returns the canonical contract kind name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RestApi => "rest_api",
            Self::SoaApi => "soa_api",
            Self::McpTool => "mcp_tool",
        }
    }
}

impl fmt::Display for ContractKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ContractKind {
    type Error = ParseContractKindError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "rest_api" => Ok(Self::RestApi),
            "soa_api" => Ok(Self::SoaApi),
            "mcp_tool" => Ok(Self::McpTool),
            _ => Err(ParseContractKindError(value.to_owned())),
        }
    }
}

/// How to reach one invocation surface of a capability.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    /// Endpoint path for API contracts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// HTTP method for API contracts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// Tool name for MCP contracts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,
    /// Free-form contract metadata.
    #[serde(default)]
    pub metadata: Value,
}

impl Contract {
    /// Creates an API contract for an endpoint and method.
    #[must_use]
    pub fn endpoint(endpoint: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            endpoint: Some(endpoint.into()),
            method: Some(method.into()),
            ..Self::default()
        }
    }

    /// Creates an MCP tool contract.
    #[must_use]
    pub fn tool(tool_name: impl Into<String>) -> Self {
        Self {
            tool_name: Some(tool_name.into()),
            ..Self::default()
        }
    }

    /// Attaches metadata to the contract.
    #[must_use]
    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = metadata;
        self
    }
}
