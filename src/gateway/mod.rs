pub mod http;
#[cfg(test)]
pub mod mock;

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Coarse sensitivity class sent along with every query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskTier {
    Low,
    #[default]
    Medium,
    High,
}

impl RiskTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Low => "LOW",
            RiskTier::Medium => "MEDIUM",
            RiskTier::High => "HIGH",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LOW" => Ok(RiskTier::Low),
            "MEDIUM" => Ok(RiskTier::Medium),
            "HIGH" => Ok(RiskTier::High),
            other => Err(format!("unknown risk tier: {other}")),
        }
    }
}

/// Why the gateway refused, and what would make the request certifiable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RefusalDiagnostics {
    #[serde(default, deserialize_with = "null_as_default")]
    pub failure_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub details: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub requirements_for_certification: String,
}

/// The gateway's verdict. Exactly one of the two, never both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "authorization")]
pub enum AuthorizationResult {
    #[serde(rename = "GRANTED")]
    Granted {
        #[serde(default, deserialize_with = "null_as_default")]
        response_content: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        certification_id: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        scope: Option<Value>,
        #[serde(default, deserialize_with = "null_as_default")]
        meta: Map<String, Value>,
    },
    #[serde(rename = "DENIED")]
    Denied {
        #[serde(default, deserialize_with = "null_as_default")]
        refusal_diagnostics: RefusalDiagnostics,
        #[serde(default, deserialize_with = "null_as_default")]
        meta: Map<String, Value>,
    },
}

impl AuthorizationResult {
    /// Build a refusal with no metadata.
    pub fn denied(
        failure_type: impl Into<String>,
        details: impl Into<String>,
        requirements: impl Into<String>,
    ) -> Self {
        AuthorizationResult::Denied {
            refusal_diagnostics: RefusalDiagnostics {
                failure_type: failure_type.into(),
                details: details.into(),
                requirements_for_certification: requirements.into(),
            },
            meta: Map::new(),
        }
    }

    pub fn is_granted(&self) -> bool {
        matches!(self, AuthorizationResult::Granted { .. })
    }

    /// Wire label of the verdict (`GRANTED` / `DENIED`).
    pub fn label(&self) -> &'static str {
        match self {
            AuthorizationResult::Granted { .. } => "GRANTED",
            AuthorizationResult::Denied { .. } => "DENIED",
        }
    }
}

/// Treat an explicit JSON `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Response of the gateway's root health route.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GatewayHealth {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub invariants_enforced: bool,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub message: String,
}

/// Ways a gateway call can fail. `Display` is the user-facing message.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GatewayError {
    /// The request never completed (DNS, refused connection, reset).
    #[error("{0}")]
    Transport(String),
    /// The gateway answered with a non-success status.
    #[error("{message}")]
    Rejected { status: u16, message: String },
    /// The gateway answered 2xx but the body is not a result.
    #[error("{0}")]
    Malformed(String),
}

/// The authorization gateway. Could be the real HTTP service or a test script.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Submit one query for authorization.
    async fn verify(
        &self,
        query: &str,
        risk_tier: RiskTier,
    ) -> Result<AuthorizationResult, GatewayError>;

    /// Ask the gateway whether it is online.
    async fn health(&self) -> Result<GatewayHealth, GatewayError>;

    /// Human-readable location of the gateway, for display.
    fn endpoint(&self) -> &str;
}
