use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{AuthorizationResult, Gateway, GatewayError, GatewayHealth, RiskTier};
use crate::consts::{GATEWAY_FAILURE, VERIFY_PATH};

/// The CETI gateway reached over HTTP.
///
/// One POST per query. No retries and no client-side timeout: a hung
/// request stays pending until the transport gives up.
pub struct HttpGateway {
    base_url: String,
    client: reqwest::Client,
}

impl HttpGateway {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn verify_url(&self) -> String {
        format!("{}{}", self.base_url, VERIFY_PATH)
    }

    fn health_url(&self) -> String {
        format!("{}/", self.base_url)
    }

    /// Pull `detail` out of an error body, falling back to a generic message.
    fn rejection_message(body: &str) -> String {
        serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.detail)
            .and_then(|d| match d {
                serde_json::Value::String(s) if !s.is_empty() => Some(s),
                _ => None,
            })
            .unwrap_or_else(|| GATEWAY_FAILURE.to_string())
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn verify(
        &self,
        query: &str,
        risk_tier: RiskTier,
    ) -> Result<AuthorizationResult, GatewayError> {
        let url = self.verify_url();
        debug!(%url, %risk_tier, "submitting query");

        let body = VerifyRequest { query, risk_tier };
        let resp = self
            .client
            .post(&url)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "gateway unreachable");
                GatewayError::Transport(e.to_string())
            })?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        if !status.is_success() {
            let message = Self::rejection_message(&text);
            warn!(status = status.as_u16(), %message, "gateway rejected query");
            return Err(GatewayError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let result: AuthorizationResult = serde_json::from_str(&text).map_err(|e| {
            warn!(error = %e, "gateway returned malformed result");
            GatewayError::Malformed(format!("malformed gateway response: {e}"))
        })?;
        debug!(verdict = result.label(), "gateway answered");
        Ok(result)
    }

    async fn health(&self) -> Result<GatewayHealth, GatewayError> {
        let resp = self
            .client
            .get(self.health_url())
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(GatewayError::Rejected {
                status: status.as_u16(),
                message: Self::rejection_message(&text),
            });
        }

        serde_json::from_str(&text)
            .map_err(|e| GatewayError::Malformed(format!("malformed health response: {e}")))
    }

    fn endpoint(&self) -> &str {
        &self.base_url
    }
}

// --- Wire types ---

#[derive(Serialize)]
struct VerifyRequest<'a> {
    query: &'a str,
    risk_tier: RiskTier,
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}
