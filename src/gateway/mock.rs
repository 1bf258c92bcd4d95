use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{AuthorizationResult, Gateway, GatewayError, GatewayHealth, RiskTier};

/// A scripted gateway for tests. Returns pre-defined outcomes in order
/// and records every query it was asked to verify.
pub struct MockGateway {
    outcomes: Vec<Result<AuthorizationResult, GatewayError>>,
    index: AtomicUsize,
    seen: Mutex<Vec<(String, RiskTier)>>,
}

impl MockGateway {
    pub fn new(outcomes: Vec<Result<AuthorizationResult, GatewayError>>) -> Self {
        Self {
            outcomes,
            index: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    /// Number of `verify` calls so far.
    pub fn calls(&self) -> usize {
        self.index.load(Ordering::SeqCst)
    }

    /// Queries received, in order.
    pub fn queries(&self) -> Vec<(String, RiskTier)> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Gateway for MockGateway {
    async fn verify(
        &self,
        query: &str,
        risk_tier: RiskTier,
    ) -> Result<AuthorizationResult, GatewayError> {
        self.seen
            .lock()
            .unwrap()
            .push((query.to_string(), risk_tier));
        let i = self.index.fetch_add(1, Ordering::SeqCst);
        self.outcomes.get(i).cloned().unwrap_or_else(|| {
            Err(GatewayError::Transport(format!(
                "MockGateway: no more outcomes (called {} times)",
                i + 1
            )))
        })
    }

    async fn health(&self) -> Result<GatewayHealth, GatewayError> {
        Ok(GatewayHealth {
            status: "CETI online".to_string(),
            invariants_enforced: true,
            version: "mock".to_string(),
            message: "scripted".to_string(),
        })
    }

    fn endpoint(&self) -> &str {
        "mock://ceti"
    }
}
