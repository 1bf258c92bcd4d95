//! The console: one query in flight at a time, one verdict on screen.
//!
//! State moves `Idle -> Submitting -> Resolved`, and a new submission
//! takes `Resolved` back to `Submitting`. Gateway failures never escape
//! [`Console::submit`]; they resolve into a synthesized refusal.

pub mod render;
pub mod toast;

use std::sync::Arc;

use tracing::{debug, info};

use crate::consts::{
    CHECK_CONNECTION, MSG_AUTHORIZED, MSG_REFUSED, MSG_SUBMITTING, MSG_UNREACHABLE,
    NETWORK_ERROR,
};
use crate::gateway::{AuthorizationResult, Gateway, GatewayError, RiskTier};
use toast::{Notification, NotificationSlot, Toaster};

/// Where the console is in its submit cycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ViewState {
    #[default]
    Idle,
    Submitting,
    Resolved(AuthorizationResult),
}

impl ViewState {
    pub fn name(&self) -> &'static str {
        match self {
            ViewState::Idle => "idle",
            ViewState::Submitting => "submitting",
            ViewState::Resolved(_) => "resolved",
        }
    }
}

pub struct Console {
    gateway: Arc<dyn Gateway>,
    toaster: Box<dyn Toaster>,
    risk_tier: RiskTier,
    state: ViewState,
    notification: NotificationSlot,
    resolved: usize,
}

impl Console {
    /// A console at `Idle`, sending every query at the default risk tier.
    pub fn new(gateway: Arc<dyn Gateway>, toaster: Box<dyn Toaster>) -> Self {
        Self {
            gateway,
            toaster,
            risk_tier: RiskTier::default(),
            state: ViewState::Idle,
            notification: NotificationSlot::default(),
            resolved: 0,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn risk_tier(&self) -> RiskTier {
        self.risk_tier
    }

    pub fn gateway(&self) -> &dyn Gateway {
        self.gateway.as_ref()
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.current()
    }

    /// Number of submissions that reached a verdict.
    pub fn resolved_count(&self) -> usize {
        self.resolved
    }

    /// The last verdict, if the console has resolved one.
    pub fn result(&self) -> Option<&AuthorizationResult> {
        match &self.state {
            ViewState::Resolved(result) => Some(result),
            _ => None,
        }
    }

    /// Whether a submission of `query` would be accepted right now.
    pub fn can_submit(&self, query: &str) -> bool {
        self.state != ViewState::Submitting && !query.trim().is_empty()
    }

    /// Enter `Submitting`, dropping any previous result.
    ///
    /// Returns the trimmed query, or `None` when the submission is rejected
    /// (already submitting, or nothing but whitespace).
    pub async fn begin(&mut self, query: &str) -> Option<String> {
        if !self.can_submit(query) {
            debug!(state = self.state.name(), "submission ignored");
            return None;
        }
        self.state = ViewState::Submitting;
        self.notify(Notification::loading(MSG_SUBMITTING)).await;
        Some(query.trim().to_string())
    }

    /// Settle the in-flight submission. Does nothing unless `Submitting`.
    pub async fn settle(
        &mut self,
        outcome: Result<AuthorizationResult, GatewayError>,
    ) -> Option<&AuthorizationResult> {
        if self.state != ViewState::Submitting {
            return None;
        }

        let (result, notification) = match outcome {
            Ok(result) if result.is_granted() => (result, Notification::success(MSG_AUTHORIZED)),
            Ok(result) => (result, Notification::error(MSG_REFUSED)),
            Err(e) => {
                let mut message = e.to_string();
                if message.is_empty() {
                    message = MSG_UNREACHABLE.to_string();
                }
                let refusal =
                    AuthorizationResult::denied(NETWORK_ERROR, message.clone(), CHECK_CONNECTION);
                (refusal, Notification::error(message))
            }
        };

        info!(verdict = result.label(), "query resolved");
        self.state = ViewState::Resolved(result);
        self.resolved += 1;
        self.notify(notification).await;
        self.result()
    }

    /// Submit one query: at most one gateway call, always ending in a verdict.
    pub async fn submit(&mut self, query: &str) -> Option<&AuthorizationResult> {
        let query = self.begin(query).await?;
        let gateway = Arc::clone(&self.gateway);
        let outcome = gateway.verify(&query, self.risk_tier).await;
        self.settle(outcome).await
    }

    async fn notify(&mut self, notification: Notification) {
        let shown = self.notification.replace(notification);
        self.toaster.show(shown).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::mock::MockGateway;
    use toast::{NotificationKind, RecordingToaster};

    fn console_with(
        outcomes: Vec<Result<AuthorizationResult, GatewayError>>,
    ) -> (Console, Arc<MockGateway>, RecordingToaster) {
        let gateway = Arc::new(MockGateway::new(outcomes));
        let toaster = RecordingToaster::new();
        let console = Console::new(gateway.clone(), Box::new(toaster.clone()));
        (console, gateway, toaster)
    }

    fn granted(content: &str) -> AuthorizationResult {
        serde_json::from_value(serde_json::json!({
            "authorization": "GRANTED",
            "response_content": content,
        }))
        .unwrap()
    }

    #[test]
    fn starts_idle() {
        let (console, _, _) = console_with(vec![]);
        assert_eq!(console.state(), &ViewState::Idle);
        assert!(console.notification().is_none());
        assert!(console.result().is_none());
    }

    #[test]
    fn can_submit_rejects_blank() {
        let (console, _, _) = console_with(vec![]);
        assert!(!console.can_submit(""));
        assert!(!console.can_submit("  \n\t"));
        assert!(console.can_submit("hello"));
    }

    #[tokio::test]
    async fn can_submit_false_while_submitting() {
        let (mut console, _, _) = console_with(vec![]);
        console.begin("first").await.unwrap();
        assert!(!console.can_submit("second"));
    }

    #[tokio::test]
    async fn begin_enters_submitting_and_trims() {
        let (mut console, _, toaster) = console_with(vec![]);
        let query = console.begin("  what is up?  ").await;
        assert_eq!(query.as_deref(), Some("what is up?"));
        assert_eq!(console.state(), &ViewState::Submitting);
        assert_eq!(
            toaster.shown(),
            vec![Notification::loading(MSG_SUBMITTING)]
        );
    }

    #[tokio::test]
    async fn begin_while_submitting_is_noop() {
        let (mut console, _, toaster) = console_with(vec![]);
        console.begin("first").await.unwrap();
        assert!(console.begin("second").await.is_none());
        assert_eq!(console.state(), &ViewState::Submitting);
        assert_eq!(toaster.shown().len(), 1);
    }

    #[tokio::test]
    async fn settle_outside_submitting_is_noop() {
        let (mut console, _, toaster) = console_with(vec![]);
        assert!(console.settle(Ok(granted("x"))).await.is_none());
        assert_eq!(console.state(), &ViewState::Idle);
        assert!(toaster.shown().is_empty());
    }

    #[tokio::test]
    async fn blank_submit_makes_no_call() {
        let (mut console, gateway, toaster) = console_with(vec![]);
        assert!(console.submit("   ").await.is_none());
        assert_eq!(gateway.calls(), 0);
        assert_eq!(console.state(), &ViewState::Idle);
        assert!(toaster.shown().is_empty());
    }

    #[tokio::test]
    async fn granted_resolves_with_success() {
        let (mut console, gateway, toaster) = console_with(vec![Ok(granted("X"))]);
        let result = console.submit("q").await.cloned().unwrap();
        assert_eq!(result, granted("X"));
        assert_eq!(console.state(), &ViewState::Resolved(granted("X")));
        assert_eq!(gateway.queries(), vec![("q".to_string(), RiskTier::Medium)]);
        assert_eq!(
            console.notification(),
            Some(&Notification::success(MSG_AUTHORIZED))
        );
        let kinds: Vec<_> = toaster.shown().iter().map(|n| n.kind).collect();
        assert_eq!(kinds, vec![NotificationKind::Loading, NotificationKind::Success]);
    }

    #[tokio::test]
    async fn denied_resolves_with_error() {
        let denied = AuthorizationResult::denied("F", "D", "R");
        let (mut console, _, _) = console_with(vec![Ok(denied.clone())]);
        console.submit("q").await;
        assert_eq!(console.result(), Some(&denied));
        assert_eq!(
            console.notification(),
            Some(&Notification::error(MSG_REFUSED))
        );
    }

    #[tokio::test]
    async fn transport_failure_synthesizes_refusal() {
        let (mut console, _, _) = console_with(vec![Err(GatewayError::Transport(
            "connection refused".to_string(),
        ))]);
        console.submit("q").await;
        assert_eq!(
            console.result(),
            Some(&AuthorizationResult::denied(
                NETWORK_ERROR,
                "connection refused",
                CHECK_CONNECTION
            ))
        );
        assert_eq!(
            console.notification(),
            Some(&Notification::error("connection refused"))
        );
    }

    #[tokio::test]
    async fn rejection_message_reaches_notification() {
        let (mut console, _, _) = console_with(vec![Err(GatewayError::Rejected {
            status: 400,
            message: "bad risk tier".to_string(),
        })]);
        console.submit("q").await;
        assert_eq!(console.notification().unwrap().message, "bad risk tier");
    }

    #[tokio::test]
    async fn empty_error_message_falls_back() {
        let (mut console, _, _) =
            console_with(vec![Err(GatewayError::Transport(String::new()))]);
        console.submit("q").await;
        assert_eq!(console.notification().unwrap().message, MSG_UNREACHABLE);
    }

    #[tokio::test]
    async fn resolved_accepts_next_submission() {
        let (mut console, gateway, _) = console_with(vec![
            Ok(AuthorizationResult::denied("F", "D", "R")),
            Ok(granted("second")),
        ]);
        console.submit("one").await;
        console.submit("two").await;
        assert_eq!(gateway.calls(), 2);
        assert_eq!(console.resolved_count(), 2);
        assert_eq!(console.result(), Some(&granted("second")));
    }

    #[tokio::test]
    async fn begin_from_resolved_clears_result() {
        let (mut console, _, _) = console_with(vec![Ok(granted("old"))]);
        console.submit("one").await;
        console.begin("two").await.unwrap();
        assert!(console.result().is_none());
    }
}
