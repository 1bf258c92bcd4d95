use crate::gateway::{Gateway, GatewayHealth};

/// One-line summary of a health response.
pub fn describe(health: &GatewayHealth) -> String {
    let invariants = if health.invariants_enforced {
        "invariants enforced"
    } else {
        "invariants NOT enforced"
    };
    format!(
        "{} (v{}, {}) {}",
        health.status, health.version, invariants, health.message
    )
    .trim_end()
    .to_string()
}

pub async fn report(gateway: &dyn Gateway) -> String {
    match gateway.health().await {
        Ok(health) => format!("  {}\n", describe(&health)),
        Err(e) => format!("  ✗ {e}\n"),
    }
}
