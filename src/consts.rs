//! Project-wide constants.

pub const AUTHOR: &str = env!("CARGO_PKG_AUTHORS");
pub const HOMEPAGE: &str = env!("CARGO_PKG_HOMEPAGE");
pub const REPO: &str = env!("CARGO_PKG_REPOSITORY");

/// Default gateway address when `--gateway` is not given.
pub const DEFAULT_GATEWAY_URL: &str = "http://localhost:8000";

/// Route that adjudicates a query.
pub const VERIFY_PATH: &str = "/verify";

/// Message used when a non-success response carries no readable `detail`.
pub const GATEWAY_FAILURE: &str = "CETI gateway failure";

/// Notification text while a query is in flight.
pub const MSG_SUBMITTING: &str = "Submitting to CETI for authorization...";
pub const MSG_AUTHORIZED: &str = "Authorized";
pub const MSG_REFUSED: &str = "Refused";
/// Used when a gateway error carries an empty message.
pub const MSG_UNREACHABLE: &str = "CETI unreachable";

/// Failure type of the refusal synthesized when the gateway call fails.
pub const NETWORK_ERROR: &str = "network_error";
/// Requirements text of the refusal synthesized when the gateway call fails.
pub const CHECK_CONNECTION: &str = "Check backend connection";
