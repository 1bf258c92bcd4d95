//! Text rendering of the console, exhaustive over [`ViewState`].

use super::ViewState;
use crate::gateway::AuthorizationResult;

const RULE_WIDTH: usize = 60;

/// Label of the submit control for the current state.
pub fn submit_label(state: &ViewState) -> &'static str {
    match state {
        ViewState::Submitting => "Authorizing...",
        ViewState::Idle | ViewState::Resolved(_) => "Submit to CETI",
    }
}

/// The input prompt, marked when submission is disabled.
pub fn prompt(state: &ViewState) -> &'static str {
    match state {
        ViewState::Submitting => "ceti (busy)> ",
        ViewState::Idle | ViewState::Resolved(_) => "ceti> ",
    }
}

/// Render the whole view. Only `Resolved` has a result panel.
pub fn render(state: &ViewState) -> String {
    match state {
        ViewState::Idle => String::new(),
        ViewState::Submitting => format!("[{}]\n", submit_label(state)),
        ViewState::Resolved(result) => result_panel(result),
    }
}

/// The result panel. Granted content is printed verbatim.
pub fn result_panel(result: &AuthorizationResult) -> String {
    let rule = "-".repeat(RULE_WIDTH);
    let mut out = String::new();
    out.push_str(&"=".repeat(RULE_WIDTH));
    out.push('\n');
    out.push_str(&format!(
        "Authorization Result{:>width$}\n",
        format!("[{}]", result.label()),
        width = RULE_WIDTH - "Authorization Result".len()
    ));
    out.push_str(&rule);
    out.push('\n');

    match result {
        AuthorizationResult::Granted {
            response_content,
            certification_id,
            ..
        } => {
            out.push_str(response_content);
            if !response_content.ends_with('\n') {
                out.push('\n');
            }
            if let Some(id) = certification_id {
                out.push_str(&rule);
                out.push('\n');
                out.push_str(&format!("Certification ID: {id}\n"));
            }
        }
        AuthorizationResult::Denied {
            refusal_diagnostics: diag,
            ..
        } => {
            out.push_str("Refusal Triggered\n");
            out.push_str(&format!("  {}\n", diag.failure_type));
            out.push_str(&format!("  {}\n", diag.details));
            out.push_str(&rule);
            out.push('\n');
            out.push_str("Requirements for future authorization:\n");
            out.push_str(&format!("  {}\n", diag.requirements_for_certification));
        }
    }

    out.push_str(&"=".repeat(RULE_WIDTH));
    out.push('\n');
    out
}
