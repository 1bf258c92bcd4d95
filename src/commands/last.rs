use crate::console::render::result_panel;
use crate::console::{Console, ViewState};

pub fn report(console: &Console) -> String {
    match console.state() {
        ViewState::Resolved(result) => result_panel(result),
        ViewState::Submitting => "  still authorizing\n".to_string(),
        ViewState::Idle => "  nothing submitted yet\n".to_string(),
    }
}
