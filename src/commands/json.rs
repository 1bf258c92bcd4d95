use crate::console::Console;

/// The last result as pretty JSON, in the gateway's wire shape.
pub fn report(console: &Console) -> String {
    match console.result() {
        Some(result) => match serde_json::to_string_pretty(result) {
            Ok(json) => format!("{json}\n"),
            Err(e) => format!("  cannot serialize result: {e}\n"),
        },
        None => "  no result yet\n".to_string(),
    }
}
