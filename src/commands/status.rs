use crate::console::Console;
use crate::console::render::submit_label;

/// Gateway, risk tier, and where the console is in its cycle.
pub fn report(console: &Console) -> String {
    let state = console.state();
    format!(
        "  gateway   {}\n  risk      {}\n  state     {}\n  submit    {}\n  resolved  {}\n",
        console.gateway().endpoint(),
        console.risk_tier(),
        state.name(),
        submit_label(state),
        console.resolved_count(),
    )
}
