//! Slash commands understood at the console prompt.
//!
//! Every command reads the [`Console`] it runs against and answers with
//! text for the REPL to print. Input that is not a command is a query.

mod health;
mod json;
mod last;
mod status;

pub use health::describe as describe_health;

use crate::console::Console;

/// The built-in commands, in `/help` order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Help,
    Status,
    Last,
    Json,
    Health,
    Quit,
}

const BUILTINS: [Builtin; 6] = [
    Builtin::Help,
    Builtin::Status,
    Builtin::Last,
    Builtin::Json,
    Builtin::Health,
    Builtin::Quit,
];

/// What the REPL should do with a line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    /// Not a command, submit the input as a query.
    NotACommand,
    /// Print this and prompt again.
    Output(String),
    /// Exit the REPL.
    Quit,
}

impl Builtin {
    /// Primary name first, then aliases.
    fn triggers(self) -> &'static [&'static str] {
        match self {
            Builtin::Help => &["/help", "/h", "/?"],
            Builtin::Status => &["/status"],
            Builtin::Last => &["/last"],
            Builtin::Json => &["/json"],
            Builtin::Health => &["/health"],
            Builtin::Quit => &["/quit", "/exit", "quit", "exit"],
        }
    }

    fn description(self) -> &'static str {
        match self {
            Builtin::Help => "show this help",
            Builtin::Status => "show gateway, risk tier, and console state",
            Builtin::Last => "show the last authorization result again",
            Builtin::Json => "print the last result as the gateway's JSON",
            Builtin::Health => "check that the gateway is online",
            Builtin::Quit => "exit the console",
        }
    }

    /// `/help (/h, /?)` style label.
    fn label(self) -> String {
        match self.triggers() {
            [name] => name.to_string(),
            [name, aliases @ ..] => format!("{name} ({})", aliases.join(", ")),
            [] => String::new(),
        }
    }

    pub fn parse(input: &str) -> Option<Self> {
        let cmd = input.trim();
        BUILTINS.into_iter().find(|b| b.triggers().contains(&cmd))
    }

    pub async fn run(self, console: &Console) -> CommandResult {
        match self {
            Builtin::Help => CommandResult::Output(help_text()),
            Builtin::Status => CommandResult::Output(status::report(console)),
            Builtin::Last => CommandResult::Output(last::report(console)),
            Builtin::Json => CommandResult::Output(json::report(console)),
            Builtin::Health => CommandResult::Output(health::report(console.gateway()).await),
            Builtin::Quit => CommandResult::Quit,
        }
    }
}

/// Route a line of input: run the command it names, or hand it back as a query.
pub async fn dispatch(input: &str, console: &Console) -> CommandResult {
    let cmd = input.trim();
    match Builtin::parse(cmd) {
        Some(builtin) => builtin.run(console).await,
        None if cmd.starts_with('/') => CommandResult::Output(format!(
            "unknown command: {cmd}\ntype /help for available commands\n"
        )),
        None => CommandResult::NotACommand,
    }
}

pub fn help_text() -> String {
    let labels: Vec<String> = BUILTINS.iter().map(|b| b.label()).collect();
    let width = labels.iter().map(String::len).max().unwrap_or(10);

    BUILTINS
        .iter()
        .zip(&labels)
        .map(|(b, label)| format!("  {label:<width$}  {}\n", b.description()))
        .collect()
}
