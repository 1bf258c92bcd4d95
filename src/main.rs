use std::io::{self, Write};
use std::sync::Arc;

use anyhow::bail;
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use ceti::banner::{BannerInfo, print_banner, print_farewell};
use ceti::commands::{self, CommandResult, describe_health};
use ceti::console::Console;
use ceti::console::render::{prompt, result_panel};
use ceti::console::toast::TerminalToaster;
use ceti::consts::DEFAULT_GATEWAY_URL;
use ceti::gateway::Gateway;
use ceti::gateway::http::HttpGateway;
use ceti::interrupt::Interrupts;

#[derive(Parser)]
#[command(name = "ceti", version, about = "A console whose every answer is authorized.")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Base URL of the CETI gateway
    #[arg(short, long, default_value = DEFAULT_GATEWAY_URL)]
    gateway: String,

    /// Submit a single query and exit (non-interactive)
    #[arg(short, long)]
    run: Option<String>,

    /// With --run, print the result as JSON instead of a panel
    #[arg(long, default_value_t = false, requires = "run")]
    json: bool,

    /// Log gateway traffic and state changes to stderr
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Check that the gateway is online
    Health,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over --verbose
    let default_filter = if cli.verbose { "ceti=debug" } else { "ceti=warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let gateway = Arc::new(HttpGateway::new(&cli.gateway));

    if let Some(Command::Health) = &cli.command {
        return handle_health(gateway.as_ref()).await;
    }

    let mut console = Console::new(gateway.clone(), Box::new(TerminalToaster::default()));

    // Single query mode
    if let Some(query) = cli.run {
        let Some(result) = console.submit(&query).await else {
            bail!("empty query");
        };
        if cli.json {
            println!("{}", serde_json::to_string_pretty(result)?);
        } else {
            print!("{}", result_panel(result));
        }
        return Ok(());
    }

    let risk_tier = console.risk_tier().to_string();
    print_banner(&BannerInfo {
        gateway: gateway.endpoint(),
        risk_tier: &risk_tier,
    });

    let mut interrupts = Interrupts::listen();
    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        print!("\n{}", prompt(console.state()));
        io::stdout().flush()?;

        let line = match interrupts.race(lines.next_line()).await {
            Some(Ok(Some(line))) => line,
            Some(Err(e)) => {
                eprintln!("input error: {}", e);
                break;
            }
            // Ctrl+D (EOF) or Ctrl+C
            Some(Ok(None)) | None => {
                println!();
                break;
            }
        };

        match commands::dispatch(&line, &console).await {
            CommandResult::Quit => break,
            CommandResult::Output(text) => {
                print!("{text}");
                continue;
            }
            CommandResult::NotACommand => {}
        }

        // A query is never cancelled; Ctrl+C ends the session instead.
        match interrupts.race(console.submit(&line)).await {
            Some(Some(result)) => {
                println!();
                print!("{}", result_panel(result));
            }
            Some(None) => {}
            None => {
                println!("\n\ninterrupted");
                break;
            }
        }
    }

    print_farewell(console.resolved_count());
    Ok(())
}

async fn handle_health(gateway: &dyn Gateway) -> anyhow::Result<()> {
    match gateway.health().await {
        Ok(health) => {
            println!("{} {}", gateway.endpoint(), describe_health(&health));
            Ok(())
        }
        Err(e) => bail!("{}: {}", gateway.endpoint(), e),
    }
}
