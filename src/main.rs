//! Operator console for the document-processing administration API.
//!
//! Drives the same REST collections and push namespaces as the browser
//! client: CRUD on resources, log listing and following, device choice,
//! layout image download, and remote processing.

mod api;
mod config;
mod devices;
mod error;
mod feed;
mod layouts;
mod logs;
mod output;
mod remote;
mod resources;
#[cfg(test)]
mod test_support;

#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;

use clap::{Args, Parser, Subcommand};

use crate::api::RestClient;
use crate::config::Settings;
use crate::devices::DevicesCommand;
use crate::error::ConsoleError;
use crate::layouts::LayoutCommand;
use crate::logs::LogsArgs;
use crate::remote::ProcessArgs;
use crate::resources::ResourceCommand;

#[derive(Parser, Debug)]
#[command(name = "docflow", about = "Document-processing administration console")]
struct Cli {
    #[arg(long, env = "DOCFLOW_BASE_URL", default_value = "http://127.0.0.1:3000")]
    base_url: String,

    #[arg(long, env = "DOCFLOW_SESSION_TOKEN")]
    session_token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create, read, update, delete and toggle administration records.
    Resource(ResourceCommand),
    /// Print a log collection, optionally following live changes.
    Logs(LogsArgs),
    /// Initiator keys seen in remote transactions.
    Initiators,
    Devices(DevicesArgs),
    Layout(LayoutArgs),
    Remote(RemoteArgs),
}

#[derive(Args, Debug)]
struct DevicesArgs {
    #[command(subcommand)]
    command: DevicesCommand,
}

#[derive(Args, Debug)]
struct LayoutArgs {
    #[command(subcommand)]
    command: LayoutCommand,
}

#[derive(Args, Debug)]
struct RemoteArgs {
    #[command(subcommand)]
    command: RemoteSubcommand,
}

#[derive(Subcommand, Debug)]
enum RemoteSubcommand {
    /// Ask an app instance to scan and process a document, then wait for the result.
    Process(ProcessArgs),
}

#[tokio::main]
async fn main() -> Result<(), ConsoleError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let settings = Settings::new(&cli.base_url, cli.session_token)?;
    if settings.session_token.is_none() {
        tracing::warn!("no session token; set DOCFLOW_SESSION_TOKEN or pass --session-token");
    }
    let client = RestClient::new(&settings)?;
    tracing::debug!(base_url = %settings.base_url, "console ready");

    match cli.command {
        Command::Resource(command) => resources::run(&client, command).await,
        Command::Logs(args) => logs::run(&settings, &client, args).await,
        Command::Initiators => {
            for key in logs::list_initiators(&client).await? {
                println!("{key}");
            }
            Ok(())
        }
        Command::Devices(args) => devices::run(&client, args.command).await,
        Command::Layout(args) => layouts::run(&client, args.command).await,
        Command::Remote(args) => match args.command {
            RemoteSubcommand::Process(args) => remote::run(&settings, &client, args).await,
        },
    }
}
