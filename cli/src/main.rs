mod commands;
mod transport;

use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use person_core::{ClientConfig, Locale};

/// Manage persons through the command/query person service.
///
/// Writes go to the command endpoint and reads to the query endpoint. Give
/// either a gateway URL serving both, or the two endpoints separately.
#[derive(Parser, Debug)]
#[command(name = "persons")]
struct Cli {
    /// Gateway serving both sides under /api/persons and /api/query
    #[arg(long, env = "PERSONS_GATEWAY_URL", default_value = "http://localhost:8084")]
    gateway: String,

    /// Command (write) base URL, e.g. http://writer:8081/api/persons
    #[arg(long, env = "PERSONS_COMMAND_URL", requires = "query_url")]
    command_url: Option<String>,

    /// Query (read) base URL, e.g. http://reader:8082/api/query
    #[arg(long, env = "PERSONS_QUERY_URL", requires = "command_url")]
    query_url: Option<String>,

    /// Language of notices and field errors (en, pt-br)
    #[arg(long, env = "PERSONS_LOCALE", default_value = "en")]
    locale: Locale,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every person
    List,
    /// Show one person
    Get { id: String },
    /// Create a person
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },
    /// Change the name and/or e-mail of a person
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    /// Delete a person
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

impl Cli {
    /// Separate endpoints win over the gateway when both are given.
    fn client_config(&self) -> anyhow::Result<ClientConfig> {
        let config = match (&self.command_url, &self.query_url) {
            (Some(command), Some(query)) => ClientConfig::new(command, query),
            _ => ClientConfig::gateway(&self.gateway),
        };
        config.context("invalid endpoint configuration")
    }
}

fn main() -> ExitCode {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let cli = Cli::parse();
    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            log::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<bool> {
    let config = cli.client_config()?;
    log::debug!(
        "command endpoint {}, query endpoint {}",
        config.command_base_url(),
        config.query_base_url()
    );
    let app = commands::App::new(config, cli.locale);
    match cli.command {
        Command::List => app.list(),
        Command::Get { id } => app.get(id.into()),
        Command::Create { name, email } => app.create(name, email),
        Command::Update { id, name, email } => app.update(id.into(), name, email),
        Command::Delete { id, yes } => app.delete(id.into(), yes),
    }
}
