//! Gitgate CLI - fetch smart HTTP ref advertisements from a Git RPC backend.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use gitgate_client::{ClientConfig, SmartHttpClient};
use gitgate_proto::Repository;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

mod commands;
mod logging;

use logging::LogFormat;

/// Gitgate - smart HTTP info-refs client
#[derive(Parser, Debug)]
#[command(name = "gitgate")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Backend address, overrides the configuration
    #[arg(long, global = true)]
    address: Option<String>,

    /// Log output format
    #[arg(long, value_enum, default_value = "pretty", global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write the raw info-refs advertisement to stdout
    InfoRefs(RepoArgs),

    /// List the advertised refs
    Refs {
        #[command(flatten)]
        repo: RepoArgs,

        /// Print JSON instead of `<oid> <ref>` lines
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

#[derive(Args, Debug)]
struct RepoArgs {
    /// Storage the repository lives on
    #[arg(long, default_value = "default")]
    storage: String,

    /// Repository path relative to the storage root
    #[arg(long)]
    path: String,

    /// GitLab repository identifier, e.g. project-42
    #[arg(long)]
    gl_repository: Option<String>,

    /// Git service (git-upload-pack or git-receive-pack)
    #[arg(long, default_value = "git-upload-pack")]
    service: String,
}

impl RepoArgs {
    fn repository(&self) -> Repository {
        let repo = Repository::new(&self.storage, &self.path);
        match &self.gl_repository {
            Some(id) => repo.with_gl_repository(id),
            None => repo,
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    logging::init_logging(logging::level_for_verbosity(cli.verbose), cli.log_format);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::InfoRefs(args) => {
            let client = connect(cli.config.as_deref(), cli.address).await?;
            let mut stdout = tokio::io::stdout();
            commands::info_refs(&client, &args.repository(), &args.service, &mut stdout).await?;
            stdout.flush().await?;
        }
        Commands::Refs { repo, json } => {
            let client = connect(cli.config.as_deref(), cli.address).await?;
            let adv =
                commands::fetch_advertisement(&client, &repo.repository(), &repo.service).await?;
            print!("{}", commands::render_refs(&adv, json)?);
        }
        Commands::Version => {
            println!("gitgate {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

async fn connect(
    config_path: Option<&Path>,
    address: Option<String>,
) -> anyhow::Result<SmartHttpClient> {
    let mut config = ClientConfig::load(config_path).context("loading configuration")?;
    if let Some(address) = address {
        config.address = address;
    }

    SmartHttpClient::connect(&config)
        .await
        .with_context(|| format!("connecting to {}", config.address))
}
