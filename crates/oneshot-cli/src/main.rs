mod config;
mod plan_cmd;
mod serve_cmd;
#[cfg(test)]
mod test_util;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use oneshot_core::{FieldText, PlanCatalog, PlanRequest};

use config::OneshotConfig;
use plan_cmd::PlanFormat;

#[derive(Parser)]
#[command(name = "oneshot", about = "Ask-once automation planner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a oneshot config file
    Init {
        /// Address to bind the server to
        #[arg(long, default_value = config::DEFAULT_BIND)]
        bind: String,
        /// Port to listen on
        #[arg(long, default_value_t = config::DEFAULT_PORT)]
        port: u16,
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
    /// Serve POST /one-shot-plan over HTTP
    Serve {
        /// Address to bind (overrides ONESHOT_BIND and the config file)
        #[arg(long)]
        bind: Option<String>,
        /// Port to listen on (overrides ONESHOT_PORT and the config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Build a plan locally and print it
    Plan {
        #[command(flatten)]
        request: RequestArgs,
        /// Output format
        #[arg(long, value_enum, default_value_t = PlanFormat::Json)]
        format: PlanFormat,
        /// Output file path (defaults to stdout)
        #[arg(long)]
        output: Option<String>,
    },
}

/// The request fields accepted by `oneshot plan`, mirroring the HTTP payload.
#[derive(Args)]
pub struct RequestArgs {
    /// Free-text description of what to automate
    #[arg(long)]
    request: Option<String>,
    /// Scenario description
    #[arg(long)]
    scenario: Option<String>,
    /// Goal description
    #[arg(long)]
    goal: Option<String>,
    /// Problem description
    #[arg(long)]
    problem: Option<String>,
    /// Name to greet in the summary
    #[arg(long)]
    preferred_name: Option<String>,
    /// Academic term mentioned in the summary
    #[arg(long)]
    term: Option<String>,
}

impl From<RequestArgs> for PlanRequest {
    fn from(args: RequestArgs) -> Self {
        Self {
            request: args.request.map(FieldText::from),
            scenario: args.scenario.map(FieldText::from),
            goal: args.goal.map(FieldText::from),
            problem: args.problem.map(FieldText::from),
            preferred_name: args.preferred_name.map(FieldText::from),
            term: args.term.map(FieldText::from),
        }
    }
}

/// Execute the `oneshot init` command: write config file.
fn cmd_init(bind: &str, port: u16, force: bool) -> anyhow::Result<()> {
    let path = config::config_path();

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}\nUse --force to overwrite.",
            path.display()
        );
    }

    let cfg = config::ConfigFile {
        server: config::ServerSection {
            bind: bind.to_string(),
            port,
        },
    };

    config::save_config(&cfg)?;

    println!("Config written to {}", path.display());
    println!("  server.bind = {bind}");
    println!("  server.port = {port}");
    println!();
    println!("Next: run `oneshot serve` to start the planner.");

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { bind, port, force } => {
            cmd_init(&bind, port, force)?;
        }
        Commands::Serve { bind, port } => {
            let resolved = OneshotConfig::resolve(bind.as_deref(), port)?;
            let catalog = PlanCatalog::load().context("embedded plan catalog is invalid")?;
            serve_cmd::run_serve(catalog, &resolved.bind, resolved.port).await?;
        }
        Commands::Plan {
            request,
            format,
            output,
        } => {
            let catalog = PlanCatalog::load().context("embedded plan catalog is invalid")?;
            let request = PlanRequest::from(request);
            plan_cmd::run_plan(&catalog, &request, format, output.as_deref())?;
        }
    }

    Ok(())
}
