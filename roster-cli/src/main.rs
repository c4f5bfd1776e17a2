//! roster: personnel dashboard on the command line
//!
//! Signs in, loads the employee directory (falling back to the built-in
//! roster when the endpoint is unreachable) and renders the list, chart and
//! map views, or runs an identity verification capture.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::{error, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use roster_capture::{Camera, SyntheticCamera};
use roster_cli::views::{render_chart, render_detail, render_directory, render_map};
use roster_cli::{guard, select_source, verify_employee, Credentials, Route, RosterConfig, SessionContext};
use roster_directory::{city_distribution, salary_chart, DirectoryClient, EmployeeSource};

#[derive(Parser)]
#[command(name = "roster")]
#[command(about = "Personnel directory dashboard")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "roster.toml")]
    config: String,

    /// Directory endpoint (overrides config file)
    #[arg(long, env = "ROSTER_ENDPOINT")]
    endpoint: Option<String>,

    /// Skip the network and use the built-in roster
    #[arg(long)]
    offline: bool,

    #[arg(short, long, env = "ROSTER_USERNAME", default_value = "")]
    username: String,

    #[arg(short, long, env = "ROSTER_PASSWORD", default_value = "", hide_env_values = true)]
    password: String,

    /// Log level when RUST_LOG is unset
    #[arg(long, env = "ROSTER_LOG_LEVEL", default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Searchable employee list
    List {
        #[arg(short, long, default_value = "")]
        search: String,
    },
    /// One employee's details
    Show { id: String },
    /// Salary bar chart
    Chart,
    /// Employees by city
    Map,
    /// Capture a verification photo for an employee
    Verify {
        id: String,
        /// Directory the PNG is written to
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },
    /// Show where a dashboard path resolves for the current session
    Route { path: String },
}

impl Command {
    fn route(&self) -> Route {
        match self {
            Command::List { .. } => Route::List,
            Command::Show { id } | Command::Verify { id, .. } => Route::Details(id.clone()),
            Command::Chart => Route::Chart,
            Command::Map => Route::Map,
            Command::Route { path } => Route::parse(path),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("roster={}", cli.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = RosterConfig::load(&cli.config)?;
    if let Some(endpoint) = cli.endpoint.clone() {
        config.directory.endpoint = endpoint;
    }

    let credentials = Credentials::new(&cli.username, &cli.password);
    let session = match SessionContext::Anonymous
        .login(&config.auth.authenticator(), &credentials)
        .await
    {
        Ok(ctx) => ctx,
        Err(e) => {
            warn!("Continuing without a session: {}", e);
            SessionContext::Anonymous
        }
    };

    let requested = cli.command.route();
    let resolved = guard(requested.clone(), &session);

    if let Command::Route { .. } = cli.command {
        println!("{} -> {}", requested, resolved);
        return Ok(());
    }
    if resolved == Route::Login {
        eprintln!("Sign in required: pass --username and --password");
        std::process::exit(1);
    }

    let directory = config.directory.clone();
    let source = select_source(cli.offline, || DirectoryClient::new(directory));
    let roster = source.fetch_employees().await;

    match cli.command {
        Command::List { search } => print!("{}", render_directory(&roster, &search)),
        Command::Show { id } => match roster.find(&id) {
            Some(record) => print!("{}", render_detail(record)),
            None => {
                eprintln!("No employee with id {}", id);
                std::process::exit(1);
            }
        },
        Command::Chart => print!("{}", render_chart(&salary_chart(&roster.records))),
        Command::Map => {
            let distribution = city_distribution(&roster.records, &mut rand::thread_rng());
            print!("{}", render_map(&distribution));
        }
        Command::Verify { id, out } => {
            let Some(employee) = roster.find(&id).cloned() else {
                eprintln!("No employee with id {}", id);
                std::process::exit(1);
            };

            let camera = Camera::new(Arc::new(SyntheticCamera::new(
                config.camera.width,
                config.camera.height,
            )));

            tokio::select! {
                result = verify_employee(&camera, employee, config.capture, &out) => match result {
                    Ok(verification) => println!("Saved {}", verification.path.display()),
                    Err(e) => {
                        error!(error = %e, "Verification failed");
                        eprintln!("Verification failed: {}", e);
                        std::process::exit(1);
                    }
                },
                _ = tokio::signal::ctrl_c() => {
                    warn!("Interrupted, verification abandoned");
                }
            }
        }
        Command::Route { .. } => {}
    }

    Ok(())
}
