//! branchwatch - Live dashboard of branch staffing statistics.
//!
//! Polls the statistics endpoint for every route, re-renders the routes whose
//! data changed and shows them as color-coded cards.
//!
//! Usage:
//!   branchwatch --endpoint https://host/exec          # weekly profile, 60s interval
//!   branchwatch --profile vacancies                   # endpoint from BRANCHWATCH_ENDPOINT
//!   branchwatch --demo -i 2                           # built-in demo data every 2s
//!   branchwatch --config site.toml --routes main,courier

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

use branchwatch_core::config::DeploymentProfile;
use branchwatch_core::models::Route;
use branchwatch_core::source::{DataSource, DemoSource, HttpSource};
use branchwatch_core::tui::App;

/// UI redraw rate; independent of the poll interval.
const TICK_RATE: Duration = Duration::from_millis(250);

/// Live dashboard of branch staffing statistics.
#[derive(Parser)]
#[command(name = "branchwatch", about = "Branch statistics dashboard", version)]
struct Args {
    /// Statistics endpoint. Each route is fetched as `<endpoint>?route=<name>`.
    #[arg(short, long, env = "BRANCHWATCH_ENDPOINT")]
    endpoint: Option<String>,

    /// Built-in profile: weekly, weekly-fast or vacancies.
    #[arg(short, long, default_value = "weekly", env = "BRANCHWATCH_PROFILE")]
    profile: String,

    /// TOML file overriding profile fields.
    #[arg(short, long, value_name = "PATH", env = "BRANCHWATCH_CONFIG")]
    config: Option<PathBuf>,

    /// Poll interval in seconds. Overrides the profile.
    #[arg(short, long)]
    interval: Option<u64>,

    /// HTTP request timeout in seconds.
    #[arg(long, default_value = "30")]
    timeout: u64,

    /// Routes to poll, comma separated (main, courier, franchise).
    #[arg(long, value_delimiter = ',')]
    routes: Vec<Route>,

    /// Use generated demo data instead of the endpoint.
    #[arg(long)]
    demo: bool,

    /// Log file. The terminal is owned by the UI, so logs never go to stderr.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Increase logging verbosity (-v for debug, -vv for trace). Default is info level.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode - only log errors.
    #[arg(short, long)]
    quiet: bool,
}

/// Initializes file logging. Default level is INFO; `RUST_LOG` adds directives.
fn init_logging(path: &Path, verbose: u8, quiet: bool) -> std::io::Result<()> {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let mut filter = EnvFilter::from_default_env();
    for target in ["branchwatch", "branchwatch_core"] {
        if let Ok(directive) = format!("{}={}", target, level).parse() {
            filter = filter.add_directive(directive);
        }
    }

    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .init();
    Ok(())
}

fn main() {
    let args = Args::parse();

    let log_file = args
        .log_file
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join("branchwatch.log"));
    if let Err(e) = init_logging(&log_file, args.verbose, args.quiet) {
        eprintln!("Error: cannot open log file '{}': {}", log_file.display(), e);
        std::process::exit(1);
    }

    let profile = match DeploymentProfile::resolve(
        &args.profile,
        args.config.as_deref(),
        args.interval.map(Duration::from_secs),
        &args.routes,
    ) {
        Ok(profile) => profile,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let source: Box<dyn DataSource> = if args.demo {
        Box::new(DemoSource::new())
    } else {
        let Some(endpoint) = args.endpoint.as_deref() else {
            eprintln!("Error: no endpoint given (use --endpoint, BRANCHWATCH_ENDPOINT or --demo)");
            std::process::exit(1);
        };
        match HttpSource::new(endpoint, Duration::from_secs(args.timeout)) {
            Ok(source) => Box::new(source),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    };

    info!(
        version = branchwatch_core::VERSION,
        profile = %profile.name,
        source = %source.describe(),
        interval_ms = profile.poll_interval_ms,
        "branchwatch starting"
    );

    let app = App::new(profile, source);
    if let Err(e) = app.run(TICK_RATE) {
        eprintln!("Error running TUI: {}", e);
        std::process::exit(1);
    }
}
