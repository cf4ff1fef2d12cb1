//! branchwatch-dump - Run one refresh cycle and print the route views.
//!
//! Useful for checking an endpoint or a profile without the terminal UI.
//! Exits with status 2 when any route failed to load.

use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};
use clap::Parser;
use serde::Serialize;
use tracing::{Level, debug};
use tracing_subscriber::EnvFilter;

use branchwatch_core::config::DeploymentProfile;
use branchwatch_core::engine::{CycleReport, RefreshEngine};
use branchwatch_core::fmt::{format_percent, truncate};
use branchwatch_core::models::{Route, RouteSnapshot};
use branchwatch_core::poller::{Poller, RenderSink, SinkClosed};
use branchwatch_core::present::{Presenter, RouteView};
use branchwatch_core::source::{DataSource, DemoSource, FetchError, HttpSource};

// ── CLI ──────────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "branchwatch-dump", about = "Fetch branch statistics once and print them")]
struct Cli {
    /// Statistics endpoint. Each route is fetched as `<endpoint>?route=<name>`.
    #[arg(short, long, env = "BRANCHWATCH_ENDPOINT")]
    endpoint: Option<String>,

    /// Built-in profile: weekly, weekly-fast or vacancies.
    #[arg(short, long, default_value = "weekly", env = "BRANCHWATCH_PROFILE")]
    profile: String,

    /// TOML file overriding profile fields.
    #[arg(short, long, value_name = "PATH", env = "BRANCHWATCH_CONFIG")]
    config: Option<PathBuf>,

    /// HTTP request timeout in seconds.
    #[arg(long, default_value = "30")]
    timeout: u64,

    /// Routes to fetch, comma separated (main, courier, franchise).
    #[arg(long, value_delimiter = ',')]
    routes: Vec<Route>,

    /// Use generated demo data instead of the endpoint.
    #[arg(long)]
    demo: bool,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Increase logging verbosity (-v for debug, -vv for trace). Default is warn level.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let mut filter = EnvFilter::from_default_env();
    for target in ["branchwatch_dump", "branchwatch_core"] {
        if let Ok(directive) = format!("{}={}", target, level).parse() {
            filter = filter.add_directive(directive);
        }
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let profile = match DeploymentProfile::resolve(
        &cli.profile,
        cli.config.as_deref(),
        None,
        &cli.routes,
    ) {
        Ok(profile) => profile,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let source: Box<dyn DataSource> = if cli.demo {
        Box::new(DemoSource::new())
    } else {
        let Some(endpoint) = cli.endpoint.as_deref() else {
            eprintln!("Error: no endpoint given (use --endpoint, BRANCHWATCH_ENDPOINT or --demo)");
            std::process::exit(1);
        };
        match HttpSource::new(endpoint, Duration::from_secs(cli.timeout)) {
            Ok(source) => Box::new(source),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error: cannot start runtime: {}", e);
            std::process::exit(1);
        }
    };

    let interval = profile.poll_interval();
    let mut sink = CollectSink::new(Presenter::new(profile.clone()));
    let mut poller = Poller::new(RefreshEngine::new(source, profile.routes.clone()), interval);
    let Ok(report) = runtime.block_on(poller.run_once(&mut sink)) else {
        eprintln!("Error: refresh cycle aborted");
        std::process::exit(1);
    };
    debug!(elapsed_ms = report.elapsed.as_millis() as u64, "cycle finished");

    if cli.json {
        print_json(&profile, &report, &sink);
    } else {
        print_text(&profile, &report, &sink);
    }

    if !sink.errors.is_empty() {
        std::process::exit(2);
    }
}

// ── Sink ─────────────────────────────────────────────────────────────────────

/// Collects presented views and failures of one cycle.
struct CollectSink {
    presenter: Presenter,
    views: Vec<RouteView>,
    errors: Vec<RouteError>,
}

#[derive(Serialize)]
struct RouteError {
    route: Route,
    error: String,
}

impl CollectSink {
    fn new(presenter: Presenter) -> Self {
        Self {
            presenter,
            views: Vec::new(),
            errors: Vec::new(),
        }
    }
}

impl RenderSink for CollectSink {
    fn render(&mut self, route: Route, snapshot: &RouteSnapshot) -> Result<(), SinkClosed> {
        self.views.push(self.presenter.present(route, snapshot));
        Ok(())
    }

    fn fetch_failed(&mut self, route: Route, error: &FetchError) -> Result<(), SinkClosed> {
        self.errors.push(RouteError {
            route,
            error: error.to_string(),
        });
        Ok(())
    }

    fn cycle_finished(&mut self, _report: &CycleReport) -> Result<(), SinkClosed> {
        Ok(())
    }
}

// ── Output ───────────────────────────────────────────────────────────────────

fn fmt_ts(ts: i64) -> String {
    DateTime::<Utc>::from_timestamp(ts, 0)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| ts.to_string())
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    profile: &'a str,
    fetched_at: String,
    elapsed_ms: u64,
    routes: &'a [RouteView],
    errors: &'a [RouteError],
}

fn print_json(profile: &DeploymentProfile, report: &CycleReport, sink: &CollectSink) {
    let output = JsonOutput {
        profile: &profile.name,
        fetched_at: fmt_ts(report.finished_at),
        elapsed_ms: report.elapsed.as_millis() as u64,
        routes: &sink.views,
        errors: &sink.errors,
    };
    match serde_json::to_string_pretty(&output) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error: cannot serialize output: {}", e);
            std::process::exit(1);
        }
    }
}

fn print_text(profile: &DeploymentProfile, report: &CycleReport, sink: &CollectSink) {
    println!(
        "profile {} · fetched {} in {} ms",
        profile.name,
        fmt_ts(report.finished_at),
        report.elapsed.as_millis()
    );

    for view in &sink.views {
        let s = &view.summary;
        println!();
        println!(
            "== {} · {} branches · {} ==",
            view.route.title(),
            s.branches,
            s.band.name()
        );
        let mut line = format!(
            "staff {}  special {}  vacant {}",
            s.total_staff, s.total_special_schedule, s.total_vacant
        );
        if profile.summary_percentages {
            line.push_str(&format!(
                "  now {}  prev {}",
                format_percent(s.mean_percent),
                format_percent(s.mean_prev_percent)
            ));
        }
        if let Some(m) = s.movement {
            line.push_str(&format!("  joined +{}  left -{}", m.come, m.went));
        }
        println!("{}", line);

        for card in &view.cards {
            let mut row = format!(
                "  {:<24} {:>5} {:>4} {:>4}  {:>8} {} {:>8}  {:<6}",
                truncate(&card.label, 24),
                card.staff,
                card.special_schedule,
                card.vacant,
                format_percent(card.percent),
                card.trend.arrow(),
                format_percent(card.prev_percent),
                card.band.name()
            );
            if let Some(m) = card.movement {
                row.push_str(&format!(" +{} -{}", m.come, m.went));
            }
            println!("{}", row.trim_end());
        }
    }

    for err in &sink.errors {
        eprintln!("{}: {}", err.route.title(), err.error);
    }
}
