//! Pulseboard CLI
//!
//! Terminal shell around the analytics dashboard:
//! - Sign in and out
//! - List applications
//! - Print a summary or realtime snapshot
//! - Watch the live dashboard

use clap::{Parser, Subcommand};
use pulseboard::api::LOGIN_FAILED_MESSAGE;
use pulseboard::config::generate_default_config;
use pulseboard::dashboard::load_apps;
use pulseboard::filter::display_label;
use pulseboard::render::{render_metric_card, render_realtime, render_trend};
use pulseboard::shell::{parse_command, ShellCommand};
use pulseboard::*;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinSet;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEMO_EMAIL: &str = "demo@analytics.com";
const DEMO_PASSWORD: &str = "demo123";

#[derive(Parser)]
#[command(name = "pulseboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Analytics dashboard in your terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Analytics API URL (overrides config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and store the access token
    Login {
        #[arg(long, default_value = DEMO_EMAIL)]
        email: String,
        #[arg(long, default_value = DEMO_PASSWORD)]
        password: String,
    },

    /// Forget the stored access token
    Logout,

    /// List available applications
    Apps,

    /// Print the analytics summary
    Summary {
        /// Time range in days (1, 7, 30, 90)
        #[arg(short, long)]
        range: Option<TimeRange>,
        /// Application key, or "all"
        #[arg(short, long, default_value = "all")]
        app: AppSelection,
    },

    /// Print the realtime snapshot
    Realtime {
        /// Application key, or "all"
        #[arg(short, long, default_value = "all")]
        app: AppSelection,
    },

    /// Live dashboard; type r, range N, app KEY|all or q
    Watch {
        /// Time range in days (1, 7, 30, 90)
        #[arg(short, long)]
        range: Option<TimeRange>,
        /// Application key, or "all"
        #[arg(short, long, default_value = "all")]
        app: AppSelection,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }

    init_logging(&config.logging);
    tracing::debug!("Pulseboard v{}", env!("CARGO_PKG_VERSION"));

    let session = Session::new(Arc::new(FileTokenStore::new(config.session_path())));
    let api: Arc<dyn AnalyticsApi> = Arc::new(AnalyticsClient::new(config.client_config())?);
    let json = cli.format == "json";

    match cli.command {
        Commands::Login { email, password } => {
            let credentials = Credentials::new(email, password);
            match session::login(api.as_ref(), &session, &credentials).await {
                Ok(()) => println!("Signed in as {}", credentials.email),
                Err(ApiError::LoginRejected(message)) => {
                    eprintln!("{}", message);
                    std::process::exit(1);
                }
                Err(e) => {
                    tracing::error!(error = %e, "Login failed");
                    eprintln!("{}", LOGIN_FAILED_MESSAGE);
                    std::process::exit(1);
                }
            }
        }

        Commands::Logout => {
            session::logout(&session);
            println!("Signed out");
        }

        Commands::Apps => {
            require_login(&session);
            let registry = AppRegistry::new(load_apps(api.as_ref(), &session).await);

            if json {
                println!("{}", serde_json::to_string_pretty(registry.apps())?);
            } else if registry.is_empty() {
                println!("No applications found.");
            } else {
                println!(
                    "{:<32} {:<32} {:>10} {:>8}",
                    "Key", "Label", "Events", "Users"
                );
                println!("{}", "-".repeat(85));
                for (app, (key, label)) in registry.apps().iter().zip(registry.options()) {
                    println!(
                        "{:<32} {:<32} {:>10} {:>8}",
                        key,
                        label,
                        app.event_count.map(|n| n.to_string()).unwrap_or_else(|| "-".into()),
                        app.user_count.map(|n| n.to_string()).unwrap_or_else(|| "-".into()),
                    );
                }
            }
        }

        Commands::Summary { range, app } => {
            require_login(&session);
            let filter = FilterSelection::new(
                app,
                range.unwrap_or(config.dashboard.default_time_range_days),
            );
            let registry = registry_for(&filter, api.as_ref(), &session).await;
            let params = SummaryParams::derive(&filter, &registry, chrono::Utc::now());

            match api.summary(&session, &params).await {
                Ok(summary) if json => println!("{}", serde_json::to_string_pretty(&summary)?),
                Ok(summary) => print_summary(&summary, &filter, &registry),
                Err(e) => exit_on_fetch_error(&session, e),
            }
        }

        Commands::Realtime { app } => {
            require_login(&session);
            let filter = FilterSelection::new(app, TimeRange::default());
            let registry = registry_for(&filter, api.as_ref(), &session).await;
            let params = RealtimeParams::derive(&filter, &registry);

            match api.realtime(&session, &params).await {
                Ok(snapshot) if json => println!("{}", serde_json::to_string_pretty(&snapshot)?),
                Ok(snapshot) => {
                    for line in render_realtime(Some(&snapshot), false) {
                        println!("{}", line);
                    }
                }
                Err(e) => exit_on_fetch_error(&session, e),
            }
        }

        Commands::Watch { range, app } => {
            require_login(&session);
            let mut dashboard_config = config.dashboard_config();
            if let Some(range) = range {
                dashboard_config.initial_filter.time_range = range;
            }
            dashboard_config.initial_filter.app = app;

            watch(api, session, dashboard_config).await?;
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

/// Logs go to stderr so the dashboard on stdout stays readable
fn init_logging(config: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("pulseboard={}", config.level).into());
    let registry = tracing_subscriber::registry().with(filter);

    if config.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn require_login(session: &Session) {
    if !session.is_authenticated() {
        eprintln!("Not signed in. Run `pulseboard login` first.");
        std::process::exit(1);
    }
}

/// Only an app-scoped selection needs the registry
async fn registry_for(
    filter: &FilterSelection,
    api: &dyn AnalyticsApi,
    session: &Session,
) -> AppRegistry {
    match filter.app {
        AppSelection::All => AppRegistry::default(),
        AppSelection::App(_) => AppRegistry::new(load_apps(api, session).await),
    }
}

fn exit_on_fetch_error(session: &Session, error: ApiError) -> ! {
    if error.is_unauthorized() {
        session.clear();
        eprintln!("Session expired. Run `pulseboard login` to sign in again.");
    } else {
        eprintln!("Request failed: {}", error);
    }
    std::process::exit(1);
}

fn print_summary(summary: &AnalyticsSummary, filter: &FilterSelection, registry: &AppRegistry) {
    let scope = match &filter.app {
        AppSelection::All => "All Apps".to_string(),
        AppSelection::App(key) => registry.find(key).map(display_label).unwrap_or_else(|| key.clone()),
    };
    println!("{}  ·  {}", scope, filter.time_range.label());
    println!();

    let cards = [
        ("Users", summary.total_users, summary.total_users_change),
        ("Event count", summary.event_count, summary.event_count_change),
        ("Conversions", summary.conversions, summary.conversions_change),
        ("New users", summary.new_users, summary.new_users_change),
    ];
    for (title, value, change) in cards {
        for line in render_metric_card(title, value, change, false) {
            println!("{}", line.trim_end());
        }
        println!();
    }

    for line in render_trend(&summary.trend_data, filter.time_range, false) {
        println!("{}", line);
    }
}

async fn watch(
    api: Arc<dyn AnalyticsApi>,
    session: Session,
    config: DashboardConfig,
) -> anyhow::Result<()> {
    let expired = Arc::new(tokio::sync::Notify::new());
    let on_logout: LogoutHook = {
        let expired = expired.clone();
        Arc::new(move || expired.notify_one())
    };

    let dashboard = Arc::new(Dashboard::new(api, session, config, on_logout));
    let mut updates = dashboard.subscribe();
    draw(&dashboard.snapshot());

    // Fetches run here so the loop keeps drawing while they are in flight
    let mut commands = JoinSet::new();
    commands.spawn({
        let dashboard = Arc::clone(&dashboard);
        async move { dashboard.start().await }
    });

    let mut stdin = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = updates.borrow_and_update().clone();
                draw(&state);
            }
            line = stdin.next_line(), if stdin_open => {
                let Some(line) = line? else {
                    stdin_open = false;
                    continue;
                };
                let command = match parse_command(&line) {
                    Ok(ShellCommand::Quit) => break,
                    Ok(ShellCommand::Nothing) => continue,
                    Ok(command) => command,
                    Err(e) => {
                        eprintln!("{}", e);
                        continue;
                    }
                };
                let dashboard = Arc::clone(&dashboard);
                commands.spawn(async move {
                    match command {
                        ShellCommand::Refresh => dashboard.refresh().await,
                        ShellCommand::Range(range) => dashboard.set_time_range(range).await,
                        ShellCommand::App(app) => dashboard.select_app(app).await,
                        ShellCommand::Quit | ShellCommand::Nothing => {}
                    }
                });
            }
            Some(done) = commands.join_next(), if !commands.is_empty() => {
                if let Err(e) = done {
                    tracing::error!(error = %e, "Dashboard command failed");
                }
            }
            _ = expired.notified() => {
                eprintln!("Session expired. Run `pulseboard login` to sign in again.");
                break;
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    commands.shutdown().await;
    if let Ok(dashboard) = Arc::try_unwrap(dashboard) {
        dashboard.unmount().await;
    }
    Ok(())
}

fn draw(state: &DashboardState) {
    // Clear screen, cursor home
    print!("\x1b[2J\x1b[H");
    println!("{}", render_dashboard(state));
    println!();
    println!("[r] refresh  [range 1|7|30|90]  [app KEY|all]  [q] quit");
}
