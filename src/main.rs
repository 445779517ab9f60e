/// Version injected at compile time via URMON_VERSION env var (set by CI/CD),
/// or "dev" for local builds.
pub const VERSION: &str = match option_env!("URMON_VERSION") {
    Some(v) => v,
    None => "dev",
};

use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use urmon::{reconcile, CheckType, DesiredState, MonitorSpec, UptimeRobotClient, DEFAULT_API_BASE};

/// Declarative reconciler for Uptime Robot monitors
#[derive(Parser, Debug)]
#[command(name = "urmon", version = VERSION, about, long_about = None)]
struct Args {
    /// Friendly name of the monitor (also the lookup key)
    #[arg(short, long)]
    name: String,

    /// URL to be checked
    #[arg(short, long)]
    url: String,

    /// Desired lifecycle state for the monitor
    #[arg(short, long, value_enum)]
    state: StateArg,

    /// Kind of check performed against the url (only used on creation)
    #[arg(long, value_enum)]
    check_type: Option<CheckTypeArg>,

    /// Known monitor id; skips the name lookup when given
    #[arg(long)]
    monitor_id: Option<i64>,

    /// Uptime Robot API key (falls back to UPTIMEROBOT_API_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// Base endpoint of the Uptime Robot API
    #[arg(long, default_value = DEFAULT_API_BASE)]
    api_base: String,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off")]
    log_level: LogLevel,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StateArg {
    Started,
    Paused,
    Created,
    Absent,
    Present,
}

impl StateArg {
    fn to_desired_state(self) -> DesiredState {
        match self {
            StateArg::Started => DesiredState::Started,
            StateArg::Paused => DesiredState::Paused,
            StateArg::Created => DesiredState::Created,
            StateArg::Absent => DesiredState::Absent,
            StateArg::Present => DesiredState::Present,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CheckTypeArg {
    Http,
    Ping,
}

impl CheckTypeArg {
    fn to_check_type(self) -> CheckType {
        match self {
            CheckTypeArg::Http => CheckType::Http,
            CheckTypeArg::Ping => CheckType::Ping,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

fn setup_logging(level: LogLevel) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let Some(tracing_level) = level.to_tracing_level() else {
        return None;
    };

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .expect("Failed to open log file");

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("urmon started with log level: {:?}", level);
    tracing::info!("Log file: {:?}", log_path);

    Some(guard)
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("urmon").join("urmon.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".urmon").join("urmon.log");
    }
    PathBuf::from("urmon.log")
}

/// Resolve the API key (CLI flag > environment variable)
fn resolve_api_key(flag: Option<String>) -> Result<String> {
    if let Some(key) = flag {
        if !key.is_empty() {
            return Ok(key);
        }
    }

    if let Ok(key) = std::env::var("UPTIMEROBOT_API_KEY") {
        if !key.is_empty() {
            return Ok(key);
        }
    }

    Err(anyhow::anyhow!(
        "No API key supplied. Pass --api-key or set UPTIMEROBOT_API_KEY"
    ))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level);

    let api_key = resolve_api_key(args.api_key)?;
    let client = UptimeRobotClient::with_base_url(&api_key, &args.api_base)?;

    let spec = MonitorSpec {
        name: args.name,
        url: args.url,
        check_type: args.check_type.map(CheckTypeArg::to_check_type),
        desired_state: args.state.to_desired_state(),
        monitor_id: args.monitor_id,
    };

    let result = reconcile(&client, &spec).await?;

    tracing::info!("Monitor {:?} reconciled, stat: {}", spec.name, result.stat);
    println!("{}", serde_json::to_string_pretty(&result.payload)?);

    Ok(())
}
