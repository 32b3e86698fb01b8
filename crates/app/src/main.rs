use std::fmt;
use std::sync::Arc;

use clario_core::gauge::{DEFAULT_MAX, DEFAULT_MIN, GaugeBounds, GaugeConfigError};
use clario_core::model::{SessionSnapshot, SessionUser, UserId};
use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{AppServices, QuizDataService, StoreConfig, TickerRegistry};
use storage::remote::RemoteConfig;
use storage::sqlite::DEFAULT_DB_URL;
use tracing::info;
use ui::{App, GaugeSettings, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidUserId { raw: String },
    InvalidDbUrl { raw: String },
    InvalidNumber { flag: &'static str, raw: String },
    InvalidGauge(GaugeConfigError),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidUserId { raw } => {
                write!(f, "invalid --user-id value (expected uuid): {raw}")
            }
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidNumber { flag, raw } => write!(f, "invalid {flag} value: {raw}"),
            ArgsError::InvalidGauge(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn parse_i32(flag: &'static str, raw: String) -> Result<i32, ArgsError> {
    raw.trim()
        .parse()
        .map_err(|_| ArgsError::InvalidNumber { flag, raw })
}

fn parse_user_id(raw: String) -> Result<UserId, ArgsError> {
    raw.parse().map_err(|_| ArgsError::InvalidUserId { raw })
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|value| matches!(value.trim(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

struct DesktopApp {
    services: AppServices,
    session: SessionSnapshot,
    gauge: GaugeSettings,
}

impl UiApp for DesktopApp {
    fn quiz_data(&self) -> Arc<QuizDataService> {
        self.services.quiz_data()
    }

    fn tickers(&self) -> TickerRegistry {
        self.services.tickers()
    }

    fn initial_session(&self) -> SessionSnapshot {
        self.session
    }

    fn gauge_settings(&self) -> GaugeSettings {
        self.gauge.clone()
    }
}

struct Args {
    db_url: String,
    remote_url: Option<String>,
    user_id: Option<UserId>,
    quiz_done: bool,
    gauge: GaugeBounds,
}

impl Args {
    fn session(&self) -> SessionSnapshot {
        match self.user_id {
            Some(id) => SessionSnapshot::signed_in(SessionUser::new(id, self.quiz_done)),
            None => SessionSnapshot::signed_out(),
        }
    }

    fn store(&self) -> Result<StoreConfig, Box<dyn std::error::Error>> {
        match &self.remote_url {
            Some(url) => {
                let key = std::env::var("CLARIO_REMOTE_KEY").unwrap_or_default();
                Ok(StoreConfig::Remote(RemoteConfig::new(url, &key)?))
            }
            None => {
                prepare_sqlite_file(&self.db_url)?;
                Ok(StoreConfig::Sqlite {
                    db_url: self.db_url.clone(),
                })
            }
        }
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui   [--db <sqlite_url>] [--remote-url <url>]");
    eprintln!("                           [--user-id <uuid>] [--quiz-done]");
    eprintln!("                           [--gauge-min <n>] [--gauge-max <n>]");
    eprintln!("  cargo run -p storage --bin seed -- --user-id <uuid>   # sample results");
    eprintln!();
    eprintln!("Defaults for ui:");
    eprintln!("  --db {DEFAULT_DB_URL}");
    eprintln!("  --gauge-min {DEFAULT_MIN} --gauge-max {DEFAULT_MAX}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  CLARIO_DB_URL, CLARIO_REMOTE_URL, CLARIO_REMOTE_KEY, CLARIO_USER_ID,");
    eprintln!("  CLARIO_QUIZ_DONE, RUST_LOG");
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut db_url = std::env::var("CLARIO_DB_URL")
            .ok()
            .map_or_else(|| DEFAULT_DB_URL.into(), normalize_sqlite_url);
        let mut remote_url = std::env::var("CLARIO_REMOTE_URL")
            .ok()
            .filter(|value| !value.trim().is_empty());
        let mut user_id = std::env::var("CLARIO_USER_ID")
            .ok()
            .map(parse_user_id)
            .transpose()?;
        let mut quiz_done = env_flag("CLARIO_QUIZ_DONE");
        let mut gauge_min = DEFAULT_MIN;
        let mut gauge_max = DEFAULT_MAX;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--remote-url" => remote_url = Some(require_value(args, "--remote-url")?),
                "--user-id" => user_id = Some(parse_user_id(require_value(args, "--user-id")?)?),
                "--quiz-done" => quiz_done = true,
                "--gauge-min" => {
                    gauge_min = parse_i32("--gauge-min", require_value(args, "--gauge-min")?)?;
                }
                "--gauge-max" => {
                    gauge_max = parse_i32("--gauge-max", require_value(args, "--gauge-max")?)?;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        let gauge = GaugeBounds::new(gauge_min, gauge_max).map_err(ArgsError::InvalidGauge)?;

        Ok(Self {
            db_url,
            remote_url,
            user_id,
            quiz_done,
            gauge,
        })
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // `ui` is the only subcommand and may be omitted
    match argv.first().map(String::as_str) {
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some("ui") => {
            argv.remove(0);
        }
        Some(first) if !first.starts_with("--") => {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            return Err(
                std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand").into(),
            );
        }
        _ => {}
    }

    let mut iter = argv.into_iter();
    let parsed = Args::parse(&mut iter).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    init_tracing();

    let services = AppServices::connect(parsed.store()?).await?;
    let session = parsed.session();
    info!(
        signed_in = session.user.is_some(),
        quiz_done = parsed.quiz_done,
        remote = parsed.remote_url.is_some(),
        "launching dashboard"
    );

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        services,
        session,
        gauge: GaugeSettings {
            bounds: parsed.gauge,
            ..GaugeSettings::default()
        },
    });
    let context = build_app_context(&app);

    // some dev setups default to an always-on-top window
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Clario")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
