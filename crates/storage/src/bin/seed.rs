use std::fmt;

use chrono::{DateTime, Duration, Utc};
use clario_core::Clock;
use clario_core::model::{CategoryScore, QuizResultDraft, UserId};
use storage::repository::{NewQuizResult, Storage};
use storage::sqlite::DEFAULT_DB_URL;

#[derive(Debug, Clone)]
struct Args {
    db_url: String,
    user_id: UserId,
    results: u32,
    now: Option<DateTime<Utc>>,
}

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidUserId { raw: String },
    InvalidResults { raw: String },
    InvalidDbUrl { raw: String },
    InvalidNow { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidUserId { raw } => {
                write!(f, "invalid --user-id value (expected uuid): {raw}")
            }
            ArgsError::InvalidResults { raw } => write!(f, "invalid --results value: {raw}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidNow { raw } => {
                write!(f, "invalid --now value (expected RFC3339): {raw}")
            }
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

impl Args {
    fn parse() -> Result<Self, ArgsError> {
        let mut db_url =
            std::env::var("CLARIO_DB_URL").unwrap_or_else(|_| DEFAULT_DB_URL.into());
        let mut user_id = match std::env::var("CLARIO_USER_ID") {
            Ok(raw) => raw
                .parse::<UserId>()
                .map_err(|_| ArgsError::InvalidUserId { raw })?,
            Err(_) => UserId::random(),
        };
        let mut results = std::env::var("CLARIO_RESULTS")
            .ok()
            .and_then(|value| value.parse::<u32>().ok())
            .unwrap_or(3);
        let mut now: Option<DateTime<Utc>> = None;

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = value;
                }
                "--user-id" => {
                    let value = require_value(&mut args, "--user-id")?;
                    user_id = value
                        .parse::<UserId>()
                        .map_err(|_| ArgsError::InvalidUserId { raw: value.clone() })?;
                }
                "--results" => {
                    let value = require_value(&mut args, "--results")?;
                    results = value
                        .parse::<u32>()
                        .map_err(|_| ArgsError::InvalidResults { raw: value.clone() })?;
                }
                "--now" => {
                    let value = require_value(&mut args, "--now")?;
                    let parsed = DateTime::parse_from_rfc3339(&value)
                        .map_err(|_| ArgsError::InvalidNow { raw: value.clone() })?
                        .with_timezone(&Utc);
                    now = Some(parsed);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            db_url,
            user_id,
            results,
            now,
        })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p storage --bin seed -- [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --db <sqlite_url>         SQLite URL (default: {DEFAULT_DB_URL})");
    eprintln!("  --user-id <uuid>          Owner of the seeded results (default: random)");
    eprintln!("  --results <n>             Number of quiz results to append (default: 3)");
    eprintln!("  --now <rfc3339>           Fixed current time for deterministic seeding");
    eprintln!("  -h, --help                Show this help");
    eprintln!();
    eprintln!("Environment (same as flags):");
    eprintln!("  CLARIO_DB_URL, CLARIO_USER_ID, CLARIO_RESULTS");
}

/// Sample score sheets, oldest first; the last one seeded is the newest.
fn sample_draft(i: u32) -> QuizResultDraft {
    let sheets = [
        ([("Science", 14), ("Commerce", 6), ("Arts", 9)], "Science"),
        ([("Science", 7), ("Commerce", 13), ("Arts", 8)], "Commerce"),
        ([("Science", 5), ("Commerce", 6), ("Arts", 15)], "Arts"),
    ];
    let (scores, stream) = sheets[(i as usize) % sheets.len()];
    QuizResultDraft {
        scores: scores
            .iter()
            .map(|(category, score)| CategoryScore::new(*category, *score))
            .collect(),
        recommended_stream: Some(stream.to_owned()),
    }
}

/// One timestamp per day, oldest first, the last one at `clock.now()`.
fn taken_at_days(clock: Clock, count: u32) -> Vec<DateTime<Utc>> {
    let mut day = Clock::fixed(clock.now() - Duration::days(i64::from(count.saturating_sub(1))));
    (0..count)
        .map(|_| {
            let at = day.now();
            day.advance(Duration::days(1));
            at
        })
        .collect()
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse().map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let storage = Storage::sqlite(&args.db_url).await?;
    let clock = args.now.map_or_else(Clock::system, Clock::fixed);

    for (i, taken_at) in (0..args.results).zip(taken_at_days(clock, args.results)) {
        let record = NewQuizResult::new(args.user_id, taken_at, sample_draft(i));
        let _ = storage.quiz_results.append_result(&record).await?;
    }

    println!(
        "Seeded {} quiz results for user {} into {}",
        args.results, args.user_id, args.db_url
    );

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clario_core::time::fixed_now;

    #[test]
    fn taken_at_days_ends_at_fixed_now() {
        let days = taken_at_days(Clock::fixed(fixed_now()), 3);
        assert_eq!(
            days,
            vec![fixed_now() - Duration::days(2), fixed_now() - Duration::days(1), fixed_now()]
        );
        assert!(taken_at_days(Clock::fixed(fixed_now()), 0).is_empty());
    }
}
