//! Command-line harness for the iljung schedule engine.
//!
//! Stands in for the production collaborators: supplies the "now" reference
//! (wall clock in a configurable IANA timezone, unless pinned with
//! `--now`), plays the calendar backend by reading an already-fetched JSON
//! event file, and renders the engine's reply as the chat transport would.

use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;
use clap::Parser;

use iljung_engine::{answer, events_from_json, EventSource, RawEvent, Reply};

#[derive(Parser)]
#[command(name = "iljung", version, about = "일정 질문에 답하는 캘린더 비서")]
struct Cli {
    /// The schedule question, in free-form Korean text.
    text: String,

    /// Path to a JSON array of calendar events fetched by the backend.
    #[arg(long)]
    events: PathBuf,

    /// Reference "now" (RFC 3339 or YYYY-MM-DD[ HH:MM[:SS]]). Defaults to
    /// the current wall clock in --timezone.
    #[arg(long)]
    now: Option<String>,

    /// IANA timezone used when --now is not given.
    #[arg(long, default_value = "Asia/Seoul")]
    timezone: String,

    /// Print the parsed intent as JSON instead of answering.
    #[arg(long)]
    intent: bool,
}

/// File-backed stand-in for the calendar backend collaborator.
struct FileSource {
    events: Vec<RawEvent>,
}

impl EventSource for FileSource {
    fn events_between(
        &self,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> iljung_engine::error::Result<Vec<RawEvent>> {
        Ok(self
            .events
            .iter()
            .filter(|event| event.start.is_none_or(|start| start >= from && start < to))
            .cloned()
            .collect())
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let now = match &cli.now {
        Some(raw) => parse_now(raw)?,
        None => {
            let tz: Tz = cli
                .timezone
                .parse()
                .map_err(|_| anyhow!("unknown timezone: {}", cli.timezone))?;
            Utc::now().with_timezone(&tz).naive_local()
        }
    };

    if cli.intent {
        let intent = iljung_engine::resolve(&cli.text, now);
        println!("{}", serde_json::to_string_pretty(&intent)?);
        return Ok(());
    }

    let payload = fs::read_to_string(&cli.events)
        .with_context(|| format!("cannot read event file {}", cli.events.display()))?;
    let source = FileSource {
        events: events_from_json(&payload)?,
    };

    let reply = answer(&cli.text, now, &source)?;
    println!("{}", render(&reply));
    Ok(())
}

/// The user-facing message for each outcome.
fn render(reply: &Reply) -> String {
    match reply {
        Reply::Schedule { formatted } => formatted.clone(),
        Reply::FreeDays { formatted, .. } => formatted.clone(),
        Reply::UnrecognizedDates => {
            "❗ 날짜를 인식하지 못했어요. 예: '5/26', '다음주 월', '6월 전체'".to_string()
        }
        Reply::NoMatchingEvents => "❌ 해당 조건에 맞는 일정이 없습니다.".to_string(),
        Reply::NoFreeDays => "❌ 요청한 조건에 맞는 '한가한 날'이 없습니다.".to_string(),
    }
}

fn parse_now(raw: &str) -> Result<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.naive_local());
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(dt);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(dt) = date.and_hms_opt(0, 0, 0) {
            return Ok(dt);
        }
    }
    bail!("unrecognized --now value: {raw}")
}
