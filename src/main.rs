use std::fmt;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use valuta::command::{Command, DateCommand};
use valuta::render::{self, CodeColumns};
use valuta::{query, DateSelector, Feed, FetchError, RateTable};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Date the quotes are taken from (DD/MM/YYYY)
    #[arg(short, long)]
    date: Option<String>,

    /// Alternative rate feed endpoint
    #[arg(long)]
    url: Option<String>,

    /// Emit query results as JSON lines
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let feed = match &args.url {
        Some(url) => Feed::with_base_url(url.clone()),
        None => Feed::new(),
    };

    let mut selector = DateSelector::new();
    if let Some(date) = &args.date {
        selector.set(date).context("--date")?;
    }

    println!("{}", render::WELCOME);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if !handle(Command::parse(&line), &feed, &mut selector, args.json).await {
            break;
        }
    }

    Ok(())
}

/// Runs one command against the engine; returns `false` when the session is
/// over. Every path either performs at most one fetch or none at all, and no
/// failure ends the loop.
async fn handle(command: Command, feed: &Feed, selector: &mut DateSelector, json: bool) -> bool {
    match command {
        Command::Quit => return false,

        Command::Start => println!("{}\n\n{}", render::WELCOME, render::HELP),
        Command::Help => println!("{}", render::HELP),
        Command::Chart(_) => println!("{}", render::CHART_USAGE),
        Command::Unknown => println!("{}", render::UNKNOWN),

        Command::List => match feed.fetch(selector.get()).await {
            Ok(table) => {
                let codes = query::codes(&table);
                emit(json, &codes, CodeColumns(&codes));
            }
            Err(err) => report_unavailable(err),
        },

        Command::Rate(None) => {
            println!("{}\n\n{}", render::RATE_USAGE, listing(feed, selector).await);
        }
        Command::Rate(Some(code)) => match feed.fetch(selector.get()).await {
            Ok(table) => match query::lookup(&table, &code) {
                Ok(record) => emit(json, record, render::Rate(record)),
                Err(err) => println!("{err}\n\n{}", known_currencies(&table)),
            },
            Err(err) => report_unavailable(err),
        },

        Command::Compare(None) => {
            println!("{}\n\n{}", render::COMPARE_USAGE, listing(feed, selector).await);
        }
        Command::Compare(Some((a, b))) => match feed.fetch(selector.get()).await {
            Ok(table) => match query::compare(&table, &a, &b) {
                Ok(comparison) => emit(json, &comparison, render::Ratios(&comparison)),
                Err(err) => println!("{err}\n\n{}", known_currencies(&table)),
            },
            Err(err) => report_unavailable(err),
        },

        Command::Date(DateCommand::Show) => match selector.get() {
            Some(date) => println!(
                "Selected date: {date}\nUse /date DD/MM/YYYY to change it, /date reset to clear it."
            ),
            None => println!(
                "No date selected, quotes are for the latest feed day.\nUse /date DD/MM/YYYY to set one."
            ),
        },
        Command::Date(DateCommand::Set(raw)) => match selector.set(&raw) {
            Ok(()) => println!("Date set: {raw}"),
            Err(err) => println!("{err}"),
        },
        Command::Date(DateCommand::Reset) => {
            selector.reset();
            println!("Date cleared, quotes are for the latest feed day again.");
        }
    }

    true
}

fn known_currencies(table: &RateTable) -> String {
    format!("Known currencies:\n{}", CodeColumns(&query::codes(table)))
}

async fn listing(feed: &Feed, selector: &DateSelector) -> String {
    match feed.fetch(selector.get()).await {
        Ok(table) => known_currencies(&table),
        Err(err) => {
            tracing::error!(err = &err as &dyn std::error::Error, "fetch failed");
            String::from("(the currency list is unavailable right now)")
        }
    }
}

fn report_unavailable(err: FetchError) {
    tracing::error!(err = &err as &dyn std::error::Error, "fetch failed");
    println!("Rate data is unavailable right now, try again later.");
}

fn emit<T: serde::Serialize>(json: bool, value: &T, text: impl fmt::Display) {
    if !json {
        println!("{text}");
        return;
    }
    match serde_json::to_string(value) {
        Ok(line) => println!("{line}"),
        Err(err) => tracing::error!(err = &err as &dyn std::error::Error, "serialize failed"),
    }
}
