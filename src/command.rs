//! The closed set of things one input line can mean.
//!
//! Slash commands and the bare-text shortcuts both map onto [`Command`], so
//! the session loop dispatches over a single enumeration and every variant
//! corresponds to one engine call.

use crate::rates::CurrencyCode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    List,
    /// Single-currency lookup; `None` asks for usage plus the code listing.
    Rate(Option<CurrencyCode>),
    /// Pairwise comparison; `None` asks for usage plus the code listing.
    Compare(Option<(CurrencyCode, CurrencyCode)>),
    /// Stub: renders usage guidance, fetches nothing.
    Chart(Option<CurrencyCode>),
    Date(DateCommand),
    Quit,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateCommand {
    Show,
    Set(String),
    Reset,
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Command::Unknown;
        };

        if let Some(name) = head.strip_prefix('/') {
            let arg = words.next();
            let second = words.next();
            return match name.to_ascii_lowercase().as_str() {
                "start" => Command::Start,
                "help" => Command::Help,
                "list" => Command::List,
                "question" | "rate" => Command::Rate(arg.and_then(CurrencyCode::parse)),
                "compare" => match (arg, second) {
                    (Some(a), Some(b)) => {
                        match (CurrencyCode::parse(a), CurrencyCode::parse(b)) {
                            (Some(a), Some(b)) => Command::Compare(Some((a, b))),
                            _ => Command::Compare(None),
                        }
                    }
                    _ => Command::Compare(None),
                },
                "chart" => Command::Chart(arg.and_then(CurrencyCode::parse)),
                "date" => match arg {
                    None => Command::Date(DateCommand::Show),
                    Some(arg) if arg.eq_ignore_ascii_case("reset") => {
                        Command::Date(DateCommand::Reset)
                    }
                    Some(arg) => Command::Date(DateCommand::Set(arg.to_owned())),
                },
                "quit" | "exit" => Command::Quit,
                _ => Command::Unknown,
            };
        }

        // bare text: a 3-letter word is a lookup, two of them a comparison
        let words: Vec<_> = line.split_whitespace().collect();
        match words.as_slice() {
            [a, b] => match (CurrencyCode::parse(a), CurrencyCode::parse(b)) {
                (Some(a), Some(b)) => Command::Compare(Some((a, b))),
                _ => Command::Unknown,
            },
            [one] => match CurrencyCode::parse(one) {
                Some(code) => Command::Rate(Some(code)),
                None => Command::Unknown,
            },
            _ => Command::Unknown,
        }
    }
}
