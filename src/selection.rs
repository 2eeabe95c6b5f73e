use chrono::NaiveDate;
use smol_str::SmolStr;
use thiserror::Error;

/// Rejected date-set input. The message doubles as the user guidance, so it
/// spells out the expected shape.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DateError {
    #[error("dates must look like DD/MM/YYYY, e.g. 02/03/2002")]
    Format,
    #[error("no such calendar date, check day and month")]
    Semantic,
}

/// The sticky date of one session.
///
/// When set, every fetch that has no explicit override uses it; unset means
/// the feed serves its most recent day. The validated string is stored
/// verbatim since the feed expects the same day/month/year text.
#[derive(Debug, Default, Clone)]
pub struct DateSelector {
    date: Option<SmolStr>,
}

impl DateSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, raw: &str) -> Result<(), DateError> {
        validate(raw)?;
        self.date = Some(SmolStr::new(raw));
        Ok(())
    }

    pub fn reset(&mut self) {
        self.date = None;
    }

    pub fn get(&self) -> Option<&str> {
        self.date.as_deref()
    }
}

fn validate(raw: &str) -> Result<(), DateError> {
    let bytes = raw.as_bytes();
    if bytes.len() != 10 || bytes[2] != b'/' || bytes[5] != b'/' {
        return Err(DateError::Format);
    }
    let (day, month, year) = (&raw[0..2], &raw[3..5], &raw[6..10]);
    if ![day, month, year]
        .iter()
        .all(|part| part.bytes().all(|b| b.is_ascii_digit()))
    {
        return Err(DateError::Format);
    }

    let day = day.parse().map_err(|_| DateError::Format)?;
    let month = month.parse().map_err(|_| DateError::Format)?;
    let year = year.parse().map_err(|_| DateError::Format)?;
    NaiveDate::from_ymd_opt(year, month, day).ok_or(DateError::Semantic)?;

    Ok(())
}
