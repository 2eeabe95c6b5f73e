use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use smol_str::SmolStr;

/// One currency's quotation for a single feed day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateRecord {
    pub code: SmolStr,
    pub name: String,
    /// Unit count the quoted value applies to (100 for some low-value currencies).
    pub nominal: u32,
    /// Rubles per `nominal` units of the currency.
    pub value: f64,
}

impl RateRecord {
    /// Ruble price of exactly one unit of the currency.
    pub fn unit_value(&self) -> f64 {
        self.value / self.nominal as f64
    }
}

/// Snapshot of one feed day, keyed by currency code.
///
/// Built fresh per fetch and not mutated afterwards; the caller tracks which
/// date produced it.
pub type RateTable = BTreeMap<SmolStr, RateRecord>;

/// Both unit values of a currency pair plus the two cross ratios.
#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub a: CurrencyCode,
    pub b: CurrencyCode,
    pub unit_a: f64,
    pub unit_b: f64,
    /// How many `b` one unit of `a` buys.
    pub a_in_b: f64,
    /// How many `a` one unit of `b` buys.
    pub b_in_a: f64,
}

/// Three ASCII letters, uppercased on construction.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CurrencyCode(SmolStr);

impl CurrencyCode {
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.len() != 3 || !raw.bytes().all(|b| b.is_ascii_alphabetic()) {
            return None;
        }
        Some(Self(SmolStr::new(raw.to_ascii_uppercase())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
