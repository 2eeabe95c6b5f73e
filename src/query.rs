//! Pure lookups over a fetched [`RateTable`]: no network, no mutation.

use thiserror::Error;

use crate::rates::{Comparison, CurrencyCode, RateRecord, RateTable};

/// Requested code(s) absent from an otherwise good table.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("currency not found: {}", .codes.iter().map(|c| c.as_str()).collect::<Vec<_>>().join(", "))]
pub struct NotFound {
    pub codes: Vec<CurrencyCode>,
}

/// Exact match on the uppercase code; nothing fuzzy.
pub fn lookup<'t>(table: &'t RateTable, code: &CurrencyCode) -> Result<&'t RateRecord, NotFound> {
    table.get(code.as_str()).ok_or_else(|| NotFound {
        codes: vec![code.clone()],
    })
}

/// Normalized exchange ratio between two currencies.
///
/// Fails naming every missing code; never returns a partial result.
pub fn compare(
    table: &RateTable,
    a: &CurrencyCode,
    b: &CurrencyCode,
) -> Result<Comparison, NotFound> {
    let (unit_a, unit_b) = match (table.get(a.as_str()), table.get(b.as_str())) {
        (Some(ra), Some(rb)) => (ra.unit_value(), rb.unit_value()),
        (ra, rb) => {
            let mut codes = Vec::new();
            if ra.is_none() {
                codes.push(a.clone());
            }
            if rb.is_none() {
                codes.push(b.clone());
            }
            return Err(NotFound { codes });
        }
    };

    Ok(Comparison {
        a: a.clone(),
        b: b.clone(),
        unit_a,
        unit_b,
        a_in_b: unit_a / unit_b,
        b_in_a: unit_b / unit_a,
    })
}

/// All codes of the table, lexicographically ascending.
pub fn codes(table: &RateTable) -> Vec<&str> {
    table.keys().map(|code| code.as_str()).collect()
}
