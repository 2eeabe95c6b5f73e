//! Display wrappers reproducing the reference output formats: rates to two
//! decimal places, unit values and ratios to four, codes ten per line.

use std::fmt;
use std::fmt::Write;

use crate::rates::{Comparison, RateRecord};

pub const HELP: &str = "\
Available commands:
/question <CODE> (or /rate) - quote one currency, e.g. /question USD
/compare <CODE> <CODE>      - compare two currencies, e.g. /compare USD EUR
/chart <CODE>               - rate history chart
/date <DD/MM/YYYY>          - set the date the quotes are taken from
/date reset                 - back to the latest feed day
/list                       - list all known currency codes
/quit                       - end the session

A bare 3-letter code looks up that currency, two codes compare them.";

pub const WELCOME: &str = "\
Daily exchange rates of the Bank of Russia.

Type a currency code (USD), a pair (USD EUR), or /help for the full
command list.";

pub const RATE_USAGE: &str = "\
Give a currency code to quote, e.g. USD or /question USD.";

pub const COMPARE_USAGE: &str = "\
Give two currency codes separated by a space, e.g. USD EUR or
/compare USD EUR.";

pub const CHART_USAGE: &str = "\
Usage: /chart <CODE>, e.g. /chart USD.
Shows how the rate moved over the last 7 days.";

pub const UNKNOWN: &str = "That did not look like a command; /help lists what I understand.";

/// The single-rate card: name line, then `<nominal> <code> = <value> RUB`.
pub struct Rate<'a>(pub &'a RateRecord);

impl fmt::Display for Rate<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.0;
        write!(f, "{}\n{} {} = {:.2} RUB", r.name, r.nominal, r.code, r.value)
    }
}

/// Unit values of both currencies plus the two cross ratios.
pub struct Ratios<'a>(pub &'a Comparison);

impl fmt::Display for Ratios<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = self.0;
        writeln!(f, "{}: {:.4} RUB", c.a, c.unit_a)?;
        writeln!(f, "{}: {:.4} RUB", c.b, c.unit_b)?;
        writeln!(f)?;
        writeln!(f, "1 {} = {:.4} {}", c.a, c.a_in_b, c.b)?;
        write!(f, "1 {} = {:.4} {}", c.b, c.b_in_a, c.a)
    }
}

/// All codes, ten per line, comma-separated within a line.
pub struct CodeColumns<'a>(pub &'a [&'a str]);

impl fmt::Display for CodeColumns<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, chunk) in self.0.chunks(10).enumerate() {
            if i > 0 {
                f.write_char('\n')?;
            }
            for (j, code) in chunk.iter().enumerate() {
                if j > 0 {
                    f.write_str(", ")?;
                }
                f.write_str(code)?;
            }
        }
        Ok(())
    }
}
