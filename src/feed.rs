use smol_str::SmolStr;
use thiserror::Error;

use crate::rates::{RateRecord, RateTable};

const CBR_DAILY_BASE: &str = "https://www.cbr.ru/scripts/XML_daily.asp";

// the feed defaults to windows-1251 when the header carries no charset
const FEED_CHARSET: &str = "windows-1251";

/// Anything that keeps a fetch from producing a table. Callers only branch
/// on "fetch failed"; the variants exist for the log line.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("feed answered with status {0}")]
    Status(reqwest::StatusCode),
    #[error("malformed feed document: {0}")]
    Xml(#[from] roxmltree::Error),
    #[error("currency entry is missing `{0}`")]
    MissingField(&'static str),
    #[error("could not read `{field}` from `{raw}`")]
    BadNumber { field: &'static str, raw: String },
}

/// Issues one GET against the daily-rates endpoint per call.
///
/// No caching and no retry: two fetches for the same date are two round
/// trips, and a failed fetch is simply reported back.
#[derive(Debug)]
pub struct Feed {
    client: reqwest::Client,
    base_url: String,
}

impl Feed {
    pub fn new() -> Self {
        Self::with_base_url(CBR_DAILY_BASE)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Fetches the snapshot for `date` (`DD/MM/YYYY`, already validated),
    /// or the most recent day the feed serves when no date is given.
    #[tracing::instrument(skip(self))]
    pub async fn fetch(&self, date: Option<&str>) -> Result<RateTable, FetchError> {
        let url = match date {
            Some(date) => format!("{}?date_req={date}", self.base_url),
            None => self.base_url.clone(),
        };

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        let body = response.text_with_charset(FEED_CHARSET).await?;

        let table = parse_table(&body)?;
        tracing::debug!(currencies = table.len(), "fetched rate table");
        Ok(table)
    }
}

impl Default for Feed {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses one `XML_daily` document into a rate table.
///
/// Every `<Valute>` under the root contributes one record; a repeated code
/// keeps the last occurrence.
pub fn parse_table(document: &str) -> Result<RateTable, FetchError> {
    let doc = roxmltree::Document::parse(document)?;

    let mut table = RateTable::new();
    for valute in doc
        .root_element()
        .children()
        .filter(|n| n.has_tag_name("Valute"))
    {
        let code = child_text(&valute, "CharCode")?.trim();
        let name = child_text(&valute, "Name")?.trim();
        let nominal = child_text(&valute, "Nominal")?.trim();
        let value = child_text(&valute, "Value")?.trim();

        let nominal = parse_nominal(nominal)?;
        let value = parse_value(value)?;

        let code = SmolStr::new(code);
        table.insert(
            code.clone(),
            RateRecord {
                code,
                name: name.to_owned(),
                nominal,
                value,
            },
        );
    }

    Ok(table)
}

fn parse_nominal(raw: &str) -> Result<u32, FetchError> {
    match raw.parse() {
        Ok(nominal) if nominal > 0 => Ok(nominal),
        _ => Err(FetchError::BadNumber {
            field: "Nominal",
            raw: raw.to_owned(),
        }),
    }
}

// values are quoted with a comma decimal separator
fn parse_value(raw: &str) -> Result<f64, FetchError> {
    match raw.replace(',', ".").parse() {
        Ok(value) if value > 0.0 => Ok(value),
        _ => Err(FetchError::BadNumber {
            field: "Value",
            raw: raw.to_owned(),
        }),
    }
}

fn child_text<'a>(
    node: &roxmltree::Node<'a, '_>,
    tag: &'static str,
) -> Result<&'a str, FetchError> {
    node.children()
        .find(|n| n.has_tag_name(tag))
        .and_then(|n| n.text())
        .ok_or(FetchError::MissingField(tag))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAILY: &str = r#"
<ValCurs Date="02.03.2002" name="Foreign Currency Market">
    <Valute ID="R01235">
        <NumCode>840</NumCode>
        <CharCode>USD</CharCode>
        <Nominal>1</Nominal>
        <Name>Доллар США</Name>
        <Value>75,5000</Value>
    </Valute>
    <Valute ID="R01239">
        <NumCode>978</NumCode>
        <CharCode>EUR</CharCode>
        <Nominal>1</Nominal>
        <Name>Евро</Name>
        <Value>85,2500</Value>
    </Valute>
    <Valute ID="R01820">
        <NumCode>392</NumCode>
        <CharCode>JPY</CharCode>
        <Nominal>100</Nominal>
        <Name>Японских иен</Name>
        <Value>51,3900</Value>
    </Valute>
</ValCurs>
"#;

    #[test]
    fn parses_the_daily_document() {
        let table = parse_table(DAILY).unwrap();

        let codes: Vec<_> = table.keys().map(|c| c.as_str()).collect();
        assert_eq!(codes, ["EUR", "JPY", "USD"]);

        let usd = &table["USD"];
        assert_eq!(usd.name, "Доллар США");
        assert_eq!(usd.nominal, 1);
        assert_eq!(usd.value, 75.50);
        assert_eq!(usd.unit_value(), 75.50);

        let jpy = &table["JPY"];
        assert_eq!(jpy.nominal, 100);
        assert!((jpy.unit_value() - 0.5139).abs() < 1e-12);
    }

    #[test]
    fn repeated_code_keeps_the_last_occurrence() {
        let doc = r#"
<ValCurs Date="02.03.2002" name="Foreign Currency Market">
    <Valute><NumCode>840</NumCode><CharCode>USD</CharCode><Nominal>1</Nominal><Name>Доллар США</Name><Value>75,50</Value></Valute>
    <Valute><NumCode>840</NumCode><CharCode>USD</CharCode><Nominal>1</Nominal><Name>Доллар США</Name><Value>76,00</Value></Valute>
</ValCurs>
"#;
        let table = parse_table(doc).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table["USD"].value, 76.00);
    }

    #[test]
    fn missing_field_is_a_fetch_error() {
        let doc = r#"
<ValCurs Date="02.03.2002" name="Foreign Currency Market">
    <Valute><NumCode>840</NumCode><CharCode>USD</CharCode><Nominal>1</Nominal><Name>Доллар США</Name></Valute>
</ValCurs>
"#;
        assert!(matches!(
            parse_table(doc),
            Err(FetchError::MissingField("Value"))
        ));
    }

    #[test]
    fn unparseable_numbers_are_fetch_errors() {
        let doc = r#"
<ValCurs Date="02.03.2002" name="Foreign Currency Market">
    <Valute><NumCode>840</NumCode><CharCode>USD</CharCode><Nominal>one</Nominal><Name>Доллар США</Name><Value>75,50</Value></Valute>
</ValCurs>
"#;
        assert!(matches!(
            parse_table(doc),
            Err(FetchError::BadNumber { field: "Nominal", .. })
        ));

        let doc = r#"
<ValCurs Date="02.03.2002" name="Foreign Currency Market">
    <Valute><NumCode>840</NumCode><CharCode>USD</CharCode><Nominal>1</Nominal><Name>Доллар США</Name><Value>75,50,00</Value></Valute>
</ValCurs>
"#;
        assert!(matches!(
            parse_table(doc),
            Err(FetchError::BadNumber { field: "Value", .. })
        ));
    }

    #[test]
    fn broken_xml_is_a_fetch_error() {
        assert!(matches!(
            parse_table("<ValCurs><Valute></ValCurs>"),
            Err(FetchError::Xml(_))
        ));
    }

    #[tokio::test]
    async fn unreachable_endpoint_reports_a_fetch_error() {
        let mut selector = crate::selection::DateSelector::new();
        selector.set("02/03/2002").unwrap();

        let feed = Feed::with_base_url("http://127.0.0.1:9/XML_daily.asp");
        let err = feed.fetch(selector.get()).await.unwrap_err();
        assert!(matches!(err, FetchError::Request(_)));

        // a failed fetch does not disturb the session date
        assert_eq!(selector.get(), Some("02/03/2002"));
    }

    #[test]
    fn quoting_a_fetched_table() {
        let doc = r#"
<ValCurs Date="02.03.2002" name="Foreign Currency Market">
    <Valute><NumCode>840</NumCode><CharCode>USD</CharCode><Nominal>1</Nominal><Name>Доллар США</Name><Value>75,50</Value></Valute>
    <Valute><NumCode>978</NumCode><CharCode>EUR</CharCode><Nominal>1</Nominal><Name>Евро</Name><Value>85,25</Value></Valute>
</ValCurs>
"#;
        let table = parse_table(doc).unwrap();
        assert_eq!(crate::query::codes(&table), ["EUR", "USD"]);

        let usd = crate::rates::CurrencyCode::parse("USD").unwrap();
        let eur = crate::rates::CurrencyCode::parse("EUR").unwrap();

        let record = crate::query::lookup(&table, &usd).unwrap();
        assert_eq!(record.unit_value(), 75.50);

        let cmp = crate::query::compare(&table, &usd, &eur).unwrap();
        assert!((cmp.a_in_b - 0.8856).abs() < 1e-4);
        assert!((cmp.b_in_a - 1.1291).abs() < 1e-4);
    }
}
