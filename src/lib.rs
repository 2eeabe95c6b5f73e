pub mod command;
pub mod feed;
pub mod query;
pub mod rates;
pub mod render;
pub mod selection;

pub use feed::{Feed, FetchError};
pub use query::NotFound;
pub use rates::{Comparison, CurrencyCode, RateRecord, RateTable};
pub use selection::{DateError, DateSelector};
