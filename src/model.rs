//! Typed adaptation of raw node properties.
//!
//! Imported stock quotes live in the repository as plain property nodes:
//!
//! ```text
//! /content/ADBE                  # stock page, named after the symbol
//! └── lastTrade
//!     ├── lastTrade = "100"
//!     ├── requestDate = "11/13/2016"
//!     └── requestTime = "4:00pm"
//! ```
//!
//! [`StockModel::from_values`] is the explicit factory that turns that
//! generic key-value view into a typed model or a typed failure — no
//! runtime reflection, no host-container adaptation. The threshold check
//! and the `inspect` command both consume it.

use crate::store::{NodeReader, StoreError, Values};
use serde_json::Value;
use thiserror::Error;

/// Child node holding the quote properties.
const TRADE_NODE: &str = "lastTrade";

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("missing property: {0}")]
    MissingProperty(&'static str),
    #[error("property {0} is not a number: {1}")]
    NotANumber(&'static str, String),
    #[error("payload path has no parent: {0}")]
    NoParent(String),
}

/// A stock quote adapted from a `lastTrade` node.
#[derive(Debug, Clone, PartialEq)]
pub struct StockModel {
    /// Ticker symbol, taken from the stock page's node name.
    pub symbol: String,
    pub last_trade: f64,
    pub request_date: Option<String>,
    pub request_time: Option<String>,
}

impl StockModel {
    /// Build a model from a symbol and the raw `lastTrade` properties.
    ///
    /// `lastTrade` is required and may be stored as a JSON number or a
    /// numeric string (importers differ); `requestDate`/`requestTime` are
    /// optional.
    pub fn from_values(symbol: &str, values: &Values) -> Result<Self, ModelError> {
        let raw = values
            .get("lastTrade")
            .ok_or(ModelError::MissingProperty("lastTrade"))?;
        let last_trade = match raw {
            Value::Number(n) => n
                .as_f64()
                .ok_or_else(|| ModelError::NotANumber("lastTrade", raw.to_string()))?,
            Value::String(s) => s
                .parse::<f64>()
                .map_err(|_| ModelError::NotANumber("lastTrade", s.clone()))?,
            other => return Err(ModelError::NotANumber("lastTrade", other.to_string())),
        };

        Ok(Self {
            symbol: symbol.to_string(),
            last_trade,
            request_date: string_prop(values, "requestDate"),
            request_time: string_prop(values, "requestTime"),
        })
    }

    /// Human-readable request timestamp, e.g. `11/13/2016 4:00pm`.
    /// Empty when neither part was recorded.
    pub fn timestamp(&self) -> String {
        let parts: Vec<&str> = [self.request_date.as_deref(), self.request_time.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        parts.join(" ")
    }
}

fn string_prop(values: &Values, key: &str) -> Option<String> {
    values
        .get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .filter(|s| !s.is_empty())
}

/// Adapt the stock page at `page_path` by reading its `lastTrade` child.
/// The symbol is the page's node name.
pub fn adapt_stock_page(
    reader: &dyn NodeReader,
    page_path: &str,
) -> Result<StockModel, ModelError> {
    let symbol = page_path.rsplit('/').next().unwrap_or(page_path);
    let values = reader.read(&format!("{page_path}/{TRADE_NODE}"))?;
    StockModel::from_values(symbol, &values)
}

/// Format both views of a stock page for the `inspect` command: the raw
/// property dump and the typed model rendering.
pub fn format_inspection(page_path: &str, values: &Values, model: &StockModel) -> Vec<String> {
    let mut lines = vec![format!("{page_path}/{TRADE_NODE}")];
    for (key, value) in values {
        let shown = match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        lines.push(format!("    {key}: {shown}"));
    }
    lines.push(String::new());
    lines.push(format!("StockModel for {}", model.symbol));
    lines.push(format!("    Last trade: {}", model.last_trade));
    lines.push(format!("    Requested: {}", model.timestamp()));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn trade_values() -> Values {
        let mut values = Values::new();
        values.insert("lastTrade".into(), json!("100"));
        values.insert("requestDate".into(), json!("11/13/2016"));
        values.insert("requestTime".into(), json!("4:00pm"));
        values
    }

    #[test]
    fn adapts_numeric_string_property() {
        let model = StockModel::from_values("ADBE", &trade_values()).unwrap();
        assert_eq!(model.symbol, "ADBE");
        assert_eq!(model.last_trade, 100.0);
        assert_eq!(model.timestamp(), "11/13/2016 4:00pm");
    }

    #[test]
    fn adapts_json_number_property() {
        let mut values = Values::new();
        values.insert("lastTrade".into(), json!(105.5));
        let model = StockModel::from_values("MSFT", &values).unwrap();
        assert_eq!(model.last_trade, 105.5);
        assert_eq!(model.timestamp(), "");
    }

    #[test]
    fn missing_last_trade_is_a_typed_failure() {
        let values = Values::new();
        assert!(matches!(
            StockModel::from_values("ADBE", &values),
            Err(ModelError::MissingProperty("lastTrade"))
        ));
    }

    #[test]
    fn non_numeric_last_trade_is_a_typed_failure() {
        let mut values = Values::new();
        values.insert("lastTrade".into(), json!("not-a-price"));
        assert!(matches!(
            StockModel::from_values("ADBE", &values),
            Err(ModelError::NotANumber("lastTrade", _))
        ));
    }

    #[test]
    fn adapt_stock_page_reads_the_trade_child() {
        use crate::store::tests::MockStore;
        let mock = MockStore::new();
        mock.nodes
            .borrow_mut()
            .insert("/content/ADBE/lastTrade".into(), trade_values());

        let model = adapt_stock_page(&mock, "/content/ADBE").unwrap();
        assert_eq!(model.symbol, "ADBE");
        assert_eq!(model.last_trade, 100.0);
    }

    #[test]
    fn inspection_shows_raw_and_typed_views() {
        let model = StockModel::from_values("ADBE", &trade_values()).unwrap();
        let lines = format_inspection("/content/ADBE", &trade_values(), &model);
        assert_eq!(lines[0], "/content/ADBE/lastTrade");
        assert!(lines.contains(&"    lastTrade: 100".to_string()));
        assert!(lines.contains(&"StockModel for ADBE".to_string()));
        assert!(lines.contains(&"    Requested: 11/13/2016 4:00pm".to_string()));
    }
}
