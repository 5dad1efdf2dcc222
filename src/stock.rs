//! Stock price threshold check.
//!
//! Runs after a quote import: given the path of the freshly written
//! `lastTrade` node (the workflow payload) and a threshold spec, alert on
//! every threshold the new price exceeds. The threshold spec is one
//! `SYMBOL=price` entry per line:
//!
//! ```text
//! ADBE=105
//! MSFT=55
//! ```
//!
//! A line is considered only if it mentions the checked symbol; other
//! lines are skipped without parsing. Alerts are returned to the caller
//! and logged at warn level.

use crate::model::{self, ModelError, StockModel};
use crate::store::NodeReader;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum StockError {
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error("bad threshold entry: {0:?}")]
    BadThreshold(String),
}

/// A threshold the imported price crossed.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub symbol: String,
    pub threshold: f64,
    pub last_trade: f64,
}

/// Compare a stock model against every matching threshold entry.
///
/// Entries that don't mention the model's symbol are skipped. A matching
/// entry that can't be parsed (`ADBE` with no `=price`, or a non-numeric
/// price) fails the whole check.
pub fn check_thresholds(model: &StockModel, spec: &str) -> Result<Vec<Alert>, StockError> {
    let mut alerts = Vec::new();
    for entry in spec.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if !entry.contains(&model.symbol) {
            continue;
        }
        let threshold = entry
            .split('=')
            .nth(1)
            .and_then(|v| v.trim().parse::<f64>().ok())
            .ok_or_else(|| StockError::BadThreshold(entry.to_string()))?;

        if threshold < model.last_trade {
            warn!(
                symbol = %model.symbol,
                threshold,
                last_trade = model.last_trade,
                "stock alert: price is over threshold"
            );
            alerts.push(Alert {
                symbol: model.symbol.clone(),
                threshold,
                last_trade: model.last_trade,
            });
        }
    }
    Ok(alerts)
}

/// Full check for a workflow payload: resolve the stock page from the
/// `lastTrade` node path, adapt it, and evaluate the thresholds.
pub fn run_check(
    reader: &dyn NodeReader,
    payload: &str,
    spec: &str,
) -> Result<Vec<Alert>, StockError> {
    let (page_path, _) = payload
        .rsplit_once('/')
        .ok_or_else(|| ModelError::NoParent(payload.to_string()))?;

    let model = model::adapt_stock_page(reader, page_path)?;
    info!(symbol = %model.symbol, last_trade = model.last_trade, "checking stock");
    check_thresholds(&model, spec)
}

/// Terminal rendering of check results.
pub fn format_alerts(alerts: &[Alert]) -> Vec<String> {
    if alerts.is_empty() {
        return vec!["No thresholds crossed".to_string()];
    }
    alerts
        .iter()
        .map(|a| {
            format!(
                "ALERT {}: last trade {} is over threshold {}",
                a.symbol, a.last_trade, a.threshold
            )
        })
        .collect()
}
