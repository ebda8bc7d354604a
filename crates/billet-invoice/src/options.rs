// SPDX-License-Identifier: Apache-2.0 OR MIT
use chrono::{Local, NaiveDate};

/// Per-render configuration threaded explicitly through every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Prefix for every money figure, `$` by default.
    pub currency_symbol: String,
    /// Reference date for the overdue check.
    pub today: NaiveDate,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            currency_symbol: "$".to_string(),
            today: Local::now().date_naive(),
        }
    }
}

impl RenderOptions {
    /// Default options with an explicit reference date.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            ..Self::default()
        }
    }

    /// Replaces the currency symbol.
    pub fn with_currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = symbol.into();
        self
    }

    /// Replaces the reference date.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }
}
