//! Time and comparison series for the net-worth, trend and annual charts.
//!
//! These keep the sign of each value since the charts plot direction. A row
//! with any field that fails to parse is left out, the same as in
//! [`crate::chart`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::chart::Label;
use crate::report::{CategoryTrendItem, MonthSummary, NetWorthPoint};

/// Number of categories shown in the spending trend chart.
pub const TREND_CHART_LIMIT: usize = 15;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetWorthRow {
    pub month: String,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendRow {
    pub name: String,
    pub avg: f64,
    pub actual: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnualRow {
    pub month: String,
    pub income: f64,
    pub expenses: f64,
    pub net: f64,
    pub savings_rate: f64,
}

pub fn net_worth_series(history: &[NetWorthPoint]) -> Vec<NetWorthRow> {
    history
        .iter()
        .filter_map(|p| {
            Some(NetWorthRow {
                month: p.month.clone(),
                total: p.total.parse()?,
            })
        })
        .collect()
}

/// Average-versus-actual rows for the first [`TREND_CHART_LIMIT`] categories.
///
/// The limit applies to the backend ordering before invalid rows are dropped.
pub fn trend_rows(categories: &[CategoryTrendItem], uncategorized_label: &str) -> Vec<TrendRow> {
    categories
        .iter()
        .take(TREND_CHART_LIMIT)
        .filter_map(|c| {
            Some(TrendRow {
                name: Label::from(c.category_name.clone()).resolve(uncategorized_label),
                avg: c.avg_monthly.parse()?,
                actual: c.current_month.parse()?,
            })
        })
        .collect()
}

/// Short month name (`Jan`) for a `YYYY-MM` key, or the key itself.
pub fn month_label(key: &str) -> String {
    NaiveDate::parse_from_str(&format!("{key}-01"), "%Y-%m-%d")
        .map(|d| d.format("%b").to_string())
        .unwrap_or_else(|_| key.to_string())
}

pub fn annual_rows(months: &[MonthSummary]) -> Vec<AnnualRow> {
    months
        .iter()
        .filter_map(|m| {
            Some(AnnualRow {
                month: month_label(&m.month),
                income: m.income.parse()?,
                expenses: m.expenses.parse()?,
                net: m.net.parse()?,
                savings_rate: m.savings_rate.parse()?,
            })
        })
        .collect()
}
