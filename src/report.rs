//! Report payloads as returned by the backend report endpoints.
//!
//! Field names follow the backend JSON. Every monetary field is a
//! [`MoneyString`]; nothing here is parsed until it reaches a mapper or the
//! currency formatter.

use std::io::Read;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::amount::MoneyString;
use crate::error::Result;

// ---------------------------------------------------------------------------
// Monthly report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayeeTotal {
    pub payee: Option<String>,
    pub total: MoneyString,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category_name: Option<String>,
    pub total: MoneyString,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopSpending {
    pub booking_date: String,
    pub payee: Option<String>,
    pub purpose: Option<String>,
    pub amount: MoneyString,
    pub category_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyReport {
    pub account_id: Option<i64>,
    pub month: String,
    pub currency: String,
    pub transactions_count: u32,
    pub income_total: MoneyString,
    pub expense_total: MoneyString,
    pub net_total: MoneyString,
    #[serde(default)]
    pub top_payees: Vec<PayeeTotal>,
    #[serde(default)]
    pub category_breakdown: Vec<CategoryTotal>,
    #[serde(default)]
    pub top_spendings: Vec<TopSpending>,
}

// ---------------------------------------------------------------------------
// Net worth
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountBalancePoint {
    pub account_id: i64,
    pub balance: MoneyString,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetWorthPoint {
    /// `YYYY-MM`
    pub month: String,
    pub total: MoneyString,
    #[serde(default)]
    pub by_account: Vec<AccountBalancePoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountNetWorthSummary {
    pub account_id: i64,
    pub account_name: String,
    pub currency: String,
    pub opening_balance: Option<MoneyString>,
    pub opening_balance_date: Option<String>,
    pub current_balance: MoneyString,
    pub month_over_month_change: MoneyString,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetWorthReport {
    pub currency: String,
    pub current_total: MoneyString,
    pub month_over_month_change: MoneyString,
    #[serde(default)]
    pub accounts: Vec<AccountNetWorthSummary>,
    #[serde(default)]
    pub history: Vec<NetWorthPoint>,
}

// ---------------------------------------------------------------------------
// Spending trend
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTrendItem {
    pub category_name: Option<String>,
    pub avg_monthly: MoneyString,
    pub current_month: MoneyString,
    pub projected: MoneyString,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingTrendReport {
    pub account_id: Option<i64>,
    pub month: String,
    pub lookback_months: u32,
    pub currency: String,
    pub total_avg_monthly: MoneyString,
    pub total_current_month: MoneyString,
    pub total_projected: MoneyString,
    #[serde(default)]
    pub categories: Vec<CategoryTrendItem>,
}

// ---------------------------------------------------------------------------
// Annual overview
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthSummary {
    /// `YYYY-MM`
    pub month: String,
    pub income: MoneyString,
    pub expenses: MoneyString,
    pub net: MoneyString,
    /// Percentage, e.g. `"28.50"`.
    pub savings_rate: MoneyString,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnualReport {
    pub year: i32,
    pub account_id: Option<i64>,
    pub currency: String,
    pub total_income: MoneyString,
    pub total_expenses: MoneyString,
    pub total_net: MoneyString,
    pub avg_savings_rate: MoneyString,
    #[serde(default)]
    pub months: Vec<MonthSummary>,
}

/// Read a saved report payload from `path`, or from stdin when `path` is `-`.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)?
    };
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MONTHLY: &str = r#"{
        "account_id": null,
        "month": "2025-01",
        "currency": "EUR",
        "transactions_count": 3,
        "income_total": "1000.00",
        "expense_total": "-60.00",
        "net_total": "940.00",
        "top_payees": [
            {"payee": "REWE", "total": "-50.00"},
            {"payee": null, "total": "-10.00"}
        ],
        "category_breakdown": [
            {"category_name": "Groceries", "total": "-50.00"},
            {"category_name": null, "total": "-10.00"}
        ],
        "top_spendings": [
            {"booking_date": "2025-01-20", "payee": "REWE", "purpose": null,
             "amount": "-50.00", "category_name": "Groceries"}
        ]
    }"#;

    #[test]
    fn test_monthly_report_deserializes_backend_shape() {
        let report: MonthlyReport = serde_json::from_str(MONTHLY).unwrap();
        assert_eq!(report.account_id, None);
        assert_eq!(report.currency, "EUR");
        assert_eq!(report.net_total.as_str(), "940.00");
        assert_eq!(report.top_payees.len(), 2);
        assert_eq!(report.top_payees[1].payee, None);
        assert_eq!(report.category_breakdown[0].category_name.as_deref(), Some("Groceries"));
        assert_eq!(report.top_spendings[0].purpose, None);
    }

    #[test]
    fn test_missing_lists_default_to_empty() {
        let json = r#"{"currency": "USD", "current_total": "10.00", "month_over_month_change": "-1.00"}"#;
        let report: NetWorthReport = serde_json::from_str(json).unwrap();
        assert!(report.accounts.is_empty());
        assert!(report.history.is_empty());
    }

    #[test]
    fn test_load_json_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("monthly.json");
        std::fs::write(&path, MONTHLY).unwrap();
        let report: MonthlyReport = load_json(&path).unwrap();
        assert_eq!(report.month, "2025-01");
    }

    #[test]
    fn test_load_json_reports_bad_payload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();
        let result: Result<MonthlyReport> = load_json(&path);
        assert!(matches!(result, Err(crate::error::FinboardError::Json(_))));
    }

    #[test]
    fn test_load_json_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result: Result<MonthlyReport> = load_json(&dir.path().join("nope.json"));
        assert!(matches!(result, Err(crate::error::FinboardError::Io(_))));
    }
}
