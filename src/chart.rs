//! Bar-chart rows built from labelled backend totals.
//!
//! Charts plot magnitude: every emitted amount is the absolute value of the
//! parsed total, and direction is conveyed by the chart itself. An entry whose
//! total does not parse is left out of the chart rather than drawn as zero.

use serde::{Deserialize, Serialize};

use crate::amount::MoneyString;
use crate::report::{CategoryTotal, PayeeTotal};

pub const UNKNOWN_PAYEE: &str = "(unknown)";
pub const UNCATEGORIZED: &str = "Uncategorized";

/// A row label as the backend reports it: either a name or nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Label {
    Known(String),
    Unknown,
}

impl Label {
    /// The display name, with `default` standing in for [`Label::Unknown`].
    pub fn resolve(&self, default: &str) -> String {
        match self {
            Label::Known(name) => name.clone(),
            Label::Unknown => default.to_string(),
        }
    }
}

impl From<Option<String>> for Label {
    fn from(name: Option<String>) -> Self {
        name.map_or(Label::Unknown, Label::Known)
    }
}

impl From<Option<&str>> for Label {
    fn from(name: Option<&str>) -> Self {
        name.map_or(Label::Unknown, |n| Label::Known(n.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabeledTotal {
    pub label: Label,
    pub total: MoneyString,
}

impl LabeledTotal {
    pub fn new(label: impl Into<Label>, total: impl Into<MoneyString>) -> Self {
        Self {
            label: label.into(),
            total: total.into(),
        }
    }
}

impl From<&PayeeTotal> for LabeledTotal {
    fn from(p: &PayeeTotal) -> Self {
        Self::new(p.payee.clone(), p.total.clone())
    }
}

impl From<&CategoryTotal> for LabeledTotal {
    fn from(c: &CategoryTotal) -> Self {
        Self::new(c.category_name.clone(), c.total.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartRow {
    pub label: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopPayee {
    pub payee: String,
    pub amount: f64,
}

impl From<ChartRow> for TopPayee {
    fn from(row: ChartRow) -> Self {
        Self {
            payee: row.label,
            amount: row.amount,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdownItem {
    pub category: String,
    pub amount: f64,
}

impl From<ChartRow> for CategoryBreakdownItem {
    fn from(row: ChartRow) -> Self {
        Self {
            category: row.label,
            amount: row.amount,
        }
    }
}

/// Map one entry, or `None` when its total is unparsable.
fn to_chart_row(entry: &LabeledTotal, default_label: &str) -> Option<ChartRow> {
    let amount = entry.total.parse()?.abs();
    Some(ChartRow {
        label: entry.label.resolve(default_label),
        amount,
    })
}

/// Convert labelled totals into chart rows, keeping input order.
///
/// Unknown labels become `default_label`. Entries with unparsable totals are
/// dropped, so the output is never longer than the input.
pub fn map_chart_rows(items: &[LabeledTotal], default_label: &str) -> Vec<ChartRow> {
    items
        .iter()
        .filter_map(|entry| to_chart_row(entry, default_label))
        .collect()
}

pub fn map_top_payees_for_chart(items: &[PayeeTotal]) -> Vec<TopPayee> {
    let totals: Vec<LabeledTotal> = items.iter().map(LabeledTotal::from).collect();
    map_chart_rows(&totals, UNKNOWN_PAYEE)
        .into_iter()
        .map(TopPayee::from)
        .collect()
}

pub fn map_category_breakdown_for_chart(items: &[CategoryTotal]) -> Vec<CategoryBreakdownItem> {
    let totals: Vec<LabeledTotal> = items.iter().map(LabeledTotal::from).collect();
    map_chart_rows(&totals, UNCATEGORIZED)
        .into_iter()
        .map(CategoryBreakdownItem::from)
        .collect()
}
