pub mod amount;
pub mod chart;
pub mod currency;
pub mod error;
pub mod report;
pub mod series;
pub mod settings;

pub use amount::{parse_amount, parse_decimal, AmountError, MoneyString};
pub use chart::{
    map_category_breakdown_for_chart, map_chart_rows, map_top_payees_for_chart,
    CategoryBreakdownItem, ChartRow, Label, LabeledTotal, TopPayee,
};
pub use currency::{format_currency, format_money_string, CurrencyFormatter, Locale};
