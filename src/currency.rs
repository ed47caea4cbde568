//! Locale-aware currency display.
//!
//! A single amount shown on its own (a table cell, a KPI tile) must never
//! vanish: when the backend sends something that does not parse, the raw text
//! is shown with the currency code after it so the bad value stays visible.

use std::sync::OnceLock;

use crate::amount::{parse_amount, MoneyString};

const MAX_FRACTION_DIGITS: usize = 2;
const NBSP: char = '\u{a0}';
const NARROW_NBSP: &str = "\u{202f}";

/// Shown in a KPI tile while its report has not arrived.
pub const PLACEHOLDER: &str = "—";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolPosition {
    /// `€1,000.00`
    Prefix,
    /// `1.000,00 €`
    Suffix,
}

/// Number and currency layout conventions for one locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locale {
    pub tag: &'static str,
    pub group_separator: &'static str,
    pub decimal_separator: char,
    pub symbol_position: SymbolPosition,
    /// Space between a prefix symbol and the number (`R$ 10,00`).
    pub prefix_spacing: bool,
    /// Integer digits needed before grouping kicks in, beyond the first group.
    pub min_grouping_digits: usize,
}

impl Locale {
    pub const EN_US: Locale = Locale {
        tag: "en-US",
        group_separator: ",",
        decimal_separator: '.',
        symbol_position: SymbolPosition::Prefix,
        prefix_spacing: false,
        min_grouping_digits: 1,
    };
    pub const EN_GB: Locale = Locale {
        tag: "en-GB",
        ..Locale::EN_US
    };
    pub const DE_DE: Locale = Locale {
        tag: "de-DE",
        group_separator: ".",
        decimal_separator: ',',
        symbol_position: SymbolPosition::Suffix,
        prefix_spacing: false,
        min_grouping_digits: 1,
    };
    pub const FR_FR: Locale = Locale {
        tag: "fr-FR",
        group_separator: NARROW_NBSP,
        ..Locale::DE_DE
    };
    pub const ES_ES: Locale = Locale {
        tag: "es-ES",
        min_grouping_digits: 2,
        ..Locale::DE_DE
    };
    pub const IT_IT: Locale = Locale {
        tag: "it-IT",
        min_grouping_digits: 2,
        ..Locale::DE_DE
    };
    pub const PT_BR: Locale = Locale {
        tag: "pt-BR",
        group_separator: ".",
        decimal_separator: ',',
        symbol_position: SymbolPosition::Prefix,
        prefix_spacing: true,
        min_grouping_digits: 1,
    };

    const ALL: [Locale; 7] = [
        Locale::EN_US,
        Locale::EN_GB,
        Locale::DE_DE,
        Locale::FR_FR,
        Locale::ES_ES,
        Locale::IT_IT,
        Locale::PT_BR,
    ];

    /// Look up a locale by BCP 47 or POSIX tag (`de-DE`, `de_DE.UTF-8@euro`, `de`).
    ///
    /// A known language with an unknown region falls back to that language's
    /// primary locale.
    pub fn parse(tag: &str) -> Option<Locale> {
        let base = tag.split(['.', '@']).next().unwrap_or_default().trim();
        let mut parts = base.split(['-', '_']);
        let language = parts.next().unwrap_or_default().to_ascii_lowercase();
        let region = parts.next().map(str::to_ascii_uppercase);
        if language.is_empty() {
            return None;
        }

        if let Some(region) = region {
            let wanted = format!("{language}-{region}");
            if let Some(exact) = Self::ALL.iter().find(|l| l.tag == wanted) {
                return Some(*exact);
            }
        }
        Self::ALL
            .iter()
            .find(|l| l.tag.split('-').next() == Some(language.as_str()))
            .copied()
    }

    /// Resolve the locale from POSIX environment values, in precedence order
    /// `LC_ALL`, `LC_MONETARY`, `LANG`. Empty values are skipped.
    pub fn from_env_values(
        lc_all: Option<&str>,
        lc_monetary: Option<&str>,
        lang: Option<&str>,
    ) -> Locale {
        [lc_all, lc_monetary, lang]
            .into_iter()
            .flatten()
            .find(|v| !v.trim().is_empty())
            .and_then(Locale::parse)
            .unwrap_or_default()
    }

    /// The process default locale, read from the environment on first use.
    pub fn system() -> Locale {
        static SYSTEM: OnceLock<Locale> = OnceLock::new();
        *SYSTEM.get_or_init(|| {
            let var = |name: &str| std::env::var(name).ok();
            Locale::from_env_values(
                var("LC_ALL").as_deref(),
                var("LC_MONETARY").as_deref(),
                var("LANG").as_deref(),
            )
        })
    }
}

impl Default for Locale {
    fn default() -> Self {
        Locale::EN_US
    }
}

struct Currency {
    symbol: String,
    minor_units: usize,
}

fn currency(code: &str) -> Currency {
    let code = code.trim().to_ascii_uppercase();
    let (symbol, minor_units) = match code.as_str() {
        "EUR" => ("€", 2),
        "USD" => ("$", 2),
        "GBP" => ("£", 2),
        "JPY" => ("¥", 0),
        "KRW" => ("₩", 0),
        "CNY" => ("CN¥", 2),
        "INR" => ("₹", 2),
        "BRL" => ("R$", 2),
        "PHP" => ("₱", 2),
        "CAD" => ("CA$", 2),
        "AUD" => ("A$", 2),
        _ => {
            return Currency {
                symbol: code,
                minor_units: 2,
            }
        }
    };
    Currency {
        symbol: symbol.to_string(),
        minor_units,
    }
}

/// Round a non-negative decimal digit string half-up to `max_frac` places.
fn round_digits(int_part: &str, frac_part: &str, max_frac: usize) -> (String, String) {
    if frac_part.len() <= max_frac {
        return (int_part.to_string(), frac_part.to_string());
    }
    let round_up = frac_part.as_bytes()[max_frac] >= b'5';
    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().take(max_frac))
        .collect();
    if round_up {
        let mut i = digits.len();
        loop {
            if i == 0 {
                digits.insert(0, b'1');
                break;
            }
            i -= 1;
            if digits[i] == b'9' {
                digits[i] = b'0';
            } else {
                digits[i] += 1;
                break;
            }
        }
    }
    let split = digits.len() - max_frac;
    let digits = String::from_utf8(digits).unwrap_or_default();
    (digits[..split].to_string(), digits[split..].to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CurrencyFormatter {
    locale: Locale,
}

impl CurrencyFormatter {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn system() -> Self {
        Self::new(Locale::system())
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    fn group(&self, int_part: &str) -> String {
        let len = int_part.len();
        if len < 3 + self.locale.min_grouping_digits {
            return int_part.to_string();
        }
        let mut out = String::with_capacity(len + len / 3 * self.locale.group_separator.len());
        for (i, c) in int_part.chars().enumerate() {
            if i > 0 && (len - i) % 3 == 0 {
                out.push_str(self.locale.group_separator);
            }
            out.push(c);
        }
        out
    }

    /// Grouped digits for a finite magnitude.
    fn number(&self, magnitude: f64, min_frac: usize) -> String {
        // f64 Display never uses exponent notation.
        let text = magnitude.to_string();
        let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));
        let (int_part, frac_part) = round_digits(int_part, frac_part, MAX_FRACTION_DIGITS);

        let mut frac = frac_part;
        while frac.len() < min_frac {
            frac.push('0');
        }
        while frac.len() > min_frac && frac.ends_with('0') {
            frac.pop();
        }

        let mut out = self.group(&int_part);
        if !frac.is_empty() {
            out.push(self.locale.decimal_separator);
            out.push_str(&frac);
        }
        out
    }

    fn place_symbol(&self, negative: bool, number: &str, symbol: &str) -> String {
        let sign = if negative { "-" } else { "" };
        if symbol.is_empty() {
            return format!("{sign}{number}");
        }
        match self.locale.symbol_position {
            SymbolPosition::Prefix => {
                let spaced = self.locale.prefix_spacing
                    || symbol.chars().last().is_some_and(char::is_alphabetic);
                if spaced {
                    format!("{sign}{symbol}{NBSP}{number}")
                } else {
                    format!("{sign}{symbol}{number}")
                }
            }
            SymbolPosition::Suffix => format!("{sign}{number}{NBSP}{symbol}"),
        }
    }

    /// Format `value` in `currency_code` with at most two fraction digits.
    pub fn format_currency(&self, value: f64, currency_code: &str) -> String {
        let currency = currency(currency_code);
        if value.is_nan() {
            return self.place_symbol(false, "NaN", &currency.symbol);
        }
        if value.is_infinite() {
            return self.place_symbol(value < 0.0, "∞", &currency.symbol);
        }

        let min_frac = currency.minor_units.min(MAX_FRACTION_DIGITS);
        // Negative zero keeps its sign (`-€0.00`).
        let number = self.number(value.abs(), min_frac);
        self.place_symbol(value.is_sign_negative(), &number, &currency.symbol)
    }

    /// Format a backend amount, or show it verbatim as `"{raw} {code}"` when it
    /// does not parse.
    pub fn format_money_string(&self, value: &str, currency_code: &str) -> String {
        match parse_amount(value) {
            Some(n) => self.format_currency(n, currency_code),
            None => format!("{value} {currency_code}"),
        }
    }

    /// Change figure with an explicit `+` for gains and no change.
    pub fn format_signed_change(&self, value: f64, currency_code: &str) -> String {
        let formatted = self.format_currency(value, currency_code);
        if !value.is_sign_negative() {
            format!("+{formatted}")
        } else {
            formatted
        }
    }

    pub fn format_kpi(&self, value: Option<&MoneyString>, currency_code: &str) -> String {
        value.map_or_else(
            || PLACEHOLDER.to_string(),
            |v| self.format_money_string(v.as_str(), currency_code),
        )
    }
}

pub fn format_currency(value: f64, currency_code: &str) -> String {
    CurrencyFormatter::system().format_currency(value, currency_code)
}

pub fn format_money_string(value: &str, currency_code: &str) -> String {
    CurrencyFormatter::system().format_money_string(value, currency_code)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn us() -> CurrencyFormatter {
        CurrencyFormatter::new(Locale::EN_US)
    }

    fn de() -> CurrencyFormatter {
        CurrencyFormatter::new(Locale::DE_DE)
    }

    #[test]
    fn test_money_string_shows_euro_symbol() {
        assert!(format_money_string("1000.00", "EUR").contains('€'));
        for locale in Locale::ALL {
            let out = CurrencyFormatter::new(locale).format_money_string("1000.00", "EUR");
            assert!(out.contains('€'), "{}: {out}", locale.tag);
        }
    }

    #[test]
    fn test_invalid_money_string_is_shown_verbatim() {
        assert_eq!(format_money_string("abc", "EUR"), "abc EUR");
        assert_eq!(de().format_money_string("", "USD"), " USD");
        assert_eq!(us().format_money_string("1,000.00", "EUR"), "1,000.00 EUR");
        assert_eq!(us().format_money_string("NaN", "EUR"), "NaN EUR");
    }

    #[test]
    fn test_en_us_layout() {
        assert_eq!(us().format_currency(1234.56, "USD"), "$1,234.56");
        assert_eq!(us().format_currency(-500.0, "USD"), "-$500.00");
        assert_eq!(us().format_currency(0.0, "EUR"), "€0.00");
        assert_eq!(us().format_currency(1_000_000.99, "GBP"), "£1,000,000.99");
        assert_eq!(us().format_money_string("42.10", "EUR"), "€42.10");
    }

    #[test]
    fn test_de_de_layout() {
        assert_eq!(de().format_currency(1000.0, "EUR"), "1.000,00\u{a0}€");
        assert_eq!(de().format_money_string("-12.34", "EUR"), "-12,34\u{a0}€");
        assert_eq!(de().format_currency(999.5, "USD"), "999,50\u{a0}$");
    }

    #[test]
    fn test_other_layouts() {
        let fr = CurrencyFormatter::new(Locale::FR_FR);
        assert_eq!(fr.format_currency(1234.5, "EUR"), "1\u{202f}234,50\u{a0}€");

        let es = CurrencyFormatter::new(Locale::ES_ES);
        assert_eq!(es.format_currency(1000.0, "EUR"), "1000,00\u{a0}€");
        assert_eq!(es.format_currency(10000.0, "EUR"), "10.000,00\u{a0}€");

        let it = CurrencyFormatter::new(Locale::IT_IT);
        assert_eq!(it.format_currency(1000.0, "EUR"), "1000,00\u{a0}€");
        assert_eq!(it.format_currency(10000.0, "EUR"), "10.000,00\u{a0}€");
        assert_eq!(it.format_currency(-1234567.891, "EUR"), "-1.234.567,89\u{a0}€");

        let br = CurrencyFormatter::new(Locale::PT_BR);
        assert_eq!(br.format_currency(-1234.5, "BRL"), "-R$\u{a0}1.234,50");
    }

    #[test]
    fn test_rounds_to_two_digits_half_away_from_zero() {
        assert_eq!(us().format_currency(12.345, "USD"), "$12.35");
        assert_eq!(us().format_currency(-12.345, "USD"), "-$12.35");
        assert_eq!(us().format_currency(0.004, "USD"), "$0.00");
        assert_eq!(us().format_currency(999.999, "USD"), "$1,000.00");
    }

    #[test]
    fn test_negative_value_rounding_to_zero_keeps_sign() {
        assert_eq!(us().format_currency(-0.001, "EUR"), "-€0.00");
        assert_eq!(us().format_currency(-0.0, "EUR"), "-€0.00");
        assert_eq!(us().format_money_string("-0.001", "EUR"), "-€0.00");
        assert_eq!(us().format_money_string("-0.00", "EUR"), "-€0.00");
        assert_eq!(de().format_money_string("-0.004", "EUR"), "-0,00\u{a0}€");
        assert_eq!(us().format_currency(0.0, "EUR"), "€0.00");
    }

    #[test]
    fn test_zero_digit_currencies() {
        assert_eq!(us().format_currency(1500.0, "JPY"), "¥1,500");
        assert_eq!(us().format_currency(1500.5, "JPY"), "¥1,500.5");
        assert_eq!(us().format_currency(1500.257, "JPY"), "¥1,500.26");
    }

    #[test]
    fn test_unknown_currency_uses_code() {
        assert_eq!(us().format_currency(5.0, "xyz"), "XYZ\u{a0}5.00");
        assert_eq!(us().format_currency(5.0, "CHF"), "CHF\u{a0}5.00");
        assert_eq!(de().format_currency(5.0, "SEK"), "5,00\u{a0}SEK");
        assert_eq!(us().format_currency(5.0, ""), "5.00");
    }

    #[test]
    fn test_non_finite_values_do_not_panic() {
        assert_eq!(us().format_currency(f64::NAN, "EUR"), "€NaN");
        assert_eq!(us().format_currency(f64::NEG_INFINITY, "EUR"), "-€∞");
        assert_eq!(de().format_currency(f64::INFINITY, "EUR"), "∞\u{a0}€");
    }

    #[test]
    fn test_signed_change() {
        assert_eq!(us().format_signed_change(250.0, "EUR"), "+€250.00");
        assert_eq!(us().format_signed_change(0.0, "EUR"), "+€0.00");
        assert_eq!(us().format_signed_change(-3.5, "EUR"), "-€3.50");
        assert_eq!(us().format_signed_change(-0.001, "EUR"), "-€0.00");
        assert_eq!(us().format_signed_change(-0.0, "EUR"), "-€0.00");
    }

    #[test]
    fn test_kpi_placeholder() {
        assert_eq!(us().format_kpi(None, "EUR"), "—");
        let total = MoneyString::from("940.00");
        assert_eq!(us().format_kpi(Some(&total), "EUR"), "€940.00");
    }

    #[test]
    fn test_locale_parse() {
        assert_eq!(Locale::parse("de-DE"), Some(Locale::DE_DE));
        assert_eq!(Locale::parse("de_DE.UTF-8@euro"), Some(Locale::DE_DE));
        assert_eq!(Locale::parse("de_AT.UTF-8"), Some(Locale::DE_DE));
        assert_eq!(Locale::parse("FR"), Some(Locale::FR_FR));
        assert_eq!(Locale::parse("en_GB"), Some(Locale::EN_GB));
        assert_eq!(Locale::parse("C"), None);
        assert_eq!(Locale::parse(""), None);
    }

    #[test]
    fn test_locale_from_env_precedence() {
        assert_eq!(
            Locale::from_env_values(Some("fr_FR.UTF-8"), Some("de_DE"), Some("en_GB")),
            Locale::FR_FR
        );
        assert_eq!(
            Locale::from_env_values(Some(""), Some("de_DE"), Some("en_GB")),
            Locale::DE_DE
        );
        assert_eq!(Locale::from_env_values(None, None, Some("it_IT.UTF-8")), Locale::IT_IT);
        assert_eq!(Locale::from_env_values(None, None, Some("POSIX")), Locale::EN_US);
        assert_eq!(Locale::from_env_values(None, None, None), Locale::EN_US);
    }
}
