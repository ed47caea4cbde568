use anyhow::{bail, Result};

use finboard::currency::Locale;
use finboard::settings::{load_settings, save_settings, settings_path};

pub fn show() -> Result<()> {
    let settings = load_settings();
    let formatter = settings.formatter();
    println!("Settings:  {}", settings_path().display());
    println!("Currency:  {}", settings.currency);
    println!(
        "Locale:    {}",
        settings.locale.as_deref().unwrap_or("(from environment)")
    );
    println!("Using:     {}", formatter.locale().tag);
    println!(
        "Sample:    {}",
        formatter.format_currency(-1234.5, &settings.currency)
    );
    Ok(())
}

pub fn set_currency(code: &str) -> Result<()> {
    let code = code.trim().to_ascii_uppercase();
    if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_alphabetic()) {
        bail!("Currency must be a three-letter ISO 4217 code, got {code:?}");
    }
    let mut settings = load_settings();
    settings.currency = code;
    save_settings(&settings)?;
    println!("Currency set to {}", settings.currency);
    Ok(())
}

pub fn set_locale(tag: &str) -> Result<()> {
    let Some(locale) = Locale::parse(tag) else {
        bail!("Unknown locale: {tag}");
    };
    let mut settings = load_settings();
    settings.locale = Some(locale.tag.to_string());
    save_settings(&settings)?;
    println!("Locale set to {}", locale.tag);
    Ok(())
}

pub fn clear_locale() -> Result<()> {
    let mut settings = load_settings();
    settings.locale = None;
    save_settings(&settings)?;
    println!("Locale cleared; using the environment.");
    Ok(())
}
