use anyhow::Result;

use finboard::settings::load_settings;

use super::DisplayArgs;

pub fn run(amount: &str, display: &DisplayArgs) -> Result<()> {
    let settings = load_settings();
    let formatter = display.formatter(&settings)?;
    let currency = display.currency(None, &settings);
    println!("{}", formatter.format_money_string(amount, &currency));
    Ok(())
}
