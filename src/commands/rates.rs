use crate::api::{self, Mode};
use crate::commands::Out;
use crate::notify::TerminalNotifier;
use crate::screen::{ReferenceRow, Screen};
use crate::{Config, Result};
use serde::Serialize;

/// The structured output of the `rates` command.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RatesReport {
    base: String,
    last_updated: Option<String>,
    rows: Vec<ReferenceRow>,
}

/// Fetches the latest rates once and reports the price of one unit of each tracked currency in
/// the base currency. A failed fetch shows one alert and reports every price as unavailable.
pub async fn rates(config: Config, mode: Mode) -> Result<Out<RatesReport>> {
    let source = api::rate_source(&config, mode);
    let mut screen = Screen::new(config.base_currency());
    let mut notifier = TerminalNotifier;
    screen.load_rates(source.as_ref(), &mut notifier).await;

    let report = RatesReport {
        base: screen.rates().base().to_string(),
        last_updated: screen
            .rates()
            .last_updated()
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string()),
        rows: screen.reference_rows(),
    };

    let mut message = format!("Exchange rates relative to {}", report.base);
    for row in &report.rows {
        match row.price {
            Some(price) => message.push_str(&format!(
                "\n{:<10} 1 {} = {:.2} {}",
                row.name, row.code, price, report.base
            )),
            None => message.push_str(&format!("\n{:<10} 1 {} = unavailable", row.name, row.code)),
        }
    }
    if let Some(last_updated) = &report.last_updated {
        message.push_str(&format!("\nLast updated: {last_updated}"));
    }

    Ok(Out::new(message, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::TestEnv;

    #[tokio::test]
    async fn test_rates_command_in_test_mode() {
        let env = TestEnv::new().await;
        let out = rates(env.config(), Mode::Test).await.unwrap();
        assert!(out.message().contains("1 USD = 5.00 BRL"));
        assert!(out.message().contains("1 BRL = 1.00 BRL"));
        assert!(out.message().contains("Last updated:"));

        let report = out.structure().unwrap();
        let json = serde_json::to_value(report).unwrap();
        assert_eq!(json["base"], "BRL");
        assert_eq!(json["rows"].as_array().unwrap().len(), 3);
    }
}
