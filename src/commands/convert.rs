use crate::api::{self, Mode};
use crate::args::ConvertArgs;
use crate::commands::Out;
use crate::notify::TerminalNotifier;
use crate::screen::Screen;
use crate::{Config, Result};
use anyhow::{bail, ensure};
use serde::Serialize;

/// The structured output of the `convert` command.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct Conversion {
    currency: String,
    amount: String,
    rows: Vec<ConvertedAmount>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
struct ConvertedAmount {
    code: String,
    name: String,
    amount: String,
}

/// Fetches the latest rates once, commits `amount` into the given currency's field and reports
/// the resulting amount of every tracked currency (optionally filtered by display name).
pub async fn convert(config: Config, mode: Mode, args: ConvertArgs) -> Result<Out<Conversion>> {
    let source = api::rate_source(&config, mode);
    let mut screen = Screen::new(config.base_currency());

    let code = args
        .currency()
        .unwrap_or_else(|| config.base_currency())
        .to_uppercase();
    ensure!(
        screen.currencies().get(&code).is_some(),
        "'{code}' is not a tracked currency"
    );

    let mut notifier = TerminalNotifier;
    screen.load_rates(source.as_ref(), &mut notifier).await;
    if screen.rates().is_empty() {
        bail!("No exchange rates are available");
    }

    screen.commit_amount(&code, args.amount());
    if let Some(filter) = args.filter() {
        screen.set_filter(filter);
    }

    let rows: Vec<ConvertedAmount> = screen
        .visible()
        .into_iter()
        .map(|currency| ConvertedAmount {
            code: currency.code().to_string(),
            name: currency.name().to_string(),
            amount: screen.amount(currency.code()).to_string(),
        })
        .collect();

    let conversion = Conversion {
        currency: code.clone(),
        amount: screen.amount(&code).to_string(),
        rows,
    };

    let mut message = format!("{} {}", conversion.amount, conversion.currency);
    for row in &conversion.rows {
        message.push_str(&format!("\n{:<10} ({}): {}", row.name, row.code, row.amount));
    }

    Ok(Out::new(message, conversion))
}
