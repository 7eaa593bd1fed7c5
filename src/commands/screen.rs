//! The interactive converter screen: a line-oriented rendition of the original single-screen UI.
//!
//! The screen fetches rates once when it opens. Amount fields follow the original's two-phase
//! editing: `edit` stores raw text for one field only (a keystroke), `set` commits the field and
//! propagates the value to every other currency. `filter`, `up` and `down` manage the tracked
//! currency list, and `signout` ends the session.

use crate::api::{self, Mode};
use crate::auth::{ConfigSession, Session};
use crate::commands::Out;
use crate::notify::TerminalNotifier;
use crate::screen::Screen;
use crate::{Config, Result};
use anyhow::Context;
use std::str::FromStr;
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "\
Screen commands:
  show                 Print the amount fields and the reference price table
  edit CODE [TEXT]     Store raw text in one field without recomputing the others
  set CODE [TEXT]      Commit a field and recompute every other currency's amount
  filter [QUERY]       Show only currencies whose name contains QUERY (empty to clear)
  up INDEX             Move the currency at INDEX one position up
  down INDEX           Move the currency at INDEX one position down
  refresh              Fetch the exchange rates again
  whoami               Print the signed-in user's profile
  signout              Sign out and close the screen
  help                 Print this help
  quit                 Close the screen";

/// One parsed line of screen input.
#[derive(Debug, Clone, Eq, PartialEq)]
enum ScreenCommand {
    Help,
    Show,
    Refresh,
    Whoami,
    SignOut,
    Quit,
    Edit { code: String, text: String },
    Set { code: String, text: String },
    Filter { query: String },
    Up { index: usize },
    Down { index: usize },
}

impl FromStr for ScreenCommand {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (keyword, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((keyword, rest)) => (keyword, rest.trim()),
            None => (trimmed, ""),
        };
        match keyword.to_lowercase().as_str() {
            "help" => Ok(Self::Help),
            "show" => Ok(Self::Show),
            "refresh" => Ok(Self::Refresh),
            "whoami" => Ok(Self::Whoami),
            "signout" => Ok(Self::SignOut),
            "quit" | "exit" => Ok(Self::Quit),
            "filter" => Ok(Self::Filter {
                query: rest.to_string(),
            }),
            "up" => parse_index(rest).map(|index| Self::Up { index }),
            "down" => parse_index(rest).map(|index| Self::Down { index }),
            "edit" => parse_field(rest).map(|(code, text)| Self::Edit { code, text }),
            "set" => parse_field(rest).map(|(code, text)| Self::Set { code, text }),
            "" => Err("Type 'help' for the list of screen commands".to_string()),
            other => Err(format!(
                "Unknown command '{other}'; type 'help' for the list of screen commands"
            )),
        }
    }
}

fn parse_index(rest: &str) -> std::result::Result<usize, String> {
    rest.parse()
        .map_err(|_| format!("Expected a list index, got '{rest}'"))
}

fn parse_field(rest: &str) -> std::result::Result<(String, String), String> {
    let (code, text) = match rest.split_once(char::is_whitespace) {
        Some((code, text)) => (code, text.trim()),
        None => (rest, ""),
    };
    if code.is_empty() {
        return Err("Expected a currency code, e.g. 'set BRL 100'".to_string());
    }
    Ok((code.to_uppercase(), text.to_string()))
}

/// Opens the interactive screen and runs its event loop until `quit` or `signout`.
pub async fn screen(config: Config, mode: Mode) -> Result<Out<()>> {
    let source = api::rate_source(&config, mode);
    let mut session = ConfigSession::new(config.clone());
    let mut screen = Screen::new(config.base_currency());
    let mut notifier = TerminalNotifier;
    screen.load_rates(source.as_ref(), &mut notifier).await;

    println!("{}", header(&session));
    println!("{}", render(&screen));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    prompt()?;
    while let Some(line) = lines
        .next_line()
        .await
        .context("Failed to read from stdin")?
    {
        if line.trim().is_empty() {
            prompt()?;
            continue;
        }
        let command = match line.parse::<ScreenCommand>() {
            Ok(command) => command,
            Err(message) => {
                println!("{message}");
                prompt()?;
                continue;
            }
        };
        match command {
            ScreenCommand::Help => println!("{HELP}"),
            ScreenCommand::Show => println!("{}", render(&screen)),
            ScreenCommand::Refresh => {
                screen.load_rates(source.as_ref(), &mut notifier).await;
                println!("{}", render(&screen));
            }
            ScreenCommand::Whoami => println!("{}", whoami(&session)),
            ScreenCommand::SignOut => {
                session.sign_out().await?;
                println!("Signed out.");
                break;
            }
            ScreenCommand::Quit => break,
            ScreenCommand::Edit { code, text } => {
                if screen.currencies().get(&code).is_none() {
                    println!("'{code}' is not a tracked currency");
                } else {
                    screen.edit_amount(&code, &text);
                    println!("{}", render(&screen));
                }
            }
            ScreenCommand::Set { code, text } => {
                if screen.currencies().get(&code).is_none() {
                    println!("'{code}' is not a tracked currency");
                } else {
                    screen.commit_amount(&code, &text);
                    println!("{}", render(&screen));
                }
            }
            ScreenCommand::Filter { query } => {
                screen.set_filter(&query);
                println!("{}", render(&screen));
            }
            ScreenCommand::Up { index } => {
                if !screen.move_up(index) {
                    println!("Cannot move index {index} up");
                }
                println!("{}", render(&screen));
            }
            ScreenCommand::Down { index } => {
                if !screen.move_down(index) {
                    println!("Cannot move index {index} down");
                }
                println!("{}", render(&screen));
            }
        }
        prompt()?;
    }

    Ok("Screen closed".into())
}

fn prompt() -> Result<()> {
    use std::io::Write;
    print!("cambio> ");
    std::io::stdout().flush().context("Failed to flush stdout")
}

fn header(session: &ConfigSession) -> String {
    match session.display_name() {
        Some(name) => format!("Currency converter - signed in as {name}"),
        None => "Currency converter".to_string(),
    }
}

fn whoami(session: &ConfigSession) -> String {
    match (session.display_name(), session.avatar_url()) {
        (Some(name), Some(avatar)) => format!("{name} ({avatar})"),
        (Some(name), None) => name.to_string(),
        _ => "Not signed in".to_string(),
    }
}

/// Renders the visible currency fields and the reference price table. Indices shown are positions
/// in the canonical list, which is what `up` and `down` operate on.
fn render(screen: &Screen) -> String {
    let mut out = String::new();
    if !screen.query().is_empty() {
        out.push_str(&format!("Filter: '{}'\n", screen.query()));
    }
    for currency in screen.visible() {
        let index = screen
            .currencies()
            .position(currency.code())
            .unwrap_or_default();
        out.push_str(&format!(
            "[{index}] {:<10} ({}): {}\n",
            currency.name(),
            currency.code(),
            screen.amount(currency.code())
        ));
    }
    let base = screen.rates().base().to_string();
    for row in screen.reference_rows() {
        match row.price {
            Some(price) => out.push_str(&format!("1 {} = {:.2} {base}\n", row.code, price)),
            None => out.push_str(&format!("1 {} = loading...\n", row.code)),
        }
    }
    match screen.rates().last_updated() {
        Some(time) => out.push_str(&format!(
            "Last updated: {}",
            time.format("%Y-%m-%d %H:%M:%S")
        )),
        None => out.push_str("Rates not loaded"),
    }
    out
}
