//! These structs provide the CLI interface for the cambio CLI.

use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// cambio: A command-line currency converter with live exchange rates.
///
/// The purpose of this program is to convert amounts between a small set of tracked currencies
/// using live exchange rates fetched from a public HTTP API. There are one-shot commands for
/// scripted use and an interactive screen where you can edit amount fields, filter the tracked
/// currency list and reorder it.
///
/// Run `cambio init` once to create the data directory and configuration file.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the data directory and initialize the configuration file.
    ///
    /// This is the first command you should run when setting up the cambio CLI. Decide what
    /// directory you want the configuration in and pass it as --cambio-home; by default it will be
    /// $HOME/cambio. Optionally choose a base currency and provide the signed-in user's profile.
    Init(InitArgs),

    /// Fetch the latest exchange rates and print the reference price table.
    Rates,

    /// Convert an amount in one currency to every tracked currency.
    Convert(ConvertArgs),

    /// Open the interactive converter screen.
    ///
    /// The screen fetches rates once on open. Type `help` inside the screen for the list of
    /// screen commands (editing amount fields, filtering and reordering the currency list).
    Screen,
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG. See the tracing-subscriber crate for instructions.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where cambio configuration is held. Defaults to ~/cambio
    #[arg(long, env = "CAMBIO_HOME", default_value_t = default_cambio_home())]
    cambio_home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, cambio_home: PathBuf) -> Self {
        Self {
            log_level,
            cambio_home: cambio_home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn cambio_home(&self) -> &DisplayPath {
        &self.cambio_home
    }
}

/// Args for the `cambio init` command.
#[derive(Debug, Parser, Clone)]
pub struct InitArgs {
    /// The fixed base currency that rates are fetched relative to, e.g. BRL.
    #[arg(long)]
    base: Option<String>,

    /// The exchange-rate API endpoint. Defaults to the public exchangerate-api host.
    #[arg(long)]
    api_url: Option<String>,

    /// The signed-in user's display name, shown in the screen header.
    #[arg(long)]
    user_name: Option<String>,

    /// The signed-in user's avatar URL.
    #[arg(long)]
    avatar_url: Option<String>,
}

impl InitArgs {
    pub fn base(&self) -> Option<&str> {
        self.base.as_deref()
    }

    pub fn api_url(&self) -> Option<&str> {
        self.api_url.as_deref()
    }

    pub fn user_name(&self) -> Option<&str> {
        self.user_name.as_deref()
    }

    pub fn avatar_url(&self) -> Option<&str> {
        self.avatar_url.as_deref()
    }
}

/// Args for the `cambio convert` command.
#[derive(Debug, Parser, Clone)]
pub struct ConvertArgs {
    /// The amount to convert. Taken as raw text; characters other than digits, a decimal point
    /// and a minus sign are ignored.
    amount: String,

    /// The currency the amount is denominated in. Defaults to the configured base currency.
    #[arg(long)]
    currency: Option<String>,

    /// Only print currencies whose display name contains this text, case-insensitively.
    #[arg(long)]
    filter: Option<String>,
}

impl ConvertArgs {
    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn currency(&self) -> Option<&str> {
        self.currency.as_deref()
    }

    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }
}

fn default_cambio_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("cambio"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --cambio-home or CAMBIO_HOME instead of relying on the default \
                cambio home directory. If you continue using the program right now, you may have \
                problems!",
            );
            PathBuf::from("cambio")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn new(path: PathBuf) -> Self {
        Self(path)
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}
