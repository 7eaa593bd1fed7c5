use crate::args::InitArgs;
use crate::commands::Out;
use crate::{Config, Result};
use anyhow::Context;
use std::path::Path;

/// Creates the data directory and an initial `config.json` file using the provided base currency,
/// API URL and profile, falling back to defaults for anything not given.
///
/// # Errors
/// - Returns an error if any file operations fail or the provided values do not validate.
pub async fn init(cambio_home: &Path, args: &InitArgs) -> Result<Out<()>> {
    let _config = Config::create(
        cambio_home,
        args.base(),
        args.api_url(),
        args.user_name(),
        args.avatar_url(),
    )
    .await
    .context("Unable to create the data directory and config")?;
    Ok("Successfully created the cambio directory and config".into())
}
