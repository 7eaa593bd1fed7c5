//! The external session collaborator: who is signed in, and signing out.
//!
//! The converter only consumes a display name and avatar URL and can request sign-out; how the
//! user got signed in is not this program's concern. The production implementation is backed by
//! the profile fields of `config.json`.

use crate::{Config, Result};

/// A signed-in user's session as seen by the screen.
#[async_trait::async_trait]
pub(crate) trait Session {
    fn display_name(&self) -> Option<&str>;

    fn avatar_url(&self) -> Option<&str>;

    /// Signs the user out. After this returns, the profile accessors return `None`.
    async fn sign_out(&mut self) -> Result<()>;
}

/// A `Session` backed by the profile stored in `config.json`.
pub(crate) struct ConfigSession {
    config: Config,
    display_name: Option<String>,
    avatar_url: Option<String>,
}

impl ConfigSession {
    pub(crate) fn new(config: Config) -> Self {
        let display_name = config.user_name().map(str::to_string);
        let avatar_url = config.avatar_url().map(str::to_string);
        Self {
            config,
            display_name,
            avatar_url,
        }
    }
}

#[async_trait::async_trait]
impl Session for ConfigSession {
    fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    fn avatar_url(&self) -> Option<&str> {
        self.avatar_url.as_deref()
    }

    async fn sign_out(&mut self) -> Result<()> {
        self.config.clear_profile().await?;
        self.display_name = None;
        self.avatar_url = None;
        Ok(())
    }
}
