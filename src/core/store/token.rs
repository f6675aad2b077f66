//! Bearer token storage.

use std::fmt;
use std::fs;
use std::path::PathBuf;

use tracing::debug;
use zeroize::Zeroizing;

use super::ensure_private_dir;
use crate::core::config::Context;
use crate::core::guard;
use crate::error::{AuthError, Result};

/// Opaque bearer credential for the control-plane.
#[derive(Clone)]
pub struct Token(Zeroizing<String>);

impl Token {
    /// Validate and wrap a raw token string.
    ///
    /// Surrounding whitespace is trimmed; anything left that is empty or
    /// contains whitespace or control characters is corrupted.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty()
            || trimmed
                .chars()
                .any(|c| c.is_whitespace() || c.is_control())
        {
            return Err(AuthError::CorruptedToken.into());
        }
        Ok(Self(Zeroizing::new(trimmed.to_string())))
    }

    /// The token text, for the Authorization header.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(***)")
    }
}

/// Token file in the per-user configuration directory.
pub struct TokenStore {
    dir: PathBuf,
    path: PathBuf,
}

impl TokenStore {
    pub fn open(ctx: &Context) -> Self {
        Self {
            dir: ctx.config_dir.clone(),
            path: ctx.token_path(),
        }
    }

    /// Load the token.
    ///
    /// # Errors
    ///
    /// `AuthError::NotLoggedIn` if there is no token file,
    /// `AuthError::CorruptedToken` if its contents are unusable.
    pub fn load(&self) -> Result<Token> {
        if !self.path.exists() {
            return Err(AuthError::NotLoggedIn.into());
        }
        let bytes = Zeroizing::new(fs::read(&self.path)?);
        let text = std::str::from_utf8(&bytes).map_err(|_| AuthError::CorruptedToken)?;
        debug!(path = %self.path.display(), "token loaded");
        Token::parse(text)
    }

    /// Persist a token, replacing any previous one.
    pub fn save(&self, token: &Token) -> Result<()> {
        ensure_private_dir(&self.dir)?;
        guard::write_private_atomic(&self.path, token.as_str().as_bytes())?;
        debug!(path = %self.path.display(), "token saved");
        Ok(())
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}
