//! Login command - exchange a license key for a token.

use tracing::info;

use crate::cli::output;
use crate::core::cloud::HttpControlPlane;
use crate::core::config::{Context, ProjectConfig};
use crate::core::store::{Token, TokenStore};
use crate::error::{InputError, Result};

/// Log in, store the token and switch this directory to cloud mode.
pub fn execute(ctx: &Context, license: &str) -> Result<()> {
    let license = license.trim();
    if license.is_empty() {
        return Err(InputError::EmptyLicense.into());
    }

    let client = HttpControlPlane::from_context(ctx, None)?;
    let response = client.login(license)?;

    let token = Token::parse(&response.token)?;
    TokenStore::open(ctx).save(&token)?;

    let mut config = ProjectConfig::load_or_create(ctx)?;
    config.mode = "cloud".to_string();
    config.save(ctx)?;

    info!(user = %response.user.id, "logged in");
    output::success(&format!("logged in as {}", response.user.email));
    output::kv("plan:", &response.user.plan);
    Ok(())
}
