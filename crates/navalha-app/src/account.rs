use anyhow::{Context, Result, anyhow};
use navalha_core::api::auth;
use navalha_core::dates::now_utc_rfc3339;
use navalha_core::models::StaffUser;
use navalha_core::session::{StoredSession, clear_session, store_session};

use crate::App;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginResult {
    pub email: String,
}

impl<'a> App<'a> {
    pub fn login(&self, email: &str, password: &str) -> Result<LoginResult> {
        let session = self.public_session()?;
        let token = auth::login(self.transport, &session, email, password)
            .with_context(|| format!("login failed for '{email}'"))?;

        let saved_at = now_utc_rfc3339()
            .map_err(|error| anyhow!("failed to format session timestamp: {error}"))?;

        let config_dir = self.config_dir()?;
        store_session(
            &config_dir,
            StoredSession {
                email: email.to_string(),
                access_token: token.access_token,
                saved_at,
            },
        )
        .context("failed to persist session")?;

        Ok(LoginResult {
            email: email.to_string(),
        })
    }

    /// Returns the email of the removed session, if one was stored.
    pub fn logout(&self) -> Result<Option<String>> {
        let config_dir = self.config_dir()?;
        let removed = clear_session(&config_dir).context("failed to clear session")?;
        Ok(removed.map(|session| session.email))
    }

    pub fn current_user(&self) -> Result<StaffUser> {
        let session = self.authorized_session()?;
        auth::current_user(self.transport, &session)
            .context("failed to fetch the logged-in user")
    }
}
