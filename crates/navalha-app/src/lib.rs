mod account;
mod agenda;
mod book;
mod cash;
mod clients;
mod insights;
mod sales;
mod services;

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use navalha_core::api::ApiSession;
use navalha_core::config::{NavalhaConfig, load_config, resolve_config_path};
use navalha_core::doctor::{DoctorReport, run_doctor};
use navalha_core::session::load_session;
use navalha_core::transport::HttpTransport;

pub use account::LoginResult;
pub use agenda::AgendaRow;
pub use book::BookingCatalog;
pub use insights::DashboardOverview;

pub struct App<'a> {
    pub transport: &'a dyn HttpTransport,
}

impl<'a> App<'a> {
    pub fn new(transport: &'a dyn HttpTransport) -> Self {
        Self { transport }
    }

    pub fn doctor(&self) -> Result<DoctorReport> {
        Ok(run_doctor(self.transport))
    }

    pub fn ensure_config_ready(&self) -> Result<NavalhaConfig> {
        let config_path = resolve_config_path().context("failed to resolve config path")?;

        if !config_path.exists() {
            bail!(
                "missing config at {}\nCreate ~/.config/navalha/config.toml and see README.md for setup instructions.",
                config_path.display()
            );
        }

        load_config(&config_path).map_err(|error| {
            anyhow!(
                "invalid config at {}: {error}\nFix the config and retry. See README.md for setup instructions.",
                config_path.display()
            )
        })
    }

    pub(crate) fn config_dir(&self) -> Result<PathBuf> {
        let config_path = resolve_config_path().context("failed to resolve config path")?;
        config_path
            .parent()
            .map(PathBuf::from)
            .ok_or_else(|| anyhow!("config path has no parent directory"))
    }

    /// Session for the unauthenticated public booking endpoints.
    pub fn public_session(&self) -> Result<ApiSession> {
        let config = self.ensure_config_ready()?;
        Ok(ApiSession::new(config.api.base_url.trim()))
    }

    /// Session for the staff endpoints; requires a stored login token.
    pub fn authorized_session(&self) -> Result<ApiSession> {
        let config = self.ensure_config_ready()?;
        let config_dir = self.config_dir()?;

        let stored = load_session(&config_dir).context("failed to load stored session")?;
        let Some(stored) = stored else {
            bail!("not logged in\nRun 'navalha login --email you@example.com' first.");
        };

        Ok(ApiSession::new(config.api.base_url.trim()).with_token(stored.access_token))
    }
}
