pub mod cli;
pub mod diagnostics;
pub mod dispatch;

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use navalha_app::App;
use navalha_core::config::{DEFAULT_TIMEOUT_SECS, load_config, resolve_config_path};
use navalha_core::transport::ReqwestTransport;

use crate::cli::Cli;
use crate::diagnostics::DiagnosticsSession;

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let diagnostics = DiagnosticsSession::initialize(cli.diagnostics)?;
    if let Some(path) = diagnostics.path() {
        eprintln!("Diagnostics enabled: {}", path.display());
    }

    let transport = ReqwestTransport::new(configured_timeout())?;
    let app = App::new(&transport);

    dispatch::run_with_deps(cli, &app, &diagnostics)
}

/// Commands that run before the config exists (doctor, --help) still need a
/// transport; fall back to the default timeout when no config is readable.
fn configured_timeout() -> Duration {
    resolve_config_path()
        .ok()
        .and_then(|path| load_config(&path).ok())
        .map(|config| config.api.timeout())
        .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
}
