use std::fmt;
use std::path::Path;

use crate::api::{self, ApiSession};
use crate::config::{load_config, resolve_config_path};
use crate::session::load_session;
use crate::transport::HttpTransport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckState {
    Pass,
    Fail,
}

impl fmt::Display for CheckState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => write!(f, "PASS"),
            Self::Fail => write!(f, "FAIL"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoctorCheck {
    pub name: String,
    pub state: CheckState,
    pub details: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoctorReport {
    pub checks: Vec<DoctorCheck>,
}

impl DoctorReport {
    pub fn has_failures(&self) -> bool {
        self.checks
            .iter()
            .any(|check| check.state == CheckState::Fail)
    }

    pub fn summary(&self) -> String {
        let passed = self
            .checks
            .iter()
            .filter(|check| check.state == CheckState::Pass)
            .count();
        let failed = self.checks.len().saturating_sub(passed);
        format!("{passed} passed, {failed} failed")
    }
}

pub fn run_doctor(transport: &dyn HttpTransport) -> DoctorReport {
    match resolve_config_path() {
        Ok(config_path) => run_doctor_at(transport, &config_path),
        Err(error) => {
            let mut checks = vec![fail_check("config path resolves", error.to_string())];
            push_skipped_checks(
                &mut checks,
                &[
                    "config file exists",
                    "config parses and validates",
                    "api is reachable",
                    "session token stored",
                ],
                "config path could not be resolved",
            );
            DoctorReport { checks }
        }
    }
}

pub fn run_doctor_at(transport: &dyn HttpTransport, config_path: &Path) -> DoctorReport {
    let mut checks = Vec::new();

    if !config_path.exists() {
        checks.push(fail_check(
            "config file exists",
            format!("expected at {}", config_path.display()),
        ));
        push_skipped_checks(
            &mut checks,
            &["config parses and validates", "api is reachable"],
            "config file is missing",
        );
        checks.push(check_session(config_path));
        return DoctorReport { checks };
    }

    checks.push(pass_check(
        "config file exists",
        format!("found at {}", config_path.display()),
    ));

    match load_config(config_path) {
        Ok(config) => {
            checks.push(pass_check("config parses and validates", "config is valid"));
            checks.push(check_api_reachable(
                transport,
                &ApiSession::new(config.api.base_url.trim()),
            ));
        }
        Err(error) => {
            checks.push(fail_check("config parses and validates", error.to_string()));
            checks.push(skipped_check("api is reachable", "config is invalid"));
        }
    }

    checks.push(check_session(config_path));

    DoctorReport { checks }
}

fn check_api_reachable(transport: &dyn HttpTransport, session: &ApiSession) -> DoctorCheck {
    match api::public::fetch_services(transport, session) {
        Ok(services) => pass_check(
            "api is reachable",
            format!(
                "{} responded with {} public service(s)",
                session.base_url(),
                services.len()
            ),
        ),
        Err(error) => fail_check(
            "api is reachable",
            format!("failed to query public services: {error}"),
        ),
    }
}

fn check_session(config_path: &Path) -> DoctorCheck {
    let Some(config_dir) = config_path.parent() else {
        return fail_check("session token stored", "config path has no parent directory");
    };

    match load_session(config_dir) {
        Ok(Some(session)) => pass_check(
            "session token stored",
            format!("logged in as {}", session.email),
        ),
        Ok(None) => fail_check(
            "session token stored",
            "no session found; run 'navalha login' to authenticate",
        ),
        Err(error) => fail_check("session token stored", error.to_string()),
    }
}

fn pass_check(name: &str, details: impl Into<String>) -> DoctorCheck {
    DoctorCheck {
        name: name.to_string(),
        state: CheckState::Pass,
        details: details.into(),
    }
}

fn fail_check(name: &str, details: impl Into<String>) -> DoctorCheck {
    DoctorCheck {
        name: name.to_string(),
        state: CheckState::Fail,
        details: details.into(),
    }
}

fn skipped_check(name: &str, reason: &str) -> DoctorCheck {
    fail_check(name, format!("skipped because {reason}"))
}

fn push_skipped_checks(checks: &mut Vec<DoctorCheck>, names: &[&str], reason: &str) {
    checks.extend(
        names
            .iter()
            .copied()
            .map(|name| skipped_check(name, reason)),
    );
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::session::{StoredSession, store_session};
    use crate::test_support::{RecordingTransport, json_response};

    fn write_config(dir: &Path) -> std::path::PathBuf {
        let path = dir.join("config.toml");
        fs::write(
            &path,
            "version = 1\n\n[api]\nbase_url = \"http://localhost:8000\"\n",
        )
        .expect("write config");
        path
    }

    #[test]
    fn check_state_display_is_uppercase_label() {
        assert_eq!(CheckState::Pass.to_string(), "PASS");
        assert_eq!(CheckState::Fail.to_string(), "FAIL");
    }

    #[test]
    fn doctor_summary_counts_pass_and_fail() {
        let report = DoctorReport {
            checks: vec![
                DoctorCheck {
                    name: "a".to_string(),
                    state: CheckState::Pass,
                    details: "ok".to_string(),
                },
                DoctorCheck {
                    name: "b".to_string(),
                    state: CheckState::Fail,
                    details: "no".to_string(),
                },
            ],
        };

        assert_eq!(report.summary(), "1 passed, 1 failed");
        assert!(report.has_failures());
    }

    #[test]
    fn missing_config_cascades_to_skipped_checks() {
        let temp = tempfile::tempdir().expect("temp dir");
        let transport = RecordingTransport::new(vec![]);

        let report = run_doctor_at(&transport, &temp.path().join("config.toml"));

        assert!(report.has_failures());
        let api_check = report
            .checks
            .iter()
            .find(|check| check.name == "api is reachable")
            .expect("api check");
        assert!(api_check.details.contains("skipped because"));
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn healthy_environment_passes_all_checks() {
        let temp = tempfile::tempdir().expect("temp dir");
        let config_path = write_config(temp.path());
        store_session(
            temp.path(),
            StoredSession {
                email: "admin@barbearia.com".to_string(),
                access_token: "jwt".to_string(),
                saved_at: "2026-02-01T10:00:00Z".to_string(),
            },
        )
        .expect("store session");

        let transport = RecordingTransport::new(vec![json_response(200, "[]")]);
        let report = run_doctor_at(&transport, &config_path);

        assert!(!report.has_failures(), "report: {report:?}");
        assert_eq!(report.summary(), "4 passed, 0 failed");
    }

    #[test]
    fn unreachable_api_fails_only_the_api_check() {
        let temp = tempfile::tempdir().expect("temp dir");
        let config_path = write_config(temp.path());

        let transport =
            RecordingTransport::new(vec![Err(anyhow::anyhow!("connection refused"))]);
        let report = run_doctor_at(&transport, &config_path);

        let api_check = report
            .checks
            .iter()
            .find(|check| check.name == "api is reachable")
            .expect("api check");
        assert_eq!(api_check.state, CheckState::Fail);

        let config_check = report
            .checks
            .iter()
            .find(|check| check.name == "config parses and validates")
            .expect("config check");
        assert_eq!(config_check.state, CheckState::Pass);
    }

    #[test]
    fn missing_session_fails_with_login_hint() {
        let temp = tempfile::tempdir().expect("temp dir");
        let config_path = write_config(temp.path());

        let transport = RecordingTransport::new(vec![json_response(200, "[]")]);
        let report = run_doctor_at(&transport, &config_path);

        let session_check = report
            .checks
            .iter()
            .find(|check| check.name == "session token stored")
            .expect("session check");
        assert_eq!(session_check.state, CheckState::Fail);
        assert!(session_check.details.contains("navalha login"));
    }
}
