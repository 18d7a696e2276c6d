use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

const SESSION_VERSION: i64 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    pub email: String,
    pub access_token: String,
    pub saved_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct SessionFile {
    version: i64,
    session: StoredSession,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to read session at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse session at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to write session at {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize session: {0}")]
    Serialize(toml::ser::Error),
    #[error("{message}")]
    InvalidSchema { message: String },
}

pub fn session_path(config_dir: &Path) -> PathBuf {
    config_dir.join("session.toml")
}

pub fn load_session(config_dir: &Path) -> Result<Option<StoredSession>, SessionError> {
    let path = session_path(config_dir);
    if !path.exists() {
        return Ok(None);
    }

    let raw = fs::read_to_string(&path).map_err(|source| SessionError::Read {
        path: path.clone(),
        source,
    })?;

    let parsed_value: toml::Value =
        toml::from_str(&raw).map_err(|source| SessionError::Parse {
            path: path.clone(),
            source,
        })?;

    validate_session_schema(&parsed_value)?;

    let parsed: SessionFile = parsed_value
        .try_into()
        .map_err(|source| SessionError::Parse {
            path: path.clone(),
            source,
        })?;

    Ok(Some(parsed.session))
}

pub fn store_session(config_dir: &Path, session: StoredSession) -> Result<(), SessionError> {
    fs::create_dir_all(config_dir).map_err(|source| SessionError::Write {
        path: config_dir.to_path_buf(),
        source,
    })?;

    let file = SessionFile {
        version: SESSION_VERSION,
        session,
    };
    let serialized = toml::to_string(&file).map_err(SessionError::Serialize)?;

    let path = session_path(config_dir);
    let temp_path = path.with_extension("toml.tmp");

    fs::write(&temp_path, serialized).map_err(|source| SessionError::Write {
        path: temp_path.clone(),
        source,
    })?;

    fs::rename(&temp_path, &path).map_err(|source| SessionError::Write {
        path: path.clone(),
        source,
    })?;

    Ok(())
}

pub fn clear_session(config_dir: &Path) -> Result<Option<StoredSession>, SessionError> {
    let existing = load_session(config_dir)?;
    if existing.is_none() {
        return Ok(None);
    }

    let path = session_path(config_dir);
    fs::remove_file(&path).map_err(|source| SessionError::Write {
        path: path.clone(),
        source,
    })?;

    Ok(existing)
}

fn validate_session_schema(value: &toml::Value) -> Result<(), SessionError> {
    let Some(root) = value.as_table() else {
        return Err(schema_error(
            "invalid session schema: missing required top-level field 'version'".to_string(),
        ));
    };

    let Some(version) = root.get("version") else {
        return Err(schema_error(
            "invalid session schema: missing required top-level field 'version'".to_string(),
        ));
    };

    match version.as_integer() {
        Some(current) if current == SESSION_VERSION => {}
        Some(current) => {
            return Err(schema_error(format!(
                "invalid session schema: unsupported version (expected {SESSION_VERSION}, found {current})"
            )));
        }
        None => {
            return Err(schema_error(
                "invalid session schema: unsupported version (expected integer)".to_string(),
            ));
        }
    }

    if root
        .get("session")
        .and_then(toml::Value::as_table)
        .is_none()
    {
        return Err(schema_error(
            "invalid session schema: missing required [session] section".to_string(),
        ));
    }

    Ok(())
}

fn schema_error(message: String) -> SessionError {
    SessionError::InvalidSchema { message }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_session() -> StoredSession {
        StoredSession {
            email: "admin@barbearia.com".to_string(),
            access_token: "token-123".to_string(),
            saved_at: "2026-02-01T10:00:00Z".to_string(),
        }
    }

    #[test]
    fn store_and_load_round_trips() {
        let temp = tempfile::tempdir().expect("temp dir");

        store_session(temp.path(), sample_session()).expect("store");
        let loaded = load_session(temp.path()).expect("load");

        assert_eq!(loaded, Some(sample_session()));
    }

    #[test]
    fn store_leaves_no_temp_file_behind() {
        let temp = tempfile::tempdir().expect("temp dir");

        store_session(temp.path(), sample_session()).expect("store");

        let leftovers: Vec<_> = fs::read_dir(temp.path())
            .expect("read dir")
            .filter_map(Result::ok)
            .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn load_returns_none_when_file_missing() {
        let temp = tempfile::tempdir().expect("temp dir");
        assert_eq!(load_session(temp.path()).expect("load"), None);
    }

    #[test]
    fn clear_removes_stored_session_and_returns_it() {
        let temp = tempfile::tempdir().expect("temp dir");
        store_session(temp.path(), sample_session()).expect("store");

        let removed = clear_session(temp.path()).expect("clear");
        assert_eq!(removed, Some(sample_session()));
        assert!(!session_path(temp.path()).exists());

        assert_eq!(clear_session(temp.path()).expect("clear again"), None);
    }

    #[test]
    fn store_overwrites_previous_session() {
        let temp = tempfile::tempdir().expect("temp dir");
        store_session(temp.path(), sample_session()).expect("store first");

        let replacement = StoredSession {
            email: "recepcao@barbearia.com".to_string(),
            access_token: "token-456".to_string(),
            saved_at: "2026-02-02T08:30:00Z".to_string(),
        };
        store_session(temp.path(), replacement.clone()).expect("store second");

        assert_eq!(load_session(temp.path()).expect("load"), Some(replacement));
    }

    #[test]
    fn load_rejects_file_without_version() {
        let temp = tempfile::tempdir().expect("temp dir");
        fs::create_dir_all(temp.path()).expect("dir");
        fs::write(
            session_path(temp.path()),
            "[session]\nemail='a@b.com'\naccess_token='t'\nsaved_at='2026-01-01T00:00:00Z'\n",
        )
        .expect("write session");

        let error = load_session(temp.path()).expect_err("should fail");
        assert!(
            error
                .to_string()
                .contains("missing required top-level field 'version'")
        );
    }

    #[test]
    fn load_rejects_unsupported_version() {
        let temp = tempfile::tempdir().expect("temp dir");
        fs::write(
            session_path(temp.path()),
            "version = 2\n[session]\nemail='a@b.com'\naccess_token='t'\nsaved_at='2026-01-01T00:00:00Z'\n",
        )
        .expect("write session");

        let error = load_session(temp.path()).expect_err("should fail");
        assert!(error.to_string().contains("unsupported version"));
    }

    #[test]
    fn load_rejects_missing_session_section() {
        let temp = tempfile::tempdir().expect("temp dir");
        fs::write(session_path(temp.path()), "version = 1\n").expect("write session");

        let error = load_session(temp.path()).expect_err("should fail");
        assert!(
            error
                .to_string()
                .contains("missing required [session] section")
        );
    }
}
