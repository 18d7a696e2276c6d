use assert_cmd::Command;
use std::fs;
use std::path::Path;

pub fn new_command_with_temp_home() -> (Command, tempfile::TempDir) {
    let temp_home = tempfile::tempdir().expect("temp home");
    let binary = assert_cmd::cargo::cargo_bin!("navalha");
    let mut command = Command::new(binary);
    command.env("HOME", temp_home.path());
    command.env("XDG_CONFIG_HOME", temp_home.path().join(".config"));
    command.env_remove("NAVALHA_PASSWORD");
    (command, temp_home)
}

pub fn write_valid_config(home: &Path) {
    let config_dir = home.join(".config").join("navalha");
    fs::create_dir_all(&config_dir).expect("create config dir");
    fs::write(
        config_dir.join("config.toml"),
        r#"
version = 1

[api]
base_url = "http://127.0.0.1:1"
timeout_secs = 1
"#,
    )
    .expect("write config");
}

#[allow(dead_code)]
pub fn assert_timestamp_log_names(entries: &[std::fs::DirEntry]) {
    assert!(!entries.is_empty(), "expected at least one diagnostics log");

    for entry in entries {
        let name = entry
            .file_name()
            .into_string()
            .expect("diagnostics filename utf8");
        assert!(
            name.ends_with(".log"),
            "diagnostics file should end with .log: {name}"
        );
        let stem = name
            .strip_suffix(".log")
            .expect("diagnostics filename .log suffix");
        assert!(
            !stem.is_empty() && stem.chars().all(|character| character.is_ascii_digit()),
            "diagnostics filename must be <timestamp>.log, got: {name}"
        );
    }
}
