//! Settings file loading and the run-wide configuration record.

use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::SurveyError;

/// Settings file read at startup, relative to the working directory.
pub const SETTINGS_PATH: &str = "config.toml";
/// Template shipped with the program; remediation text points operators at it.
pub const TEMPLATE_PATH: &str = "config.def.toml";

/// Raw shape of the settings file.
#[derive(Debug, Deserialize)]
struct Settings {
    auth: Auth,
    info: Info,
    status: Status,
    #[serde(default)]
    run: RunOptions,
}

#[derive(Debug, Deserialize)]
struct Auth {
    cookie: String,
}

#[derive(Debug, Deserialize)]
struct Info {
    name: String,
    phone: String,
}

#[derive(Debug, Deserialize)]
struct Status {
    symptoms: bool,
    on_campus: bool,
}

/// Runtime knobs. The whole `[run]` section is optional and defaults to
/// production behavior.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RunOptions {
    /// Run the browser without a visible window. Turn off to watch a run.
    pub headless: bool,
    /// Click the final submit control. Turn off for a dry run.
    pub submit: bool,
    /// WebDriver endpoint of a running chromedriver.
    pub webdriver_url: String,
    /// Poll interval while waiting out page animations.
    pub settle_poll_ms: u64,
    /// Upper bound on any single animation wait.
    pub settle_timeout_ms: u64,
}

impl Default for RunOptions {
    fn default() -> Self {
        RunOptions {
            headless: true,
            submit: true,
            webdriver_url: "http://localhost:9515".to_string(),
            settle_poll_ms: 100,
            settle_timeout_ms: 10_000,
        }
    }
}

impl RunOptions {
    pub fn settle_poll(&self) -> Duration {
        Duration::from_millis(self.settle_poll_ms)
    }

    pub fn settle_timeout(&self) -> Duration {
        Duration::from_millis(self.settle_timeout_ms)
    }
}

/// One run's immutable configuration, flattened from the settings sections.
#[derive(Debug, Clone)]
pub struct Config {
    pub cookie: String,
    pub name: String,
    pub phone: String,
    pub symptoms: bool,
    pub on_campus: bool,
    pub run: RunOptions,
}

/// Read and validate the settings file. Every failure comes back as a
/// `SurveyError` for the top-level handler to report.
pub fn load(path: &Path) -> Result<Config, SurveyError> {
    let raw = fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => SurveyError::ConfigMissing {
            path: path.to_path_buf(),
        },
        _ => SurveyError::ConfigInvalid {
            path: path.to_path_buf(),
            message: source.to_string(),
        },
    })?;

    let settings: Settings = toml::from_str(&raw).map_err(|source| SurveyError::ConfigInvalid {
        path: path.to_path_buf(),
        message: source.to_string(),
    })?;

    let config = Config {
        cookie: settings.auth.cookie,
        name: settings.info.name,
        phone: settings.info.phone,
        symptoms: settings.status.symptoms,
        on_campus: settings.status.on_campus,
        run: settings.run,
    };

    // Reporting symptoms walks a branch of the form this program does not
    // automate; the operator has to fill that one out by hand.
    if config.symptoms {
        return Err(SurveyError::UnsupportedConfiguration {
            reason: "symptom reporting must be done manually",
        });
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"
[auth]
cookie = "SID=abc; HSID=def"

[info]
name = "Jane Doe"
phone = "(555) 123-4567"

[status]
symptoms = false
on_campus = true

[run]
headless = false
submit = false
webdriver_url = "http://localhost:4444"
settle_poll_ms = 50
settle_timeout_ms = 2000
"#;

    fn write_settings(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn loads_every_section() {
        let (_dir, path) = write_settings(FULL);
        let config = load(&path).unwrap();
        assert_eq!(config.cookie, "SID=abc; HSID=def");
        assert_eq!(config.name, "Jane Doe");
        assert_eq!(config.phone, "(555) 123-4567");
        assert!(!config.symptoms);
        assert!(config.on_campus);
        assert!(!config.run.headless);
        assert!(!config.run.submit);
        assert_eq!(config.run.webdriver_url, "http://localhost:4444");
        assert_eq!(config.run.settle_poll(), Duration::from_millis(50));
        assert_eq!(config.run.settle_timeout(), Duration::from_millis(2000));
    }

    #[test]
    fn run_section_is_optional_and_defaults_to_production_values() {
        let (_dir, path) = write_settings(
            r#"
[auth]
cookie = "k=v"
[info]
name = "n"
phone = "p"
[status]
symptoms = false
on_campus = false
"#,
        );
        let config = load(&path).unwrap();
        assert!(config.run.headless);
        assert!(config.run.submit);
        assert_eq!(config.run.webdriver_url, "http://localhost:9515");
        assert_eq!(config.run.settle_poll_ms, 100);
        assert_eq!(config.run.settle_timeout_ms, 10_000);
    }

    #[test]
    fn missing_file_is_config_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let err = load(&path).unwrap_err();
        assert!(matches!(err, SurveyError::ConfigMissing { .. }));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn missing_key_is_config_invalid() {
        let (_dir, path) = write_settings(
            r#"
[auth]
cookie = "k=v"
[info]
name = "n"
[status]
symptoms = false
on_campus = false
"#,
        );
        let err = load(&path).unwrap_err();
        match err {
            SurveyError::ConfigInvalid { message, .. } => assert!(message.contains("phone")),
            other => panic!("expected ConfigInvalid, got {other:?}"),
        }
    }

    #[test]
    fn reporting_symptoms_is_rejected_up_front() {
        let (_dir, path) = write_settings(
            r#"
[auth]
cookie = "k=v"
[info]
name = "n"
phone = "p"
[status]
symptoms = true
on_campus = true
"#,
        );
        let err = load(&path).unwrap_err();
        assert!(matches!(err, SurveyError::UnsupportedConfiguration { .. }));
        assert!(err.remediation().is_some());
    }
}
