//! Run-terminating error kinds and their operator-facing handling.

use std::path::PathBuf;
use std::time::Duration;

use thirtyfour::error::WebDriverError;
use thiserror::Error;

use crate::config;
use crate::form::constants::FORM_URL;

/// Everything that can end a run. None of these are retried: the operator
/// fixes configuration, page layout, or environment and runs again.
#[derive(Debug, Error)]
pub enum SurveyError {
    /// The settings file does not exist yet.
    #[error("settings file not found at {}", .path.display())]
    ConfigMissing { path: PathBuf },

    /// The settings file exists but could not be read or decoded.
    #[error("could not read settings from {}: {}", .path.display(), .message)]
    ConfigInvalid { path: PathBuf, message: String },

    /// The settings ask for a flow this program refuses to drive.
    #[error("unsupported configuration: {reason}")]
    UnsupportedConfiguration { reason: &'static str },

    /// A cookie record did not look like `name=value`.
    #[error("malformed cookie record {record:?}: expected `name=value`")]
    MalformedCookie { record: String },

    /// A control the page was expected to contain never turned up.
    #[error("could not find the {control} on the page: {source}")]
    ElementNotFound {
        control: &'static str,
        source: WebDriverError,
    },

    /// A control existed but never reached the awaited state.
    #[error("gave up waiting for the {control} after {waited:?}")]
    AnimationTimeout {
        control: &'static str,
        waited: Duration,
    },

    /// The browser engine could not be started or reached.
    #[error("failed to launch the browser session: {source}")]
    DriverLaunchFailure { source: WebDriverError },

    /// Any other fault from the browser session (navigation, clicks, input).
    #[error(transparent)]
    Driver(#[from] WebDriverError),
}

impl SurveyError {
    /// Exit code reported to the shell: configuration problems exit 1 after
    /// their remediation is printed, anything that dies once a browser is in
    /// play exits 2.
    pub fn exit_code(&self) -> u8 {
        match self {
            SurveyError::ConfigMissing { .. }
            | SurveyError::ConfigInvalid { .. }
            | SurveyError::UnsupportedConfiguration { .. } => 1,
            _ => 2,
        }
    }

    /// Remediation text for failures the operator fixes by editing
    /// configuration. Printed by the top-level handler before exiting.
    pub fn remediation(&self) -> Option<String> {
        match self {
            SurveyError::ConfigMissing { path } => Some(format!(
                "Missing {}.\nCopy or rename '{}' to '{}', then fill out each of the fields.",
                path.display(),
                config::TEMPLATE_PATH,
                path.display(),
            )),
            SurveyError::ConfigInvalid { path, .. } => Some(format!(
                "Check {} against the template '{}'.",
                path.display(),
                config::TEMPLATE_PATH,
            )),
            SurveyError::UnsupportedConfiguration { .. } => Some(format!(
                "This program does not currently support reporting symptoms. For now,\n\
                 you'll have to fill out the form manually. The URL is as follows:\n\n{FORM_URL}"
            )),
            _ => None,
        }
    }
}
