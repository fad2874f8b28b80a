mod config;
mod error;
mod form;
mod session;
mod text;

use std::path::Path;
use std::process::ExitCode;

use thirtyfour::prelude::*;
use tracing::error;

use crate::config::Config;
use crate::error::SurveyError;
use crate::form::constants::FORM_URL;
use crate::form::sequencer::{self, Submission};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    match fill_out_form().await {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            if let Some(guidance) = err.remediation() {
                println!("{guidance}");
            }
            error!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}

/// One pass over the screening form: settings, browser session, sequencer.
/// The browser is always shut down once it exists, whatever the outcome.
async fn fill_out_form() -> Result<Submission, SurveyError> {
    let config = config::load(Path::new(config::SETTINGS_PATH))?;
    let driver = session::init_driver(&config.run).await?;

    let outcome = drive_form(&driver, &config).await;
    session::shutdown(driver).await;
    outcome
}

async fn drive_form(driver: &WebDriver, config: &Config) -> Result<Submission, SurveyError> {
    session::setup_cookie(driver, config).await?;
    driver.goto(FORM_URL).await?;
    sequencer::run(driver, config).await
}
