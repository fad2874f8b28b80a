//! Browser session lifecycle: launch, cookie priming, shutdown.

use thirtyfour::error::WebDriverError;
use thirtyfour::prelude::*;
use thirtyfour::Cookie;
use tracing::{info, warn};
use url::Url;

use crate::config::{Config, RunOptions};
use crate::error::SurveyError;
use crate::form::constants::{COOKIE_PRIMING_PATH, FORM_URL};
use crate::text::parse_cookie;

/// Fixed desktop user-agent. The platform serves a different (and
/// differently laid out) page to clients it takes for mobile or automated,
/// and every structural path assumes the desktop layout.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/87.0.4280.88 Safari/537.36";

// Desktop window large enough for the single-column form layout.
const WINDOW_WIDTH: u32 = 1280;
const WINDOW_HEIGHT: u32 = 800;

/// Launch a browser session against the configured WebDriver endpoint.
/// Failures here are fatal; there is no retry.
pub async fn init_driver(run: &RunOptions) -> Result<WebDriver, SurveyError> {
    let mut caps = DesiredCapabilities::chrome();
    if run.headless {
        caps.set_headless().map_err(launch_failure)?;
    }
    caps.add_arg(&format!("--user-agent={USER_AGENT}"))
        .map_err(launch_failure)?;

    let driver = WebDriver::new(run.webdriver_url.as_str(), caps)
        .await
        .map_err(launch_failure)?;
    driver
        .set_window_rect(0, 0, WINDOW_WIDTH, WINDOW_HEIGHT)
        .await
        .map_err(launch_failure)?;

    info!(
        webdriver = run.webdriver_url.as_str(),
        headless = run.headless,
        "browser session ready"
    );
    Ok(driver)
}

fn launch_failure(source: WebDriverError) -> SurveyError {
    SurveyError::DriverLaunchFailure { source }
}

/// Install the authentication cookie before the form is loaded. The browser
/// only accepts cookies set from a page already on the target origin, so the
/// session first visits a guaranteed-404 path on the form's host.
pub async fn setup_cookie(driver: &WebDriver, config: &Config) -> Result<(), SurveyError> {
    let priming = priming_url();
    info!(url = priming.as_str(), "priming cookies on the form origin");
    driver.goto(priming.as_str()).await?;

    for (name, value) in parse_cookie(&config.cookie)? {
        driver.add_cookie(Cookie::new(name, value)).await?;
    }
    Ok(())
}

/// URL on the form's origin that does not resolve to a real document but
/// still gives the session a page on the right host.
fn priming_url() -> Url {
    Url::parse(FORM_URL)
        .and_then(|form| form.join(COOKIE_PRIMING_PATH))
        .expect("form URL constant is a valid absolute URL")
}

/// Close the browser session, logging instead of propagating a failed quit.
pub async fn shutdown(driver: WebDriver) {
    if let Err(error) = driver.quit().await {
        warn!(%error, "failed to quit the browser session");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priming_url_shares_the_form_origin() {
        let priming = priming_url();
        let form = Url::parse(FORM_URL).unwrap();
        assert_eq!(priming.scheme(), "https");
        assert_eq!(priming.host_str(), form.host_str());
        assert_eq!(priming.path(), COOKIE_PRIMING_PATH);
    }
}
