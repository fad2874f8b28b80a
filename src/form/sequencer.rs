use std::time::Instant;

use thirtyfour::prelude::*;
use thirtyfour::support::sleep;
use tracing::{debug, info};

use crate::config::{Config, RunOptions};
use crate::error::SurveyError;
use crate::form::controls::Control;
use crate::text::sanitize_phone;

/// Pages of the questionnaire, in visiting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Personal,
    Symptom,
    Agreement,
}

impl Page {
    /// The ordered pages for one pass over the form. The symptom page only
    /// exists for respondents who are on campus; the agreement page is
    /// always last.
    pub fn sequence(on_campus: bool) -> Vec<Page> {
        let mut pages = vec![Page::Personal];
        if on_campus {
            pages.push(Page::Symptom);
        }
        pages.push(Page::Agreement);
        pages
    }
}

/// What the run ended with: a real submission, or a dry-run stop right
/// before the submit click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    Submitted,
    Skipped,
}

/**
Drive the form to completion. Expects the driver to already be on the form
URL with the auth cookie in place.

The remote page is taken to be in exactly the state the previous step left
it in; nothing here re-checks or recovers. A failure mid-sequence can leave
the form partially filled on the platform side, and the only fix is a fresh
run.
*/
pub async fn run(driver: &WebDriver, config: &Config) -> Result<Submission, SurveyError> {
    info!("starting the form");

    let mut submission = Submission::Skipped;
    for page in Page::sequence(config.on_campus) {
        match page {
            Page::Personal => personal_page(driver, config).await?,
            Page::Symptom => symptom_page(driver, config).await?,
            // Always last in the sequence, so the outcome it reports stands.
            Page::Agreement => submission = agreement_page(driver, config).await?,
        }
    }

    info!("form done");
    Ok(submission)
}

/// First page: name, phone, and the on-campus dropdown.
async fn personal_page(driver: &WebDriver, config: &Config) -> Result<(), SurveyError> {
    info!("filling out the personal info page");

    let name_field = await_control(driver, Control::NameField, &config.run).await?;
    name_field.send_keys(config.name.as_str()).await?;

    let phone_field = locate(driver, Control::PhoneField).await?;
    phone_field
        .send_keys(sanitize_phone(&config.phone).as_str())
        .await?;

    locate(driver, Control::CampusDropdown)
        .await?
        .click()
        .await?;

    // The dropdown expands with an animation; its options are only
    // clickable once it has finished.
    let option = campus_option(config.on_campus);
    await_control(driver, option, &config.run)
        .await?
        .click()
        .await?;
    await_dismissed(driver, option, &config.run).await?;

    locate(driver, Control::PersonalNext).await?.click().await?;

    info!("personal info page done");
    Ok(())
}

/// Symptom page, reached only by on-campus respondents. The only answer this
/// program gives is "no symptoms"; settings reporting symptoms were rejected
/// at load time.
async fn symptom_page(driver: &WebDriver, config: &Config) -> Result<(), SurveyError> {
    info!("filling out the symptom page");

    await_control(driver, Control::SymptomNo, &config.run)
        .await?
        .click()
        .await?;
    await_control(driver, Control::SymptomNext, &config.run)
        .await?
        .click()
        .await?;

    info!("symptom page done");
    Ok(())
}

/// Final page: acknowledge, then submit unless this is a dry run.
async fn agreement_page(driver: &WebDriver, config: &Config) -> Result<Submission, SurveyError> {
    info!("filling out the agreement page");

    for control in agreement_clicks(config.run.submit) {
        await_control(driver, *control, &config.run)
            .await?
            .click()
            .await?;
    }

    let submission = if config.run.submit {
        info!("submitted the form");
        Submission::Submitted
    } else {
        info!("skipping the submit click (submit is disabled)");
        Submission::Skipped
    };

    info!("agreement page done");
    Ok(submission)
}

/// Dropdown option matching the on-campus answer.
fn campus_option(on_campus: bool) -> Control {
    if on_campus {
        Control::CampusOptionYes
    } else {
        Control::CampusOptionNo
    }
}

/// Clicks the agreement page performs for a given submit setting. The
/// acknowledgment always happens; the submit click is withheld on dry runs.
fn agreement_clicks(submit: bool) -> &'static [Control] {
    if submit {
        &[Control::AgreementAck, Control::Submit]
    } else {
        &[Control::AgreementAck]
    }
}

/// Single lookup for a control expected to already be on the page.
async fn locate(driver: &WebDriver, control: Control) -> Result<WebElement, SurveyError> {
    driver
        .find(By::XPath(&control.xpath()))
        .await
        .map_err(|source| SurveyError::ElementNotFound {
            control: control.label(),
            source,
        })
}

/// Poll until `control` is present and displayed. A control that never turns
/// up at all reports `ElementNotFound` (the layout did not match); one that
/// turns up but never becomes visible within the bound reports
/// `AnimationTimeout`.
async fn await_control(
    driver: &WebDriver,
    control: Control,
    run: &RunOptions,
) -> Result<WebElement, SurveyError> {
    debug!(control = control.label(), "waiting for control");
    let deadline = Instant::now() + run.settle_timeout();
    let mut seen = false;
    let mut last_err = None;

    loop {
        match driver.find(By::XPath(&control.xpath())).await {
            Ok(element) => {
                seen = true;
                if element.is_displayed().await.unwrap_or(false) {
                    return Ok(element);
                }
            }
            Err(source) => last_err = Some(source),
        }

        if Instant::now() >= deadline {
            return Err(match last_err {
                Some(source) if !seen => SurveyError::ElementNotFound {
                    control: control.label(),
                    source,
                },
                _ => SurveyError::AnimationTimeout {
                    control: control.label(),
                    waited: run.settle_timeout(),
                },
            });
        }

        sleep(run.settle_poll()).await;
    }
}

/// Poll until `control` is gone or hidden. This is how the sequencer knows a
/// dropdown has finished collapsing before it clicks through the page.
async fn await_dismissed(
    driver: &WebDriver,
    control: Control,
    run: &RunOptions,
) -> Result<(), SurveyError> {
    debug!(control = control.label(), "waiting for control to clear");
    let deadline = Instant::now() + run.settle_timeout();

    loop {
        match driver.find(By::XPath(&control.xpath())).await {
            // A failed lookup here means the element left the DOM.
            Err(_) => return Ok(()),
            Ok(element) => {
                if !element.is_displayed().await.unwrap_or(true) {
                    return Ok(());
                }
            }
        }

        if Instant::now() >= deadline {
            return Err(SurveyError::AnimationTimeout {
                control: control.label(),
                waited: run.settle_timeout(),
            });
        }

        sleep(run.settle_poll()).await;
    }
}
