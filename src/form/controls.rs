//! Logical names for every control the sequencer touches, mapped to the
//! structural paths that locate them on the rendered form.

use super::constants::FORM_ID;

/// Interactive controls on the screening form. All lookups are positional,
/// so a platform-side layout change lands here and nowhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// First plain-text input on the personal page (respondent name).
    NameField,
    /// Second plain-text input on the personal page (phone number).
    PhoneField,
    /// Dropdown asking whether the respondent is on campus.
    CampusDropdown,
    /// Expanded dropdown option for "yes, on campus".
    CampusOptionYes,
    /// Expanded dropdown option for "no, not on campus".
    CampusOptionNo,
    /// Page-advance control on the personal page.
    PersonalNext,
    /// "No symptoms" answer on the symptom page.
    SymptomNo,
    /// Page-advance control on the symptom page.
    SymptomNext,
    /// Acknowledgment control on the agreement page.
    AgreementAck,
    /// Final submit control.
    Submit,
}

impl Control {
    /// Name used in narration and error reports.
    pub fn label(self) -> &'static str {
        match self {
            Control::NameField => "name field",
            Control::PhoneField => "phone field",
            Control::CampusDropdown => "campus dropdown",
            Control::CampusOptionYes => "on-campus dropdown option",
            Control::CampusOptionNo => "off-campus dropdown option",
            Control::PersonalNext => "personal page next button",
            Control::SymptomNo => "no-symptoms option",
            Control::SymptomNext => "symptom page next button",
            Control::AgreementAck => "acknowledgment checkbox",
            Control::Submit => "submit button",
        }
    }

    /// Structural XPath locating the control.
    pub fn xpath(self) -> String {
        match self {
            Control::NameField => "//input[@type='text']".to_string(),
            Control::PhoneField => "(//input[@type='text'])[2]".to_string(),
            Control::CampusDropdown => {
                form_path("/div[2]/div/div[2]/div[3]/div/div/div[2]/div/div/div[2]")
            }
            Control::CampusOptionYes => {
                form_path("/div[2]/div/div[2]/div[3]/div/div/div[2]/div/div[2]/div[3]/span")
            }
            Control::CampusOptionNo => {
                form_path("/div[2]/div/div[2]/div[3]/div/div/div[2]/div/div[2]/div[4]/span")
            }
            Control::PersonalNext => form_path("/div[2]/div/div[3]/div/div/div/span/span"),
            Control::SymptomNo => "//div[@id='i10']/div[3]/div".to_string(),
            Control::SymptomNext => form_path("/div[2]/div/div[3]/div/div/div[2]/span/span"),
            Control::AgreementAck => form_path(
                "/div[2]/div/div[2]/div[2]/div/div/div[2]/div/div/label/div/div[2]/div/span",
            ),
            // Rendered identically to the symptom page's advance control;
            // both pages put their action button in the second slot.
            Control::Submit => form_path("/div[2]/div/div[3]/div/div/div[2]/span/span"),
        }
    }
}

/// Root a structural path at the form element.
fn form_path(suffix: &str) -> String {
    format!("//form[@id='{FORM_ID}']{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_inputs_are_looked_up_positionally() {
        assert_eq!(Control::NameField.xpath(), "//input[@type='text']");
        assert_eq!(Control::PhoneField.xpath(), "(//input[@type='text'])[2]");
    }

    #[test]
    fn structural_controls_are_rooted_at_the_form_id() {
        for control in [
            Control::CampusDropdown,
            Control::CampusOptionYes,
            Control::CampusOptionNo,
            Control::PersonalNext,
            Control::SymptomNext,
            Control::AgreementAck,
            Control::Submit,
        ] {
            let xpath = control.xpath();
            assert!(
                xpath.starts_with(&format!("//form[@id='{FORM_ID}']")),
                "{} is not form-rooted: {xpath}",
                control.label()
            );
        }
    }

    #[test]
    fn campus_options_differ_only_by_position() {
        let yes = Control::CampusOptionYes.xpath();
        let no = Control::CampusOptionNo.xpath();
        assert_ne!(yes, no);
        assert_eq!(
            yes.replace("/div[3]/span", ""),
            no.replace("/div[4]/span", "")
        );
    }
}
