// Remote form contract. Everything here mirrors the hosted questionnaire and
// breaks if the platform reshuffles its layout.

/// URL of the hosted screening questionnaire.
pub const FORM_URL: &str = "https://docs.google.com/forms/d/e/1FAIpQLSews7FpP8CkoNBNbByDvGiqVZ1kJRd8K5FTSVhgOC60LTZJwA/viewform";

/// Form id the platform repeats throughout the rendered DOM; every
/// structural path under the form roots at it.
pub const FORM_ID: &str = "mG61Hd";

/// Path on the form's origin that is guaranteed not to exist. The browser
/// only accepts cookies for an origin it has already loaded a document from,
/// so this is visited once before cookie injection.
pub const COOKIE_PRIMING_PATH: &str = "/invalid";
