//! String transforms shared by the loader, session setup, and sequencer.

use crate::error::SurveyError;

/// Reformat a phone number written in any punctuation style into the plain
/// digit string the form expects: every `(`, `)`, space, and `-` is dropped,
/// anything else passes through in order.
pub fn sanitize_phone(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| !matches!(c, '(' | ')' | ' ' | '-'))
        .collect()
}

/// Decode a browser cookie string of the form `"k1=v1; k2=v2"` into ordered
/// `(name, value)` pairs. Records split on the first `=` only, so values may
/// themselves contain `=`.
pub fn parse_cookie(text: &str) -> Result<Vec<(String, String)>, SurveyError> {
    text.split("; ")
        .map(|record| {
            record
                .split_once('=')
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .ok_or_else(|| SurveyError::MalformedCookie {
                    record: record.to_string(),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_phone_strips_formatting_punctuation() {
        assert_eq!(sanitize_phone("(555) 123-4567"), "5551234567");
    }

    #[test]
    fn sanitize_phone_keeps_everything_else_in_order() {
        assert_eq!(sanitize_phone("+1 (555) ext-A42"), "+1555extA42");
        assert_eq!(sanitize_phone(""), "");
    }

    #[test]
    fn parse_cookie_preserves_record_order() {
        let pairs = parse_cookie("a=1; b=2; c=3").unwrap();
        assert_eq!(
            pairs,
            vec![
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "2".to_string()),
                ("c".to_string(), "3".to_string()),
            ]
        );
    }

    #[test]
    fn parse_cookie_splits_on_the_first_equals_only() {
        let pairs = parse_cookie("k=v1=v2").unwrap();
        assert_eq!(pairs, vec![("k".to_string(), "v1=v2".to_string())]);
    }

    #[test]
    fn parse_cookie_rejects_a_record_without_equals() {
        let err = parse_cookie("novalue").unwrap_err();
        assert!(matches!(err, SurveyError::MalformedCookie { record } if record == "novalue"));
    }

    #[test]
    fn parse_cookie_names_the_offending_record() {
        let err = parse_cookie("a=1; oops; b=2").unwrap_err();
        assert!(matches!(err, SurveyError::MalformedCookie { record } if record == "oops"));
    }

    #[test]
    fn parse_cookie_rejects_an_empty_string() {
        assert!(parse_cookie("").is_err());
    }
}
