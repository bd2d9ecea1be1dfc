//! Numeric extraction from free-text model output

/// Extract the first numeric token found anywhere in the text
///
/// The accepted shape is an optional minus sign, one or more digits,
/// and an optional fractional part, so `"0.42"`, `"-1"`, and `"1."`
/// all parse. Stray words around the number are ignored; a text with
/// no numeric token yields `None`.
///
/// # Examples
///
/// ```
/// use rashomon_scorer::parse_first_number;
///
/// assert_eq!(parse_first_number("0.7"), Some(0.7));
/// assert_eq!(parse_first_number("Score: -0.25 (disagreement)"), Some(-0.25));
/// assert_eq!(parse_first_number("strongly agree"), None);
/// ```
pub fn parse_first_number(text: &str) -> Option<f64> {
    let bytes = text.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        let digit_start = bytes[i].is_ascii_digit();
        let signed_start =
            bytes[i] == b'-' && i + 1 < bytes.len() && bytes[i + 1].is_ascii_digit();

        if !digit_start && !signed_start {
            i += 1;
            continue;
        }

        let start = i;
        if signed_start {
            i += 1;
        }
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i < bytes.len() && bytes[i] == b'.' {
            i += 1;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
        }

        // The token spans ASCII bytes only, so the slice is valid UTF-8
        return text[start..i].parse::<f64>().ok();
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_number() {
        assert_eq!(parse_first_number("0.75"), Some(0.75));
        assert_eq!(parse_first_number("-1"), Some(-1.0));
        assert_eq!(parse_first_number("0"), Some(0.0));
    }

    #[test]
    fn test_number_with_surrounding_words() {
        assert_eq!(parse_first_number("The score is 0.42 overall."), Some(0.42));
        assert_eq!(parse_first_number("0.42 (likely agreement)"), Some(0.42));
        assert_eq!(parse_first_number("I'd say -0.8"), Some(-0.8));
        assert_eq!(parse_first_number("Score: 1"), Some(1.0));
    }

    #[test]
    fn test_trailing_dot_parses() {
        assert_eq!(parse_first_number("1."), Some(1.0));
        assert_eq!(parse_first_number("Rating: 0. No relation."), Some(0.0));
    }

    #[test]
    fn test_first_of_several_numbers_wins() {
        assert_eq!(parse_first_number("0.3 or maybe 0.9"), Some(0.3));
        assert_eq!(parse_first_number("between -0.2 and 0.1"), Some(-0.2));
    }

    #[test]
    fn test_no_number_yields_none() {
        assert_eq!(parse_first_number("strongly agree"), None);
        assert_eq!(parse_first_number(""), None);
        assert_eq!(parse_first_number("---"), None);
    }

    #[test]
    fn test_bare_minus_is_not_a_number() {
        assert_eq!(parse_first_number("- no score -"), None);
        // A minus separated from the digits does not bind to them
        assert_eq!(parse_first_number("- 5"), Some(5.0));
    }

    #[test]
    fn test_out_of_range_numbers_still_parse() {
        // Clamping is the caller's concern
        assert_eq!(parse_first_number("7"), Some(7.0));
        assert_eq!(parse_first_number("-3.5"), Some(-3.5));
    }

    #[test]
    fn test_number_after_multibyte_text() {
        assert_eq!(parse_first_number("résumé — 0.5"), Some(0.5));
    }
}
