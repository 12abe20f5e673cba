//! Shipping address normalization.
//!
//! All transforms here are idempotent: applying one twice gives the same
//! result as applying it once.

use crate::models::ShippingAddress;

/// US states, DC and territories: (full name, USPS code).
const STATES: &[(&str, &str)] = &[
    ("alabama", "AL"),
    ("alaska", "AK"),
    ("arizona", "AZ"),
    ("arkansas", "AR"),
    ("california", "CA"),
    ("colorado", "CO"),
    ("connecticut", "CT"),
    ("delaware", "DE"),
    ("florida", "FL"),
    ("georgia", "GA"),
    ("hawaii", "HI"),
    ("idaho", "ID"),
    ("illinois", "IL"),
    ("indiana", "IN"),
    ("iowa", "IA"),
    ("kansas", "KS"),
    ("kentucky", "KY"),
    ("louisiana", "LA"),
    ("maine", "ME"),
    ("maryland", "MD"),
    ("massachusetts", "MA"),
    ("michigan", "MI"),
    ("minnesota", "MN"),
    ("mississippi", "MS"),
    ("missouri", "MO"),
    ("montana", "MT"),
    ("nebraska", "NE"),
    ("nevada", "NV"),
    ("new hampshire", "NH"),
    ("new jersey", "NJ"),
    ("new mexico", "NM"),
    ("new york", "NY"),
    ("north carolina", "NC"),
    ("north dakota", "ND"),
    ("ohio", "OH"),
    ("oklahoma", "OK"),
    ("oregon", "OR"),
    ("pennsylvania", "PA"),
    ("rhode island", "RI"),
    ("south carolina", "SC"),
    ("south dakota", "SD"),
    ("tennessee", "TN"),
    ("texas", "TX"),
    ("utah", "UT"),
    ("vermont", "VT"),
    ("virginia", "VA"),
    ("washington", "WA"),
    ("west virginia", "WV"),
    ("wisconsin", "WI"),
    ("wyoming", "WY"),
    ("district of columbia", "DC"),
    ("washington dc", "DC"),
    ("washington d.c.", "DC"),
    ("puerto rico", "PR"),
    ("guam", "GU"),
    ("us virgin islands", "VI"),
    ("virgin islands", "VI"),
    ("american samoa", "AS"),
    ("northern mariana islands", "MP"),
];

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Map a state to its two-letter code.
///
/// - a 2-character input is upper-cased
/// - a recognised full name (any case) maps to its code
/// - anything else is upper-cased and trimmed
pub fn normalize_state(input: &str) -> String {
    let collapsed = collapse_whitespace(input);
    if collapsed.chars().count() == 2 {
        return collapsed.to_uppercase();
    }

    // Match on the lower-cased fallback so a second pass sees the same key.
    let upper = collapsed.to_uppercase();
    let key = upper.to_lowercase();
    STATES
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, code)| (*code).to_string())
        .unwrap_or(upper)
}

/// Title-case a person or city name.
///
/// Each whitespace-separated word is lower-cased and capitalised, and
/// hyphenated parts are capitalised independently. Special cases:
/// - `Mc` capitalises the next letter: `mcdonald` -> `McDonald`
/// - `Mac` does the same only for words longer than five letters:
///   `macdonald` -> `MacDonald`, but `mack` and `macon` stay plain
/// - a single letter and apostrophe capitalise what follows:
///   `o'brien` -> `O'Brien`
pub fn camel_case(input: &str) -> String {
    input
        .split_whitespace()
        .map(|word| word.split('-').map(camel_part).collect::<Vec<_>>().join("-"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn camel_part(part: &str) -> String {
    let lower = part.to_lowercase();
    let chars: Vec<char> = lower.chars().collect();

    if chars.len() > 2 && lower.starts_with("mc") && chars[2].is_alphabetic() {
        return format!("Mc{}", capitalize(&chars[2..]));
    }

    if chars.len() > 5 && lower.starts_with("mac") && chars[3].is_alphabetic() {
        return format!("Mac{}", capitalize(&chars[3..]));
    }

    if chars.len() > 2 && chars[0].is_alphabetic() && is_apostrophe(chars[1]) {
        let mut out = capitalize(&chars[..1]);
        out.push(chars[1]);
        out.push_str(&capitalize(&chars[2..]));
        return out;
    }

    capitalize(&chars)
}

fn is_apostrophe(c: char) -> bool {
    c == '\'' || c == '\u{2019}'
}

/// Upper-case the first char, leaving it as-is when its upper-case form is
/// more than one char (`ß`).
fn capitalize(chars: &[char]) -> String {
    let Some((first, rest)) = chars.split_first() else {
        return String::new();
    };
    let mut upper = first.to_uppercase();
    let head = match (upper.next(), upper.next()) {
        (Some(c), None) => c,
        _ => *first,
    };
    std::iter::once(head).chain(rest.iter().copied()).collect()
}

/// Normalize every field of a shipping address.
pub fn normalize_address(address: &ShippingAddress) -> ShippingAddress {
    let line2 = address
        .line2
        .as_deref()
        .map(collapse_whitespace)
        .filter(|l| !l.is_empty());

    let country = address
        .country
        .as_deref()
        .map(|c| collapse_whitespace(c).to_uppercase())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| "US".to_string());

    ShippingAddress {
        name: camel_case(&address.name),
        line1: collapse_whitespace(&address.line1),
        line2,
        city: camel_case(&address.city),
        state: normalize_state(&address.state),
        postal_code: address.postal_code.trim().to_string(),
        country: Some(country),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_char_state_uppercased() {
        assert_eq!(normalize_state("ny"), "NY");
        assert_eq!(normalize_state(" ca "), "CA");
        assert_eq!(normalize_state("Tx"), "TX");
    }

    #[test]
    fn test_full_state_name_maps_to_code() {
        assert_eq!(normalize_state("New York"), "NY");
        assert_eq!(normalize_state("  north   CAROLINA "), "NC");
        assert_eq!(normalize_state("district of columbia"), "DC");
        assert_eq!(normalize_state("Puerto Rico"), "PR");
    }

    #[test]
    fn test_unrecognized_state_uppercased_and_trimmed() {
        assert_eq!(normalize_state("  ontario "), "ONTARIO");
        assert_eq!(normalize_state("new yrok"), "NEW YROK");
        assert_eq!(normalize_state(""), "");
    }

    #[test]
    fn test_normalize_state_idempotent() {
        for input in [
            "ny",
            "New York",
            "new yrok",
            "  west virginia",
            "Bavaria",
            "x",
            "Washington D.C.",
            "texa\u{17f}",
            "\u{131}owa",
            "stra\u{df}e",
            "",
        ] {
            let once = normalize_state(input);
            assert_eq!(normalize_state(&once), once, "input: {input:?}");
        }
    }

    #[test]
    fn test_state_matched_after_case_folding() {
        assert_eq!(normalize_state("texa\u{17f}"), "TX");
        assert_eq!(normalize_state("\u{131}owa"), "IA");
        assert_eq!(normalize_state("stra\u{df}e"), "STRASSE");
    }

    #[test]
    fn test_camel_case_keeps_multi_char_capitals_lowercase() {
        assert_eq!(camel_case("\u{df}mith"), "\u{df}mith");
        assert_eq!(camel_case("SSMITH"), "Ssmith");
    }

    #[test]
    fn test_camel_case_basic() {
        assert_eq!(camel_case("JOHN   smith"), "John Smith");
        assert_eq!(camel_case("mary-jane watson"), "Mary-Jane Watson");
        assert_eq!(camel_case("  san francisco "), "San Francisco");
        assert_eq!(camel_case("3rd ave"), "3rd Ave");
    }

    #[test]
    fn test_camel_case_mc_mac() {
        assert_eq!(camel_case("mcdonald"), "McDonald");
        assert_eq!(camel_case("MCKINNEY"), "McKinney");
        assert_eq!(camel_case("macdonald"), "MacDonald");
        assert_eq!(camel_case("mack"), "Mack");
        assert_eq!(camel_case("macon"), "Macon");
        assert_eq!(camel_case("mc"), "Mc");
    }

    #[test]
    fn test_camel_case_apostrophe() {
        assert_eq!(camel_case("o'brien"), "O'Brien");
        assert_eq!(camel_case("D'ANGELO"), "D'Angelo");
        assert_eq!(camel_case("o\u{2019}neil"), "O\u{2019}Neil");
        assert_eq!(camel_case("rock'n"), "Rock'n");
    }

    #[test]
    fn test_camel_case_idempotent() {
        for input in [
            "o'brien",
            "MACDONALD",
            "mcdonald-smith",
            "coeur d'alene",
            "  ST. LOUIS ",
            "mack",
            "\u{df}mith",
            "mc\u{df}ean",
            "\u{17f}t. paul",
            "",
        ] {
            let once = camel_case(input);
            assert_eq!(camel_case(&once), once, "input: {input:?}");
        }
    }

    #[test]
    fn test_normalize_address() {
        let raw = ShippingAddress {
            name: "ada  MCCORMICK".to_string(),
            line1: " 12  Elm   St ".to_string(),
            line2: Some("   ".to_string()),
            city: "saint paul".to_string(),
            state: "minnesota".to_string(),
            postal_code: " 55101 ".to_string(),
            country: None,
        };

        let normalized = normalize_address(&raw);
        assert_eq!(normalized.name, "Ada McCormick");
        assert_eq!(normalized.line1, "12 Elm St");
        assert_eq!(normalized.line2, None);
        assert_eq!(normalized.city, "Saint Paul");
        assert_eq!(normalized.state, "MN");
        assert_eq!(normalized.postal_code, "55101");
        assert_eq!(normalized.country.as_deref(), Some("US"));

        assert_eq!(normalize_address(&normalized), normalized);
    }
}
