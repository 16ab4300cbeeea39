//! Free-text grammars for the `REM` and `QNN` columns.
//!
//! Neither column contributes row metrics; both decode into plain text
//! sub-columns.

use crate::models::{CleanRow, Value};
use once_cell::sync::Lazy;
use regex::Regex;

/// Remark codes that get their own output column
pub const REMARK_CODES: &[&str] = &["AWY", "HUS", "MET", "SOD", "SOM", "SYN"];

pub const REMARKS_UNPARSED: &str = "remarks_unparsed";
pub const QNN_UNPARSED: &str = "qnn_unparsed";

/// `[A-Z]{3}` remark code followed by a 3-digit text length
static REMARK_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Z]{3})(\d{3})").expect("remark header is a valid regex"));

/// QNN element identifier: element letter plus 4-digit source/flag code
static QNN_ELEMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Z])(\d{4})").expect("QNN element is a valid regex"));

const QNN_VALUE_WIDTH: usize = 6;

/// Split a remark string into `remarks_<code>` columns.
///
/// Each remark is `CCCnnn` followed by `nnn` characters of text. Text of
/// unrecognised codes, and anything after the grammar breaks, lands in
/// `remarks_unparsed`.
pub fn parse_remarks(raw: &str) -> CleanRow {
    let mut sections: Vec<(String, String)> = Vec::new();
    let mut unparsed: Vec<String> = Vec::new();
    let mut rest = raw.trim();

    while !rest.is_empty() {
        let Some(caps) = REMARK_HEADER.captures(rest) else {
            unparsed.push(rest.to_string());
            break;
        };
        let code = &caps[1];
        let length: usize = caps[2].parse().unwrap_or(0);
        let body = &rest[caps[0].len()..];
        let split = body
            .char_indices()
            .nth(length)
            .map(|(i, _)| i)
            .unwrap_or(body.len());
        let (text, tail) = body.split_at(split);
        let text = text.trim();

        if REMARK_CODES.contains(&code) {
            let column = format!("remarks_{}", code.to_ascii_lowercase());
            match sections.iter_mut().find(|(name, _)| *name == column) {
                Some((_, existing)) => {
                    existing.push(' ');
                    existing.push_str(text);
                }
                None => sections.push((column, text.to_string())),
            }
        } else if !text.is_empty() {
            unparsed.push(format!("{code}{text}"));
        }
        rest = tail.trim_start();
    }

    let mut row: CleanRow = sections
        .into_iter()
        .map(|(name, text)| (name, Value::text(text)))
        .collect();
    if !unparsed.is_empty() {
        row.insert(REMARKS_UNPARSED, Value::text(unparsed.join(" ")));
    }
    row
}

/// Split a QNN payload into `qnn_<element>_source` and `qnn_<element>_value`.
///
/// The payload lists element identifiers first and then one 6-character
/// original value per element, in the same order.
pub fn parse_qnn(raw: &str) -> CleanRow {
    let compact: String = raw
        .trim()
        .trim_start_matches("QNN")
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect();

    let mut elements: Vec<(char, &str)> = Vec::new();
    let mut rest = compact.as_str();
    while let Some(caps) = QNN_ELEMENT.captures(rest) {
        let letter = caps[1].chars().next().unwrap_or('?');
        let source = caps.get(2).map(|m| m.as_str()).unwrap_or("");
        elements.push((letter, source));
        rest = &rest[caps[0].len()..];
    }

    let mut row = CleanRow::new();
    for (letter, source) in &elements {
        if !rest.is_ascii() || rest.len() < QNN_VALUE_WIDTH {
            break;
        }
        let (value, tail) = rest.split_at(QNN_VALUE_WIDTH);
        let element = letter.to_ascii_lowercase();
        row.insert(format!("qnn_{element}_source"), Value::text(*source));
        row.insert(format!("qnn_{element}_value"), Value::text(value));
        rest = tail;
    }
    if !rest.is_empty() {
        row.insert(QNN_UNPARSED, Value::text(rest));
    }
    row
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_remark_codes() {
        let row = parse_remarks("SYN004BUFRMET011METAR EGLL ");
        assert_eq!(row.get("remarks_syn"), Some(&Value::text("BUFR")));
        assert_eq!(row.get("remarks_met"), Some(&Value::text("METAR EGLL")));
        assert!(!row.contains(REMARKS_UNPARSED));
    }

    #[test]
    fn test_unknown_code_and_broken_grammar() {
        let row = parse_remarks("XYZ003abcfree text");
        assert_eq!(
            row.get(REMARKS_UNPARSED),
            Some(&Value::text("XYZabc free text"))
        );
    }

    #[test]
    fn test_length_longer_than_text() {
        let row = parse_remarks("AWY050short");
        assert_eq!(row.get("remarks_awy"), Some(&Value::text("short")));
    }

    #[test]
    fn test_qnn_elements_and_values() {
        let row = parse_qnn("QNN A1234 B0120 002510 999999");
        assert_eq!(row.get("qnn_a_source"), Some(&Value::text("1234")));
        assert_eq!(row.get("qnn_a_value"), Some(&Value::text("002510")));
        assert_eq!(row.get("qnn_b_source"), Some(&Value::text("0120")));
        assert_eq!(row.get("qnn_b_value"), Some(&Value::text("999999")));
        assert!(!row.contains(QNN_UNPARSED));
    }

    #[test]
    fn test_qnn_short_value_is_unparsed() {
        let row = parse_qnn("D1234 0025");
        assert!(!row.contains("qnn_d_value"));
        assert_eq!(row.get(QNN_UNPARSED), Some(&Value::text("0025")));
    }
}
