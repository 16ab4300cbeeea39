//! Identifier parsing: family code, numeric suffix and family cardinality.

use serde::{Deserialize, Serialize};
use std::fmt;

/// EQD (element quality data) prefixes
pub const EQD_PREFIXES: &[char] = &['Q', 'P', 'R', 'C', 'D', 'N'];

/// Legal suffixes for a family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cardinality {
    /// The identifier is the bare family code (`WND`, `TMP`)
    Bare,
    /// One-digit suffix in an inclusive range (`AA1..AA4`)
    Suffix { min: u8, max: u8 },
}

impl Cardinality {
    pub fn suffixes(&self) -> Vec<Option<u8>> {
        match *self {
            Cardinality::Bare => vec![None],
            Cardinality::Suffix { min, max } => (min..=max).map(Some).collect(),
        }
    }

    fn admits(&self, suffix: Option<u8>) -> bool {
        match (*self, suffix) {
            (Cardinality::Bare, None) => true,
            (Cardinality::Suffix { min, max }, Some(n)) => (min..=max).contains(&n),
            _ => false,
        }
    }

    /// True when more than one identifier exists in the family
    pub fn is_repeating(&self) -> bool {
        matches!(*self, Cardinality::Suffix { min, max } if max > min)
    }
}

/// A parsed identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    /// Family code (`AA`, `WND`, `Q` for EQD)
    pub family: String,
    /// Numeric suffix as written (`1`, `06`)
    pub suffix: Option<String>,
    /// True for EQD identifiers
    pub eqd: bool,
}

impl Identifier {
    /// Full identifier text
    pub fn code(&self) -> String {
        match &self.suffix {
            Some(suffix) => format!("{}{}", self.family, suffix),
            None => self.family.clone(),
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code())
    }
}

/// EQD identifiers are one of `Q P R C D N` followed by a two-digit suffix `01..99`
pub fn is_eqd_identifier(identifier: &str) -> bool {
    let mut chars = identifier.chars();
    let (Some(prefix), Some(d1), Some(d2), None) =
        (chars.next(), chars.next(), chars.next(), chars.next())
    else {
        return false;
    };
    if !EQD_PREFIXES.contains(&prefix) || !d1.is_ascii_digit() || !d2.is_ascii_digit() {
        return false;
    }
    !(d1 == '0' && d2 == '0')
}

/// Split an identifier against a declared family table.
///
/// Families are disjoint, so at most one family code can match. The suffix
/// must fall inside the family's declared cardinality.
pub fn parse_identifier<'a>(
    identifier: &str,
    families: impl IntoIterator<Item = (&'a str, Cardinality)>,
) -> Option<Identifier> {
    if is_eqd_identifier(identifier) {
        let (prefix, suffix) = identifier.split_at(1);
        return Some(Identifier {
            family: prefix.to_string(),
            suffix: Some(suffix.to_string()),
            eqd: true,
        });
    }

    for (family, cardinality) in families {
        let Some(rest) = identifier.strip_prefix(family) else {
            continue;
        };
        let suffix = match rest {
            "" => None,
            digits if digits.len() == 1 && digits.chars().all(|c| c.is_ascii_digit()) => {
                digits.parse::<u8>().ok()
            }
            _ => continue,
        };
        if cardinality.admits(suffix) {
            return Some(Identifier {
                family: family.to_string(),
                suffix: suffix.map(|n| n.to_string()),
                eqd: false,
            });
        }
    }

    None
}
