//! Payload splitter: comma-delimited field value into ordered, trimmed parts.

/// Ordered parts of one additional-data field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload<'a> {
    parts: Vec<&'a str>,
}

impl<'a> Payload<'a> {
    /// Observed arity
    pub fn arity(&self) -> usize {
        self.parts.len()
    }

    /// 1-based part access
    pub fn part(&self, index: usize) -> Option<&'a str> {
        index.checked_sub(1).and_then(|i| self.parts.get(i)).copied()
    }

    pub fn parts(&self) -> &[&'a str] {
        &self.parts
    }
}

/// Split a raw field value. Returns `None` for an empty or all-whitespace field.
pub fn split_payload(raw: &str) -> Option<Payload<'_>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    Some(Payload {
        parts: raw.split(',').map(str::trim).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_trims_parts() {
        let payload = split_payload("  180, 1 ,N,0050,1 ").unwrap();
        assert_eq!(payload.arity(), 5);
        assert_eq!(payload.parts(), &["180", "1", "N", "0050", "1"]);
        assert_eq!(payload.part(1), Some("180"));
        assert_eq!(payload.part(5), Some("1"));
        assert_eq!(payload.part(0), None);
        assert_eq!(payload.part(6), None);
    }

    #[test]
    fn test_empty_field_has_no_payload() {
        assert!(split_payload("").is_none());
        assert!(split_payload("   ").is_none());
    }

    #[test]
    fn test_empty_parts_are_preserved() {
        let payload = split_payload("+0250,").unwrap();
        assert_eq!(payload.arity(), 2);
        assert_eq!(payload.part(2), Some(""));
    }
}
