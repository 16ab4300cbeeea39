//! Part validator: the semantic gates applied to a single token.
//!
//! Gates run in a fixed order and the first failure wins:
//!
//! 1. token width (strict only) -> `MALFORMED_TOKEN`
//! 2. governing quality code -> `BAD_QUALITY_CODE`
//! 3. sentinel -> `SENTINEL_MISSING`
//! 4. domain (allow-set or pattern) -> `BAD_DOMAIN`
//! 5. numeric parse and raw range -> `MALFORMED_TOKEN` / `OUT_OF_RANGE`
//! 6. scale and saturating clamp
//!
//! A failed gate always nulls the value.

use crate::catalogue::{PartKind, PartRule};
use crate::config::Strictness;
use crate::constants::quality_codes;
use crate::models::{QcReason, QcSignal, Value};

/// Decoded value and QC signal of one part
#[derive(Debug, Clone, PartialEq)]
pub struct PartOutcome {
    pub value: Value,
    pub signal: QcSignal,
}

impl PartOutcome {
    fn pass(value: Value) -> Self {
        Self {
            value,
            signal: QcSignal::passed(),
        }
    }

    fn invalid(reason: QcReason) -> Self {
        Self {
            value: Value::Null,
            signal: QcSignal::invalid(reason),
        }
    }

    fn missing() -> Self {
        Self {
            value: Value::Null,
            signal: QcSignal::missing(),
        }
    }

    pub fn reason(&self) -> Option<QcReason> {
        self.signal.reason
    }
}

/// Run every gate for one token.
///
/// `governing_quality` is the raw token of the part named by
/// `rule.quality_part`, when the rule declares one.
pub fn validate_part(
    rule: &PartRule,
    token: &str,
    governing_quality: Option<&str>,
    strictness: Strictness,
) -> PartOutcome {
    if strictness.is_strict() {
        if let Some(width) = rule.token_width {
            if token.chars().count() != width {
                return PartOutcome::invalid(QcReason::MalformedToken);
            }
        }
    }

    if rule.quality_part.is_some() {
        let code = governing_quality.unwrap_or("");
        let accepted = match &rule.allowed_quality {
            Some(alphabet) => alphabet.iter().any(|allowed| allowed == code),
            None => quality_codes::GLOBAL.contains(&code),
        };
        if !accepted {
            return PartOutcome::invalid(QcReason::BadQualityCode);
        }
    }

    if token.is_empty() || is_sentinel(rule, token) {
        return PartOutcome::missing();
    }

    if !rule.allowed_values.is_empty() && !rule.allowed_values.iter().any(|v| v == token) {
        return PartOutcome::invalid(QcReason::BadDomain);
    }
    if let Some(pattern) = rule.pattern_regex() {
        if !pattern.is_match(token) {
            return PartOutcome::invalid(QcReason::BadDomain);
        }
    }

    match rule.kind {
        PartKind::Numeric => validate_numeric(rule, token),
        PartKind::Categorical | PartKind::Quality | PartKind::Text => {
            PartOutcome::pass(Value::text(token))
        }
    }
}

fn validate_numeric(rule: &PartRule, token: &str) -> PartOutcome {
    let Some(raw) = parse_numeric(token) else {
        return PartOutcome::invalid(QcReason::MalformedToken);
    };

    if rule.min_value.is_some_and(|min| raw < min) || rule.max_value.is_some_and(|max| raw > max)
    {
        return PartOutcome::invalid(QcReason::OutOfRange);
    }

    let mut value = match rule.scale {
        Some(scale) => apply_scale(raw, scale),
        None => raw,
    };
    if let Some(ceiling) = rule.saturating_max {
        if value >= ceiling {
            value = ceiling;
        }
    }
    PartOutcome::pass(Value::Number(value))
}

/// True when the token encodes "missing" for this part.
///
/// Declared sentinels are compared after normalising both sides. Numeric
/// parts without declared sentinels treat a run of two or more nines
/// (optionally `+`-signed) as missing.
pub fn is_sentinel(rule: &PartRule, token: &str) -> bool {
    if rule.missing_values.is_empty() {
        return rule.kind == PartKind::Numeric && is_nines_run(token);
    }
    let normalised = normalise_token(token);
    rule.missing_values
        .iter()
        .any(|missing| normalise_token(missing) == normalised)
}

fn is_nines_run(token: &str) -> bool {
    let digits = token.strip_prefix('+').unwrap_or(token);
    digits.len() >= 2 && digits.chars().all(|c| c == '9')
}

/// Strip an optional leading `+` and leading zeros, keeping a leading `-`
pub fn normalise_token(token: &str) -> String {
    let (negative, body) = match token.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, token.strip_prefix('+').unwrap_or(token)),
    };
    let trimmed = body.trim_start_matches('0');
    let body = if trimmed.is_empty() && !body.is_empty() {
        "0"
    } else {
        trimmed
    };
    if negative {
        format!("-{body}")
    } else {
        body.to_string()
    }
}

/// Parse a signed integer or decimal token. Exponents, `inf` and `nan` are rejected.
pub fn parse_numeric(token: &str) -> Option<f64> {
    let body = token
        .strip_prefix('+')
        .or_else(|| token.strip_prefix('-'))
        .unwrap_or(token);
    if body.is_empty() || body == "." {
        return None;
    }
    let mut seen_point = false;
    for c in body.chars() {
        match c {
            '0'..='9' => {}
            '.' if !seen_point => seen_point = true,
            _ => return None,
        }
    }
    token.strip_prefix('+').unwrap_or(token).parse().ok()
}

/// Multiply by `scale`, dividing instead when the scale is an exact reciprocal
/// so that `10132 * 0.1` lands on `1013.2` exactly.
fn apply_scale(raw: f64, scale: f64) -> f64 {
    if scale > 0.0 && scale < 1.0 {
        let divisor = (1.0 / scale).round();
        if ((1.0 / scale) - divisor).abs() < 1e-9 {
            return raw / divisor;
        }
    }
    raw * scale
}

/// True for a non-empty token made only of zeros
pub fn is_all_zero(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c == '0')
}
