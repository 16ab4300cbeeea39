//! Declarative per-part and per-field validation rules.

use crate::constants::{ARITY_KEY, KEY_SEPARATOR};
use regex::Regex;
use serde::Serialize;
use std::fmt;

/// What a part carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PartKind {
    Numeric,
    Categorical,
    Quality,
    Text,
}

impl PartKind {
    /// Metric parts are the ones that carry a QC triplet
    pub fn is_metric(self) -> bool {
        matches!(self, PartKind::Numeric | PartKind::Categorical)
    }
}

/// How downstream aggregators should combine a part over time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AggHint {
    Mean,
    Max,
    Min,
    Mode,
    Sum,
    CircularMean,
    Drop,
}

/// Validation rule for one comma-delimited part of a payload
#[derive(Debug, Clone, Serialize)]
pub struct PartRule {
    pub kind: PartKind,
    pub token_width: Option<usize>,
    pub scale: Option<f64>,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    /// Values at or above this ceiling are clamped to it and still pass
    pub saturating_max: Option<f64>,
    pub missing_values: Vec<String>,
    pub allowed_values: Vec<String>,
    pub allowed_pattern: Option<String>,
    pub allowed_quality: Option<Vec<String>>,
    /// 1-based index of the part whose quality code governs this part
    pub quality_part: Option<usize>,
    pub agg_hint: AggHint,
    /// Output column name; `{n}` expands to the identifier suffix, `{id}` to
    /// the lowercased identifier
    pub friendly_name: String,
    #[serde(skip)]
    pub(crate) compiled_pattern: Option<Regex>,
}

impl PartRule {
    fn new(kind: PartKind, token_width: Option<usize>, agg_hint: AggHint) -> Self {
        Self {
            kind,
            token_width,
            scale: None,
            min_value: None,
            max_value: None,
            saturating_max: None,
            missing_values: Vec::new(),
            allowed_values: Vec::new(),
            allowed_pattern: None,
            allowed_quality: None,
            quality_part: None,
            agg_hint,
            friendly_name: String::new(),
            compiled_pattern: None,
        }
    }

    /// A fixed-width numeric part
    pub fn numeric(width: usize) -> Self {
        Self::new(PartKind::Numeric, Some(width), AggHint::Mean)
    }

    /// A fixed-width categorical part restricted to `codes`
    pub fn categorical<S: AsRef<str>>(width: usize, codes: &[S]) -> Self {
        let mut rule = Self::new(PartKind::Categorical, Some(width), AggHint::Mode);
        rule.allowed_values = codes.iter().map(|c| c.as_ref().to_string()).collect();
        rule
    }

    /// A one-character quality code drawn from `alphabet`
    pub fn quality(alphabet: &[&str]) -> Self {
        let mut rule = Self::new(PartKind::Quality, Some(1), AggHint::Drop);
        rule.allowed_values = alphabet.iter().map(|c| c.to_string()).collect();
        rule
    }

    /// Free text of a fixed width
    pub fn text(width: usize) -> Self {
        Self::new(PartKind::Text, Some(width), AggHint::Drop)
    }

    /// Free text with no width constraint
    pub fn free_text() -> Self {
        Self::new(PartKind::Text, None, AggHint::Drop)
    }

    pub fn scale(mut self, scale: f64) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.min_value = Some(min);
        self.max_value = Some(max);
        self
    }

    pub fn saturating(mut self, ceiling: f64) -> Self {
        self.saturating_max = Some(ceiling);
        self
    }

    pub fn missing(mut self, tokens: &[&str]) -> Self {
        self.missing_values = tokens.iter().map(|t| t.to_string()).collect();
        self
    }

    /// Restrict a text or categorical part to an explicit code list
    pub fn allowed<S: AsRef<str>>(mut self, codes: &[S]) -> Self {
        self.allowed_values = codes.iter().map(|c| c.as_ref().to_string()).collect();
        self
    }

    pub fn pattern(mut self, pattern: &str) -> Self {
        self.allowed_pattern = Some(pattern.to_string());
        self
    }

    /// Gate this part on the quality code held in `part`, restricted to `alphabet`
    pub fn governed_by(mut self, part: usize, alphabet: &[&str]) -> Self {
        self.quality_part = Some(part);
        self.allowed_quality = Some(alphabet.iter().map(|c| c.to_string()).collect());
        self
    }

    pub fn agg(mut self, hint: AggHint) -> Self {
        self.agg_hint = hint;
        self
    }

    pub fn named(mut self, name: &str) -> Self {
        self.friendly_name = name.to_string();
        self
    }

    pub fn unbounded_width(mut self) -> Self {
        self.token_width = None;
        self
    }

    /// Compiled full-match form of `allowed_pattern`
    pub fn pattern_regex(&self) -> Option<&Regex> {
        self.compiled_pattern.as_ref()
    }

    /// Expand the friendly-name template for a concrete identifier
    pub fn expand_name(template: &str, identifier: &str, suffix: Option<&str>) -> String {
        let suffix = suffix.map(|s| s.trim_start_matches('0')).unwrap_or("");
        template
            .replace("{n}", suffix)
            .replace("{id}", &identifier.to_ascii_lowercase())
    }
}

/// Validator applied to the parameter code of an EQD field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EqdValidator {
    /// Legacy parameter allowlist only
    Legacy,
    /// Legacy allowlist or the MSD code pattern `A#####`
    LegacyOrMsd,
    /// Six-character element schema `EEEEab`
    ElementSchema,
}

/// Rules that relate several parts of one field
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum CrossPartRule {
    /// Type code `calm_type` with an all-zero speed is rewritten to `replacement`
    WindCalm {
        type_part: usize,
        speed_part: usize,
        calm_type: String,
        replacement: String,
    },
    /// Direction sentinel with type code `type_token` raises a synthetic flag
    VariableDirection {
        direction_part: usize,
        type_part: usize,
        type_token: String,
        flag: String,
        flag_name: String,
    },
    /// Direction sentinel with an all-zero speed raises a synthetic calm flag
    CalmFlag {
        direction_part: usize,
        speed_part: usize,
        flag: String,
        flag_name: String,
    },
    /// EQD parameter code check
    EqdParameter {
        part: usize,
        validator: EqdValidator,
    },
}

impl CrossPartRule {
    /// Synthetic key and friendly-name template, for rules that add a column
    pub fn synthetic_column(&self) -> Option<(&str, &str)> {
        match self {
            CrossPartRule::VariableDirection {
                flag, flag_name, ..
            }
            | CrossPartRule::CalmFlag {
                flag, flag_name, ..
            } => Some((flag, flag_name)),
            _ => None,
        }
    }
}

/// Key of one output column within a field
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PartKey {
    /// 1-based part index
    Part(usize),
    /// First part of a value/quality field
    Value,
    /// Second part of a value/quality field
    Quality,
    /// Synthetic column added by a cross-part rule
    Synthetic(String),
    /// Field-level arity failure
    Arity,
}

impl PartKey {
    /// Internal column name, e.g. `TMP__value`, `AA1__part2`
    pub fn internal(&self, identifier: &str) -> String {
        format!("{identifier}{KEY_SEPARATOR}{self}")
    }

    /// Parse the part portion of an internal key
    pub fn parse(key: &str) -> Option<Self> {
        match key {
            "value" => Some(PartKey::Value),
            "quality" => Some(PartKey::Quality),
            ARITY_KEY => Some(PartKey::Arity),
            other => match other.strip_prefix("part") {
                Some(index) => index.parse().ok().filter(|i| *i > 0).map(PartKey::Part),
                None if !other.is_empty() => Some(PartKey::Synthetic(other.to_string())),
                None => None,
            },
        }
    }
}

impl fmt::Display for PartKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartKey::Part(index) => write!(f, "part{index}"),
            PartKey::Value => f.write_str("value"),
            PartKey::Quality => f.write_str("quality"),
            PartKey::Synthetic(name) => f.write_str(name),
            PartKey::Arity => f.write_str(ARITY_KEY),
        }
    }
}

/// All rules for one identifier (or one family template)
#[derive(Debug, Clone, Serialize)]
pub struct FieldRule {
    /// Exact identifier or family code this rule was declared for
    pub identifier: String,
    pub description: String,
    pub parts: Vec<PartRule>,
    /// Friendly-name template of the quality column of a value/quality field
    pub quality_name: Option<String>,
    pub cross_rules: Vec<CrossPartRule>,
}

impl FieldRule {
    pub fn new(identifier: &str, description: &str) -> Self {
        Self {
            identifier: identifier.to_string(),
            description: description.to_string(),
            parts: Vec::new(),
            quality_name: None,
            cross_rules: Vec::new(),
        }
    }

    pub fn part(mut self, rule: PartRule) -> Self {
        self.parts.push(rule);
        self
    }

    /// Declare a value/quality field: one value part whose quality code arrives
    /// as a second, undeclared part
    pub fn value_quality(mut self, value: PartRule, alphabet: &[&str], quality_name: &str) -> Self {
        self.parts.push(value.governed_by(2, alphabet));
        self.quality_name = Some(quality_name.to_string());
        self
    }

    pub fn extend_parts(mut self, rules: impl IntoIterator<Item = PartRule>) -> Self {
        self.parts.extend(rules);
        self
    }

    pub fn cross(mut self, rule: CrossPartRule) -> Self {
        self.cross_rules.push(rule);
        self
    }

    /// True for the two-part value/quality shorthand
    pub fn is_value_quality(&self) -> bool {
        self.parts.len() == 1 && self.parts[0].quality_part.is_some()
    }

    pub fn is_eqd(&self) -> bool {
        self.cross_rules
            .iter()
            .any(|rule| matches!(rule, CrossPartRule::EqdParameter { .. }))
    }

    /// Number of comma-delimited parts a payload must have
    pub fn expected_part_count(&self) -> usize {
        if self.is_value_quality() {
            2
        } else {
            self.parts.len()
        }
    }

    /// 1-based part lookup
    pub fn part_rule(&self, index: usize) -> Option<&PartRule> {
        index.checked_sub(1).and_then(|i| self.parts.get(i))
    }

    /// Every output key this field can emit, with its friendly-name template
    pub fn keys(&self) -> Vec<(PartKey, &str)> {
        let mut keys = Vec::new();
        if self.is_value_quality() {
            keys.push((PartKey::Value, self.parts[0].friendly_name.as_str()));
            if let Some(name) = &self.quality_name {
                keys.push((PartKey::Quality, name.as_str()));
            }
        } else {
            for (i, part) in self.parts.iter().enumerate() {
                keys.push((PartKey::Part(i + 1), part.friendly_name.as_str()));
            }
        }
        for rule in &self.cross_rules {
            if let Some((flag, name)) = rule.synthetic_column() {
                keys.push((PartKey::Synthetic(flag.to_string()), name));
            }
        }
        keys
    }
}

/// Zero-padded codes from `lo` to `hi` inclusive
pub fn code_range(lo: u32, hi: u32, width: usize) -> Vec<String> {
    (lo..=hi).map(|n| format!("{n:0width$}")).collect()
}
