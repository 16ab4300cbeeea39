//! Field assembler: decodes one `(identifier, raw payload)` pair.
//!
//! The assembler applies the arity gate, runs the part validator on every
//! part, then applies the field's cross-part rules. Its output is keyed by
//! [`PartKey`]; renaming to friendly names happens in the row engine.

use super::eqd::is_valid_parameter;
use super::part::{PartOutcome, is_all_zero, is_sentinel, validate_part};
use super::splitter::{Payload, split_payload};
use crate::catalogue::{CrossPartRule, FieldRule, PartKey, RuleCatalogue};
use crate::config::Strictness;
use crate::constants::{
    STRICT_LOG_PREFIX, SUFFIX_QC_PASS, SUFFIX_QC_REASON, SUFFIX_QC_STATUS, quality_codes,
};
use crate::models::{CleanRow, QcReason, QcSignal, Value};
use tracing::warn;

/// One output column of a decoded field
#[derive(Debug, Clone, PartialEq)]
pub struct PartEntry {
    pub key: PartKey,
    pub value: Value,
    /// Present for metric parts and for the field-level arity entry
    pub signal: Option<QcSignal>,
}

impl PartEntry {
    fn from_outcome(key: PartKey, outcome: PartOutcome, metric: bool) -> Self {
        Self {
            key,
            value: outcome.value,
            signal: metric.then_some(outcome.signal),
        }
    }
}

/// Decoded columns of one field
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldOutput {
    pub identifier: String,
    pub entries: Vec<PartEntry>,
}

impl FieldOutput {
    fn empty(identifier: &str) -> Self {
        Self {
            identifier: identifier.to_string(),
            entries: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &PartKey) -> Option<&PartEntry> {
        self.entries.iter().find(|entry| &entry.key == key)
    }

    pub fn value(&self, key: &PartKey) -> Option<&Value> {
        self.get(key).map(|entry| &entry.value)
    }

    pub fn signal(&self, key: &PartKey) -> Option<QcSignal> {
        self.get(key).and_then(|entry| entry.signal)
    }

    /// Number of QC triplets this field carries
    pub fn signal_count(&self) -> usize {
        self.entries.iter().filter(|e| e.signal.is_some()).count()
    }

    /// Write the field's columns into `row`, naming each entry with `name_for`.
    ///
    /// The arity entry has no value column, only its QC triplet.
    pub fn write_into<F>(&self, row: &mut CleanRow, name_for: F)
    where
        F: Fn(&PartKey) -> String,
    {
        for entry in &self.entries {
            let name = name_for(&entry.key);
            if entry.key != PartKey::Arity {
                row.insert(name.clone(), entry.value.clone());
            }
            if let Some(signal) = entry.signal {
                write_signal(row, &name, signal);
            }
        }
    }

    /// Columns under internal keys (`TMP__value`, `WND__part4`)
    pub fn to_internal_row(&self) -> CleanRow {
        let mut row = CleanRow::new();
        self.write_into(&mut row, |key| key.internal(&self.identifier));
        row
    }
}

/// Emit the `__qc_pass`, `__qc_status` and `__qc_reason` columns for `base`
pub fn write_signal(row: &mut CleanRow, base: &str, signal: QcSignal) {
    row.insert(format!("{base}{SUFFIX_QC_PASS}"), Value::Bool(signal.pass));
    row.insert(
        format!("{base}{SUFFIX_QC_STATUS}"),
        Value::text(signal.status.as_str()),
    );
    row.insert(
        format!("{base}{SUFFIX_QC_REASON}"),
        signal
            .reason
            .map(|reason| Value::text(reason.as_str()))
            .unwrap_or(Value::Null),
    );
}

/// Decodes single fields against a catalogue under one strictness policy
#[derive(Debug, Clone, Copy)]
pub struct FieldAssembler<'c> {
    catalogue: &'c RuleCatalogue,
    strictness: Strictness,
}

impl<'c> FieldAssembler<'c> {
    pub fn new(catalogue: &'c RuleCatalogue, strictness: Strictness) -> Self {
        Self {
            catalogue,
            strictness,
        }
    }

    pub fn strictness(&self) -> Strictness {
        self.strictness
    }

    /// Decode one field. Empty payloads and unrecognised identifiers yield
    /// an empty output.
    pub fn assemble(&self, identifier: &str, raw: &str) -> FieldOutput {
        let Some(rule) = self.catalogue.lookup(identifier) else {
            return FieldOutput::empty(identifier);
        };
        let Some(payload) = split_payload(raw) else {
            return FieldOutput::empty(identifier);
        };

        let expected = rule.expected_part_count();
        if payload.arity() != expected {
            if self.strictness.is_strict() {
                warn!(
                    identifier,
                    observed = payload.arity(),
                    expected,
                    reason = QcReason::BadArity.as_str(),
                    "{STRICT_LOG_PREFIX} arity mismatch"
                );
            }
            return FieldOutput {
                identifier: identifier.to_string(),
                entries: vec![PartEntry {
                    key: PartKey::Arity,
                    value: Value::Null,
                    signal: Some(QcSignal::invalid(QcReason::BadArity)),
                }],
            };
        }

        let mut output = if rule.is_value_quality() {
            self.assemble_value_quality(identifier, rule, &payload)
        } else {
            self.assemble_parts(identifier, rule, &payload)
        };
        apply_cross_rules(rule, &payload, &mut output);
        output
    }

    fn assemble_value_quality(
        &self,
        identifier: &str,
        rule: &FieldRule,
        payload: &Payload<'_>,
    ) -> FieldOutput {
        let value_rule = &rule.parts[0];
        let token = payload.part(1).unwrap_or("");
        let quality = payload.part(2).unwrap_or("");

        let outcome = validate_part(value_rule, token, Some(quality), self.strictness);
        self.log_width_violation(identifier, 1, value_rule.token_width, token, &outcome);

        let quality_accepted = match &value_rule.allowed_quality {
            Some(alphabet) => alphabet.iter().any(|code| code == quality),
            None => quality_codes::GLOBAL.contains(&quality),
        };
        let quality_value = if quality_accepted {
            Value::text(quality)
        } else {
            Value::Null
        };

        FieldOutput {
            identifier: identifier.to_string(),
            entries: vec![
                PartEntry::from_outcome(PartKey::Value, outcome, value_rule.kind.is_metric()),
                PartEntry {
                    key: PartKey::Quality,
                    value: quality_value,
                    signal: None,
                },
            ],
        }
    }

    fn assemble_parts(
        &self,
        identifier: &str,
        rule: &FieldRule,
        payload: &Payload<'_>,
    ) -> FieldOutput {
        let mut entries = Vec::with_capacity(rule.parts.len());
        for (i, part_rule) in rule.parts.iter().enumerate() {
            let index = i + 1;
            let token = payload.part(index).unwrap_or("");
            let governing = part_rule.quality_part.and_then(|q| payload.part(q));
            let outcome = validate_part(part_rule, token, governing, self.strictness);
            self.log_width_violation(identifier, index, part_rule.token_width, token, &outcome);
            entries.push(PartEntry::from_outcome(
                PartKey::Part(index),
                outcome,
                part_rule.kind.is_metric(),
            ));
        }
        FieldOutput {
            identifier: identifier.to_string(),
            entries,
        }
    }

    fn log_width_violation(
        &self,
        identifier: &str,
        part: usize,
        width: Option<usize>,
        token: &str,
        outcome: &PartOutcome,
    ) {
        if !self.strictness.is_strict() || outcome.reason() != Some(QcReason::MalformedToken) {
            return;
        }
        let observed = token.chars().count();
        if let Some(expected) = width.filter(|w| *w != observed) {
            warn!(
                identifier,
                part,
                observed,
                expected,
                reason = QcReason::MalformedToken.as_str(),
                "{STRICT_LOG_PREFIX} token width mismatch"
            );
        }
    }
}

fn apply_cross_rules(rule: &FieldRule, payload: &Payload<'_>, output: &mut FieldOutput) {
    for cross in &rule.cross_rules {
        match cross {
            CrossPartRule::WindCalm {
                type_part,
                speed_part,
                calm_type,
                replacement,
            } => {
                let type_token = payload.part(*type_part).unwrap_or("");
                let speed_token = payload.part(*speed_part).unwrap_or("");
                if type_token == calm_type && is_all_zero(speed_token) {
                    if let Some(entry) = part_entry_mut(output, *type_part) {
                        entry.value = Value::text(replacement.as_str());
                        if entry.signal.is_some() {
                            entry.signal = Some(QcSignal::passed());
                        }
                    }
                }
            }
            CrossPartRule::VariableDirection {
                direction_part,
                type_part,
                type_token,
                flag,
                ..
            } => {
                let direction = payload.part(*direction_part).unwrap_or("");
                let observed_type = payload.part(*type_part).unwrap_or("");
                let is_missing_direction = rule
                    .part_rule(*direction_part)
                    .is_some_and(|part| is_sentinel(part, direction));
                if is_missing_direction && observed_type == type_token {
                    if let Some(entry) = part_entry_mut(output, *direction_part) {
                        entry.value = Value::Null;
                        if entry.signal.is_some() {
                            entry.signal = Some(QcSignal::missing());
                        }
                    }
                    output.entries.push(PartEntry {
                        key: PartKey::Synthetic(flag.clone()),
                        value: Value::Bool(true),
                        signal: None,
                    });
                }
            }
            CrossPartRule::CalmFlag {
                direction_part,
                speed_part,
                flag,
                ..
            } => {
                let direction = payload.part(*direction_part).unwrap_or("");
                let speed = payload.part(*speed_part).unwrap_or("");
                let is_missing_direction = rule
                    .part_rule(*direction_part)
                    .is_some_and(|part| is_sentinel(part, direction));
                if is_missing_direction && is_all_zero(speed) {
                    output.entries.push(PartEntry {
                        key: PartKey::Synthetic(flag.clone()),
                        value: Value::Bool(true),
                        signal: None,
                    });
                }
            }
            CrossPartRule::EqdParameter { part, validator } => {
                let code = payload.part(*part).unwrap_or("");
                if let Some(entry) = part_entry_mut(output, *part) {
                    let passed = entry.signal.is_none_or(|signal| signal.pass);
                    if passed && !entry.value.is_null() && !is_valid_parameter(*validator, code) {
                        entry.value = Value::Null;
                        if entry.signal.is_some() {
                            entry.signal = Some(QcSignal::invalid(QcReason::BadDomain));
                        }
                    }
                }
            }
        }
    }
}

fn part_entry_mut(output: &mut FieldOutput, index: usize) -> Option<&mut PartEntry> {
    output
        .entries
        .iter_mut()
        .find(|entry| entry.key == PartKey::Part(index))
}
