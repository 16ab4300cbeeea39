//! Rule catalogue for ISD additional-data identifiers
//!
//! The catalogue is the single source of truth for how every recognised
//! identifier is split, validated, scaled and named. It is assembled once by
//! [`CatalogueBuilder`] from the declarative tables in [`rules`], checked for
//! internal consistency, and then shared read-only.
//!
//! ## Lookup
//!
//! Identifiers are resolved in two steps: the exact entry (`CN2`, `IA1`) is
//! consulted first, then the family template (`KA` covers `KA1..KA4`). An
//! identifier whose family is unknown or whose suffix lies outside the
//! family's declared cardinality is not recognised.
//!
//! ## Naming
//!
//! Every output key (`AA1__part2`, `TMP__value`) maps to exactly one friendly
//! name and back; the builder rejects tables where two keys would share a
//! name.

pub mod identifier;
pub mod rule;
pub mod rules;

#[cfg(test)]
pub mod tests;

pub use identifier::{Cardinality, Identifier, is_eqd_identifier, parse_identifier};
pub use rule::{
    AggHint, CrossPartRule, EqdValidator, FieldRule, PartKey, PartKind, PartRule, code_range,
};

use crate::constants::{
    KEY_SEPARATOR, ROW_HAS_ANY_USABLE_METRIC, USABLE_METRIC_COUNT, USABLE_METRIC_FRACTION,
    control,
};
use crate::error::{IsdError, Result};
use once_cell::sync::OnceCell;
use regex::Regex;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

static GLOBAL_CATALOGUE: OnceCell<RuleCatalogue> = OnceCell::new();

/// Immutable registry of field rules
#[derive(Debug)]
pub struct RuleCatalogue {
    families: BTreeMap<String, Cardinality>,
    exact: HashMap<String, FieldRule>,
    templates: HashMap<String, FieldRule>,
    by_friendly: HashMap<String, String>,
    by_internal: HashMap<String, String>,
}

impl RuleCatalogue {
    /// Start an empty builder
    pub fn builder() -> CatalogueBuilder {
        CatalogueBuilder::default()
    }

    /// Build the full ISD catalogue from the declarative tables
    pub fn standard() -> Result<Self> {
        let mut builder = Self::builder();
        rules::register_all(&mut builder);
        builder.build()
    }

    /// Process-wide standard catalogue, built on first use
    pub fn global() -> Result<&'static RuleCatalogue> {
        GLOBAL_CATALOGUE.get_or_try_init(Self::standard)
    }

    fn parse(&self, identifier: &str) -> Option<Identifier> {
        parse_identifier(
            identifier,
            self.families
                .iter()
                .map(|(code, cardinality)| (code.as_str(), *cardinality)),
        )
    }

    /// Field rule for an identifier, exact entry first then family template
    pub fn lookup(&self, identifier: &str) -> Option<&FieldRule> {
        let parsed = self.parse(identifier)?;
        self.exact
            .get(identifier)
            .or_else(|| self.templates.get(&parsed.family))
    }

    /// Identifier gate
    pub fn is_recognised(&self, identifier: &str) -> bool {
        self.lookup(identifier).is_some()
    }

    /// Number of comma-delimited parts the identifier's payload must carry
    pub fn expected_part_count(&self, identifier: &str) -> Option<usize> {
        self.lookup(identifier).map(FieldRule::expected_part_count)
    }

    /// Friendly output name of one key of an identifier
    pub fn friendly_name(&self, identifier: &str, key: &PartKey) -> Option<String> {
        self.by_internal.get(&key.internal(identifier)).cloned()
    }

    /// Friendly name for a full internal key such as `TMP__value`
    pub fn friendly_for_internal(&self, internal_key: &str) -> Option<&str> {
        self.by_internal.get(internal_key).map(String::as_str)
    }

    /// Inverse of the friendly-name mapping
    pub fn internal_key(&self, friendly_name: &str) -> Option<&str> {
        self.by_friendly.get(friendly_name).map(String::as_str)
    }

    /// Aggregation hint of a part (1-based; the value part for value/quality fields)
    pub fn agg_hint(&self, identifier: &str, part: usize) -> Option<AggHint> {
        self.lookup(identifier)
            .and_then(|rule| rule.part_rule(part))
            .map(|part| part.agg_hint)
    }

    /// Every recognised identifier, in sorted order
    pub fn identifiers(&self) -> Vec<String> {
        let mut identifiers = Vec::new();
        for (family, cardinality) in &self.families {
            for suffix in cardinality.suffixes() {
                let code = match suffix {
                    Some(n) => format!("{family}{n}"),
                    None => family.clone(),
                };
                if self.lookup(&code).is_some() {
                    identifiers.push(code);
                }
            }
        }
        for prefix in identifier::EQD_PREFIXES {
            if self.templates.contains_key(&prefix.to_string()) {
                identifiers.extend((1..=99).map(|n| format!("{prefix}{n:02}")));
            }
        }
        identifiers.sort();
        identifiers
    }

    /// Number of friendly names in the catalogue
    pub fn name_count(&self) -> usize {
        self.by_friendly.len()
    }
}

/// Collects families and field rules, then validates them into a catalogue
#[derive(Debug, Default)]
pub struct CatalogueBuilder {
    families: BTreeMap<String, Cardinality>,
    exact: Vec<FieldRule>,
    templates: Vec<FieldRule>,
}

impl CatalogueBuilder {
    /// Declare a family with no suffix (`WND`)
    pub fn bare(&mut self, code: &str) -> &mut Self {
        self.families.insert(code.to_string(), Cardinality::Bare);
        self
    }

    /// Declare a family with a suffix range (`AA` 1..=4)
    pub fn family(&mut self, code: &str, min: u8, max: u8) -> &mut Self {
        self.families
            .insert(code.to_string(), Cardinality::Suffix { min, max });
        self
    }

    /// Rule for one exact identifier
    pub fn exact(&mut self, rule: FieldRule) -> &mut Self {
        self.exact.push(rule);
        self
    }

    /// Rule covering every member of a family
    pub fn template(&mut self, rule: FieldRule) -> &mut Self {
        self.templates.push(rule);
        self
    }

    /// Validate the declared tables and freeze them
    pub fn build(self) -> Result<RuleCatalogue> {
        let mut exact = HashMap::new();
        for rule in self.exact {
            let rule = compile_rule(rule)?;
            if exact.contains_key(&rule.identifier) {
                return Err(IsdError::catalogue(&rule.identifier, "declared twice"));
            }
            exact.insert(rule.identifier.clone(), rule);
        }

        let mut templates = HashMap::new();
        for rule in self.templates {
            let rule = compile_rule(rule)?;
            if templates.contains_key(&rule.identifier) {
                return Err(IsdError::catalogue(&rule.identifier, "declared twice"));
            }
            templates.insert(rule.identifier.clone(), rule);
        }

        let mut catalogue = RuleCatalogue {
            families: self.families,
            exact,
            templates,
            by_friendly: HashMap::new(),
            by_internal: HashMap::new(),
        };

        for identifier in catalogue.exact.keys() {
            if catalogue.parse(identifier).is_none() {
                return Err(IsdError::catalogue(
                    identifier,
                    "exact rule outside any declared family",
                ));
            }
        }

        index_names(&mut catalogue)?;
        debug!(
            "Built rule catalogue: {} families, {} exact rules, {} templates, {} names",
            catalogue.families.len(),
            catalogue.exact.len(),
            catalogue.templates.len(),
            catalogue.by_friendly.len()
        );
        Ok(catalogue)
    }
}

/// Compile patterns and check part references of a single rule
fn compile_rule(mut rule: FieldRule) -> Result<FieldRule> {
    if rule.parts.is_empty() {
        return Err(IsdError::catalogue(&rule.identifier, "no parts declared"));
    }
    let part_count = rule.expected_part_count();
    for (i, part) in rule.parts.iter_mut().enumerate() {
        if let Some(pattern) = &part.allowed_pattern {
            part.compiled_pattern = Some(Regex::new(&format!("^(?:{pattern})$"))?);
        }
        if let Some(quality) = part.quality_part {
            if quality == 0 || quality > part_count || quality == i + 1 {
                return Err(IsdError::catalogue(
                    &rule.identifier,
                    format!("part {} references invalid quality part {quality}", i + 1),
                ));
            }
        }
        if part.friendly_name.is_empty() {
            return Err(IsdError::catalogue(
                &rule.identifier,
                format!("part {} has no friendly name", i + 1),
            ));
        }
    }
    if rule.is_value_quality() && rule.quality_name.is_none() {
        return Err(IsdError::catalogue(
            &rule.identifier,
            "value/quality field without a quality column name",
        ));
    }
    Ok(rule)
}

/// Expand every identifier's names and check the mapping is bijective
fn index_names(catalogue: &mut RuleCatalogue) -> Result<()> {
    let reserved: Vec<&str> = control::ALL
        .iter()
        .copied()
        .chain([
            ROW_HAS_ANY_USABLE_METRIC,
            USABLE_METRIC_COUNT,
            USABLE_METRIC_FRACTION,
        ])
        .collect();

    let mut by_friendly: HashMap<String, String> = HashMap::new();
    let mut by_internal: HashMap<String, String> = HashMap::new();

    for identifier in catalogue.identifiers() {
        let Some(parsed) = catalogue.parse(&identifier) else {
            continue;
        };
        let Some(rule) = catalogue.lookup(&identifier) else {
            continue;
        };
        for (key, template) in rule.keys() {
            let name = PartRule::expand_name(template, &identifier, parsed.suffix.as_deref());
            let internal = key.internal(&identifier);
            if name.contains(KEY_SEPARATOR) || reserved.contains(&name.as_str()) {
                return Err(IsdError::catalogue(
                    &identifier,
                    format!("friendly name '{name}' is reserved"),
                ));
            }
            if let Some(existing) = by_friendly.get(&name) {
                return Err(IsdError::catalogue(
                    &identifier,
                    format!("friendly name '{name}' already used by {existing}"),
                ));
            }
            by_friendly.insert(name.clone(), internal.clone());
            by_internal.insert(internal, name);
        }
    }

    catalogue.by_friendly = by_friendly;
    catalogue.by_internal = by_internal;
    Ok(())
}
