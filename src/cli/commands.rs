//! Command implementations for the ISD processor CLI

use crate::catalogue::{PartKey, RuleCatalogue};
use crate::cli::args::{CleanArgs, Commands, DecodeArgs, RulesArgs};
use crate::decoder::RowDecoder;
use crate::models::{CleanRow, ProcessingStats};
use crate::processor::DatasetProcessor;
use anyhow::{Context, Result, bail};
use colored::*;
use std::collections::BTreeMap;
use tracing::{Level, debug};

/// Initialise the tracing subscriber; logs go to stderr so stdout stays clean
pub fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Dispatch a subcommand
pub async fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Clean(args) => clean(args).await.map(|_| ()),
        Commands::Decode(args) => {
            println!("{}", decode(&args)?);
            Ok(())
        }
        Commands::Rules(args) => {
            println!("{}", rules(&args)?);
            Ok(())
        }
    }
}

/// Run the file pipeline
pub async fn clean(args: CleanArgs) -> Result<ProcessingStats> {
    let config = args.to_config().context("Invalid configuration")?;
    debug!("Clean configuration: {:?}", config);

    let mut processor = DatasetProcessor::new(args.input.clone(), args.output.clone())?
        .with_config(config)?;
    let stats = processor
        .process()
        .await
        .with_context(|| format!("Failed to clean {}", args.input))?;

    if stats.files_processed == 0 && stats.files_failed == 0 {
        println!("{}", "No CSV files found".yellow());
    } else {
        println!(
            "\n{} {}",
            "Output written to".bright_green(),
            stats.output_path.display()
        );
    }
    Ok(stats)
}

/// Decode a single row and render it as pretty JSON
pub fn decode(args: &DecodeArgs) -> Result<String> {
    let catalogue = RuleCatalogue::global()?;
    let row: BTreeMap<&str, &str> = args
        .cells
        .iter()
        .map(|(column, value)| (column.as_str(), value.as_str()))
        .collect();

    let decoded: CleanRow = RowDecoder::new(catalogue, args.strictness)
        .with_drop_raw_columns(args.drop_raw_columns)
        .decode_row(&row);
    Ok(serde_json::to_string_pretty(&decoded)?)
}

/// List identifiers, or describe one
pub fn rules(args: &RulesArgs) -> Result<String> {
    let catalogue = RuleCatalogue::global()?;

    let Some(identifier) = &args.identifier else {
        let identifiers = catalogue.identifiers();
        if args.json {
            return Ok(serde_json::to_string_pretty(&identifiers)?);
        }
        return Ok(format!(
            "{} recognised identifiers:\n{}",
            identifiers.len(),
            identifiers.join(" ")
        ));
    };

    let identifier = identifier.trim().to_ascii_uppercase();
    let Some(rule) = catalogue.lookup(&identifier) else {
        bail!("'{identifier}' is not a recognised identifier");
    };

    let columns: Vec<(PartKey, String)> = rule
        .keys()
        .into_iter()
        .map(|(key, _)| {
            let name = catalogue
                .friendly_name(&identifier, &key)
                .unwrap_or_else(|| key.internal(&identifier));
            (key, name)
        })
        .collect();

    if args.json {
        let names: BTreeMap<String, &str> = columns
            .iter()
            .map(|(key, name)| (key.internal(&identifier), name.as_str()))
            .collect();
        let value = serde_json::json!({
            "identifier": identifier,
            "description": rule.description,
            "expected_parts": rule.expected_part_count(),
            "columns": names,
            "parts": rule.parts,
            "cross_rules": rule.cross_rules,
        });
        return Ok(serde_json::to_string_pretty(&value)?);
    }

    let mut out = format!(
        "{} - {} ({} parts)\n",
        identifier.bold(),
        rule.description,
        rule.expected_part_count()
    );
    for (key, name) in &columns {
        let detail = match key {
            PartKey::Value => rule.part_rule(1),
            PartKey::Part(index) => rule.part_rule(*index),
            _ => None,
        }
        .map(|part| {
            let width = part
                .token_width
                .map(|width| format!(", width {width}"))
                .unwrap_or_default();
            format!("{:?}{width}", part.kind)
        })
        .unwrap_or_else(|| match key {
            PartKey::Quality => "Quality".to_string(),
            _ => "Flag".to_string(),
        });
        out.push_str(&format!("  {:<24} {:<40} {detail}\n", key.to_string(), name));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Strictness;

    fn decode_args(cells: &[(&str, &str)]) -> DecodeArgs {
        DecodeArgs {
            cells: cells
                .iter()
                .map(|(c, v)| (c.to_string(), v.to_string()))
                .collect(),
            strictness: Strictness::Strict,
            drop_raw_columns: false,
        }
    }

    #[test]
    fn test_decode_prints_row_json() {
        let json = decode(&decode_args(&[("TMP", "+0250,1")])).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["temperature_c"], serde_json::json!(25.0));
        assert_eq!(value["temperature_c__qc_pass"], serde_json::json!(true));
        assert_eq!(value["temperature_c__qc_reason"], serde_json::Value::Null);
        assert_eq!(value["usable_metric_count"], serde_json::json!(1.0));
    }

    #[test]
    fn test_rules_lists_identifiers() {
        let listing = rules(&RulesArgs {
            identifier: None,
            json: true,
        })
        .unwrap();
        let identifiers: Vec<String> = serde_json::from_str(&listing).unwrap();
        assert!(identifiers.contains(&"WND".to_string()));
        assert!(identifiers.contains(&"AA1".to_string()));
    }

    #[test]
    fn test_rules_describes_identifier() {
        let json = rules(&RulesArgs {
            identifier: Some("wnd".to_string()),
            json: true,
        })
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["expected_parts"], serde_json::json!(5));
        assert_eq!(
            value["columns"]["WND__part1"],
            serde_json::json!("wind_direction_deg")
        );
    }

    #[test]
    fn test_rules_unknown_identifier() {
        let result = rules(&RulesArgs {
            identifier: Some("ZZ9".to_string()),
            json: false,
        });
        assert!(result.is_err());
    }
}
