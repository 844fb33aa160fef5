//! CLI command for data export

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};

use super::{create_output, FilterArgs};
use crate::config::settings::Settings;
use crate::engine::{filter, sort, SortField, SortSpec};
use crate::error::{ExpenseError, ExpenseResult};
use crate::export::{csv, json, yaml};
use crate::storage::Storage;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// CSV format (expenses only; filters apply)
    Csv,
    /// JSON format (full snapshot)
    Json,
    /// YAML format (full snapshot, human-readable)
    Yaml,
}

impl ExportFormat {
    /// Guess the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

/// Arguments for `export`
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Output file path
    pub output: PathBuf,

    /// Export format; inferred from the file extension when omitted
    #[arg(short, long, value_enum)]
    pub format: Option<ExportFormat>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    #[command(flatten)]
    pub filter: FilterArgs,
}

/// Handle `export`
pub fn handle_export(storage: &Storage, settings: &Settings, args: ExportArgs) -> ExpenseResult<()> {
    let format = args
        .format
        .or_else(|| ExportFormat::from_path(&args.output))
        .unwrap_or(ExportFormat::Json);

    let criteria = args.filter.to_criteria()?;
    if format != ExportFormat::Csv && !criteria.is_empty() {
        return Err(ExpenseError::Validation(
            "Filters only apply to CSV exports; JSON and YAML export the full snapshot".into(),
        ));
    }

    let mut writer = create_output(&args.output)?;

    match format {
        ExportFormat::Csv => {
            let records = storage.expenses.get_all()?;
            let selected = sort(
                &filter(&records, &criteria),
                SortSpec::ascending(SortField::Date),
            );
            csv::export_expenses_csv(&selected, &settings.default_currency, &mut writer)?;
            println!(
                "Exported {} expenses to: {}",
                selected.len(),
                args.output.display()
            );
        }
        ExportFormat::Json => {
            json::export_full_json(storage, &mut writer, args.pretty)?;
            println!("Full snapshot exported to: {}", args.output.display());
        }
        ExportFormat::Yaml => {
            yaml::export_full_yaml(storage, &mut writer)?;
            println!("Full snapshot exported to: {}", args.output.display());
        }
    }

    writer
        .flush()
        .map_err(|e| ExpenseError::Export(e.to_string()))?;
    Ok(())
}
