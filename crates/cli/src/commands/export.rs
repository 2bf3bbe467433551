//! Export and bibliography commands

use std::fs;
use std::path::Path;

use littrack_common::{
    errors::{AppError, Result},
    export::{format_bibliography, to_csv, to_json_export, CitationStyle},
    filters::{ExportScope, FilterSet},
};

use super::{Context, ExportFormat};

/// Write `content` to `output`, or hand it back for stdout
fn emit(content: String, output: Option<&Path>, summary: String) -> Result<String> {
    match output {
        Some(path) => {
            fs::write(path, content).map_err(|e| AppError::Storage {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
            tracing::info!(path = %path.display(), "Export written");
            Ok(format!("{} to {}", summary, path.display()))
        }
        None => Ok(content),
    }
}

pub fn export(
    ctx: &Context,
    format: ExportFormat,
    scope: ExportScope,
    filters: &FilterSet,
    output: Option<&Path>,
) -> Result<String> {
    let store = ctx.load_store()?;
    let selected = scope.select(store.entries(), filters);

    match format {
        ExportFormat::Csv => {
            let export = to_csv(&selected, ctx.config.export.csv_delimiter, ctx.config.export.max_export_rows);
            let summary = match export.truncated {
                0 => format!("Exported {} entries as CSV", export.rows),
                n => format!("Exported {} entries as CSV ({} over the row limit skipped)", export.rows, n),
            };
            emit(export.content, output, summary)
        }
        ExportFormat::Json => {
            let count = selected.len();
            let backup = to_json_export(selected, ctx.research_question(&store), ctx.now)?;
            let content = serde_json::to_string_pretty(&backup)?;
            emit(content, output, format!("Exported {} entries as JSON", count))
        }
    }
}

pub fn bibliography(
    ctx: &Context,
    style: Option<&str>,
    scope: ExportScope,
    filters: &FilterSet,
    output: Option<&Path>,
) -> Result<String> {
    let style = match style {
        Some(requested) => requested.parse::<CitationStyle>()?,
        None => configured_style(ctx),
    };

    let store = ctx.load_store()?;
    let selected = scope.select(store.entries(), filters);
    if selected.is_empty() {
        return Ok("No sources to include in bibliography".to_string());
    }

    let bibliography = format_bibliography(&selected, style);
    let summary = format!("Bibliography ({}, {} sources) written", bibliography.style.name(), bibliography.count);
    emit(bibliography.content, output, summary)
}

fn configured_style(ctx: &Context) -> CitationStyle {
    ctx.config
        .export
        .citation_style
        .parse()
        .unwrap_or_else(|e: AppError| {
            tracing::warn!(error = %e, "Configured citation style not recognised, using APA");
            CitationStyle::default()
        })
}
