//! LitTrack command-line interface
//!
//! Manages the literature entry collection stored in a local JSON file and
//! produces exports, bibliographies, citation reports and research gap
//! analyses.

mod commands;
mod render;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use littrack_common::{
    config::AppConfig,
    errors::{AppError, ErrorResponse},
    metrics,
    storage::JsonFileStorage,
};
use tracing_subscriber::EnvFilter;

use commands::{Commands, Context};

#[derive(Debug, Parser)]
#[command(name = "littrack", version)]
#[command(about = "Literature review tracker with research gap analysis")]
struct Cli {
    /// Configuration file to use instead of the config/ directory
    #[arg(long, global = true, env = "LITTRACK_CONFIG")]
    config: Option<PathBuf>,

    /// Path of the JSON data file (overrides configuration)
    #[arg(long, global = true, env = "LITTRACK_DATA_FILE")]
    data_file: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> ExitCode {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let loaded = match cli.config.as_deref() {
        Some(path) => AppConfig::from_file(path),
        None => AppConfig::load(),
    };
    let mut config = match loaded {
        Ok(config) => config,
        Err(e) => {
            let err = AppError::from(e);
            eprintln!("error: {}", err);
            return exit_code(&err);
        }
    };

    // Apply CLI overrides
    if let Some(data_file) = cli.data_file {
        config.storage.data_file = data_file;
    }
    if cli.json_logs {
        config.observability.json_logging = true;
    }

    if let Err(e) = init_tracing(&config) {
        eprintln!("warning: {:#}", e);
    }
    metrics::register_metrics();

    tracing::debug!(
        service = %config.observability.service_name,
        version = littrack_common::VERSION,
        data_file = %config.storage.data_file.display(),
        "Starting littrack"
    );

    let json_errors = config.observability.json_logging;
    let storage = JsonFileStorage::from_config(&config.storage);
    let ctx = Context::new(config, Box::new(storage));

    match commands::execute(cli.command, &ctx) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            e.log();
            report_error(&e, json_errors);
            exit_code(&e)
        }
    }
}

/// Plain message, or the structured error body when logging as JSON
fn report_error(err: &AppError, json: bool) {
    if json {
        if let Ok(body) = serde_json::to_string(&ErrorResponse::from(err)) {
            eprintln!("{}", body);
            return;
        }
    }
    eprintln!("error: {}", err);
}

fn exit_code(err: &AppError) -> ExitCode {
    ExitCode::from(u8::try_from(err.exit_code()).unwrap_or(1))
}

/// Logs go to stderr so command output stays pipeable; RUST_LOG overrides the configured level
fn init_tracing(config: &AppConfig) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(config.log_filter())?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);

    let result = if config.observability.json_logging {
        builder.json().try_init()
    } else {
        builder.compact().try_init()
    };
    result.map_err(|e| anyhow::anyhow!("failed to initialise logging: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use littrack_common::storage::InMemoryStorage;

    fn run(ctx: &Context, args: &[&str]) -> littrack_common::Result<String> {
        let argv: Vec<&str> = std::iter::once("littrack").chain(args.iter().copied()).collect();
        let cli = Cli::try_parse_from(argv).expect("arguments parse");
        commands::execute(cli.command, ctx)
    }

    fn context() -> Context {
        Context::new(AppConfig::default(), Box::new(InMemoryStorage::new()))
    }

    #[test]
    fn test_add_list_and_delete() {
        let ctx = context();
        let added = run(
            &ctx,
            &[
                "add",
                "--citation",
                "Wu, F. H. (2002). Yellow",
                "--year",
                "2002",
                "--type",
                "Theoretical",
                "--framework",
                "AsianCrit,Collins",
                "--relevance",
                "high",
            ],
        )
        .unwrap();
        let id = added.trim_start_matches("Added entry ").to_string();

        let listing = run(&ctx, &["list", "--filter-framework", "AsianCrit"]).unwrap();
        assert!(listing.contains(&id));
        assert!(listing.ends_with("Showing 1 of 1 entries"));

        run(&ctx, &["edit", id.as_str(), "--relevance", "Low"]).unwrap();
        let store = ctx.load_store().unwrap();
        assert_eq!(store.entries()[0].relevance, "Low");
        assert_eq!(store.entries()[0].framework, vec!["AsianCrit", "Collins"]);

        run(&ctx, &["delete", id.as_str()]).unwrap();
        assert!(ctx.load_store().unwrap().is_empty());
    }

    #[test]
    fn test_add_requires_fields() {
        let ctx = context();
        let err = run(&ctx, &["add", "--citation", "Lee (2009)"]).unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
        assert_eq!(err.exit_code(), 65);
    }

    #[test]
    fn test_delete_unknown_entry() {
        let ctx = context();
        let err = run(&ctx, &["delete", "entry_missing"]).unwrap_err();
        assert_eq!(err.exit_code(), 66);
    }

    #[test]
    fn test_gaps_json_on_sample() {
        let ctx = context();
        run(&ctx, &["init", "--sample"]).unwrap();

        let output = run(&ctx, &["gaps", "--json"]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["overview"]["total_sources"], 3);
        assert_eq!(value["gaps"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_question_round_trip() {
        let ctx = context();
        assert_eq!(run(&ctx, &["question"]).unwrap(), "No research question set");
        assert_eq!(run(&ctx, &["question", "How do domains of power operate?"]).unwrap(), "How do domains of power operate?");
        assert_eq!(run(&ctx, &["question", "--clear"]).unwrap(), "No research question set");
    }

    #[test]
    fn test_export_and_import_files() {
        let dir = tempfile::tempdir().unwrap();
        let backup = dir.path().join("backup.json");
        let backup_arg = backup.to_str().unwrap();

        let source = context();
        run(&source, &["init", "--sample"]).unwrap();
        run(&source, &["question", "Why the middle?"]).unwrap();
        let message = run(&source, &["export", "json", "--output", backup_arg]).unwrap();
        assert!(message.starts_with("Exported 3 entries as JSON"));

        let target = context();
        assert_eq!(run(&target, &["import", backup_arg]).unwrap(), format!("Imported 3 entries from {}", backup_arg));
        let store = target.load_store().unwrap();
        assert_eq!(store.len(), 3);
        assert_eq!(store.research_question(), Some("Why the middle?"));
    }

    #[test]
    fn test_export_csv_high_relevance() {
        let ctx = context();
        run(&ctx, &["init", "--sample"]).unwrap();
        run(&ctx, &["edit", "sample_0", "--relevance", "Medium"]).unwrap();

        let csv = run(&ctx, &["export", "csv", "--scope", "high"]).unwrap();
        assert_eq!(csv.lines().count(), 3);
        assert!(csv.starts_with("Citation,Year,Type"));
    }

    #[test]
    fn test_bibliography_and_report() {
        let ctx = context();
        run(&ctx, &["init", "--sample"]).unwrap();

        let bibliography = run(&ctx, &["bibliography", "--style", "mla"]).unwrap();
        assert!(bibliography.starts_with("Chang, H. (2008)"));

        let err = run(&ctx, &["bibliography", "--style", "ieee"]).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput { .. }));

        let report = run(&ctx, &["report", "--scope", "filtered", "--filter-type", "Empirical"]).unwrap();
        assert!(report.contains("Total Sources: 1"));
    }

    #[test]
    fn test_config_flag_loads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("littrack.toml");
        std::fs::write(&path, "[export]\ncitation_style = \"Harvard\"\n").unwrap();

        let cli = Cli::try_parse_from(["littrack", "--config", path.to_str().unwrap(), "stats"]).unwrap();
        let config = AppConfig::from_file(cli.config.as_deref().unwrap()).unwrap();
        assert_eq!(config.export.citation_style, "Harvard");
        assert_eq!(config.export.csv_delimiter, ',');
    }

    #[test]
    fn test_data_file_flag_is_global() {
        let cli = Cli::try_parse_from(["littrack", "stats", "--data-file", "/tmp/review.json"]).unwrap();
        assert_eq!(cli.data_file, Some(PathBuf::from("/tmp/review.json")));
    }
}
