//! Command handlers
//!
//! Each handler loads the store through the configured backend, does its
//! work and returns the text to print. Mutating commands save before
//! returning.

mod analysis;
mod args;
mod entries;
mod export;

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::Subcommand;
use littrack_common::{
    config::AppConfig,
    errors::Result,
    storage::StoreBackend,
    store::EntryStore,
};

pub use args::{EntryArgs, ExportFormat, FilterArgs, ScopeArg};

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create the data file, optionally seeded with sample entries
    Init {
        /// Add the built-in sample entries
        #[arg(long)]
        sample: bool,
    },

    /// Add an entry
    Add {
        #[command(flatten)]
        entry: EntryArgs,
    },

    /// Change fields of an existing entry
    Edit {
        /// Entry id
        id: String,

        #[command(flatten)]
        entry: EntryArgs,
    },

    /// Delete an entry
    Delete {
        /// Entry id
        id: String,
    },

    /// List entries
    List {
        #[command(flatten)]
        filters: FilterArgs,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show headline counts
    Stats,

    /// Show or set the research question
    Question {
        /// New research question
        text: Option<String>,

        /// Remove the stored research question
        #[arg(long, conflicts_with = "text")]
        clear: bool,
    },

    /// Replace all entries with the contents of a backup or data file
    Import {
        file: PathBuf,
    },

    /// Export entries as CSV or as a JSON backup
    Export {
        #[arg(value_enum)]
        format: ExportFormat,

        #[arg(long, value_enum, default_value_t = ScopeArg::All)]
        scope: ScopeArg,

        #[command(flatten)]
        filters: FilterArgs,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print a bibliography sorted by citation
    Bibliography {
        /// APA, MLA, Chicago or Harvard (defaults to the configured style)
        #[arg(long)]
        style: Option<String>,

        #[arg(long, value_enum, default_value_t = ScopeArg::All)]
        scope: ScopeArg,

        #[command(flatten)]
        filters: FilterArgs,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Research gap analysis over all entries
    Gaps {
        #[arg(long)]
        json: bool,

        /// List gaps by severity instead of rule order
        #[arg(long)]
        ranked: bool,
    },

    /// Citation report with statistics and the sorted source list
    Report {
        #[arg(long, value_enum, default_value_t = ScopeArg::All)]
        scope: ScopeArg,

        #[command(flatten)]
        filters: FilterArgs,

        #[arg(long)]
        json: bool,
    },
}

/// Everything a handler needs besides its arguments
pub struct Context {
    pub config: AppConfig,
    storage: Box<dyn StoreBackend>,
    /// Reference time for timestamps and the temporal analysis
    pub now: DateTime<Utc>,
}

impl Context {
    pub fn new(config: AppConfig, storage: Box<dyn StoreBackend>) -> Self {
        Self {
            config,
            storage,
            now: Utc::now(),
        }
    }

    /// Stored entries, or an empty store seeded with the configured question
    pub fn load_store(&self) -> Result<EntryStore> {
        match self.storage.load()? {
            Some(store) => Ok(store),
            None => {
                tracing::debug!(location = %self.storage.describe(), "Starting with an empty store");
                Ok(EntryStore::new().with_research_question(self.config.research.question.clone()))
            }
        }
    }

    pub fn save_store(&self, store: &EntryStore) -> Result<()> {
        self.storage.save(store)
    }

    pub fn location(&self) -> String {
        self.storage.describe()
    }

    /// Stored question, falling back to the configured one
    pub fn research_question<'a>(&'a self, store: &'a EntryStore) -> Option<&'a str> {
        store
            .research_question()
            .or(self.config.research.question.as_deref())
    }
}

pub fn execute(command: Commands, ctx: &Context) -> Result<String> {
    match command {
        Commands::Init { sample } => entries::init(ctx, sample),
        Commands::Add { entry } => entries::add(ctx, entry),
        Commands::Edit { id, entry } => entries::edit(ctx, &id, entry),
        Commands::Delete { id } => entries::delete(ctx, &id),
        Commands::List { filters, json } => entries::list(ctx, filters.into(), json),
        Commands::Stats => entries::stats(ctx),
        Commands::Question { text, clear } => entries::question(ctx, text, clear),
        Commands::Import { file } => entries::import(ctx, &file),
        Commands::Export {
            format,
            scope,
            filters,
            output,
        } => export::export(ctx, format, scope.into(), &filters.into(), output.as_deref()),
        Commands::Bibliography {
            style,
            scope,
            filters,
            output,
        } => export::bibliography(ctx, style.as_deref(), scope.into(), &filters.into(), output.as_deref()),
        Commands::Gaps { json, ranked } => analysis::gaps(ctx, json, ranked),
        Commands::Report {
            scope,
            filters,
            json,
        } => analysis::report(ctx, scope.into(), &filters.into(), json),
    }
}
