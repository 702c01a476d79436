use clap::{Parser, Subcommand, ValueEnum};

/// pointsmith: PostGIS point fields for JHipster-generated entities
#[derive(Parser)]
#[command(name = "pointsmith")]
#[command(version)]
#[command(about = "Adds PostGIS point fields to JHipster-generated entities")]
#[command(
    long_about = "pointsmith patches the files a JHipster project already generated: it \
splices point field declarations, accessors and geometry columns into the marker comments \
the scaffolder leaves behind, and records its field definitions in the entity's .jhipster \
descriptor."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Set log level for diagnostics
    #[arg(long, default_value = "warn", global = true, value_enum)]
    pub log_level: LogLevel,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize point module support files in a scaffolded project
    Init {
        /// Project root (the directory containing .yo-rc.json)
        #[arg(short, long, default_value = ".")]
        project_dir: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Add or remove point fields on a generated entity
    Entity {
        /// Project root (the directory containing .yo-rc.json)
        #[arg(short, long, default_value = ".")]
        project_dir: String,

        /// Entity to update (skips the selection prompt)
        #[arg(short, long)]
        name: Option<String>,

        /// Regenerate from the recorded field list without prompting
        #[arg(short, long)]
        regenerate: bool,
    },
}

impl Commands {
    /// Get the command name as a string.
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Init { .. } => "init",
            Commands::Entity { .. } => "entity",
        }
    }
}

#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}
