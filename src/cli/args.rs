use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::modes::Profile;
use crate::report::ExportFormat;

#[derive(Parser, Debug)]
#[command(name = "reperto")]
#[command(version)]
#[command(about = "Forensic and rock art image reports from a multimodal model", long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze images once and print the report
    Analyze {
        /// Image files, all views of the same subject
        #[arg(required = true)]
        images: Vec<PathBuf>,

        /// Report family (defaults to the configured profile)
        #[arg(short, long, value_enum)]
        profile: Option<Profile>,

        /// Analysis mode key, see `reperto modes`
        #[arg(short, long)]
        mode: String,

        /// Field notes to integrate into the analysis
        #[arg(short, long)]
        notes: Option<String>,

        /// Also write the report in these formats
        #[arg(short, long, value_enum)]
        export: Vec<ExportFormat>,

        /// Directory for exported files (defaults to the configured one)
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Output format on stdout
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        output_format: OutputFormat,
    },
    /// Interactive session (default)
    Shell {
        #[arg(short, long, value_enum)]
        profile: Option<Profile>,
    },
    /// List analysis modes
    Modes {
        #[arg(short, long, value_enum)]
        profile: Option<Profile>,
    },
    /// Initialize configuration
    Init,
    /// Show configuration and credential status
    Status,
    /// Show version information
    Version,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Rendered report for the terminal
    Text,
    /// JSON structured output
    Json,
    /// Raw report text with a metadata footer
    Markdown,
}
