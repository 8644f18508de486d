// src/cli.rs

use ancestor_tree::name::NameFormat;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the JSON record file
    #[arg(short, long)]
    pub db: PathBuf,

    /// Handle or gramps id of the person whose ancestors are shown
    #[arg(short, long)]
    pub person: Option<String>,

    /// Number of generations to show, including the person
    #[arg(long)]
    pub depth: Option<usize>,

    /// TOML settings file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Sibling order
    #[arg(long, value_enum, default_value_t = SortMode::Insertion)]
    pub sort: SortMode,

    /// Overrides the configured name format
    #[arg(long, value_enum)]
    pub name_format: Option<NameFormat>,

    /// Show birth and death details under each row
    #[arg(long)]
    pub tooltips: bool,

    /// Hide progress output
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Debug, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Indented text with a birth column
    Text,
    /// Nested JSON rows
    Json,
}

#[derive(clap::ValueEnum, Clone, Debug, Copy, PartialEq, Eq)]
pub enum SortMode {
    /// Father before mother
    Insertion,
    /// By birth date, undated rows placed by the configured policy
    Birth,
}
