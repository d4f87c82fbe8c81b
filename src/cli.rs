use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "factsheet",
    version,
    about = "Mutual-fund factsheet holdings extraction"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Inventory(InventoryArgs),
    Extract(ExtractArgs),
    Normalize(NormalizeArgs),
}

#[derive(Args, Debug, Clone)]
pub struct InventoryArgs {
    #[arg(long, default_value = "factsheets")]
    pub input_dir: PathBuf,

    #[arg(long)]
    pub manifest_path: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ExtractArgs {
    #[arg(long, default_value = "factsheets")]
    pub input_dir: PathBuf,

    /// Explicit input files; when given, `--input-dir` is not scanned.
    #[arg(long = "input")]
    pub inputs: Vec<PathBuf>,

    #[arg(long)]
    pub output: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = DecoderKind::Auto)]
    pub decoder: DecoderKind,

    #[arg(long)]
    pub amc: Option<String>,

    #[arg(long)]
    pub fund_name: Option<String>,

    #[arg(long)]
    pub date: Option<NaiveDate>,

    #[arg(long)]
    pub lookups_path: Option<PathBuf>,

    #[arg(long)]
    pub isin_csv: Option<PathBuf>,

    #[arg(long, default_value_t = 4)]
    pub threads: usize,

    #[arg(long)]
    pub max_pages_per_doc: Option<usize>,

    #[arg(long, default_value_t = false)]
    pub stitch_headerless: bool,

    #[arg(long, default_value_t = false)]
    pub derive_market_value: bool,

    #[arg(long, default_value_t = false)]
    pub no_isin_lookup: bool,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum DecoderKind {
    Auto,
    Json,
    Pdftotext,
}

impl DecoderKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Json => "json",
            Self::Pdftotext => "pdftotext",
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct NormalizeArgs {
    #[arg(long = "sector")]
    pub sectors: Vec<String>,

    #[arg(long = "amc")]
    pub amcs: Vec<String>,

    #[arg(long)]
    pub lookups_path: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}
