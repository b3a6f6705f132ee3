use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::dictionary::DEFAULT_LANG;
use crate::variants::Direction;

const DEFAULT_STORE: &str = "xhosa-en.json";

#[derive(Debug, Parser)]
#[command(
    name = "gramble",
    version,
    about = "English–Xhosa dictionary builder and sentence variant generator"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Parse a scanned dictionary text into an entry store
    Build(BuildParams),
    /// Expand sentences into lexical variants, one CSV row per sentence
    Variants(VariantsParams),
    /// Expand a parallel corpus CSV into one wide row of variants per id
    Corpus(CorpusParams),
    /// Exact-match rate of selected hypotheses against references
    MatchRate(MatchRateParams),
}

#[derive(Debug, Args)]
pub struct BuildParams {
    /// Raw dictionary text, one physical line per line
    #[arg(long)]
    pub input: PathBuf,
    /// Entry store JSON (default: xhosa-en.json next to the input)
    #[arg(long)]
    pub output: Option<PathBuf>,
    /// Text encoding label of the input; a BOM takes precedence
    #[arg(long, env = "GRAMBLE_ENCODING", default_value = "utf-8")]
    pub encoding: String,
    /// Translation key written into each sense
    #[arg(long, default_value = DEFAULT_LANG)]
    pub lang: String,
}

impl BuildParams {
    pub fn output_path(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| {
            self.input
                .parent()
                .unwrap_or_else(|| std::path::Path::new(""))
                .join(DEFAULT_STORE)
        })
    }
}

/// Dictionary lookup options shared by the expanding subcommands.
#[derive(Debug, Args)]
pub struct LookupParams {
    /// Entry store produced by `build`
    #[arg(long, env = "GRAMBLE_DICT", default_value = DEFAULT_STORE)]
    pub dict: PathBuf,
    #[arg(long, value_enum, default_value_t = Direction::EnToXh)]
    pub direction: Direction,
    /// Translation key the lookup reads
    #[arg(long, default_value = DEFAULT_LANG)]
    pub lang: String,
}

#[derive(Debug, Args)]
pub struct VariantsParams {
    #[command(flatten)]
    pub lookup: LookupParams,
    /// A single sentence
    #[arg(long, required_unless_present = "file", conflicts_with = "file")]
    pub input: Option<String>,
    /// One sentence per line
    #[arg(long)]
    pub file: Option<PathBuf>,
    #[arg(long, default_value = "variants.csv")]
    pub output: PathBuf,
    /// Maximum variants per sentence
    #[arg(long, default_value_t = 10_000)]
    pub max: usize,
}

#[derive(Debug, Args)]
pub struct CorpusParams {
    #[command(flatten)]
    pub lookup: LookupParams,
    /// Corpus CSV with a header row
    #[arg(long)]
    pub in_csv: PathBuf,
    #[arg(long, default_value = "sentence_eng")]
    pub source_col: String,
    #[arg(long, default_value = "id")]
    pub id_col: String,
    #[arg(long)]
    pub out_csv: PathBuf,
    /// Maximum variants per row
    #[arg(long, default_value_t = 64)]
    pub max: usize,
}

#[derive(Debug, Args)]
pub struct MatchRateParams {
    /// Selected hypotheses as `id<TAB>hypothesis` rows
    #[arg(long)]
    pub hyp: PathBuf,
    /// References, one per line, in the same order
    #[arg(long)]
    pub refs: PathBuf,
}
