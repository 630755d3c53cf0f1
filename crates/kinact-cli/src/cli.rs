use clap::{Args, Parser, Subcommand, ValueEnum};
use kinact::core::io::networkin::NormalizationAxis;
use kinact::engine::config::Statistic;
use serde::Deserialize;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Jakob Wirbel, Emanuel Goncalves",
    version,
    about = "kinact CLI - Kinase activity scoring from phosphoproteomics data using KSEA (Kinase Substrate Enrichment Analysis).",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel computation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score kinase activities for every condition of a fold-change table.
    Score(ScoreArgs),
    /// Export the kinase-substrate network used for scoring.
    Targets(TargetsArgs),
    /// Prepare input files for NetworKIN predictions.
    Networkin(NetworkinArgs),
    /// Manage the local data directory (PTM tables, identifier mappings, sequences).
    Data(DataArgs),
}

#[derive(ValueEnum, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum MethodArg {
    Mean,
    MeanAlt,
    Delta,
    WeightedMean,
}

#[derive(ValueEnum, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum StatisticArg {
    Mean,
    Median,
}

impl From<StatisticArg> for Statistic {
    fn from(arg: StatisticArg) -> Self {
        match arg {
            StatisticArg::Mean => Statistic::Mean,
            StatisticArg::Median => Statistic::Median,
        }
    }
}

#[derive(ValueEnum, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum NormalizationArg {
    Site,
    Kinase,
}

impl From<NormalizationArg> for NormalizationAxis {
    fn from(arg: NormalizationArg) -> Self {
        match arg {
            NormalizationArg::Site => NormalizationAxis::Site,
            NormalizationArg::Kinase => NormalizationAxis::Kinase,
        }
    }
}

/// Options shared by every command that builds a kinase-substrate network.
#[derive(Args, Debug, Clone, Default)]
pub struct InteractionArgs {
    /// Path to the main configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the OmniPath PTM table.
    /// Can be a path or a logical name (e.g., 'omnipath').
    #[arg(long, value_name = "NAME_OR_PATH")]
    pub ptms: Option<String>,

    /// Restrict interactions to these source databases; 'all' disables filtering.
    /// Can be used multiple times.
    #[arg(long = "source", value_name = "DATABASE")]
    pub sources: Vec<String>,

    /// Keep only interactions of this organism (NCBI taxonomy id, e.g. 9606).
    #[arg(long, value_name = "TAXON")]
    pub organism: Option<u32>,

    /// Rename kinases to gene names using this identifier mapping table.
    /// Can be a path or a logical name (e.g., 'uniprot').
    #[arg(long, value_name = "NAME_OR_PATH")]
    pub id_mapping: Option<String>,

    /// Use NetworKIN predictions from this result file instead of curated interactions.
    #[arg(long, value_name = "PATH")]
    pub networkin: Option<PathBuf>,

    /// Minimum NetworKIN score for a prediction to be kept.
    #[arg(long, value_name = "FLOAT")]
    pub networkin_cut_off: Option<f64>,

    /// Scale NetworKIN scores by the best prediction per site or per kinase [default: site].
    #[arg(long, value_enum, value_name = "AXIS")]
    pub networkin_normalization: Option<NormalizationArg>,

    /// Add curated interactions (weight ±1) on the sites NetworKIN predicts for,
    /// keeping the scaled prediction scores elsewhere [default: true].
    #[arg(long, value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    pub add_curated: Option<bool>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S scoring.minimum-set-size=5
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `score` subcommand.
#[derive(Args, Debug)]
pub struct ScoreArgs {
    // --- Core Arguments ---
    /// Fold-change table (CSV or TSV, first column site ids, one column per condition).
    /// When omitted, the bundled example dataset is scored.
    #[arg(short, long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Matching table of −log10 p-values, required by the 'mean-alt' and 'delta' methods.
    #[arg(short, long, value_name = "PATH")]
    pub p_values: Option<PathBuf>,

    /// Subtract this condition from every other one and drop it before scoring.
    #[arg(long, value_name = "CONDITION")]
    pub relative_to: Option<String>,

    /// Path for the output CSV file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Also write the fold-change table that was scored (after --relative-to) to this path.
    #[arg(long, value_name = "PATH")]
    pub write_fold_changes: Option<PathBuf>,

    // --- Scoring Overrides ---
    /// Override the scoring method.
    #[arg(short, long, value_enum)]
    pub method: Option<MethodArg>,

    /// Override the substrate-set statistic of the 'mean' and 'mean-alt' methods.
    #[arg(long, value_enum)]
    pub statistic: Option<StatisticArg>,

    /// Override the −log10 p-value above which a site counts as regulated.
    #[arg(long, value_name = "FLOAT")]
    pub cut_off: Option<f64>,

    /// Override the minimum number of measured substrates a kinase needs to be scored.
    #[arg(long, value_name = "INT")]
    pub minimum_set_size: Option<usize>,

    /// Fix the population mean instead of deriving it from each condition.
    #[arg(long, value_name = "FLOAT", allow_hyphen_values = true)]
    pub population_mean: Option<f64>,

    /// Fix the population standard deviation instead of deriving it from each condition.
    #[arg(long, value_name = "FLOAT")]
    pub population_std: Option<f64>,

    #[command(flatten)]
    pub interactions: InteractionArgs,
}

/// Arguments for the `targets` subcommand.
#[derive(Args, Debug)]
pub struct TargetsArgs {
    /// Path for the output CSV file (kinase, site, weight).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    #[command(flatten)]
    pub interactions: InteractionArgs,
}

/// Arguments for the `networkin` subcommand.
#[derive(Args, Debug)]
pub struct NetworkinArgs {
    #[command(subcommand)]
    pub command: NetworkinCommands,
}

#[derive(Subcommand, Debug)]
pub enum NetworkinCommands {
    /// Write the site file and FASTA file NetworKIN needs for the sites of a table.
    Prepare {
        /// Table whose site ids (first column) are submitted.
        /// When omitted, the sites of the bundled example dataset are used.
        #[arg(short, long, value_name = "PATH")]
        input: Option<PathBuf>,

        /// Sequence table (accession in the first column, sequence in the fourth).
        /// Can be a path or a logical name (e.g., 'uniprot').
        #[arg(short, long, value_name = "NAME_OR_PATH")]
        sequences: Option<String>,

        /// Directory the two files are written into.
        #[arg(short, long, required = true, value_name = "DIR")]
        output_dir: PathBuf,
    },
}

/// Arguments for the `data` subcommand.
#[derive(Args, Debug)]
pub struct DataArgs {
    #[command(subcommand)]
    pub command: DataCommands,
}

/// Available commands for data management.
#[derive(Subcommand, Debug)]
pub enum DataCommands {
    /// Show the absolute path to the local data directory and which resources it holds.
    Path,
    /// Set a custom absolute path for the local data directory.
    SetPath {
        /// The new path to use for storing data files.
        #[arg(required = true)]
        path: PathBuf,
    },
    /// Reset the data path to its default, OS-specific location.
    ResetPath,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_command_parses_overrides_and_shared_options() {
        let cli = Cli::parse_from([
            "kinact",
            "-vv",
            "score",
            "-i",
            "fc.csv",
            "-o",
            "out.csv",
            "--method",
            "mean-alt",
            "--statistic",
            "median",
            "--population-mean",
            "-0.5",
            "--source",
            "Signor",
            "--source",
            "HPRD",
            "-S",
            "scoring.cut-off=2",
        ]);

        assert_eq!(cli.verbose, 2);
        let Commands::Score(args) = cli.command else {
            panic!("Expected 'score' subcommand");
        };
        assert_eq!(args.input, Some(PathBuf::from("fc.csv")));
        assert_eq!(args.method, Some(MethodArg::MeanAlt));
        assert_eq!(args.statistic, Some(StatisticArg::Median));
        assert_eq!(args.population_mean, Some(-0.5));
        assert_eq!(args.interactions.sources, vec!["Signor", "HPRD"]);
        assert_eq!(args.interactions.set_values, vec!["scoring.cut-off=2"]);
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from(["kinact", "-q", "-v", "data", "path"]);
        assert!(result.is_err());
    }

    #[test]
    fn networkin_prepare_requires_output_dir() {
        assert!(Cli::try_parse_from(["kinact", "networkin", "prepare"]).is_err());

        let cli = Cli::parse_from(["kinact", "networkin", "prepare", "-o", "nk"]);
        let Commands::Networkin(NetworkinArgs {
            command: NetworkinCommands::Prepare { output_dir, .. },
        }) = cli.command
        else {
            panic!("Expected 'networkin prepare' subcommand");
        };
        assert_eq!(output_dir, PathBuf::from("nk"));
    }

    #[test]
    fn networkin_options_parse_axis_and_optional_curated_flag() {
        let cli = Cli::parse_from([
            "kinact",
            "targets",
            "-o",
            "net.csv",
            "--networkin",
            "nk.tsv",
            "--networkin-normalization",
            "kinase",
            "--add-curated",
            "false",
        ]);
        let Commands::Targets(args) = cli.command else {
            panic!("Expected 'targets' subcommand");
        };
        assert_eq!(
            args.interactions.networkin_normalization,
            Some(NormalizationArg::Kinase)
        );
        assert_eq!(args.interactions.add_curated, Some(false));

        let cli = Cli::parse_from(["kinact", "targets", "-o", "net.csv", "--add-curated"]);
        let Commands::Targets(args) = cli.command else {
            panic!("Expected 'targets' subcommand");
        };
        assert_eq!(args.interactions.add_curated, Some(true));
    }
}
