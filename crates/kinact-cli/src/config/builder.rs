use super::defaults::DefaultsConfig;
use super::file::{FileConfig, FileInteractionsConfig, FileScoringConfig};
use super::models::{InteractionConfig, NetworkinConfig, ScoreConfig};
use crate::cli::{
    InteractionArgs, MethodArg, NormalizationArg, ScoreArgs, StatisticArg, TargetsArgs,
};
use crate::data::DataManager;
use crate::error::{CliError, Result};
use crate::utils::parser;
use clap::ValueEnum;
use kinact::core::io::networkin::NormalizationAxis;
use kinact::core::io::ptms::{InteractionSources, PtmFilter};
use kinact::engine::config::{self as core_config, Method, Statistic};
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub fn build_score_config(args: &ScoreArgs, data_manager: &DataManager) -> Result<ScoreConfig> {
    let defaults = DefaultsConfig::default();
    let mut file_config = load_file_config(&args.interactions)?;

    let scoring_file = file_config.scoring.take().unwrap_or_default();
    let ksea = merge_scoring(args, scoring_file, &defaults)?;

    let interactions = merge_interactions(
        &args.interactions,
        file_config.interactions.take().unwrap_or_default(),
        &defaults,
        data_manager,
    )?;

    let (fold_changes_path, example_dataset) = match &args.input {
        Some(path) => (existing_path(path)?, false),
        None => (
            resolve_path_or_logical_name(None, None, &defaults.dataset, "dataset", data_manager)?,
            true,
        ),
    };
    if example_dataset && args.p_values.is_some() {
        return Err(CliError::Argument(
            "--p-values requires --input; the example dataset carries its own p-values."
                .to_string(),
        ));
    }
    let p_values_path = args.p_values.as_deref().map(existing_path).transpose()?;

    Ok(ScoreConfig {
        fold_changes_path,
        p_values_path,
        example_dataset,
        relative_to: args.relative_to.clone(),
        output_path: args.output.clone(),
        fold_changes_out: args.write_fold_changes.clone(),
        ksea,
        interactions,
    })
}

pub fn build_targets_config(
    args: &TargetsArgs,
    data_manager: &DataManager,
) -> Result<InteractionConfig> {
    let defaults = DefaultsConfig::default();
    let mut file_config = load_file_config(&args.interactions)?;
    merge_interactions(
        &args.interactions,
        file_config.interactions.take().unwrap_or_default(),
        &defaults,
        data_manager,
    )
}

pub fn resolve_sequences(cli_arg: Option<&str>, data_manager: &DataManager) -> Result<PathBuf> {
    let defaults = DefaultsConfig::default();
    resolve_path_or_logical_name(cli_arg, None, &defaults.sequences, "sequences", data_manager)
}

pub fn resolve_example_dataset(data_manager: &DataManager) -> Result<PathBuf> {
    let defaults = DefaultsConfig::default();
    resolve_path_or_logical_name(None, None, &defaults.dataset, "dataset", data_manager)
}

fn load_file_config(args: &InteractionArgs) -> Result<FileConfig> {
    let file_config = match &args.config {
        Some(config_path) => FileConfig::from_file(config_path)?,
        None => FileConfig::default(),
    };
    apply_set_values(file_config, &args.set_values)
}

fn merge_scoring(
    args: &ScoreArgs,
    file: FileScoringConfig,
    defaults: &DefaultsConfig,
) -> Result<core_config::KseaConfig> {
    let method = args.method.or(file.method).unwrap_or(defaults.method);
    let statistic: Statistic = args
        .statistic
        .or(file.statistic)
        .unwrap_or(defaults.statistic)
        .into();
    let cut_off = args.cut_off.or(file.cut_off).unwrap_or(defaults.cut_off);

    let method = match method {
        MethodArg::Mean => Method::Mean { statistic },
        MethodArg::MeanAlt => Method::MeanAlt { statistic, cut_off },
        MethodArg::Delta => Method::Delta { cut_off },
        MethodArg::WeightedMean => Method::WeightedMean,
    };

    core_config::KseaConfigBuilder::new()
        .method(method)
        .minimum_set_size(
            args.minimum_set_size
                .or(file.minimum_set_size)
                .unwrap_or(defaults.minimum_set_size),
        )
        .population_mean(args.population_mean.or(file.population_mean))
        .population_std(args.population_std.or(file.population_std))
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

fn merge_interactions(
    args: &InteractionArgs,
    file: FileInteractionsConfig,
    defaults: &DefaultsConfig,
    data_manager: &DataManager,
) -> Result<InteractionConfig> {
    let source_names = if !args.sources.is_empty() {
        args.sources.clone()
    } else {
        file.sources.unwrap_or_else(|| defaults.sources.clone())
    };
    let sources = InteractionSources::from_names(&source_names)
        .map_err(|e| CliError::Config(e.to_string()))?;
    let filter = PtmFilter {
        sources,
        organism: args.organism.or(file.organism),
    };

    let networkin = match args.networkin.as_ref().or(file.networkin.as_ref()) {
        Some(path) => Some(NetworkinConfig {
            predictions_path: existing_path(path)?,
            score_cut_off: args
                .networkin_cut_off
                .or(file.networkin_cut_off)
                .unwrap_or(defaults.networkin_cut_off),
            normalization: args
                .networkin_normalization
                .or(file.networkin_normalization)
                .map(NormalizationAxis::from)
                .unwrap_or_default(),
            add_curated: args
                .add_curated
                .or(file.add_curated)
                .unwrap_or(defaults.add_curated),
        }),
        None => None,
    };

    let needs_curated = networkin.as_ref().is_none_or(|n| n.add_curated);
    let ptms_path = if needs_curated {
        Some(resolve_path_or_logical_name(
            args.ptms.as_deref(),
            file.ptms.as_deref(),
            &defaults.ptms,
            "ptms",
            data_manager,
        )?)
    } else {
        None
    };

    let id_mapping_path = match args.id_mapping.as_deref().or(file.id_mapping.as_deref()) {
        Some(name_or_path) => Some(resolve_path_or_logical_name(
            Some(name_or_path),
            None,
            name_or_path,
            "id-mapping",
            data_manager,
        )?),
        None => None,
    };

    Ok(InteractionConfig {
        ptms_path,
        filter,
        id_mapping_path,
        networkin,
    })
}

fn existing_path(path: &Path) -> Result<PathBuf> {
    if !path.exists() {
        return Err(CliError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Provided path does not exist: {}", path.display()),
        )));
    }
    Ok(path.to_path_buf())
}

fn resolve_path_or_logical_name(
    cli_arg: Option<&str>,
    file_arg: Option<&str>,
    default_arg: &str,
    kind: &str,
    data_manager: &DataManager,
) -> Result<PathBuf> {
    let name_or_path = cli_arg.or(file_arg).unwrap_or(default_arg);

    let path = Path::new(name_or_path);
    if path.is_absolute() || name_or_path.contains(['/', '\\', '.']) {
        return existing_path(path);
    }

    let parsed_name = parser::parse_logical_name(name_or_path, kind)
        .map_err(|e| CliError::Argument(e.to_string()))?;

    let resolved = data_manager.resolve_logical_name(&parsed_name)?;
    if !resolved.exists() {
        return Err(CliError::Data(format!(
            "Resolved data file does not exist: {:?}.\nHint: Place the file there or run 'kinact data set-path' to point at an existing data directory.",
            resolved
        )));
    }
    Ok(resolved)
}

fn parse_value<T: FromStr>(key: &str, value_str: &str, what: &str) -> Result<T> {
    value_str
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid {} value for {}: {}", what, key, value_str)))
}

fn parse_enum<T: ValueEnum>(key: &str, value_str: &str) -> Result<T> {
    T::from_str(value_str, true)
        .map_err(|_| CliError::Config(format!("Invalid value for {}: {}", key, value_str)))
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    if set_values.is_empty() {
        return Ok(config);
    }
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };

        match key {
            "scoring.method" => {
                config.scoring.get_or_insert_with(Default::default).method =
                    Some(parse_enum::<MethodArg>(key, value_str)?);
            }
            "scoring.statistic" => {
                config.scoring.get_or_insert_with(Default::default).statistic =
                    Some(parse_enum::<StatisticArg>(key, value_str)?);
            }
            "scoring.cut-off" => {
                config.scoring.get_or_insert_with(Default::default).cut_off =
                    Some(parse_value(key, value_str, "float")?);
            }
            "scoring.minimum-set-size" => {
                config
                    .scoring
                    .get_or_insert_with(Default::default)
                    .minimum_set_size = Some(parse_value(key, value_str, "integer")?);
            }
            "scoring.population-mean" => {
                config
                    .scoring
                    .get_or_insert_with(Default::default)
                    .population_mean = Some(parse_value(key, value_str, "float")?);
            }
            "scoring.population-std" => {
                config
                    .scoring
                    .get_or_insert_with(Default::default)
                    .population_std = Some(parse_value(key, value_str, "float")?);
            }
            "interactions.ptms" => {
                config.interactions.get_or_insert_with(Default::default).ptms =
                    Some(value_str.to_string());
            }
            "interactions.sources" => {
                config.interactions.get_or_insert_with(Default::default).sources = Some(
                    value_str
                        .split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(String::from)
                        .collect(),
                );
            }
            "interactions.organism" => {
                config
                    .interactions
                    .get_or_insert_with(Default::default)
                    .organism = Some(parse_value(key, value_str, "integer")?);
            }
            "interactions.id-mapping" => {
                config
                    .interactions
                    .get_or_insert_with(Default::default)
                    .id_mapping = Some(value_str.to_string());
            }
            "interactions.networkin" => {
                config
                    .interactions
                    .get_or_insert_with(Default::default)
                    .networkin = Some(PathBuf::from(value_str));
            }
            "interactions.networkin-cut-off" => {
                config
                    .interactions
                    .get_or_insert_with(Default::default)
                    .networkin_cut_off = Some(parse_value(key, value_str, "float")?);
            }
            "interactions.networkin-normalization" => {
                config
                    .interactions
                    .get_or_insert_with(Default::default)
                    .networkin_normalization =
                    Some(parse_enum::<NormalizationArg>(key, value_str)?);
            }
            "interactions.add-curated" => {
                config
                    .interactions
                    .get_or_insert_with(Default::default)
                    .add_curated = Some(parse_value(key, value_str, "boolean")?);
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use once_cell::sync::Lazy;
    use std::fs;
    use tempfile::{TempDir, tempdir};

    static TEST_DIR: Lazy<TempDir> = Lazy::new(|| tempdir().expect("Failed to create temp dir"));

    fn create_test_data_dir() -> PathBuf {
        let data_path = TEST_DIR.path().join("mock_data");
        let nested_data_path = data_path.join("data");
        fs::create_dir_all(&nested_data_path).unwrap();
        for name in [
            "omnipath_ptms.txt",
            "id_conversion.txt",
            "sequences.tab",
            "deGraaf_2014_jurkat.csv",
        ] {
            fs::write(nested_data_path.join(name), "").unwrap();
        }
        data_path
    }

    fn write_file(name: &str, content: &str) -> PathBuf {
        let file_path = TEST_DIR.path().join(name);
        fs::write(&file_path, content).unwrap();
        file_path
    }

    fn parse_score_args(extra: &[&str]) -> ScoreArgs {
        let mut args = vec!["kinact", "score", "-o", "out.csv"];
        args.extend_from_slice(extra);
        match Cli::parse_from(args).command {
            Commands::Score(args) => args,
            _ => panic!("Expected 'score' subcommand"),
        }
    }

    #[test]
    fn defaults_score_the_example_dataset_with_the_mean() {
        let manager = DataManager::with_custom_path(create_test_data_dir());
        let args = parse_score_args(&[]);

        let config = build_score_config(&args, &manager).unwrap();
        assert!(config.example_dataset);
        assert_eq!(
            config.fold_changes_path,
            manager.get_data_path().join("data/deGraaf_2014_jurkat.csv")
        );
        assert_eq!(
            config.ksea.method,
            Method::Mean {
                statistic: Statistic::Mean
            }
        );
        assert_eq!(config.ksea.minimum_set_size, 1);
        assert_eq!(config.ksea.population.mean, None);
        assert_eq!(
            config.interactions.ptms_path,
            Some(manager.get_data_path().join("data/omnipath_ptms.txt"))
        );
        assert_eq!(config.interactions.filter, PtmFilter::default());
        assert!(config.interactions.id_mapping_path.is_none());
    }

    #[test]
    fn file_values_are_used_and_cli_args_override_them() {
        let manager = DataManager::with_custom_path(create_test_data_dir());
        let config_path = write_file(
            "override.toml",
            r#"
            [scoring]
            method = "mean-alt"
            statistic = "median"
            cut-off = 2.0
            minimum-set-size = 5 # Will be overridden

            [interactions]
            sources = ["HPRD"]
            id-mapping = "uniprot"
            "#,
        );
        let args = parse_score_args(&[
            "-c",
            config_path.to_str().unwrap(),
            "--minimum-set-size",
            "3",
            "--population-std",
            "0.5",
        ]);

        let config = build_score_config(&args, &manager).unwrap();
        assert_eq!(
            config.ksea.method,
            Method::MeanAlt {
                statistic: Statistic::Median,
                cut_off: 2.0
            }
        );
        assert_eq!(config.ksea.minimum_set_size, 3);
        assert_eq!(config.ksea.population.std, Some(0.5));
        assert_eq!(
            config.interactions.filter.sources,
            InteractionSources::Only(vec!["HPRD".to_string()])
        );
        assert_eq!(
            config.interactions.id_mapping_path,
            Some(manager.get_data_path().join("data/id_conversion.txt"))
        );
    }

    #[test]
    fn set_values_override_file_and_defaults() {
        let manager = DataManager::with_custom_path(create_test_data_dir());
        let config_path = write_file(
            "set.toml",
            r#"
            [scoring]
            method = "mean" # Will be overridden by --set
            "#,
        );
        let args = parse_score_args(&[
            "-c",
            config_path.to_str().unwrap(),
            "-S",
            "scoring.method=delta",
            "-S",
            "scoring.cut-off=3",
            "-S",
            "interactions.sources=all",
        ]);

        let config = build_score_config(&args, &manager).unwrap();
        assert_eq!(config.ksea.method, Method::Delta { cut_off: 3.0 });
        assert_eq!(config.interactions.filter.sources, InteractionSources::All);
    }

    #[test]
    fn invalid_set_values_are_rejected() {
        let manager = DataManager::with_custom_path(create_test_data_dir());

        for bad in ["scoring.cut-off", "scoring.cut-off=abc", "optimization.num-solutions=5"] {
            let args = parse_score_args(&["-S", bad]);
            assert!(
                matches!(build_score_config(&args, &manager), Err(CliError::Config(_))),
                "'{}' should be rejected",
                bad
            );
        }
    }

    #[test]
    fn unknown_source_is_a_config_error() {
        let manager = DataManager::with_custom_path(create_test_data_dir());
        let args = parse_score_args(&["--source", "NotADatabase"]);

        let result = build_score_config(&args, &manager);
        assert!(matches!(result, Err(CliError::Config(msg)) if msg.contains("NotADatabase")));
    }

    #[test]
    fn networkin_only_networks_skip_the_ptm_table() {
        let data_path = TEST_DIR.path().join("empty_data");
        fs::create_dir_all(&data_path).unwrap();
        let manager = DataManager::with_custom_path(data_path);
        let predictions = write_file("networkin_results.tsv", "");

        let args = parse_score_args(&[
            "-i",
            predictions.to_str().unwrap(),
            "--method",
            "weighted-mean",
            "--networkin",
            predictions.to_str().unwrap(),
            "--networkin-cut-off",
            "2.5",
            "--add-curated",
            "false",
        ]);

        let config = build_score_config(&args, &manager).unwrap();
        assert!(config.interactions.ptms_path.is_none());
        let networkin = config.interactions.networkin.unwrap();
        assert_eq!(networkin.score_cut_off, 2.5);
        assert_eq!(networkin.normalization, NormalizationAxis::Site);
        assert!(!networkin.add_curated);
    }

    #[test]
    fn networkin_adds_curated_edges_unless_disabled() {
        let manager = DataManager::with_custom_path(create_test_data_dir());
        let predictions = write_file("networkin_with_curated.tsv", "");

        let args = parse_score_args(&[
            "--networkin",
            predictions.to_str().unwrap(),
            "-S",
            "interactions.networkin-normalization=kinase",
        ]);

        let config = build_score_config(&args, &manager).unwrap();
        let networkin = config.interactions.networkin.unwrap();
        assert!(networkin.add_curated);
        assert_eq!(networkin.normalization, NormalizationAxis::Kinase);
        assert_eq!(
            config.interactions.ptms_path,
            Some(manager.get_data_path().join("data/omnipath_ptms.txt"))
        );
    }

    #[test]
    fn missing_data_file_points_at_the_data_directory() {
        let data_path = TEST_DIR.path().join("no_data");
        fs::create_dir_all(&data_path).unwrap();
        let manager = DataManager::with_custom_path(data_path);
        let args = parse_score_args(&[]);

        let result = build_score_config(&args, &manager);
        assert!(matches!(result, Err(CliError::Data(msg)) if msg.contains("set-path")));
    }
}
