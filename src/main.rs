use env_logger::Builder;
use log::{info, warn, LevelFilter};
use rand::rngs::StdRng;
use rand::SeedableRng;

use range_free_localization::core::{DEFAULT_MOBILITY_FRAMES, REFERENCE_RANGE_MULTIPLIERS};
use range_free_localization::processing::simulation::sample_and_simulate;
use range_free_localization::{
    track_target, ConfigError, ConfigurationManager, CsvFormatter, JsonFormatter, MobilityPath,
    OutputFormat, SimulationConfig, SimulationReport, TextFormatter, TrialAggregator,
    UniformSampler,
};

/// Command-line options; unset values fall back to the config file or defaults
#[derive(Debug, Default, PartialEq)]
struct CliOptions {
    config_path: Option<String>,
    area_width: Option<f64>,
    area_height: Option<f64>,
    anchor_count: Option<usize>,
    unknown_count: Option<usize>,
    comm_range: Option<f64>,
    noise_stddev: Option<f64>,
    trial_count: Option<usize>,
    seed: Option<u64>,
    format: Option<OutputFormat>,
    verbose: bool,
    help: bool,
}

fn usage(program: &str) -> String {
    format!(
        "Usage: {} [--config <file.json>] [--width <m>] [--height <m>] [--anchors <n>] \
         [--unknowns <n>] [--range <m>] [--noise <m>] [--trials <n>] [--seed <n>] \
         [--format text|json|csv] [--verbose]",
        program
    )
}

fn parse_value<T: std::str::FromStr>(flag: &str, raw: &str) -> Result<T, ConfigError> {
    raw.parse::<T>().map_err(|_| ConfigError::InvalidParameter {
        parameter: flag.trim_start_matches("--").to_string(),
        value: raw.to_string(),
        reason: "could not parse value".to_string(),
    })
}

fn parse_args(args: &[String]) -> Result<CliOptions, ConfigError> {
    let mut options = CliOptions::default();
    let mut iter = args.iter().skip(1);

    while let Some(flag) = iter.next() {
        match flag.as_str() {
            "--verbose" | "-v" => {
                options.verbose = true;
                continue;
            }
            "--help" | "-h" => {
                options.help = true;
                continue;
            }
            _ => {}
        }

        let value = iter.next().ok_or_else(|| ConfigError::InvalidParameter {
            parameter: flag.trim_start_matches("--").to_string(),
            value: String::new(),
            reason: "missing value".to_string(),
        })?;

        match flag.as_str() {
            "--config" => options.config_path = Some(value.clone()),
            "--width" => options.area_width = Some(parse_value(flag, value)?),
            "--height" => options.area_height = Some(parse_value(flag, value)?),
            "--anchors" => options.anchor_count = Some(parse_value(flag, value)?),
            "--unknowns" => options.unknown_count = Some(parse_value(flag, value)?),
            "--range" => options.comm_range = Some(parse_value(flag, value)?),
            "--noise" => options.noise_stddev = Some(parse_value(flag, value)?),
            "--trials" => options.trial_count = Some(parse_value(flag, value)?),
            "--seed" => options.seed = Some(parse_value(flag, value)?),
            "--format" => {
                let format = value.parse::<OutputFormat>().map_err(|reason| {
                    ConfigError::InvalidParameter {
                        parameter: "format".to_string(),
                        value: value.clone(),
                        reason,
                    }
                })?;
                options.format = Some(format);
            }
            other => {
                return Err(ConfigError::InvalidParameter {
                    parameter: other.to_string(),
                    value: value.clone(),
                    reason: "unknown option".to_string(),
                })
            }
        }
    }

    Ok(options)
}

/// Resolve the effective configuration and validate it before any sampling
fn build_config(options: &CliOptions) -> Result<SimulationConfig, ConfigError> {
    let mut config = match &options.config_path {
        Some(path) => ConfigurationManager::from_file(path)?.get_config().clone(),
        None => SimulationConfig::default(),
    };

    if let Some(width) = options.area_width {
        config.area_width = width;
    }
    if let Some(height) = options.area_height {
        config.area_height = height;
    }
    if let Some(count) = options.anchor_count {
        config.anchor_count = count;
    }
    if let Some(count) = options.unknown_count {
        config.unknown_count = count;
    }
    if let Some(range) = options.comm_range {
        config.comm_range = range;
    }
    if let Some(noise) = options.noise_stddev {
        config.noise_stddev = noise;
    }
    if let Some(trials) = options.trial_count {
        config.trial_count = trials;
    }
    if options.seed.is_some() {
        config.seed = options.seed;
    }

    let report = config.validation_report();
    for warning in &report.warnings {
        warn!("{}", warning);
    }
    config.validate()?;
    Ok(config)
}

fn run_study(config: &SimulationConfig) -> Result<SimulationReport, Box<dyn std::error::Error>> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let aggregator = TrialAggregator::new(UniformSampler::new());

    let run = sample_and_simulate(config, config.comm_range, aggregator.sampler(), &mut rng)?;
    info!(
        "single run: {}/{} nodes localized",
        run.localized_count(),
        run.unknowns.len()
    );
    let anchors = run.anchors.clone();

    let average = aggregator.average_error(config, config.trial_count, &mut rng)?;
    let curve = aggregator.performance_sweep(config, &REFERENCE_RANGE_MULTIPLIERS, &mut rng)?;

    let path = MobilityPath::sinusoidal(config.area_width, config.area_height, DEFAULT_MOBILITY_FRAMES)?;
    let track = track_target(&anchors, &path, config.noise_stddev, &mut rng)?;

    Ok(SimulationReport::new(config, run)
        .with_average_error(average)
        .with_performance_curve(curve)
        .with_mobility_track(track))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    let program = args.first().map_or("range-free-localization", |s| s.as_str());

    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("{}", usage(program));
            return Err(e.into());
        }
    };

    if options.help {
        println!("{}", usage(program));
        return Ok(());
    }

    // Logging setup
    let crate_level = if options.verbose { LevelFilter::Debug } else { LevelFilter::Info };
    Builder::new()
        .filter_level(LevelFilter::Warn)
        .filter(Some("range_free_localization"), crate_level)
        .init();

    let config = build_config(&options)?;

    let report = run_study(&config)?;

    match options.format.unwrap_or(OutputFormat::Text) {
        OutputFormat::Text => print!("{}", TextFormatter::new().format_text(&report)),
        OutputFormat::Json => println!("{}", JsonFormatter::pretty().format_json(&report)?),
        OutputFormat::Csv => println!("{}", CsvFormatter::new().format_csv(&report)),
    }

    Ok(())
}
