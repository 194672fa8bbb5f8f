use clap::{Args, Parser, Subcommand};
use psy_air::{AirState, AirStateConfig, Property, PsychroError};
use psy_units::{SystemKind, UnitError, standard_registry};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("Failed to read input file: {path}")]
    InputRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid input file {path}: {source}")]
    InputParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("JSON output failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Psychro(#[from] PsychroError),

    #[error(transparent)]
    Units(#[from] UnitError),
}

type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "psy-cli")]
#[command(about = "Psychrometric properties of moist air", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a report of an air state
    Report {
        #[command(flatten)]
        state: StateArgs,
        /// Derive every missing field before reporting
        #[arg(long)]
        solve_all: bool,
        /// Report in SI regardless of the input system
        #[arg(long)]
        si: bool,
        /// Print the SI values as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Solve named properties (tdb, twb, dew, rh, w, h, pw, dsat, sv, rda, mad)
    Query {
        #[command(flatten)]
        state: StateArgs,
        /// Property to solve; repeat for several
        #[arg(short, long = "name", required = true)]
        names: Vec<String>,
    },
    /// Convert a value between units
    Convert {
        value: f64,
        /// Unit the value is expressed in
        unit: String,
        /// Target unit (defaults to the SI unit of the same dimension)
        target: Option<String>,
    },
}

#[derive(Args)]
struct StateArgs {
    /// Measurement system of inputs and output (si, imp, cgs)
    #[arg(short, long, default_value = "si")]
    system: SystemKind,
    /// YAML file with known values; KEY=VALUE arguments override it
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// Known values, e.g. tdb=30 rh=0.5 P=101325
    #[arg(value_parser = parse_pair)]
    values: Vec<(String, f64)>,
}

fn parse_pair(s: &str) -> Result<(String, f64), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got \"{s}\""))?;
    let value = value
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid value for {key}: {e}"))?;
    Ok((key.trim().to_string(), value))
}

/// Log filter from `RUST_LOG` directives; `info` when unset or unparsable.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Report {
            state,
            solve_all,
            si,
            json,
        } => cmd_report(&state, solve_all, si, json),
        Commands::Query { state, names } => cmd_query(&state, &names),
        Commands::Convert {
            value,
            unit,
            target,
        } => cmd_convert(value, &unit, target.as_deref()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: &Path) -> CliResult<AirStateConfig> {
    let text = std::fs::read_to_string(path).map_err(|source| CliError::InputRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_yaml::from_str(&text).map_err(|source| CliError::InputParse {
        path: path.to_path_buf(),
        source,
    })
}

fn build_state(args: &StateArgs) -> CliResult<AirState<'static>> {
    let file = match &args.input {
        Some(path) => load_config(path)?,
        None => AirStateConfig::default(),
    };
    let flags = AirStateConfig::from_pairs(args.values.iter().map(|(k, v)| (k.as_str(), *v)))?;
    let config = file.merge(flags);
    debug!(?config, system = %args.system, "building air state");
    Ok(AirState::standard(args.system, &config)?)
}

fn cmd_report(args: &StateArgs, solve_all: bool, si: bool, json: bool) -> CliResult<()> {
    let mut state = build_state(args)?;
    if solve_all {
        state.solve_all()?;
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&state.snapshot())?);
    } else if si {
        print!("{}", state.report_si());
    } else {
        print!("{}", state.report()?);
    }
    Ok(())
}

fn cmd_query(args: &StateArgs, names: &[String]) -> CliResult<()> {
    let mut state = build_state(args)?;
    for name in names {
        let property: Property = name.parse()?;
        let si_value = state.solve_property(property)?;
        // stored fields are shown in the chosen system, derived ones in SI
        let value = match property.field() {
            Some(field) => state.value_in_system(field)?.unwrap_or(si_value),
            None => si_value,
        };
        println!("{property}: {value}");
    }
    Ok(())
}

fn cmd_convert(value: f64, unit: &str, target: Option<&str>) -> CliResult<()> {
    let registry = standard_registry();
    let converted = registry.convert(unit, value, target)?;
    let to = match target {
        Some(t) => registry.unit(t)?,
        None => registry.main_unit(SystemKind::Si, registry.unit(unit)?.dimension())?,
    };
    println!("{}", to.render(converted));
    Ok(())
}
