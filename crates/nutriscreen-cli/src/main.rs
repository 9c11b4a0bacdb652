use std::path::PathBuf;

use clap::{Parser, Subcommand};
use eyre::Result;
use jiff::civil::Date;
use nutriscreen_core::models::measurement::{AssessmentRequest, Measurement};
use nutriscreen_core::models::sex::Sex;
use nutriscreen_engine::indicators::Subject;
use nutriscreen_engine::{Engine, EngineConfig};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "nutriscreen", version, about = "WHO child growth standard screening")]
struct Cli {
    /// Engine config file. Defaults to <config dir>/nutriscreen/config.json.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Load reference tables from this directory instead of the built-in set.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Emit logs as JSON.
    #[arg(long, global = true)]
    json: bool,

    /// Log at debug level unless RUST_LOG is set.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run a full nutritional assessment.
    Assess {
        #[arg(long)]
        weight: f64,
        #[arg(long)]
        height: f64,
        #[arg(long)]
        birth_date: Date,
        #[arg(long)]
        sex: String,
        /// Observation date; today when omitted.
        #[arg(long)]
        date: Option<Date>,
    },
    /// Run a single indicator (e.g. weight_for_age).
    Indicator {
        id: String,
        #[arg(long)]
        weight: f64,
        #[arg(long)]
        height: f64,
        #[arg(long)]
        birth_date: Date,
        #[arg(long)]
        sex: Sex,
        #[arg(long)]
        date: Option<Date>,
    },
    /// List the loaded reference tables.
    Tables,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_tracing(cli.json, cli.verbose);

    let mut config = load_config(cli.config.as_ref())?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = Some(dir);
    }
    let engine = Engine::from_config(config)?;

    match cli.command {
        Command::Assess {
            weight,
            height,
            birth_date,
            sex,
            date,
        } => {
            let request = AssessmentRequest {
                weight_kg: weight,
                height_cm: height,
                birth_date,
                sex,
                observation_date: date,
            };
            let result = engine.assess(&request);
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Command::Indicator {
            id,
            weight,
            height,
            birth_date,
            sex,
            date,
        } => {
            let indicator = engine
                .indicator(&id)
                .ok_or_else(|| eyre::eyre!("unknown indicator: {id}"))?;
            let subject = Subject::new(Measurement {
                weight_kg: weight,
                height_cm: height,
                birth_date,
                sex,
                observation_date: date.unwrap_or_else(|| jiff::Zoned::now().date()),
            })?;
            let result = indicator.evaluate(engine.store(), &subject);
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Command::Tables => {
            for table in engine.store().tables() {
                let boundaries = table.boundaries.as_ref().map_or(0, |b| b.len());
                let distribution = table.distribution.as_ref().map_or(0, |d| d.len());
                let (lo, hi) = table.span().unwrap_or_default();
                println!(
                    "{:<28} v{:<8} {lo:>5}-{hi:<5} boundaries={boundaries:<4} distribution={distribution:<4} {}",
                    table.name(),
                    table.version,
                    table.source
                );
            }
        }
    }

    Ok(())
}

fn init_tracing(json: bool, verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// An explicit path must exist; the default location is optional.
fn load_config(explicit: Option<&PathBuf>) -> Result<EngineConfig> {
    if let Some(path) = explicit {
        return Ok(EngineConfig::load(path)?);
    }
    let Some(base) = dirs::config_dir() else {
        return Ok(EngineConfig::default());
    };
    let path = base.join("nutriscreen").join("config.json");
    if path.exists() {
        tracing::info!(path = %path.display(), "using config");
        Ok(EngineConfig::load(&path)?)
    } else {
        Ok(EngineConfig::default())
    }
}
