//! Command line front end: render a diet plan described in a JSON file.
//!
//! Usage:
//! ```bash
//! # Render with the default branding from ./assets into the current directory
//! dietplan-gen plan.json
//!
//! # Custom artwork, output directory and a fixed date for the file name
//! dietplan-gen plan.json --logo brand/logo.svg --background brand/bg.jpg \
//!     --output-dir out --date 2025-11-01
//! ```
//!
//! Paths may also come from `DIETPLAN_LOGO`, `DIETPLAN_BACKGROUND`,
//! `DIETPLAN_OUTPUT_DIR` and `DIETPLAN_SETTINGS`, or a `.env` file.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use dietplan_gen::{generate, AppConfig, BrandAssets, DietPlan, GenerateError, RenderSettings};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error, info};

const SUCCESS: &str = "PDF generated successfully!";
const FAILURE: &str = "Failed to generate PDF. Please try again.";

#[derive(Parser)]
#[command(
    name = "dietplan-gen",
    about = "Render a client diet plan into a branded PDF",
    version
)]
struct Cli {
    /// JSON file with the plan to render
    plan: PathBuf,

    /// Vector logo for the first page header
    #[arg(long)]
    logo: Option<PathBuf>,

    /// Image painted behind every page
    #[arg(long)]
    background: Option<PathBuf>,

    /// Directory to save the document in
    #[arg(long, short = 'o')]
    output_dir: Option<PathBuf>,

    /// JSON file overriding the default branding
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Date used in the file name (YYYY-MM-DD), defaults to today
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

impl Cli {
    /// Flags win over the environment
    fn merge(self, env: AppConfig) -> (PathBuf, Option<NaiveDate>, AppConfig) {
        let config = AppConfig {
            logo: self.logo.or(env.logo),
            background: self.background.or(env.background),
            output_dir: self.output_dir.or(env.output_dir),
            settings: self.settings.or(env.settings),
        };
        (self.plan, self.date, config)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(path) => {
            info!(path = %path.display(), "done");
            println!("{SUCCESS}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{err:#}");
            let message = err
                .downcast_ref::<GenerateError>()
                .map_or(FAILURE, GenerateError::notification);
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<PathBuf> {
    let env = AppConfig::from_env().context("reading DIETPLAN_* environment")?;
    let (plan_path, date, config) = cli.merge(env);
    debug!(?config, "configuration");

    let plan_json = std::fs::read_to_string(&plan_path)
        .with_context(|| format!("reading plan {}", plan_path.display()))?;
    let plan: DietPlan = serde_json::from_str(&plan_json)
        .with_context(|| format!("parsing plan {}", plan_path.display()))?;

    // check the form before touching any assets
    plan.validate().map_err(GenerateError::from)?;

    let settings = match &config.settings {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading settings {}", path.display()))?;
            RenderSettings::from_json(&json)
                .with_context(|| format!("parsing settings {}", path.display()))?
        }
        None => RenderSettings::default(),
    };

    let assets = BrandAssets::load(config.logo_path(), config.background_path())?;
    let date = date.unwrap_or_else(|| Local::now().date_naive());
    let generated = generate(&plan, assets, &settings, date)?;
    let path = generated.save(config.output_dir())?;
    Ok(path)
}
