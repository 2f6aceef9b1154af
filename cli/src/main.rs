use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};
use common::{
    check_form, share_text, AppConfig, Clock, ExportRecord, FixedClock, FormValues,
    PredictionRequest, Predictor, SystemClock,
};
use json_schema::ToJsonSchema;
use log::{info, warn};
use rand::{rngs::StdRng, SeedableRng};

#[derive(Parser, Debug)]
#[command(author, version, about = "Sales prediction demo CLI", long_about = None)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate the inputs and predict unit sales
    Predict(PredictArgs),
    /// Only validate the inputs and print the field report as JSON
    Validate(FormArgs),
    /// Print the JSON Schema of a prediction request
    Schema,
}

#[derive(Args, Debug, Clone)]
struct FormArgs {
    #[arg(long, allow_hyphen_values = true)]
    store_id: String,

    #[arg(long, allow_hyphen_values = true)]
    sku_id: String,

    #[arg(long, allow_hyphen_values = true)]
    total_price: String,

    #[arg(long, allow_hyphen_values = true)]
    base_price: String,

    /// The SKU is promoted as featured
    #[arg(long, action = ArgAction::SetTrue)]
    featured: bool,

    /// The SKU is on an in-store display
    #[arg(long, action = ArgAction::SetTrue)]
    display: bool,
}

impl FormArgs {
    fn form(&self) -> FormValues {
        FormValues::new(
            self.store_id.as_str(),
            self.sku_id.as_str(),
            self.total_price.as_str(),
            self.base_price.as_str(),
        )
        .with_featured(self.featured)
        .with_display(self.display)
    }
}

#[derive(Args, Debug)]
struct PredictArgs {
    #[command(flatten)]
    form: FormArgs,

    /// Seed for reproducible predictions
    #[arg(long, env = "SALES_SEED")]
    seed: Option<u64>,

    /// Calendar month (1-12) to use instead of the system clock
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    month: Option<u32>,

    /// Write the prediction as CSV (`-` for stdout)
    #[arg(long, value_hint = ValueHint::FilePath)]
    export: Option<PathBuf>,

    /// Print the share text
    #[arg(long, action = ArgAction::SetTrue)]
    share: bool,

    /// Print the prediction with its factor breakdown as JSON
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,
}

fn main() -> Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let default_level = if cli.verbose { "debug" } else { "info" };
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_level),
    )
    .format_timestamp(None)
    .try_init();

    let config = AppConfig::from_env().context("Failed to load configuration")?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Predict(args) => handle_predict(&args, &config, &mut out),
        Command::Validate(args) => handle_validate(&args, &mut out),
        Command::Schema => handle_schema(&mut out),
    }
}

fn handle_predict(args: &PredictArgs, config: &AppConfig, out: &mut impl Write) -> Result<()> {
    let form = args.form.form();
    let month = args.month.unwrap_or_else(|| SystemClock.current_month());
    let predictor = Predictor::with_clock(FixedClock::new(month));
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let prediction = match predictor.submit(&form, &mut rng) {
        Ok(prediction) => prediction,
        Err(error) => {
            if let common::PredictionError::Validation(validation) = &error {
                for (field, message) in &validation.report.errors {
                    warn!("{field}: {message}");
                }
            }
            return Err(anyhow!(error).context("Prediction failed"));
        }
    };
    info!(
        "Predicted {} units for store {} sku {} (month {})",
        prediction.units, prediction.request.store_id, prediction.request.sku_id, month
    );

    if args.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&prediction)?)?;
    } else {
        writeln!(out, "{}", prediction.units)?;
    }

    if args.share {
        writeln!(out, "{}", share_text(prediction.units, &prediction.request))?;
    }

    if let Some(path) = &args.export {
        export_csv(prediction.units, prediction.request, config, path, out)?;
    }

    Ok(())
}

fn export_csv(
    units: u32,
    request: PredictionRequest,
    config: &AppConfig,
    path: &Path,
    out: &mut impl Write,
) -> Result<()> {
    let now = Utc::now().with_timezone(&config.timezone);
    let record = ExportRecord::new(units, request, &now);
    let csv = record.to_csv();

    if path.as_os_str() == "-" {
        writeln!(out, "{csv}")?;
    } else {
        let path = if path.is_dir() {
            path.join(record.file_name())
        } else {
            path.to_path_buf()
        };
        fs::write(&path, format!("{csv}\n"))
            .with_context(|| format!("Failed to write CSV to {}", path.display()))?;
        info!("Exported prediction to {}", path.display());
    }
    Ok(())
}

fn handle_validate(args: &FormArgs, out: &mut impl Write) -> Result<()> {
    let report = check_form(&args.form());
    writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    if report.valid {
        Ok(())
    } else {
        Err(anyhow!("{} invalid field(s)", report.errors.len()))
    }
}

fn handle_schema(out: &mut impl Write) -> Result<()> {
    let schema = PredictionRequest::to_json_schema();
    writeln!(out, "{}", serde_json::to_string_pretty(&schema)?)?;
    Ok(())
}
