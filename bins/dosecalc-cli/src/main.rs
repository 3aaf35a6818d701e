//! dosecalc — command-line dose calculator.
//!
//! Runs the same decay engine as the web service without a server, for
//! scripting and quick checks at the bench.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use dosecalc_core::constants::{DEFAULT_INIT_TIME, DEFAULT_NUCLIDE, DEFAULT_TARGET_TIME};
use dosecalc_core::nuclide::NuclideTable;
use dosecalc_core::traits::DoseCalculator;
use dosecalc_core::types::{CalculationForm, NumberField};
use dosecalc_decay::DecayEngine;

/// Radiotracer decay and draw-volume calculator.
#[derive(Parser)]
#[command(name = "dosecalc")]
#[command(version, about = "How much to draw, and when.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decay an activity to a target time and compute the draw volume.
    Calc(CalcArgs),
    /// List known nuclides and their half-lives.
    Nuclides,
}

#[derive(Args)]
struct CalcArgs {
    /// Nuclide code (F18 or C11).
    #[arg(short, long, default_value = DEFAULT_NUCLIDE)]
    nuclide: String,

    /// Time the activity was measured (HH:MM).
    #[arg(short, long, default_value = DEFAULT_INIT_TIME)]
    init_time: String,

    /// Time the dose will be drawn (HH:MM). Earlier than --init-time means the next day.
    #[arg(short, long, default_value = DEFAULT_TARGET_TIME)]
    target_time: String,

    /// Activity at --init-time.
    #[arg(short, long, default_value = "0")]
    activity: String,

    /// Volume the activity is dissolved in.
    #[arg(short, long, default_value = "0")]
    volume: String,

    /// Dose to draw at --target-time.
    #[arg(short, long)]
    dose: Option<String>,

    /// Print the result as JSON.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let nuclides = Arc::new(NuclideTable::builtin());

    match cli.command {
        Commands::Calc(args) => calc(args, nuclides),
        Commands::Nuclides => {
            list_nuclides(&nuclides);
            Ok(())
        }
    }
}

fn calc(args: CalcArgs, nuclides: Arc<NuclideTable>) -> Result<()> {
    let form = CalculationForm {
        nuclide: Some(args.nuclide),
        init_time: Some(args.init_time),
        target_time: Some(args.target_time),
        init_activity: Some(NumberField::Text(args.activity)),
        init_volume: Some(NumberField::Text(args.volume)),
        desired_dose: args.dose.map(NumberField::Text),
    };

    let engine = DecayEngine::new(nuclides);
    let result = engine.evaluate(&form).context("Calculation failed")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    if !form.has_desired_dose() {
        println!("No desired dose given; nothing to compute.");
        return Ok(());
    }

    println!("Elapsed:        {:.1} min", result.elapsed_minutes);
    println!("Activity now:   {:.2}", result.current_activity);
    println!("Concentration:  {:.3} per unit volume", result.current_concentration);
    println!("Draw volume:    {:.3}", result.required_volume);
    Ok(())
}

fn list_nuclides(nuclides: &NuclideTable) {
    for (i, n) in nuclides.iter().enumerate() {
        let marker = if i == 0 { " (default)" } else { "" };
        println!("{:<6} {:<16} {:>7.1} min{}", n.code, n.name, n.half_life_minutes, marker);
    }
}
