//! # Civil Pro CLI
//!
//! Terminal host for the `civil_core` converter, quick search and material
//! estimators. Every command prints a short human-readable report, or the
//! raw result as JSON with `--json`.
//!
//! ```text
//! civil convert length 10 feet meter
//! civil convert discount 200 originalPrice savingAmount --aux 25
//! civil search brik
//! civil estimate concrete 2 1 0.5 --mix 1:1.5:3 --discount 5
//! ```
//!
//! Diagnostics go to stderr and are filtered with `RUST_LOG` (default `warn`).

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use civil_core::conversions::{registry, ConversionRequest, ConversionResult};
use civil_core::errors::{CalcError, CalcResult};
use civil_core::estimators::{
    concrete, coverage, ConcreteInput, CoverageInput, CoverageMaterial, LengthUnit, MixRatio,
    VolumeSystem,
};
use civil_core::file_io::{load_settings, save_settings};
use civil_core::search::{catalog, search_with};
use civil_core::settings::{Settings, SettingsFile};

#[derive(Debug, Parser)]
#[command(name = "civil", version, about = "Civil Pro unit converter, quick search and estimators")]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Settings file (defaults are used when omitted)
    #[arg(long, global = true, value_name = "PATH")]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List conversion categories and their units
    Categories,
    /// List the units of one category
    Units { category: String },
    /// Convert a value between two units of a category
    Convert {
        category: String,
        /// Numeric value; text that does not parse is rejected
        #[arg(allow_hyphen_values = true)]
        value: String,
        from: String,
        to: String,
        /// Auxiliary input (discount percentage for `discount`)
        #[arg(long)]
        aux: Option<f64>,
    },
    /// Rank tools and converters against a loose query
    Search { query: Option<String> },
    /// Material estimates
    Estimate {
        #[command(subcommand)]
        kind: EstimateCommand,
    },
    /// Manage the settings file
    Settings {
        #[command(subcommand)]
        action: SettingsCommand,
    },
}

#[derive(Debug, Subcommand)]
enum EstimateCommand {
    /// Bricks needed to cover a wall or floor
    Brick(CoverageArgs),
    /// Tiles needed to cover a floor
    Tile(CoverageArgs),
    /// Cement, sand and aggregate for a rectangular pour
    Concrete(ConcreteArgs),
}

#[derive(Debug, Args)]
struct CoverageArgs {
    length: f64,
    width: f64,
    piece_length: f64,
    piece_width: f64,
    /// meter or feet
    #[arg(long, default_value = "meter")]
    unit: LengthUnit,
    /// Waste percent (settings default when omitted)
    #[arg(long)]
    waste: Option<f64>,
}

#[derive(Debug, Args)]
struct ConcreteArgs {
    length: f64,
    width: f64,
    height: f64,
    /// metric or imperial
    #[arg(long, default_value = "metric")]
    unit: VolumeSystem,
    /// 1:2:4, 1:1.5:3 or 1:3:6
    #[arg(long, default_value = "1:2:4")]
    mix: MixRatio,
    /// Wastage percent (settings default when omitted)
    #[arg(long)]
    wastage: Option<f64>,
    /// Discount percent applied to the total cost
    #[arg(long, default_value_t = 0.0)]
    discount: f64,
}

#[derive(Debug, Subcommand)]
enum SettingsCommand {
    /// Write a default settings file
    Init { path: PathBuf },
    /// Print the effective settings
    Show,
}

#[derive(Serialize)]
struct ConvertOutput<'a> {
    request: &'a ConversionRequest,
    result: ConversionResult,
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_error(&e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> CalcResult<()> {
    let settings = effective_settings(cli.settings.as_deref())?;

    match &cli.command {
        Command::Categories => print_categories(cli.json),
        Command::Units { category } => print_units(category, cli.json),
        Command::Convert {
            category,
            value,
            from,
            to,
            aux,
        } => run_convert(&settings, category, value, from, to, *aux, cli.json),
        Command::Search { query } => run_search(&settings, query.as_deref().unwrap_or(""), cli.json),
        Command::Estimate { kind } => run_estimate(&settings, kind, cli.json),
        Command::Settings { action } => match action {
            SettingsCommand::Init { path } => {
                save_settings(&SettingsFile::default(), path)?;
                println!("Wrote default settings to {}", path.display());
                Ok(())
            }
            SettingsCommand::Show => print_json(&settings),
        },
    }
}

fn effective_settings(path: Option<&Path>) -> CalcResult<Settings> {
    match path {
        Some(path) => {
            let file = load_settings(path)?;
            tracing::debug!(path = %path.display(), version = %file.meta.version, "using settings file");
            Ok(file.settings)
        }
        None => {
            tracing::debug!("no settings file, using defaults");
            Ok(Settings::default())
        }
    }
}

/// Parse a user-typed number. Text that is not a number becomes NaN so the
/// evaluator reports it as invalid input.
fn parse_value(text: &str) -> f64 {
    text.trim().parse().unwrap_or(f64::NAN)
}

// ============================================================================
// Commands
// ============================================================================

fn print_categories(json: bool) -> CalcResult<()> {
    let categories = registry().list_categories();
    if json {
        return print_json(&categories);
    }

    for category in categories {
        let units: Vec<&str> = category.units().iter().map(|u| u.key).collect();
        println!("{:<12} {}", category.key, category.label);
        println!("{:<12} {}", "", units.join(", "));
    }
    Ok(())
}

fn print_units(category: &str, json: bool) -> CalcResult<()> {
    let units = registry().list_units(category)?;
    if json {
        return print_json(&units);
    }

    for unit in units {
        println!("{:<18} {}", unit.key, unit.label);
    }
    Ok(())
}

fn run_convert(
    settings: &Settings,
    category: &str,
    value_text: &str,
    from: &str,
    to: &str,
    aux: Option<f64>,
    json: bool,
) -> CalcResult<()> {
    let mut request = ConversionRequest::new(category, from, to, parse_value(value_text));
    if let Some(aux) = aux {
        request = request.with_auxiliary(aux);
    }

    let result = registry().convert(&request)?;
    if json {
        return print_json(&ConvertOutput {
            request: &request,
            result,
        });
    }

    println!(
        "{} {} = {} {}",
        settings.format_value(request.value),
        from,
        settings.format_value(result.value),
        to
    );
    Ok(())
}

fn run_search(settings: &Settings, query: &str, json: bool) -> CalcResult<()> {
    let matches = search_with(query, catalog(), settings.search_options());
    if json {
        return print_json(&matches);
    }

    if matches.is_empty() {
        println!("No results found for \"{}\"", query);
        return Ok(());
    }
    for m in &matches {
        println!("{:.2}  {:<22} {}", m.score, m.entry.name, m.entry.path);
        println!("      {}", m.entry.description);
    }
    Ok(())
}

fn run_estimate(settings: &Settings, kind: &EstimateCommand, json: bool) -> CalcResult<()> {
    match kind {
        EstimateCommand::Brick(args) => run_coverage(settings, CoverageMaterial::Brick, args, json),
        EstimateCommand::Tile(args) => run_coverage(settings, CoverageMaterial::Tile, args, json),
        EstimateCommand::Concrete(args) => run_concrete(settings, args, json),
    }
}

fn run_coverage(
    settings: &Settings,
    material: CoverageMaterial,
    args: &CoverageArgs,
    json: bool,
) -> CalcResult<()> {
    let input = CoverageInput::new(material, args.length, args.width, args.piece_length, args.piece_width)
        .with_unit(args.unit)
        .with_waste(args.waste.unwrap_or(settings.default_waste_percent));
    let result = coverage::calculate(&input)?;
    if json {
        return print_json(&result);
    }

    banner(&format!("{} ESTIMATE", material.display_name().to_uppercase()));
    println!("  Area:        {:.2} m²", result.area_m2);
    println!("  Piece area:  {:.4} m²", result.piece_area_m2);
    println!("  Waste:       {:.0}%", input.waste_percent);
    println!();
    println!("  {} needed: {}", material.display_name(), result.pieces);
    rule();
    Ok(())
}

fn run_concrete(settings: &Settings, args: &ConcreteArgs, json: bool) -> CalcResult<()> {
    let mut input = ConcreteInput::new(args.length, args.width, args.height);
    input.unit = args.unit;
    input.mix = args.mix;
    input.wastage_percent = args.wastage.unwrap_or(settings.default_waste_percent);
    input.discount_percent = args.discount;
    input.prices = settings.material_prices;

    let result = concrete::calculate(&input)?;
    if json {
        return print_json(&result);
    }

    banner(&format!("CONCRETE ESTIMATE ({})", input.mix));
    println!("  Wet volume:  {:.3} m³", result.volume_m3);
    println!("  Dry volume:  {:.3} m³", result.dry_volume_m3);
    println!();
    println!("Materials:");
    println!("  Cement:      {:.2} bags  (NPR {:.2})", result.cement_bags, result.cement_cost);
    println!("  Sand:        {:.3} m³  (NPR {:.2})", result.sand_m3, result.sand_cost);
    println!("  Aggregate:   {:.3} m³  (NPR {:.2})", result.aggregate_m3, result.aggregate_cost);
    println!();
    println!("  Total:       NPR {:.2}", result.total_cost);
    if input.discount_percent > 0.0 {
        println!("  Discount:    {:.1}% (save NPR {:.2})", input.discount_percent, result.savings);
        println!("  Payable:     NPR {:.2}", result.discounted_cost);
    }
    rule();
    Ok(())
}

// ============================================================================
// Output helpers
// ============================================================================

fn print_json<T: Serialize + ?Sized>(value: &T) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| CalcError::SerializationError {
        reason: e.to_string(),
    })?;
    println!("{}", json);
    Ok(())
}

fn banner(title: &str) {
    rule();
    println!("  {}", title);
    rule();
    println!();
}

fn rule() {
    println!("═══════════════════════════════════════");
}

fn report_error(e: &CalcError) {
    eprintln!("Error: {}", e);
    if e.is_configuration_gap() {
        eprintln!("The conversion table declares no edge for this unit pair.");
    }
    if let Ok(json) = serde_json::to_string_pretty(e) {
        eprintln!();
        eprintln!("Error JSON:");
        eprintln!("{}", json);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_negative_value_is_positional() {
        let cli = Cli::try_parse_from(["civil", "convert", "temperature", "-40", "celsius", "fahrenheit"]).unwrap();
        match cli.command {
            Command::Convert { value, .. } => assert_eq!(value, "-40"),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_estimate_flags_parse() {
        let cli = Cli::try_parse_from([
            "civil", "--json", "estimate", "concrete", "2", "1", "0.5", "--mix", "1:1.5:3", "--unit", "imperial",
        ])
        .unwrap();
        assert!(cli.json);
        match cli.command {
            Command::Estimate {
                kind: EstimateCommand::Concrete(args),
            } => {
                assert_eq!(args.mix, MixRatio::M20);
                assert_eq!(args.unit, VolumeSystem::Imperial);
                assert_eq!(args.wastage, None);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value(" 12.5 "), 12.5);
        assert!(parse_value("twelve").is_nan());
    }

    #[test]
    fn test_unparsable_value_is_invalid_input() {
        let request = ConversionRequest::new("length", "meter", "feet", parse_value("abc"));
        let err = registry().convert(&request).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_settings_default_without_path() {
        assert_eq!(effective_settings(None).unwrap(), Settings::default());
    }

    #[test]
    fn test_settings_loaded_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let mut settings = Settings::default();
        settings.display_precision = 2;
        save_settings(&SettingsFile::new(settings.clone()), &path).unwrap();

        assert_eq!(effective_settings(Some(&path)).unwrap(), settings);
    }
}
