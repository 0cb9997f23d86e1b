use calorie_core::*;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "calburn")]
#[command(about = "MET-based calorie burn estimator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Show debug logging
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate calories burned for an activity
    Estimate {
        /// Activity name (free text, e.g. "evening jogging")
        #[arg(long, short)]
        activity: String,

        /// Duration in minutes
        #[arg(long, short, value_parser = parse_positive)]
        duration: f64,

        /// Body weight
        #[arg(long, short, value_parser = parse_positive)]
        weight: f64,

        /// Weight unit (lb, kg)
        #[arg(long, short, default_value = "lb", value_parser = parse_unit)]
        unit: WeightUnit,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show which catalog activity a name resolves to
    Resolve {
        /// Activity name (free text)
        activity: String,
    },

    /// List the activity catalog
    Activities {
        /// Only show one category (e.g. running, cardio, "martial arts")
        #[arg(long)]
        category: Option<String>,
    },
}

fn parse_positive(s: &str) -> std::result::Result<f64, String> {
    let value: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", s))?;
    if !value.is_finite() || value <= 0.0 {
        return Err(format!("'{}' must be greater than zero", s));
    }
    Ok(value)
}

fn parse_unit(s: &str) -> std::result::Result<WeightUnit, String> {
    s.parse()
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        calorie_core::logging::init_with_level("debug");
    } else {
        calorie_core::logging::init_with_level("warn");
    }

    let catalog = get_default_catalog();
    let errors = catalog.validate();
    if !errors.is_empty() {
        eprintln!("Catalog validation errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        return Err(Error::CatalogValidation("Invalid catalog".into()));
    }

    match cli.command {
        Commands::Estimate {
            activity,
            duration,
            weight,
            unit,
            json,
        } => cmd_estimate(catalog, EstimationRequest::new(activity, duration, weight, unit), json),
        Commands::Resolve { activity } => {
            cmd_resolve(catalog, &activity);
            Ok(())
        }
        Commands::Activities { category } => cmd_activities(catalog, category),
    }
}

fn cmd_estimate(catalog: &Catalog, request: EstimationRequest, json: bool) -> Result<()> {
    request.validate()?;

    let result = estimate_calories(catalog, &request);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} min of \"{}\" at {} {}",
        request.duration_minutes,
        request.activity_name.trim(),
        request.weight_value,
        request.weight_unit
    );
    println!();

    match result.calories_burned {
        Some(calories) => {
            println!("  ≈ {} calories", calories);
            println!("  {}", result.derivation_text);
        }
        None => {
            println!("  {}", result.derivation_text);
            println!("  Try a more common name (see `calburn activities`).");
        }
    }
    println!();

    Ok(())
}

fn cmd_resolve(catalog: &Catalog, activity: &str) {
    match resolve_activity(catalog, activity) {
        Some(m) => {
            let kind = match m.kind {
                MatchKind::Exact => "exact",
                MatchKind::Partial => "partial",
            };
            println!(
                "{} ({} MET, {}) [{} match]",
                m.record.name, m.record.intensity_factor, m.record.category, kind
            );
        }
        None => println!("No match for \"{}\"", activity.trim()),
    }
}

fn cmd_activities(catalog: &Catalog, category: Option<String>) -> Result<()> {
    let filter = match category {
        Some(c) => Some(
            c.parse::<ActivityCategory>()
                .map_err(Error::InvalidInput)?,
        ),
        None => None,
    };

    let width = catalog.iter().map(|a| a.name.len()).max().unwrap_or(0);

    let activities: Vec<&ActivityRecord> = match filter {
        Some(category) => catalog.by_category(category).collect(),
        None => catalog.iter().collect(),
    };

    for activity in activities {
        println!(
            "  {:<width$}  {:>5.1} MET  {}",
            activity.name,
            activity.intensity_factor,
            activity.category,
            width = width
        );
    }

    Ok(())
}
