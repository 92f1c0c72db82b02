use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use clap::{Args, CommandFactory, Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use eco_trip::output;
use eco_trip::store::Category;
use eco_trip::{
    EcoProfile, FilterCriteria, InMemoryStore, Recommender, ScoredCandidate, UserPreferenceContext,
};

const EXIT_SUCCESS: i32 = 0;
const EXIT_DATA: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build a full travel plan around the best destination (default)
    Plan {
        /// Departure used for transport recommendations
        #[arg(long, default_value = "Origin")]
        from: String,
        /// Also write the plan as JSON to this file
        #[arg(long)]
        save: Option<PathBuf>,
    },
    /// Rank destinations
    Destinations,
    /// Rank accommodations
    Accommodations,
    /// Rank activities for a destination
    Activities {
        destination: String,
    },
    /// Rank every transport option between two places
    Transport {
        origin: String,
        destination: String,
    },
    /// Show the eco-score breakdown of one accommodation
    Explain {
        accommodation: String,
    },
    /// List rows of any category matching every given criterion
    Filter {
        /// Maximum energy consumption (inclusive)
        #[arg(long)]
        max_energy: Option<f64>,
        /// Certification level to look for, e.g. "or"
        #[arg(long = "level")]
        min_certification_level: Option<String>,
        /// Location substring
        #[arg(long)]
        location: Option<String>,
        /// Text to look for in any field
        #[arg(long)]
        text: Option<String>,
        /// Entity type: destination, accommodation, activity or transport
        #[arg(long = "type", value_parser = parse_category)]
        entity_type: Option<Category>,
    },
    /// Compare named entities side by side
    Compare {
        #[arg(required = true, num_args = 2..)]
        names: Vec<String>,
    },
    /// Write a default config file
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args, Debug)]
struct PreferenceArgs {
    /// Maximum budget per stay
    #[arg(long, global = true)]
    budget: Option<f64>,

    /// Eco profile: "Éco-responsable" (or "eco"), "Modéré" (or "moderate"), "Flexible"
    #[arg(long, global = true)]
    profile: Option<String>,

    /// Free-text interests, e.g. "nature culture"
    #[arg(long = "prefs", global = true, default_value = "")]
    preferences: String,
}

impl PreferenceArgs {
    fn to_context(&self) -> UserPreferenceContext {
        UserPreferenceContext::new()
            .with_budget(self.budget)
            .with_profile(
                self.profile
                    .as_deref()
                    .map(|p| EcoProfile::parse(profile_label(p))),
            )
            .with_preferences(self.preferences.clone())
    }
}

/// Map command-line spellings onto the exact profile labels. Anything else
/// is passed through unchanged.
fn profile_label(raw: &str) -> &str {
    match raw.trim().to_lowercase().as_str() {
        "eco" | "eco-responsable" | "éco-responsable" | "ecoresponsable" | "eco-responsible" => {
            "Éco-responsable"
        }
        "modéré" | "modere" | "moderate" => "Modéré",
        "flexible" => "Flexible",
        _ => raw,
    }
}

fn parse_category(s: &str) -> Result<Category, String> {
    Category::parse(s).ok_or_else(|| {
        format!(
            "unknown entity type '{}' (expected destination, accommodation, activity or transport)",
            s
        )
    })
}

#[derive(Parser, Debug)]
#[command(name = "eco-trip")]
#[command(about = "Eco-friendly travel recommendations from a knowledge graph", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/eco-trip/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// JSON dataset to use as knowledge store (overrides the config)
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    /// Print JSON instead of a table
    #[arg(long, global = true, conflicts_with = "tsv")]
    json: bool,

    /// Print tab-separated values
    #[arg(long, global = true)]
    tsv: bool,

    /// Maximum number of results per category (not accepted by `plan`,
    /// whose caps are fixed)
    #[arg(short, long, global = true)]
    limit: Option<usize>,

    #[command(flatten)]
    prefs: PreferenceArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// The plan keeps fixed per-category caps, so a `--limit` there would be
/// silently ignored.
fn check_plan_limit(cli: &Cli) -> Result<(), clap::Error> {
    let is_plan = matches!(cli.command, None | Some(Commands::Plan { .. }));
    if is_plan && cli.limit.is_some() {
        return Err(Cli::command().error(
            clap::error::ErrorKind::ArgumentConflict,
            "--limit does not apply to plan (it keeps 3 destinations, 3 accommodations and 5 activities)",
        ));
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let default_directive = if verbose { "eco_trip=debug" } else { "eco_trip=warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn exit_with(code: i32, message: impl std::fmt::Display) -> ! {
    eprintln!("{}", message);
    std::process::exit(code);
}

fn save_json(path: &Path, value: &impl serde::Serialize) -> Result<()> {
    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    serde_json::to_writer_pretty(&mut file, value).context("Failed to serialize travel plan")?;
    file.write_all(b"\n").context("Failed to write travel plan")?;
    file.commit().context("Failed to save travel plan")?;
    Ok(())
}

fn print_candidates(cli: &Cli, candidates: &[ScoredCandidate]) -> Result<()> {
    if cli.json {
        println!("{}", serde_json::to_string_pretty(candidates)?);
    } else if cli.tsv {
        let tsv = output::format_tsv(candidates);
        if !tsv.is_empty() {
            println!("{}", tsv);
        }
    } else {
        println!(
            "{}",
            output::format_scored_table(candidates, output::should_use_colors())
        );
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = check_plan_limit(&cli) {
        e.exit();
    }
    init_logging(cli.verbose);
    let start_time = Instant::now();
    let default_command = Commands::Plan {
        from: eco_trip::recommend::plan::DEFAULT_ORIGIN.to_string(),
        save: None,
    };
    let command = cli.command.as_ref().unwrap_or(&default_command);

    let config_path = cli.config.as_ref().map(PathBuf::from);

    if let Commands::Init { force } = command {
        let path = match config_path.clone() {
            Some(p) => p,
            None => match eco_trip::config::get_config_path() {
                Ok(p) => p,
                Err(e) => exit_with(EXIT_CONFIG, format!("Config error: {}", e)),
            },
        };
        if let Err(e) = eco_trip::config::write_default_config(&path, cli.data.as_deref(), *force) {
            exit_with(EXIT_CONFIG, format!("Config error: {:#}", e));
        }
        println!("Wrote default config to {}", path.display());
        std::process::exit(EXIT_SUCCESS);
    }

    // Load config
    let config = match eco_trip::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => exit_with(EXIT_CONFIG, format!("Config error: {:#}", e)),
    };

    // Validate scoring config at startup
    let scoring = config.effective_scoring();
    if let Err(errors) = eco_trip::scoring::validate_scoring(&scoring) {
        eprintln!("Scoring config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let Some(dataset_path) = cli.data.clone().or(config.dataset.clone()) else {
        eprintln!("No dataset configured.");
        eprintln!("Pass --data <file.json> or add it to ~/.config/eco-trip/config.yaml:");
        eprintln!("  dataset: /path/to/dataset.json");
        std::process::exit(EXIT_CONFIG);
    };

    let store = match InMemoryStore::load(&dataset_path) {
        Ok(s) => s,
        Err(e) => exit_with(EXIT_DATA, format!("Dataset error: {:#}", e)),
    };

    let recommender = Recommender::new(store, scoring);
    let prefs = cli.prefs.to_context();
    tracing::debug!(?prefs, "recommendation request");

    let outcome = match command {
        Commands::Plan { from, save } => recommender
            .generate_travel_plan_from(from, &prefs)
            .and_then(|plan| {
                if let Some(path) = save {
                    save_json(path, &plan)?;
                    eprintln!("Saved travel plan to {}", path.display());
                }
                if cli.json {
                    println!("{}", serde_json::to_string_pretty(&plan)?);
                } else {
                    println!("{}", output::format_plan(&plan, output::should_use_colors()));
                }
                Ok(())
            }),
        Commands::Destinations => recommender
            .recommend_destinations(&prefs, cli.limit)
            .and_then(|r| print_candidates(&cli, r.candidates())),
        Commands::Accommodations => recommender
            .recommend_accommodations(&prefs, cli.limit)
            .and_then(|r| print_candidates(&cli, r.candidates())),
        Commands::Activities { destination } => recommender
            .recommend_activities(destination, &prefs, cli.limit)
            .and_then(|r| print_candidates(&cli, r.candidates())),
        Commands::Transport { origin, destination } => recommender
            .recommend_transport(origin, destination, &prefs)
            .and_then(|r| {
                let shown = cli.limit.map_or(r.len(), |l| l.min(r.len()));
                print_candidates(&cli, &r.candidates()[..shown])
            }),
        Commands::Explain { accommodation } => {
            recommender.eco_score_for(accommodation).and_then(|found| {
                match found {
                    Some(candidate) if cli.json => {
                        println!("{}", serde_json::to_string_pretty(&candidate)?)
                    }
                    Some(candidate) => println!(
                        "{}",
                        output::format_breakdown(&candidate, output::should_use_colors())
                    ),
                    None => anyhow::bail!("No accommodation named '{}'", accommodation),
                }
                Ok(())
            })
        }
        Commands::Filter {
            max_energy,
            min_certification_level,
            location,
            text,
            entity_type,
        } => {
            let criteria = FilterCriteria {
                max_energy: *max_energy,
                min_certification_level: min_certification_level.clone(),
                location: location.clone(),
                text: text.clone(),
                entity_type: *entity_type,
            };
            recommender
                .filter_candidates(&criteria, &prefs)
                .and_then(|found| {
                    let shown = cli.limit.map_or(found.len(), |l| l.min(found.len()));
                    print_candidates(&cli, &found[..shown])
                })
        }
        Commands::Compare { names } => recommender.compare(names, &prefs).and_then(|comparisons| {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&comparisons)?);
            } else if cli.tsv {
                let matches: Vec<ScoredCandidate> =
                    comparisons.into_iter().flat_map(|c| c.matches).collect();
                let tsv = output::format_tsv(&matches);
                if !tsv.is_empty() {
                    println!("{}", tsv);
                }
            } else {
                println!(
                    "{}",
                    output::format_comparison(&comparisons, output::should_use_colors())
                );
            }
            Ok(())
        }),
        Commands::Init { .. } => Ok(()),
    };

    if let Err(e) = outcome {
        exit_with(EXIT_DATA, format!("Error: {:#}", e));
    }

    if cli.verbose {
        eprintln!(
            "Done in {}",
            humantime::format_duration(std::time::Duration::from_millis(
                start_time.elapsed().as_millis() as u64
            ))
        );
    }

    std::process::exit(EXIT_SUCCESS);
}
