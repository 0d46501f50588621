//! Command-line interface implementation

use clap::{Args, Parser, Subcommand};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config::{load_config, merge_cli_overrides, CliOverrides, LogLevel, OskConfig};
use crate::definition::{expand_sources, load_files, ParseMode};
use crate::geometry::placement_of;
use crate::logging::init_tracing;
use crate::navigation::{wire_all, KeyBindings, NavigationStack};
use crate::registry::PaletteRegistry;
use crate::render::TextRenderer;
use crate::session::{ActivationOutcome, Session};

const EXIT_SUCCESS: u8 = 0;
const EXIT_ERROR: u8 = 1;
const EXIT_INVALID_ARGS: u8 = 2;

/// Container name used by the text renderer
const KEYBOARD_CONTAINER: &str = "keyboard";

/// On-screen keyboard palettes - inspect, check and walk palette definitions
#[derive(Parser)]
#[command(name = "osk")]
#[command(about = "On-screen keyboard palettes - inspect, check and walk palette definitions")]
#[command(version)]
pub struct Cli {
    /// Path to osk.toml (default: search upward from the current directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level: error, warn, info, debug or trace
    #[arg(long, global = true)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Definition files to load instead of the configured sources
#[derive(Args, Debug, Clone, Default)]
pub struct PaletteFiles {
    /// Palette definition files (default: `palettes.sources` from osk.toml)
    pub files: Vec<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show each palette's grid shape and key placements
    Inspect {
        #[command(flatten)]
        palettes: PaletteFiles,

        /// Output JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Load, register and wire palettes, reporting configuration problems
    Check {
        #[command(flatten)]
        palettes: PaletteFiles,

        /// Treat any problem as an error
        #[arg(long)]
        strict: bool,
    },
    /// Simulate a session: show a palette, then press keys in order
    Walk {
        #[command(flatten)]
        palettes: PaletteFiles,

        /// Palette shown first (default: `palettes.start`, else the first loaded)
        #[arg(long)]
        start: Option<String>,

        /// Key to activate on the currently displayed palette (repeatable)
        #[arg(short, long = "press")]
        presses: Vec<String>,

        /// Navigation stack capacity
        #[arg(long)]
        capacity: Option<usize>,
    },
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let overrides = match &cli.command {
        Commands::Inspect { .. } => CliOverrides::default(),
        Commands::Check { strict, .. } => {
            CliOverrides { strict: strict.then_some(true), ..Default::default() }
        }
        Commands::Walk { start, capacity, .. } => {
            CliOverrides { start: start.clone(), capacity: *capacity, ..Default::default() }
        }
    };
    let overrides = CliOverrides { log_level: cli.log_level, ..overrides };

    let config = match load_config(cli.config.as_deref()) {
        Ok(mut config) => match merge_cli_overrides(&mut config, &overrides) {
            Ok(()) => config,
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_INVALID_ARGS);
            }
        },
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };
    init_tracing(config.logging.level);

    match cli.command {
        Commands::Inspect { palettes, json } => run_inspect(&config, &palettes, json),
        Commands::Check { palettes, .. } => run_check(&config, &palettes),
        Commands::Walk { palettes, presses, .. } => run_walk(&config, &palettes, &presses),
    }
}

/// Palettes registered from definition files, plus every problem met on the way.
struct Loaded {
    registry: PaletteRegistry,
    problems: Vec<String>,
}

fn load_registry(config: &OskConfig, files: &PaletteFiles) -> Result<Loaded, String> {
    let paths = if files.files.is_empty() {
        expand_sources(&config.palettes.sources, &config.root).map_err(|e| e.to_string())?
    } else {
        files.files.clone()
    };
    if paths.is_empty() {
        return Err("no palette definition files found".to_string());
    }

    let mode = if config.palettes.strict { ParseMode::Strict } else { ParseMode::Lenient };
    let result = load_files(&paths, mode).map_err(|e| e.to_string())?;

    let mut problems: Vec<String> = result
        .warnings
        .iter()
        .map(|w| format!("{}: {}", display_path(&w.path), w.message))
        .collect();

    let mut registry = PaletteRegistry::new();
    problems.extend(registry.add_all(result.palettes).iter().map(ToString::to_string));

    Ok(Loaded { registry, problems })
}

fn display_path(path: &Path) -> String {
    path.display().to_string()
}

/// Execute the inspect command
fn run_inspect(config: &OskConfig, files: &PaletteFiles, json: bool) -> ExitCode {
    let loaded = match load_registry(config, files) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    if json {
        let output = inspect_json(&loaded);
        match serde_json::to_string_pretty(&output) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
        return ExitCode::from(EXIT_SUCCESS);
    }

    for palette in loaded.registry.palettes() {
        let shape = palette.shape();
        println!(
            "{}: {} rows x {} cols (grid-template-columns: {})",
            palette.name,
            shape.rows,
            shape.cols,
            shape.template_columns()
        );
        for key in palette.keys.values() {
            // Registered palettes only hold valid rectangles
            let placement = match placement_of(key) {
                Ok(p) => p.css(),
                Err(e) => e.to_string(),
            };
            println!("  {:<16} {:<24} {}  \"{}\"", key.id, key.role.to_string(), placement, key.display_text());
        }
    }

    for problem in &loaded.problems {
        eprintln!("Warning: {}", problem);
    }
    ExitCode::from(EXIT_SUCCESS)
}

fn inspect_json(loaded: &Loaded) -> serde_json::Value {
    let palettes: Vec<serde_json::Value> = loaded
        .registry
        .palettes()
        .map(|palette| {
            let shape = palette.shape();
            let keys: Vec<serde_json::Value> = palette
                .keys
                .values()
                .map(|key| {
                    json!({
                        "id": key.id,
                        "role": key.role.to_string(),
                        "target": key.role.target(),
                        "rect": key.rect,
                        "placement": placement_of(key).ok().map(|p| p.css()),
                        "text": key.display_text(),
                    })
                })
                .collect();
            json!({
                "name": palette.name,
                "dynamic": palette.is_dynamic,
                "rows": shape.rows,
                "cols": shape.cols,
                "keys": keys,
            })
        })
        .collect();

    json!({ "palettes": palettes, "problems": loaded.problems })
}

/// Execute the check command
fn run_check(config: &OskConfig, files: &PaletteFiles) -> ExitCode {
    let mut loaded = match load_registry(config, files) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let mut bindings = KeyBindings::new();
    let report = wire_all(&mut loaded.registry, &mut bindings, &());
    loaded.problems.extend(report.issues.iter().map(ToString::to_string));

    if let Some(start) = &config.palettes.start {
        if !loaded.registry.contains(start) {
            loaded.problems.push(format!("start palette '{}' is not registered", start));
        }
    }

    let label = if config.palettes.strict { "Error" } else { "Warning" };
    for problem in &loaded.problems {
        eprintln!("{}: {}", label, problem);
    }

    println!(
        "{} palettes, {} branch keys, {} back keys, {} problems",
        loaded.registry.len(),
        report.forward_bound,
        report.back_bound,
        loaded.problems.len()
    );

    if config.palettes.strict && !loaded.problems.is_empty() {
        ExitCode::from(EXIT_ERROR)
    } else {
        ExitCode::from(EXIT_SUCCESS)
    }
}

/// Execute the walk command
fn run_walk(config: &OskConfig, files: &PaletteFiles, presses: &[String]) -> ExitCode {
    let loaded = match load_registry(config, files) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };
    for problem in &loaded.problems {
        eprintln!("Warning: {}", problem);
    }

    let start = match config
        .palettes
        .start
        .clone()
        .or_else(|| loaded.registry.names().next().map(str::to_owned))
    {
        Some(start) => start,
        None => {
            eprintln!("Error: no palettes registered");
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let stack = NavigationStack::with_capacity(config.navigation.capacity);
    let mut session = Session::with_stack(loaded.registry, stack, TextRenderer::default());
    let container = KEYBOARD_CONTAINER.to_string();
    for issue in session.wire(&container).issues {
        eprintln!("Warning: {}", issue);
    }

    if let Err(e) = session.show(&start, &container) {
        eprintln!("Error: {}", e);
        return ExitCode::from(EXIT_INVALID_ARGS);
    }
    print_screen(&session);

    for key in presses {
        let current = session.current().unwrap_or(&start).to_string();
        if session.registry().get(&current).and_then(|p| p.key(key)).is_none() {
            eprintln!("Error: palette '{}' has no key '{}'", current, key);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }

        match session.activate(&current, key) {
            ActivationOutcome::Navigated { from, to } => println!("> {}: {} -> {}", key, from, to),
            ActivationOutcome::WentBack { to } => println!("> {}: back to {}", key, to),
            ActivationOutcome::NothingToReturnTo => {
                println!("> {}: nothing to return to, staying on {}", key, current)
            }
            ActivationOutcome::CapacityExceeded(e) => println!("> {}: {}", key, e),
            ActivationOutcome::Unbound => println!("> {}: no navigation", key),
        }
        print_screen(&session);
    }

    ExitCode::from(EXIT_SUCCESS)
}

fn print_screen(session: &Session<TextRenderer>) {
    if let Some(screen) = session.renderer().screen(KEYBOARD_CONTAINER) {
        print!("{}", screen);
    }
    let stack: Vec<&str> = session.stack().iter().collect();
    println!("stack: [{}]", stack.join(", "));
}
