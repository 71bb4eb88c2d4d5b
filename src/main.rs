//! hookguard CLI
//!
//! Entry point for the `hookguard` command-line tool.

use clap::{Parser, Subcommand};
use hookguard::config::{LintConfig, SettingsStore, HOOKS_KEY};
use hookguard::{
    escape_for_shell, generate_id, plan_dispatch, EffectiveHooks, EventKind, HooksConfiguration,
    HooksStore, PatternLibrary, Scope, ValidationReport, Validator,
};
use hookguard_lint::quote_for_shell;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hookguard")]
#[command(about = "Merge, validate and lint agent hook configurations", version)]
struct Cli {
    /// Project directory holding .claude/ (default: current directory)
    #[arg(long, short = 'p', global = true)]
    project: Option<PathBuf>,

    /// User settings file (default: ~/.claude/settings.json)
    #[arg(long, global = true)]
    user_settings: Option<PathBuf>,

    /// Lint config file (default: <project>/.claude/hookguard.toml)
    #[arg(long, global = true)]
    lint_config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the merged hooks of all three scopes
    Merge {
        /// Include provenance and digest
        #[arg(long)]
        effective: bool,

        /// Write to a file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Validate hooks of one scope, a file, or every scope
    Validate {
        /// Scope to validate (user, project, local)
        #[arg(long, conflicts_with = "file")]
        scope: Option<Scope>,

        /// Settings file or bare hooks document to validate
        #[arg(long)]
        file: Option<PathBuf>,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Check a single shell command against the heuristics
    Check {
        /// Output in JSON format
        #[arg(long)]
        json: bool,

        /// The command to check (after --)
        #[arg(last = true, required = true)]
        cmd: Vec<String>,
    },

    /// Escape a command for a double-quoted shell context
    Escape {
        /// Wrap the result in double quotes
        #[arg(long)]
        quoted: bool,

        command: String,
    },

    /// Generate identifiers
    Id {
        /// Number of identifiers
        #[arg(long, short = 'n', default_value_t = 1)]
        count: usize,
    },

    /// Show which commands would fire for an event
    Plan {
        /// Event kind (PreToolUse, PostToolUse, Notification, Stop, SubagentStop)
        #[arg(long, short = 'e')]
        event: EventKind,

        /// Tool name for matcher-bearing events
        #[arg(long, short = 't')]
        tool: Option<String>,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    initialize_tracing();

    let ctx = Context {
        project: cli.project,
        user_settings: cli.user_settings,
        lint_config: cli.lint_config,
    };

    match cli.command {
        Commands::Merge { effective, output } => run_merge(&ctx, effective, output),
        Commands::Validate { scope, file, json } => run_validate(&ctx, scope, file, json),
        Commands::Check { json, cmd } => run_check(&ctx, &cmd.join(" "), json),
        Commands::Escape { quoted, command } => {
            if quoted {
                println!("{}", quote_for_shell(&command));
            } else {
                println!("{}", escape_for_shell(&command));
            }
        }
        Commands::Id { count } => {
            for _ in 0..count {
                println!("{}", generate_id());
            }
        }
        Commands::Plan { event, tool, json } => run_plan(&ctx, event, tool.as_deref(), json),
    }
}

/// Log to stderr, filtered by HOOKGUARD_LOG (default: warn)
fn initialize_tracing() {
    let filter = EnvFilter::try_from_env("HOOKGUARD_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Global options shared by every subcommand
struct Context {
    project: Option<PathBuf>,
    user_settings: Option<PathBuf>,
    lint_config: Option<PathBuf>,
}

impl Context {
    fn project_root(&self) -> PathBuf {
        match &self.project {
            Some(p) => p.clone(),
            None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }

    fn store(&self) -> SettingsStore {
        let user_settings = match &self.user_settings {
            Some(p) => p.clone(),
            None => match SettingsStore::default_user_settings() {
                Ok(p) => p,
                Err(e) => {
                    eprintln!("Error: {} (use --user-settings)", e);
                    process::exit(1);
                }
            },
        };
        SettingsStore::new(user_settings, Some(self.project_root()))
    }

    fn library(&self) -> PatternLibrary {
        let path = self
            .lint_config
            .clone()
            .unwrap_or_else(|| LintConfig::default_path(&self.project_root()));

        let result = if self.lint_config.is_some() {
            LintConfig::from_file(&path)
        } else {
            LintConfig::load_optional(&path)
        };

        match result.and_then(|config| config.to_library()) {
            Ok(library) => library,
            Err(e) => {
                eprintln!("Error loading lint config {}: {}", path.display(), e);
                process::exit(1);
            }
        }
    }
}

fn run_merge(ctx: &Context, effective: bool, output: Option<PathBuf>) {
    let snapshot = match EffectiveHooks::load(&ctx.store()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let json = if effective {
        snapshot.to_json()
    } else {
        snapshot.hooks.to_json()
    };
    let json = match json {
        Ok(j) => j,
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            process::exit(1);
        }
    };

    match output {
        Some(path) => {
            if let Err(e) = fs::write(&path, format!("{}\n", json)) {
                eprintln!("Error writing {}: {}", path.display(), e);
                process::exit(1);
            }
            eprintln!("Wrote {}", path.display());
        }
        None => println!("{}", json),
    }
}

fn run_validate(ctx: &Context, scope: Option<Scope>, file: Option<PathBuf>, json: bool) {
    let validator = Validator::new(ctx.library());

    let targets: Vec<(String, HooksConfiguration)> = if let Some(path) = file {
        match load_hooks_file(&path) {
            Ok(config) => vec![(path.display().to_string(), config)],
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        }
    } else {
        let store = ctx.store();
        let scopes = match scope {
            Some(s) => vec![s],
            None => Scope::PRECEDENCE.to_vec(),
        };
        let mut targets = Vec::new();
        for s in scopes {
            match store.load(s) {
                Ok(config) => targets.push((s.to_string(), config)),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    process::exit(1);
                }
            }
        }
        targets
    };

    let reports: Vec<ValidationReport> = targets
        .into_iter()
        .map(|(source, config)| ValidationReport::new(source, validator.validate(&config)))
        .collect();
    let all_valid = reports.iter().all(|r| r.result.is_valid());

    if json {
        match serde_json::to_string_pretty(&reports) {
            Ok(j) => println!("{}", j),
            Err(e) => {
                eprintln!("Error serializing output: {}", e);
                process::exit(1);
            }
        }
    } else {
        let text: Vec<String> = reports.iter().map(|r| r.to_human()).collect();
        println!("{}", text.join("\n\n"));
    }

    if !all_valid {
        process::exit(1);
    }
}

/// Accepts a full settings file (hooks under "hooks") or a bare hooks document
fn load_hooks_file(path: &Path) -> Result<HooksConfiguration, String> {
    let contents =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    let mut value: Value = serde_json::from_str(&contents)
        .map_err(|e| format!("Invalid JSON in {}: {}", path.display(), e))?;

    let hooks = match value.get_mut(HOOKS_KEY) {
        Some(hooks) => hooks.take(),
        None => value,
    };
    serde_json::from_value(hooks).map_err(|e| format!("Invalid hooks in {}: {}", path.display(), e))
}

fn run_check(ctx: &Context, command: &str, json: bool) {
    let detections = Validator::new(ctx.library()).check_command(command);

    if json {
        let value = serde_json::json!({
            "command": command,
            "warnings": detections,
        });
        match serde_json::to_string_pretty(&value) {
            Ok(j) => println!("{}", j),
            Err(e) => {
                eprintln!("Error serializing output: {}", e);
                process::exit(1);
            }
        }
        return;
    }

    if detections.is_empty() {
        println!("No dangerous patterns detected.");
    } else {
        for d in &detections {
            println!("warning [{}]: {}", d.heuristic_id, d.message);
        }
    }
}

fn run_plan(ctx: &Context, event: EventKind, tool: Option<&str>, json: bool) {
    let snapshot = match EffectiveHooks::load(&ctx.store()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if event.is_matcher_bearing() && tool.is_none() {
        eprintln!("Error: --tool is required for {}", event);
        process::exit(2);
    }

    let planned = plan_dispatch(&snapshot.hooks, event, tool);

    if json {
        match serde_json::to_string_pretty(&planned) {
            Ok(j) => println!("{}", j),
            Err(e) => {
                eprintln!("Error serializing output: {}", e);
                process::exit(1);
            }
        }
        return;
    }

    if planned.is_empty() {
        println!("No hooks fire for {}.", event);
        return;
    }
    for p in &planned {
        match &p.pattern {
            Some(pattern) => println!("[{}] ({}s) {}", pattern, p.timeout_seconds, p.command),
            None => println!("({}s) {}", p.timeout_seconds, p.command),
        }
    }
}
