//! ea-assess: Enterprise architecture maturity assessment tool
//!
//! Scores an answer-set against a layered EA taxonomy and reports maturity,
//! gaps and prioritized recommendations.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use ea_assess::{
    cli,
    config::{self, AppConfig, CONFIG_FILE_NAMES},
    pipeline::exit_codes,
    reports::{ReportFormat, ReportType},
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Build long version string with format support info
const fn build_long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        "\n\nReference Data:",
        "\n  Taxonomy, question bank, gap catalog (YAML or JSON; bundled defaults)",
        "\n\nOutput Formats:",
        "\n  summary, json, csv, markdown",
        "\n\nFeatures:",
        "\n  Layer maturity scoring, gap detection, priority bands, recommendations"
    )
}

#[derive(Parser)]
#[command(name = "ea-assess")]
#[command(version, long_version = build_long_version())]
#[command(about = "Enterprise architecture maturity assessment tool", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success
    1  Threshold failed (--fail-on-critical / --min-maturity)
    2  Validation failed
    3  Error occurred

EXAMPLES:
    # Record answers as you go
    ea-assess answer Q7.1 \"SSO with MFA for admins\"

    # Executive summary of the saved answers
    ea-assess assess

    # Export a spreadsheet-friendly report from an answers file
    ea-assess assess answers.json -O report.csv

    # Keep a baseline and compare against it later
    ea-assess snapshot save Baseline
    ea-assess snapshot compare 1

    # CI gate on critical gaps
    ea-assess assess answers.json -o json --fail-on-critical --min-maturity 2.5")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Answer store location (default: platform data directory)
    #[arg(long, global = true, env = "EA_ASSESS_STORE")]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

// ============================================================================
// Command argument structs
// ============================================================================

/// Reference data overrides shared by commands that load it
#[derive(clap::Args)]
struct ReferenceArgs {
    /// Taxonomy file (YAML or JSON)
    #[arg(long)]
    taxonomy: Option<PathBuf>,

    /// Question bank file (YAML or JSON)
    #[arg(long)]
    questions: Option<PathBuf>,

    /// Gap rule catalog file (YAML or JSON)
    #[arg(long)]
    gap_rules: Option<PathBuf>,
}

/// Arguments for the `assess` subcommand
#[derive(Parser)]
struct AssessArgs {
    /// Answers file (YAML or JSON); the saved answers when omitted
    answers: Option<PathBuf>,

    /// Output format (auto picks by output file extension, summary otherwise)
    #[arg(short, long, default_value = "auto")]
    output: ReportFormat,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Report sections to include
    #[arg(long, value_delimiter = ',', default_value = "all")]
    reports: Vec<ReportType>,

    /// Maximum items in list sections
    #[arg(long)]
    max_items: Option<usize>,

    /// Report title
    #[arg(long)]
    title: Option<String>,

    /// Exit with code 1 if any critical gap is detected
    #[arg(long)]
    fail_on_critical: bool,

    /// Exit with code 1 if overall maturity is below this score
    #[arg(long, value_parser = parse_maturity)]
    min_maturity: Option<f64>,

    #[command(flatten)]
    reference: ReferenceArgs,
}

/// Arguments for the `validate` subcommand
#[derive(Parser)]
struct ValidateArgs {
    /// Answers file to check; the saved answers when omitted
    answers: Option<PathBuf>,

    /// Output format (json or text)
    #[arg(short, long, default_value = "summary")]
    output: ReportFormat,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Exit with code 2 on warnings too
    #[arg(long)]
    fail_on_warning: bool,

    #[command(flatten)]
    reference: ReferenceArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Score answers and write a maturity and gap report
    Assess(AssessArgs),

    /// Record an answer in the saved answer-set
    Answer {
        /// Question ID, e.g. Q7.1
        question: String,

        /// Answer label exactly as listed in the question bank
        label: String,

        #[command(flatten)]
        reference: ReferenceArgs,
    },

    /// Discard the saved answer-set
    Reset,

    /// Save, restore and compare named snapshots of the answer-set
    Snapshot {
        #[command(subcommand)]
        action: SnapshotAction,
    },

    /// Check reference data and answers for authoring mistakes
    Validate(ValidateArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sub-subcommands for the `snapshot` command
#[derive(Subcommand)]
enum SnapshotAction {
    /// Save the current answers as a snapshot
    Save {
        /// Snapshot name
        #[arg(default_value = ea_assess::storage::DEFAULT_SNAPSHOT_NAME)]
        name: String,
    },
    /// List saved snapshots
    List,
    /// Replace the current answers with a snapshot
    Load {
        /// Snapshot number from `snapshot list`
        number: usize,
    },
    /// Delete a snapshot
    Delete {
        /// Snapshot number from `snapshot list`
        number: usize,
    },
    /// Compare layer maturity of two snapshots
    Compare {
        /// Earlier snapshot number
        before: usize,

        /// Later snapshot number; the current answers when omitted
        after: Option<usize>,

        #[command(flatten)]
        reference: ReferenceArgs,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example .ea-assess.yaml in the current directory
    Init,
    /// Generate JSON Schema for the config file format
    Schema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn parse_maturity(value: &str) -> Result<f64, String> {
    let score: f64 = value
        .parse()
        .map_err(|_| format!("'{value}' is not a number"))?;
    if (0.0..=5.0).contains(&score) {
        Ok(score)
    } else {
        Err(format!("maturity must be between 0.0 and 5.0, got {score}"))
    }
}

impl ReferenceArgs {
    fn apply(self, builder: config::AppConfigBuilder) -> config::AppConfigBuilder {
        builder
            .taxonomy(self.taxonomy)
            .questions(self.questions)
            .gap_rules(self.gap_rules)
    }
}

/// Layer CLI overrides over the discovered config file.
fn effective_config(cli_config: Option<&std::path::Path>, overrides: &AppConfig) -> AppConfig {
    let (config, loaded_from) = AppConfig::from_file_with_overrides(cli_config, overrides);
    if let Some(path) = loaded_from {
        tracing::debug!("Loaded config from {}", path.display());
    }
    config
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let code = run(cli).unwrap_or_else(|err| {
        eprintln!("Error: {err:#}");
        exit_codes::ERROR
    });
    if code != exit_codes::SUCCESS {
        std::process::exit(code);
    }
}

/// Dispatch to command handlers, returning the process exit code.
fn run(cli: Cli) -> Result<i32> {
    let base = AppConfig::builder()
        .no_color(cli.no_color)
        .quiet(cli.quiet)
        .autosave_path(cli.store);

    match cli.command {
        Commands::Assess(args) => {
            let overrides = args
                .reference
                .apply(base)
                .output_format(args.output)
                .output_file(args.output_file)
                .report_types(args.reports)
                .max_items(args.max_items)
                .title(args.title)
                .fail_on_critical(args.fail_on_critical)
                .min_maturity(args.min_maturity)
                .build();
            let config = effective_config(cli.config.as_deref(), &overrides);
            cli::run_assess(&config, args.answers.as_deref())
        }

        Commands::Answer {
            question,
            label,
            reference,
        } => {
            let overrides = reference.apply(base).build();
            let config = effective_config(cli.config.as_deref(), &overrides);
            cli::run_answer(&config, &question, &label)
        }

        Commands::Reset => {
            let config = effective_config(cli.config.as_deref(), &base.build());
            cli::run_reset(&config)
        }

        Commands::Snapshot { action } => match action {
            SnapshotAction::Save { name } => {
                let config = effective_config(cli.config.as_deref(), &base.build());
                cli::run_snapshot_save(&config, Some(&name))
            }
            SnapshotAction::List => {
                let config = effective_config(cli.config.as_deref(), &base.build());
                cli::run_snapshot_list(&config)
            }
            SnapshotAction::Load { number } => {
                let config = effective_config(cli.config.as_deref(), &base.build());
                cli::run_snapshot_load(&config, number)
            }
            SnapshotAction::Delete { number } => {
                let config = effective_config(cli.config.as_deref(), &base.build());
                cli::run_snapshot_delete(&config, number)
            }
            SnapshotAction::Compare {
                before,
                after,
                reference,
            } => {
                let config = effective_config(cli.config.as_deref(), &reference.apply(base).build());
                cli::run_snapshot_compare(&config, before, after)
            }
        },

        Commands::Validate(args) => {
            let overrides = args
                .reference
                .apply(base)
                .output_format(args.output)
                .output_file(args.output_file)
                .build();
            let config = effective_config(cli.config.as_deref(), &overrides);
            cli::run_validate(
                &config,
                args.answers.as_deref(),
                args.fail_on_warning,
            )
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "ea-assess", &mut io::stdout());
            Ok(exit_codes::SUCCESS)
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let (config, loaded_from) = config::load_or_default(cli.config.as_deref());
                if let Some(path) = &loaded_from {
                    eprintln!("# Loaded from: {}", path.display());
                } else {
                    eprintln!("# No config file found; showing defaults");
                }
                let yaml = serde_yaml::to_string(&config).context("failed to serialize config")?;
                print!("{yaml}");
                Ok(exit_codes::SUCCESS)
            }
            ConfigAction::Path => {
                let search_paths: [Option<String>; 3] = [
                    std::env::current_dir()
                        .ok()
                        .map(|p| p.display().to_string()),
                    dirs::config_dir().map(|p| p.join("ea-assess").display().to_string()),
                    dirs::home_dir().map(|p| p.display().to_string()),
                ];
                eprintln!("Config file search paths (in order):");
                for path in search_paths.into_iter().flatten() {
                    eprintln!("  {path}");
                }
                eprintln!();
                eprintln!("Recognized file names:");
                for name in CONFIG_FILE_NAMES {
                    eprintln!("  {name}");
                }
                eprintln!();
                match config::discover_config_file(cli.config.as_deref()) {
                    Some(path) => eprintln!("Active config file: {}", path.display()),
                    None => eprintln!("No config file found."),
                }
                Ok(exit_codes::SUCCESS)
            }
            ConfigAction::Init => {
                let target = std::env::current_dir()
                    .context("cannot determine current directory")?
                    .join(".ea-assess.yaml");
                if target.exists() {
                    anyhow::bail!(
                        "{} already exists. Remove it first to re-initialize.",
                        target.display()
                    );
                }
                let content = config::generate_full_example_config();
                std::fs::write(&target, content)
                    .with_context(|| format!("failed to write {}", target.display()))?;
                eprintln!("Created {}", target.display());
                Ok(exit_codes::SUCCESS)
            }
            ConfigAction::Schema { output } => {
                let schema = config::generate_json_schema().context("failed to generate schema")?;
                match output {
                    Some(path) => {
                        std::fs::write(&path, &schema)
                            .with_context(|| format!("failed to write {}", path.display()))?;
                        eprintln!("Schema written to {}", path.display());
                    }
                    None => {
                        println!("{schema}");
                    }
                }
                Ok(exit_codes::SUCCESS)
            }
        },
    }
}
