use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::runtime::Runtime;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use docfold::cli::CommandContext;
use docfold::cli::commands::collect::CollectOptions;

#[derive(Parser)]
#[command(name = "docfold")]
#[command(
    version,
    about = "Collect per-module documentation configurations into one generator run"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, short, global = true, help = "Project root (default: current directory)")]
    project: Option<PathBuf>,

    #[arg(long, global = true)]
    verbose: bool,

    #[arg(long, short, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate module configurations and run the generator once
    Collect {
        #[arg(long = "module", short, help = "Module to include (repeatable)")]
        modules: Vec<String>,
        #[arg(long, short, help = "Output directory for the combined documentation")]
        output: Option<PathBuf>,
        #[arg(long = "task", help = "Per-module task to collect from (repeatable)")]
        tasks: Vec<String>,
        #[arg(long = "dry-run", help = "Show the merged configuration only, don't run")]
        dry_run: bool,
        #[arg(short = 'f', long, default_value = "text", help = "Output format: text, json")]
        format: String,
    },

    /// Build module configurations from each module's docfold.toml
    Configure {
        #[arg(long = "module", short, help = "Module to configure (default: all)")]
        modules: Vec<String>,
        #[arg(long, help = "Task name to write the configuration for")]
        task: Option<String>,
    },

    /// List modules and their configuration state
    Modules {
        #[arg(short = 'f', long, default_value = "text", help = "Output format: text, json")]
        format: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration (merged from all sources)
    Show {
        #[arg(short = 'g', long, help = "Show global config file only")]
        global: bool,
        #[arg(
            short = 'f',
            long,
            default_value = "text",
            help = "Output format: text, json"
        )]
        format: String,
    },
    /// Show configuration file paths
    Path,
    /// Initialize configuration
    Init {
        #[arg(long, short, help = "Initialize global config")]
        global: bool,
        #[arg(long, help = "Overwrite existing config")]
        force: bool,
    },
}

/// Set up panic handler for graceful error reporting
fn setup_panic_handler() {
    let default_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info| {
        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        eprintln!("\n\x1b[1;31m━━━ PANIC ━━━\x1b[0m");
        eprintln!("\x1b[31mdocfold encountered an unexpected error:\x1b[0m");
        eprintln!("  {}", message);

        if let Some(location) = panic_info.location() {
            eprintln!(
                "\x1b[90mLocation: {}:{}:{}\x1b[0m",
                location.file(),
                location.line(),
                location.column()
            );
        }
        eprintln!();

        // Call default hook for backtrace (if RUST_BACKTRACE=1)
        default_hook(panic_info);
    }));
}

fn main() -> ExitCode {
    setup_panic_handler();

    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError:\x1b[0m {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let project = cli.project.as_deref();

    match cli.command {
        Commands::Collect {
            modules,
            output,
            tasks,
            dry_run,
            format,
        } => {
            let ctx = CommandContext::load(project)?;
            let rt = Runtime::new()?;
            rt.block_on(docfold::cli::commands::collect::run(
                &ctx,
                CollectOptions {
                    modules,
                    output,
                    tasks,
                    dry_run,
                    json: format == "json",
                },
            ))?;
        }
        Commands::Configure { modules, task } => {
            let ctx = CommandContext::load(project)?;
            docfold::cli::commands::configure::run(&ctx, modules, task)?;
        }
        Commands::Modules { format } => {
            let ctx = CommandContext::load(project)?;
            docfold::cli::commands::modules::run(&ctx, &format)?;
        }
        Commands::Config { action } => {
            let root = match project {
                Some(path) => path.to_path_buf(),
                None => std::env::current_dir()?,
            };
            match action {
                ConfigAction::Show { global, format } => {
                    docfold::cli::commands::config::show(&root, global, &format)?;
                }
                ConfigAction::Path => {
                    docfold::cli::commands::config::path(&root)?;
                }
                ConfigAction::Init { global, force } => {
                    if global {
                        docfold::cli::commands::config::init_global(force)?;
                    } else {
                        docfold::cli::commands::config::init_project(&root, force)?;
                    }
                }
            }
        }
    }

    Ok(())
}
