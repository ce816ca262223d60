// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]
// Add other lints specific to this module that you want to allow but not auto-fix

use anyhow::Result;
use log::{LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::io::{IsTerminal, Write};
use std::path::PathBuf;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap::error::ErrorKind;
use clap_complete::{generate, Shell};

use chapterlate::app_config::{self, Config};
use chapterlate::app_controller::Controller;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions for chapterlate
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// chapterlate - batch chapter translation with AI
///
/// Fetches a JSON array of {title, content} items and translates a range of
/// them one by one with Google Gemini.
#[derive(Parser, Debug)]
#[command(name = "chapterlate")]
#[command(version)]
#[command(about = "Translate a range of JSON items with Gemini")]
#[command(args_conflicts_with_subcommands = true)]
#[command(long_about = "chapterlate fetches a JSON array of {title, content} items and translates each selected item with Google Gemini.

EXAMPLES:
    chapterlate https://example.com/vol1.json 1-10      # Translate items 1 to 10
    chapterlate https://example.com/vol1.json 7         # Translate item 7 only
    chapterlate ./vol1.json 5-                          # Local file, item 5
    chapterlate -m gemini-2.5-pro URL 1-3               # Use another model
    chapterlate completions bash > chapterlate.bash     # Generate bash completions

RANGES:
    Ranges are 1-based and inclusive. Out-of-bounds values are clamped, reversed
    ranges are swapped and unreadable numbers fall back to the first/last item.

CONFIGURATION:
    Configuration is stored in conf.json by default. If the config file doesn't
    exist, a default one will be created automatically. The API key is read from
    the config or from GEMINI_API_KEY / GOOGLE_API_KEY.

OUTPUT:
    Results are written to results/<name>_translated_<start>_<end>.json. Items the
    model could not translate keep their original content with translated=false.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// URL (or local path) of the JSON array to translate
    #[arg(value_name = "SOURCE_URL")]
    source_url: Option<String>,

    /// Item range, e.g. '3' or '2-10' (1-based, inclusive)
    #[arg(value_name = "RANGE", allow_hyphen_values = true)]
    range: Option<String>,

    /// Model name to use for translation
    #[arg(short, long)]
    model: Option<String>,

    /// Directory to write results to
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Hide the progress bar
    #[arg(long)]
    no_progress: bool,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Marker and ANSI color for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("✖", "1;31"),
            Level::Warn => ("!", "1;33"),
            Level::Info => (" ", "1;32"),
            Level::Debug => ("·", "1;36"),
            Level::Trace => ("…", "1;35"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (marker, color) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {} {}\x1B[0m",
                color, now, marker, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with the most verbose level any source may ask for;
    // the effective level is applied through set_max_level below
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "chapterlate", &mut std::io::stdout());
        return Ok(());
    }

    let (Some(source_url), Some(range)) = (cli.source_url.clone(), cli.range.clone()) else {
        CommandLineOptions::command()
            .error(ErrorKind::MissingRequiredArgument, "both <SOURCE_URL> and <RANGE> are required")
            .exit();
    };

    run_translate(cli, &source_url, &range).await
}

async fn run_translate(options: CommandLineOptions, source_url: &str, range: &str) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(config_log_level.to_level_filter());
    }

    // Load or create configuration
    let mut config = Config::load_or_create(&options.config_path)?;

    // Override config with CLI options if provided
    if let Some(model) = &options.model {
        config.translation.model = model.clone();
    }

    if let Some(output_dir) = &options.output_dir {
        config.output.results_dir = Some(output_dir.clone());
    }

    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    } else {
        // Just update the max level without reinitializing the logger
        log::set_max_level(config.log_level.to_level_filter());
    }

    let show_progress = !options.no_progress && std::io::stderr().is_terminal();
    let controller = Controller::with_config(config)?
        .with_progress(show_progress);

    // Counts go to stdout so they show whatever the log level
    let summary = controller.run(source_url, range).await?;
    println!("{}", summary);

    Ok(())
}
