// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{error, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::process::ExitCode;

use phrasecut::app_config::{self, Config, ConfigOverrides};
use phrasecut::app_controller::Controller;

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
    /// Split a text into phrases and translate each of them
    #[command(alias = "analyze")]
    Analise(AnaliseArgs),

    /// Generate shell completions for phrasecut
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct AnaliseArgs {
    /// Text to segment and translate
    #[arg(value_name = "TEXT")]
    text: String,

    /// Ollama generate endpoint [env: STARTER_GO_CLI_LLM_HOST] [default: http://localhost:11434/api/generate]
    #[arg(short = 'l', long)]
    llm_host: Option<String>,

    /// Target locale, e.g. 'en-US' [env: STARTER_GO_CLI_TRANSLATION_LANGUAGE] [default: en-US]
    #[arg(short = 't', long)]
    translation_language: Option<String>,

    /// Accept a segmentation answer with text around the JSON array
    #[arg(long)]
    lenient_json: bool,

    /// Do not draw a progress bar on stderr
    #[arg(long)]
    no_progress: bool,
}

/// phrasecut - split text into phrases and translate them with a local LLM
#[derive(Parser, Debug)]
#[command(name = "phrasecut")]
#[command(version)]
#[command(about = "Split text into phrases and translate each phrase with a local Ollama model")]
#[command(long_about = "phrasecut asks a local Ollama instance (model llama3) to divide a text into small,
grammatically coherent phrases, translates every phrase into the target locale, and prints
the (source, translation) pairs as a JSON array on stdout.

EXAMPLES:
    phrasecut analise \"Ich bin gerade total eingebunden bei der Arbeit.\"
    phrasecut analise -t pt-BR \"Hey, kannst du mir das Menü schicken?\"
    phrasecut analise -l http://gpu-box:11434/api/generate \"...\"
    phrasecut completions bash > phrasecut.bash")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Set logging level (logs go to stderr)
    #[arg(long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
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

    // @returns: ANSI colour and tag for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "ERROR"),
            Level::Warn => ("\x1B[1;33m", "WARN "),
            Level::Info => ("\x1B[1;32m", "INFO "),
            Level::Debug => ("\x1B[1;36m", "DEBUG"),
            Level::Trace => ("\x1B[1;35m", "TRACE"),
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
            let (colour, tag) = Self::style_for_level(record.level());

            // stdout is reserved for the JSON result
            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {} {}\x1B[0m", colour, now, tag, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // The logger accepts everything; the effective level is set via max_level
    if let Err(e) = CustomLogger::init(LevelFilter::Trace) {
        eprintln!("Failed to initialize logger: {}", e);
        return ExitCode::FAILURE;
    }

    let cli = CommandLineOptions::parse();

    let log_level: Option<app_config::LogLevel> = cli.log_level.map(Into::into);
    log::set_max_level(log_level.unwrap_or_default().to_level_filter());

    let outcome = match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "phrasecut", &mut std::io::stdout());
            Ok(())
        }
        Commands::Analise(args) => run_analise(args).await,
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run_analise(args: AnaliseArgs) -> Result<()> {
    let overrides = ConfigOverrides {
        llm_host: args.llm_host,
        translation_language: args.translation_language,
        lenient_json: args.lenient_json,
    };
    let config = Config::resolve(&overrides);

    let controller = Controller::with_config(config)?
        .with_progress(!args.no_progress);

    // Nothing reaches stdout unless every call succeeded
    let json = controller.run(&args.text).await?;
    println!("{}", json);

    Ok(())
}
