use clap::{CommandFactory, Parser};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};

use llmedit::config::{self, InitStatus, Settings};
use llmedit::error::{LlmeditError, LlmeditResult};
use llmedit::file::{self, WritePlan};
use llmedit::llm::{self, SYSTEM_PROMPT};
use llmedit::logging::log_error;
use llmedit::prompt;

#[derive(Parser)]
#[command(author, version, about = "LLM-powered text file editor", long_about = None)]
struct Cli {
    /// Path to the input file
    input_file: Option<PathBuf>,

    /// Path to the output file. If provided, the input file will not be modified.
    #[arg(long)]
    outfile: Option<PathBuf>,

    /// Modify the input file in-place, skipping backup regardless of config
    #[arg(long)]
    inplace: bool,

    /// Initialize configuration in ~/.llm-editor/
    #[arg(long)]
    init_config: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    llmedit::init_logging();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(LlmeditError::ConfigNotFound { path }) => {
            println!("Configuration file not found: {}", path.display());
            println!("Please run 'llmedit --init-config' to generate a default configuration.");
            ExitCode::FAILURE
        }
        Err(err @ LlmeditError::ConfigInvalid { .. }) => {
            log_error(&err.to_string());
            println!("{}", err);
            println!("Failure. Check error.log for details.");
            ExitCode::FAILURE
        }
        Err(err) => {
            if err.is_critical() {
                log_error(&format!("CRITICAL: {}", err));
            } else {
                log_error(&err.to_string());
            }
            println!("Failure. Check error.log for details.");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> LlmeditResult<()> {
    if cli.init_config {
        return init_config();
    }

    let Some(input_path) = cli.input_file else {
        // No input file: show usage and exit cleanly.
        let _ = Cli::command().print_help();
        return Ok(());
    };

    let settings = Settings::load(None)?;
    settings.validate()?;

    let parsed = prompt::read_input(&input_path)?;
    if !parsed.has_instruction() {
        warn!(
            "No instruction found between '{}' and '{}' markers",
            prompt::START_MARKER,
            prompt::END_MARKER
        );
        log_error(&format!(
            "Warning: no instruction found between '{}' and '{}'.",
            prompt::START_MARKER,
            prompt::END_MARKER
        ));
    }

    let generator = llm::create_generator(&settings)?;
    let rewritten = generator
        .generate(SYSTEM_PROMPT, &parsed.instruction, &parsed.body)
        .await?;

    let plan = WritePlan::new(
        &input_path,
        cli.inplace,
        cli.outfile.as_deref(),
        settings.app.backup_enabled,
    );
    let outcome = file::apply(&plan, &input_path, &settings.app.backup_suffix, &rewritten)?;

    info!("Update of {} complete", outcome.target_path.display());
    match &outcome.backup_path {
        Some(backup) => println!(
            "Successful. Output: {}, Backup: {}",
            outcome.target_path.display(),
            backup.display()
        ),
        None => println!("Successful. Output: {}", outcome.target_path.display()),
    }

    Ok(())
}

fn init_config() -> LlmeditResult<()> {
    match config::init_default_config()? {
        InitStatus::Created(path) => {
            println!("Created default config at {}", path.display());
            println!("Please edit it to add your API key.");
        }
        InitStatus::AlreadyExists(path) => {
            println!("Config file already exists at {}", path.display());
        }
    }
    Ok(())
}
