use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use colored::Colorize;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use prompt_optimizer_core::config::Config;
use prompt_optimizer_core::{
    compare, match_rule, optimize, require_credential, Category, CompletionClient, OptimizerError,
    Result,
};

mod args;
mod display;
use args::{Cli, Commands, ConfigAction, OutputFormat, Shell};

#[cfg(feature = "gui")]
mod gui;

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    let base_dir = resolve_base_dir(cli.base_dir);

    // Handle GUI flag
    #[cfg(feature = "gui")]
    if cli.gui {
        return match gui::run(&base_dir) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("{} {}", "[ERROR]".red().bold(), e);
                ExitCode::FAILURE
            }
        };
    }

    #[cfg(not(feature = "gui"))]
    if cli.gui {
        eprintln!(
            "{} GUI not available. Build with: cargo install --path crates/prompt-optimizer-cli --features gui",
            "[ERROR]".red().bold()
        );
        return ExitCode::FAILURE;
    }

    let result = match cli.command {
        Some(Commands::Classify { text }) => handle_classify(text, cli.verbose),
        Some(Commands::Optimize { text, format }) => handle_optimize(text, format),
        Some(Commands::Compare {
            text,
            api_key,
            model,
            format,
        }) => handle_compare(&base_dir, text, api_key, model, format),
        Some(Commands::Categories) => {
            display::print_categories();
            Ok(())
        }
        Some(Commands::Config { action }) => handle_config(action, &base_dir),
        Some(Commands::Completions { shell }) => {
            handle_completions(shell);
            Ok(())
        }
        None => {
            Cli::command().print_help().ok();
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "[ERROR]".red().bold(), e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "prompt_optimizer={level},prompt_optimizer_core={level}"
        ))
    });

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .without_time(),
        )
        .with(filter)
        .init();
}

fn handle_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let shell = match shell {
        Shell::Bash => clap_complete::Shell::Bash,
        Shell::Zsh => clap_complete::Shell::Zsh,
        Shell::Fish => clap_complete::Shell::Fish,
        Shell::PowerShell => clap_complete::Shell::PowerShell,
        Shell::Elvish => clap_complete::Shell::Elvish,
    };
    generate(shell, &mut cmd, "prompt-optimizer", &mut io::stdout());
}

fn resolve_base_dir(cli_base: Option<PathBuf>) -> PathBuf {
    if let Some(base) = cli_base {
        return base;
    }

    if let Ok(base) = std::env::var("PROMPT_OPTIMIZER_BASE") {
        return PathBuf::from(base);
    }

    dirs::home_dir()
        .map(|h| h.join(".prompt-optimizer"))
        .unwrap_or_else(|| PathBuf::from(".prompt-optimizer"))
}

/// Use the argument, or read stdin when it is absent or "-"
fn read_prompt(text: Option<String>) -> Result<String> {
    match text {
        Some(t) if t != "-" => Ok(t),
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf.trim_end_matches(['\r', '\n']).to_string())
        }
    }
}

fn handle_classify(text: Option<String>, verbose: bool) -> Result<()> {
    let text = read_prompt(text)?;

    match match_rule(&text) {
        Some(m) if verbose => println!(
            "{} {}",
            m.category,
            format!("(matched \"{}\")", m.trigger).dimmed()
        ),
        Some(m) => println!("{}", m.category),
        None => println!("{}", Category::General),
    }

    Ok(())
}

fn handle_optimize(text: Option<String>, format: OutputFormat) -> Result<()> {
    let text = read_prompt(text)?;
    let result = optimize(&text);

    match format {
        OutputFormat::Text => display::print_optimization(&result),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
    }

    Ok(())
}

fn handle_compare(
    base_dir: &Path,
    text: Option<String>,
    api_key: Option<String>,
    model: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let mut config = Config::load(base_dir)?;
    if let Some(model) = model {
        config.set("llm.model", &model)?;
    }

    let credential = api_key.or_else(|| config.llm.credential_from_env());
    // fail before touching stdin when there is nothing to authenticate with
    require_credential(credential.as_deref(), &config.llm.api_key_env)?;

    let text = read_prompt(text)?;
    debug!(model = %config.llm.model, endpoint = %config.llm.endpoint, "comparing prompts");

    let client = CompletionClient::new(&config.llm)?;
    let runtime = tokio::runtime::Runtime::new()?;
    let result = runtime.block_on(compare(&client, &text, credential.as_deref()))?;

    match format {
        OutputFormat::Text => display::print_comparison(&result, display::terminal_width()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
    }

    Ok(())
}

fn handle_config(action: ConfigAction, base_dir: &Path) -> Result<()> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load(base_dir)?;
            match config.get(&key) {
                Some(value) => {
                    println!("{}", value);
                }
                None => {
                    return Err(OptimizerError::ConfigKeyNotFound { key });
                }
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load(base_dir)?;
            config.set(&key, &value)?;
            config.save(base_dir)?;
            println!("{} {} = {}", "Set:".green(), key, value);
        }
        ConfigAction::List => {
            let config = Config::load(base_dir)?;
            println!();
            for (key, value) in config.list() {
                println!("{} = {}", key.cyan(), value);
            }
            println!();
        }
        ConfigAction::Path => {
            let path = Config::path(base_dir);
            println!("{}", path.display());
        }
        ConfigAction::Init => {
            let path = Config::init(base_dir)?;
            println!("{} {}", "Initialized:".green(), path.display());
        }
    }

    Ok(())
}
