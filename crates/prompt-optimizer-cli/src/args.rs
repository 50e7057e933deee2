use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "prompt-optimizer")]
#[command(about = "Classify, optimize and compare LLM prompts")]
#[command(version)]
pub struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet output (warnings and errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Base directory (default: ~/.prompt-optimizer)
    #[arg(long, global = true)]
    pub base_dir: Option<PathBuf>,

    /// Launch GUI (requires the gui feature)
    #[arg(long)]
    pub gui: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the category of a prompt
    Classify {
        /// Prompt text (reads stdin when omitted or "-")
        text: Option<String>,
    },

    /// Show the optimized prompt without calling the API
    Optimize {
        /// Prompt text (reads stdin when omitted or "-")
        text: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Send the original and optimized prompt to the API and compare replies
    Compare {
        /// Prompt text (reads stdin when omitted or "-")
        text: Option<String>,

        /// API key (default: value of the configured environment variable)
        #[arg(long, value_name = "KEY")]
        api_key: Option<String>,

        /// Override the configured model
        #[arg(short, long)]
        model: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// List categories with their trigger words and suffixes
    Categories,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g., llm.model)
        key: String,
    },

    /// Set a config value
    Set {
        /// Config key (e.g., llm.model)
        key: String,
        /// Value to set
        value: String,
    },

    /// List all config values
    List,

    /// Show config file path
    Path,

    /// Create config file with defaults
    Init,
}

#[cfg(test)]
mod tests {
    use super::*;

    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_compare() {
        let cli = Cli::try_parse_from([
            "prompt-optimizer",
            "compare",
            "Why now?",
            "--api-key",
            "sk-1",
            "--format",
            "json",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Compare {
                text,
                api_key,
                model,
                format,
            }) => {
                assert_eq!(text.as_deref(), Some("Why now?"));
                assert_eq!(api_key.as_deref(), Some("sk-1"));
                assert!(model.is_none());
                assert_eq!(format, OutputFormat::Json);
            }
            _ => panic!("expected compare"),
        }
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        let err = Cli::try_parse_from(["prompt-optimizer", "-v", "-q", "classify", "x"]);
        assert!(err.is_err());

        let cli = Cli::try_parse_from(["prompt-optimizer", "-q", "classify", "x"]).unwrap();
        assert!(cli.quiet);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_parse_classify_without_text() {
        let cli = Cli::try_parse_from(["prompt-optimizer", "-v", "classify"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Some(Commands::Classify { text: None })));
    }
}
