//! Command-line interface for the CapX caption timing tool.
//!
//! # Architecture
//!
//! The CLI is built using `clap` and follows a subcommand pattern:
//! - `generate` - produce a timed caption package from a script
//! - `config` - inspect the effective configuration
//! - `generate-completion` - shell completion script generation
//!
//! # Examples
//!
//! ```bash
//! # Captions for an existing recording, all formats
//! capx-cli generate --script episode.txt --audio episode.wav
//!
//! # Known duration, no audio on disk, named speakers
//! capx-cli generate --script demo.txt --duration 42.5 \
//!     --speaker 1=Alice --speaker 2=Bob --formats srt,vtt
//! ```

mod config_args;
mod generate_args;
mod generate_completion_args;
pub mod ui;

use clap::{Parser, Subcommand};
pub use config_args::ConfigArgs;
pub use generate_args::GenerateArgs;
pub use generate_completion_args::GenerateCompletionArgs;
pub use ui::{print_error, print_success, print_warning};

/// Main CLI application structure defining the top-level interface.
#[derive(Parser, Debug)]
#[command(name = "capx-cli")]
#[command(about = "Caption timing engine for multi-speaker dialogue scripts")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands for the CapX CLI application.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a timed caption package from a dialogue script
    Generate(GenerateArgs),

    /// Inspect the effective configuration
    Config(ConfigArgs),

    /// Generate shell completion scripts
    GenerateCompletion(GenerateCompletionArgs),
}

/// Executes the CapX CLI application with parsed arguments.
///
/// Routes parsed command-line arguments to their command handlers and
/// propagates a [`crate::Result`] for exit-code handling in `main`.
///
/// # Examples
///
/// ```rust
/// use capx_cli::cli::run;
///
/// # tokio_test::block_on(async {
/// // This would typically be called from main()
/// // run().await?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// # });
/// ```
pub async fn run() -> crate::Result<()> {
    let config_service = std::sync::Arc::new(crate::config::ProductionConfigService::new()?);
    run_with_config(config_service.as_ref()).await
}

/// Run the CLI with a provided configuration service.
///
/// This enables dependency injection of configuration services, making
/// command execution testable without touching the real config file or
/// environment.
pub async fn run_with_config(
    config_service: &dyn crate::config::ConfigService,
) -> crate::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate(args) => {
            args.validate()
                .map_err(crate::error::CapxError::CommandExecution)?;
            crate::commands::generate_command::execute(args, config_service).await?;
        }
        Commands::Config(args) => {
            crate::commands::config_command::execute(args, config_service)?;
        }
        Commands::GenerateCompletion(args) => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            let cmd_name = cmd.get_name().to_string();
            let mut stdout = std::io::stdout();
            clap_complete::generate(args.shell, &mut cmd, cmd_name, &mut stdout);
        }
    }
    Ok(())
}
