// src/cli/config_args.rs
use clap::Args;

/// Configuration inspection parameters.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Print the full effective configuration as TOML
    #[arg(long)]
    pub list: bool,

    /// Print a single configuration value by dotted key
    /// (e.g. "timing.words_per_minute")
    #[arg(long, value_name = "KEY", conflicts_with = "list")]
    pub get: Option<String>,
}
