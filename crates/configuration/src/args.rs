use std::path::PathBuf;

/// Command-line arguments shared by every subcommand that needs configuration.
#[derive(Debug, Clone, clap::Args)]
pub struct ConfigArgs {
    /// Path to the TOML configuration file.
    #[arg(long, short, default_value = "config.toml")]
    pub config: PathBuf,
}
