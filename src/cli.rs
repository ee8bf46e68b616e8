//! Command-line arguments
//!
//! ```text
//! envdash [--config <path>] [<payload>]
//! ```
//!
//! `<payload>` is a reading such as `22.5,2048,350,65.2`. It is written to the
//! shared source, either for this instance to ingest or, when another
//! instance is active, for that one.

use std::path::PathBuf;

use clap::Parser;

use crate::config::CONFIG_ENV_VAR;

/// Parsed command line
#[derive(Parser, Debug, Clone, Default, PartialEq, Eq)]
#[command(
    name = "envdash",
    version,
    about = "Live dashboard for a four-channel environmental sensor"
)]
pub struct CliArgs {
    /// Configuration file
    #[arg(short, long, value_name = "PATH", env = CONFIG_ENV_VAR)]
    pub config: Option<PathBuf>,

    /// Reading to publish, e.g. 22.5,2048,350,65.2
    #[arg(allow_hyphen_values = true, value_name = "PAYLOAD")]
    pub payload: Option<String>,
}
