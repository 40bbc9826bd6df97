//! CLI command definitions
//!
//! Defines the clap commands for the smoke-test CLI.

use clap::Subcommand;
use std::path::PathBuf;

use crate::testing::Suite;

#[derive(Subcommand)]
pub enum Commands {
    /// Run a smoke-test suite against the platform
    Run {
        /// Suite to run
        #[arg(long, value_enum, default_value_t = Suite::Standard)]
        suite: Suite,

        /// Config file (default: platform config dir)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Prefix of the credential variables (default: PURECLOUD)
        #[arg(long)]
        env_prefix: Option<String>,
    },

    /// List known regions, or resolve one environment domain
    Regions {
        /// Environment domain to resolve, e.g. mypurecloud.ie
        domain: Option<String>,
    },

    /// Request a client-credentials token and show its metadata
    Token {
        /// Config file (default: platform config dir)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Prefix of the credential variables (default: PURECLOUD)
        #[arg(long)]
        env_prefix: Option<String>,
    },
}
