//! CLI command handling
//!
//! Dispatches CLI commands and formats their output.

use std::path::PathBuf;

use colored::Colorize;

use crate::client::{Region, RegionHost};
use crate::commands::Commands;
use crate::common::{mask_secret, Config, Error, Result};
use crate::testing::{run_suite, Session};

/// Dispatch a CLI command
pub async fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Run {
            suite,
            config,
            env_prefix,
        } => {
            let config = load_config(config, env_prefix)?;
            let mut session = Session::from_process_env(config);

            let report = run_suite(suite, &mut session).await;

            match report.first_broken() {
                None => Ok(()),
                Some(broken) => Err(Error::SuiteFailed {
                    suite: report.suite.clone(),
                    case: broken.name.clone(),
                }),
            }
        }

        Commands::Regions { domain } => {
            match domain {
                Some(domain) => print_resolved(&Region::resolve(&domain)),
                None => print_regions(),
            }
            Ok(())
        }

        Commands::Token { config, env_prefix } => {
            let config = load_config(config, env_prefix)?;
            let mut session = Session::from_process_env(config);

            let credentials = session.credentials()?;
            let hosts = session.resolve_hosts(&credentials.environment);
            let mut client = session.client_builder(&hosts).build()?;
            let auth = client
                .get_client_credentials_token(&credentials.client_id, &credentials.client_secret)
                .await?;

            println!("{} token issued by {}", "✓".green(), client.login_base());
            println!("  access_token: {}", mask_secret(&auth.access_token));
            println!("  token_type:   {}", auth.token_type.as_deref().unwrap_or("unknown"));
            match auth.expires_in {
                Some(secs) => println!("  expires_in:   {secs}s"),
                None => println!("  expires_in:   unknown"),
            }
            Ok(())
        }
    }
}

fn load_config(path: Option<PathBuf>, env_prefix: Option<String>) -> Result<Config> {
    let mut config = Config::load(path.as_deref())?;
    if let Some(prefix) = env_prefix {
        config.env_prefix = prefix;
    }
    tracing::debug!(?config, "configuration loaded");
    Ok(config)
}

fn print_regions() {
    println!("{:<16} {:<26} {}", "REGION".bold(), "DOMAIN".bold(), "API HOST".bold());
    for host in RegionHost::ALL {
        println!("{:<16} {:<26} {}", host.name(), host.domain(), host.api_host());
    }
}

fn print_resolved(region: &Region) {
    match region {
        Region::Known(host) => println!("{} {}", "Region:".cyan(), host.name()),
        Region::Unmapped(domain) => println!(
            "{} {} {}",
            "Region:".cyan(),
            domain,
            "(not a known region, hosts built from the domain)".dimmed()
        ),
    }
    println!("  api:   {}", region.api_host());
    println!("  login: {}", region.login_host());
}
