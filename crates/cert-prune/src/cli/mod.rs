pub mod report;

use cert_prune_lib::config::{DEFAULT_CERT_PATH, DEFAULT_RETENTION_DAYS};
use cert_prune_lib::{Config, LinkPolicy, Result};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cert-prune")]
#[command(about = "A utility to delete expired Let's Encrypt certificates")]
#[command(
    long_about = "A utility to delete expired Let's Encrypt certificates.\n\n\
All unused certificates, and (by default) all CSRs & keys older than 60 days are deleted.\n\n\
If no path is provided then /etc/letsencrypt is assumed."
)]
#[command(version)]
pub struct Cli {
    #[arg(help = "Let's Encrypt folder", default_value = DEFAULT_CERT_PATH)]
    pub path: PathBuf,

    #[arg(
        long,
        short = 'n',
        value_name = "DAYS",
        default_value_t = DEFAULT_RETENTION_DAYS,
        help = "Delete generation CSRs and keys older than DAYS days"
    )]
    pub nr_days: u32,

    #[arg(long, short = 'v', help = "Verbose logging")]
    pub verbose: bool,

    #[arg(
        long,
        help = "Ignore live certificates whose symlink cannot be resolved instead of aborting"
    )]
    pub skip_broken_links: bool,

    #[arg(long, help = "Print the summary as JSON")]
    pub json: bool,
}

impl Cli {
    pub fn config(&self) -> Config {
        let policy = if self.skip_broken_links {
            LinkPolicy::Skip
        } else {
            LinkPolicy::Abort
        };

        Config::new(Some(self.path.clone()))
            .with_retention_days(self.nr_days)
            .with_link_policy(policy)
    }
}

pub fn init_logger(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .format_target(false)
        .init();
}

pub fn run(cli: &Cli) -> Result<()> {
    let config = cli.config();
    let summary = cert_prune_lib::run(&config)?;

    if cli.json {
        report::print_json(&summary)
    } else {
        report::print_summary(&summary);
        Ok(())
    }
}
