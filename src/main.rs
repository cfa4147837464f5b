use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use gitversion::config::{self, Config};
use gitversion::git::Git2Repository;
use gitversion::VersionResolver;

#[derive(clap::Parser)]
#[command(
    name = "gitversion",
    version,
    about = "Print a version string derived from the state of a git repository"
)]
struct Args {
    #[arg(default_value = ".", help = "Root of the git working copy")]
    path: String,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, help = "Prefix that marks version tags (default: v)")]
    prefix: Option<String>,

    #[arg(long, help = "Version to print when nothing else matches")]
    fallback_version: Option<String>,

    #[arg(long, help = "Environment variable holding the branch name on a detached HEAD")]
    branch_env_name: Option<String>,

    #[arg(long, help = "Do not read the branch name from the environment")]
    no_branch_env: bool,

    #[arg(
        long,
        allow_hyphen_values = true,
        help = "Postfix appended to versions derived from a branch name"
    )]
    postfix: Option<String>,

    #[arg(long, help = "Explain on stderr which rule produced the version")]
    explain: bool,

    #[arg(short, long, action = clap::ArgAction::Count, help = "Increase log verbosity")]
    verbose: u8,
}

impl Args {
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(prefix) = &self.prefix {
            config.version_prefix = prefix.clone();
        }
        if let Some(fallback_version) = &self.fallback_version {
            config.fallback_version = fallback_version.clone();
        }
        if let Some(env_name) = &self.branch_env_name {
            config.fallback_branch_name_env_name = env_name.clone();
        }
        if self.no_branch_env {
            config.fallback_to_branch_name_env = false;
        }
        if let Some(postfix) = &self.postfix {
            config.version_from_branch_name_postfix = postfix.clone();
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", style("ERROR:").red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let mut config = config::load_config(args.config.as_deref())?;
    args.apply_overrides(&mut config);

    let repo = Git2Repository::open(&args.path)?;
    let resolution = VersionResolver::new(&repo, &config)
        .resolve()
        .with_context(|| format!("Failed to determine version for '{}'", args.path))?;

    if args.explain {
        eprintln!("{} {}", style("→").yellow(), resolution);
    }

    println!("{}", resolution.version());
    Ok(())
}
