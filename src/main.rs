//! ovh-ddns - keep OVH A records on the current public IP.

use clap::{Parser, Subcommand};
use ovh_ddns::config::{Config, UpdateTarget};
use ovh_ddns::resolver::IpResolver;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ovh-ddns")]
#[command(about = "Keep OVH DNS A records pointed at the current public IP")]
#[command(version)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Update all configured DNS records (default)
    Update,

    /// Write a sample configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Print the current public IP
    Ip,
}

fn get_config_path(cli_path: Option<PathBuf>) -> PathBuf {
    if let Some(path) = cli_path {
        return path;
    }

    let candidates = [
        dirs::config_dir().map(|p| p.join("ovh-ddns/config.toml")),
        Some(PathBuf::from("/etc/ovh-ddns/config.toml")),
        Some(PathBuf::from("config.toml")),
    ];

    for candidate in candidates.into_iter().flatten() {
        if candidate.exists() {
            return candidate;
        }
    }

    // Return default even if it doesn't exist
    Config::default_path().unwrap_or_else(|_| PathBuf::from("config.toml"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_path = get_config_path(cli.config);

    match cli.command.unwrap_or(Commands::Update) {
        Commands::Update => cmd_update(&config_path).await?,
        Commands::Init { force } => cmd_init(&config_path, force)?,
        Commands::Ip => cmd_ip(&config_path).await?,
    }

    Ok(())
}

async fn cmd_update(config_path: &Path) -> anyhow::Result<()> {
    let Some(config) = Config::load_from(config_path)? else {
        println!("No configuration found at {}.", config_path.display());
        write_sample(config_path)?;
        println!("Edit it with your OVH credentials and records, then run again.");
        return Ok(());
    };

    if config.records.is_empty() {
        println!("No records configured in {}.", config_path.display());
        return Ok(());
    }

    let report = ovh_ddns::run(&config).await?;

    println!("Public IP: {}", report.ip);
    for result in &report.updated {
        let target = UpdateTarget::new(&result.domain, &result.subdomain);
        println!("  {} (record {}): OK", target.fqdn(), result.record_id);
    }

    Ok(())
}

fn cmd_init(config_path: &Path, force: bool) -> anyhow::Result<()> {
    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        );
    }

    write_sample(config_path)
}

async fn cmd_ip(config_path: &Path) -> anyhow::Result<()> {
    let sources = Config::load_from(config_path)?
        .map(|config| config.ip_sources)
        .unwrap_or_default();

    let ip = IpResolver::new(&sources)?.resolve().await?;
    println!("{}", ip);

    Ok(())
}

fn write_sample(config_path: &Path) -> anyhow::Result<()> {
    Config::example().save_to(config_path)?;
    println!("Sample configuration written to {}", config_path.display());
    Ok(())
}
