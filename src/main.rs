use anyhow::Context;
use api_research::{config::Config, menu::Menu, probe::EndpointProbe};
use clap::Parser;
use std::io;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "api-research")]
#[command(about = "Discover API endpoints from captured HTTP traffic")]
struct Cli {
    #[arg(short, long, help = "Configuration file path")]
    config: Option<PathBuf>,

    #[arg(long, value_name = "PATH", help = "Write the default configuration and exit")]
    init_config: Option<PathBuf>,

    #[arg(short, long, help = "Enable debug logging")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    if cli.debug {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Debug)
            .parse_default_env()
            .init();
    }

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    if let Some(path) = cli.init_config {
        Config::default().save_to_file(&path)?;
        println!("Default configuration written to {}", path.display());
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::default(),
    };
    log::debug!("Using configuration {:?}", config);

    let probe = EndpointProbe::from_config(&config).context("Cannot set up HTTP client")?;

    let stdin = io::stdin();
    let mut menu = Menu::new(config, probe, stdin.lock(), io::stdout());
    menu.run()
}
