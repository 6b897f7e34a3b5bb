//! Laminate demo — wrap a `Game` record in capability layers
//!
//! Usage:
//!   laminate --layers Lpis,BrainAreas
//!   laminate --layers Lpis,BrainAreas --combined
//!   laminate --config laminate.toml

use clap::Parser;
use laminate::config::LaminateConfig;
use laminate::demo::{self, Demo};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "laminate", about = "Wrap a Game record in capability layers")]
struct Cli {
    /// Path to config file (TOML). Defaults apply if it does not exist.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Dump default config as TOML and exit.
    #[arg(long)]
    dump_config: bool,

    /// List registered capability modules and exit.
    #[arg(long)]
    list: bool,

    /// Record id to load.
    #[arg(long)]
    id: Option<u64>,

    /// Capability modules to apply, in order (comma separated).
    #[arg(long, value_delimiter = ',')]
    layers: Option<Vec<String>>,

    /// Apply all modules as one combined layer.
    #[arg(long, default_value_t = false)]
    combined: bool,

    /// Let layers override methods the record already has.
    #[arg(long, default_value_t = false)]
    allow_overrides: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    if cli.dump_config {
        print!("{}", LaminateConfig::default().to_toml()?);
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => LaminateConfig::load(path)?,
        None => LaminateConfig::default(),
    };
    if let Some(id) = cli.id {
        config.demo.id = id;
    }
    if let Some(layers) = cli.layers {
        config.demo.layers = layers;
    }
    config.demo.combined |= cli.combined;
    config.layer.allow_overrides |= cli.allow_overrides;

    let demo = Demo::new()?;

    if cli.list {
        for name in demo.registry().list() {
            println!("{}", name);
        }
        return Ok(());
    }

    let game = demo.load(&config.demo, &config.layer)?;
    for line in demo::report(&game)? {
        println!("{}", line);
    }

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "laminate=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
