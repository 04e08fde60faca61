use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use rand::Rng;

use starfall::{
    config::ConfigLoader,
    web::{self, WebServerConfig},
};

#[derive(Debug, Parser)]
#[command(author, version, about = "Starfall arcade server")]
struct Cli {
    /// Path to the tuning profile YAML file
    #[arg(long, default_value = "configs/arcade.yaml")]
    config: PathBuf,

    /// Seed for the spawn RNG (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let loader = ConfigLoader::new(".");
    let game = loader.load(&cli.config)?;
    let seed = cli.seed.unwrap_or_else(|| rand::thread_rng().gen());

    println!(
        "Profile '{}' loaded ({}x{} play area, seed {})",
        game.name, game.width, game.height, seed
    );

    web::run(WebServerConfig {
        game,
        seed,
        host: cli.host,
        port: cli.port,
    })
    .await
}
