use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use yatra::models::{Budget, Travelers, TripRequest};
use yatra::{ItineraryService, YatraConfig, logging, web};

#[derive(Debug, Parser)]
#[command(name = "yatra", version)]
#[command(about = "Travel itinerary planner backed by live geodata, weather and points of interest")]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true, env = "YATRA_CONFIG")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP API
    Serve {
        /// Port to listen on (overrides server.port)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Build one itinerary and print it as JSON
    Plan {
        #[arg(short, long)]
        destination: String,

        #[arg(long, default_value_t = 3)]
        days: u32,

        /// cheap, moderate or luxury
        #[arg(short, long, default_value = "moderate", value_parser = parse_budget)]
        budget: Budget,

        /// solo, couple, family or friends
        #[arg(short, long, default_value = "solo")]
        travelers: Travelers,
    },
}

fn parse_budget(value: &str) -> std::result::Result<Budget, String> {
    Ok(Budget::parse_lenient(value))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = YatraConfig::load_from_path(cli.config.clone())
        .context("Failed to load configuration")?;
    logging::init(&config.logging, cli.verbose);

    tracing::debug!("CLI arguments: {:?}", cli);

    match cli.command {
        Command::Serve { port } => {
            let port = port.unwrap_or(config.server.port);
            web::run(&config, port).await.context("Web server failed")?;
        }
        Command::Plan {
            destination,
            days,
            budget,
            travelers,
        } => {
            let request = TripRequest::new(destination, days, budget, travelers);
            if let Err(e) = request.validate() {
                eprintln!("❌ {}", e.user_message());
                std::process::exit(1);
            }

            let service = ItineraryService::from_config(&config)
                .context("Failed to initialise providers")?;
            let itinerary = service.get_itinerary(request).await;

            let rendered =
                serde_json::to_string_pretty(&itinerary).context("Failed to render itinerary")?;
            println!("{rendered}");
        }
    }

    Ok(())
}
