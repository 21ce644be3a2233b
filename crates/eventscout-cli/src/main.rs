use clap::{Args, Parser, Subcommand};
use eventscout_discovery::{geohash, ClientSettings, DiscoveryClient};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "eventscout")]
#[command(about = "Search nearby events by location and keyword")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search for events and print one JSON object per line.
    Search {
        #[command(flatten)]
        location: Location,
        /// Free-text keyword; the configured default is used when omitted.
        #[arg(long)]
        keyword: Option<String>,
        /// Override the configured search radius.
        #[arg(long)]
        radius: Option<u32>,
    },
    /// Print the request URL a search would send (includes the API key).
    Url {
        #[command(flatten)]
        location: Location,
        #[arg(long)]
        keyword: Option<String>,
    },
    /// Print the geohash for a coordinate.
    Geohash {
        #[command(flatten)]
        location: Location,
        #[arg(long, default_value_t = 8)]
        precision: usize,
    },
}

#[derive(Debug, Args)]
struct Location {
    #[arg(long, default_value_t = 37.38, allow_negative_numbers = true)]
    lat: f64,
    #[arg(long, default_value_t = -122.08, allow_negative_numbers = true)]
    lon: f64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Search {
            location,
            keyword,
            radius,
        } => {
            let mut settings = load_settings()?;
            if let Some(radius) = radius {
                settings.query.radius = radius;
            }
            let client = DiscoveryClient::new(settings)?;
            let items = client
                .search(location.lat, location.lon, keyword.as_deref())
                .await?;
            tracing::info!(count = items.len(), "search complete");
            for item in &items {
                println!("{}", serde_json::to_string(item)?);
            }
        }
        Commands::Url { location, keyword } => {
            let client = DiscoveryClient::new(load_settings()?)?;
            println!(
                "{}",
                client.search_url(location.lat, location.lon, keyword.as_deref())?
            );
        }
        Commands::Geohash {
            location,
            precision,
        } => {
            println!("{}", geohash::encode(location.lat, location.lon, precision)?);
        }
    }

    Ok(())
}

/// Loads configuration from the environment and installs the tracing
/// subscriber. Logs go to stderr so stdout stays machine-readable.
fn load_settings() -> anyhow::Result<ClientSettings> {
    dotenvy::dotenv().ok();
    let config = eventscout_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(?config, "configuration loaded");
    Ok(ClientSettings::from_app_config(&config))
}
