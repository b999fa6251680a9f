//! hs-poi - property point-of-interest enrichment
//!
//! `enrich` adds nearest-POI summary columns per category to a CSV of
//! property listings. `lookup` lists the nearest places around one address
//! or coordinate.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use hs_common::config::{
    load_toml_config, resolve_api_key, resolve_config_path, TomlConfig, CONFIG_PATH_ENV,
};
use hs_common::Coordinate;
use hs_poi::io::{default_output_path, write_json_report};
use hs_poi::models::{parse_categories, CategoryPreset, EnrichParameters};
use hs_poi::services::MapsConfig;
use hs_poi::workflow::{render_report, LookupTarget, DEFAULT_SHOWN};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command-line arguments for hs-poi
#[derive(Parser, Debug)]
#[command(name = "hs-poi")]
#[command(about = "Enrich property listings with nearby points of interest")]
#[command(version)]
struct Args {
    /// TOML config file
    #[arg(long, global = true, env = CONFIG_PATH_ENV)]
    config: Option<PathBuf>,

    /// Google Maps API key (overrides MAPS_API_KEY and the config file)
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Log level when RUST_LOG is unset (overrides the config file)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

/// Search options shared by both subcommands
#[derive(clap::Args, Debug)]
struct SearchArgs {
    /// Category to search, repeatable or comma separated
    #[arg(short = 'c', long = "category", value_delimiter = ',')]
    categories: Vec<String>,

    /// Named category set, used when no --category is given
    #[arg(long, value_enum)]
    preset: Option<CategoryPreset>,

    /// Search radius in meters
    #[arg(short, long)]
    radius: Option<u32>,

    /// Places kept per category (enrich) or in total (lookup)
    #[arg(long)]
    max_results: Option<usize>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Enrich a CSV of property listings
    Enrich {
        /// Input CSV with latitude/longitude or address columns
        input: PathBuf,

        /// Output CSV [default: <input stem>_with_pois.csv]
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        search: SearchArgs,

        /// Records sent to the Maps API before the rest pass through (0 = all)
        #[arg(long)]
        max_records: Option<usize>,

        /// Records processed concurrently
        #[arg(long)]
        concurrency: Option<usize>,

        /// Also write the full run as JSON
        #[arg(long)]
        json_report: Option<PathBuf>,

        /// Do not print the per-property report
        #[arg(short, long)]
        quiet: bool,
    },

    /// List the nearest places around one location
    Lookup {
        /// Address to geocode
        #[arg(long, conflicts_with_all = ["lat", "lng"])]
        address: Option<String>,

        #[arg(long, requires = "lng", allow_hyphen_values = true)]
        lat: Option<String>,

        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lng: Option<String>,

        #[command(flatten)]
        search: SearchArgs,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_path = resolve_config_path(args.config.as_deref());
    let toml_config = load_toml_config(config_path.as_deref())
        .context("Failed to load configuration")?;

    let level = args
        .log_level
        .clone()
        .unwrap_or_else(|| toml_config.logging.level.clone());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .init();

    info!(
        "Starting hs-poi v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    // Config was loaded before the subscriber existed, so report it here
    match &config_path {
        Some(path) if path.exists() => info!("Config file: {}", path.display()),
        Some(path) => info!("Config file {} not found, using defaults", path.display()),
        None => info!("No config file, using defaults"),
    }

    let api_key = resolve_api_key(args.api_key.as_deref(), &toml_config)?;
    let maps_config = MapsConfig::from_http_config(api_key, &toml_config.http);
    let pipeline = hs_poi::maps_pipeline(&maps_config).context("Failed to create Maps clients")?;

    match args.command {
        Command::Enrich {
            input,
            output,
            search,
            max_records,
            concurrency,
            json_report,
            quiet,
        } => {
            let mut params = search_parameters(&toml_config, &search)?;
            if let Some(max_records) = max_records {
                params.max_records = max_records;
            }
            if let Some(concurrency) = concurrency {
                params.concurrency = concurrency.max(1);
            }

            let output = output.unwrap_or_else(|| default_output_path(&input));
            let run = pipeline
                .enrich_file(&input, &output, &params)
                .await
                .with_context(|| format!("Failed to enrich {}", input.display()))?;

            if let Some(path) = json_report {
                write_json_report(&path, &run)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
            }

            if !quiet {
                print!("{}", render_report(&run, DEFAULT_SHOWN));
            }
            info!("Results saved to {}", output.display());
        }

        Command::Lookup {
            address,
            lat,
            lng,
            search,
        } => {
            let target = match (address, lat, lng) {
                (Some(address), _, _) => LookupTarget::Address(address),
                (None, Some(lat), Some(lng)) => LookupTarget::Coordinate(
                    Coordinate::parse(&lat, &lng).context("Invalid coordinates")?,
                ),
                _ => bail!("Either --address or both --lat and --lng are required"),
            };

            let params = search_parameters(&toml_config, &search)?;
            let result = pipeline.lookup(&target, &params).await?;

            println!("Searching near {} ({})", target, result.origin);
            if result.places.is_empty() {
                println!("No places found within {} m", params.radius_m);
            }
            for (i, nearby) in result.places.iter().enumerate() {
                let place = &nearby.place;
                println!("\n{}. {}", i + 1, place.name);
                println!("   Type: {}", nearby.category_title());
                println!("   Address: {}", place.vicinity);
                println!("   Distance: {} m", place.distance_display());
                println!("   Rating: {}", place.rating);
            }
        }
    }

    Ok(())
}

/// Merge CLI search options over the `[search]` config section
fn search_parameters(toml_config: &TomlConfig, search: &SearchArgs) -> Result<EnrichParameters> {
    let mut params = EnrichParameters::from_search_config(&toml_config.search)
        .context("Invalid [search] configuration")?;

    if !search.categories.is_empty() {
        params.categories = parse_categories(&search.categories).context("Invalid --category")?;
    } else if let Some(preset) = search.preset {
        params.categories = preset.categories();
    }
    if let Some(radius) = search.radius {
        params.radius_m = radius;
    }
    if let Some(max_results) = search.max_results {
        params.max_results = max_results;
    }

    Ok(params)
}
