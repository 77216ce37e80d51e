use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{error, info};

mod adapters;
mod config;
mod constants;
mod error;
mod extract;
mod infra;
mod logging;
mod pipeline;
mod snapshots;
mod types;

use crate::config::Config;
use crate::infra::crawl::ExaContentClient;
use crate::pipeline::{geo, merge, profile};

#[derive(Parser)]
#[command(name = "lbe_aggregator")]
#[command(about = "London location-based entertainment venue aggregator")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge provider snapshots into the master venue table
    Merge {
        /// Directory holding provider snapshot files
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,
        /// Master table output path (defaults to <data_dir>/london_lbe_master.csv)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Convert the master table into geo-filtered map data
    MapData {
        /// Directory holding the master table
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,
        /// Map data output path
        #[arg(long, default_value = "venue_data.json")]
        output: PathBuf,
    },
    /// Crawl a diverse venue sample and build enriched profiles
    Enrich {
        /// Directory holding provider snapshot files
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,
        /// Profile output directory (defaults to <data_dir>/venue_profiles)
        #[arg(long)]
        out_dir: Option<PathBuf>,
        /// Maximum number of venues to enrich
        #[arg(long, default_value_t = constants::DEFAULT_SAMPLE_SIZE)]
        sample_size: usize,
    },
    /// Run merge and map-data sequentially
    Run {
        /// Directory holding provider snapshot files
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,
        /// Map data output path
        #[arg(long, default_value = "venue_data.json")]
        output: PathBuf,
    },
}

fn master_csv_path(data_dir: &Path, output: Option<PathBuf>) -> PathBuf {
    output.unwrap_or_else(|| data_dir.join(constants::MASTER_CSV_NAME))
}

fn run_merge(data_dir: &Path, output: Option<PathBuf>) -> anyhow::Result<()> {
    let search = snapshots::load_search_snapshots(data_dir)?;
    let map = snapshots::load_map_snapshots(data_dir)?;
    let places = snapshots::load_places_snapshots(data_dir)?;
    info!(
        "Loaded snapshots: {} search, {} map, {} places",
        search.len(),
        map.len(),
        places.len()
    );

    let outcome = merge::merge_snapshots(&search, &map, &places);
    let out_path = master_csv_path(data_dir, output);
    merge::write_master_csv(&outcome.rows, &out_path)?;

    let summary = merge::summarize(&outcome.rows);
    println!(
        "\n📊 Wrote {} total rows -> {}",
        outcome.rows.len(),
        out_path.display()
    );
    if outcome.skipped > 0 {
        println!("   Skipped {} malformed items", outcome.skipped);
    }
    println!("\n   By source:");
    for (source, count) in &summary.by_source {
        println!("      {}: {}", source, count);
    }
    println!("   By category:");
    for (category, count) in &summary.by_category {
        println!("      {}: {}", category, count);
    }
    Ok(())
}

fn run_map_data(data_dir: &Path, output: &Path) -> anyhow::Result<()> {
    let csv_path = data_dir.join(constants::MASTER_CSV_NAME);
    let outcome = geo::convert_master_to_map_data(&csv_path, output)?;

    println!(
        "\n🗺️  Converted {} venues to {}",
        outcome.converted,
        output.display()
    );
    println!(
        "   Skipped {} venues without valid coordinates",
        outcome.skipped
    );
    println!("\n   Venues by category:");
    for (category, count) in &outcome.by_category {
        println!("      {}: {}", category, count);
    }
    Ok(())
}

async fn run_enrich(
    data_dir: &Path,
    out_dir: Option<PathBuf>,
    sample_size: usize,
) -> anyhow::Result<()> {
    let config = Config::load()?;
    let crawler = ExaContentClient::new(&config.crawl)?;

    let places = snapshots::load_places_snapshots(data_dir)?;
    let venues = snapshots::base_venues(&places);
    println!("🔍 Found {} venues with websites", venues.len());

    let out_dir = out_dir.unwrap_or_else(|| data_dir.join("venue_profiles"));
    let outcome = profile::run_enrichment(
        venues,
        sample_size,
        &config.crawl.subpage_hints,
        &crawler,
        &out_dir,
    )
    .await?;

    println!("\n✅ Enrichment complete");
    println!("   Profiles written: {}", outcome.profiles.len());
    println!("   Skipped (no content): {}", outcome.empty_content);
    println!("   Failed crawls: {}", outcome.failures);
    println!("   Output directory: {}", out_dir.display());
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize logging
    logging::init_logging();

    let cli = Cli::parse();

    match cli.command {
        Commands::Merge { data_dir, output } => {
            println!("🔄 Merging provider snapshots...");
            run_merge(&data_dir, output)?;
        }
        Commands::MapData { data_dir, output } => {
            println!("🗺️  Building map data...");
            run_map_data(&data_dir, &output)?;
        }
        Commands::Enrich {
            data_dir,
            out_dir,
            sample_size,
        } => {
            println!("🕷️  Enriching venue sample...");
            if let Err(e) = run_enrich(&data_dir, out_dir, sample_size).await {
                error!("Enrichment run failed: {}", e);
                println!("❌ Enrichment run failed: {}", e);
            }
        }
        Commands::Run { data_dir, output } => {
            println!("🚀 Running full aggregation (merge + map data)...");
            run_merge(&data_dir, None)?;
            run_map_data(&data_dir, &output)?;
            println!("✅ Full aggregation completed");
        }
    }
    Ok(())
}
