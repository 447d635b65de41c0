//! Geocodr CLI - address search and plugin configuration
//!
//! Runs searches through the Geocodr search plugin the same way a map host
//! would, and manages the options the plugin is initialized with.

mod config;
mod search;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use mapapp::{Extent, Plugin, Projection, ResultItem};
use mapapp_search_geocodr::{field_key, Geocodr, GeocodrOptions, SearchGeocodrPlugin};
use tracing_subscriber::EnvFilter;

use config::Config;
use search::SearchOutcome;

#[derive(Parser)]
#[command(name = "geocodr")]
#[command(about = "Geocodr CLI - address search and plugin configuration", long_about = None)]
#[command(version)]
struct Cli {
    /// Log requests and responses
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for an address
    Search {
        /// Search text
        query: String,
        /// City appended to the query (overrides config)
        #[arg(long)]
        city: Option<String>,
        /// State appended to the query (overrides config)
        #[arg(long)]
        state: Option<String>,
        /// Max results (overrides config)
        #[arg(short, long)]
        limit: Option<u32>,
        /// Print the result items as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show or change the stored plugin options
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },

    /// Print the plugin's default options
    Defaults,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show the effective configuration
    Show {
        /// Label language (de, en)
        #[arg(long)]
        lang: Option<String>,
    },
    /// Set an option (url, city, state, countrycode, key, limit, type, class, out_epsg, locale)
    Set {
        field: String,
        value: String,
    },
    /// Reset an option to its default (or "extent" to drop the bounding box)
    Unset {
        field: String,
    },
    /// Restrict results to a bounding box
    Extent {
        #[arg(allow_negative_numbers = true)]
        minx: f64,
        #[arg(allow_negative_numbers = true)]
        miny: f64,
        #[arg(allow_negative_numbers = true)]
        maxx: f64,
        #[arg(allow_negative_numbers = true)]
        maxy: f64,
        /// Projection of the coordinates, e.g. EPSG:25833
        #[arg(long, default_value = "EPSG:4326")]
        epsg: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Search { query, city, state, limit, json } => {
            cmd_search(query, city, state, limit, json).await
        }
        Commands::Config { action } => cmd_config(action.unwrap_or(ConfigAction::Show { lang: None })),
        Commands::Defaults => cmd_defaults(),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// ============================================
// Command Implementations
// ============================================

async fn cmd_search(
    query: String,
    city: Option<String>,
    state: Option<String>,
    limit: Option<u32>,
    json: bool,
) -> Result<()> {
    let config = Config::load()?;

    let mut options = config.effective_options();
    if city.is_some() {
        options.city = city;
    }
    if state.is_some() {
        options.state = state;
    }
    if limit.is_some() {
        options.limit = limit;
    }

    let items = match search::run(options, &query).await? {
        SearchOutcome::Found(items) => items,
        SearchOutcome::Cancelled => {
            eprintln!("{}", "Search cancelled".yellow());
            return Ok(());
        }
    };

    if json {
        let output = serde_json::to_string_pretty(&items).context("Failed to serialize results")?;
        println!("{}", output);
        return Ok(());
    }

    if items.is_empty() {
        println!("No results for '{}'", query);
        return Ok(());
    }

    println!(
        "{} results for '{}':",
        items.len().to_string().green(),
        query.cyan()
    );
    for item in &items {
        print_item(item);
    }

    Ok(())
}

fn print_item(item: &ResultItem) {
    let subtitle = item
        .info_view
        .subtitle()
        .map(|s| format!(" [{}]", s))
        .unwrap_or_default();
    println!("  {}{}", item.title.bold(), subtitle.dimmed());

    if let Some(geometry) = &item.feature.geometry {
        let position = geometry
            .first_position()
            .map(|p| {
                p.iter()
                    .map(|c| c.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_default();
        println!("    {} {}", geometry.kind().dimmed(), position);
    }
}

fn cmd_config(action: ConfigAction) -> Result<()> {
    let mut config = Config::load()?;

    match action {
        ConfigAction::Show { lang } => {
            let locale = lang.unwrap_or_else(|| config.locale().to_string());
            show_config(&config, &locale)
        }
        ConfigAction::Set { field, value } => {
            if field == "locale" {
                config.locale = Some(value.clone());
            } else {
                config.update_options(|options| Ok(options.set(&field, Some(value.clone()))?))?;
            }
            config.save()?;
            println!("{} {} set to '{}'", "✓".green(), field, value);
            Ok(())
        }
        ConfigAction::Unset { field } => {
            match field.as_str() {
                "locale" => config.locale = None,
                "extent" => config.update_options(|options| {
                    options.extent = None;
                    Ok(())
                })?,
                _ => config.update_options(|options| Ok(options.set(&field, None)?))?,
            }
            config.save()?;
            println!("{} {} reset", "✓".green(), field);
            Ok(())
        }
        ConfigAction::Extent { minx, miny, maxx, maxy, epsg } => {
            let projection: Projection = epsg.parse()?;
            let extent = Extent::new([minx, miny, maxx, maxy], projection)?;
            config.update_options(|options| {
                options.extent = Some(extent.to_options());
                Ok(())
            })?;
            config.save()?;

            let [x1, y1, x2, y2] = extent.coordinates_in_wgs84();
            println!(
                "{} Bounding box set ({})",
                "✓".green(),
                format!("{:.5}, {:.5}, {:.5}, {:.5} in WGS84", x1, y1, x2, y2).dimmed()
            );
            Ok(())
        }
    }
}

fn show_config(config: &Config, locale: &str) -> Result<()> {
    let provider = Geocodr::new(&config.effective_options())
        .context("Stored Geocodr options are invalid")?;
    let plugin = SearchGeocodrPlugin::new(GeocodrOptions::default());
    let i18n = plugin.i18n();
    let label = |field: &str| {
        let key = field_key(field);
        let text = i18n.translate(locale, &key);
        if text == key {
            field.to_string()
        } else {
            text.to_string()
        }
    };
    let current = provider.config();

    println!("{}", "Configuration:".bold());
    println!("  Path: {:?}", Config::config_path()?);
    println!("  {}: {}", label("url"), current.url);
    println!(
        "  {}: {}",
        label("city"),
        current.city.as_deref().unwrap_or("-").cyan()
    );
    println!(
        "  {}: {}",
        label("state"),
        current.state.as_deref().unwrap_or("-").cyan()
    );
    println!("  {}: {}", label("countrycode"), current.countrycode);
    println!("  {}: {}", label("limit"), current.limit);
    println!("  key: {}", mask_key(&current.key));
    println!("  type: {}", current.search_type);
    println!("  class: {}", current.result_class);
    println!("  out_epsg: {}", current.out_epsg);
    match &current.extent {
        Some(extent) => {
            let [x1, y1, x2, y2] = extent.coordinates();
            println!(
                "  {}: {}, {}, {}, {} ({})",
                label("extent"),
                x1,
                y1,
                x2,
                y2,
                extent.projection()
            );
        }
        None => println!("  {}: {}", label("extent"), "-".dimmed()),
    }

    let stored = serde_json::to_string(&provider.to_config())
        .context("Failed to serialize configuration")?;
    println!("\n{} {}", "Serialized:".bold(), stored.dimmed());

    Ok(())
}

/// Show only the last four characters of the access key
fn mask_key(key: &str) -> String {
    let count = key.chars().count();
    if count <= 4 {
        return "*".repeat(count);
    }
    let visible: String = key.chars().skip(count - 4).collect();
    format!("{}{}", "*".repeat(count - 4), visible)
}

fn cmd_defaults() -> Result<()> {
    let plugin = SearchGeocodrPlugin::new(GeocodrOptions::default());
    let defaults = serde_json::to_string_pretty(&plugin.get_default_options())
        .context("Failed to serialize default options")?;

    eprintln!(
        "{}",
        format!(
            "{} {} (map {})",
            plugin.name(),
            plugin.version(),
            plugin.map_version()
        )
        .dimmed()
    );
    println!("{}", defaults);

    Ok(())
}
