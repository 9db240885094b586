//! Search command - rank pool offers against a query

use crate::{checks, pool};
use chrono::{NaiveDate, Utc};
use clap::Args;
use owo_colors::OwoColorize;
use rideshare_cli::output::{format_count, format_duration, format_price, Status};
use rideshare_core::config::ConfigSchema;
use rideshare_core::validation::Validator;
use rideshare_core::{Error, ErrorCode, Result, ResultExt};
use rideshare_geo::{haversine_distance, Coordinate};
use rideshare_search::{
    DepartureDay, Filters, MissingCoordinates, Position, RideOffer, SearchEngine, SearchQuery,
    SortMode,
};
use rideshare_telemetry::Timer;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// Arguments for `ride-search search`
#[derive(Args, Debug, Default)]
pub struct SearchArgs {
    /// Pool snapshot (JSON array of ride offers)
    #[arg(short, long)]
    pub pool: Option<PathBuf>,

    /// Pickup location, e.g. "Springfield"
    #[arg(short, long, default_value = "")]
    pub from: String,

    /// Destination location, e.g. "Chicago"
    #[arg(short, long, default_value = "")]
    pub to: String,

    /// Maximum price per seat
    #[arg(long)]
    pub max_price: Option<f64>,

    /// Minimum available seats
    #[arg(long)]
    pub min_seats: Option<u32>,

    /// Number of passengers travelling (1-8)
    #[arg(short = 'n', long)]
    pub passengers: Option<u32>,

    /// Only rides with air conditioning
    #[arg(long)]
    pub ac: bool,

    /// Only rides with WiFi
    #[arg(long)]
    pub wifi: bool,

    /// Departure day: today, tomorrow, in-N-days
    #[arg(short, long)]
    pub date: Option<DepartureDay>,

    /// Sort order: distance, price, date (defaults to search.default_sort)
    #[arg(short, long)]
    pub sort: Option<SortMode>,

    /// Your latitude, for distance sorting
    #[arg(long, requires = "lng", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Your longitude, for distance sorting
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lng: Option<f64>,

    /// Show at most this many rides (defaults to search.max_results)
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Reject pools with missing or invalid records before searching
    #[arg(long)]
    pub strict: bool,
}

/// Run the search command
pub async fn run(args: SearchArgs, config: &ConfigSchema, json: bool) -> Result<()> {
    let path = pool::resolve_path(args.pool.as_deref(), &config.pool)?;
    let timeout = Duration::from_millis(config.pool.fetch_timeout_ms);
    let offers = pool::load(&path, timeout).await?;

    if args.strict {
        checks::check_pool(&offers)
            .to_result()
            .context(format!("Pool file: {}", path.display()))?;
    }

    let query = build_query(&args, config, Utc::now().date_naive())?;
    let engine = build_engine(config)?;

    let timer = Timer::start("search");
    let results = engine.search(&offers, &query);
    let elapsed = timer.stop();

    info!(
        pool = offers.len(),
        results = results.len(),
        sort = %query.sort_mode,
        elapsed_us = elapsed.as_micros() as u64,
        "Search complete"
    );

    let limit = args.limit.or(config.search.max_results).unwrap_or(usize::MAX);
    let shown = &results[..results.len().min(limit)];

    if json {
        print_json(shown, query.user_position.as_ref())
    } else {
        print_text(shown, results.len(), &query, elapsed);
        Ok(())
    }
}

/// Turn command-line input into a query, validating numeric fields.
pub fn build_query(args: &SearchArgs, config: &ConfigSchema, today: NaiveDate) -> Result<SearchQuery> {
    let mut validator = Validator::new();
    if let Some(max_price) = args.max_price {
        validator = validator.non_negative("max_price", max_price);
    }
    if let Some(passengers) = args.passengers {
        validator = validator.range("passengers", passengers, 1, 8);
    }
    validator.validate().to_result_with(ErrorCode::InvalidInput)?;

    let sort_mode = match args.sort {
        Some(mode) => mode,
        None => config
            .search
            .default_sort
            .parse::<SortMode>()
            .map_err(|e| Error::config(e.to_string()))?,
    };

    let filters = Filters {
        max_price: args.max_price,
        min_seats: args.min_seats,
        require_air_conditioning: args.ac,
        require_wifi: args.wifi,
        departure_date: args.date.map(|day| day.resolve(today)),
    };

    let mut query = SearchQuery::new(args.from.as_str(), args.to.as_str())
        .with_filters(filters)
        .with_sort_mode(sort_mode);

    if let (Some(lat), Some(lng)) = (args.lat, args.lng) {
        let position = Coordinate::try_new(lat, lng)
            .map_err(|e| Error::invalid_input("lat/lng", e.to_string()))?;
        query = query.with_user_position(position);
    }
    if let Some(passengers) = args.passengers {
        query = query.with_passengers(passengers);
    }

    Ok(query)
}

fn build_engine(config: &ConfigSchema) -> Result<SearchEngine> {
    let policy = config
        .search
        .missing_coordinates
        .parse::<MissingCoordinates>()
        .map_err(|e| Error::config(e.to_string()))?;
    Ok(SearchEngine::new().with_missing_coordinates(policy))
}

#[derive(Serialize)]
struct RideView<'a> {
    #[serde(flatten)]
    offer: &'a RideOffer,
    #[serde(rename = "distanceKm", skip_serializing_if = "Option::is_none")]
    distance_km: Option<f64>,
}

fn distance_to(offer: &RideOffer, position: Option<&Position>) -> Option<f64> {
    let pickup = offer.pickup_coordinate()?;
    position.map(|origin| haversine_distance(origin, &pickup))
}

fn print_json(results: &[&RideOffer], position: Option<&Position>) -> Result<()> {
    let views: Vec<RideView<'_>> = results
        .iter()
        .map(|&offer| RideView {
            offer,
            distance_km: distance_to(offer, position),
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&views)?);
    Ok(())
}

fn print_text(results: &[&RideOffer], total: usize, query: &SearchQuery, elapsed: Duration) {
    if total == 0 {
        Status::info("No rides found. Try adjusting your filters or search for different locations.");
        return;
    }

    Status::header(&format!(
        "{} found ({}, by {})",
        format_count(total, "ride", "rides"),
        format_duration(elapsed),
        query.sort_mode
    ));

    for offer in results {
        println!();
        println!("  {} {}", "●".magenta(), offer.pickup_location.bold());
        println!("  {} {}", "●".magenta(), offer.destination_location.bold());

        let mut details = vec![
            format!("{} per seat", format_price(offer.price_per_seat).bold()),
            offer.start_date_time.format("%a, %b %-d, %-I:%M %p").to_string(),
            format!("{} left", format_count(offer.available_seats as usize, "seat", "seats")),
        ];
        if offer.air_conditioning {
            details.push("AC".to_string());
        }
        if offer.wifi_available {
            details.push("WiFi".to_string());
        }
        if let Some(km) = distance_to(offer, query.user_position.as_ref()) {
            details.push(format!("{:.1} km away", km));
        }

        println!("    {}", details.join(" · ").dimmed());
    }

    if results.len() < total {
        println!();
        Status::info(&format!("Showing {} of {}", results.len(), total));
    }
}
