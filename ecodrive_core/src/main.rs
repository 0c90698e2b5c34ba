use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use ecodrive_core::{
    clock::{Clock, FixedClock, SystemClock},
    config::{SimulatorConfig, DEFAULT_FAILURE_PROBABILITY},
    connection::ConnectionSimulator,
    selector::TripSelector,
    StaticTripSource, TripSource,
};
use ecodrive_lib::date_input::parse_iso_date;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "EcoDriveCLI")]
#[command(about = "Browse the trip history and exercise the scanner simulator", long_about = None)]
struct Cli {
    /// Trip data file, instead of data/trips.json or the built-in trips
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the Monday-to-Sunday week around a date
    Week {
        /// YYYY-MM-DD, defaults to today
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
        /// Weeks to move, negative goes back
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        offset: i32,
    },
    /// List the trips of a day under their time headers
    Trips {
        #[arg(value_parser = parse_date)]
        date: NaiveDate,
    },
    /// Show one trip
    Trip { trip_id: String },
    /// Run connection attempts and count the outcomes
    Connect {
        #[arg(long, default_value_t = 1)]
        trials: usize,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value_t = 2000)]
        delay_ms: u64,
        #[arg(long, default_value_t = DEFAULT_FAILURE_PROBABILITY)]
        failure_probability: f64,
    },
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    parse_iso_date(value).ok_or_else(|| format!("expected YYYY-MM-DD, got {value:?}"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=trace", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let source = match &cli.data {
        Some(path) => StaticTripSource::load(path),
        None => StaticTripSource::load_default(),
    }
    .context("Failed to load trips")?;

    match cli.command {
        Commands::Week { date, offset } => {
            let clock: Arc<dyn Clock> = match date {
                Some(date) => Arc::new(FixedClock(date)),
                None => Arc::new(SystemClock),
            };
            let mut selector = TripSelector::new(Arc::new(source), clock);
            for _ in 0..offset.unsigned_abs() {
                if offset > 0 {
                    selector.go_to_next_week();
                } else {
                    selector.go_to_previous_week();
                }
            }

            for cell in selector.week_days() {
                println!(
                    "{} {} {}{}",
                    cell.date.format("%a"),
                    cell.date,
                    if cell.is_today { "*" } else { " " },
                    if cell.has_trips { " trips" } else { "" },
                );
            }
        }
        Commands::Trips { date } => {
            let mut selector = TripSelector::new(Arc::new(source), Arc::new(SystemClock));
            selector.select_date(date);

            if selector.trips().is_empty() {
                println!("No trips found for {date}");
                return Ok(());
            }

            for group in selector.time_groups() {
                println!("{}", group.time);
                for trip in group.trips {
                    println!("  [{}] {} {:.1} km {} EcoCoins", trip.id, trip.name, trip.distance_km, trip.eco_coins_label());
                }
            }
            println!("Day total: {} EcoCoins", selector.eco_coins_total());
        }
        Commands::Trip { trip_id } => {
            let Some((date, trip)) = source.find_trip(&trip_id) else {
                anyhow::bail!("No trip with id {trip_id:?}");
            };

            println!("{} ({} {})", trip.name, date, trip.time);
            println!("Distance:  {:.1} km", trip.distance_km);
            print_optional("Duration:", trip.duration_min.map(|min| format!("{min} min")));
            print_optional("Avg speed:", trip.avg_speed_kmh.map(|speed| format!("{speed:.0} km/h")));
            print_optional("Fuel:", trip.fuel_liters.map(|liters| format!("{liters:.1} L")));
            print_optional("Cost:", trip.cost_currency.clone());
            print_optional("Route:", trip.route.clone());
            print_optional("Notes:", trip.notes.clone());
            println!("EcoCoins:  {}", trip.eco_coins_label());
        }
        Commands::Connect { trials, seed, delay_ms, failure_probability } => {
            let config = SimulatorConfig::new(Duration::from_millis(delay_ms), failure_probability)?;
            let simulator = match seed {
                Some(seed) => ConnectionSimulator::seeded(config, seed)?,
                None => ConnectionSimulator::new(config)?,
            };

            let mut connected = 0;
            for _ in 0..trials {
                match simulator.toggle_connection().await {
                    Ok(true) => {
                        connected += 1;
                        simulator.disconnect();
                    }
                    Ok(false) => {}
                    Err(err) => tracing::warn!("{}", err),
                }
            }

            println!("{connected} connected, {} failed, status: {}", trials - connected, simulator.status_label());
        }
    }

    Ok(())
}

fn print_optional(label: &str, value: Option<String>) {
    println!("{:<10} {}", label, value.unwrap_or_else(|| "N/A".to_string()));
}
