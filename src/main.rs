use care_rank::config::Settings;
use care_rank::core::{RankingError, Recommender};
use care_rank::models::{
    DoctorRecommendationRequest, ErrorResponse, HospitalRecommendationRequest, NearbyRequest,
    RecommendationResponse,
};
use care_rank::services::InMemoryCatalog;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Failures surfaced by the binary
#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Ranking(#[from] RankingError),

    #[error("Failed to serialize output: {0}")]
    Output(#[from] serde_json::Error),
}

impl CliError {
    fn response(&self) -> ErrorResponse {
        match self {
            CliError::Ranking(e) => ErrorResponse::from(e),
            CliError::Output(e) => ErrorResponse {
                error: "output_error".to_string(),
                message: e.to_string(),
                status_code: 500,
            },
        }
    }
}

/// Recommend hospitals and doctors from a provider directory
#[derive(Debug, Parser)]
#[command(name = "care-rank", version, about)]
struct Cli {
    /// Configuration file (defaults to config/default.toml + config/local.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rank hospitals around a location
    Hospitals {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        /// Search radius in km (defaults to ranking.default_max_distance_km)
        #[arg(long)]
        max_distance: Option<f64>,
        /// public, private, clinic or specialized
        #[arg(long = "type")]
        hospital_type: Option<String>,
        #[arg(long, default_value_t = 0.0)]
        min_rating: f64,
    },
    /// Rank doctors by specialty, affiliation and fee
    Doctors {
        /// Repeat for several specialties; a doctor needs any one of them
        #[arg(long = "specialty")]
        specialties: Vec<String>,
        /// Only doctors affiliated with this hospital id
        #[arg(long)]
        hospital: Option<u64>,
        #[arg(long, default_value_t = 0.0)]
        min_rating: f64,
        #[arg(long)]
        max_fee: Option<f64>,
    },
    /// List hospitals by distance only
    Nearby {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        /// Radius in km (defaults to ranking.nearby_radius_km)
        #[arg(long)]
        radius: Option<f64>,
        /// Return the K closest hospitals instead of a radius search
        /// (K defaults to ranking.nearest_k)
        #[arg(long, value_name = "K")]
        nearest: Option<Option<usize>>,
    },
}

fn main() -> ExitCode {
    // Load .env file if present
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    };
    let settings = match settings {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_logging(&settings);
    info!("Configuration loaded successfully");

    match run(cli.command, &settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Request failed: {}", e);
            let body = e.response();
            match serde_json::to_string_pretty(&body) {
                Ok(json) => eprintln!("{}", json),
                Err(_) => eprintln!("{}: {}", body.error, body.message),
            }
            ExitCode::FAILURE
        }
    }
}

fn init_logging(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true);

    match settings.logging.format.as_str() {
        "pretty" => subscriber.pretty().init(),
        "compact" => subscriber.compact().init(),
        _ => subscriber.json().init(),
    }
}

fn run(command: Command, settings: &Settings) -> Result<(), CliError> {
    let catalog = InMemoryCatalog::from_json_files(
        &settings.catalog.hospitals_path,
        &settings.catalog.doctors_path,
    )
    .map_err(RankingError::from)?;
    let recommender = Recommender::new(catalog);
    let max_results = settings.ranking.max_results;

    match command {
        Command::Hospitals { lat, lon, max_distance, hospital_type, min_rating } => {
            let criteria = HospitalRecommendationRequest {
                latitude: lat,
                longitude: lon,
                max_distance_km: max_distance.unwrap_or(settings.ranking.default_max_distance_km),
                hospital_type,
                min_rating,
            }
            .into_criteria()?;

            let ranked = recommender.recommend_hospitals(&criteria)?;
            info!("Returning {} hospital recommendations", ranked.len());
            print_json(&RecommendationResponse::new(ranked).truncated(max_results))
        }
        Command::Doctors { specialties, hospital, min_rating, max_fee } => {
            let criteria = DoctorRecommendationRequest {
                specialties,
                hospital,
                min_rating,
                max_fee,
            }
            .into_criteria()?;

            let ranked = recommender.recommend_doctors(&criteria)?;
            info!("Returning {} doctor recommendations", ranked.len());
            print_json(&RecommendationResponse::new(ranked).truncated(max_results))
        }
        Command::Nearby { lat, lon, radius, nearest } => {
            let request = NearbyRequest {
                latitude: lat,
                longitude: lon,
                radius_km: radius.unwrap_or(settings.ranking.nearby_radius_km),
                nearest: nearest.map(|k| k.unwrap_or(settings.ranking.nearest_k)),
            };
            let location = request.location()?;

            let listed = match request.nearest {
                Some(k) => recommender.nearest_hospitals(location, k)?,
                None => recommender.nearby_hospitals(location, request.radius_km)?,
            };
            info!("Returning {} nearby hospitals", listed.len());
            print_json(&RecommendationResponse::new(listed).truncated(max_results))
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
