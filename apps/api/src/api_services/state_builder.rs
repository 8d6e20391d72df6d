use std::sync::Arc;

use himig_application::{
    Clock, GenerationService, RateLimitService, RateLimitStore, SystemClock, TrackLibraryService,
    TrackRepository,
};
use himig_core::AppError;
use himig_infrastructure::{
    InMemoryRateLimitStore, InMemoryTrackRepository, PostgresTrackRepository,
    RedisRateLimitStore, SimulatedMusicGenerator,
};
use tracing::{info, warn};

use crate::api_config::{ApiConfig, RateLimitStoreConfig};
use crate::state::AppState;

use super::database::connect_and_migrate;
use super::redis::build_redis_client;

const RATE_LIMIT_KEY_PREFIX: &str = "himig:rate_limit";

pub async fn build_app_state(config: &ApiConfig) -> Result<AppState, AppError> {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let rate_limit_service = RateLimitService::new(build_rate_limit_store(config)?, clock.clone());
    let track_repository = build_track_repository(config).await?;

    let generator = Arc::new(SimulatedMusicGenerator::new(
        config.generation_delay,
        config.generation_failure_rate,
    ));

    Ok(AppState {
        rate_limit_service,
        generation_service: GenerationService::new(generator, track_repository.clone(), clock),
        track_service: TrackLibraryService::new(track_repository),
        identity_header: config.identity_header.clone(),
    })
}

fn build_rate_limit_store(config: &ApiConfig) -> Result<Arc<dyn RateLimitStore>, AppError> {
    match config.rate_limit_store {
        RateLimitStoreConfig::InMemory => Ok(Arc::new(InMemoryRateLimitStore::new())),
        RateLimitStoreConfig::Redis => {
            let redis_url = config.redis_url.as_deref().ok_or_else(|| {
                AppError::Validation("REDIS_URL is required when RATE_LIMIT_STORE=redis".to_owned())
            })?;
            Ok(Arc::new(RedisRateLimitStore::new(
                build_redis_client(redis_url)?,
                RATE_LIMIT_KEY_PREFIX,
            )))
        }
    }
}

async fn build_track_repository(config: &ApiConfig) -> Result<Arc<dyn TrackRepository>, AppError> {
    match config.database_url.as_deref() {
        Some(database_url) => {
            let pool = connect_and_migrate(database_url).await?;
            info!("tracks are persisted in postgres");
            Ok(Arc::new(PostgresTrackRepository::new(pool)))
        }
        None => {
            warn!("DATABASE_URL is not set, tracks are kept in memory only");
            Ok(Arc::new(InMemoryTrackRepository::new()))
        }
    }
}
