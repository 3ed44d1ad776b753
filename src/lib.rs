pub mod config;
pub mod observability;
pub mod planner;

pub use config::Config;
pub use planner::*;

use mealweek_store::FileStore;
use time::{Duration, OffsetDateTime};

/// Opens the planner on the configured storage directory at the current instant.
pub fn create_planner(config: &Config) -> anyhow::Result<Planner<FileStore>> {
    let store = FileStore::open(&config.storage.dir)?;
    let mut planner = Planner::new(store, OffsetDateTime::now_utc())
        .with_weights(config.scoring)
        .with_calendar(config.calendar.clone());

    if let Some(authenticator) = config.session.authenticator().map_err(|e| anyhow::anyhow!(e))? {
        let ttl = Duration::days(config.session.ttl_days);
        planner = planner.with_authenticator(authenticator, ttl);
    }

    Ok(planner)
}
