//! On-disk cache of the last exchange rate a live source returned.

use std::{
    fs, io,
    path::{Path, PathBuf},
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::{ExchangeRate, RateStatus};

const RATE_CACHE_FILENAME: &str = "rate_cache.json";

/// A cached rate older than this is ignored.
pub const RATE_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Error)]
pub enum CacheError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateCache {
    pub base: String,
    pub quote: String,
    pub rate: f64,
    /// Unix timestamp (seconds) when the rate was observed.
    pub cached_at: u64,
}

impl RateCache {
    pub fn from_rate(rate: &ExchangeRate) -> Self {
        let cached_at = rate
            .observed_at
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self {
            base: rate.base.clone(),
            quote: rate.quote.clone(),
            rate: rate.rate,
            cached_at,
        }
    }

    pub fn to_rate(&self) -> ExchangeRate {
        ExchangeRate {
            base: self.base.clone(),
            quote: self.quote.clone(),
            rate: self.rate,
            observed_at: UNIX_EPOCH + Duration::from_secs(self.cached_at),
            status: RateStatus::Cached,
        }
    }

    pub fn age(&self) -> Duration {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Duration::from_secs(now.saturating_sub(self.cached_at))
    }

    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.age() > ttl
    }

    pub fn age_string(&self) -> String {
        let secs = self.age().as_secs();
        if secs < 60 {
            format!("{secs}s")
        } else if secs < 3600 {
            format!("{}m", secs / 60)
        } else if secs < 86400 {
            format!("{}h", secs / 3600)
        } else {
            format!("{}d", secs / 86400)
        }
    }
}

/// Default location in the platform's local data directory.
pub fn default_rate_cache_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|base| base.join("arbitrage-desk").join(RATE_CACHE_FILENAME))
}

pub fn load_rate_cache(path: &Path) -> Option<RateCache> {
    if !path.exists() {
        debug!(path = %path.display(), "no rate cache on disk");
        return None;
    }

    match fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str(&content) {
            Ok(cache) => Some(cache),
            Err(e) => {
                warn!(error = %e, "failed to parse rate cache");
                None
            }
        },
        Err(e) => {
            warn!(error = %e, "failed to read rate cache");
            None
        }
    }
}

pub fn save_rate_cache(path: &Path, cache: &RateCache) -> Result<(), CacheError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(cache)?;
    fs::write(path, content)?;
    info!(
        rate = cache.rate,
        pair = %format!("{}/{}", cache.base, cache.quote),
        path = %path.display(),
        "saved rate cache"
    );
    Ok(())
}
