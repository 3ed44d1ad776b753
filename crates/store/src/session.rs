use mealweek_shared::{Error, Result};
use time::{Duration, OffsetDateTime};

use crate::KeyValue;

pub const SESSION_KEY: &str = "auth_expiry_v1";

/// Login state as a single expiry instant, stored in unix milliseconds.
pub struct SessionGate<K> {
    kv: K,
}

impl<K: KeyValue> SessionGate<K> {
    pub fn new(kv: K) -> Self {
        Self { kv }
    }

    pub fn expires_at(&self) -> Result<Option<OffsetDateTime>> {
        let Some(raw) = self.kv.get(SESSION_KEY)? else {
            return Ok(None);
        };

        let millis = raw
            .trim()
            .parse::<i64>()
            .map_err(|e| Error::Storage(format!("{SESSION_KEY}: {e}")))?;

        OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * 1_000_000)
            .map(Some)
            .map_err(|e| Error::Storage(format!("{SESSION_KEY}: {e}")))
    }

    pub fn is_valid(&self, now: OffsetDateTime) -> Result<bool> {
        Ok(self.expires_at()?.is_some_and(|expiry| now < expiry))
    }

    pub fn grant(&self, now: OffsetDateTime, ttl: Duration) -> Result<OffsetDateTime> {
        let expiry = now
            .checked_add(ttl)
            .ok_or_else(|| Error::Server("session expiry overflows".to_owned()))?;
        let millis = expiry.unix_timestamp_nanos() / 1_000_000;

        self.kv.set(SESSION_KEY, &millis.to_string())?;
        tracing::info!(%expiry, "session granted");

        Ok(expiry)
    }

    pub fn revoke(&self) -> Result<()> {
        self.kv.remove(SESSION_KEY)
    }
}
