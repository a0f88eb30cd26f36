use crate::config::Config;
use chrono::{DateTime, Utc};

use super::error::{ValidationError, ValidationKind};
use super::validate_condition;

// Both bounds are checked even though the oversight one can only fail when `oversight < expired_seconds`.
pub(super) fn validate_temporal_properties(
    timestamp: &str,
    config: &Config,
    now: &DateTime<Utc>,
) -> Result<DateTime<Utc>, ValidationError> {
    let signed_at: i64 = timestamp.parse().map_err(|_| ValidationKind::InvalidTimestamp)?;
    let now = now.timestamp();
    let expired_seconds = i64::try_from(config.expired_seconds).unwrap_or(i64::MAX);
    let oversight = i64::try_from(config.oversight).unwrap_or(i64::MAX);

    validate_condition(signed_at.saturating_add(expired_seconds) >= now, ValidationKind::Expired)?;
    validate_condition(signed_at >= now.saturating_sub(oversight), ValidationKind::OversightExceeded)?;
    DateTime::from_timestamp(signed_at, 0).ok_or_else(|| ValidationKind::InvalidTimestamp.into())
}
