pub mod meal;
pub mod post;
pub mod preference;
pub mod profile;
pub mod user;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::ApiServiceError;

/// Parse a required user id supplied as a request field.
pub(crate) fn require_user_id(raw: Option<&str>) -> Result<Uuid, ApiServiceError> {
    raw.and_then(|s| Uuid::parse_str(s.trim()).ok())
        .ok_or(ApiServiceError::MissingData)
}

/// Parse an optional calories field. Non-numeric or negative input is
/// rejected, never coerced to zero. Empty form values count as absent.
pub(crate) fn parse_calories(raw: Option<&str>) -> Result<Option<i32>, ApiServiceError> {
    let Some(s) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    let calories: i32 = s.parse().map_err(|_| ApiServiceError::InvalidCalories)?;
    if calories < 0 {
        return Err(ApiServiceError::InvalidCalories);
    }
    Ok(Some(calories))
}

/// Parse an optional RFC 3339 datetime field. Empty form values count as
/// absent.
pub(crate) fn parse_datetime(raw: Option<&str>) -> Result<Option<DateTime<Utc>>, ApiServiceError> {
    let Some(s) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    DateTime::parse_from_rfc3339(s)
        .map(|dt| Some(dt.with_timezone(&Utc)))
        .map_err(|_| ApiServiceError::InvalidDatetime)
}
