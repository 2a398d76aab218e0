//! Expiration period encoding for the `expires` query parameter.

use crate::DEFAULT_EXPIRES;

/// Encodes a retention period in days as the service expects it.
///
/// Non-positive values fall back to [`DEFAULT_EXPIRES`]. Otherwise the
/// period is expressed in weeks, months (31 days) or years (365 days) when
/// it divides evenly, checked in that order, and in plain days when none
/// applies.
pub fn encode_expires(days: i64) -> String {
    if days < 1 {
        return DEFAULT_EXPIRES.to_string();
    }
    if days % 7 == 0 {
        return format!("{}w", days / 7);
    }
    if days % 31 == 0 {
        return format!("{}m", days / 31);
    }
    if days % 365 == 0 {
        return format!("{}y", days / 365);
    }
    days.to_string()
}
