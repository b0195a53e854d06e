//! Project-specific utilities live here.

use time::OffsetDateTime;
use uuid::Uuid;

/// Fresh record identifier: a time-ordered UUIDv7 string.
pub fn new_id() -> String {
    Uuid::now_v7().to_string()
}

/// Current UTC time.
pub fn now() -> OffsetDateTime {
    OffsetDateTime::now_utc()
}
