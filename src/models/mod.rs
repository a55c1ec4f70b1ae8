pub mod comment;
pub mod task;
pub mod user;

pub use comment::*;
pub use task::*;
pub use user::*;

use chrono::{DateTime, Utc};
use mongodb::bson::DateTime as BsonDateTime;

/// Current time as stored in `createdAt` fields (BSON Date)
pub fn now() -> BsonDateTime {
    BsonDateTime::now()
}

/// Fallback for records written without a `createdAt`
pub fn epoch() -> BsonDateTime {
    BsonDateTime::from_millis(0)
}

pub fn to_utc(date: BsonDateTime) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(date.timestamp_millis()).unwrap_or_default()
}
