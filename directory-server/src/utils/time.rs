//! Time helpers
//!
//! Date validation happens against the current UTC date; repository and
//! API layers exchange timestamps as `i64` Unix millis.

use chrono::{NaiveDate, Utc};

/// Current timestamp as Unix millis
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Current UTC date
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}
