/// Store-assigned primary keys (`BIGSERIAL`).
pub type DbId = i64;

/// Creation instants are carried as epoch milliseconds, not timestamps.
pub type EpochMillis = i64;

/// Current wall-clock time in epoch milliseconds.
pub fn now_millis() -> EpochMillis {
    chrono::Utc::now().timestamp_millis()
}
