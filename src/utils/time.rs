use std::sync::atomic::{AtomicI64, Ordering};

use time::OffsetDateTime;

/// Returns the current time as epoch milliseconds.
pub fn now_millis() -> i64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
}

static LAST_ID: AtomicI64 = AtomicI64::new(0);

/// Mints an identifier from the millisecond clock.
///
/// Two calls in the same millisecond must not produce the same value, or
/// upsert-by-id in the store would silently merge records. When the clock has
/// not advanced past the last minted value, the next value up is used instead.
pub fn next_id_millis() -> i64 {
    let now = now_millis();
    let mut prev = LAST_ID.load(Ordering::Relaxed);
    loop {
        let next = if now > prev { now } else { prev + 1 };
        match LAST_ID.compare_exchange_weak(prev, next, Ordering::Relaxed, Ordering::Relaxed) {
            Ok(_) => return next,
            Err(observed) => prev = observed,
        }
    }
}
