use biometrics::{Collector, Counter, Moments};

pub(crate) static CLIENT_REQUESTS: Counter = Counter::new("stellar.client.requests");
pub(crate) static CLIENT_REQUEST_ERRORS: Counter = Counter::new("stellar.client.request_errors");
pub(crate) static CLIENT_REQUEST_DURATION: Moments =
    Moments::new("stellar.client.request_duration_seconds");

pub(crate) static STREAM_BYTES: Counter = Counter::new("stellar.stream.bytes");
pub(crate) static STREAM_LINES: Counter = Counter::new("stellar.stream.lines");
pub(crate) static STREAM_PARSE_ERRORS: Counter = Counter::new("stellar.stream.parse_errors");
pub(crate) static STREAM_ERRORS: Counter = Counter::new("stellar.stream.errors");

pub(crate) static STORE_WRITES: Counter = Counter::new("stellar.store.writes");
pub(crate) static STORE_READS: Counter = Counter::new("stellar.store.reads");

/// Register this crate's biometrics with the provided collector.
pub fn register_biometrics(collector: Collector) {
    collector.register_counter(&CLIENT_REQUESTS);
    collector.register_counter(&CLIENT_REQUEST_ERRORS);
    collector.register_moments(&CLIENT_REQUEST_DURATION);

    collector.register_counter(&STREAM_BYTES);
    collector.register_counter(&STREAM_LINES);
    collector.register_counter(&STREAM_PARSE_ERRORS);
    collector.register_counter(&STREAM_ERRORS);

    collector.register_counter(&STORE_WRITES);
    collector.register_counter(&STORE_READS);
}
