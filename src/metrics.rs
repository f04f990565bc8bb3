//! Metrics instrumentation for wildcard-dns.
//!
//! All metrics are prefixed with `wildcard_dns.`

use hickory_proto::rr::RecordType;
use metrics::{counter, histogram};
use std::time::Instant;

/// Label for a query type. Types without an answer path share `other` so
/// client-chosen qtypes cannot grow the label set.
pub fn record_type_label(rtype: RecordType) -> &'static str {
    match rtype {
        RecordType::A => "A",
        RecordType::AAAA => "AAAA",
        RecordType::TXT => "TXT",
        _ => "other",
    }
}

/// Record a handled DNS query.
pub fn record_query(rtype: RecordType, result: QueryResult, duration: std::time::Duration) {
    let record_type = record_type_label(rtype);
    let result_str = match result {
        QueryResult::Answered => "answered",
        QueryResult::NoData => "no_data",
    };

    counter!("wildcard_dns.query.count", "type" => record_type, "result" => result_str)
        .increment(1);
    histogram!("wildcard_dns.query.duration.seconds", "type" => record_type)
        .record(duration.as_secs_f64());
}

/// Query result type for metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryResult {
    /// One answer record was returned.
    Answered,
    /// The response carried no answers.
    NoData,
}

/// Record a datagram that was dropped without a reply.
pub fn record_dropped(reason: DropReason) {
    let reason_str = match reason {
        DropReason::Malformed => "malformed",
        DropReason::NoQuestion => "no_question",
    };

    counter!("wildcard_dns.datagram.dropped.count", "reason" => reason_str).increment(1);
}

/// Why a datagram got no reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// The bytes did not decode as a DNS message.
    Malformed,
    /// The message carried no question.
    NoQuestion,
}

/// Record a failed reply.
pub fn record_send_error() {
    counter!("wildcard_dns.response.send_error.count").increment(1);
}

/// Helper for timing operations.
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Start a new timer.
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Get elapsed duration since timer start.
    pub fn elapsed(&self) -> std::time::Duration {
        self.start.elapsed()
    }
}
