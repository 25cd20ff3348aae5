//! Reference number policies for stock movement batches.
//!
//! Inbound batches arrive with a client-proposed `REF-######` number that is
//! validated and persisted verbatim; the storage layer's unique index is what
//! rejects duplicates. Outbound batches either copy their originating order
//! id or draw an `ADJ-<YYYYMMDD>-<seq>` number from a process-wide monotonic
//! sequence.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use rand::Rng;
use regex::Regex;
use std::sync::atomic::{AtomicU64, Ordering};

static INBOUND_REF_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^REF-\d{6}$").expect("invalid inbound reference pattern"));

static ADJUSTMENT_REF_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^ADJ-\d{8}-(\d+)$").expect("invalid adjustment reference pattern"));

/// Checks that a client-proposed inbound reference number has the
/// `REF-######` shape.
pub fn is_valid_inbound(reference: &str) -> bool {
    INBOUND_REF_PATTERN.is_match(reference)
}

/// Generates a random inbound reference number. Provided for clients and
/// tests; the server never invents inbound references on its own.
pub fn random_inbound() -> String {
    let digits: u32 = rand::thread_rng().gen_range(0..1_000_000);
    format!("REF-{:06}", digits)
}

/// Process-wide monotonic sequence backing adjustment reference numbers.
///
/// The date segment is informational; uniqueness comes from the sequence
/// alone, which is why the counter is global rather than per-day. Seeded from
/// the highest persisted adjustment sequence so restarts never reissue a
/// number.
#[derive(Debug)]
pub struct AdjustmentSequence {
    counter: AtomicU64,
}

impl AdjustmentSequence {
    pub fn new(last_issued: u64) -> Self {
        Self {
            counter: AtomicU64::new(last_issued),
        }
    }

    /// Issues the next adjustment reference number for the given batch date.
    pub fn next(&self, date: DateTime<Utc>) -> String {
        let seq = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        format!("ADJ-{}-{:04}", date.format("%Y%m%d"), seq)
    }

    /// Extracts the sequence component from a persisted adjustment reference,
    /// used to seed the counter at startup.
    pub fn parse_sequence(reference: &str) -> Option<u64> {
        ADJUSTMENT_REF_PATTERN
            .captures(reference)
            .and_then(|caps| caps.get(1))
            .and_then(|seq| seq.as_str().parse().ok())
    }
}
