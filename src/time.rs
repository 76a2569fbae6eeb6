use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use std::{
    fmt::Debug,
    sync::atomic::{AtomicI64, Ordering},
};

pub trait Clock: Send + Sync + Debug {
    fn now(&self) -> DateTime<Utc>;

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

#[derive(Debug)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Pinned clock for tests; stores a Unix UTC timestamp that can be moved.
#[derive(Debug)]
pub struct FixedClock {
    current: AtomicI64,
}

impl FixedClock {
    pub fn new(timestamp: i64) -> Self {
        Self { current: AtomicI64::new(timestamp) }
    }

    pub fn set(&self, timestamp: i64) {
        self.current.store(timestamp, Ordering::SeqCst);
    }

    pub fn advance_days(&self, days: i64) {
        self.current.fetch_add(days * 86_400, Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        // Timestamps come from the tests themselves, always in range.
        Utc.timestamp_opt(self.current.load(Ordering::SeqCst), 0).unwrap()
    }
}
