//! Shared fixtures for intern unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::intern::domain::{IdGenerator, InternFields, InternId, InternRecord, StorageValue};
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use serde_json::Value;

/// Identifier source yielding `id-1`, `id-2`, ... and counting calls.
#[derive(Debug, Default)]
pub struct SequentialIds {
    issued: AtomicUsize,
}

impl SequentialIds {
    pub fn issued(&self) -> usize {
        self.issued.load(Ordering::SeqCst)
    }
}

impl IdGenerator for SequentialIds {
    fn generate(&self) -> String {
        let next = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        format!("id-{next}")
    }
}

/// Clock pinned to [`fixed_time`] that counts how often it is read.
#[derive(Debug, Default)]
pub struct CountingClock {
    reads: AtomicUsize,
}

impl CountingClock {
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl Clock for CountingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        fixed_time()
    }
}

pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub fn record_with_tasks(id: &str, tasks: Value) -> InternRecord {
    let fields = InternFields::new(format!("Intern {id}"), "2025-Summer")
        .with_tasks_assigned(StorageValue::from(tasks));
    InternRecord::new(InternId::new(id), fields, fixed_time())
}
