//! crates/agendas_core/src/memory.rs
//!
//! An in-memory [`RecordStore`] implementation. The repositories only know
//! the storage port, so this doubles as the test double for all repository
//! logic without touching the filesystem.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::ports::{PortResult, RecordStore};

/// A `Vec` behind a mutex implementing the whole-collection store contract.
#[derive(Debug, Default)]
pub struct MemoryStore<T> {
    records: Mutex<Vec<T>>,
}

impl<T: Clone> MemoryStore<T> {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }

    pub fn with_records(records: Vec<T>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }
}

#[async_trait]
impl<T> RecordStore<T> for MemoryStore<T>
where
    T: Clone + Send + Sync,
{
    async fn load_all(&self) -> Vec<T> {
        self.records.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    async fn persist_all(&self, records: &[T]) -> PortResult<()> {
        *self.records.lock().unwrap_or_else(|e| e.into_inner()) = records.to_vec();
        Ok(())
    }
}
