use crate::{error::Result, storage::traits::QuotaStore};
use async_trait::async_trait;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};

#[derive(Debug, Default)]
pub struct InMemoryQuotaStore {
    count: AtomicU32,
    writes: AtomicUsize,
}

impl InMemoryQuotaStore {
    pub fn new(initial: u32) -> Self {
        Self {
            count: AtomicU32::new(initial),
            writes: AtomicUsize::new(0),
        }
    }

    pub fn current(&self) -> u32 {
        self.count.load(Ordering::SeqCst)
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QuotaStore for InMemoryQuotaStore {
    async fn read(&self) -> Result<u32> {
        Ok(self.count.load(Ordering::SeqCst))
    }

    async fn write(&self, count: u32) -> Result<()> {
        self.count.store(count, Ordering::SeqCst);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
