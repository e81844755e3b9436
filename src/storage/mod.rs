pub mod file;
pub mod memory;
pub mod traits;

use crate::config::Config;
use std::sync::Arc;

pub use file::JsonFileQuotaStore;
pub use memory::InMemoryQuotaStore;
pub use traits::{QuotaStore, GENERATION_COUNT_KEY};

/// Opens the durable counter store described by `config`.
pub fn open_quota_store(config: &Config) -> Arc<dyn QuotaStore> {
    log::debug!(
        "Using quota store at {}",
        config.quota_store_path.display()
    );
    Arc::new(JsonFileQuotaStore::new(config.quota_store_path.clone()))
}
