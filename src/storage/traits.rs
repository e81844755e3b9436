use crate::error::Result;
use async_trait::async_trait;

/// Key under which the generation counter is persisted.
pub const GENERATION_COUNT_KEY: &str = "generationCount";

/// Durable home of the generation counter.
///
/// A missing counter reads as zero.
#[async_trait]
pub trait QuotaStore: Send + Sync {
    async fn read(&self) -> Result<u32>;
    async fn write(&self, count: u32) -> Result<()>;
}
