pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod notify;
pub mod provider;
pub mod storage;
pub mod workflow;

pub use config::{Config, OpenAiConfig};
pub use error::{Result, StudioError};
pub use models::{
    Catalog, GenerationResult, ImageGenerationRequest, QuotaState, SizeOption, StylePreset,
};
pub use notify::{Notice, NoticeVariant, Notifier};
pub use provider::{ImageProvider, OpenAiImageClient};
pub use storage::{InMemoryQuotaStore, JsonFileQuotaStore, QuotaStore};
pub use workflow::{GenerationWorkflow, Submission};
