use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MAX_GENERATIONS: u32 = 2;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_QUOTA_STORE_PATH: &str = "generation_quota.json";

#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: Option<String>,
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub openai: OpenAiConfig,
    pub max_generations: u32,
    pub request_timeout: Duration,
    pub quota_store_path: PathBuf,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        OpenAiConfig {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl OpenAiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let api_key = env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty());
        let base_url = env::var("OPENAI_BASE_URL")
            .ok()
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        OpenAiConfig { api_key, base_url }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            openai: OpenAiConfig::default(),
            max_generations: DEFAULT_MAX_GENERATIONS,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            quota_store_path: PathBuf::from(DEFAULT_QUOTA_STORE_PATH),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let max_generations = parse_max_generations(env::var("MAX_GENERATIONS").ok().as_deref());
        let request_timeout = env::var("IMAGE_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        let quota_store_path = env::var("QUOTA_STORE_PATH")
            .ok()
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_QUOTA_STORE_PATH));

        Config {
            openai: OpenAiConfig::from_env(),
            max_generations,
            request_timeout,
            quota_store_path,
        }
    }

    pub fn with_openai(mut self, config: OpenAiConfig) -> Self {
        self.openai = config;
        self
    }

    pub fn with_max_generations(mut self, max: u32) -> Self {
        self.max_generations = max;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_quota_store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.quota_store_path = path.into();
        self
    }
}

/// Absent or non-numeric values fall back to [`DEFAULT_MAX_GENERATIONS`].
pub fn parse_max_generations(raw: Option<&str>) -> u32 {
    raw.and_then(|s| s.trim().parse::<u32>().ok())
        .unwrap_or(DEFAULT_MAX_GENERATIONS)
}
