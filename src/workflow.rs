use crate::{
    config::{Config, DEFAULT_TIMEOUT_SECS},
    error::{Result, StudioError},
    models::{Catalog, GenerationResult, ImageGenerationRequest, QuotaState},
    notify::{LogNotifier, Notice, Notifier},
    provider::{ImageProvider, OpenAiImageClient, GENERIC_RETRY_FAILURE},
    storage::{open_quota_store, QuotaStore},
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

/// What was last sent to the provider, kept so `regenerate` survives the
/// prompt being cleared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub prompt: String,
    pub size: String,
    pub style: String,
}

#[derive(Debug)]
struct WorkflowState {
    prompt_text: String,
    selected_size: String,
    selected_style: String,
    current_image: Option<GenerationResult>,
    quota: QuotaState,
    last_submission: Option<Submission>,
}

/// Clears the loading flag when a generation attempt ends, including when
/// the future is dropped mid-flight.
struct LoadingGuard<'a>(&'a AtomicBool);

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Quota-gated prompt-to-image controller.
///
/// All methods take `&self`; at most one generation runs at a time and a
/// concurrent trigger is rejected with [`StudioError::Busy`].
pub struct GenerationWorkflow {
    provider: Arc<dyn ImageProvider>,
    store: Arc<dyn QuotaStore>,
    notifier: Arc<dyn Notifier>,
    catalog: Catalog,
    request_timeout: Duration,
    loading: AtomicBool,
    state: Mutex<WorkflowState>,
}

impl GenerationWorkflow {
    /// Reads the persisted counter once; it is only written back afterwards.
    pub async fn new(
        provider: Arc<dyn ImageProvider>,
        store: Arc<dyn QuotaStore>,
        max_generations: u32,
    ) -> Result<Self> {
        let generation_count = store.read().await?;
        let catalog = Catalog::default();

        log::debug!(
            "Workflow ready: {} of {} generations used",
            generation_count,
            max_generations
        );

        Ok(Self {
            provider,
            store,
            notifier: Arc::new(LogNotifier),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            loading: AtomicBool::new(false),
            state: Mutex::new(WorkflowState {
                prompt_text: String::new(),
                selected_size: catalog.default_size().value.clone(),
                selected_style: catalog.default_style().id.clone(),
                current_image: None,
                quota: QuotaState::new(generation_count, max_generations),
                last_submission: None,
            }),
            catalog,
        })
    }

    /// OpenAI provider and JSON-file quota store, both taken from `config`.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let provider = Arc::new(OpenAiImageClient::new(&config.openai)?);
        let store = open_quota_store(config);
        Ok(Self::new(provider, store, config.max_generations)
            .await?
            .with_request_timeout(config.request_timeout))
    }

    /// Replaces the catalog and resets the selections to its first entries.
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        {
            let state = self.state.get_mut().unwrap_or_else(|p| p.into_inner());
            state.selected_size = catalog.default_size().value.clone();
            state.selected_style = catalog.default_style().id.clone();
        }
        self.catalog = catalog;
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    fn state(&self) -> MutexGuard<'_, WorkflowState> {
        self.state.lock().unwrap_or_else(|p| p.into_inner())
    }

    fn begin_loading(&self) -> Option<LoadingGuard<'_>> {
        self.loading
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| LoadingGuard(&self.loading))
    }

    pub fn set_prompt(&self, text: impl Into<String>) {
        self.state().prompt_text = text.into();
    }

    pub fn select_size(&self, value: &str) -> Result<()> {
        if self.catalog.find_size(value).is_none() {
            return Err(StudioError::InvalidInput(format!(
                "Unsupported image size: {}",
                value
            )));
        }
        self.state().selected_size = value.to_string();
        Ok(())
    }

    /// Any id is accepted; unknown ones fall back to the first preset when
    /// the prompt is composed.
    pub fn select_style(&self, id: impl Into<String>) {
        self.state().selected_style = id.into();
    }

    pub fn prompt(&self) -> String {
        self.state().prompt_text.clone()
    }

    pub fn selected_size(&self) -> String {
        self.state().selected_size.clone()
    }

    pub fn selected_style(&self) -> String {
        self.state().selected_style.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    pub fn quota(&self) -> QuotaState {
        self.state().quota
    }

    pub fn remaining(&self) -> u32 {
        self.quota().remaining()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn current_image(&self) -> Option<GenerationResult> {
        self.state().current_image.clone()
    }

    pub fn last_submission(&self) -> Option<Submission> {
        self.state().last_submission.clone()
    }

    /// Pass-through reference to the live image for saving; never touches
    /// the network.
    pub fn download_current_image(&self) -> Option<String> {
        self.state()
            .current_image
            .as_ref()
            .map(|image| image.image_url.clone())
    }

    /// Generates from the current prompt, size and style.
    pub async fn request_generation(&self) -> Result<GenerationResult> {
        let outcome = self.generate(false).await;
        self.report(&outcome);
        outcome
    }

    /// Generates again with the last-used size and style. The current prompt
    /// wins when non-blank, otherwise the last submitted prompt is reused.
    pub async fn regenerate(&self) -> Result<GenerationResult> {
        let outcome = self.generate(true).await;
        self.report(&outcome);
        outcome
    }

    fn report(&self, outcome: &Result<GenerationResult>) {
        let notice = match outcome {
            Ok(_) => Notice::generated(self.remaining()),
            Err(e) => {
                if e.is_precondition() {
                    log::debug!("Generation rejected: {}", e);
                }
                Notice::from_error(e)
            }
        };
        self.notifier.notify(notice);
    }

    fn prepare(&self, regenerate: bool) -> Result<Submission> {
        let state = self.state();

        if state.quota.is_exhausted() {
            return Err(StudioError::QuotaExceeded {
                used: state.quota.generation_count,
                max: state.quota.max_generations,
            });
        }

        let previous = if regenerate {
            state.last_submission.as_ref()
        } else {
            None
        };

        let prompt = if !state.prompt_text.trim().is_empty() {
            state.prompt_text.clone()
        } else if let Some(previous) = previous {
            previous.prompt.clone()
        } else {
            return Err(StudioError::InvalidInput("prompt is empty".into()));
        };

        Ok(match previous {
            Some(previous) => Submission {
                prompt,
                size: previous.size.clone(),
                style: previous.style.clone(),
            },
            None => Submission {
                prompt,
                size: state.selected_size.clone(),
                style: state.selected_style.clone(),
            },
        })
    }

    async fn generate(&self, regenerate: bool) -> Result<GenerationResult> {
        let _loading = self.begin_loading().ok_or(StudioError::Busy)?;
        let submission = self.prepare(regenerate)?;

        let style = self.catalog.resolve_style(&submission.style).id.clone();
        let request = ImageGenerationRequest::new(
            self.catalog.compose_prompt(&submission.style, &submission.prompt),
            submission.size.clone(),
        );

        log::info!(
            "Generating image (style: {}, size: {})",
            style,
            submission.size
        );
        let started = Instant::now();

        let call = self.provider.generate(&request);
        let outcome = match tokio::time::timeout(self.request_timeout, call).await {
            Ok(Ok(url)) => Ok(url),
            Ok(Err(StudioError::GenerationFailed(message))) => {
                Err(StudioError::GenerationFailed(message))
            }
            Ok(Err(other)) => {
                log::warn!("Image provider error: {}", other);
                Err(StudioError::GenerationFailed(GENERIC_RETRY_FAILURE.into()))
            }
            Err(_) => Err(StudioError::GenerationFailed(format!(
                "Image generation timed out after {}s",
                self.request_timeout.as_secs_f32()
            ))),
        };

        let elapsed = started.elapsed().as_millis();
        let (url, new_count) = {
            let mut state = self.state();
            state.prompt_text.clear();
            state.last_submission = Some(submission.clone());

            match outcome {
                Ok(url) => (url, state.quota.generation_count.saturating_add(1)),
                Err(e) => {
                    log::warn!("Image generation failed after {}ms: {}", elapsed, e);
                    return Err(e);
                }
            }
        };

        // Image and count are committed together once the write settles, so
        // dropping this future mid-write leaves the in-memory state untouched.
        if let Err(e) = self.store.write(new_count).await {
            log::error!("Failed to persist generation count {}: {}", new_count, e);
            self.notifier.notify(Notice::count_not_saved());
        }

        let result = GenerationResult::new(url, submission.size, style);
        {
            let mut state = self.state();
            state.current_image = Some(result.clone());
            state.quota.generation_count = new_count;
        }

        log::info!("Image {} generated in {}ms", result.id, elapsed);
        Ok(result)
    }
}
