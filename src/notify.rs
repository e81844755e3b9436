use crate::error::StudioError;
use colored::*;
use serde::Serialize;
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeVariant {
    Success,
    Destructive,
}

/// A transient, user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub variant: NoticeVariant,
}

impl Notice {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NoticeVariant::Success,
        }
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NoticeVariant::Destructive,
        }
    }

    pub fn generated(remaining: u32) -> Self {
        Self::success(
            "Image generated successfully",
            format!(
                "Your image has been created! {} generation{} remaining.",
                remaining,
                if remaining == 1 { "" } else { "s" }
            ),
        )
    }

    pub fn count_not_saved() -> Self {
        Self::destructive(
            "Error",
            "Generation count could not be saved. Your image is still available.",
        )
    }

    pub fn from_error(error: &StudioError) -> Self {
        match error {
            StudioError::InvalidInput(_) => Self::destructive(
                "Please enter a prompt",
                "You need to provide a description of the image you want to generate.",
            ),
            StudioError::QuotaExceeded { .. } => Self::destructive(
                "Generation limit reached",
                "You have 0 generations remaining.",
            ),
            StudioError::Busy => Self::destructive(
                "Generation in progress",
                "Please wait for the current image to finish.",
            ),
            other => Self::destructive("Error", other.to_string()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.variant == NoticeVariant::Destructive
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Routes notices through the `log` facade.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: Notice) {
        match notice.variant {
            NoticeVariant::Success => log::info!("{}: {}", notice.title, notice.description),
            NoticeVariant::Destructive => log::warn!("{}: {}", notice.title, notice.description),
        }
    }
}

/// Prints notices to stderr for the CLI.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: Notice) {
        let title = match notice.variant {
            NoticeVariant::Success => notice.title.green().bold(),
            NoticeVariant::Destructive => notice.title.red().bold(),
        };
        eprintln!("{} {}", title, notice.description);
    }
}

/// Keeps every notice; handy for tests and embedding.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .map(|n| n.clone())
            .unwrap_or_default()
    }

    pub fn last(&self) -> Option<Notice> {
        self.notices().pop()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        if let Ok(mut notices) = self.notices.lock() {
            notices.push(notice);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_notice_pluralisation() {
        assert!(Notice::generated(1).description.contains("1 generation remaining"));
        assert!(Notice::generated(0).description.contains("0 generations remaining"));
        assert!(!Notice::generated(3).is_error());
    }

    #[test]
    fn test_error_notices() {
        let quota = Notice::from_error(&StudioError::QuotaExceeded { used: 2, max: 2 });
        assert!(quota.is_error());
        assert!(quota.description.contains("0 generations remaining"));

        let failed = Notice::from_error(&StudioError::GenerationFailed("bad request".into()));
        assert_eq!(failed.title, "Error");
        assert_eq!(failed.description, "bad request");
    }

    #[test]
    fn test_count_not_saved_is_destructive() {
        let notice = Notice::count_not_saved();
        assert!(notice.is_error());
        assert!(notice.description.contains("could not be saved"));
    }

    #[test]
    fn test_recording_notifier() {
        let notifier = RecordingNotifier::new();
        notifier.notify(Notice::generated(1));
        notifier.notify(Notice::from_error(&StudioError::Busy));
        assert_eq!(notifier.notices().len(), 2);
        assert_eq!(notifier.last().unwrap().title, "Generation in progress");
    }
}
