//! User-facing notification channel
//!
//! Transient messages pushed to whatever presentation adapter is attached.
//! The core never renders; it only emits notifications and the adapter
//! decides how (or whether) to show them.

use std::time::Duration;
use tokio::sync::mpsc;

/// A transient user-facing message.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    /// When true the adapter should offer a one-shot "keep local" action
    /// that calls back into `SyncEngine::keep_local`.
    pub revertable: bool,
    /// Adapter-enforced auto-hide delay; `None` means sticky until dismissed.
    pub auto_hide: Option<Duration>,
}

impl Notification {
    pub fn info(message: impl Into<String>, auto_hide_ms: u64) -> Self {
        Self {
            message: message.into(),
            revertable: false,
            auto_hide: Some(Duration::from_millis(auto_hide_ms)),
        }
    }

    pub fn revertable(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            revertable: true,
            auto_hide: None,
        }
    }
}

/// Sending half of the notification channel.
///
/// A missing or dropped receiver is not an error: notifications are
/// best-effort and the core must stay usable without a presentation layer.
#[derive(Clone)]
pub struct Notifier {
    tx: mpsc::UnboundedSender<Notification>,
}

impl Notifier {
    /// Create a notifier plus the receiving half for the presentation adapter.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn send(&self, notification: Notification) {
        if self.tx.send(notification).is_err() {
            tracing::debug!("Notification receiver dropped, message discarded");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn delivers_notifications_in_order() {
        let (notifier, mut rx) = Notifier::channel();
        notifier.send(Notification::info("first", 1000));
        notifier.send(Notification::revertable("second"));

        let first = rx.recv().await.unwrap();
        assert_eq!(first.message, "first");
        assert!(!first.revertable);
        assert_eq!(first.auto_hide, Some(Duration::from_millis(1000)));

        let second = rx.recv().await.unwrap();
        assert!(second.revertable);
        assert!(second.auto_hide.is_none());
    }

    #[test]
    fn send_without_receiver_is_silent() {
        let (notifier, rx) = Notifier::channel();
        drop(rx);
        notifier.send(Notification::info("nobody listening", 500));
    }
}
