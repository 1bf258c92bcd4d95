//! Transient status notifications.
//!
//! A single slot, replaced in place: loading becomes success or error,
//! never both at once. A [`Toaster`] decides how slot changes are shown.

use std::io::Write;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Braille frames animating a loading notification.
const FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

const FRAME_INTERVAL: Duration = Duration::from_millis(80);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Loading,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn loading(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Loading,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }
}

/// The one notification currently visible, if any.
#[derive(Debug, Default)]
pub struct NotificationSlot {
    current: Option<Notification>,
}

impl NotificationSlot {
    /// Replace whatever is showing.
    pub fn replace(&mut self, notification: Notification) -> &Notification {
        self.current.insert(notification)
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }
}

/// Displays notification slot changes.
#[async_trait]
pub trait Toaster: Send + Sync {
    async fn show(&mut self, notification: &Notification);
}

/// The terminal line for a notification. `tick` picks the loading frame.
pub fn status_line(notification: &Notification, tick: usize) -> String {
    match notification.kind {
        NotificationKind::Loading => {
            format!("{} {}", FRAMES[tick % FRAMES.len()], notification.message)
        }
        NotificationKind::Success => format!("✓ {}", notification.message),
        NotificationKind::Error => format!("✗ {}", notification.message),
    }
}

/// Notifications on stderr. Loading animates on one line until the
/// verdict overwrites it.
#[derive(Default)]
pub struct TerminalToaster {
    loading: Option<LoadingLine>,
}

/// A loading notification animating in a background task.
struct LoadingLine {
    handle: JoinHandle<()>,
    verdict: watch::Sender<Option<Notification>>,
}

impl LoadingLine {
    fn start(notification: Notification) -> Self {
        let (verdict_tx, mut verdict_rx) = watch::channel(None);

        let handle = tokio::spawn(async move {
            let mut tick = 0;
            loop {
                // \x1b[2K clears the line, \r returns to its start
                eprint!("\x1b[2K\r{}", status_line(&notification, tick));
                let _ = std::io::stderr().flush();

                tokio::select! {
                    _ = tokio::time::sleep(FRAME_INTERVAL) => tick += 1,
                    _ = verdict_rx.changed() => break,
                }
            }

            let verdict = verdict_rx.borrow().clone();
            match verdict {
                Some(verdict) => eprintln!("\x1b[2K\r{}", status_line(&verdict, 0)),
                None => eprint!("\x1b[2K\r"),
            }
            let _ = std::io::stderr().flush();
        });

        Self {
            handle,
            verdict: verdict_tx,
        }
    }

    /// Stop animating; print `verdict` in place, or just clear the line.
    async fn finish(self, verdict: Option<Notification>) {
        let _ = self.verdict.send(verdict);
        let _ = self.handle.await;
    }
}

#[async_trait]
impl Toaster for TerminalToaster {
    async fn show(&mut self, notification: &Notification) {
        let previous = self.loading.take();
        match notification.kind {
            NotificationKind::Loading => {
                if let Some(line) = previous {
                    line.finish(None).await;
                }
                self.loading = Some(LoadingLine::start(notification.clone()));
            }
            NotificationKind::Success | NotificationKind::Error => match previous {
                Some(line) => line.finish(Some(notification.clone())).await,
                None => eprintln!("{}", status_line(notification, 0)),
            },
        }
    }
}

/// Records every notification it is shown. Clones share the same log.
#[cfg(test)]
#[derive(Clone, Default)]
pub struct RecordingToaster {
    log: std::sync::Arc<std::sync::Mutex<Vec<Notification>>>,
}

#[cfg(test)]
impl RecordingToaster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shown(&self) -> Vec<Notification> {
        self.log.lock().unwrap().clone()
    }
}

#[cfg(test)]
#[async_trait]
impl Toaster for RecordingToaster {
    async fn show(&mut self, notification: &Notification) {
        self.log.lock().unwrap().push(notification.clone());
    }
}
