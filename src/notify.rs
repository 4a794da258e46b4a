//! Notifications
//!
//! Price-origin transitions surface to the cashier as toast notices. The
//! cart emits them through a sink so the embedding UI decides how (and
//! whether) to display them.

use std::fmt;

use smallvec::SmallVec;

/// Severity of a notice.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum NoticeLevel {
    /// Confirmation of a completed action.
    Success,

    /// Informational, e.g. a price-origin change.
    Info,

    /// Something the cashier should double-check.
    Warning,

    /// A failed action.
    Error,
}

impl fmt::Display for NoticeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        };

        f.write_str(label)
    }
}

/// A user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Message text.
    pub message: String,

    /// Severity.
    pub level: NoticeLevel,
}

impl Notice {
    /// An informational notice.
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NoticeLevel::Info,
        }
    }
}

/// Receives notices emitted by cart operations.
pub trait NotificationSink {
    /// Delivers one notice.
    fn notify(&mut self, notice: Notice);
}

/// Sink that discards every notice.
#[derive(Debug, Default)]
pub struct NullSink;

impl NotificationSink for NullSink {
    fn notify(&mut self, _notice: Notice) {}
}

/// An owned queue of pending toasts.
///
/// The display layer drains it once per frame; display duration and
/// dismissal are the display layer's concern. [`NotificationSink`] is
/// implemented so a cart can push into the queue directly.
#[derive(Debug, Default)]
pub struct ToastQueue {
    pending: SmallVec<[Notice; 4]>,
}

impl ToastQueue {
    /// An empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Notices waiting to be shown, oldest first.
    #[must_use]
    pub fn pending(&self) -> &[Notice] {
        &self.pending
    }

    /// Removes and returns all pending notices.
    pub fn drain(&mut self) -> SmallVec<[Notice; 4]> {
        std::mem::take(&mut self.pending)
    }

    /// Number of pending notices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether the queue is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl NotificationSink for ToastQueue {
    fn notify(&mut self, notice: Notice) {
        self.pending.push(notice);
    }
}
