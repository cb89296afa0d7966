use std::sync::{Arc, Mutex, PoisonError};

use shared::protocol::Notice;
use tracing::info;

/// Fire-and-forget sink for advisory notices. Implementations must not block or fail.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notice: &Notice);
}

impl<T> NotificationSink for Arc<T>
where
    T: NotificationSink + ?Sized,
{
    fn notify(&self, notice: &Notice) {
        (**self).notify(notice);
    }
}

impl<A, B> NotificationSink for (A, B)
where
    A: NotificationSink,
    B: NotificationSink,
{
    fn notify(&self, notice: &Notice) {
        self.0.notify(notice);
        self.1.notify(notice);
    }
}

pub struct TracingNotificationSink;

impl NotificationSink for TracingNotificationSink {
    fn notify(&self, notice: &Notice) {
        info!(title = %notice.title, description = %notice.description, "notice");
    }
}

/// Keeps notices until the presentation layer drains them.
#[derive(Debug, Clone, Default)]
pub struct BufferedNotificationSink {
    notices: Arc<Mutex<Vec<Notice>>>,
}

impl BufferedNotificationSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drain(&self) -> Vec<Notice> {
        let mut notices = self.notices.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *notices)
    }

    pub fn titles(&self) -> Vec<String> {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|notice| notice.title.clone())
            .collect()
    }
}

impl NotificationSink for BufferedNotificationSink {
    fn notify(&self, notice: &Notice) {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notice.clone());
    }
}
