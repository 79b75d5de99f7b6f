//! Short-lived notifications that remove themselves after a timeout.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde::Serialize;
use strum::AsRefStr;
use tokio::runtime::Handle;
use tokio::task::AbortHandle;
use uuid::Uuid;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ToastStatus {
    Success,
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub id: String,
    pub text: String,
    pub status: ToastStatus,
}

#[derive(Default)]
struct ToastQueue {
    toasts: Vec<Toast>,
    timers: HashMap<String, AbortHandle>,
}

/// Notification queue.
///
/// Cloning yields another handle onto the same queue. Removal is scheduled
/// as a tokio task, so a push outside a runtime is logged and dropped.
#[derive(Clone, Default)]
pub struct Toaster {
    queue: Arc<Mutex<ToastQueue>>,
}

impl Toaster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success(&self, text: impl Into<String>, timeout: Option<Duration>) -> String {
        self.push(text, ToastStatus::Success, timeout)
    }

    pub fn error(&self, text: impl Into<String>, timeout: Option<Duration>) -> String {
        self.push(text, ToastStatus::Error, timeout)
    }

    pub fn warning(&self, text: impl Into<String>, timeout: Option<Duration>) -> String {
        self.push(text, ToastStatus::Warning, timeout)
    }

    pub fn info(&self, text: impl Into<String>, timeout: Option<Duration>) -> String {
        self.push(text, ToastStatus::Info, timeout)
    }

    /// Append a toast and schedule its removal. Returns the toast id.
    pub fn push(
        &self,
        text: impl Into<String>,
        status: ToastStatus,
        timeout: Option<Duration>,
    ) -> String {
        let id = Uuid::new_v4().to_string();
        let Ok(runtime) = Handle::try_current() else {
            tracing::warn!(toast_id = %id, "No tokio runtime, toast not shown");
            return id;
        };

        let toast = Toast {
            id: id.clone(),
            text: text.into(),
            status,
        };

        let queue = Arc::clone(&self.queue);
        let expired_id = id.clone();
        let delay = timeout.unwrap_or(DEFAULT_TIMEOUT);

        // The timer task blocks on the lock until it is registered.
        let mut guard = self.lock();
        guard.toasts.push(toast);
        let handle = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            let mut q = queue.lock().unwrap_or_else(PoisonError::into_inner);
            q.toasts.retain(|t| t.id != expired_id);
            q.timers.remove(&expired_id);
        });
        guard.timers.insert(id.clone(), handle.abort_handle());

        id
    }

    /// Snapshot of the toasts currently shown, oldest first.
    pub fn toasts(&self) -> Vec<Toast> {
        self.lock().toasts.clone()
    }

    /// Remove one toast before its timeout.
    pub fn dismiss(&self, id: &str) {
        let mut q = self.lock();
        q.toasts.retain(|t| t.id != id);
        if let Some(handle) = q.timers.remove(id) {
            handle.abort();
        }
    }

    /// Drop every toast and cancel pending timers.
    pub fn clear(&self) {
        let mut q = self.lock();
        q.toasts.clear();
        for (_, handle) in q.timers.drain() {
            handle.abort();
        }
    }

    fn lock(&self) -> MutexGuard<'_, ToastQueue> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for Toaster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Toaster")
            .field("toasts", &self.toasts().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn settle() {
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn toast_expires_after_default_timeout() {
        let toaster = Toaster::new();
        toaster.success("Proyecto creado", None);
        assert_eq!(toaster.toasts().len(), 1);
        assert_eq!(toaster.toasts()[0].status, ToastStatus::Success);

        tokio::time::sleep(Duration::from_millis(2999)).await;
        settle().await;
        assert_eq!(toaster.toasts().len(), 1);

        tokio::time::sleep(Duration::from_millis(2)).await;
        settle().await;
        assert!(toaster.toasts().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn custom_timeout_and_no_dedup() {
        let toaster = Toaster::new();
        toaster.error("Fallo", Some(Duration::from_millis(100)));
        toaster.error("Fallo", None);
        assert_eq!(toaster.toasts().len(), 2);

        tokio::time::sleep(Duration::from_millis(150)).await;
        settle().await;

        let left = toaster.toasts();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].text, "Fallo");
    }

    #[tokio::test(start_paused = true)]
    async fn dismiss_and_clear() {
        let toaster = Toaster::new();
        let id = toaster.info("uno", None);
        toaster.warning("dos", None);

        toaster.dismiss(&id);
        assert_eq!(toaster.toasts().len(), 1);
        assert_eq!(toaster.toasts()[0].status.as_ref(), "warning");

        toaster.clear();
        assert!(toaster.toasts().is_empty());
    }

    #[test]
    fn push_outside_runtime_keeps_queue_usable() {
        let toaster = Toaster::new();
        toaster.info("fuera", None);
        assert!(toaster.toasts().is_empty());

        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            toaster.info("dentro", None);
            assert_eq!(toaster.toasts().len(), 1);
            assert_eq!(toaster.toasts()[0].text, "dentro");
        });
    }

    #[tokio::test(start_paused = true)]
    async fn poisoned_queue_still_works() {
        let toaster = Toaster::new();
        let queue = Arc::clone(&toaster.queue);
        std::thread::spawn(move || {
            let _guard = queue.lock().unwrap();
            panic!("poison the queue");
        })
        .join()
        .unwrap_err();

        let id = toaster.success("Perfil actualizado", Some(Duration::from_millis(50)));
        assert_eq!(toaster.toasts().len(), 1);
        toaster.dismiss(&id);
        assert!(toaster.toasts().is_empty());

        toaster.warning("otra", Some(Duration::from_millis(50)));
        tokio::time::sleep(Duration::from_millis(60)).await;
        settle().await;
        assert!(toaster.toasts().is_empty());
    }
}
