//! Progress reporting for long-running collection.

/// Receives human-readable progress messages during collection.
///
/// Purely advisory: collection results never depend on the observer.
pub trait ProgressObserver: Send + Sync {
    fn on_progress(&self, message: &str);
}

/// Observer that ignores every message.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn on_progress(&self, _message: &str) {}
}

impl<F> ProgressObserver for F
where
    F: Fn(&str) + Send + Sync,
{
    fn on_progress(&self, message: &str) {
        self(message)
    }
}
