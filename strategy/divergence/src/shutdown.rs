use std::time::Duration;

use tokio::sync::watch;

/// True once shutdown has been requested or the sender is gone.
pub(crate) fn requested(shutdown: &watch::Receiver<bool>) -> bool {
    *shutdown.borrow() || shutdown.has_changed().is_err()
}

/// Sleeps for `interval` unless shutdown is requested first.
/// Returns true when the caller should stop.
pub(crate) async fn sleep_or_shutdown(
    interval: Duration,
    shutdown: &mut watch::Receiver<bool>,
) -> bool {
    let closed = tokio::select! {
        _ = tokio::time::sleep(interval) => false,
        changed = shutdown.changed() => changed.is_err(),
    };
    closed || requested(shutdown)
}
