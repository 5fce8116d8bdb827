//! Response window: the first of {deadline, accepted key} wins and the
//! other branch is dropped.

use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::{sleep_until, Instant};

#[derive(Debug, Clone, PartialEq)]
pub enum WindowOutcome<K> {
    Accepted { key: K, elapsed: Duration },
    Elapsed(Duration),
    /// No deadline and the key source is gone.
    Closed,
}

/// Waits for a key `accepts` admits, or until `limit` elapses.
///
/// Keys queued before the window opens are discarded; keys that are not
/// accepted are ignored without ending the window.
pub async fn response_window<K, F>(
    rx: &mut UnboundedReceiver<K>,
    limit: Option<Duration>,
    mut accepts: F,
) -> WindowOutcome<K>
where
    F: FnMut(&K) -> bool,
{
    while rx.try_recv().is_ok() {}

    let start = Instant::now();
    let deadline = limit.map(|l| start + l);
    loop {
        let next = match deadline {
            Some(deadline) => {
                tokio::select! {
                    biased;
                    _ = sleep_until(deadline) => return WindowOutcome::Elapsed(start.elapsed()),
                    key = rx.recv() => key,
                }
            }
            None => rx.recv().await,
        };
        match next {
            Some(key) if accepts(&key) => {
                return WindowOutcome::Accepted {
                    key,
                    elapsed: start.elapsed(),
                }
            }
            Some(_) => continue,
            None => {
                return match deadline {
                    Some(deadline) => {
                        sleep_until(deadline).await;
                        WindowOutcome::Elapsed(start.elapsed())
                    }
                    None => WindowOutcome::Closed,
                }
            }
        }
    }
}
