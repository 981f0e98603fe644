//! Restart loop around the bot runtime.

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;

/// Runs `attempt` until it returns `Ok`, sleeping `delay` after every failure.
///
/// Startup errors (bad token, unreachable Bot API) and dispatcher panics are
/// both reported as `Err` by the attempt and retried the same way. Returns the
/// number of attempts made.
pub async fn run_with_restarts<F, Fut>(mut attempt: F, delay: Duration) -> u32
where
    F: FnMut() -> Fut,
    Fut: Future<Output = anyhow::Result<()>>,
{
    let mut attempts = 0;
    loop {
        attempts += 1;
        match attempt().await {
            Ok(()) => {
                log::info!("Dispatcher shutdown gracefully");
                return attempts;
            }
            Err(e) => log::error!("Bot runtime failed (attempt {}): {:#}", attempts, e),
        }

        log::info!("Restarting bot in {} seconds...", delay.as_secs());
        sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_startup_failures_are_retried() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);

        let attempts = run_with_restarts(
            move || {
                let n = counter.fetch_add(1, Ordering::SeqCst);
                async move {
                    match n {
                        0 => Err(anyhow!("Bot API rejected the token")),
                        1 => Err(anyhow!("dispatcher panicked")),
                        _ => Ok(()),
                    }
                }
            },
            Duration::from_millis(1),
        )
        .await;

        assert_eq!(attempts, 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_clean_exit_stops_immediately() {
        let attempts = run_with_restarts(|| async { Ok(()) }, Duration::from_secs(3600)).await;
        assert_eq!(attempts, 1);
    }
}
