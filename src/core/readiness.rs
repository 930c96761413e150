use crate::domain::ports::ReadinessProbe;
use std::time::Duration;

// Surface an info-level progress line once a minute at the default
// 5 second interval.
const PROGRESS_EVERY: u64 = 12;

/// Polls a probe until it succeeds, sleeping a fixed interval between
/// attempts. Never gives up; the caller owns any larger timeout policy
/// (in the test harness there is none). Returns the attempt count.
pub async fn wait_until_ready<P>(probe: &P, interval: Duration) -> u64
where
    P: ReadinessProbe + ?Sized,
{
    let mut attempts: u64 = 0;

    loop {
        attempts += 1;

        match probe.check().await {
            Ok(()) => {
                tracing::info!("✅ {} is ready (attempt {})", probe.name(), attempts);
                return attempts;
            }
            Err(e) => {
                tracing::debug!("{} not ready: {}", probe.name(), e);

                if attempts % PROGRESS_EVERY == 0 {
                    tracing::info!(
                        "⏳ Still waiting for {} after {} attempts",
                        probe.name(),
                        attempts
                    );
                }

                tokio::time::sleep(interval).await;
            }
        }
    }
}

/// Checks a probe exactly once, logging the outcome.
pub async fn check_once<P>(probe: &P) -> bool
where
    P: ReadinessProbe + ?Sized,
{
    match probe.check().await {
        Ok(()) => {
            tracing::info!("✅ {} is ready", probe.name());
            true
        }
        Err(e) => {
            tracing::warn!("❌ {} is not ready: {}", probe.name(), e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::{Result, SyncError};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU64, Ordering};

    struct FlakyProbe {
        failures: AtomicU64,
    }

    impl FlakyProbe {
        fn new(failures: u64) -> Self {
            Self {
                failures: AtomicU64::new(failures),
            }
        }
    }

    #[async_trait]
    impl ReadinessProbe for FlakyProbe {
        fn name(&self) -> &str {
            "flaky"
        }

        async fn check(&self) -> Result<()> {
            let remaining = self.failures.load(Ordering::SeqCst);
            if remaining > 0 {
                self.failures.store(remaining - 1, Ordering::SeqCst);
                return Err(SyncError::ConfigError {
                    message: "not yet".to_string(),
                });
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_succeeds_first_time() {
        let probe = FlakyProbe::new(0);
        assert_eq!(wait_until_ready(&probe, Duration::ZERO).await, 1);
    }

    #[tokio::test]
    async fn test_retries_until_ready() {
        let probe = FlakyProbe::new(20);
        assert_eq!(wait_until_ready(&probe, Duration::ZERO).await, 21);
    }

    #[tokio::test]
    async fn test_check_once() {
        assert!(check_once(&FlakyProbe::new(0)).await);
        assert!(!check_once(&FlakyProbe::new(1)).await);
    }
}
