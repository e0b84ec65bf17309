use std::future::Future;
use std::time::Duration;

/// Bounded retry with exponential backoff and a per-attempt timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    pub initial_backoff: Duration,
    pub attempt_timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_backoff: Duration::from_millis(100),
            attempt_timeout: Duration::from_secs(3),
        }
    }
}

impl RetryPolicy {
    /// Delay before retry number `retry` (0-based): `initial_backoff * 2^retry`.
    pub fn backoff(&self, retry: u32) -> Duration {
        self.initial_backoff.saturating_mul(2u32.saturating_pow(retry))
    }
}

/// Why a single attempt did not produce a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptError {
    /// Give up now, e.g. the resource does not exist.
    Terminal(String),
    /// Worth another try after backing off.
    Transient(String),
}

/// Runs `op` under `policy`, folding every failure into `None`.
///
/// A terminal error or a timed-out attempt ends the loop at once; transient
/// errors are retried until `max_retries` is spent.
pub async fn retry_absorbing<T, F, Fut>(
    policy: &RetryPolicy,
    label: &str,
    mut op: F,
) -> Option<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AttemptError>>,
{
    let mut retry = 0;
    loop {
        match tokio::time::timeout(policy.attempt_timeout, op()).await {
            Ok(Ok(value)) => return Some(value),
            Ok(Err(AttemptError::Terminal(reason))) => {
                log::debug!("{label}: giving up: {reason}");
                return None;
            }
            Ok(Err(AttemptError::Transient(reason))) => {
                if retry >= policy.max_retries {
                    log::warn!(
                        "{label}: retries exhausted after {} attempts: {reason}",
                        retry + 1
                    );
                    return None;
                }
                let delay = policy.backoff(retry);
                log::debug!(
                    "{label}: attempt {} failed ({reason}), retrying in {delay:?}",
                    retry + 1
                );
                retry += 1;
                tokio::time::sleep(delay).await;
            }
            Err(_) => {
                log::warn!("{label}: attempt timed out after {:?}", policy.attempt_timeout);
                return None;
            }
        }
    }
}
