//! Link supervision
//!
//! The BLE adapter drops the connection routinely; the link is wrapped in a
//! supervisor that reruns the connect-and-poll task with a fixed delay after
//! every failure. Transport specifics stay outside this crate — the
//! supervisor only sees a fallible async task.

use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::ObdError;

/// Reconnection behaviour of the link supervisor
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconnectPolicy {
    /// Delay between attempts, milliseconds
    pub retry_delay_ms: u64,
    /// Give up after this many failed attempts; `None` retries forever
    pub max_attempts: Option<u32>,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            retry_delay_ms: 5000,
            max_attempts: None,
        }
    }
}

impl ReconnectPolicy {
    /// Fixed delay between attempts
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

/// Run a link task under the reconnect policy
///
/// Invokes `run` with the attempt number (starting at 0). A task that
/// returns `Ok` is a clean shutdown and ends supervision; a task that fails
/// is retried after the policy delay until attempts run out.
pub async fn supervise<F, Fut>(policy: &ReconnectPolicy, mut run: F) -> Result<(), ObdError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<(), ObdError>>,
{
    let mut attempt: u32 = 0;
    loop {
        match run(attempt).await {
            Ok(()) => return Ok(()),
            Err(err) => {
                tracing::warn!(attempt, %err, "link task failed");
            }
        }
        attempt += 1;
        if let Some(max) = policy.max_attempts {
            if attempt >= max {
                return Err(ObdError::RetriesExhausted(attempt));
            }
        }
        tokio::time::sleep(policy.retry_delay()).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test(start_paused = true)]
    async fn test_succeeds_after_failures() {
        let calls = AtomicU32::new(0);
        let policy = ReconnectPolicy {
            retry_delay_ms: 5000,
            max_attempts: None,
        };

        let result = supervise(&policy, |attempt| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if attempt < 3 {
                    Err(ObdError::LinkLost("adapter went away".into()))
                } else {
                    Ok(())
                }
            }
        })
        .await;

        assert!(result.is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_gives_up_after_max_attempts() {
        let policy = ReconnectPolicy {
            retry_delay_ms: 1000,
            max_attempts: Some(3),
        };

        let result = supervise(&policy, |_| async {
            Err(ObdError::LinkLost("no adapter".into()))
        })
        .await;

        assert!(matches!(result, Err(ObdError::RetriesExhausted(3))));
    }
}
