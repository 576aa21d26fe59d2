//! Bounded retry with a fixed pause between attempts.
//!
//! Every failure is retried the same way: there is no backoff, no jitter and
//! no distinction between status codes. The pause goes through [`Delay`] so
//! tests can run the loop without real timers.

use crate::error::Result;
use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;

#[async_trait]
pub trait Delay: Send + Sync {
    async fn wait(&self, duration: Duration);
}

/// Sleeps on the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioDelay;

#[async_trait]
impl Delay for TokioDelay {
    async fn wait(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }

    /// A zero attempt budget still makes one attempt.
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    pub async fn run<T, F, Fut>(&self, delay: &dyn Delay, mut operation: F) -> Result<T>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let attempts = self.attempts();
        let mut attempt = 1;

        loop {
            match operation(attempt).await {
                Ok(value) => {
                    if attempt > 1 {
                        log::info!("Request succeeded on attempt {}/{}", attempt, attempts);
                    }
                    return Ok(value);
                }
                Err(e) if attempt >= attempts => {
                    log::error!("Giving up after {} attempts: {}", attempts, e);
                    return Err(e);
                }
                Err(e) => {
                    log::warn!(
                        "Attempt {}/{} failed: {}; retrying in {}ms",
                        attempt,
                        attempts,
                        e,
                        self.delay.as_millis()
                    );
                    delay.wait(self.delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy::new(
            crate::config::DEFAULT_RETRY_COUNT,
            crate::config::DEFAULT_RETRY_DELAY,
        )
    }
}
