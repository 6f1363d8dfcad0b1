use std::{future::Future, time::Duration};

use tracing::warn;

use crate::error::MatrixProviderError;

#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: Duration::from_millis(250),
        }
    }
}

impl RetryPolicy {
    /// Runs `operation` until it succeeds, fails with a non retryable error,
    /// or `max_attempts` is reached.
    pub async fn run<T, F, Fut>(&self, mut operation: F) -> Result<T, MatrixProviderError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, MatrixProviderError>>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(error) if attempt < max_attempts && error.is_retryable() => {
                    warn!(
                        "Matrix request failed (attempt {}/{}): {}",
                        attempt, max_attempts, error
                    );
                    attempt += 1;
                    tokio::time::sleep(self.backoff).await;
                }
                Err(error) => return Err(error),
            }
        }
    }
}
