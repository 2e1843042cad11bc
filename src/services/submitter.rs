use crate::data::UserInsertData;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("backend rejected the insert: {0}")]
    Backend(String),

    #[error("insert timed out after {0:?}")]
    Timeout(Duration),
}

/// The remote call behind the insert form's submit button
#[async_trait]
pub trait Submitter: Send + Sync {
    async fn submit(&self, data: &UserInsertData) -> Result<(), SubmitError>;
}

/// Accepts everything after a fixed delay
#[derive(Debug, Clone)]
pub struct SimulatedSubmitter {
    delay: Duration,
}

impl SimulatedSubmitter {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl Submitter for SimulatedSubmitter {
    async fn submit(&self, data: &UserInsertData) -> Result<(), SubmitError> {
        tracing::debug!(
            "Simulating insert of {} {} ({:?})",
            data.first_name,
            data.last_name,
            self.delay
        );
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_simulated_submitter_waits_then_succeeds() {
        let submitter = SimulatedSubmitter::new(Duration::from_millis(1500));
        let start = tokio::time::Instant::now();
        submitter.submit(&UserInsertData::default()).await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(1500));
    }
}
