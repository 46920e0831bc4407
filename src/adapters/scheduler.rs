use crate::domain::ports::Scheduler;
use async_trait::async_trait;
use std::time::Duration;

/// Waits on the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioScheduler;

#[async_trait]
impl Scheduler for TokioScheduler {
    async fn delay(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Returns immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

#[async_trait]
impl Scheduler for NoDelay {
    async fn delay(&self, _duration: Duration) {}
}
