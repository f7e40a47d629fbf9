//! Request pacing
//!
//! The fetch loop waits a fixed delay after every processed page. The wait
//! goes through [`Pacer`] so tests can observe it without sleeping.

use async_trait::async_trait;
use std::time::Duration;

/// Waits between pages
#[async_trait]
pub trait Pacer: Send + Sync {
    /// Wait for `delay` before the next request
    async fn pause(&self, delay: Duration);
}

/// Pacer backed by the Tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioPacer;

#[async_trait]
impl Pacer for TokioPacer {
    async fn pause(&self, delay: Duration) {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}
