//! Driving port for health reporting.

use async_trait::async_trait;

use crate::domain::HealthReport;

/// Health check use-case. Never fails: degraded store connectivity is
/// reported in the returned snapshot.
#[async_trait]
pub trait HealthQuery: Send + Sync {
    /// Take a health snapshot.
    async fn check(&self) -> HealthReport;
}
