//! Service health reporting.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use mockable::Clock;
use tracing::debug;

use crate::domain::ports::{HealthQuery, UserRepository};

/// Connectivity of the backing relational store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseStatus {
    /// The store answered a probe query.
    Ok,
    /// No connection to the store could be established.
    Disconnected,
    /// A connection exists but the probe query failed.
    Error,
}

impl DatabaseStatus {
    /// Stable lowercase label used in health payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Disconnected => "disconnected",
            Self::Error => "error",
        }
    }
}

/// Point-in-time health snapshot.
///
/// `database` is `None` when the service runs without a relational store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthReport {
    pub database: Option<DatabaseStatus>,
    pub checked_at: DateTime<Utc>,
}

impl HealthReport {
    /// Overall service status. The process answering means it is up.
    pub fn status(&self) -> &'static str {
        "ok"
    }

    /// Check timestamp rendered as RFC 3339 with second precision.
    pub fn timestamp(&self) -> String {
        self.checked_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

/// Health use-case backed by the user repository probe.
#[derive(Clone)]
pub struct HealthService {
    repository: Arc<dyn UserRepository>,
    clock: Arc<dyn Clock>,
}

impl HealthService {
    /// Create a health service over the given repository.
    pub fn new(repository: Arc<dyn UserRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }
}

#[async_trait]
impl HealthQuery for HealthService {
    async fn check(&self) -> HealthReport {
        let database = self.repository.probe().await;
        debug!(database = ?database.map(DatabaseStatus::as_str), "health probe completed");
        HealthReport {
            database,
            checked_at: self.clock.utc(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockUserRepository;
    use chrono::{Local, TimeZone};
    use rstest::rstest;

    struct FixtureClock(DateTime<Utc>);

    impl Clock for FixtureClock {
        fn local(&self) -> DateTime<Local> {
            self.0.with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn fixture_clock() -> Arc<dyn Clock> {
        Arc::new(FixtureClock(
            Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 15)
                .single()
                .expect("valid fixture timestamp"),
        ))
    }

    #[rstest]
    #[case(Some(DatabaseStatus::Ok))]
    #[case(Some(DatabaseStatus::Error))]
    #[case(Some(DatabaseStatus::Disconnected))]
    #[case(None)]
    #[tokio::test]
    async fn check_reports_probe_result(#[case] probe: Option<DatabaseStatus>) {
        let mut repository = MockUserRepository::new();
        repository.expect_probe().times(1).return_const(probe);
        let service = HealthService::new(Arc::new(repository), fixture_clock());

        let report = service.check().await;

        assert_eq!(report.database, probe);
        assert_eq!(report.status(), "ok");
        assert_eq!(report.timestamp(), "2024-05-01T09:30:15Z");
    }

    #[rstest]
    fn database_status_labels() {
        assert_eq!(DatabaseStatus::Ok.as_str(), "ok");
        assert_eq!(DatabaseStatus::Disconnected.as_str(), "disconnected");
        assert_eq!(DatabaseStatus::Error.as_str(), "error");
    }
}
