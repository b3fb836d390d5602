use crate::errors::Result;
use crate::observability::MetricsRecorder;
use crate::storage::BucketHandle;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Answers whether a dependency process is reachable. Implementations absorb
/// their own failures into `false`.
#[async_trait]
pub trait LivenessProbe: Send + Sync {
    async fn is_running(&self) -> bool;
}

/// Obtains a working handle to the storage bucket
#[async_trait]
pub trait BucketResolver: Send + Sync {
    async fn resolve_bucket(&self) -> Result<BucketHandle>;
}

/// External dependency covered by the status check
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dependency {
    Geodb,
    Storage,
}

impl Dependency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dependency::Geodb => "geodb",
            Dependency::Storage => "storage",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Ok,
    Error,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Ok => "ok",
            Status::Error => "error",
        }
    }

    pub fn is_ok(&self) -> bool {
        *self == Status::Ok
    }
}

impl From<bool> for Status {
    fn from(ok: bool) -> Self {
        if ok {
            Status::Ok
        } else {
            Status::Error
        }
    }
}

/// Per-dependency outcome of one status check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HealthReport {
    checks: BTreeMap<Dependency, Status>,
}

impl HealthReport {
    pub fn new(geodb: Status, storage: Status) -> Self {
        let checks = BTreeMap::from([(Dependency::Geodb, geodb), (Dependency::Storage, storage)]);
        Self { checks }
    }

    pub fn get(&self, dependency: Dependency) -> Status {
        // Both keys are always present.
        self.checks
            .get(&dependency)
            .copied()
            .unwrap_or(Status::Error)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Dependency, Status)> + '_ {
        self.checks.iter().map(|(d, s)| (*d, *s))
    }

    pub fn all_ok(&self) -> bool {
        self.checks.values().all(Status::is_ok)
    }

    /// The line printed by the `status` command
    pub fn status_line(&self) -> String {
        format!("Everything seems to work properly: {}", self)
    }
}

/// Renders as `{'geodb': 'ok', 'storage': 'error'}`
impl fmt::Display for HealthReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (dependency, status)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "'{}': '{}'", dependency.as_str(), status.as_str())?;
        }
        f.write_str("}")
    }
}

/// Wrap a line in the bold green used for success messages on terminals
pub fn style_success(line: &str, colored: bool) -> String {
    if colored {
        format!("\x1b[32;1m{}\x1b[0m", line)
    } else {
        line.to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LivenessStatus {
    pub status: String,
    pub version: String,
}

pub struct HealthChecker {
    geodb: Arc<dyn LivenessProbe>,
    storage: Arc<dyn BucketResolver>,
}

impl HealthChecker {
    pub fn new(geodb: Arc<dyn LivenessProbe>, storage: Arc<dyn BucketResolver>) -> Self {
        Self { geodb, storage }
    }

    /// Liveness check - is the service running?
    pub async fn liveness(&self) -> LivenessStatus {
        LivenessStatus {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Probe every dependency and collect the results.
    ///
    /// Both probes always run, one after the other. Failures end up in the
    /// report and are never returned to the caller.
    pub async fn check_health(&self) -> HealthReport {
        let geodb = self.check_geodb().await;
        let storage = self.check_storage().await;

        let report = HealthReport::new(geodb, storage);
        for (dependency, status) in report.iter() {
            MetricsRecorder::record_dependency_check(dependency.as_str(), status.as_str());
        }

        if report.all_ok() {
            tracing::info!(
                geodb = geodb.as_str(),
                storage = storage.as_str(),
                "Status check completed"
            );
        } else {
            tracing::warn!(
                geodb = geodb.as_str(),
                storage = storage.as_str(),
                "Status check found unavailable dependencies"
            );
        }

        report
    }

    async fn check_geodb(&self) -> Status {
        Status::from(self.geodb.is_running().await)
    }

    async fn check_storage(&self) -> Status {
        match self.storage.resolve_bucket().await {
            Ok(bucket) => {
                tracing::debug!(bucket = %bucket.name, "Storage bucket resolved");
                Status::Ok
            }
            Err(e) => {
                tracing::warn!(error = %e, "Storage check failed");
                Status::Error
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::errors::AppError;
    use reqwest::Url;

    pub struct FakeGeodb(pub bool);

    #[async_trait]
    impl LivenessProbe for FakeGeodb {
        async fn is_running(&self) -> bool {
            self.0
        }
    }

    pub struct FakeStorage(pub bool);

    #[async_trait]
    impl BucketResolver for FakeStorage {
        async fn resolve_bucket(&self) -> Result<BucketHandle> {
            if self.0 {
                Ok(BucketHandle {
                    name: "qfieldcloud-local".to_string(),
                    url: Url::parse("http://minio:9000/qfieldcloud-local").unwrap(),
                })
            } else {
                Err(AppError::StorageUnavailable("NoSuchBucket".to_string()))
            }
        }
    }

    pub fn checker(geodb_up: bool, storage_up: bool) -> HealthChecker {
        HealthChecker::new(Arc::new(FakeGeodb(geodb_up)), Arc::new(FakeStorage(storage_up)))
    }
}
