use crate::app::cases_for;
use crate::core::registry::AppRegistry;
use crate::domain::model::{AdminAccount, AdminCredentials, ApiInput, ApiResponse, AppId};
use crate::domain::ports::{Interface, TestCase};
use crate::utils::error::{ErrorSeverity, HarnessError, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;

pub type SharedRegistry = Arc<RwLock<AppRegistry>>;

/// What every test case is built from: the server interface and the app registry.
#[derive(Clone)]
pub struct TestBase {
    pub interface: Arc<dyn Interface>,
    pub main: SharedRegistry,
}

impl TestBase {
    pub fn new(interface: Arc<dyn Interface>, registry: AppRegistry) -> Self {
        Self {
            interface,
            main: Arc::new(RwLock::new(registry)),
        }
    }

    pub async fn run(&self, app: AppId, action: &str) -> Result<ApiResponse> {
        self.interface.run(app, action).await
    }

    pub async fn run_input(&self, input: &ApiInput) -> Result<ApiResponse> {
        self.interface.run_input(input).await
    }

    /// Equivalent of `appMap[app].admin`.
    pub async fn admin(&self, app: AppId) -> Result<AdminAccount> {
        let registry = self.main.read().await;
        let admin = registry.admin(app)?.clone();
        Ok(admin)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CaseOutcome {
    Passed,
    InstallFailed {
        message: String,
        severity: ErrorSeverity,
    },
    Failed {
        message: String,
        severity: ErrorSeverity,
    },
    /// Installed, but the run was aborted before its tests.
    NotRun,
    /// Never installed because an earlier install failed.
    Skipped,
}

impl CaseOutcome {
    fn install_failed(e: &HarnessError) -> Self {
        CaseOutcome::InstallFailed {
            message: e.to_string(),
            severity: e.severity(),
        }
    }

    fn failed(e: &HarnessError) -> Self {
        CaseOutcome::Failed {
            message: e.to_string(),
            severity: e.severity(),
        }
    }

    pub fn severity(&self) -> Option<ErrorSeverity> {
        match self {
            CaseOutcome::InstallFailed { severity, .. } | CaseOutcome::Failed { severity, .. } => {
                Some(*severity)
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CaseReport {
    pub name: String,
    pub app: AppId,
    pub outcome: CaseOutcome,
    pub duration_ms: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SuiteReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub cases: Vec<CaseReport>,
}

impl SuiteReport {
    pub fn passed(&self) -> usize {
        self.cases
            .iter()
            .filter(|c| c.outcome == CaseOutcome::Passed)
            .count()
    }

    pub fn failed(&self) -> usize {
        self.cases
            .iter()
            .filter(|c| c.outcome.severity().is_some())
            .count()
    }

    pub fn is_success(&self) -> bool {
        self.cases
            .iter()
            .all(|c| c.outcome == CaseOutcome::Passed)
    }

    pub fn worst_severity(&self) -> Option<ErrorSeverity> {
        self.cases.iter().filter_map(|c| c.outcome.severity()).max()
    }

    /// 0 when every case passed, otherwise the exit code of the worst failure.
    pub fn exit_code(&self) -> i32 {
        match self.worst_severity() {
            Some(severity) => severity.exit_code(),
            None if self.is_success() => 0,
            None => ErrorSeverity::High.exit_code(),
        }
    }
}

/// Runs every case's install in dependency order, then every case's tests.
pub struct Harness {
    base: TestBase,
    cases: Vec<Box<dyn TestCase>>,
}

impl Harness {
    pub fn new(interface: Arc<dyn Interface>, registry: AppRegistry) -> Self {
        Self {
            base: TestBase::new(interface, registry),
            cases: Vec::new(),
        }
    }

    /// A harness with one case per requested app, all sharing this harness's registry.
    pub fn for_apps(
        interface: Arc<dyn Interface>,
        apps: &[AppId],
        credentials: &AdminCredentials,
    ) -> Self {
        let mut harness = Self::new(interface, AppRegistry::with_apps(apps));
        for case in cases_for(&harness.base, apps, credentials) {
            harness.add_case(case);
        }
        harness
    }

    /// Cases must be built from [`Harness::base`] so they see the same registry.
    pub fn add_case(&mut self, case: Box<dyn TestCase>) {
        self.cases.push(case);
        self.cases.sort_by_key(|c| c.app());
    }

    pub fn base(&self) -> &TestBase {
        &self.base
    }

    pub fn case_names(&self) -> Vec<&'static str> {
        self.cases.iter().map(|c| c.name()).collect()
    }

    pub async fn run(&self) -> SuiteReport {
        let started_at = Utc::now();
        tracing::info!("Running {} test case(s)", self.cases.len());

        {
            let mut registry = self.base.main.write().await;
            for case in &self.cases {
                registry.register(case.app());
            }
        }

        let mut reports: Vec<CaseReport> = self
            .cases
            .iter()
            .map(|c| CaseReport {
                name: c.name().to_string(),
                app: c.app(),
                outcome: CaseOutcome::Skipped,
                duration_ms: 0,
            })
            .collect();

        for (index, case) in self.cases.iter().enumerate() {
            tracing::info!("Installing {}", case.name());
            let start = Instant::now();
            let result = case.install().await;
            reports[index].duration_ms += start.elapsed().as_millis() as u64;

            if let Err(e) = result {
                // later apps depend on this one, so nothing else can run
                tracing::error!("❌ {} install failed: {}", case.name(), e);
                reports[index].outcome = CaseOutcome::install_failed(&e);
                for report in &mut reports[..index] {
                    report.outcome = CaseOutcome::NotRun;
                }
                return SuiteReport {
                    started_at,
                    finished_at: Utc::now(),
                    cases: reports,
                };
            }

            if let Err(e) = self.base.main.write().await.mark_installed(case.app()) {
                tracing::warn!("Could not mark {} installed: {}", case.app(), e);
            }
        }

        for (case, report) in self.cases.iter().zip(reports.iter_mut()) {
            tracing::info!("Testing {}", case.name());
            let start = Instant::now();
            let result = case.run_tests().await;
            report.duration_ms += start.elapsed().as_millis() as u64;

            report.outcome = match result {
                Ok(()) => {
                    tracing::info!("✅ {} passed", case.name());
                    CaseOutcome::Passed
                }
                Err(e) => {
                    tracing::error!("❌ {} failed: {}", case.name(), e);
                    CaseOutcome::failed(&e)
                }
            };
        }

        SuiteReport {
            started_at,
            finished_at: Utc::now(),
            cases: reports,
        }
    }
}
