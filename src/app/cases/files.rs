use crate::core::assert::assert_ok;
use crate::core::harness::TestBase;
use crate::domain::model::AppId;
use crate::domain::ports::TestCase;
use crate::utils::error::Result;
use async_trait::async_trait;

pub struct FilesAppTests {
    base: TestBase,
}

impl FilesAppTests {
    pub fn new(base: TestBase) -> Self {
        Self { base }
    }
}

#[async_trait]
impl TestCase for FilesAppTests {
    fn name(&self) -> &'static str {
        "FILES"
    }

    fn app(&self) -> AppId {
        AppId::Files
    }

    async fn install(&self) -> Result<()> {
        let response = self.base.run(AppId::Files, "install").await?;
        assert_ok(AppId::Files, "install", response)?;
        Ok(())
    }

    async fn run_tests(&self) -> Result<()> {
        let admin = self.base.admin(AppId::Accounts).await?;
        tracing::debug!("FILES found accounts admin {}", admin.username);

        let response = self.base.run(AppId::Files, "getconfig").await?;
        assert_ok(AppId::Files, "getconfig", response)?;
        Ok(())
    }
}
