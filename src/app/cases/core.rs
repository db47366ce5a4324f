use crate::core::assert::{assert_error, assert_ok};
use crate::core::harness::TestBase;
use crate::domain::model::{ApiInput, AppId};
use crate::domain::ports::TestCase;
use crate::utils::error::Result;
use async_trait::async_trait;

const UNLOADED_APP: &str = "notanapp";

pub struct CoreAppTests {
    base: TestBase,
}

impl CoreAppTests {
    pub fn new(base: TestBase) -> Self {
        Self { base }
    }
}

#[async_trait]
impl TestCase for CoreAppTests {
    fn name(&self) -> &'static str {
        "CORE"
    }

    fn app(&self) -> AppId {
        AppId::Core
    }

    async fn install(&self) -> Result<()> {
        let response = self.base.run(AppId::Core, "install").await?;
        assert_ok(AppId::Core, "install", response)?;
        Ok(())
    }

    /// The dispatcher must reject apps it never loaded.
    async fn run_tests(&self) -> Result<()> {
        let input = ApiInput::unregistered(UNLOADED_APP, "install");
        let response = self.base.run_input(&input).await?;
        assert_error(UNLOADED_APP, "install", response, "UNKNOWN_APP")
    }
}
