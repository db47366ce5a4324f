use crate::domain::model::{AdminCredentials, ApiInput, ApiResponse, AppId};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Command dispatch into a running server.
#[async_trait]
pub trait Interface: Send + Sync {
    async fn run_input(&self, input: &ApiInput) -> Result<ApiResponse>;

    async fn run(&self, app: AppId, action: &str) -> Result<ApiResponse> {
        self.run_input(&ApiInput::new(app, action)).await
    }
}

pub trait ConfigProvider: Send + Sync {
    fn apps(&self) -> &[AppId];
    fn credentials(&self) -> AdminCredentials;
}

/// One app's integration test: install first, then exercise it.
#[async_trait]
pub trait TestCase: Send + Sync {
    fn name(&self) -> &'static str;
    fn app(&self) -> AppId;
    async fn install(&self) -> Result<()>;
    async fn run_tests(&self) -> Result<()>;
}
