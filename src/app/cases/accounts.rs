use crate::core::assert::assert_ok;
use crate::core::harness::TestBase;
use crate::domain::model::{AdminAccount, AdminCredentials, ApiInput, AppId};
use crate::domain::ports::TestCase;
use crate::utils::error::{HarnessError, Result};
use async_trait::async_trait;

pub struct AccountsAppTests {
    base: TestBase,
    credentials: AdminCredentials,
}

impl AccountsAppTests {
    pub fn new(base: TestBase, credentials: AdminCredentials) -> Self {
        Self { base, credentials }
    }
}

#[async_trait]
impl TestCase for AccountsAppTests {
    fn name(&self) -> &'static str {
        "ACCOUNTS"
    }

    fn app(&self) -> AppId {
        AppId::Accounts
    }

    async fn install(&self) -> Result<()> {
        let input = ApiInput::new(AppId::Accounts, "install")
            .with_param("username", self.credentials.username.clone())
            .with_param("password", self.credentials.password.clone());
        let response = self.base.run_input(&input).await?;
        let appdata = assert_ok(AppId::Accounts, "install", response)?;

        let id = appdata
            .as_ref()
            .and_then(|data| data.get("id"))
            .and_then(|id| id.as_str())
            .map(str::to_string);

        let admin = AdminAccount {
            id,
            username: self.credentials.username.clone(),
        };
        tracing::debug!("Registered admin {:?}", admin);

        let mut registry = self.base.main.write().await;
        registry.register(AppId::Accounts).admin = Some(admin);
        Ok(())
    }

    /// Later apps rely on the admin recorded at install time.
    async fn run_tests(&self) -> Result<()> {
        let admin = self.base.admin(AppId::Accounts).await?;

        if admin.username != self.credentials.username {
            return Err(HarnessError::AssertionFailed {
                app: AppId::Accounts.to_string(),
                action: "install".to_string(),
                code: 200,
                message: format!(
                    "expected admin {} but registry holds {}",
                    self.credentials.username, admin.username
                ),
            });
        }
        Ok(())
    }
}
