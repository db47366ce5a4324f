pub mod accounts;
pub mod core;
pub mod files;

pub use accounts::AccountsAppTests;
pub use self::core::CoreAppTests;
pub use files::FilesAppTests;

use crate::core::harness::TestBase;
use crate::domain::model::{AdminCredentials, AppId};
use crate::domain::ports::TestCase;

/// Builds the test cases for the requested apps, in install order.
pub fn cases_for(
    base: &TestBase,
    apps: &[AppId],
    credentials: &AdminCredentials,
) -> Vec<Box<dyn TestCase>> {
    let mut apps = apps.to_vec();
    apps.sort();
    apps.dedup();

    apps.into_iter()
        .map(|app| -> Box<dyn TestCase> {
            match app {
                AppId::Core => Box::new(CoreAppTests::new(base.clone())),
                AppId::Accounts => {
                    Box::new(AccountsAppTests::new(base.clone(), credentials.clone()))
                }
                AppId::Files => Box::new(FilesAppTests::new(base.clone())),
            }
        })
        .collect()
}
