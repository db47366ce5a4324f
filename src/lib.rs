pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliArgs;

pub use adapters::{CliInterface, HttpInterface};
pub use app::{cases_for, FilesAppTests};
pub use domain::model::AdminCredentials;
pub use config::HarnessConfig;
pub use core::harness::{Harness, SuiteReport, TestBase};
pub use core::registry::AppRegistry;
pub use utils::error::{HarnessError, Result};
