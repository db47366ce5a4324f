pub mod assert;
pub mod harness;
pub mod registry;

pub use crate::domain::model::{AdminAccount, AdminCredentials, ApiInput, ApiResponse, AppDescriptor, AppId};
pub use crate::domain::ports::{ConfigProvider, Interface, TestCase};
pub use crate::utils::error::Result;
