pub mod cases;

pub use cases::{cases_for, AccountsAppTests, CoreAppTests, FilesAppTests};
