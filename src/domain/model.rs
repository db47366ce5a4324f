use crate::utils::error::HarnessError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Apps the harness knows how to install and test, in install order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppId {
    Core,
    Accounts,
    Files,
}

impl AppId {
    pub const ALL: [AppId; 3] = [AppId::Core, AppId::Accounts, AppId::Files];

    pub fn as_str(&self) -> &'static str {
        match self {
            AppId::Core => "core",
            AppId::Accounts => "accounts",
            AppId::Files => "files",
        }
    }

    /// Apps that must be installed before this one.
    pub fn dependencies(&self) -> &'static [AppId] {
        match self {
            AppId::Core => &[],
            AppId::Accounts => &[AppId::Core],
            AppId::Files => &[AppId::Core, AppId::Accounts],
        }
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppId {
    type Err = HarnessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "core" => Ok(AppId::Core),
            "accounts" => Ok(AppId::Accounts),
            "files" => Ok(AppId::Files),
            _ => Err(HarnessError::UnknownApp {
                name: s.to_string(),
            }),
        }
    }
}

/// A single command for the server: `<app> <action> --key value ...`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiInput {
    pub app: String,
    pub action: String,
    pub params: BTreeMap<String, String>,
}

impl ApiInput {
    pub fn new(app: AppId, action: impl Into<String>) -> Self {
        Self::unregistered(app.as_str(), action)
    }

    /// A command addressed to an app name the harness does not know, for rejection checks.
    pub fn unregistered(app: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            app: app.into(),
            action: action.into(),
            params: BTreeMap::new(),
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn is_for(&self, app: AppId) -> bool {
        self.app == app.as_str()
    }
}

/// JSON envelope every Andromeda interface answers with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub ok: bool,
    pub code: u16,
    #[serde(default)]
    pub appdata: Option<serde_json::Value>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiResponse {
    pub fn success(appdata: serde_json::Value) -> Self {
        Self {
            ok: true,
            code: 200,
            appdata: Some(appdata),
            message: None,
        }
    }

    pub fn failure(code: u16, message: impl Into<String>) -> Self {
        Self {
            ok: false,
            code,
            appdata: None,
            message: Some(message.into()),
        }
    }
}

/// Username and password for the admin created by `accounts install`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminAccount {
    pub id: Option<String>,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDescriptor {
    pub id: AppId,
    pub installed: bool,
    pub admin: Option<AdminAccount>,
}

impl AppDescriptor {
    pub fn new(id: AppId) -> Self {
        Self {
            id,
            installed: false,
            admin: None,
        }
    }
}
