use crate::adapters::{CliInterface, HttpInterface};
use crate::core::{AdminCredentials, AppId, ConfigProvider, Interface};
use crate::utils::error::{HarnessError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarnessConfig {
    pub interface: InterfaceConfig,
    pub accounts: AccountsConfig,
    #[serde(default)]
    pub run: RunConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterfaceKind {
    Cli,
    Http,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterfaceConfig {
    pub kind: InterfaceKind,
    pub php_binary: Option<String>,
    pub server_root: Option<String>,
    pub url: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountsConfig {
    pub admin_username: String,
    pub admin_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default = "RunConfig::default_apps")]
    pub apps: Vec<AppId>,
}

impl RunConfig {
    fn default_apps() -> Vec<AppId> {
        AppId::ALL.to_vec()
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            apps: Self::default_apps(),
        }
    }
}

impl HarnessConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| HarnessError::ConfigError {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    fn env_var_pattern() -> Result<Regex> {
        Regex::new(r"\$\{([^}]+)\}").map_err(|e| HarnessError::ConfigError {
            message: e.to_string(),
        })
    }

    /// Replaces `${VAR}` with the environment value; unset variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Self::env_var_pattern()?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// First `${VAR}` in `value` naming a variable that is not set.
    fn unresolved_env_var(value: &str) -> Result<Option<String>> {
        let re = Self::env_var_pattern()?;
        let missing = re
            .captures_iter(value)
            .map(|caps| caps[1].to_string())
            .find(|name| std::env::var(name).is_err());
        Ok(missing)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.interface.timeout_seconds.unwrap_or(30))
    }

    pub fn php_binary(&self) -> &str {
        self.interface.php_binary.as_deref().unwrap_or("php")
    }

    /// Builds the interface adapter named by `interface.kind`.
    pub fn build_interface(&self) -> Result<Arc<dyn Interface>> {
        match self.interface.kind {
            InterfaceKind::Cli => {
                let root = validation::validate_required_field(
                    "interface.server_root",
                    &self.interface.server_root,
                )?;
                Ok(Arc::new(CliInterface::new(
                    self.php_binary(),
                    root.as_str(),
                    self.timeout(),
                )))
            }
            InterfaceKind::Http => {
                let url = validation::validate_required_field("interface.url", &self.interface.url)?;
                Ok(Arc::new(HttpInterface::new(url.as_str(), self.timeout())?))
            }
        }
    }

    pub fn validate_config(&self) -> Result<()> {
        match self.interface.kind {
            InterfaceKind::Cli => {
                let root = validation::validate_required_field(
                    "interface.server_root",
                    &self.interface.server_root,
                )?;
                validation::validate_path("interface.server_root", root)?;
                validation::validate_non_empty_string("interface.php_binary", self.php_binary())?;
            }
            InterfaceKind::Http => {
                let url = validation::validate_required_field("interface.url", &self.interface.url)?;
                validation::validate_url("interface.url", url)?;
            }
        }

        if let Some(timeout) = self.interface.timeout_seconds {
            validation::validate_range("interface.timeout_seconds", timeout, 1, 3600)?;
        }

        validation::validate_non_empty_string("accounts.admin_username", &self.accounts.admin_username)?;
        if let Some(name) = Self::unresolved_env_var(&self.accounts.admin_password)? {
            return Err(HarnessError::InvalidConfigValueError {
                field: "accounts.admin_password".to_string(),
                value: format!("${{{}}}", name),
                reason: "environment variable is not set".to_string(),
            });
        }

        if self.run.apps.is_empty() {
            return Err(HarnessError::InvalidConfigValueError {
                field: "run.apps".to_string(),
                value: "[]".to_string(),
                reason: "At least one app must be selected".to_string(),
            });
        }

        for app in &self.run.apps {
            for dep in app.dependencies() {
                if !self.run.apps.contains(dep) {
                    return Err(HarnessError::InvalidConfigValueError {
                        field: "run.apps".to_string(),
                        value: app.to_string(),
                        reason: format!("{} requires {}", app, dep),
                    });
                }
            }
        }

        Ok(())
    }
}

impl ConfigProvider for HarnessConfig {
    fn apps(&self) -> &[AppId] {
        &self.run.apps
    }

    fn credentials(&self) -> AdminCredentials {
        AdminCredentials {
            username: self.accounts.admin_username.clone(),
            password: self.accounts.admin_password.clone(),
        }
    }
}

impl Validate for HarnessConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
