use crate::adapters::parse_envelope;
use crate::domain::model::{ApiInput, ApiResponse};
use crate::domain::ports::Interface;
use crate::utils::error::{HarnessError, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;
use tokio::process::Command;

/// Runs commands through the server's CLI entry point (`php index.php`).
#[derive(Debug, Clone)]
pub struct CliInterface {
    php_binary: String,
    server_root: PathBuf,
    timeout: Duration,
}

impl CliInterface {
    pub fn new(php_binary: impl Into<String>, server_root: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            php_binary: php_binary.into(),
            server_root: server_root.into(),
            timeout,
        }
    }

    /// `<root>/index.php --json <app> <action> --key value ...`
    pub fn command_args(&self, input: &ApiInput) -> Vec<String> {
        let mut args = vec![
            self.server_root.join("index.php").to_string_lossy().into_owned(),
            "--json".to_string(),
            input.app.clone(),
            input.action.clone(),
        ];
        for (key, value) in &input.params {
            args.push(format!("--{}", key));
            args.push(value.clone());
        }
        args
    }
}

#[async_trait]
impl Interface for CliInterface {
    async fn run_input(&self, input: &ApiInput) -> Result<ApiResponse> {
        let args = self.command_args(input);
        tracing::debug!("Running {} {} via {}", input.app, input.action, self.php_binary);

        let output = tokio::time::timeout(
            self.timeout,
            Command::new(&self.php_binary)
                .args(&args)
                .kill_on_drop(true)
                .output(),
        )
        .await
        .map_err(|_| HarnessError::Timeout {
            seconds: self.timeout.as_secs(),
        })??;

        // failed actions still print an envelope, so the exit status alone means nothing
        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_envelope(&stdout).map_err(|e| {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::warn!("{} exited with {}: {}", self.php_binary, output.status, stderr.trim());
            e
        })
    }
}
