#![allow(dead_code)]

use andromeda_harness::core::{ApiInput, ApiResponse, AppId, Interface};
use andromeda_harness::{AppRegistry, Result, TestBase};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Interface that answers from a fixed table and records every call.
pub struct ScriptedInterface {
    responses: HashMap<(String, String), ApiResponse>,
    calls: Mutex<Vec<ApiInput>>,
}

impl ScriptedInterface {
    pub fn new() -> Self {
        Self {
            responses: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn respond(self, app: AppId, action: &str, response: ApiResponse) -> Self {
        self.respond_to(app.as_str(), action, response)
    }

    /// Like [`respond`](Self::respond), for app names the harness does not know.
    pub fn respond_to(mut self, app: &str, action: &str, response: ApiResponse) -> Self {
        self.responses
            .insert((app.to_string(), action.to_string()), response);
        self
    }

    pub fn calls(&self) -> Vec<ApiInput> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, app: AppId, action: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| c.is_for(app) && c.action == action)
            .count()
    }
}

#[async_trait]
impl Interface for ScriptedInterface {
    async fn run_input(&self, input: &ApiInput) -> Result<ApiResponse> {
        self.calls.lock().unwrap().push(input.clone());
        let response = self
            .responses
            .get(&(input.app.clone(), input.action.clone()))
            .cloned()
            .unwrap_or_else(|| ApiResponse::success(serde_json::json!({})));
        Ok(response)
    }
}

/// A server where every installed app succeeds and unloaded apps are rejected.
pub fn healthy_server() -> ScriptedInterface {
    ScriptedInterface::new()
        .respond(
            AppId::Accounts,
            "install",
            ApiResponse::success(serde_json::json!({"id": "acc-admin"})),
        )
        .respond_to(
            "notanapp",
            "install",
            ApiResponse::failure(400, "UNKNOWN_APP"),
        )
}

pub fn base_with(interface: Arc<ScriptedInterface>, apps: &[AppId]) -> TestBase {
    TestBase::new(interface, AppRegistry::with_apps(apps))
}
