// Adapters layer: concrete ways of reaching a running server.

pub mod cli;
pub mod http;

pub use cli::CliInterface;
pub use http::HttpInterface;

use crate::domain::model::ApiResponse;
use crate::utils::error::{HarnessError, Result};

/// Parses the JSON envelope printed by every Andromeda interface.
pub(crate) fn parse_envelope(body: &str) -> Result<ApiResponse> {
    serde_json::from_str(body.trim()).map_err(|e| HarnessError::InterfaceError {
        message: format!("invalid response envelope ({}): {}", e, preview(body)),
    })
}

fn preview(body: &str) -> String {
    const MAX: usize = 200;
    let body = body.trim();
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
