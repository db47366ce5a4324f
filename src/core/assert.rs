use crate::domain::model::ApiResponse;
use crate::utils::error::{HarnessError, Result};
use std::fmt::Display;

/// Fails unless the server reported success; yields the appdata.
pub fn assert_ok(app: impl Display, action: &str, response: ApiResponse) -> Result<Option<serde_json::Value>> {
    if response.ok {
        tracing::debug!("{} {} ok", app, action);
        return Ok(response.appdata);
    }

    let message = response
        .message
        .unwrap_or_else(|| "no message".to_string());
    tracing::warn!("{} {} failed ({}): {}", app, action, response.code, message);

    Err(HarnessError::AssertionFailed {
        app: app.to_string(),
        action: action.to_string(),
        code: response.code,
        message,
    })
}

/// Passes only when the server rejected the call with `expected` as its message.
pub fn assert_error(
    app: impl Display,
    action: &str,
    response: ApiResponse,
    expected: &str,
) -> Result<()> {
    if response.ok {
        return Err(HarnessError::AssertionFailed {
            app: app.to_string(),
            action: action.to_string(),
            code: response.code,
            message: format!("expected {} but call succeeded", expected),
        });
    }

    match response.message.as_deref() {
        Some(message) if message == expected => Ok(()),
        other => Err(HarnessError::AssertionFailed {
            app: app.to_string(),
            action: action.to_string(),
            code: response.code,
            message: format!("expected {} but got {}", expected, other.unwrap_or("no message")),
        }),
    }
}
