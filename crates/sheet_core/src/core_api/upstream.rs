//! Helpers for the payloads the transport layer hands over: the character
//! service response envelope, the auth service token reply, and the
//! character id typed in by a user.

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use super::error::{CoreError, CoreErrorCode};

const CHARACTER_PATH_SEGMENT: &str = "/character";

/// Strips the response envelope around a character document.
///
/// Accepts the v5 shape `{ "success", "message", "data" }`, the older
/// `{ "character": ... }` wrapper, and a bare character object.
pub fn unwrap_envelope(response: Value) -> Result<Value, CoreError> {
    let Value::Object(mut map) = response else {
        return Err(CoreError::malformed(
            "character response is not a JSON object",
        ));
    };

    if let Some(success) = map.get("success") {
        if success.as_bool() == Some(false) {
            let message = map
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("request failed");
            warn!(message, "character service rejected the request");
            return Err(CoreError::new(
                CoreErrorCode::UpstreamRejection,
                format!("character service rejected the request: {message}"),
            ));
        }
        return match map.remove("data") {
            Some(data @ Value::Object(_)) => Ok(data),
            _ => Err(CoreError::new(
                CoreErrorCode::UpstreamRejection,
                "character service response carried no character data",
            )),
        };
    }

    for key in ["data", "character"] {
        if matches!(map.get(key), Some(Value::Object(_))) {
            if let Some(inner) = map.remove(key) {
                return Ok(inner);
            }
        }
    }

    Ok(Value::Object(map))
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    token: Option<String>,
}

/// Reads the bearer token out of the auth service's token-exchange reply.
pub fn access_token_from_response(bytes: &[u8]) -> Result<String, CoreError> {
    let response: TokenResponse = serde_json::from_slice(bytes).map_err(|e| {
        CoreError::malformed(format!("token exchange reply is not valid JSON: {e}"))
    })?;

    match response.token {
        Some(token) if !token.trim().is_empty() => Ok(token),
        _ => Err(CoreError::new(
            CoreErrorCode::StaleCredential,
            "token exchange returned no access token; the session cookie is likely expired",
        )),
    }
}

/// Accepts a bare numeric id or any URL containing `/character/<id>` or
/// `/characters/<id>`.
pub fn extract_character_id(input: &str) -> Option<u64> {
    let trimmed = input.trim();
    if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return trimmed.parse().ok();
    }

    for (start, _) in input.match_indices(CHARACTER_PATH_SEGMENT) {
        let rest = &input[start + CHARACTER_PATH_SEGMENT.len()..];
        let rest = rest.strip_prefix('s').unwrap_or(rest);
        let Some(rest) = rest.strip_prefix('/') else {
            continue;
        };
        let end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        if end > 0 {
            return rest[..end].parse().ok();
        }
    }

    None
}
