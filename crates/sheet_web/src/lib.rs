use serde::{Deserialize, Serialize};
use sheet_core::core_api::{Engine, extract_character_id};
use sheet_core::patches::PatchTable;
use sheet_render::{JsonStyle, render_json_full, render_text_sheet};
use wasm_bindgen::prelude::*;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WebRenderOptions {
    pub json_output: bool,
    pub apply_patches: bool,
}

impl Default for WebRenderOptions {
    fn default() -> Self {
        Self {
            json_output: false,
            apply_patches: true,
        }
    }
}

#[derive(Debug, Clone)]
struct WebError {
    code: &'static str,
    message: String,
}

#[derive(Debug, Clone, Serialize)]
struct WebErrorPayload {
    code: String,
    message: String,
}

impl WebError {
    fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    fn to_js_value(&self) -> JsValue {
        let payload = WebErrorPayload {
            code: self.code.to_string(),
            message: self.message.clone(),
        };
        serde_wasm_bindgen::to_value(&payload).unwrap_or_else(|_| {
            JsValue::from_str(&format!("{}: {}", payload.code, payload.message))
        })
    }
}

#[wasm_bindgen]
pub fn render_character_text(character_json: &str, options: JsValue) -> Result<String, JsValue> {
    let parsed_options = parse_options(options).map_err(|err| err.to_js_value())?;
    render_character_text_impl(character_json, &parsed_options).map_err(|err| err.to_js_value())
}

/// Accepts a bare id or any character URL and returns the numeric id as a string.
#[wasm_bindgen]
pub fn character_id_from_input(input: &str) -> Option<String> {
    extract_character_id(input).map(|id| id.to_string())
}

fn render_character_text_impl(
    character_json: &str,
    options: &WebRenderOptions,
) -> Result<String, WebError> {
    if character_json.trim().is_empty() {
        return Err(WebError::new(
            "empty_input",
            "No character JSON was provided. Paste the character service response.",
        ));
    }

    let engine = if options.apply_patches {
        Engine::new()
    } else {
        Engine::new().with_patches(PatchTable::empty())
    };
    let session = engine
        .open_bytes(character_json)
        .map_err(|err| WebError::new(err.code.as_str(), err.message))?;
    let character = session.character();

    if options.json_output {
        let value = render_json_full(character, JsonStyle::CanonicalV1);
        return serde_json::to_string_pretty(&value).map_err(|err| {
            WebError::new(
                "render_failed",
                format!("failed to serialize rendered JSON output: {err}"),
            )
        });
    }

    Ok(render_text_sheet(character))
}

fn parse_options(options: JsValue) -> Result<WebRenderOptions, WebError> {
    if options.is_null() || options.is_undefined() {
        return Ok(WebRenderOptions::default());
    }

    serde_wasm_bindgen::from_value(options).map_err(|err| {
        WebError::new(
            "invalid_options",
            format!("Failed to parse web render options: {err}"),
        )
    })
}
