use serde::Serialize;
use strum::IntoEnumIterator;
use wasm_bindgen::prelude::*;

use crate::taxonomy::classify::ErrorClassifier;
use crate::taxonomy::presentation::{category_title, present};
use crate::taxonomy::{ErrorCategory, NormalizedError};
use crate::timestamp::parse_reported_timestamp;
use crate::types::{RawFailure, TransportFailure};

fn to_js<T: Serialize>(value: &T) -> JsValue {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    value.serialize(&serializer).unwrap_or(JsValue::NULL)
}

fn classified_result(error: &NormalizedError) -> JsValue {
    let obj = serde_json::json!({
        "error": error,
        "code": error.code(),
        "category": error.category().as_ref(),
        "retryable": error.is_retryable(),
        "field": error.field(),
        "presentation": present(error),
    });
    to_js(&obj)
}

fn error_result(msg: &str) -> JsValue {
    let obj = serde_json::json!({"error": msg});
    to_js(&obj)
}

/// Classify an HTTP failure and return the error with its presentation.
#[wasm_bindgen]
pub fn classify_http_failure(status: u16, body: Option<String>) -> JsValue {
    let raw = RawFailure::Http {
        status,
        body: body.map(String::into_bytes),
    };
    classified_result(&ErrorClassifier::default().classify(raw))
}

/// Classify a transport signal by its snake_case name (e.g. `"timed_out"`).
#[wasm_bindgen]
pub fn classify_transport_failure(kind: &str) -> JsValue {
    let failure = TransportFailure::from_signal(kind);
    classified_result(&ErrorClassifier::default().classify(failure.into()))
}

/// Present a previously serialized `NormalizedError`.
#[wasm_bindgen]
pub fn present_json(json: &str) -> JsValue {
    match serde_json::from_str::<NormalizedError>(json) {
        Ok(error) => to_js(&present(&error)),
        Err(_) => error_result("Invalid NormalizedError JSON"),
    }
}

/// RFC 3339 form of a backend report timestamp, or null when unrecognized.
#[wasm_bindgen]
pub fn parse_timestamp(raw: &str) -> Option<String> {
    parse_reported_timestamp(raw)
        .ok()
        .map(|instant| instant.to_rfc3339())
}

/// Category ids with their presentation titles.
#[wasm_bindgen]
pub fn all_categories() -> JsValue {
    let result: Vec<serde_json::Value> = ErrorCategory::iter()
        .map(|category| {
            serde_json::json!({
                "id": category.as_ref(),
                "title": category_title(category),
            })
        })
        .collect();
    to_js(&result)
}
