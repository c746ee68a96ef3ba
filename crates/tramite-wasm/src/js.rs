//! Small helpers for JS interop errors

use tracing::warn;
use wasm_bindgen::JsValue;

use tramite_site::SiteError;

/// Human-readable text for a thrown JS value
pub(crate) fn describe(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

/// Log a failed DOM call instead of propagating it
pub(crate) fn report<T>(result: Result<T, JsValue>, action: &str) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(action, error = %describe(&err), "browser call failed");
            None
        }
    }
}

/// Surface a site error to JavaScript
pub(crate) fn to_js(err: SiteError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
