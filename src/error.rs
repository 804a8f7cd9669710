//! Errors raised while configuring or attaching a particle field.
//!
//! The simulation itself cannot fail; everything here happens before the
//! first frame.

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Error, Debug)]
pub enum FieldError {
    #[error("invalid config: {field} {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("dom error: {0}")]
    Dom(String),
}

impl FieldError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        FieldError::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }

    // DOM calls hand back opaque JsValues; keep whatever text they carry
    pub(crate) fn dom(value: JsValue) -> Self {
        FieldError::Dom(
            value
                .as_string()
                .unwrap_or_else(|| format!("{:?}", value)),
        )
    }
}

impl From<FieldError> for JsValue {
    fn from(err: FieldError) -> JsValue {
        JsValue::from_str(&err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FieldError>;
