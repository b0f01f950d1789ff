//! Transport layer: HTTP and wire-format details (serialization/deserialization).

mod check;
mod user_auth_url;

pub use check::{decode_check_json_response, encode_check_query};
pub use user_auth_url::{decode_user_auth_url_json_response, encode_user_auth_url_query};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("response field `{field}` is not a valid URL: {value}")]
    InvalidUrl { field: &'static str, value: String },
}
