use serde::Deserialize;

use super::TransportError;
use crate::domain::{ConsentUrl, ConsentUrlRequest, ReturnUrl, Scope};

#[derive(Debug, Clone, Deserialize)]
struct UserAuthUrlJsonResponse {
    url: String,
}

pub fn encode_user_auth_url_query(request: &ConsentUrlRequest) -> Vec<(String, String)> {
    vec![
        (Scope::FIELD.to_owned(), request.scope().to_param()),
        (
            ReturnUrl::FIELD.to_owned(),
            request.return_url().as_str().to_owned(),
        ),
    ]
}

pub fn decode_user_auth_url_json_response(json: &str) -> Result<ConsentUrl, TransportError> {
    let parsed: UserAuthUrlJsonResponse = serde_json::from_str(json)?;
    ConsentUrl::parse(&parsed.url).map_err(|_| TransportError::InvalidUrl {
        field: ConsentUrl::FIELD,
        value: parsed.url,
    })
}
