use serde::Deserialize;

use super::TransportError;
use crate::domain::{AuthorizationStatus, Scope};

#[derive(Debug, Clone, Deserialize)]
struct CheckJsonResponse {
    authorized: bool,
}

pub fn encode_check_query(scope: &Scope) -> Vec<(String, String)> {
    vec![(Scope::FIELD.to_owned(), scope.to_param())]
}

pub fn decode_check_json_response(json: &str) -> Result<AuthorizationStatus, TransportError> {
    let parsed: CheckJsonResponse = serde_json::from_str(json)?;
    Ok(AuthorizationStatus {
        authorized: parsed.authorized,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_check_query_joins_scope() {
        let scope = Scope::parse("SMS, MIM").unwrap();
        assert_eq!(
            encode_check_query(&scope),
            vec![("scope".to_owned(), "SMS,MIM".to_owned())]
        );
    }

    #[test]
    fn decode_reads_authorized_flag() {
        let status = decode_check_json_response(r#"{ "authorized": true }"#).unwrap();
        assert!(status.authorized);

        let status = decode_check_json_response(r#"{"authorized":false,"extra":1}"#).unwrap();
        assert!(!status.authorized);
    }

    #[test]
    fn decode_rejects_missing_or_non_boolean_flag() {
        assert!(matches!(
            decode_check_json_response("{}"),
            Err(TransportError::Json(_))
        ));
        assert!(matches!(
            decode_check_json_response(r#"{"authorized":"true"}"#),
            Err(TransportError::Json(_))
        ));
        assert!(matches!(
            decode_check_json_response("not json"),
            Err(TransportError::Json(_))
        ));
    }
}
