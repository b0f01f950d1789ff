//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod response;
pub mod retry;
mod validation;
mod value;

pub use request::{AuthorizationRequest, ConsentUrlRequest};
pub use response::{AuthorizationStatus, AuthorizeOutcome, Redirect};
pub use retry::DEFAULT_RETRY_PARAM;
pub use validation::{ValidationError, require_params};
pub use value::{ConsentUrl, RetryCount, ReturnUrl, Scope, ServiceName};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_name_rejects_blank_and_separators() {
        assert!(ServiceName::new("   ").is_err());
        assert!(ServiceName::new("SMS,MMS").is_err());
        assert!(ServiceName::new("S MS").is_err());
        assert_eq!(ServiceName::new(" SMS ").unwrap().as_str(), "SMS");
    }

    #[test]
    fn scope_parse_trims_and_dedups_in_order() {
        let scope = Scope::parse("MIM, SMS,,MIM , TL").unwrap();
        assert_eq!(scope.to_param(), "MIM,SMS,TL");
        assert_eq!(scope.services().len(), 3);
    }

    #[test]
    fn empty_scope_is_a_missing_parameter() {
        assert_eq!(
            Scope::parse(" , ").unwrap_err(),
            ValidationError::MissingParameters {
                fields: vec![Scope::FIELD]
            }
        );
        assert!(Scope::new(Vec::new()).is_err());
    }

    #[test]
    fn return_url_must_be_absolute() {
        assert!(matches!(
            ReturnUrl::parse("/relative/page"),
            Err(ValidationError::InvalidUrl {
                field: ReturnUrl::FIELD,
                ..
            })
        ));
        assert!(matches!(
            ReturnUrl::parse(""),
            Err(ValidationError::MissingParameters { .. })
        ));
        assert_eq!(
            ReturnUrl::parse("https://app/x").unwrap().as_str(),
            "https://app/x"
        );
    }

    #[test]
    fn authorization_request_requires_scope() {
        assert_eq!(
            AuthorizationRequest::from_params(None, Some("https://app/x")).unwrap_err(),
            ValidationError::MissingParameters {
                fields: vec!["scope"]
            }
        );

        let request = AuthorizationRequest::from_params(Some("SMS"), Some(" ")).unwrap();
        assert_eq!(request.return_url(), None);
        assert!(!request.skips_auth_check());
    }

    #[test]
    fn consent_url_request_reports_all_missing_fields() {
        assert_eq!(
            ConsentUrlRequest::from_params(None, None).unwrap_err(),
            ValidationError::MissingParameters {
                fields: vec!["scope", "returnUrl"]
            }
        );
        assert_eq!(
            ConsentUrlRequest::from_params(Some("SMS"), Some("")).unwrap_err(),
            ValidationError::MissingParameters {
                fields: vec!["returnUrl"]
            }
        );
    }

    #[test]
    fn retry_count_starts_at_one() {
        assert_eq!(RetryCount::default().next(), RetryCount::new(1));
        assert_eq!(RetryCount::new(u32::MAX).next().get(), u32::MAX);
    }
}
