use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    MissingParameters { fields: Vec<&'static str> },
    InvalidUrl { field: &'static str, input: String },
    InvalidServiceName { input: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingParameters { fields } => {
                write!(f, "missing required parameters: {}", fields.join(", "))
            }
            Self::InvalidUrl { field, input } => write!(f, "{field} is not a valid URL: {input}"),
            Self::InvalidServiceName { input } => write!(f, "invalid service name: {input}"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Check a set of required parameters in one pass.
///
/// Every `(field, value)` pair whose value is absent or blank is reported, so
/// callers see the full list of missing fields at once.
pub fn require_params(params: &[(&'static str, Option<&str>)]) -> Result<(), ValidationError> {
    let fields = params
        .iter()
        .filter(|(_, value)| value.is_none_or(|it| it.trim().is_empty()))
        .map(|(field, _)| *field)
        .collect::<Vec<_>>();

    if fields.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::MissingParameters { fields })
    }
}

#[cfg(test)]
mod tests {
    use super::{ValidationError, require_params};

    #[test]
    fn display_messages_are_human_readable() {
        let err = ValidationError::MissingParameters {
            fields: vec!["scope", "returnUrl"],
        };
        assert_eq!(
            err.to_string(),
            "missing required parameters: scope, returnUrl"
        );

        let err = ValidationError::InvalidUrl {
            field: "returnUrl",
            input: "nope".to_owned(),
        };
        assert_eq!(err.to_string(), "returnUrl is not a valid URL: nope");

        let err = ValidationError::InvalidServiceName {
            input: "S MS".to_owned(),
        };
        assert_eq!(err.to_string(), "invalid service name: S MS");
    }

    #[test]
    fn require_params_lists_every_missing_field() {
        let err = require_params(&[("scope", None), ("returnUrl", Some("  "))]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingParameters {
                fields: vec!["scope", "returnUrl"]
            }
        );
    }

    #[test]
    fn require_params_accepts_present_values() {
        let params = [("scope", Some("SMS")), ("returnUrl", Some("https://a/"))];
        assert!(require_params(&params).is_ok());
    }
}
