use std::fmt;

use url::Url;

use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Name of a single service permission (for example `SMS` or `MIM`).
///
/// Invariant: non-empty after trimming, no commas and no inner whitespace.
pub struct ServiceName(String);

impl ServiceName {
    /// Create a validated [`ServiceName`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.contains(',') || trimmed.contains(char::is_whitespace) {
            return Err(ValidationError::InvalidServiceName { input: value });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServiceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Ordered set of service names requested from the user (`scope`).
///
/// Invariant: at least one service; no duplicates; insertion order is kept.
/// On the wire the scope is the comma-joined list of names.
pub struct Scope(Vec<ServiceName>);

impl Scope {
    /// Query parameter name used by the SDK server (`scope`).
    pub const FIELD: &'static str = "scope";

    /// Build a scope from already validated names, dropping duplicates.
    pub fn new(services: impl IntoIterator<Item = ServiceName>) -> Result<Self, ValidationError> {
        let mut unique = Vec::<ServiceName>::new();
        for service in services {
            if !unique.contains(&service) {
                unique.push(service);
            }
        }
        if unique.is_empty() {
            return Err(ValidationError::MissingParameters {
                fields: vec![Self::FIELD],
            });
        }
        Ok(Self(unique))
    }

    /// Parse a comma-separated scope such as `"SMS, MIM"`.
    ///
    /// Blank entries are skipped; an input with no names at all is reported as
    /// a missing `scope`.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let services = value
            .split(',')
            .filter(|part| !part.trim().is_empty())
            .map(ServiceName::new)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(services)
    }

    pub fn services(&self) -> &[ServiceName] {
        &self.0
    }

    /// Comma-joined wire form.
    pub fn to_param(&self) -> String {
        self.0
            .iter()
            .map(ServiceName::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_param())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Absolute URL the user lands on once the consent flow completes (`returnUrl`).
pub struct ReturnUrl(Url);

impl ReturnUrl {
    /// Query parameter name used by the SDK server (`returnUrl`).
    pub const FIELD: &'static str = "returnUrl";

    /// Parse an absolute URL. Blank input is reported as a missing `returnUrl`.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        parse_absolute(Self::FIELD, value).map(Self)
    }

    pub fn as_url(&self) -> &Url {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn into_url(self) -> Url {
        self.0
    }
}

impl From<Url> for ReturnUrl {
    fn from(value: Url) -> Self {
        Self(value)
    }
}

impl fmt::Display for ReturnUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Consent page URL returned by the SDK server.
///
/// Opaque to the client: it is only ever navigated to.
pub struct ConsentUrl(Url);

impl ConsentUrl {
    /// JSON field name in the `oauth/userAuthUrl` response (`url`).
    pub const FIELD: &'static str = "url";

    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        parse_absolute(Self::FIELD, value).map(Self)
    }

    pub fn as_url(&self) -> &Url {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn into_url(self) -> Url {
        self.0
    }
}

impl fmt::Display for ConsentUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
/// Number of consent redirects already performed for one authorization attempt.
pub struct RetryCount(u32);

impl RetryCount {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u32 {
        self.0
    }

    /// Count for the next redirect; the first redirect carries `1`.
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for RetryCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn parse_absolute(field: &'static str, value: &str) -> Result<Url, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingParameters {
            fields: vec![field],
        });
    }
    Url::parse(trimmed).map_err(|_| ValidationError::InvalidUrl {
        field,
        input: value.to_owned(),
    })
}
