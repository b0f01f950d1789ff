use crate::domain::validation::{ValidationError, require_params};
use crate::domain::value::{ReturnUrl, Scope};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Input to [`crate::AuthorizationClient::authorize`].
pub struct AuthorizationRequest {
    scope: Scope,
    return_url: Option<ReturnUrl>,
    skip_auth_check: bool,
}

impl AuthorizationRequest {
    /// Request `scope`, returning to the current location once consent completes.
    pub fn new(scope: Scope) -> Self {
        Self {
            scope,
            return_url: None,
            skip_auth_check: false,
        }
    }

    /// Build a request from loosely typed parameters.
    ///
    /// `scope` is required; `return_url` is optional and defaults to the current
    /// location at authorization time.
    pub fn from_params(
        scope: Option<&str>,
        return_url: Option<&str>,
    ) -> Result<Self, ValidationError> {
        require_params(&[(Scope::FIELD, scope)])?;
        let scope = Scope::parse(scope.unwrap_or_default())?;
        let return_url = return_url
            .filter(|it| !it.trim().is_empty())
            .map(ReturnUrl::parse)
            .transpose()?;
        Ok(Self {
            scope,
            return_url,
            skip_auth_check: false,
        })
    }

    pub fn with_return_url(mut self, return_url: ReturnUrl) -> Self {
        self.return_url = Some(return_url);
        self
    }

    /// Go straight to the consent flow without asking whether `scope` is
    /// already authorized.
    pub fn skip_auth_check(mut self, skip: bool) -> Self {
        self.skip_auth_check = skip;
        self
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn return_url(&self) -> Option<&ReturnUrl> {
        self.return_url.as_ref()
    }

    pub fn skips_auth_check(&self) -> bool {
        self.skip_auth_check
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Input to [`crate::AuthorizationClient::consent_url`].
pub struct ConsentUrlRequest {
    scope: Scope,
    return_url: ReturnUrl,
}

impl ConsentUrlRequest {
    pub fn new(scope: Scope, return_url: ReturnUrl) -> Self {
        Self { scope, return_url }
    }

    /// Build a request from loosely typed parameters; both fields are required
    /// and every missing one is reported.
    pub fn from_params(
        scope: Option<&str>,
        return_url: Option<&str>,
    ) -> Result<Self, ValidationError> {
        require_params(&[(Scope::FIELD, scope), (ReturnUrl::FIELD, return_url)])?;
        Ok(Self {
            scope: Scope::parse(scope.unwrap_or_default())?,
            return_url: ReturnUrl::parse(return_url.unwrap_or_default())?,
        })
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn return_url(&self) -> &ReturnUrl {
        &self.return_url
    }
}
