use url::Url;

use crate::domain::value::{ConsentUrl, ReturnUrl};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Result of a scope check against the SDK server.
pub struct AuthorizationStatus {
    pub authorized: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Where [`crate::AuthorizationClient::authorize`] sent the host.
pub enum Redirect {
    /// Scope was already authorized; the host moved on to `returnUrl` unchanged.
    ReturnUrl(ReturnUrl),
    /// Scope needs consent; the host moved to the consent page.
    Consent(ConsentUrl),
}

impl Redirect {
    pub fn url(&self) -> &Url {
        match self {
            Self::ReturnUrl(url) => url.as_url(),
            Self::Consent(url) => url.as_url(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Successful terminal states of one authorization attempt.
pub enum AuthorizeOutcome {
    /// Scope is authorized and the host is already on `returnUrl`; nothing
    /// was navigated.
    AlreadyAuthorized,
    /// A navigation was issued to the host.
    Redirected(Redirect),
}
