//! Host seam: the navigable "current location" the consent flow runs in.

use std::sync::{Arc, Mutex, PoisonError};

use url::Url;

/// The page (or equivalent host state) an authorization attempt runs on.
///
/// Each consent redirect is a full navigation: the host leaves the current
/// location and later re-enters [`crate::AuthorizationClient::authorize`] from
/// the `returnUrl`, carrying the retry counter in its query string.
pub trait Location: Send + Sync {
    /// Current absolute location.
    fn href(&self) -> Url;

    /// Leave the current location for `url`.
    fn navigate(&self, url: &Url);
}

#[derive(Debug, Clone)]
/// In-memory [`Location`] for hosts without a browser.
///
/// Navigation moves the current location and is recorded, so the redirect
/// round-trip can be replayed by calling `authorize` again.
pub struct MemoryLocation {
    state: Arc<Mutex<MemoryLocationState>>,
}

#[derive(Debug)]
struct MemoryLocationState {
    current: Url,
    history: Vec<Url>,
}

impl MemoryLocation {
    pub fn new(current: Url) -> Self {
        Self {
            state: Arc::new(Mutex::new(MemoryLocationState {
                current,
                history: Vec::new(),
            })),
        }
    }

    /// Every URL navigated to, oldest first.
    pub fn navigations(&self) -> Vec<Url> {
        self.lock().history.clone()
    }

    /// Jump to `url` without recording a navigation, as if the user opened it.
    pub fn set_href(&self, url: Url) {
        self.lock().current = url;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryLocationState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Location for MemoryLocation {
    fn href(&self) -> Url {
        self.lock().current.clone()
    }

    fn navigate(&self, url: &Url) {
        let mut state = self.lock();
        state.current = url.clone();
        state.history.push(url.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigate_moves_and_records() {
        let location = MemoryLocation::new(Url::parse("https://app/start").unwrap());
        let target = Url::parse("https://consent/y").unwrap();

        location.navigate(&target);
        assert_eq!(location.href(), target);
        assert_eq!(location.navigations(), vec![target]);

        location.set_href(Url::parse("https://app/back").unwrap());
        assert_eq!(location.href().as_str(), "https://app/back");
        assert_eq!(location.navigations().len(), 1);
    }
}
