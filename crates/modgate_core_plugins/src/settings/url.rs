//! Outward navigation through the host.

use std::sync::Arc;

use modgate_system::api::API;

/// Opens URLs in the user's browser on behalf of the mod.
pub trait UrlOpener: Send + Sync {
    /// Opens `url`.
    ///
    /// # Errors
    ///
    /// Returns a description of the failure. Callers log it and move on.
    fn open(&self, url: &str) -> Result<(), String>;
}

/// The host's [`UrlOpener`], installed as an API.
pub struct UrlOpenerAPI {
    opener: Arc<dyn UrlOpener>,
}

impl API for UrlOpenerAPI {}

impl UrlOpenerAPI {
    /// Wraps an opener.
    #[must_use]
    pub fn new(opener: Arc<dyn UrlOpener>) -> Self {
        Self { opener }
    }

    /// Opens `url`.
    ///
    /// # Errors
    ///
    /// Forwards the opener's failure description.
    pub fn open(&self, url: &str) -> Result<(), String> {
        self.opener.open(url)
    }
}
