//! Opening link targets outside the editor.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::error::OpenError;

/// Something that can hand a URL to the platform.
pub trait UrlOpener: Send + Sync {
    fn open(&self, url: &str) -> Result<(), OpenError>;
}

/// The platform's default handler, without waiting for it to exit.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemOpener;

impl UrlOpener for SystemOpener {
    fn open(&self, url: &str) -> Result<(), OpenError> {
        if url.is_empty() {
            return Err(OpenError::EmptyUrl);
        }
        open::that_detached(url).map_err(|source| OpenError::Launch {
            url: url.to_string(),
            source,
        })
    }
}

/// Launches the handler and waits for the launcher command, trying every
/// command `open` knows for the platform.
#[derive(Debug, Default, Clone, Copy)]
pub struct FallbackOpener;

impl UrlOpener for FallbackOpener {
    fn open(&self, url: &str) -> Result<(), OpenError> {
        if url.is_empty() {
            return Err(OpenError::EmptyUrl);
        }
        open::that(url).map_err(|source| OpenError::Launch {
            url: url.to_string(),
            source,
        })
    }
}

/// Primary opener with a fallback. Failures are logged, never returned.
#[derive(Clone)]
pub struct LinkOpener {
    primary: Arc<dyn UrlOpener>,
    fallback: Arc<dyn UrlOpener>,
}

impl LinkOpener {
    pub fn new(primary: Arc<dyn UrlOpener>, fallback: Arc<dyn UrlOpener>) -> Self {
        Self { primary, fallback }
    }

    /// Try the primary, then the fallback, on the calling thread.
    pub fn open(&self, url: &str) {
        let Err(primary_err) = self.primary.open(url) else {
            return;
        };
        log::debug!("primary opener failed: {primary_err}");

        if let Err(fallback_err) = self.fallback.open(url) {
            log::debug!("fallback opener failed: {fallback_err}");
        }
    }

    /// Open on a background thread. The handle is only useful for waiting in
    /// tests; dropping it detaches the thread.
    pub fn open_detached(&self, url: String) -> JoinHandle<()> {
        let opener = self.clone();
        thread::spawn(move || opener.open(&url))
    }
}

impl Default for LinkOpener {
    fn default() -> Self {
        Self::new(Arc::new(SystemOpener), Arc::new(FallbackOpener))
    }
}

impl std::fmt::Debug for LinkOpener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinkOpener").finish_non_exhaustive()
    }
}
