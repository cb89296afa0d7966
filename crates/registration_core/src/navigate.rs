use std::sync::{Arc, Mutex, PoisonError};

use anyhow::Result;
use tracing::info;
use url::Url;

/// Opens a URL in a new browsing context. The result is never fed back into the flow.
pub trait ExternalNavigator: Send + Sync {
    fn open(&self, url: &Url) -> Result<()>;
}

#[derive(Debug, Clone, Default)]
pub struct LoggingNavigator {
    opened: Arc<Mutex<Vec<Url>>>,
}

impl LoggingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opened(&self) -> Vec<Url> {
        self.opened
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ExternalNavigator for LoggingNavigator {
    fn open(&self, url: &Url) -> Result<()> {
        info!(%url, "opening external page");
        self.opened
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(url.clone());
        Ok(())
    }
}
