//! Shared application state.

use std::sync::{Arc, Mutex};

use scavenge_core::clock::Clock;
use scavenge_core::lock::HuntLocks;
use scavenge_core::repository::HuntStore;
use scavenge_core::rng::DeterministicRng;

use crate::config::AppConfig;

/// Deployment settings the handlers need per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuntSettings {
    /// Base of the share URLs handed out on publish.
    pub public_web_base_url: String,
    /// Code that opens time-locked post-its early.
    pub bypass_code: String,
}

impl From<&AppConfig> for HuntSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            public_web_base_url: config.public_web_base_url.clone(),
            bypass_code: config.bypass_code.clone(),
        }
    }
}

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Clock for timestamps and time locks.
    pub clock: Arc<dyn Clock + Send + Sync>,
    /// Random source for hunt codes and share slugs.
    pub rng: Arc<Mutex<dyn DeterministicRng + Send>>,
    /// Persistence backend.
    pub store: Arc<dyn HuntStore>,
    /// Per-hunt locks serializing publish and submit.
    pub locks: Arc<HuntLocks>,
    /// Deployment settings.
    pub settings: Arc<HuntSettings>,
}

impl AppState {
    /// Create new application state with a fresh lock registry.
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock + Send + Sync>,
        rng: Arc<Mutex<dyn DeterministicRng + Send>>,
        store: Arc<dyn HuntStore>,
        settings: HuntSettings,
    ) -> Self {
        Self {
            clock,
            rng,
            store,
            locks: Arc::new(HuntLocks::new()),
            settings: Arc::new(settings),
        }
    }
}
