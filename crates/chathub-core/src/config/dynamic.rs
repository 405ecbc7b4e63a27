//! Hot-reloadable push configuration container.

use std::sync::Arc;

use arc_swap::ArcSwap;

use super::push::PushConfig;

/// Thread-safe container for the current [`PushConfig`] snapshot.
///
/// Reads are a single atomic load, so the hub and relay client fetch a
/// fresh snapshot for every operation they process; storing a new value
/// makes it visible to the next operation without restarting anything.
#[derive(Debug, Clone)]
pub struct DynamicPushConfig {
    current: Arc<ArcSwap<PushConfig>>,
}

impl DynamicPushConfig {
    /// Create a container holding the given initial configuration.
    pub fn new(config: PushConfig) -> Self {
        Self {
            current: Arc::new(ArcSwap::from_pointee(config)),
        }
    }

    /// Get the current configuration snapshot.
    pub fn load(&self) -> Arc<PushConfig> {
        self.current.load_full()
    }

    /// Replace the configuration; observed by the next operation processed.
    pub fn store(&self, config: PushConfig) {
        tracing::info!(
            "Push configuration updated: relay_url='{}', contents='{}'",
            config.relay_url,
            config.contents.as_str()
        );
        self.current.store(Arc::new(config));
    }
}

impl Default for DynamicPushConfig {
    fn default() -> Self {
        Self::new(PushConfig::default())
    }
}
