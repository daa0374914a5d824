//! Hot-reloadable configuration
//!
//! The configuration snapshot is swapped atomically on SIGHUP. Requests
//! already in flight keep the snapshot they started with; the next request
//! resolves its vendor against the new one. A [`CapabilityWatcher`] follows
//! the swaps and reports when the set of usable vendors changes.

use std::sync::Arc;

use arc_swap::ArcSwap;
use infrastructure::{AppConfig, CapabilityReport, ProviderResolver, config::ConfigError};
use tokio::{sync::watch, task::JoinHandle};
use tracing::{error, info, warn};

/// A wrapper around `AppConfig` that supports atomic replacement
#[derive(Debug, Clone)]
pub struct ReloadableConfig {
    inner: Arc<ArcSwap<AppConfig>>,
    /// Bumped on every successful swap
    notify: watch::Sender<u64>,
    receiver: watch::Receiver<u64>,
}

impl ReloadableConfig {
    /// Wrap an initial snapshot
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        let (notify, receiver) = watch::channel(0);
        Self {
            inner: Arc::new(ArcSwap::new(Arc::new(config))),
            notify,
            receiver,
        }
    }

    /// Current snapshot
    #[must_use]
    pub fn load(&self) -> Arc<AppConfig> {
        self.inner.load_full()
    }

    /// Install a new snapshot and notify subscribers
    pub fn replace(&self, config: AppConfig) {
        self.inner.store(Arc::new(config));

        let version = *self.notify.borrow() + 1;
        info!(version, "Configuration snapshot replaced");
        if self.notify.send(version).is_err() {
            warn!("No config change receivers active");
        }
    }

    /// Re-read configuration from file and environment
    ///
    /// Keeps the previous snapshot when loading fails.
    pub fn reload(&self) -> Result<(), ConfigError> {
        let config = AppConfig::load()?;
        self.replace(config);
        Ok(())
    }

    /// Subscribe to snapshot version changes
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.receiver.clone()
    }
}

/// Follows snapshot swaps and yields capability changes
#[derive(Debug)]
pub struct CapabilityWatcher {
    snapshot: Arc<ArcSwap<AppConfig>>,
    changes: watch::Receiver<u64>,
    current: CapabilityReport,
}

impl CapabilityWatcher {
    /// Start watching from the current snapshot
    #[must_use]
    pub fn new(config: &ReloadableConfig) -> Self {
        let mut changes = config.subscribe();
        changes.mark_unchanged();
        Self {
            snapshot: Arc::clone(&config.inner),
            current: ProviderResolver::new(&config.load()).capabilities(),
            changes,
        }
    }

    /// Capabilities of the snapshot seen last
    #[must_use]
    pub const fn current(&self) -> CapabilityReport {
        self.current
    }

    /// Wait until a swap changes the capabilities
    ///
    /// Returns the previous and new report, or `None` once every
    /// [`ReloadableConfig`] handle is gone. Swaps that leave the report
    /// unchanged are skipped.
    pub async fn changed(&mut self) -> Option<(CapabilityReport, CapabilityReport)> {
        loop {
            self.changes.changed().await.ok()?;
            self.changes.borrow_and_update();

            let next = ProviderResolver::new(&self.snapshot.load()).capabilities();
            if next != self.current {
                let previous = std::mem::replace(&mut self.current, next);
                return Some((previous, next));
            }
        }
    }
}

/// Spawn a background task logging capability changes after reloads
pub fn spawn_capability_watcher(config: &ReloadableConfig) -> JoinHandle<()> {
    let mut watcher = CapabilityWatcher::new(config);
    tokio::spawn(async move {
        while let Some((before, after)) = watcher.changed().await {
            if before.chat && !after.chat {
                warn!("Chat provider no longer configured; readiness will report unavailable");
            }
            info!(?before, ?after, "Capabilities changed");
        }
    })
}

/// Spawn a background task that reloads configuration on SIGHUP
#[cfg(unix)]
pub fn spawn_config_reload_handler(config: ReloadableConfig) -> ReloadableConfig {
    use tokio::signal::unix::{SignalKind, signal};

    let handle = config.clone();
    tokio::spawn(async move {
        let mut sighup = match signal(SignalKind::hangup()) {
            Ok(s) => s,
            Err(e) => {
                error!("Failed to install SIGHUP handler: {}", e);
                return;
            },
        };

        loop {
            sighup.recv().await;
            info!("Received SIGHUP, reloading configuration");
            if let Err(e) = handle.reload() {
                warn!(error = %e, "Configuration reload failed, keeping previous config");
            }
        }
    });

    config
}

/// No-op on non-Unix systems
#[cfg(not(unix))]
pub fn spawn_config_reload_handler(config: ReloadableConfig) -> ReloadableConfig {
    warn!("SIGHUP config reload not supported on this platform");
    config
}
