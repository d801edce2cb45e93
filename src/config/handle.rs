//! Global config with atomic reload support.
//!
//! Uses `arc-swap` for lock-free reads and atomic config replacement.
//! Watch mode replaces the config when `syllabus.toml` changes; a scaffold
//! pass that already loaded the old config keeps using it until it finishes.
//!
//! ```text
//!   main ──► init_config()             watch ──► reload_config()
//!                 │                                   │
//!                 ▼                                   ▼
//!          CONFIG (ArcSwap<SiteConfig>) ◄── atomic replace
//!                 │
//!                 ▼
//!        cfg() (lock-free, per pass)
//! ```

use super::SiteConfig;
use arc_swap::ArcSwap;
use std::{
    fs,
    sync::{
        Arc, LazyLock, Mutex,
        atomic::{AtomicBool, Ordering},
    },
};

/// Global config storage with atomic replacement support.
pub static CONFIG: LazyLock<ArcSwap<SiteConfig>> =
    LazyLock::new(|| ArcSwap::from_pointee(SiteConfig::default()));

/// Hash of the config file content behind [`CONFIG`], if the file exists.
static CONFIG_HASH: Mutex<Option<blake3::Hash>> = Mutex::new(None);

/// Set once [`init_config`] has run.
static INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Get current config as `Arc<SiteConfig>`.
#[inline]
pub fn cfg() -> Arc<SiteConfig> {
    CONFIG.load_full()
}

/// Initialize global config (called once at startup).
pub fn init_config(config: SiteConfig) {
    let hash = hash_file(&config);
    if let Ok(mut guard) = CONFIG_HASH.lock() {
        *guard = hash;
    }
    CONFIG.store(Arc::new(config));
    INITIALIZED.store(true, Ordering::SeqCst);
}

/// Replace config atomically when the file content changed.
///
/// Returns `true` if the config was actually replaced, `false` if the
/// content hash matches the last load.
///
/// # Errors
///
/// Returns error if the config was never initialized, or if the new file
/// fails to parse or validate. The previous config stays active then.
pub fn reload_config() -> anyhow::Result<bool> {
    if !INITIALIZED.load(Ordering::SeqCst) {
        anyhow::bail!("config reloaded before initialization");
    }
    let current = cfg();
    let Some(cli) = current.get_cli() else {
        anyhow::bail!("config was initialized without CLI arguments");
    };

    let new_hash = hash_file(&current);
    {
        let guard = CONFIG_HASH
            .lock()
            .map_err(|_| anyhow::anyhow!("config hash lock poisoned"))?;
        if *guard == new_hash {
            return Ok(false);
        }
    }

    let new_config = SiteConfig::load(cli)?;
    new_config.validate()?;

    CONFIG.store(Arc::new(new_config));
    if let Ok(mut guard) = CONFIG_HASH.lock() {
        *guard = new_hash;
    }
    Ok(true)
}

/// Hash the config file, `None` when it does not exist.
fn hash_file(config: &SiteConfig) -> Option<blake3::Hash> {
    fs::read(&config.config_path)
        .ok()
        .map(|content| blake3::hash(&content))
}
