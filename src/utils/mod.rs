use std::{
    env, fs,
    path::{Path, PathBuf},
    sync::Once,
};

use crate::errors::ShopError;

const DEFAULT_DIR_NAME: &str = ".fruitshop_core";
const SHOP_DIR: &str = "shops";
const STATE_FILE: &str = "state.json";

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber with sensible defaults.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("fruitshop_core=info".parse().unwrap());

        fmt().with_env_filter(filter).init();
    });
}

/// Returns the application-specific data directory, defaulting to `~/.fruitshop_core`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("FRUITSHOP_CORE_HOME") {
        return PathBuf::from(custom);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Directory holding managed shop ledger files inside a base directory.
pub fn shops_dir_in(base: &Path) -> PathBuf {
    base.join(SHOP_DIR)
}

/// Path to the shared state file (tracking the last opened shop).
pub fn state_file_in(base: &Path) -> PathBuf {
    base.join(STATE_FILE)
}

/// Creates the directory if it does not exist yet.
pub fn ensure_dir(path: &Path) -> Result<(), ShopError> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}
