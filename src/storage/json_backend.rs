use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{
    errors::ShopError,
    ledger::ShopLedger,
    utils::{app_data_dir, ensure_dir, shops_dir_in, state_file_in},
};

use super::{Result, StorageBackend};

const SHOP_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// File-per-shop JSON persistence under a managed data directory.
#[derive(Clone)]
pub struct JsonStorage {
    shops_dir: PathBuf,
    state_file: PathBuf,
}

impl JsonStorage {
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let base = root.unwrap_or_else(app_data_dir);
        ensure_dir(&base)?;
        let shops_dir = shops_dir_in(&base);
        ensure_dir(&shops_dir)?;
        let state_file = state_file_in(&base);
        Ok(Self {
            shops_dir,
            state_file,
        })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(None)
    }

    pub fn shop_path(&self, name: &str) -> PathBuf {
        self.shops_dir
            .join(format!("{}.{}", canonical_name(name), SHOP_EXTENSION))
    }

    pub fn last_shop(&self) -> Result<Option<String>> {
        let state = self.read_state()?;
        Ok(state.last_shop)
    }

    pub fn record_last_shop(&self, name: Option<&str>) -> Result<()> {
        let mut state = self.read_state()?;
        state.last_shop = name.map(canonical_name);
        let data = serde_json::to_string_pretty(&state)?;
        write_atomic(&self.state_file, &data)?;
        Ok(())
    }

    fn read_state(&self) -> Result<StoreState> {
        if self.state_file.exists() {
            let data = fs::read_to_string(&self.state_file)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(StoreState::default())
        }
    }
}

impl StorageBackend for JsonStorage {
    fn save(&self, shop: &ShopLedger, name: &str) -> Result<()> {
        let path = self.shop_path(name);
        if let Some(parent) = path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(shop)?;
        let tmp = tmp_path(&path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn load(&self, name: &str) -> Result<ShopLedger> {
        let path = self.shop_path(name);
        if !path.exists() {
            return Err(ShopError::Storage(format!(
                "shop `{}` not found",
                canonical_name(name)
            )));
        }
        load_shop_from_path(&path)
    }

    fn list_shops(&self) -> Result<Vec<String>> {
        if !self.shops_dir.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.shops_dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(SHOP_EXTENSION) {
                continue;
            }
            let stem = match path.file_stem().and_then(|stem| stem.to_str()) {
                Some(stem) => stem.to_string(),
                None => continue,
            };
            entries.push(stem);
        }
        entries.sort();
        Ok(entries)
    }
}

pub fn save_shop_to_path(shop: &ShopLedger, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let json = serde_json::to_string_pretty(shop)?;
    let tmp = tmp_path(path);
    write_atomic(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

pub fn load_shop_from_path(path: &Path) -> Result<ShopLedger> {
    let data = fs::read_to_string(path)?;
    let shop: ShopLedger = serde_json::from_str(&data)?;
    Ok(shop)
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreState {
    last_shop: Option<String>,
}

fn canonical_name(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "shop".into()
    } else {
        sanitized
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
