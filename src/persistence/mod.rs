//! Assets repository persistence
//!
//! Reads and writes `info.json`, `logo.png` and `tokenlist.json` under
//! `blockchains/{handle}/` of an assets repository checkout.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{Result, UpdateError};
use crate::tokenlist::{AssetExistenceOracle, PreviousDocument};
use crate::types::{AssetInfo, TokenListDocument};

const TOKENLIST_FILE: &str = "tokenlist.json";
const INFO_FILE: &str = "info.json";
const LOGO_FILE: &str = "logo.png";

/// Filesystem view of one chain inside the assets repository
#[derive(Debug, Clone)]
pub struct AssetRepository {
    chain_dir: PathBuf,
}

impl AssetRepository {
    pub fn new(root: impl AsRef<Path>, handle: &str) -> Self {
        Self {
            chain_dir: root.as_ref().join("blockchains").join(handle),
        }
    }

    pub fn chain_dir(&self) -> &Path {
        &self.chain_dir
    }

    pub fn asset_dir(&self, id: &str) -> PathBuf {
        self.chain_dir.join("assets").join(id)
    }

    pub fn asset_info_path(&self, id: &str) -> PathBuf {
        self.asset_dir(id).join(INFO_FILE)
    }

    pub fn asset_logo_path(&self, id: &str) -> PathBuf {
        self.asset_dir(id).join(LOGO_FILE)
    }

    pub fn token_list_path(&self) -> PathBuf {
        self.chain_dir.join(TOKENLIST_FILE)
    }

    pub fn logo_exists(&self, id: &str) -> bool {
        self.asset_logo_path(id).exists()
    }

    /// Both `info.json` and `logo.png` are on disk
    pub fn asset_exists(&self, id: &str) -> bool {
        self.asset_info_path(id).is_file() && self.asset_logo_path(id).is_file()
    }

    pub fn read_asset_info(&self, id: &str) -> Result<AssetInfo> {
        read_json_file(&self.asset_info_path(id))
    }

    pub fn write_asset_info(&self, info: &AssetInfo) -> Result<()> {
        write_json_file(&self.asset_info_path(&info.id), info)
    }

    pub fn write_logo(&self, id: &str, bytes: &[u8]) -> Result<()> {
        write_file_atomic(&self.asset_logo_path(id), bytes)
    }

    /// Previous token list; a missing file and an unparsable one are told apart
    pub fn read_token_list(&self) -> PreviousDocument {
        let path = self.token_list_path();
        match fs::read_to_string(&path) {
            Ok(json) => match serde_json::from_str::<TokenListDocument>(&json) {
                Ok(doc) => PreviousDocument::Found(doc),
                Err(e) => PreviousDocument::Corrupt(e.to_string()),
            },
            Err(e) if e.kind() == ErrorKind::NotFound => PreviousDocument::Missing,
            Err(e) => PreviousDocument::Corrupt(e.to_string()),
        }
    }

    pub fn write_token_list(&self, doc: &TokenListDocument) -> Result<()> {
        write_json_file(&self.token_list_path(), doc)
    }
}

/// Oracle backed by `info.json` records of the repository
pub struct FsAssetOracle<'a> {
    repo: &'a AssetRepository,
}

impl<'a> FsAssetOracle<'a> {
    pub fn new(repo: &'a AssetRepository) -> Self {
        Self { repo }
    }
}

impl AssetExistenceOracle for FsAssetOracle<'_> {
    fn exists_and_active(&self, symbol: &str) -> bool {
        match self.repo.read_asset_info(symbol) {
            Ok(info) if info.is_active() => true,
            Ok(info) => {
                debug!(symbol = %symbol, status = %info.status, "Asset status is not active");
                false
            }
            Err(e) => {
                debug!(symbol = %symbol, error = %e, "Asset info unavailable");
                false
            }
        }
    }
}

fn create_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| UpdateError::io(parent, e))?;
    }
    Ok(())
}

pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let json = fs::read_to_string(path).map_err(|e| UpdateError::io(path, e))?;
    serde_json::from_str(&json).map_err(|e| UpdateError::json(path, e))
}

/// Pretty JSON with four-space indentation and a trailing newline
pub fn to_json_bytes<T: Serialize>(value: &T) -> serde_json::Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    buf.push(b'\n');
    Ok(buf)
}

pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let data = to_json_bytes(value).map_err(|e| UpdateError::json(path, e))?;
    write_file_atomic(path, &data)
}

fn temp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.tmp", name))
}

/// Target is either left as it was or fully replaced
pub fn write_file_atomic(path: &Path, data: &[u8]) -> Result<()> {
    create_parent_dir(path)?;

    let tmp = temp_sibling(path);
    if let Err(e) = fs::write(&tmp, data) {
        let _ = fs::remove_file(&tmp);
        return Err(UpdateError::io(&tmp, e));
    }

    fs::rename(&tmp, path).map_err(|e| {
        let _ = fs::remove_file(&tmp);
        UpdateError::io(path, e)
    })
}
