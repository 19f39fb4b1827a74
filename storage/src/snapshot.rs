use crate::codec::{self, CodecError};
use crate::network::SocialNetwork;
use socnet_core::config::StorageConfig;
use socnet_core::error::{ErrorCode, SocnetError};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

pub const SNAPSHOT_EXTENSION: &str = "txt";

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid network name {name:?}: must be non-empty, not start with '.' and contain no path separator")]
    InvalidName { name: String },
    #[error("Format error in {}: {}", .path.display(), .source)]
    Format {
        path: PathBuf,
        #[source]
        source: CodecError,
    },
}

impl SocnetError for SnapshotError {
    fn error_code(&self) -> ErrorCode {
        match self {
            SnapshotError::Io(e) if e.kind() == std::io::ErrorKind::NotFound => ErrorCode::NotFound,
            SnapshotError::Io(_) => ErrorCode::Internal,
            SnapshotError::InvalidName { .. } | SnapshotError::Format { .. } => {
                ErrorCode::InvalidArgument
            }
        }
    }
}

/// Full snapshots of networks, one `<network-name>.txt` file each.
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(&config.data_dir)
    }

    /// Location of the snapshot for `network`, always directly inside the store.
    pub fn path_for(&self, network: &str) -> Result<PathBuf, SnapshotError> {
        validate_network_name(network)?;
        Ok(self.dir.join(format!("{}.{}", network, SNAPSHOT_EXTENSION)))
    }

    /// Writes the whole network, replacing any previous snapshot.
    /// Atomically writes to a temp file then renames.
    pub fn save(&self, network: &SocialNetwork) -> Result<PathBuf, SnapshotError> {
        let path = self.path_for(network.name())?;
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)?;
        }

        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, codec::encode(network))?;
        if let Err(e) = fs::rename(&tmp_path, &path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }

        info!("Saved network {} to {}", network.name(), path.display());
        Ok(path)
    }

    pub fn load(&self, network: &str) -> Result<SocialNetwork, SnapshotError> {
        Self::load_file(self.path_for(network)?)
    }

    /// Loads any snapshot file; the network is named after the file stem.
    pub fn load_file(path: impl AsRef<Path>) -> Result<SocialNetwork, SnapshotError> {
        let path = path.as_ref();
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();
        validate_network_name(&name)?;
        let content = fs::read_to_string(path)?;

        codec::decode(&name, &content).map_err(|source| SnapshotError::Format {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Names of the networks with a snapshot in this store, sorted.
    pub fn list(&self) -> Result<Vec<String>, SnapshotError> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(SNAPSHOT_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}

fn validate_network_name(name: &str) -> Result<(), SnapshotError> {
    if name.is_empty() || name.starts_with('.') || name.contains(&['/', '\\'][..]) {
        return Err(SnapshotError::InvalidName {
            name: name.to_string(),
        });
    }
    Ok(())
}
