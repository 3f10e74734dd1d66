use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use reqwest::blocking::Client;
use serde::Deserialize;

use super::model::{MmsError, SAMPLE_RATE};

/// Hub queried when no override is given.
pub const DEFAULT_BASE_URL: &str = "https://huggingface.co";

/// Remote file names paired with their local cache names.
const ARTIFACTS: &[(&str, &str)] = &[
    ("onnx/model.onnx", "model.onnx"),
    ("vocab.json", "vocab.json"),
    ("config.json", "config.json"),
];

/// Paths to a repository's artifacts in the local cache.
#[derive(Debug, Clone)]
pub struct ModelArtifacts {
    pub onnx_path: PathBuf,
    pub vocab_path: PathBuf,
    pub config_path: PathBuf,
}

/// The subset of `config.json` the loader cares about.
#[derive(Debug, Deserialize)]
struct CheckpointConfig {
    sampling_rate: Option<u32>,
}

/// Downloads model artifacts from the HuggingFace Hub into a local cache.
///
/// Each repository gets its own cache directory; files already present are
/// never re-fetched, so only the first load of a language touches the
/// network. Base URL and cache root are injectable for tests and mirrors.
pub struct HubFetcher {
    base_url: String,
    cache_root: PathBuf,
    client: Client,
}

impl Default for HubFetcher {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, default_cache_root())
    }
}

impl HubFetcher {
    pub fn new(base_url: impl Into<String>, cache_root: impl Into<PathBuf>) -> Self {
        Self {
            base_url: base_url.into(),
            cache_root: cache_root.into(),
            client: Client::new(),
        }
    }

    /// The cache directory used for a repository.
    pub fn repo_dir(&self, repo_id: &str) -> PathBuf {
        self.cache_root.join(repo_id.replace('/', "--"))
    }

    /// Ensure all artifacts for `repo_id` are on disk, downloading any
    /// that are missing, and return their paths.
    pub fn fetch(&self, repo_id: &str) -> Result<ModelArtifacts, MmsError> {
        let repo_dir = self.repo_dir(repo_id);
        fs::create_dir_all(&repo_dir)?;

        for (remote_name, local_name) in ARTIFACTS {
            let dest = repo_dir.join(local_name);
            if dest.exists() {
                continue;
            }
            self.download_file(repo_id, remote_name, &dest)?;
        }

        let artifacts = ModelArtifacts {
            onnx_path: repo_dir.join("model.onnx"),
            vocab_path: repo_dir.join("vocab.json"),
            config_path: repo_dir.join("config.json"),
        };
        check_sampling_rate(&artifacts.config_path, repo_id);
        Ok(artifacts)
    }

    /// Download one repository file via a temp file and an atomic rename,
    /// so an interrupted transfer never leaves a partial artifact behind.
    fn download_file(&self, repo_id: &str, file_name: &str, dest: &Path) -> Result<(), MmsError> {
        let url = format!(
            "{}/{repo_id}/resolve/main/{file_name}?download=true",
            self.base_url
        );
        log::info!("Downloading {url}");

        let temp_path = dest.with_extension("download.tmp");
        let result = (|| -> Result<(), MmsError> {
            let mut response = self
                .client
                .get(&url)
                .send()
                .and_then(|r| r.error_for_status())
                .map_err(|source| MmsError::Download {
                    url: url.clone(),
                    source,
                })?;

            let mut file = fs::File::create(&temp_path)?;
            io::copy(&mut response, &mut file)?;
            fs::rename(&temp_path, dest)?;
            Ok(())
        })();

        if result.is_err() {
            let _ = fs::remove_file(&temp_path);
        }
        result
    }
}

/// Warn when a checkpoint declares a sampling rate other than 16 kHz.
///
/// Every published MMS checkpoint is 16 kHz; a mismatch means the cache
/// holds something unexpected, but synthesis can still proceed.
fn check_sampling_rate(config_path: &Path, repo_id: &str) {
    let parsed = fs::read_to_string(config_path)
        .ok()
        .and_then(|content| serde_json::from_str::<CheckpointConfig>(&content).ok());

    match parsed {
        Some(config) => {
            if let Some(rate) = config.sampling_rate {
                if rate != SAMPLE_RATE {
                    log::warn!(
                        "{repo_id} declares sampling rate {rate}, expected {SAMPLE_RATE}"
                    );
                }
            }
        }
        None => log::warn!("Could not parse config.json for {repo_id}"),
    }
}

/// Per-user cache root: `<user cache dir>/mms-speak`.
pub fn default_cache_root() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("mms-speak")
}
