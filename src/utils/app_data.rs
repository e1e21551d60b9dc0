use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "boolsearch";
const CONFIG_FILE: &str = "config.json";
const SNAPSHOT_FILE: &str = "inverted-index.snap";

/// Application configuration stored in the app data directory
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    /// Directory holding the corpus directory and the query file
    #[serde(default = "default_data_path")]
    pub data_path: PathBuf,

    /// Corpus directory name, relative to `data_path`
    #[serde(default = "default_corpus_dir")]
    pub corpus_dir: String,

    /// Query file name, relative to `data_path`
    #[serde(default = "default_queries_file")]
    pub queries_file: String,

    /// Directory query results are written to, one file per query id
    #[serde(default = "default_results_dir")]
    pub results_dir: PathBuf,

    /// Where the index snapshot lives. Defaults to the app data directory.
    #[serde(default)]
    pub snapshot_path: Option<PathBuf>,

    /// Evaluate queries of a batch in parallel
    #[serde(default = "default_parallel_queries")]
    pub parallel_queries: bool,

    /// Worker threads for query evaluation. 0 means the number of CPU cores.
    #[serde(default)]
    pub query_threads: usize,
}

fn default_data_path() -> PathBuf {
    PathBuf::from("A2")
}

fn default_corpus_dir() -> String {
    "documents_cs".to_string()
}

fn default_queries_file() -> String {
    "queries_cs.xml".to_string()
}

fn default_results_dir() -> PathBuf {
    PathBuf::from("bin")
}

fn default_parallel_queries() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
            corpus_dir: default_corpus_dir(),
            queries_file: default_queries_file(),
            results_dir: default_results_dir(),
            snapshot_path: None,
            parallel_queries: default_parallel_queries(),
            query_threads: 0,
        }
    }
}

impl AppConfig {
    /// Load config from the app data directory, or return default if not found
    pub fn load() -> Result<Self> {
        let config_path = get_config_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load config from an explicit file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: AppConfig =
            serde_json::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    /// Save config to the app data directory
    pub fn save(&self) -> Result<PathBuf> {
        let config_path = get_config_path()?;
        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&config_path, content).context("Failed to write config file")?;
        Ok(config_path)
    }

    /// Directory scanned for corpus XML files
    pub fn corpus_path(&self) -> PathBuf {
        self.data_path.join(&self.corpus_dir)
    }

    /// Path of the query XML file
    pub fn queries_path(&self) -> PathBuf {
        self.data_path.join(&self.queries_file)
    }

    /// Configured snapshot path, falling back to the app data directory
    pub fn effective_snapshot_path(&self) -> Result<PathBuf> {
        match &self.snapshot_path {
            Some(path) => Ok(path.clone()),
            None => Ok(get_app_data_dir()?.join(SNAPSHOT_FILE)),
        }
    }

    /// Resolve `query_threads`, mapping 0 to the CPU count
    pub fn effective_query_threads(&self) -> usize {
        if !self.parallel_queries {
            1
        } else if self.query_threads == 0 {
            num_cpus()
        } else {
            self.query_threads
        }
    }
}

/// Get the number of CPUs available
fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}

/// Get the path to the config file
pub fn get_config_path() -> Result<PathBuf> {
    let app_dir = get_app_data_dir()?;
    Ok(app_dir.join(CONFIG_FILE))
}

/// Get the application data directory
pub fn get_app_data_dir() -> Result<PathBuf> {
    let base = if cfg!(target_os = "macos") {
        dirs::home_dir().map(|h| h.join("Library").join("Application Support"))
    } else if cfg!(target_os = "windows") {
        dirs::data_local_dir()
    } else {
        // Linux/Unix: use XDG_DATA_HOME or ~/.local/share
        dirs::data_dir()
    };

    let base = base.context("Could not determine app data directory")?;
    let app_dir = base.join(APP_NAME);

    fs::create_dir_all(&app_dir)?;
    Ok(app_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_default() {
        let config = AppConfig::default();
        assert_eq!(config.corpus_path(), PathBuf::from("A2/documents_cs"));
        assert_eq!(config.queries_path(), PathBuf::from("A2/queries_cs.xml"));
        assert_eq!(config.results_dir, PathBuf::from("bin"));
        assert!(config.parallel_queries);
        assert!(config.snapshot_path.is_none());
    }

    #[test]
    fn test_effective_query_threads() {
        let mut config = AppConfig::default();
        assert!(config.effective_query_threads() >= 1);

        config.query_threads = 3;
        assert_eq!(config.effective_query_threads(), 3);

        config.parallel_queries = false;
        assert_eq!(config.effective_query_threads(), 1);
    }

    #[test]
    fn test_explicit_snapshot_path() {
        let config = AppConfig {
            snapshot_path: Some(PathBuf::from("/tmp/idx.snap")),
            ..Default::default()
        };
        assert_eq!(
            config.effective_snapshot_path().unwrap(),
            PathBuf::from("/tmp/idx.snap")
        );
    }

    #[test]
    fn test_app_config_partial_json() {
        // Should use defaults for missing fields
        let json = r#"{"data_path": "corpus", "parallel_queries": false}"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.data_path, PathBuf::from("corpus"));
        assert!(!config.parallel_queries);
        assert_eq!(config.queries_file, "queries_cs.xml");
    }

    #[test]
    fn test_app_config_empty_json() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"results_dir": "out", "query_threads": 2}"#).unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.results_dir, PathBuf::from("out"));
        assert_eq!(config.query_threads, 2);
    }

    #[test]
    fn test_load_from_missing_file() {
        let err = AppConfig::load_from(Path::new("/nonexistent/boolsearch.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
